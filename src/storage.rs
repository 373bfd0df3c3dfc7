// Manages the on-disk task file: one encoded record per line.
//
// Every mutation of the in-memory list is mirrored here before control goes
// back to the caller. Appends go to the end of the file, everything else
// rewrites the whole file through a temp file + rename.
use crate::error::{Error, RecordError, Result};
use crate::model::Task;
use crate::model::record;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const TASK_FILE_NAME: &str = "tasks.txt";
/// Extension of the sidecar that keeps lines dropped while loading.
pub const REJECTED_EXTENSION: &str = "rejected";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Opens the task file, creating it and its parent directory if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| Error::persistence(parent, e))?;
            log::info!("Created data directory {}", parent.display());
        }
        if !path.exists() {
            File::create(&path).map_err(|e| Error::persistence(&path, e))?;
            log::info!("Created empty task file {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rejected_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(REJECTED_EXTENSION);
        PathBuf::from(name)
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> std::io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn io_err(&self, e: std::io::Error) -> Error {
        Error::persistence(&self.path, e)
    }

    /// Reads the tasks back in file order.
    ///
    /// Lines that cannot be decoded are logged, moved to the `.rejected`
    /// sidecar and dropped from the task file, so that line `i` of the file
    /// is always task `i` of the list. Failing to do so is logged, not fatal.
    pub fn load(&self) -> Result<Vec<Task>> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;

        let mut tasks = Vec::new();
        let mut rejected = Vec::new();
        let mut needs_rewrite = false;

        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                needs_rewrite = true;
                continue;
            }
            match record::decode(line) {
                Ok(task) => tasks.push(task),
                Err(RecordError::UnknownKind(kind)) => {
                    log::warn!(
                        "Skipping line {} of {}: unknown task kind '{}'",
                        line_no + 1,
                        self.path.display(),
                        kind
                    );
                    rejected.push(line.to_string());
                }
                Err(reason) => {
                    let err = Error::CorruptRecord {
                        line: line.to_string(),
                        reason,
                    };
                    log::warn!(
                        "Skipping line {} of {}: {}",
                        line_no + 1,
                        self.path.display(),
                        err
                    );
                    rejected.push(line.to_string());
                }
            }
        }

        if !rejected.is_empty() {
            match self.stash_rejected(&rejected) {
                Ok(()) => needs_rewrite = true,
                // Unstashed lines stay in the task file.
                Err(e) => {
                    log::error!("Leaving unreadable lines in place: {}", e);
                    needs_rewrite = false;
                }
            }
        }
        if needs_rewrite {
            let lines: Vec<String> = tasks.iter().map(record::encode).collect();
            if let Err(e) = self.rewrite(&lines) {
                log::error!("Could not compact the task file: {}", e);
            }
        }

        log::info!(
            "Loaded {} task(s) from {} ({} rejected)",
            tasks.len(),
            self.path.display(),
            rejected.len()
        );
        Ok(tasks)
    }

    /// Adds one encoded record at the end of the file.
    pub fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        let needs_newline = !ends_with_newline(&mut file).map_err(|e| self.io_err(e))?;
        let mut buf = String::with_capacity(line.len() + 2);
        if needs_newline {
            buf.push('\n');
        }
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes()).map_err(|e| self.io_err(e))?;
        log::debug!("Appended record to {}", self.path.display());
        Ok(())
    }

    /// Rewrites the file without the record at `index`.
    pub fn remove_at(&self, index: usize) -> Result<()> {
        let mut lines = self.read_records()?;
        let line_no = Self::line_of_record(&lines, index)?;
        lines.remove(line_no);
        self.rewrite(&lines)
    }

    /// Rewrites the file with only the done flag of record `index` replaced.
    pub fn set_done_at(&self, index: usize, done: bool) -> Result<()> {
        let mut lines = self.read_records()?;
        let line_no = Self::line_of_record(&lines, index)?;
        let line = &lines[line_no];
        let updated = record::with_done_flag(line, done).map_err(|reason| Error::CorruptRecord {
            line: line.clone(),
            reason,
        })?;
        lines[line_no] = updated;
        self.rewrite(&lines)
    }

    /// Line holding task `index`, counting only lines that decode. Unreadable
    /// lines only survive here when they could not be moved aside on load.
    fn line_of_record(lines: &[String], index: usize) -> Result<usize> {
        let mut records = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| record::decode(line).is_ok())
            .map(|(line_no, _)| line_no);
        let len = records.clone().count();
        records.nth(index).ok_or(Error::Index {
            number: index + 1,
            len,
        })
    }

    fn read_records(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn rewrite(&self, lines: &[String]) -> Result<()> {
        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        Self::atomic_write(&self.path, contents).map_err(|e| self.io_err(e))?;
        log::debug!(
            "Rewrote {} with {} record(s)",
            self.path.display(),
            lines.len()
        );
        Ok(())
    }

    fn stash_rejected(&self, lines: &[String]) -> Result<()> {
        let path = self.rejected_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::persistence(&path, e))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| Error::persistence(&path, e))?;
        }
        log::warn!(
            "Moved {} unreadable line(s) to {}",
            lines.len(),
            path.display()
        );
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use crate::model::Priority;

    fn storage_in(ctx: &TestContext) -> LocalStorage {
        LocalStorage::open(ctx.get_data_dir().unwrap().join(TASK_FILE_NAME)).unwrap()
    }

    #[test]
    fn open_creates_missing_directories_and_file() {
        let ctx = TestContext::new();
        let path = ctx.root.join("nested").join("deeper").join("tasks.txt");
        let storage = LocalStorage::open(&path).unwrap();
        assert!(path.exists());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let ctx = TestContext::new();
        let path = ctx.root.join("atomic.txt");
        LocalStorage::atomic_write(&path, "one\n").unwrap();
        LocalStorage::atomic_write(&path, "two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn append_repairs_missing_final_newline() {
        let ctx = TestContext::new();
        let storage = storage_in(&ctx);
        fs::write(storage.path(), "T | false | LOW | first").unwrap();
        storage.append("T | false | LOW | second").unwrap();
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "T | false | LOW | first\nT | false | LOW | second\n"
        );
    }

    #[test]
    fn set_done_at_and_remove_at_address_records() {
        let ctx = TestContext::new();
        let storage = storage_in(&ctx);
        for d in ["a", "b", "c"] {
            let t = Task::new_todo(d, Priority::Medium).unwrap();
            storage.append(&record::encode(&t)).unwrap();
        }
        storage.set_done_at(1, true).unwrap();
        storage.remove_at(0).unwrap();
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "T | true | MEDIUM | b\nT | false | MEDIUM | c\n"
        );
        assert!(matches!(
            storage.remove_at(2),
            Err(Error::Index { number: 3, len: 2 })
        ));
    }

    #[test]
    fn load_moves_bad_lines_aside() {
        let ctx = TestContext::new();
        let storage = storage_in(&ctx);
        fs::write(
            storage.path(),
            "T | false | LOW | keep me\n\nZ | false | LOW | alien\nD | false | LOW | late | someday\nE | true | HIGH | gig | 8pm | late\n",
        )
        .unwrap();

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description(), "keep me");
        assert_eq!(tasks[1].description(), "gig");

        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "T | false | LOW | keep me\nE | true | HIGH | gig | 8pm | late\n"
        );
        assert_eq!(
            fs::read_to_string(storage.rejected_path()).unwrap(),
            "Z | false | LOW | alien\nD | false | LOW | late | someday\n"
        );
    }

    #[test]
    fn load_still_starts_when_bad_lines_cannot_be_moved() {
        let ctx = TestContext::new();
        let storage = storage_in(&ctx);
        let contents = "T | false | LOW | a\nZ | junk\nT | false | LOW | b\n";
        fs::write(storage.path(), contents).unwrap();
        // A directory in the sidecar's place makes stashing fail.
        fs::create_dir(storage.rejected_path()).unwrap();

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), contents);

        storage.set_done_at(1, true).unwrap();
        storage.remove_at(0).unwrap();
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "Z | junk\nT | true | LOW | b\n"
        );
        assert!(matches!(
            storage.set_done_at(1, true),
            Err(Error::Index { number: 2, len: 1 })
        ));
    }

    #[test]
    fn clean_file_is_not_rewritten() {
        let ctx = TestContext::new();
        let storage = storage_in(&ctx);
        // Legacy event layout stays byte-for-byte when nothing had to be dropped.
        let original = "E | false | LOW | gig | 8pm - late\n";
        fs::write(storage.path(), original).unwrap();
        assert_eq!(storage.load().unwrap().len(), 1);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), original);
        assert!(!storage.rejected_path().exists());
    }
}
