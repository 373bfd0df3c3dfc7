// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help text.
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Keep config, data and log under this directory instead of the OS ones.
    pub root: Option<PathBuf>,
    /// Use this task file, overriding both the config and the default.
    pub file: Option<PathBuf>,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    /// Parses the arguments after the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut parsed = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => parsed.help = true,
                "--version" | "-V" => parsed.version = true,
                flag @ ("--root" | "-r" | "--file" | "-f") => {
                    let Some(value) = args.get(i + 1) else {
                        bail!("{} needs a path", flag);
                    };
                    let slot = match flag {
                        "--root" | "-r" => &mut parsed.root,
                        _ => &mut parsed.file,
                    };
                    *slot = Some(PathBuf::from(value));
                    i += 1; // Also consumed the value
                }
                other => bail!("Unknown argument '{}'. Try --help.", other),
            }
            i += 1;
        }
        Ok(parsed)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Taskline v{} - A small line-oriented task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--file <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!("    {} --version", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config, data and log.");
    println!("    -f, --file <path>     Read and write tasks in this file.");
    println!("    -h, --help            Show this help message.");
    println!("    -V, --version         Show the version.");
    println!();
    println!("COMMANDS (one per line on stdin):");
    println!("    todo <desc> /priority <p>                         Add a todo");
    println!("    deadline <desc> /by <yyyy-mm-dd HHmm> /priority <p>  Add a deadline");
    println!("    event <desc> /from <start> /to <end> /priority <p>   Add an event");
    println!("    list                                              Show all tasks");
    println!("    mark <n> | unmark <n>                             Set task n done / not done");
    println!("    delete <n>                                        Remove task n");
    println!("    find <keyword>                                    Search descriptions");
    println!("    bye                                               Quit");
    println!();
    println!("    Priority is LOW, MEDIUM or HIGH (or L, M, H), in any case.");
    println!();
    println!("EXAMPLES:");
    println!("    todo Read book /priority low");
    println!("    deadline Submit report /by 2025-09-15 1800 /priority H");
    println!("    event Team offsite /from Mon 9am /to Tue 5pm /priority M");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() {
        assert_eq!(CliArgs::parse(Vec::<String>::new()).unwrap(), CliArgs::default());
    }

    #[test]
    fn paths_are_taken_from_the_next_argument() {
        let args = CliArgs::parse(["-r", "/tmp/root", "--file", "mine.txt"]).unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/tmp/root")));
        assert_eq!(args.file, Some(PathBuf::from("mine.txt")));
        assert!(!args.help);
    }

    #[test]
    fn flags_without_values_and_unknown_flags_fail() {
        assert!(CliArgs::parse(["--root"]).is_err());
        assert!(CliArgs::parse(["--file"]).is_err());
        assert!(CliArgs::parse(["--colour"]).is_err());
    }

    #[test]
    fn help_and_version() {
        let args = CliArgs::parse(["--version", "-h"]).unwrap();
        assert!(args.help);
        assert!(args.version);
    }
}
