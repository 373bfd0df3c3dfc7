// Binary entry point for the console front end.
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use taskline::cli::{self, CliArgs};
use taskline::config::Config;
use taskline::context::{AppContext, StandardContext};
use taskline::controller::TaskController;
use taskline::logging;
use taskline::ui;

fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        cli::print_help("taskline");
        return Ok(());
    }
    if args.version {
        println!("taskline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    if let Some(log_path) = ctx.get_log_path()
        && let Err(e) = logging::init_logging(config.log_level_filter(), &log_path)
    {
        eprintln!("Logging disabled: {:#}", e);
    }

    let task_file = match args.file {
        Some(path) => path,
        None => config.resolve_task_file(&ctx)?,
    };
    let mut controller = TaskController::open(&task_file)
        .with_context(|| format!("Failed to open task file {}", task_file.display()))?;
    log::info!(
        "Loaded {} task(s) from {}",
        controller.tasks().len(),
        task_file.display()
    );

    let mut out = io::stdout().lock();
    show(&mut out, config.show_borders, ui::GREETING)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match controller.execute(&line) {
            Ok(reply) => reply,
            Err(message) => message,
        };
        show(&mut out, config.show_borders, &reply)?;
        if controller.is_finished() {
            break;
        }
    }
    log::info!("Session ended");
    Ok(())
}

fn show(out: &mut impl Write, borders: bool, message: &str) -> io::Result<()> {
    if borders {
        write!(out, "{}", ui::encase(message))?;
    } else {
        writeln!(out, "{}", message)?;
    }
    out.flush()
}
