use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use hfind::cli;
use hfind::config::HfindConfig;
use hfind::error::HfindError;
use hfind::fs::connect;
use hfind::translator;

fn main() -> ExitCode {
    let line = match cli::scan(std::env::args().skip(1)) {
        Ok(line) => line,
        Err(e) => return fail(e),
    };

    let root = match (&line.path, line.help) {
        (Some(path), false) => PathBuf::from(path),
        _ => {
            print!("{}", cli::usage());
            return ExitCode::SUCCESS;
        }
    };

    init_logging(line.config.verbose);

    let fs = match connect(&HfindConfig::from_env()) {
        Ok(fs) => fs,
        Err(e) => return fail(e),
    };

    let expression = match translator::build(&line.tokens, fs.as_ref()) {
        Ok(expression) => expression,
        Err(e) => return fail(e),
    };

    // -depth anywhere in the expression applies to the whole run.
    let mut config = line.config;
    config.depth_mode = config.depth_mode || expression.uses_depth();

    match expression.run(&root, fs.as_ref(), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error crawling filesystem: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn fail(e: HfindError) -> ExitCode {
    eprintln!("hfind: {e}");
    ExitCode::from(e.exit_code())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "hfind=debug" } else { "hfind=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
