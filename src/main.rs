use codetrack::cli::Args;
use codetrack::commands::run_command;
use codetrack::database_factory::DatabaseFactory;
use log::{debug, error};
use std::process::ExitCode;

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let config = args.database_config()?;
    debug!("Using database config: {:?}", config);
    let db = DatabaseFactory::create(config)?;

    let output = run_command(&db, &args.command)?;
    print!("{}", output);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse_args();
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
