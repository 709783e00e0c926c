use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use university_timetable::{logging, Config, Result, TimetableSystem};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    logging::init(config.log().display_level(), config.log().level_filter())?;

    info!(data_dir = %config.storage().data_dir().display(), "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut system = TimetableSystem::from_config(&config, stdin.lock(), stdout.lock())?;
    system.run()
}
