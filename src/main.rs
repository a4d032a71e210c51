extern crate serde_derive;

#[macro_use]
extern crate log;

#[macro_use]
extern crate derive_builder;

mod app;
mod configuration;
mod connection;
mod reporter;
mod time;

use log::LevelFilter;
use std::{path::PathBuf, process::exit, sync::Arc};
use structopt::StructOpt;

use self::app::{error::Error, event::read_events_file, exit_code, App, Summary};
use self::configuration::{
    command_line::Opt,
    settings::Settings,
};
use self::connection::{dry_run::DryRun, http::build_client};
use self::reporter::Reporter;

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.map(LevelFilter::from).unwrap_or(LevelFilter::Info),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        exit(2);
    }

    let result = run(&options);
    match &result {
        Ok(summary) => debug!("Finished {:?}", summary),
        Err(e) => error!("{}", e),
    }
    exit(exit_code(&result));
}

fn run(options: &Opt) -> Result<Summary, Error> {
    let mut settings = Settings::load(options.settings.as_deref(), &options.env_file)?;
    if let Some(results_log) = &options.results_log {
        settings.results_log = results_log.clone();
    }
    debug!("Initiated settings {:#?}", settings);

    let events = read_events_file(&options.file, options.format)?;
    info!("Read {} events from {}", events.len(), options.file.display());

    let summary = if options.dry_run {
        App::new(Reporter::new(&settings, Arc::new(DryRun))?).run(events)
    } else {
        let client = build_client(settings.request_timeout)?;
        App::new(Reporter::new(&settings, Arc::new(client))?).run(events)
    };
    Ok(summary)
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
