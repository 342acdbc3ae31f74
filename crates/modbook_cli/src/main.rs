//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load a core config (first argument, optional) and the data file it names.
//! - Print a deterministic summary for quick local sanity checks.

use modbook_core::{BookStorage, CoreConfig, JsonBookStorage};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "modbook.toml".to_string());

    let config = match CoreConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("modbook config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if config.log.dir.is_some() {
        if let Err(err) = modbook_core::init_logging(&config.log) {
            eprintln!("modbook logging disabled: {err}");
        }
    }

    println!("modbook_core version={}", modbook_core::core_version());

    let storage = JsonBookStorage::new(&config.data_file);
    match storage.read_book() {
        Ok(Some(book)) => {
            let summary = book.summary();
            println!(
                "data_file={} persons={} modules1={} modules2={} active={}",
                storage.path().display(),
                summary.persons,
                summary.first_semester_modules,
                summary.second_semester_modules,
                summary.active_semester
            );
            log::info!("event=cli_probe module=cli status=ok");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("data_file={} status=missing", storage.path().display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("modbook data error: {err}");
            ExitCode::FAILURE
        }
    }
}
