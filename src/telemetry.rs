use std::{fs::OpenOptions, io::Write};

use env_logger::{Env, Target};

use crate::configuration::LogSettings;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs the global logger, appending `timestamp [LEVEL] message` lines to
/// the configured file. `RUST_LOG` overrides the configured level.
///
/// Falls back to stderr when the log file cannot be opened.
pub fn init_logger(settings: &LogSettings) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(&settings.level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.args()
        )
    });

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.file)
    {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!(
            "Could not open log file {}, logging to stderr: {}",
            settings.file.display(),
            e
        ),
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Logger already initialised: {}", e);
    }
}
