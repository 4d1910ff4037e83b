use std::ffi::OsStr;
use std::path::PathBuf;
use syslog::{BasicLogger, Facility};

pub fn init_logging(use_syslog: bool) {
    if use_syslog {
        init_logging_syslog()
    } else {
        init_logging_env()
    }
}

fn init_logging_syslog() {
    log
        ::set_boxed_logger(
            Box::new(
                BasicLogger::new(
                    syslog::unix(
                        // only 3164 has log crate integration at the moment
                        syslog::Formatter3164 {
                            facility: Facility::LOG_USER,
                            hostname: None,
                            process: std::env::args()
                                .next()
                                .and_then(|name|
                                    PathBuf::from(name)
                                        .file_name()
                                        .map(|n|
                                            OsStr::to_string_lossy(n)
                                                .into_owned()
                                        )
                                )
                                .unwrap_or_default(),
                            pid: std::process::id(),
                        }
                    ).expect("syslog initialization failed")
                )
            )
        )
        .map(|()| log::set_max_level(log::LevelFilter::Info))
        .expect("syslog initialization failed");
}

fn init_logging_env() {
    env_logger::builder()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}
