//! log4rs setup.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Initialize logging from `config_file`, or log `info` and above to
/// stderr if the file can't be used.
pub fn init_logging(config_file: &str) {
    if let Err(file_err) = log4rs::init_file(config_file, Default::default()) {
        let fallback = default_config(LevelFilter::Info)
            .and_then(|config| log4rs::init_config(config).map_err(|e| e.into()));
        match fallback {
            Ok(_) => log::warn!("Using built-in logging config, {config_file}: {file_err}"),
            Err(e) => eprintln!("Error initializing log4rs: {e}"),
        }
    }
}

/// Console appender on stderr at `level`.
pub fn default_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_root_level() {
        let config = default_config(LevelFilter::Debug).expect("valid config");
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}
