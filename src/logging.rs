use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(alias = "error")]
    ERROR,
    #[serde(alias = "warn")]
    WARN,
    #[default]
    #[serde(alias = "info")]
    INFO,
    #[serde(alias = "debug")]
    DEBUG,
    #[serde(alias = "verbose", alias = "trace")]
    VERBOSE,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::ERROR => LevelFilter::Error,
            LogLevel::WARN => LevelFilter::Warn,
            LogLevel::INFO => LevelFilter::Info,
            LogLevel::DEBUG => LevelFilter::Debug,
            LogLevel::VERBOSE => LevelFilter::Trace,
        }
    }
}

/// Installs the global logger. Fails if one is already installed.
pub fn init(level: LogLevel) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level.into())
        .chain(std::io::stderr())
        .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_is_the_most_detailed() {
        assert!(LogLevel::VERBOSE > LogLevel::DEBUG);
        assert!(LogLevel::ERROR < LogLevel::INFO);
        assert_eq!(LevelFilter::from(LogLevel::VERBOSE), LevelFilter::Trace);
    }
}
