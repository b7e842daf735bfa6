use crate::config::Config;
use flexi_logger::{Logger, LoggerHandle};

/// Starts logging to stderr. `RUST_LOG` overrides `--log-level`.
///
/// Keep the returned handle alive for the lifetime of the program.
pub fn init(config: &Config) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_stderr()
        .start()?;

    log::debug!("logging initialised at level {}", config.log_level);
    Ok(handle)
}
