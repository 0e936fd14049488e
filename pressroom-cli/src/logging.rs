use std::io::{self, IsTerminal};

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Голый уровень относится к крейтам pressroom, остальное пишется от `warn`.
/// Строка с директивами (`info,reqwest=debug`) берётся как есть.
fn directives(level: &str) -> String {
    let level = level.trim();
    if level.contains(['=', ',']) {
        return level.to_string();
    }
    format!("warn,pressroom={level},pressroom_client={level}")
}

/// Логи идут в stderr, чтобы не смешиваться с выводом команд.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives(level))
        .map_err(|e| anyhow!("invalid log level {level:?}: {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_scopes_to_own_crates() {
        assert_eq!(
            directives(" debug "),
            "warn,pressroom=debug,pressroom_client=debug"
        );
        assert_eq!(directives("info,reqwest=debug"), "info,reqwest=debug");
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(EnvFilter::try_new(directives("debug")).is_ok());
        assert!(EnvFilter::try_new(directives("loud")).is_err());
    }
}
