//! Console logging bootstrap.
//!
//! Routes the `log` facade to the browser console through `console_log` so
//! diagnostics land in the developer tools of whoever operates the page.
//! Initialization is idempotent: the first call installs the logger, later
//! calls only adjust the level.

use log::{Level, LevelFilter};

/// Installs the console logger and the panic hook, or adjusts the level
/// when already installed.
///
/// # Errors
/// Returns a readable message when `level` is not one of
/// `trace|debug|info|warn|error|off`; the current level is kept in that case.
pub fn init_logging(level: &str) -> Result<(), String> {
    let filter = normalize_level(level)?;

    // Later calls find the logger installed and only change the level.
    let first_install = console_log::init_with_level(Level::Trace).is_ok();
    log::set_max_level(filter);

    if first_install {
        console_error_panic_hook::set_once();
        log::info!(
            "event=app_start status=ok level={filter} version={}",
            env!("CARGO_PKG_VERSION")
        );
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_level;
    use log::LevelFilter;

    #[test]
    fn levels_are_case_and_whitespace_insensitive() {
        assert_eq!(normalize_level(" INFO "), Ok(LevelFilter::Info));
        assert_eq!(normalize_level("Warning"), Ok(LevelFilter::Warn));
        assert_eq!(normalize_level("trace"), Ok(LevelFilter::Trace));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let error = normalize_level("loud").unwrap_err();
        assert!(error.contains("`loud`"));
    }

    #[test]
    fn off_silences_every_level() {
        assert_eq!(normalize_level("off"), Ok(LevelFilter::Off));
        assert_eq!(normalize_level("OFF"), Ok(LevelFilter::Off));
    }

    #[test]
    fn release_and_debug_defaults_are_accepted() {
        assert!(normalize_level(crate::config::default_log_level()).is_ok());
    }
}
