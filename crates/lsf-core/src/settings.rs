use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::numeric::NumericPolicy;

/// Portal the login form is served from.
pub const DEFAULT_LOGIN_URL: &str = "https://lsf.uni-hildesheim.de/";

// ── Settings (CLI + environment) ──────────────────────────────────────────────

/// Log into LSF and summarise the grade overview
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lsf-automation",
    about = "Log into LSF and summarise the grade overview",
    version
)]
pub struct Settings {
    /// Logging level
    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "INFO",
        ignore_case = true,
        value_parser = [
            "DEBUG", "INFO", "WARNING", "WARN", "ERROR", "CRITICAL", "FATAL", "NOTSET"
        ]
    )]
    pub log_level: String,

    /// Directory for log files (created if absent)
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Login page URL
    #[arg(long, env = "LSF_LOGIN_URL", default_value = DEFAULT_LOGIN_URL)]
    pub login_url: String,

    /// WebDriver endpoint (chromedriver, geckodriver, Selenium)
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// Visible text of the link leading to the grade table
    #[arg(long, default_value = "Notenspiegel")]
    pub link_pattern: String,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Pause after login before scraping, in milliseconds
    #[arg(long, default_value = "1500")]
    pub settle_ms: u64,

    /// Seconds to wait for each login form element to become visible (1-120)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=120))]
    pub wait_timeout_secs: u64,

    /// JSON file overriding the grade table column mapping
    #[arg(long)]
    pub column_map: Option<PathBuf>,

    /// Only accept well-formed decimals (rejects "23." and ".23")
    #[arg(long)]
    pub strict_numbers: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse process arguments and environment, then apply `--debug`.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Self::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        settings.log_level = settings.log_level.to_uppercase();
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn numeric_policy(&self) -> NumericPolicy {
        NumericPolicy::from_strict_flag(self.strict_numbers)
    }

    pub fn headless(&self) -> bool {
        !self.headed
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        // Environment variables could leak into defaults; use explicit names.
        let settings = Settings::parse_from([
            "lsf-automation",
            "--log-level",
            "INFO",
            "--log-dir",
            "logs",
            "--login-url",
            DEFAULT_LOGIN_URL,
            "--webdriver-url",
            "http://localhost:4444",
        ]);

        assert_eq!(settings.log_level, "INFO");
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
        assert_eq!(settings.login_url, DEFAULT_LOGIN_URL);
        assert_eq!(settings.link_pattern, "Notenspiegel");
        assert!(!settings.headed);
        assert!(settings.headless());
        assert_eq!(settings.settle_delay(), Duration::from_millis(1500));
        assert_eq!(settings.wait_timeout(), Duration::from_secs(10));
        assert!(settings.column_map.is_none());
        assert_eq!(settings.numeric_policy(), NumericPolicy::Legacy);
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings =
            Settings::load_from_args(["lsf-automation", "--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_log_level_case_insensitive() {
        let settings = Settings::load_from_args(["lsf-automation", "--log-level", "warning"]);
        assert_eq!(settings.log_level, "WARNING");
    }

    #[test]
    fn test_settings_accepts_level_aliases() {
        for (given, expected) in [("warn", "WARN"), ("Fatal", "FATAL"), ("NOTSET", "NOTSET")] {
            let settings = Settings::load_from_args(["lsf-automation", "--log-level", given]);
            assert_eq!(settings.log_level, expected);
        }
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        let result = Settings::try_parse_from(["lsf-automation", "--log-level", "TRACE"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_wait_timeout_range() {
        assert!(Settings::try_parse_from(["lsf-automation", "--wait-timeout-secs", "0"]).is_err());
        let ok = Settings::parse_from(["lsf-automation", "--wait-timeout-secs", "30"]);
        assert_eq!(ok.wait_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_settings_strict_numbers_and_column_map() {
        let settings = Settings::parse_from([
            "lsf-automation",
            "--strict-numbers",
            "--column-map",
            "/tmp/columns.json",
            "--headed",
        ]);
        assert_eq!(settings.numeric_policy(), NumericPolicy::Strict);
        assert_eq!(settings.column_map, Some(PathBuf::from("/tmp/columns.json")));
        assert!(!settings.headless());
    }
}
