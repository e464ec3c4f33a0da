use serde::Deserialize;

/// Tool settings from `tagflip.yaml`.
///
/// Only ambient concerns live here. The rule table is fixed at compile time
/// and is deliberately not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub log_prefix: String,

    /// Mirrors log output to the terminal. Off by default since the TUI
    /// owns the screen.
    #[serde(rename = "Console Logging", default)]
    pub console_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            console_logging: false,
        }
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "tagflip".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.debug_mode);
        assert!(!settings.console_logging);
        assert_eq!(settings.log_dir, "logs");
        assert_eq!(settings.log_prefix, "tagflip");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: Settings = serde_yaml_ng::from_str("Debug Mode: true\n").unwrap();
        assert!(settings.debug_mode);
        assert_eq!(settings.log_dir, "logs");
        assert_eq!(settings.log_prefix, "tagflip");
    }
}
