//! Environment configuration for the host binary

use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".tasklist-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory of the file-backed key-value store
    pub data_dir: PathBuf,
    /// Use the timer scheduler; otherwise reminders are reported unsupported
    pub reminders_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("TASKLIST_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let reminders_enabled = parse_flag(lookup("TASKLIST_REMINDERS").as_deref(), true);

        Self {
            data_dir,
            reminders_enabled,
        }
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from(".tasklist-data"));
        assert!(config.reminders_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TASKLIST_DATA_DIR", "/tmp/tasks"),
            ("TASKLIST_REMINDERS", "off"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tasks"));
        assert!(!config.reminders_enabled);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("YES"), false));
        assert!(!parse_flag(Some(" 0 "), true));
        assert!(parse_flag(Some("maybe"), true));
        assert!(!parse_flag(None, false));
    }
}
