use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// The playlist shipped with the application, used whenever config.ron does
/// not provide one.
pub const DEFAULT_PLAYLIST: [&str; 10] = [
    "wAaNxk8VMhE",
    "frwH3PzZDCI",
    "8gLBW3yZTKo",
    "bI_LcFslJS8",
    "qlEXIkySeY",
    "VIRKBxB1EL8",
    "lvPSfBTdqwI",
    "8_2JnDR2j1M",
    "Dm5BkD3vXDw",
    "oHy3Z8zL25o",
];

pub const DEFAULT_VIDEO: &str = "wAaNxk8VMhE";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Video ids offered for playback, in playlist order.
    #[serde(default = "default_playlist_ids")]
    pub playlist_ids: Vec<String>,
    /// Id selected when the application starts.
    #[serde(default = "default_video")]
    pub default_video: String,
    /// Whether playback advances to the next video automatically.
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    /// Where persisted state (comments) lives. Defaults to the OS config
    /// directory when unset.
    #[serde(default)]
    pub data_directory: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base tracing filter (e.g. "info" or "playdeck=debug"). RUST_LOG takes
    /// precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs go to a daily rotating file in this directory instead
    /// of stderr.
    #[serde(default)]
    pub log_directory: Option<String>,
}

fn default_playlist_ids() -> Vec<String> {
    DEFAULT_PLAYLIST.iter().map(|id| id.to_string()).collect()
}

fn default_video() -> String {
    DEFAULT_VIDEO.to_string()
}

fn default_autoplay() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playlist_ids: default_playlist_ids(),
            default_video: default_video(),
            autoplay: default_autoplay(),
            data_directory: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_directory: None,
        }
    }
}

impl AppConfig {
    /// Load config.ron from the current directory or next to the executable,
    /// falling back to defaults. Never fails: a broken config file is logged
    /// and ignored.
    pub fn load() -> Self {
        let mut candidates = Vec::new();

        // 1. Current working directory
        candidates.push(PathBuf::from("config.ron"));

        // 2. Next to executable
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.playlist_ids.len(), 10);
        assert_eq!(config.default_video, "wAaNxk8VMhE");
        assert!(config.autoplay);
        assert!(config.data_directory.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = ron::from_str(
            r#"(
                default_video: "frwH3PzZDCI",
                autoplay: false,
            )"#,
        )
        .unwrap();

        assert_eq!(config.default_video, "frwH3PzZDCI");
        assert!(!config.autoplay);
        // Untouched fields keep their defaults.
        assert_eq!(config.playlist_ids.len(), 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_custom_playlist_and_logging() {
        let config: AppConfig = ron::from_str(
            r#"(
                playlist_ids: ["one", "two"],
                logging: (
                    level: "playdeck=debug",
                    log_directory: Some("logs"),
                ),
            )"#,
        )
        .unwrap();

        assert_eq!(config.playlist_ids, vec!["one", "two"]);
        assert_eq!(config.logging.level, "playdeck=debug");
        assert_eq!(config.logging.log_directory.as_deref(), Some("logs"));
    }
}
