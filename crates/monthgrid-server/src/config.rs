//! Server configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/monthgrid/config.toml` by default:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! fetch_timeout = 10
//!
//! [calendar]
//! timezone = "Europe/Zurich"
//!
//! [[calendar.sources]]
//! name = "Papi"
//! url = "https://calendar.example.com/papi/basic.ics"
//! color = "#af7dff"
//! ```
//!
//! Source order in the file is the column order of the grid.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Configuration for the monthgrid server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and runtime settings.
    pub server: ServerSettings,

    /// Calendar aggregation settings.
    pub calendar: CalendarSettings,
}

/// Listener and runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the HTTP listener binds to.
    pub bind: String,

    /// Per-source fetch timeout in seconds.
    pub fetch_timeout: u64,

    /// Debug mode (debug-level logging, compact output).
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            fetch_timeout: 10,
            debug: false,
        }
    }
}

/// Calendar aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// IANA timezone name all grid dates are expressed in.
    pub timezone: String,

    /// Text substitutions applied to cell labels at render time
    /// (e.g. `"Birthday" = "🎂"`).
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,

    /// The feed sources, in grid column order.
    #[serde(default)]
    pub sources: Vec<SourceSettings>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: "Europe/Zurich".to_string(),
            substitutions: BTreeMap::new(),
            sources: Vec::new(),
        }
    }
}

/// One calendar feed source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Display name, used as the grid column header.
    pub name: String,

    /// Feed URL (`https://` or `webcal://`).
    pub url: String,

    /// Background color for populated cells of this source.
    pub color: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the default path, falling back to
    /// defaults when no file exists.
    pub fn load() -> ServerResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ServerError::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("monthgrid")
            .join("config.toml")
    }

    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown IANA names.
    pub fn timezone(&self) -> ServerResult<Tz> {
        self.calendar
            .timezone
            .parse()
            .map_err(|_| ServerError::config(format!("unknown timezone '{}'", self.calendar.timezone)))
    }

    /// Returns the per-source fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.server.fetch_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Zurich);
        assert!(config.calendar.sources.is_empty());
    }

    #[test]
    fn load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
[server]
bind = "0.0.0.0:9000"
fetch_timeout = 5
debug = true

[calendar]
timezone = "America/New_York"

[calendar.substitutions]
"Birthday" = "🎂"

[[calendar.sources]]
name = "Papi"
url = "https://calendar.example.com/papi.ics"
color = "#af7dff"

[[calendar.sources]]
name = "Birthdays"
url = "webcal://calendar.example.com/bdays.ics"
"##
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(config.server.debug);
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::New_York);
        assert_eq!(config.calendar.substitutions["Birthday"], "🎂");

        let names: Vec<_> = config.calendar.sources.iter().map(|s| &s.name).collect();
        assert_eq!(names, ["Papi", "Birthdays"]);
        assert_eq!(config.calendar.sources[0].color.as_deref(), Some("#af7dff"));
        assert!(config.calendar.sources[1].color.is_none());
    }

    #[test]
    fn bad_timezone_is_a_config_error() {
        let config = AppConfig {
            calendar: CalendarSettings {
                timezone: "Mars/Olympus".to_string(),
                ..CalendarSettings::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.timezone(),
            Err(ServerError::Config { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
