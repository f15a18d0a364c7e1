//! Shared application state.

use std::sync::Arc;

use chrono_tz::Tz;
use url::Url;

use monthgrid_providers::{FeedProvider, WebcalProvider};

use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::html::PageStyle;

/// State shared by all request handlers.
pub struct AppState {
    /// The configured display timezone.
    pub tz: Tz,

    /// Feed providers in grid column order.
    pub providers: Vec<Arc<dyn FeedProvider>>,

    /// Presentation options for the HTML page.
    pub style: PageStyle,
}

/// The state as shared with axum handlers.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Creates state from already-built parts (used by tests and
    /// embedders).
    pub fn new(tz: Tz, providers: Vec<Arc<dyn FeedProvider>>, style: PageStyle) -> Self {
        Self {
            tz,
            providers,
            style,
        }
    }

    /// Builds the state from configuration, constructing one webcal
    /// provider per configured source.
    pub fn from_config(config: &AppConfig) -> ServerResult<Self> {
        let tz = config.timezone()?;
        let timeout = config.fetch_timeout();

        let mut providers: Vec<Arc<dyn FeedProvider>> = Vec::new();
        for source in &config.calendar.sources {
            let url: Url = source.url.parse().map_err(|e| {
                ServerError::config(format!("invalid URL for source '{}': {e}", source.name))
            })?;
            let provider = WebcalProvider::new(&source.name, url, timeout)
                .map_err(|e| ServerError::config(e.to_string()))?;
            providers.push(Arc::new(provider));
        }

        let style = PageStyle {
            colors: config
                .calendar
                .sources
                .iter()
                .filter_map(|s| s.color.clone().map(|color| (s.name.clone(), color)))
                .collect(),
            substitutions: config.calendar.substitutions.clone(),
        };

        Ok(Self::new(tz, providers, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarSettings, SourceSettings};

    fn config_with_sources(sources: Vec<SourceSettings>) -> AppConfig {
        AppConfig {
            calendar: CalendarSettings {
                sources,
                ..CalendarSettings::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn builds_providers_and_colors_from_config() {
        let config = config_with_sources(vec![
            SourceSettings {
                name: "Papi".to_string(),
                url: "https://calendar.example.com/papi.ics".to_string(),
                color: Some("#af7dff".to_string()),
            },
            SourceSettings {
                name: "Mami".to_string(),
                url: "webcal://calendar.example.com/mami.ics".to_string(),
                color: None,
            },
        ]);

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.tz, chrono_tz::Europe::Zurich);

        let names: Vec<&str> = state.providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Papi", "Mami"]);

        assert_eq!(state.style.colors.get("Papi").map(String::as_str), Some("#af7dff"));
        assert!(!state.style.colors.contains_key("Mami"));
    }

    #[test]
    fn invalid_source_url_is_a_config_error() {
        let config = config_with_sources(vec![SourceSettings {
            name: "Bad".to_string(),
            url: "not a url".to_string(),
            color: None,
        }]);

        assert!(matches!(
            AppState::from_config(&config),
            Err(ServerError::Config { .. })
        ));
    }
}
