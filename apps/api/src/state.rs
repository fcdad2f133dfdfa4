use std::sync::Arc;

use crate::config::Config;
use crate::review::HeadingStyles;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: every request loads and owns its own document.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Styles that mark section boundaries in the template, fixed at startup.
    pub headings: Arc<HeadingStyles>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let headings = if config.heading_styles.is_empty() {
            HeadingStyles::default()
        } else {
            HeadingStyles::new(&config.heading_styles)
        };
        Self {
            config,
            headings: Arc::new(headings),
        }
    }
}
