use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Read-only `.docx` template, opened fresh for every request.
    pub template_path: PathBuf,
    pub port: u16,
    /// Top-level heading style names/ids. Empty means the built-in set.
    pub heading_styles: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            template_path: std::env::var("TEMPLATE_PATH")
                .unwrap_or_else(|_| "template.docx".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            heading_styles: std::env::var("HEADING1_STYLES")
                .map(|raw| parse_style_list(&raw))
                .unwrap_or_default(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Splits a comma-separated style list, dropping blank entries.
fn parse_style_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_list() {
        assert_eq!(
            parse_style_list(" Heading 1, Título 1 ,,"),
            vec!["Heading 1".to_string(), "Título 1".to_string()]
        );
        assert!(parse_style_list("  ").is_empty());
    }
}
