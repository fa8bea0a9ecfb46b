//! Locating the line-item table span in page text.

use regex::Regex;

use super::patterns::BODY_SPAN;
use crate::error::ConfigError;
use crate::models::config::BodyConfig;

/// Finds the line-item table between a start and an end anchor.
#[derive(Debug, Clone)]
pub struct BodyLocator {
    pattern: Regex,
}

impl BodyLocator {
    /// Locator for the standard "Line" ... "License:" anchors.
    pub fn new() -> Self {
        Self {
            pattern: BODY_SPAN.clone(),
        }
    }

    /// Locator for custom anchors, matched literally.
    pub fn with_anchors(start: &str, end: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&format!(
            r"(?s)({}.*?){}",
            regex::escape(start),
            regex::escape(end)
        ))
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn from_config(config: &BodyConfig) -> Result<Self, ConfigError> {
        if *config == BodyConfig::default() {
            return Ok(Self::new());
        }
        Self::with_anchors(&config.start_anchor, &config.end_anchor)
    }

    /// First span, scanning pages in order, from the start anchor up to
    /// (excluding) the first end anchor after it. Spans never cross pages.
    pub fn locate<'a, S: AsRef<str>>(&self, pages: &'a [S]) -> Option<&'a str> {
        pages.iter().find_map(|page| {
            self.pattern
                .captures(page.as_ref())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
    }
}

impl Default for BodyLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the line-item table with the standard anchors.
pub fn locate_body<S: AsRef<str>>(pages: &[S]) -> Option<&str> {
    pages.iter().find_map(|page| {
        BODY_SPAN
            .captures(page.as_ref())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}
