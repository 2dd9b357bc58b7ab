//! Visual style of a drawn route

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Stroke style used when a route path is drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    /// Stroke color as `#rrggbb`
    pub color: String,
    /// Stroke weight in pixels
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

const fn default_weight() -> f32 {
    5.0
}

const fn default_opacity() -> f32 {
    0.8
}

impl RouteStyle {
    /// Create a style with the default weight and opacity
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            weight: default_weight(),
            opacity: default_opacity(),
        }
    }

    /// Set the stroke weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the stroke opacity
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Default style for walking routes
    #[must_use]
    pub fn walking() -> Self {
        Self::new("#3388ff")
    }

    /// Default style for cycling routes
    #[must_use]
    pub fn cycling() -> Self {
        Self::new("#ff7800")
    }

    /// Check color format and numeric ranges
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` describing the first problem found
    pub fn validate(&self) -> Result<(), DomainError> {
        let hex = self.color.strip_prefix('#').unwrap_or_default();
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::ValidationError(format!(
                "Route color must be #rrggbb, got '{}'",
                self.color
            )));
        }
        if !(self.weight > 0.0 && self.weight.is_finite()) {
            return Err(DomainError::ValidationError(
                "Route weight must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(DomainError::ValidationError(
                "Route opacity must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self::walking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_are_valid() {
        assert!(RouteStyle::walking().validate().is_ok());
        assert!(RouteStyle::cycling().validate().is_ok());
        assert_ne!(RouteStyle::walking().color, RouteStyle::cycling().color);
    }

    #[test]
    fn bad_color_rejected() {
        assert!(RouteStyle::new("red").validate().is_err());
        assert!(RouteStyle::new("#12345").validate().is_err());
        assert!(RouteStyle::new("#gggggg").validate().is_err());
    }

    #[test]
    fn bad_numbers_rejected() {
        assert!(RouteStyle::walking().with_weight(0.0).validate().is_err());
        assert!(RouteStyle::walking().with_opacity(1.5).validate().is_err());
    }

    #[test]
    fn deserialize_with_defaults() {
        let style: RouteStyle = serde_json::from_str(r##"{"color": "#00ff00"}"##).unwrap();
        assert!((style.weight - 5.0).abs() < f32::EPSILON);
        assert!((style.opacity - 0.8).abs() < f32::EPSILON);
    }
}
