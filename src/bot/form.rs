//! Editable presentation fields for the bot being built.
//!
//! A `FormState` lives for exactly one visit to the builder page. It is
//! mutated by input events and read once at submit time.

use serde::{Deserialize, Serialize};

/// Accent color used until the operator picks one
pub const DEFAULT_COLOR: &str = "#00aae6";

/// Font families offered by the builder's font picker.
///
/// The picker is a closed selection; free-text family names are not accepted.
pub const FONT_CHOICES: &[&str] = &[
    "Inter",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Merriweather",
    "Playfair Display",
    "Source Code Pro",
    "PT Sans",
    "Nunito",
];

/// Session-scoped edit state of the builder page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub title: String,
    pub description: String,
    /// Inline image reference (base64 data URI)
    pub logo: Option<String>,
    /// Font family name; `None` inherits the page font
    pub font: Option<String>,
    pub color: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            logo: None,
            font: None,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl FormState {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set the font family from the picker. The "inherit" entry arrives as an
    /// empty value and clears the field rather than storing `""`.
    pub fn set_font(&mut self, font: &str) {
        let font = font.trim();
        self.font = if font.is_empty() {
            None
        } else {
            Some(font.to_string())
        };
    }

    /// Set the accent color as delivered by the picker or the text field.
    /// No format validation happens here.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_logo(&mut self, data_uri: String) {
        self.logo = Some(data_uri);
    }

    pub fn clear_logo(&mut self) {
        self.logo = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_is_empty_with_default_color() {
        let form = FormState::default();
        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert_eq!(form.logo, None);
        assert_eq!(form.font, None);
        assert_eq!(form.color, "#00aae6");
    }

    #[test]
    fn inherit_font_selection_clears_font() {
        let mut form = FormState::default();
        form.set_font("Open Sans");
        assert_eq!(form.font.as_deref(), Some("Open Sans"));

        form.set_font("");
        assert_eq!(form.font, None, "empty selection must not be stored as \"\"");
    }

    #[test]
    fn color_is_stored_verbatim() {
        let mut form = FormState::default();
        form.set_color("rebeccapurple");
        assert_eq!(form.color, "rebeccapurple");
    }
}
