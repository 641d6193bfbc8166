//! Live preview projection of the builder form.

use super::assemble::CatalogRecord;
use super::form::FormState;

pub const TITLE_PLACEHOLDER: &str = "Lorem Ipsum";

pub const DESCRIPTION_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute \
irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. \
Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim \
id est laborum.";

/// Title color when the form's color is empty
pub const DEFAULT_TITLE_COLOR: &str = "#000000";

/// Fill shown in place of a missing logo
pub const LOGO_PLACEHOLDER_FILL: &str = "#d9d9d9";

const FONT_STYLESHEET_BASE: &str = "https://fonts.googleapis.com/css2";

/// The two weights imported for every previewed family
const FONT_WEIGHTS: [u16; 2] = [400, 700];

/// Stylesheet reference that loads `font` at the preview's two weights.
///
/// Internal whitespace becomes `+`. Blank names yield `None`, meaning no
/// import is issued at all.
pub fn font_stylesheet_href(font: &str) -> Option<String> {
    let family = font
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    if family.is_empty() {
        return None;
    }

    let weights = FONT_WEIGHTS
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(";");

    Some(format!(
        "{}?family={}:wght@{}&display=swap",
        FONT_STYLESHEET_BASE, family, weights
    ))
}

/// What fills the logo area
#[derive(Debug, Clone, PartialEq)]
pub enum LogoArea {
    Image { src: String },
    Placeholder,
}

impl LogoArea {
    /// Inline CSS for the logo box
    pub fn style(&self) -> String {
        match self {
            LogoArea::Image { src } => format!(
                "background-image:url(\"{}\");background-size:contain;\
                 background-position:center;background-repeat:no-repeat;",
                src
            ),
            LogoArea::Placeholder => format!("background-color:{};", LOGO_PLACEHOLDER_FILL),
        }
    }
}

/// Everything the preview needs to draw, derived from a form snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewModel {
    pub logo: LogoArea,
    pub title: String,
    pub description: String,
    pub font_family: Option<String>,
    pub title_color: String,
    pub stylesheet: Option<String>,
}

impl PreviewModel {
    pub fn from_form(form: &FormState) -> Self {
        Self::build(
            &form.title,
            &form.description,
            form.logo.as_deref(),
            form.font.as_deref(),
            &form.color,
        )
    }

    /// Preview a stored record the same way the builder previewed it
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self::build(
            &record.title,
            &record.description,
            record.logo.as_deref(),
            record.font.as_deref(),
            &record.color,
        )
    }

    fn build(
        title: &str,
        description: &str,
        logo: Option<&str>,
        font: Option<&str>,
        color: &str,
    ) -> Self {
        let font_family = font
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Self {
            logo: match logo {
                Some(src) if !src.is_empty() => LogoArea::Image {
                    src: src.to_string(),
                },
                _ => LogoArea::Placeholder,
            },
            title: non_empty_or(title, TITLE_PLACEHOLDER),
            description: non_empty_or(description, DESCRIPTION_PLACEHOLDER),
            stylesheet: font_family.as_deref().and_then(font_stylesheet_href),
            font_family,
            title_color: non_empty_or(color, DEFAULT_TITLE_COLOR),
        }
    }

    /// `font-family` declaration, empty when inheriting
    fn font_css(&self) -> String {
        match &self.font_family {
            Some(family) => format!("font-family:'{}';", family),
            None => String::new(),
        }
    }

    pub fn title_style(&self) -> String {
        format!("{}color:{};", self.font_css(), self.title_color)
    }

    pub fn description_style(&self) -> String {
        self.font_css()
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
