//! Dioxus fullstack page components.
//!
//! These pages read shared state from the studio context and talk to the
//! catalog API through `app::api`.

mod bot_detail;
mod builder;
mod catalog;
mod settings;

pub use bot_detail::BotDetail;
pub use builder::Builder;
pub use catalog::Catalog;
pub use settings::Settings;
