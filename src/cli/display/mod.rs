//! Terminal rendering of resource state and diagnostics

pub mod colors;
pub mod icons;
pub mod table;

pub use colors::ColorTheme;
pub use icons::StatusIcon;
pub use table::{format_age, TableRenderer};
