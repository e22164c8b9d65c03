//! To maintain a theme of colors, colors live here as constants so
//! the output looks the same everywhere.
//!
//! - DICTLITE_TEAL: Main Color

use colored::Color;

pub(crate) const DICTLITE_TEAL: Color = Color::TrueColor {
    r: 64,
    g: 190,
    b: 176,
};
