//! Style Resolver: theme name → concrete style table.
//!
//! - [`Theme`]: the closed, enumerated set of themes
//! - [`StyleTable`]: background, default foreground and per-[`TokenKind`] styles
//! - [`Rgb`] / [`Modifiers`]: the visual attributes a style is made of
//!
//! [`TokenKind`]: crate::token::TokenKind

mod color;
mod theme;

pub use color::{Modifiers, Rgb};
pub use theme::{StyleTable, Theme, TokenStyle};
