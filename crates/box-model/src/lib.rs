//! Internal library for the `mathbox` crate.
//!
//! It contains the leaf components of the layout engine: the font metrics tables, the eight
//! TeX mathstyles, dimensions and glue, and the box model that a render pass produces.
//!
//! # Example
//!
//! ```rust
//! use box_model::boxes::{BoxType, MathBox};
//! use box_model::font_metrics::FontFamily;
//!
//! let x = MathBox::glyph("x", FontFamily::MathItalic, BoxType::Ord);
//! let plus = MathBox::glyph("+", FontFamily::MainRegular, BoxType::Bin);
//! let row = MathBox::row(vec![x, plus], BoxType::Ord);
//!
//! assert!((row.height - 0.58333).abs() < 1e-9);
//! assert!((row.depth - 0.08333).abs() < 1e-9);
//! ```
pub mod boxes;
pub mod dimension;
mod fmt;
pub mod font_metrics;
pub mod mathstyle;
pub mod vlist;
