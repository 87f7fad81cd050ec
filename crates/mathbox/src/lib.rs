//! Lay out math expression trees as TeX-style boxes.
//!
//! An expression is a list of [`Atom`]s, either built directly, read from markup with
//! [`Renderer::parse`] or restored from a JSON snapshot with [`from_json_str`]. Rendering turns
//! the list into a tree of [`MathBox`]es with TeX's sizes, shifts and spacing, in em.
//!
//! # Usage
//!
//! ```rust
//! use mathbox::{MathDisplay, MathboxConfig, Renderer, SerializeOptions, serialize_list};
//!
//! let renderer = Renderer::new(MathboxConfig::default()).unwrap();
//! let atoms = renderer.parse(r"x^2+\frac{1}{2}").unwrap();
//! let b = renderer.render_atoms(&atoms, MathDisplay::Block).unwrap();
//! println!("{}", b.dump());
//! assert_eq!(serialize_list(&atoms, SerializeOptions::default()), r"x^2+\frac{1}{2}");
//! ```
//!
//! # Features
//!
//! - `serde`: With this feature, `MathboxConfig` implements serde's `Deserialize` and
//!   `MathBox` implements `Serialize`.
//! - `ariadne`: Adds `MarkupError::to_report` for pretty error messages.
//!
pub mod atom;
mod commands;
pub mod context;
mod error;
mod lexer;
mod parser;
pub mod registers;
mod serialize;
mod snapshot;
mod token;

use std::fmt;

use rustc_hash::FxHashSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use box_model::boxes::{BoxClasses, BoxContent, BoxType, MathBox};
pub use box_model::mathstyle::{Mathstyle, MathstyleName};

pub use self::atom::{Atom, AtomKind, AtomType, render_list};
pub use self::context::{AtomIdSettings, Context, GlobalContext, IdSeed, LetterShapeStyle};
pub use self::error::MarkupError;
pub use self::serialize::{SerializeOptions, join_latex, serialize_list};
pub use self::snapshot::{AtomJson, SnapshotError, from_json_str, to_json_string};
use self::{parser::Parser, registers::Registers};

/// Display mode for the math expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    /// For inline expressions; the root is in text style.
    Inline,
    /// For block expressions; the root is in display style.
    Block,
}

/// How rendered boxes are bound to the atoms they come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AtomIdMode {
    /// Boxes carry no atom ids.
    #[default]
    Off,
    /// Ids are base-36 numbers counted from zero in every render call.
    Counter,
    /// Ids are derived from the time and a random component.
    Random,
}

/// Configuration object for rendering.
///
/// # Example usage
///
/// ```rust
/// use mathbox::{LetterShapeStyle, MathboxConfig};
///
/// // Default values
/// let config = MathboxConfig::default();
///
/// // Larger type, upright letters and a wider thin space
/// let config = MathboxConfig {
///     font_size: 7,
///     letter_shape_style: LetterShapeStyle::Upright,
///     registers: vec![("thinmuskip".to_string(), "4mu".to_string())],
///     ..Default::default()
/// };
/// ```
///
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct MathboxConfig {
    /// The font size of the root scope, from 1 (`\tiny`) to 10 (`\Huge`).
    pub font_size: u8,
    pub letter_shape_style: LetterShapeStyle,
    /// Register overrides; each tuple contains (register_name, value), e.g.
    /// `("jot", "4pt")`.
    #[cfg_attr(feature = "serde", serde(with = "tuple_vec_map"))]
    pub registers: Vec<(String, String)>,
    pub atom_ids: AtomIdMode,
    /// Commands of extensible symbols that stay small in display style.
    pub small_operators: Vec<String>,
}

impl Default for MathboxConfig {
    fn default() -> Self {
        MathboxConfig {
            font_size: 5,
            letter_shape_style: LetterShapeStyle::Tex,
            registers: Vec::new(),
            atom_ids: AtomIdMode::Off,
            small_operators: vec![r"\smallint".to_string()],
        }
    }
}

/// A problem with a [`MathboxConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    FontSizeOutOfRange(u8),
    /// The register at the given index has a name that is not a TeX control word.
    InvalidRegisterName(usize, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FontSizeOutOfRange(size) => {
                write!(f, "Font size {size} is not between 1 and 10.")
            }
            ConfigError::InvalidRegisterName(idx, name) => {
                write!(f, "Register {idx} has an invalid name: \"{name}\".")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn is_valid_register_name(name: &str) -> bool {
    let name = name.strip_prefix('\\').unwrap_or(name);
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'@')
}

/// Turns markup and atom lists into box trees.
#[derive(Debug)]
pub struct Renderer {
    font_size: u8,
    letter_shape_style: LetterShapeStyle,
    registers: Registers,
    atom_ids: AtomIdMode,
    small_operators: FxHashSet<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        let config = MathboxConfig::default();
        Renderer {
            font_size: config.font_size,
            letter_shape_style: config.letter_shape_style,
            registers: registers::default_registers(),
            atom_ids: config.atom_ids,
            small_operators: config.small_operators.into_iter().collect(),
        }
    }
}

impl Renderer {
    /// Create a new `Renderer` with the given configuration.
    ///
    /// Register overrides replace the default registers of the same name.
    pub fn new(config: MathboxConfig) -> Result<Self, ConfigError> {
        if !(1..=10).contains(&config.font_size) {
            return Err(ConfigError::FontSizeOutOfRange(config.font_size));
        }
        if let Some((idx, (name, _))) = config
            .registers
            .iter()
            .enumerate()
            .find(|(_, (name, _))| !is_valid_register_name(name))
        {
            return Err(ConfigError::InvalidRegisterName(idx, name.clone()));
        }
        let mut registers = registers::default_registers();
        registers.extend(registers::parse_registers(
            config
                .registers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        ));
        Ok(Renderer {
            font_size: config.font_size,
            letter_shape_style: config.letter_shape_style,
            registers,
            atom_ids: config.atom_ids,
            small_operators: config.small_operators.into_iter().collect(),
        })
    }

    /// Parse markup into a list of atoms.
    ///
    /// ```rust
    /// use mathbox::{AtomType, Renderer};
    ///
    /// let atoms = Renderer::default().parse(r"\sin x").unwrap();
    /// assert_eq!(atoms[0].atom_type, AtomType::Mop);
    /// assert!(Renderer::default().parse(r"\sin{x").is_err());
    /// ```
    pub fn parse(&self, markup: &str) -> Result<Vec<Atom>, Box<MarkupError>> {
        Parser::new(markup)?.parse()
    }

    fn global_context(&self) -> GlobalContext {
        let atom_ids = match self.atom_ids {
            AtomIdMode::Off => None,
            AtomIdMode::Counter => Some(AtomIdSettings::counter(0)),
            AtomIdMode::Random => Some(AtomIdSettings {
                override_id: None,
                seed: IdSeed::Random,
            }),
        };
        GlobalContext {
            atom_ids,
            small_operators: self.small_operators.clone(),
        }
    }

    /// Render a list of atoms. Returns `None` if the list renders to nothing.
    pub fn render_atoms(&self, atoms: &[Atom], display: MathDisplay) -> Option<MathBox> {
        let mathstyle = match display {
            MathDisplay::Inline => Mathstyle::Text,
            MathDisplay::Block => Mathstyle::Display,
        };
        log::debug!(
            "rendering {} atoms at size {} in {:?}",
            atoms.len(),
            self.font_size,
            mathstyle
        );
        let global = self.global_context();
        let root = Context::root(
            &global,
            mathstyle,
            self.font_size,
            self.letter_shape_style,
            self.registers.clone(),
        );
        render_list(&root, atoms)
    }

    /// Parse and render markup.
    #[inline]
    pub fn render(
        &self,
        markup: &str,
        display: MathDisplay,
    ) -> Result<Option<MathBox>, Box<MarkupError>> {
        let atoms = self.parse(markup)?;
        Ok(self.render_atoms(&atoms, display))
    }
}
