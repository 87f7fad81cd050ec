//! TeX dimensions, glue and register values.
//!
//! Dimensions are parsed from strings like `3pt`, `-1.5em` or `4mu`. Glue additionally has
//! optional stretch and shrink components: `4mu plus 2mu minus 4mu`.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use strum_macros::{EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Points per em at the normal font size.
pub const PT_PER_EM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DimensionUnit {
    Pt,
    Mm,
    Cm,
    Ex,
    Px,
    Em,
    Bp,
    Dd,
    Pc,
    In,
    Mu,
}

impl DimensionUnit {
    /// How many points one unit is.
    pub fn in_pt(self) -> f64 {
        match self {
            DimensionUnit::Pt => 1.0,
            DimensionUnit::Mm => 7227.0 / 2540.0,
            DimensionUnit::Cm => 7227.0 / 254.0,
            DimensionUnit::Ex => 35271.0 / 8192.0,
            DimensionUnit::Px => 3.0 / 4.0,
            DimensionUnit::Em => PT_PER_EM,
            DimensionUnit::Bp => 803.0 / 800.0,
            DimensionUnit::Dd => 1238.0 / 1157.0,
            DimensionUnit::Pc => 12.0,
            DimensionUnit::In => 72.27,
            DimensionUnit::Mu => 10.0 / 18.0,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A length with an optional unit. A missing unit means points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Dimension {
    pub dimension: f64,
    pub unit: Option<DimensionUnit>,
}

impl Dimension {
    pub const ZERO: Dimension = Dimension {
        dimension: 0.0,
        unit: None,
    };

    #[inline]
    pub const fn new(dimension: f64, unit: DimensionUnit) -> Self {
        Dimension {
            dimension,
            unit: Some(unit),
        }
    }

    #[inline]
    pub const fn pt(dimension: f64) -> Self {
        Dimension {
            dimension,
            unit: None,
        }
    }

    pub fn to_pt(self) -> f64 {
        self.dimension * self.unit.map_or(1.0, DimensionUnit::in_pt)
    }

    pub fn to_em(self) -> f64 {
        match self.unit {
            Some(DimensionUnit::Em) => self.dimension,
            _ => self.to_pt() / PT_PER_EM,
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dimension)?;
        f.write_str(self.unit.map_or("pt", DimensionUnit::as_str))
    }
}

/// Stretchable space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Glue {
    pub glue: Dimension,
    pub grow: Option<Dimension>,
    pub shrink: Option<Dimension>,
}

impl Glue {
    #[inline]
    pub const fn fixed(glue: Dimension) -> Self {
        Glue {
            glue,
            grow: None,
            shrink: None,
        }
    }
}

impl Display for Glue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glue)?;
        if let Some(grow) = self.grow {
            write!(f, " plus {grow}")?;
        }
        if let Some(shrink) = self.shrink {
            write!(f, " minus {shrink}")?;
        }
        Ok(())
    }
}

/// The value stored in a register.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RegisterValue {
    Number(f64),
    Dimension(Dimension),
    Glue(Glue),
    /// Anything that does not parse as one of the above.
    Literal(String),
}

impl RegisterValue {
    /// Parse a register value from its textual form. Never fails: unparsable text is kept as a
    /// literal.
    pub fn parse(s: &str) -> RegisterValue {
        let s = s.trim();
        if let Ok(number) = s.parse::<f64>() {
            return RegisterValue::Number(number);
        }
        match s.parse::<Glue>() {
            Ok(glue) if glue.grow.is_none() && glue.shrink.is_none() => {
                RegisterValue::Dimension(glue.glue)
            }
            Ok(glue) => RegisterValue::Glue(glue),
            Err(_) => RegisterValue::Literal(s.to_string()),
        }
    }

    /// Interpret the value as glue. Bare numbers are points.
    pub fn as_glue(&self) -> Option<Glue> {
        match self {
            RegisterValue::Number(n) => Some(Glue::fixed(Dimension::pt(*n))),
            RegisterValue::Dimension(d) => Some(Glue::fixed(*d)),
            RegisterValue::Glue(g) => Some(*g),
            RegisterValue::Literal(s) => s.parse().ok(),
        }
    }

    /// Interpret the value as a dimension. For glue, the natural size is used.
    pub fn as_dimension(&self) -> Option<Dimension> {
        match self {
            RegisterValue::Number(n) => Some(Dimension::pt(*n)),
            RegisterValue::Dimension(d) => Some(*d),
            RegisterValue::Glue(g) => Some(g.glue),
            RegisterValue::Literal(s) => s.parse().ok(),
        }
    }
}

impl From<Dimension> for RegisterValue {
    fn from(d: Dimension) -> Self {
        RegisterValue::Dimension(d)
    }
}

impl From<Glue> for RegisterValue {
    fn from(g: Glue) -> Self {
        RegisterValue::Glue(g)
    }
}

impl Display for RegisterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RegisterValue::Number(n) => write!(f, "{n}"),
            RegisterValue::Dimension(d) => write!(f, "{d}"),
            RegisterValue::Glue(g) => write!(f, "{g}"),
            RegisterValue::Literal(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionParseError {
    Empty,
    InvalidNumber,
    UnknownUnit,
    TrailingInput,
}

impl Display for DimensionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DimensionParseError::Empty => "empty dimension",
            DimensionParseError::InvalidNumber => "invalid number in dimension",
            DimensionParseError::UnknownUnit => "unknown unit in dimension",
            DimensionParseError::TrailingInput => "unexpected input after dimension",
        })
    }
}

impl Error for DimensionParseError {}

/// Split `s` into a leading decimal number and the rest.
fn split_number(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(idx, ch)| {
            !(ch.is_ascii_digit() || ch == '.' || (idx == 0 && matches!(ch, '-' | '+')))
        })
        .map_or(s.len(), |(idx, _)| idx);
    s.split_at(end)
}

fn parse_dimension_prefix(s: &str) -> Result<(Dimension, &str), DimensionParseError> {
    let s = s.trim_start();
    if s.is_empty() {
        return Err(DimensionParseError::Empty);
    }
    let (number, rest) = split_number(s);
    let dimension = number
        .parse::<f64>()
        .map_err(|_| DimensionParseError::InvalidNumber)?;
    let rest = rest.trim_start();
    let unit_len = rest
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(rest.len())
        .min(2);
    if unit_len < 2 {
        return Err(DimensionParseError::UnknownUnit);
    }
    let (unit, rest) = rest.split_at(unit_len);
    let unit = unit
        .parse::<DimensionUnit>()
        .map_err(|_| DimensionParseError::UnknownUnit)?;
    Ok((Dimension::new(dimension, unit), rest))
}

impl FromStr for Dimension {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dimension, rest) = parse_dimension_prefix(s)?;
        if rest.trim().is_empty() {
            Ok(dimension)
        } else {
            Err(DimensionParseError::TrailingInput)
        }
    }
}

impl FromStr for Glue {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (glue, mut rest) = parse_dimension_prefix(s)?;
        let mut result = Glue::fixed(glue);
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("plus") {
            let (grow, after) = parse_dimension_prefix(after)?;
            result.grow = Some(grow);
            rest = after.trim_start();
        }
        if let Some(after) = rest.strip_prefix("minus") {
            let (shrink, after) = parse_dimension_prefix(after)?;
            result.shrink = Some(shrink);
            rest = after.trim_start();
        }
        if rest.is_empty() {
            Ok(result)
        } else {
            Err(DimensionParseError::TrailingInput)
        }
    }
}
