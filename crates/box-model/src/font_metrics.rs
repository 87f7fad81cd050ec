//! Glyph measurements and TeX font parameters.
//!
//! All values are in em of the font they belong to.

use static_assertions::const_assert_eq;
use strum_macros::{EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::Serialize;

/// The font families known to the metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FontFamily {
    #[strum(serialize = "Main-Regular")]
    #[cfg_attr(feature = "serde", serde(rename = "Main-Regular"))]
    MainRegular,
    #[strum(serialize = "Math-Italic")]
    #[cfg_attr(feature = "serde", serde(rename = "Math-Italic"))]
    MathItalic,
    #[strum(serialize = "Size1-Regular")]
    #[cfg_attr(feature = "serde", serde(rename = "Size1-Regular"))]
    Size1Regular,
    #[strum(serialize = "Size2-Regular")]
    #[cfg_attr(feature = "serde", serde(rename = "Size2-Regular"))]
    Size2Regular,
}

impl FontFamily {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    fn table(self) -> &'static phf::Map<char, CharacterMetrics> {
        match self {
            FontFamily::MainRegular => &MAIN_REGULAR,
            FontFamily::MathItalic => &MATH_ITALIC,
            FontFamily::Size1Regular => &SIZE1_REGULAR,
            FontFamily::Size2Regular => &SIZE2_REGULAR,
        }
    }
}

/// Measurements of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMetrics {
    pub depth: f64,
    pub height: f64,
    pub italic: f64,
    pub skew: f64,
    pub width: f64,
}

const fn m(depth: f64, height: f64, italic: f64, skew: f64, width: f64) -> CharacterMetrics {
    CharacterMetrics {
        depth,
        height,
        italic,
        skew,
        width,
    }
}

/// Used for glyphs that are missing from the tables, so that layout can proceed.
pub const DEFAULT_CHARACTER_METRICS: CharacterMetrics = m(0.2, 0.7, 0.0, 0.0, 0.8);

const ZERO_WIDTH: CharacterMetrics = m(0.0, 0.0, 0.0, 0.0, 0.0);

/// Look up the metrics of `ch` in `family`.
///
/// Zero-width characters have zero metrics in every family. Glyphs missing from `family` fall
/// back to [`DEFAULT_CHARACTER_METRICS`].
pub fn get_character_metrics(ch: char, family: FontFamily) -> CharacterMetrics {
    if matches!(ch, '\u{200B}' | '\u{2061}' | '\u{2062}') {
        return ZERO_WIDTH;
    }
    match family.table().get(&ch) {
        Some(metrics) => *metrics,
        None => DEFAULT_CHARACTER_METRICS,
    }
}

/// Whether `family` has an entry for `ch`.
pub fn has_glyph(ch: char, family: FontFamily) -> bool {
    family.table().contains_key(&ch)
}

/// Font scaling factors, indexed by size (1 to 10). Size 5 is the normal size.
pub const FONT_SCALE: [f64; 11] = [
    0.0, 0.5, 0.7, 0.8, 0.9, 1.0, 1.2, 1.44, 1.728, 2.074, 2.488,
];

/// The size used when nothing else is specified.
pub const DEFAULT_FONT_SIZE: u8 = 5;

const_assert_eq!(FONT_SCALE.len(), 11);

/// Distance from the baseline to the math axis, in em.
pub const AXIS_HEIGHT: f64 = 0.25;

/// The TeX font parameters (the "sigmas" and "xis") for one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub x_height: f64,
    pub quad: f64,
    pub num1: f64,
    pub num2: f64,
    pub num3: f64,
    pub denom1: f64,
    pub denom2: f64,
    pub sup1: f64,
    pub sup2: f64,
    pub sup3: f64,
    pub sub1: f64,
    pub sub2: f64,
    pub sup_drop: f64,
    pub sub_drop: f64,
    pub axis_height: f64,
    pub default_rule_thickness: f64,
    pub big_op_spacing1: f64,
    pub big_op_spacing2: f64,
    pub big_op_spacing3: f64,
    pub big_op_spacing4: f64,
    pub big_op_spacing5: f64,
}

/// Font parameters for text, script and scriptscript sizes.
pub static FONT_METRICS: [FontMetrics; 3] = [
    FontMetrics {
        x_height: 0.431,
        quad: 1.0,
        num1: 0.677,
        num2: 0.394,
        num3: 0.444,
        denom1: 0.686,
        denom2: 0.345,
        sup1: 0.413,
        sup2: 0.363,
        sup3: 0.289,
        sub1: 0.15,
        sub2: 0.247,
        sup_drop: 0.386,
        sub_drop: 0.05,
        axis_height: AXIS_HEIGHT,
        default_rule_thickness: 0.04,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.6,
        big_op_spacing5: 0.1,
    },
    FontMetrics {
        x_height: 0.431,
        quad: 1.171,
        num1: 0.732,
        num2: 0.384,
        num3: 0.471,
        denom1: 0.752,
        denom2: 0.344,
        sup1: 0.503,
        sup2: 0.431,
        sup3: 0.286,
        sub1: 0.143,
        sub2: 0.286,
        sup_drop: 0.353,
        sub_drop: 0.071,
        axis_height: AXIS_HEIGHT,
        default_rule_thickness: 0.049,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.611,
        big_op_spacing5: 0.143,
    },
    FontMetrics {
        x_height: 0.431,
        quad: 1.472,
        num1: 0.925,
        num2: 0.387,
        num3: 0.504,
        denom1: 1.025,
        denom2: 0.532,
        sup1: 0.504,
        sup2: 0.404,
        sup3: 0.294,
        sub1: 0.2,
        sub2: 0.4,
        sup_drop: 0.494,
        sub_drop: 0.1,
        axis_height: AXIS_HEIGHT,
        default_rule_thickness: 0.049,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4: 0.611,
        big_op_spacing5: 0.143,
    },
];

static MAIN_REGULAR: phf::Map<char, CharacterMetrics> = phf::phf_map! {
    '0' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '1' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '2' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '3' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '4' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '5' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '6' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '7' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '8' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '9' => m(0.0, 0.64444, 0.0, 0.0, 0.5),
    '!' => m(0.0, 0.69444, 0.0, 0.0, 0.27778),
    '(' => m(0.25, 0.75, 0.0, 0.0, 0.38889),
    ')' => m(0.25, 0.75, 0.0, 0.0, 0.38889),
    '+' => m(0.08333, 0.58333, 0.0, 0.0, 0.77778),
    ',' => m(0.19444, 0.10556, 0.0, 0.0, 0.27778),
    '.' => m(0.0, 0.10556, 0.0, 0.0, 0.27778),
    '/' => m(0.25, 0.75, 0.0, 0.0, 0.5),
    ':' => m(0.0, 0.43056, 0.0, 0.0, 0.27778),
    ';' => m(0.19444, 0.43056, 0.0, 0.0, 0.27778),
    '<' => m(0.0391, 0.5391, 0.0, 0.0, 0.77778),
    '=' => m(-0.13313, 0.36687, 0.0, 0.0, 0.77778),
    '>' => m(0.0391, 0.5391, 0.0, 0.0, 0.77778),
    '[' => m(0.25, 0.75, 0.0, 0.0, 0.27778),
    ']' => m(0.25, 0.75, 0.0, 0.0, 0.27778),
    '|' => m(0.25, 0.75, 0.0, 0.0, 0.27778),
    'A' => m(0.0, 0.68333, 0.0, 0.0, 0.75),
    'B' => m(0.0, 0.68333, 0.0, 0.0, 0.70834),
    'C' => m(0.0, 0.68333, 0.0, 0.0, 0.72222),
    'D' => m(0.0, 0.68333, 0.0, 0.0, 0.76389),
    'E' => m(0.0, 0.68333, 0.0, 0.0, 0.68056),
    'F' => m(0.0, 0.68333, 0.0, 0.0, 0.65278),
    'G' => m(0.0, 0.68333, 0.0, 0.0, 0.78472),
    'H' => m(0.0, 0.68333, 0.0, 0.0, 0.75),
    'I' => m(0.0, 0.68333, 0.0, 0.0, 0.36111),
    'J' => m(0.0, 0.68333, 0.0, 0.0, 0.51389),
    'K' => m(0.0, 0.68333, 0.0, 0.0, 0.77778),
    'L' => m(0.0, 0.68333, 0.0, 0.0, 0.625),
    'M' => m(0.0, 0.68333, 0.0, 0.0, 0.91667),
    'N' => m(0.0, 0.68333, 0.0, 0.0, 0.75),
    'O' => m(0.0, 0.68333, 0.0, 0.0, 0.77778),
    'P' => m(0.0, 0.68333, 0.0, 0.0, 0.68056),
    'Q' => m(0.19444, 0.68333, 0.0, 0.0, 0.77778),
    'R' => m(0.0, 0.68333, 0.0, 0.0, 0.73611),
    'S' => m(0.0, 0.68333, 0.0, 0.0, 0.55556),
    'T' => m(0.0, 0.68333, 0.0, 0.0, 0.72222),
    'U' => m(0.0, 0.68333, 0.0, 0.0, 0.75),
    'V' => m(0.0, 0.68333, 0.01389, 0.0, 0.75),
    'W' => m(0.0, 0.68333, 0.01389, 0.0, 1.02778),
    'X' => m(0.0, 0.68333, 0.0, 0.0, 0.75),
    'Y' => m(0.0, 0.68333, 0.025, 0.0, 0.75),
    'Z' => m(0.0, 0.68333, 0.0, 0.0, 0.61111),
    'a' => m(0.0, 0.43056, 0.0, 0.0, 0.5),
    'b' => m(0.0, 0.69444, 0.0, 0.0, 0.55556),
    'c' => m(0.0, 0.43056, 0.0, 0.0, 0.44445),
    'd' => m(0.0, 0.69444, 0.0, 0.0, 0.55556),
    'e' => m(0.0, 0.43056, 0.0, 0.0, 0.44445),
    'f' => m(0.0, 0.69444, 0.07778, 0.0, 0.30556),
    'g' => m(0.19444, 0.43056, 0.01389, 0.0, 0.5),
    'h' => m(0.0, 0.69444, 0.0, 0.0, 0.55556),
    'i' => m(0.0, 0.66786, 0.0, 0.0, 0.27778),
    'j' => m(0.19444, 0.66786, 0.0, 0.0, 0.30556),
    'k' => m(0.0, 0.69444, 0.0, 0.0, 0.52778),
    'l' => m(0.0, 0.69444, 0.0, 0.0, 0.27778),
    'm' => m(0.0, 0.43056, 0.0, 0.0, 0.83334),
    'n' => m(0.0, 0.43056, 0.0, 0.0, 0.55556),
    'o' => m(0.0, 0.43056, 0.0, 0.0, 0.5),
    'p' => m(0.19444, 0.43056, 0.0, 0.0, 0.55556),
    'q' => m(0.19444, 0.43056, 0.0, 0.0, 0.52778),
    'r' => m(0.0, 0.43056, 0.0, 0.0, 0.39167),
    's' => m(0.0, 0.43056, 0.0, 0.0, 0.39445),
    't' => m(0.0, 0.61508, 0.0, 0.0, 0.38889),
    'u' => m(0.0, 0.43056, 0.0, 0.0, 0.55556),
    'v' => m(0.0, 0.43056, 0.01389, 0.0, 0.52778),
    'w' => m(0.0, 0.43056, 0.01389, 0.0, 0.72222),
    'x' => m(0.0, 0.43056, 0.0, 0.0, 0.52778),
    'y' => m(0.19444, 0.43056, 0.01389, 0.0, 0.52778),
    'z' => m(0.0, 0.43056, 0.0, 0.0, 0.44445),
    '\u{00B1}' => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // ±
    '\u{00D7}' => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // ×
    '\u{0393}' => m(0.0, 0.68333, 0.0, 0.0, 0.625),       // Γ
    '\u{0394}' => m(0.0, 0.68333, 0.0, 0.0, 0.83334),     // Δ
    '\u{0398}' => m(0.0, 0.68333, 0.0, 0.0, 0.77778),     // Θ
    '\u{039B}' => m(0.0, 0.68333, 0.0, 0.0, 0.69445),     // Λ
    '\u{039E}' => m(0.0, 0.68333, 0.0, 0.0, 0.66667),     // Ξ
    '\u{03A0}' => m(0.0, 0.68333, 0.0, 0.0, 0.75),        // Π
    '\u{03A3}' => m(0.0, 0.68333, 0.0, 0.0, 0.72222),     // Σ
    '\u{03A6}' => m(0.0, 0.68333, 0.0, 0.0, 0.72222),     // Φ
    '\u{03A8}' => m(0.0, 0.68333, 0.0, 0.0, 0.77778),     // Ψ
    '\u{03A9}' => m(0.0, 0.68333, 0.0, 0.0, 0.72222),     // Ω
    '\u{2192}' => m(-0.13313, 0.36687, 0.0, 0.0, 1.0),    // →
    '\u{2208}' => m(0.0391, 0.5391, 0.0, 0.0, 0.66667),   // ∈
    '\u{2212}' => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // −
    '\u{2217}' => m(-0.03472, 0.46528, 0.0, 0.0, 0.5),    // ∗
    '\u{221E}' => m(0.0, 0.43056, 0.0, 0.0, 1.0),         // ∞
    '\u{222B}' => m(0.19444, 0.69444, 0.11111, 0.0, 0.41667), // ∫
    '\u{2260}' => m(0.19444, 0.69444, 0.0, 0.0, 0.77778), // ≠
    '\u{2264}' => m(0.13597, 0.63597, 0.0, 0.0, 0.77778), // ≤
    '\u{2265}' => m(0.13597, 0.63597, 0.0, 0.0, 0.77778), // ≥
    '\u{22C5}' => m(-0.05555, 0.44445, 0.0, 0.0, 0.27778), // ⋅
};

static MATH_ITALIC: phf::Map<char, CharacterMetrics> = phf::phf_map! {
    'A' => m(0.0, 0.68333, 0.0, 0.13889, 0.75),
    'B' => m(0.0, 0.68333, 0.05017, 0.08334, 0.75851),
    'C' => m(0.0, 0.68333, 0.07153, 0.08334, 0.71472),
    'D' => m(0.0, 0.68333, 0.02778, 0.05556, 0.82792),
    'E' => m(0.0, 0.68333, 0.05764, 0.08334, 0.7382),
    'F' => m(0.0, 0.68333, 0.13889, 0.08334, 0.64306),
    'G' => m(0.0, 0.68333, 0.0, 0.08334, 0.78625),
    'H' => m(0.0, 0.68333, 0.08125, 0.05556, 0.83125),
    'I' => m(0.0, 0.68333, 0.07847, 0.11111, 0.43958),
    'J' => m(0.0, 0.68333, 0.09618, 0.16667, 0.55451),
    'K' => m(0.0, 0.68333, 0.07153, 0.05556, 0.84931),
    'L' => m(0.0, 0.68333, 0.0, 0.02778, 0.68056),
    'M' => m(0.0, 0.68333, 0.10903, 0.08334, 0.97014),
    'N' => m(0.0, 0.68333, 0.10903, 0.08334, 0.80347),
    'O' => m(0.0, 0.68333, 0.02778, 0.08334, 0.76278),
    'P' => m(0.0, 0.68333, 0.13889, 0.08334, 0.64201),
    'Q' => m(0.19444, 0.68333, 0.0, 0.08334, 0.79056),
    'R' => m(0.0, 0.68333, 0.00773, 0.08334, 0.75929),
    'S' => m(0.0, 0.68333, 0.05764, 0.08334, 0.6132),
    'T' => m(0.0, 0.68333, 0.13889, 0.08334, 0.58438),
    'U' => m(0.0, 0.68333, 0.10903, 0.02778, 0.68278),
    'V' => m(0.0, 0.68333, 0.22222, 0.0, 0.58333),
    'W' => m(0.0, 0.68333, 0.13889, 0.0, 0.94445),
    'X' => m(0.0, 0.68333, 0.07847, 0.08334, 0.82847),
    'Y' => m(0.0, 0.68333, 0.22222, 0.0, 0.58056),
    'Z' => m(0.0, 0.68333, 0.07153, 0.08334, 0.68264),
    'a' => m(0.0, 0.43056, 0.0, 0.0, 0.52859),
    'b' => m(0.0, 0.69444, 0.0, 0.0, 0.42917),
    'c' => m(0.0, 0.43056, 0.0, 0.05556, 0.43276),
    'd' => m(0.0, 0.69444, 0.0, 0.16667, 0.52049),
    'e' => m(0.0, 0.43056, 0.0, 0.05556, 0.46563),
    'f' => m(0.19444, 0.69444, 0.10764, 0.16667, 0.48959),
    'g' => m(0.19444, 0.43056, 0.03588, 0.02778, 0.47697),
    'h' => m(0.0, 0.69444, 0.0, 0.0, 0.57616),
    'i' => m(0.0, 0.65952, 0.0, 0.0, 0.34451),
    'j' => m(0.19444, 0.65952, 0.05724, 0.0, 0.41181),
    'k' => m(0.0, 0.69444, 0.03148, 0.0, 0.5206),
    'l' => m(0.0, 0.69444, 0.01968, 0.08334, 0.29838),
    'm' => m(0.0, 0.43056, 0.0, 0.0, 0.87801),
    'n' => m(0.0, 0.43056, 0.0, 0.0, 0.60023),
    'o' => m(0.0, 0.43056, 0.0, 0.05556, 0.48472),
    'p' => m(0.19444, 0.43056, 0.0, 0.08334, 0.50313),
    'q' => m(0.19444, 0.43056, 0.03588, 0.08334, 0.44641),
    'r' => m(0.0, 0.43056, 0.02778, 0.05556, 0.45116),
    's' => m(0.0, 0.43056, 0.0, 0.05556, 0.46875),
    't' => m(0.0, 0.61508, 0.0, 0.08334, 0.36111),
    'u' => m(0.0, 0.43056, 0.0, 0.02778, 0.57246),
    'v' => m(0.0, 0.43056, 0.03588, 0.02778, 0.48472),
    'w' => m(0.0, 0.43056, 0.02691, 0.08334, 0.71592),
    'x' => m(0.0, 0.43056, 0.0, 0.02778, 0.57153),
    'y' => m(0.19444, 0.43056, 0.03588, 0.05556, 0.49028),
    'z' => m(0.0, 0.43056, 0.04398, 0.05556, 0.46505),
    '\u{03B1}' => m(0.0, 0.43056, 0.0037, 0.02778, 0.6397),      // α
    '\u{03B2}' => m(0.19444, 0.69444, 0.05278, 0.08334, 0.56563), // β
    '\u{03B3}' => m(0.19444, 0.43056, 0.05556, 0.0, 0.51773),     // γ
    '\u{03B4}' => m(0.0, 0.69444, 0.03785, 0.05556, 0.44444),     // δ
    '\u{03B6}' => m(0.19444, 0.69444, 0.07378, 0.08334, 0.4375),  // ζ
    '\u{03B7}' => m(0.19444, 0.43056, 0.03588, 0.05556, 0.49653), // η
    '\u{03B8}' => m(0.0, 0.69444, 0.02778, 0.08334, 0.46944),     // θ
    '\u{03B9}' => m(0.0, 0.43056, 0.0, 0.05556, 0.35394),         // ι
    '\u{03BA}' => m(0.0, 0.43056, 0.0, 0.0, 0.57616),             // κ
    '\u{03BB}' => m(0.0, 0.69444, 0.0, 0.0, 0.58334),             // λ
    '\u{03BC}' => m(0.19444, 0.43056, 0.0, 0.02778, 0.60255),     // μ
    '\u{03BD}' => m(0.0, 0.43056, 0.06366, 0.02778, 0.49398),     // ν
    '\u{03BE}' => m(0.19444, 0.69444, 0.04601, 0.11111, 0.4375),  // ξ
    '\u{03C0}' => m(0.0, 0.43056, 0.03588, 0.0, 0.57003),         // π
    '\u{03C1}' => m(0.19444, 0.43056, 0.0, 0.08334, 0.51702),     // ρ
    '\u{03C3}' => m(0.0, 0.43056, 0.03588, 0.0, 0.57141),         // σ
    '\u{03C4}' => m(0.0, 0.43056, 0.1132, 0.02778, 0.43715),      // τ
    '\u{03C5}' => m(0.0, 0.43056, 0.03588, 0.02778, 0.54028),     // υ
    '\u{03C7}' => m(0.19444, 0.43056, 0.0, 0.05556, 0.62569),     // χ
    '\u{03C8}' => m(0.19444, 0.69444, 0.03588, 0.11111, 0.65139), // ψ
    '\u{03C9}' => m(0.0, 0.43056, 0.03588, 0.0, 0.62245),         // ω
    '\u{03D5}' => m(0.19444, 0.69444, 0.0, 0.08334, 0.59615),     // ϕ
    '\u{03F5}' => m(0.0, 0.43056, 0.0, 0.08334, 0.40555),         // ϵ
    '\u{2202}' => m(0.0, 0.69444, 0.05556, 0.08334, 0.5309),      // ∂
};

static SIZE1_REGULAR: phf::Map<char, CharacterMetrics> = phf::phf_map! {
    '\u{220F}' => m(0.25001, 0.75, 0.0, 0.0, 0.94445),      // ∏
    '\u{2210}' => m(0.25001, 0.75, 0.0, 0.0, 0.94445),      // ∐
    '\u{2211}' => m(0.25001, 0.75, 0.0, 0.0, 1.05556),      // ∑
    '\u{222B}' => m(0.30612, 0.805, 0.19445, 0.0, 0.47222), // ∫
    '\u{222C}' => m(0.30612, 0.805, 0.19445, 0.0, 0.81667), // ∬
    '\u{222E}' => m(0.30612, 0.805, 0.19445, 0.0, 0.47222), // ∮
    '\u{22C0}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⋀
    '\u{22C1}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⋁
    '\u{22C2}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⋂
    '\u{22C3}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⋃
    '\u{2A00}' => m(0.25001, 0.75, 0.0, 0.0, 1.11111),      // ⨀
    '\u{2A01}' => m(0.25001, 0.75, 0.0, 0.0, 1.11111),      // ⨁
    '\u{2A02}' => m(0.25001, 0.75, 0.0, 0.0, 1.11111),      // ⨂
    '\u{2A04}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⨄
    '\u{2A06}' => m(0.25001, 0.75, 0.0, 0.0, 0.83334),      // ⨆
};

static SIZE2_REGULAR: phf::Map<char, CharacterMetrics> = phf::phf_map! {
    '\u{220F}' => m(0.55001, 1.05, 0.0, 0.0, 1.27778),      // ∏
    '\u{2210}' => m(0.55001, 1.05, 0.0, 0.0, 1.27778),      // ∐
    '\u{2211}' => m(0.55001, 1.05, 0.0, 0.0, 1.44445),      // ∑
    '\u{222B}' => m(0.86225, 1.36, 0.44445, 0.0, 0.55556),  // ∫
    '\u{222C}' => m(0.86225, 1.36, 0.44445, 0.0, 1.08334),  // ∬
    '\u{222E}' => m(0.86225, 1.36, 0.44445, 0.0, 0.55556),  // ∮
    '\u{22C0}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⋀
    '\u{22C1}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⋁
    '\u{22C2}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⋂
    '\u{22C3}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⋃
    '\u{2A00}' => m(0.55001, 1.05, 0.0, 0.0, 1.51112),      // ⨀
    '\u{2A01}' => m(0.55001, 1.05, 0.0, 0.0, 1.51112),      // ⨁
    '\u{2A02}' => m(0.55001, 1.05, 0.0, 0.0, 1.51112),      // ⨂
    '\u{2A04}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⨄
    '\u{2A06}' => m(0.55001, 1.05, 0.0, 0.0, 1.11111),      // ⨆
};
