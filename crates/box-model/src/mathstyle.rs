use static_assertions::const_assert_eq;
use strum_macros::{EnumString, IntoStaticStr};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::font_metrics::{FONT_METRICS, FontMetrics};

/// One of the eight TeX math styles: display, text, script and scriptscript, each in a cramped
/// and an uncramped variant.
///
/// The transitions (`sup`, `sub`, `frac_num`, `frac_den`, `cramp`) follow the table in
/// Appendix G of the TeXbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u8)]
pub enum Mathstyle {
    Display = 0,
    DisplayCramped = 1,
    Text = 2,
    TextCramped = 3,
    Script = 4,
    ScriptCramped = 5,
    ScriptScript = 6,
    ScriptScriptCramped = 7,
}

use Mathstyle::{
    Display as D, DisplayCramped as Dc, Script as S, ScriptCramped as Sc, ScriptScript as SS,
    ScriptScriptCramped as SSc, Text as T, TextCramped as Tc,
};

static STYLES: [Mathstyle; 8] = [D, Dc, T, Tc, S, Sc, SS, SSc];
static SIZE_DELTA: [i8; 8] = [0, 0, 0, 0, -2, -2, -3, -3];
static METRICS_INDEX: [usize; 8] = [0, 0, 0, 0, 1, 1, 2, 2];
static SUP: [Mathstyle; 8] = [S, Sc, S, Sc, SS, SSc, SS, SSc];
static SUB: [Mathstyle; 8] = [Sc, Sc, Sc, Sc, SSc, SSc, SSc, SSc];
static FRAC_NUM: [Mathstyle; 8] = [T, Tc, S, Sc, SS, SSc, SS, SSc];
static FRAC_DEN: [Mathstyle; 8] = [Tc, Tc, Sc, Sc, SSc, SSc, SSc, SSc];
static CRAMP: [Mathstyle; 8] = [Dc, Dc, Tc, Tc, Sc, Sc, SSc, SSc];

const_assert_eq!(SIZE_DELTA.len(), STYLES.len());

impl Mathstyle {
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Mathstyle> {
        STYLES.get(id as usize).copied()
    }

    /// The amount added to a context's size to get the effective font size.
    #[inline]
    pub fn size_delta(self) -> i8 {
        SIZE_DELTA[self as usize]
    }

    #[inline]
    pub fn cramped(self) -> bool {
        self as u8 % 2 == 1
    }

    /// Script and scriptscript styles suppress most inter-atom spacing.
    #[inline]
    pub fn is_tight(self) -> bool {
        matches!(self, S | Sc | SS | SSc)
    }

    #[inline]
    pub fn is_display(self) -> bool {
        matches!(self, D | Dc)
    }

    #[inline]
    pub fn sup(self) -> Mathstyle {
        SUP[self as usize]
    }

    #[inline]
    pub fn sub(self) -> Mathstyle {
        SUB[self as usize]
    }

    #[inline]
    pub fn frac_num(self) -> Mathstyle {
        FRAC_NUM[self as usize]
    }

    #[inline]
    pub fn frac_den(self) -> Mathstyle {
        FRAC_DEN[self as usize]
    }

    #[inline]
    pub fn cramp(self) -> Mathstyle {
        CRAMP[self as usize]
    }

    /// The font parameters for the size this style is set in.
    #[inline]
    pub fn metrics(self) -> &'static FontMetrics {
        &FONT_METRICS[METRICS_INDEX[self as usize]]
    }

    /// Whether this style is in a smaller size than `other`.
    #[inline]
    pub fn is_smaller_than(self, other: Mathstyle) -> bool {
        self.size_delta() < other.size_delta()
    }
}

/// The names by which a style can be selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MathstyleName {
    Displaystyle,
    Textstyle,
    Scriptstyle,
    Scriptscriptstyle,
}

impl MathstyleName {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn mathstyle(self) -> Mathstyle {
        match self {
            MathstyleName::Displaystyle => D,
            MathstyleName::Textstyle => T,
            MathstyleName::Scriptstyle => S,
            MathstyleName::Scriptscriptstyle => SS,
        }
    }
}

impl From<MathstyleName> for Mathstyle {
    #[inline]
    fn from(name: MathstyleName) -> Self {
        name.mathstyle()
    }
}
