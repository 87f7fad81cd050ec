use std::ops::Range;

use strum_macros::IntoStaticStr;

use box_model::mathstyle::MathstyleName;

use crate::atom::{AtomType, PhantomKind, SubsupPlacement};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'source> {
    /// End of input.
    Eoi,
    /// The character `{`.
    GroupBegin,
    /// The character `}`.
    GroupEnd,
    /// The character `^` for superscripts.
    Circumflex,
    /// The character `_` for subscripts.
    Underscore,
    /// A single symbol with its spacing class, e.g. `x`, `+` or `\alpha`.
    Symbol(AtomType, char),
    /// A large operator symbol, e.g. `\sum` or `\int`.
    BigOp(char, SubsupPlacement),
    /// A named operator, e.g. `\sin` or `\lim`.
    NamedOp(&'static str, SubsupPlacement),
    /// `\mathop`
    MathOp,
    /// `\operatorname{...}` and `\operatorname*{...}`. The `bool` is `true` for the starred
    /// form.
    OperatorName(&'source str, bool),
    /// `\limits`, `\nolimits` and `\displaylimits`.
    Limits(SubsupPlacement),
    /// A style switch, e.g. `\displaystyle`.
    Style(MathstyleName),
    /// A size switch, e.g. `\large`. Sizes run from 1 (`\tiny`) to 10 (`\Huge`).
    Size(u8),
    /// `\textcolor{...}`
    TextColor(&'source str),
    /// `\colorbox{...}`
    ColorBox(&'source str),
    /// `\frac`, `\dfrac` and `\tfrac`.
    Frac(Option<MathstyleName>),
    /// `\phantom`, `\hphantom` and `\vphantom`.
    Phantom(PhantomKind),
}

static_assertions::assert_eq_size!(Token<'_>, [usize; 3]);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn zero_width(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token together with its span in the input string.
#[derive(Debug, Clone, Copy)]
pub struct TokSpan<'source>(Token<'source>, Span);

impl<'source> TokSpan<'source> {
    #[inline]
    pub const fn new(token: Token<'source>, span: Span) -> Self {
        TokSpan(token, span)
    }

    #[inline]
    pub fn token(&self) -> &Token<'source> {
        &self.0
    }

    #[inline]
    pub fn into_parts(self) -> (Token<'source>, Span) {
        (self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum EndToken {
    #[strum(serialize = r"}")]
    GroupClose,
    #[strum(serialize = r"end of input")]
    Eoi,
}

impl EndToken {
    pub fn matches(&self, other: &Token) -> bool {
        matches!(
            (self, other),
            (EndToken::GroupClose, Token::GroupEnd) | (EndToken::Eoi, Token::Eoi)
        )
    }
}
