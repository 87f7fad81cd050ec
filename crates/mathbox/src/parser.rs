use std::mem;
use std::ops::Range;

use crate::atom::{Atom, AtomKind, FontSize, OperatorInfo, Style, SubsupPlacement};
use crate::error::{LimitedUsabilityToken, MarkupErrKind, MarkupError, Place};
use crate::lexer::Lexer;
use crate::token::{EndToken, Span, TokSpan, Token};

/// Groups, arguments and style switches may not nest deeper than this.
const MAX_NESTING_DEPTH: usize = 100;

pub(crate) struct Parser<'source> {
    lexer: Lexer<'source>,
    peek: TokSpan<'source>,
    input: &'source str,
    depth: usize,
}

type ParseResult<T> = Result<T, Box<MarkupError>>;

impl<'source> Parser<'source> {
    pub(crate) fn new(input: &'source str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let peek = lexer.next_token()?;
        Ok(Parser {
            lexer,
            peek,
            input,
            depth: 0,
        })
    }

    pub(crate) fn parse(mut self) -> ParseResult<Vec<Atom>> {
        self.parse_sequence(EndToken::Eoi, 0)
    }

    fn next_token(&mut self) -> ParseResult<TokSpan<'source>> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.peek, next))
    }

    /// The markup a token was read from.
    fn source(&self, span: Span) -> &'source str {
        self.input
            .get(Range::<usize>::from(span))
            .unwrap_or_default()
    }

    fn nested<T>(
        &mut self,
        at: usize,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Box::new(MarkupError(
                at..(at + 1),
                MarkupErrKind::HardLimitExceeded,
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse atoms until `end`, which is consumed. `start` is where the sequence began.
    fn parse_sequence(&mut self, end: EndToken, start: usize) -> ParseResult<Vec<Atom>> {
        let mut atoms: Vec<Atom> = Vec::new();
        loop {
            if end.matches(self.peek.token()) {
                self.next_token()?;
                return Ok(atoms);
            }
            let (tok, span) = self.next_token()?.into_parts();
            match tok {
                Token::Eoi => {
                    return Err(Box::new(MarkupError(
                        start..span.end(),
                        MarkupErrKind::UnclosedGroup(end),
                    )));
                }
                Token::GroupEnd => {
                    return Err(Box::new(MarkupError(
                        span.into(),
                        MarkupErrKind::UnmatchedClose(EndToken::GroupClose),
                    )));
                }
                Token::Circumflex | Token::Underscore => {
                    let script = self.parse_argument()?;
                    if atoms.is_empty() {
                        // Scripts without a base go on an invisible operator.
                        atoms.push(Atom::zero_width_operator());
                    }
                    if let Some(base) = atoms.last_mut() {
                        let slot = if matches!(tok, Token::Circumflex) {
                            &mut base.superscript
                        } else {
                            &mut base.subscript
                        };
                        if slot.is_some() {
                            return Err(Box::new(MarkupError(
                                span.into(),
                                MarkupErrKind::DuplicateSubOrSup,
                            )));
                        }
                        *slot = Some(script);
                    }
                }
                Token::Limits(placement) => match atoms.last_mut() {
                    // Scripts without a base cannot carry a placement; it would be lost when
                    // they are written back.
                    Some(base)
                        if matches!(base.kind, AtomKind::Operator(_))
                            && !base.is_zero_width_operator() =>
                    {
                        base.subsup_placement = placement;
                        base.explicit_subsup_placement = true;
                    }
                    _ => {
                        return Err(Box::new(MarkupError(
                            span.into(),
                            MarkupErrKind::CannotBeUsedHere {
                                got: LimitedUsabilityToken::Limits,
                                correct_place: Place::AfterOperator,
                            },
                        )));
                    }
                },
                Token::Style(name) => {
                    // A style switch applies to the rest of the sequence.
                    let rest = self.nested(span.start(), |p| p.parse_sequence(end, start))?;
                    atoms.push(Atom::group(rest, Style::default(), Some(name)));
                    return Ok(atoms);
                }
                Token::Size(size) => {
                    let rest = self.nested(span.start(), |p| p.parse_sequence(end, start))?;
                    let style = Style {
                        font_size: Some(FontSize::Size(size)),
                        ..Default::default()
                    };
                    atoms.push(Atom::group(rest, style, None));
                    return Ok(atoms);
                }
                tok => atoms.push(self.parse_atom(tok, span)?),
            }
        }
    }

    /// Parse the argument of a command or script: a braced list or a single atom.
    fn parse_argument(&mut self) -> ParseResult<Vec<Atom>> {
        let (tok, span) = self.next_token()?.into_parts();
        if matches!(tok, Token::GroupBegin) {
            self.parse_group_body(span.start())
        } else {
            Ok(vec![self.parse_atom(tok, span)?])
        }
    }

    fn parse_group_body(&mut self, start: usize) -> ParseResult<Vec<Atom>> {
        self.nested(start, |p| p.parse_sequence(EndToken::GroupClose, start))
    }

    fn parse_atom(&mut self, tok: Token<'source>, span: Span) -> ParseResult<Atom> {
        let source = self.source(span);
        let mut buffer = [0u8; 4];
        let atom = match tok {
            Token::Symbol(atom_type, glyph) => {
                let value: &str = glyph.encode_utf8(&mut buffer);
                let command = (source != value).then_some(source);
                Atom::symbol(atom_type, command, value)
            }
            Token::BigOp(symbol, placement) => {
                Atom::extensible_operator(source, symbol.encode_utf8(&mut buffer), placement)
            }
            Token::NamedOp(name, placement) => Atom::named_operator(source, name, placement),
            Token::MathOp => {
                let body = self.parse_argument()?;
                Atom::body_operator(r"\mathop", body, true, SubsupPlacement::Auto)
            }
            Token::OperatorName(name, star) => {
                if name.is_empty()
                    || !name
                        .chars()
                        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '-' | '.'))
                {
                    return Err(Box::new(MarkupError(
                        span.into(),
                        MarkupErrKind::InvalidOperatorName(name.into()),
                    )));
                }
                let (command, placement) = if star {
                    (r"\operatorname*", SubsupPlacement::Auto)
                } else {
                    (r"\operatorname", SubsupPlacement::Adjacent)
                };
                Atom {
                    kind: AtomKind::Operator(OperatorInfo {
                        has_argument: true,
                        ..Default::default()
                    }),
                    ..Atom::named_operator(command, name, placement)
                }
            }
            Token::TextColor(color) => {
                let body = self.parse_argument()?;
                let style = Style {
                    color: Some(color.to_string()),
                    ..Default::default()
                };
                Atom::group(body, style, None)
            }
            Token::ColorBox(color) => {
                let body = self.parse_argument()?;
                let style = Style {
                    background_color: Some(color.to_string()),
                    ..Default::default()
                };
                Atom::group(body, style, None)
            }
            Token::Frac(mathstyle) => {
                let above = self.parse_argument()?;
                let below = self.parse_argument()?;
                Atom::fraction(source, above, below, mathstyle)
            }
            Token::Phantom(kind) => Atom::phantom(self.parse_argument()?, kind),
            Token::GroupBegin => {
                let body = self.parse_group_body(span.start())?;
                Atom::group(body, Style::default(), None)
            }
            Token::Eoi => {
                return Err(Box::new(MarkupError(
                    span.into(),
                    MarkupErrKind::ExpectedArgumentGotEOF,
                )));
            }
            Token::GroupEnd => {
                return Err(Box::new(MarkupError(
                    span.into(),
                    MarkupErrKind::ExpectedArgumentGotClose,
                )));
            }
            Token::Circumflex | Token::Underscore => {
                return Err(Box::new(MarkupError(
                    span.into(),
                    MarkupErrKind::BoundFollowedByBound,
                )));
            }
            Token::Limits(_) => {
                return Err(Box::new(MarkupError(
                    span.into(),
                    MarkupErrKind::CannotBeUsedHere {
                        got: LimitedUsabilityToken::Limits,
                        correct_place: Place::AfterOperator,
                    },
                )));
            }
            Token::Style(_) | Token::Size(_) => {
                return Err(Box::new(MarkupError(
                    span.into(),
                    MarkupErrKind::CannotBeUsedHere {
                        got: LimitedUsabilityToken::StyleSwitch,
                        correct_place: Place::InSequence,
                    },
                )));
            }
        };
        Ok(atom)
    }
}

#[cfg(test)]
mod tests {
    use box_model::mathstyle::MathstyleName;

    use super::*;
    use crate::atom::{AtomType, PhantomKind, ZERO_WIDTH_SPACE};

    fn parse(input: &str) -> Vec<Atom> {
        Parser::new(input).and_then(Parser::parse).unwrap()
    }

    fn parse_err(input: &str) -> Box<MarkupError> {
        match Parser::new(input).and_then(Parser::parse) {
            Ok(atoms) => panic!("{input:?} parsed as {atoms:?}"),
            Err(err) => err,
        }
    }

    #[test]
    fn symbols() {
        let atoms = parse(r"x - \alpha");
        assert_eq!(atoms.len(), 3);
        assert_eq!(atoms[0], Atom::symbol(AtomType::Mord, None, "x"));
        assert_eq!(atoms[1], Atom::symbol(AtomType::Mbin, Some("-"), "−"));
        assert_eq!(atoms[2], Atom::symbol(AtomType::Mord, Some(r"\alpha"), "α"));
    }

    #[test]
    fn operator_with_scripts_and_limits() {
        let atoms = parse(r"\sum\nolimits_{k=1}^n");
        let [sum] = atoms.as_slice() else {
            panic!("expected one atom");
        };
        assert_eq!(sum.command.as_deref(), Some(r"\sum"));
        assert_eq!(sum.value.as_deref(), Some("∑"));
        assert_eq!(sum.subsup_placement, SubsupPlacement::Adjacent);
        assert!(sum.explicit_subsup_placement);
        assert_eq!(sum.subscript.as_ref().map(Vec::len), Some(3));
        assert_eq!(sum.superscript.as_ref().map(Vec::len), Some(1));
        assert!(matches!(
            &sum.kind,
            AtomKind::Operator(OperatorInfo {
                is_extensible_symbol: true,
                ..
            })
        ));
    }

    #[test]
    fn scripts_without_a_base() {
        let atoms = parse("^2");
        let [op] = atoms.as_slice() else {
            panic!("expected one atom");
        };
        assert_eq!(op.value.as_deref(), Some(ZERO_WIDTH_SPACE));
        assert!(op.is_zero_width_operator());
        assert_eq!(op.atom_type, AtomType::Mop);
        assert!(op.superscript.is_some());
    }

    #[test]
    fn operator_names() {
        let atoms = parse(r"\operatorname*{argmax}_x \operatorname{sn}");
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].command.as_deref(), Some(r"\operatorname*"));
        assert_eq!(atoms[0].subsup_placement, SubsupPlacement::Auto);
        assert_eq!(atoms[1].subsup_placement, SubsupPlacement::Adjacent);
        assert!(matches!(
            &atoms[1].kind,
            AtomKind::Operator(OperatorInfo {
                has_argument: true,
                ..
            })
        ));
    }

    #[test]
    fn style_switch_takes_the_rest_of_the_group() {
        let atoms = parse(r"a{b\displaystyle c d}e");
        assert_eq!(atoms.len(), 3);
        let Some(body) = &atoms[1].body else {
            panic!("expected a group");
        };
        assert_eq!(body.len(), 2);
        assert_eq!(
            body[1].kind,
            AtomKind::Group {
                mathstyle: Some(MathstyleName::Displaystyle)
            }
        );
        assert_eq!(body[1].body.as_ref().map(Vec::len), Some(2));

        let atoms = parse(r"\large x");
        assert_eq!(atoms[0].style.font_size, Some(FontSize::Size(6)));
    }

    #[test]
    fn commands_with_arguments() {
        let atoms = parse(r"\dfrac12 \vphantom{x} \textcolor{red}{y} \colorbox{blue}z \mathop{T}");
        assert_eq!(atoms.len(), 5);
        assert!(matches!(
            &atoms[0].kind,
            AtomKind::Fraction { above, below, mathstyle: Some(MathstyleName::Displaystyle) }
                if above.len() == 1 && below.len() == 1
        ));
        assert_eq!(atoms[1].kind, AtomKind::Phantom(PhantomKind::VPhantom));
        assert_eq!(atoms[2].style.color.as_deref(), Some("red"));
        assert_eq!(atoms[3].style.background_color.as_deref(), Some("blue"));
        assert_eq!(atoms[4].atom_type, AtomType::Mop);
        assert_eq!(atoms[4].body.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn parse_errors() {
        let problems = [
            ("x^1^2", 3..4, "Duplicate subscript or superscript."),
            (r"x\limits", 1..8, "Got \"\\limits, \\nolimits or \\displaylimits\", which may only appear after an operator like \\sum or \\lim."),
            (r"^2\limits", 2..9, "Got \"\\limits, \\nolimits or \\displaylimits\", which may only appear after an operator like \\sum or \\lim."),
            ("x^", 2..2, "Expected argument but reached end of input."),
            ("{x^}", 3..4, "Expected argument but got closing token \"}\"."),
            ("x^_2", 2..3, "'^' or '_' directly followed by '^' or '_'."),
            ("{x", 0..2, "Expected token \"}\", but not found."),
            (r"\operatorname{}", 0..15, "Invalid operator name: \"\"."),
            (r"x^\large y", 2..8, "Got \"\\displaystyle, \\large, ...\", which may only appear inside a group or at the top level."),
        ];
        for (problem, range, message) in problems {
            let err = parse_err(problem);
            assert_eq!(err.0, range, "{problem}");
            assert_eq!(err.error_message(), message, "{problem}");
        }
    }

    #[test]
    fn nesting_is_limited() {
        let deep = "{".repeat(MAX_NESTING_DEPTH + 1) + &"}".repeat(MAX_NESTING_DEPTH + 1);
        let err = parse_err(&deep);
        assert_eq!(err.error_message(), MarkupErrKind::HardLimitExceeded.string());
        let ok = "{".repeat(MAX_NESTING_DEPTH) + &"}".repeat(MAX_NESTING_DEPTH);
        assert_eq!(parse(&ok).len(), 1);
    }
}
