use std::mem;
use std::str::CharIndices;

use crate::atom::AtomType;
use crate::commands::get_command;
use crate::error::{MarkupErrKind, MarkupError};
use crate::token::{EndToken, Span, TokSpan, Token};

/// Lexer
pub(crate) struct Lexer<'source> {
    input: CharIndices<'source>,
    peek: (usize, Option<char>),
    input_string: &'source str,
    input_length: usize,
    brace_nesting_level: usize,
}

/// The spacing class and glyph of a character typed directly.
fn char_symbol(ch: char) -> Option<(AtomType, char)> {
    Some(match ch {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '/' | '|' => (AtomType::Mord, ch),
        '+' => (AtomType::Mbin, ch),
        '-' => (AtomType::Mbin, '−'),
        '*' => (AtomType::Mbin, '∗'),
        '=' | '<' | '>' | ':' => (AtomType::Mrel, ch),
        '(' | '[' => (AtomType::Mopen, ch),
        ')' | ']' | '!' | '?' => (AtomType::Mclose, ch),
        ',' | ';' => (AtomType::Mpunct, ch),
        c if !c.is_ascii() && !c.is_control() => (AtomType::Mord, c),
        _ => return None,
    })
}

impl<'source> Lexer<'source> {
    /// Receive the input source code and generate a LEXER instance.
    pub(crate) fn new(input: &'source str) -> Self {
        let mut lexer = Lexer {
            input: input.char_indices(),
            peek: (0, None),
            input_string: input,
            input_length: input.len(),
            brace_nesting_level: 0,
        };
        lexer.read_char(); // Initialize `peek`.
        lexer
    }

    /// One character progresses.
    fn read_char(&mut self) -> (usize, Option<char>) {
        mem::replace(
            &mut self.peek,
            self.input
                .next()
                .map(|(idx, ch)| (idx, Some(ch)))
                .unwrap_or((self.input_length, None)),
        )
    }

    fn skip_whitespace(&mut self) {
        while self.peek.1.is_some_and(|ch| ch.is_ascii_whitespace()) {
            self.read_char();
        }
    }

    /// Read one command.
    #[inline]
    fn read_command(&mut self) -> (&'source str, usize) {
        let start = self.peek.0;

        // Read in all ASCII alphabetic characters.
        while self.peek.1.is_some_and(|ch| ch.is_ascii_alphabetic()) {
            self.read_char();
        }

        // Commands may end with a "*".
        if self.peek.1 == Some('*') {
            self.read_char();
        }

        if start == self.peek.0 {
            // Always read at least one character.
            self.read_char();
        }

        let end = self.peek.0;
        (self.input_string.get(start..end).unwrap_or_default(), end)
    }

    /// Read the braced text argument of a command like `\textcolor`.
    ///
    /// Returns the trimmed text and the index of the character after the `}`.
    fn read_text_group(
        &mut self,
        place: &'static str,
    ) -> Result<(&'source str, usize), Box<MarkupError>> {
        self.skip_whitespace();
        let (loc, first) = self.read_char();
        if first != Some('{') {
            let end = loc + first.map_or(0, char::len_utf8);
            return Err(Box::new(MarkupError(
                loc..end,
                MarkupErrKind::ExpectedText(place),
            )));
        }
        let start = self.peek.0;
        let rest = self.input_string.as_bytes().get(start..).unwrap_or_default();
        let Some(offset) = memchr::memchr(b'}', rest) else {
            return Err(Box::new(MarkupError(
                loc..self.input_length,
                MarkupErrKind::UnclosedGroup(EndToken::GroupClose),
            )));
        };
        let end = start + offset;
        while self.peek.0 < end {
            if let (loc, Some(ch @ ('{' | '\\' | '%'))) = self.read_char() {
                return Err(Box::new(MarkupError(
                    loc..(loc + 1),
                    MarkupErrKind::DisallowedChar(ch),
                )));
            }
        }
        self.read_char(); // Consume the `}`.
        let text = self.input_string.get(start..end).unwrap_or_default().trim();
        Ok((text, end + 1))
    }

    pub(crate) fn next_token(&mut self) -> Result<TokSpan<'source>, Box<MarkupError>> {
        self.skip_whitespace();

        let (loc, ch) = self.read_char();
        let Some(ch) = ch else {
            return Ok(TokSpan::new(Token::Eoi, Span::zero_width(loc)));
        };
        if ch == '%' {
            // Skip comments.
            while self.peek.1 != Some('\n') && self.peek.1.is_some() {
                self.read_char();
            }
            self.read_char(); // Consume the newline character.
            return self.next_token();
        }
        let span = Span::new(loc, loc + ch.len_utf8());
        let tok = match ch {
            '{' => {
                self.brace_nesting_level += 1;
                Token::GroupBegin
            }
            '}' => {
                let Some(new_level) = self.brace_nesting_level.checked_sub(1) else {
                    return Err(Box::new(MarkupError(
                        span.into(),
                        MarkupErrKind::UnmatchedClose(EndToken::GroupClose),
                    )));
                };
                self.brace_nesting_level = new_level;
                Token::GroupEnd
            }
            '^' => Token::Circumflex,
            '_' => Token::Underscore,
            '\\' => {
                let (cmd_string, end) = self.read_command();
                return self.parse_command(Span::new(loc, end), cmd_string);
            }
            c => match char_symbol(c) {
                Some((atom_type, glyph)) => Token::Symbol(atom_type, glyph),
                None => {
                    return Err(Box::new(MarkupError(
                        span.into(),
                        MarkupErrKind::DisallowedChar(c),
                    )));
                }
            },
        };
        Ok(TokSpan::new(tok, span))
    }

    fn parse_command(
        &mut self,
        span: Span,
        cmd_string: &'source str,
    ) -> Result<TokSpan<'source>, Box<MarkupError>> {
        let Some(tok) = get_command(cmd_string) else {
            return Err(Box::new(MarkupError(
                span.into(),
                MarkupErrKind::UnknownCommand(cmd_string.into()),
            )));
        };
        let (tok, end) = match tok {
            Token::TextColor(_) => {
                let (color, end) = self.read_text_group(r"\textcolor")?;
                (Token::TextColor(color), end)
            }
            Token::ColorBox(_) => {
                let (color, end) = self.read_text_group(r"\colorbox")?;
                (Token::ColorBox(color), end)
            }
            Token::OperatorName(_, star) => {
                let (name, end) = self.read_text_group(r"\operatorname")?;
                (Token::OperatorName(name, star), end)
            }
            tok => (tok, span.end()),
        };
        Ok(TokSpan::new(tok, Span::new(span.start(), end)))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use insta::assert_snapshot;

    use super::*;

    fn lex(problem: &str) -> String {
        let mut lexer = Lexer::new(problem);
        let mut tokens = String::new();
        loop {
            let tokloc = lexer.next_token().unwrap();
            if matches!(tokloc.token(), Token::Eoi) {
                break;
            }
            let (tok, span) = tokloc.into_parts();
            writeln!(tokens, "{}:{}: {:?}", span.start(), span.end(), tok).unwrap();
        }
        tokens
    }

    #[test]
    fn end_of_input_has_an_empty_span() {
        let mut lexer = Lexer::new("x ");
        lexer.next_token().unwrap();
        let (tok, span) = lexer.next_token().unwrap().into_parts();
        assert!(matches!(tok, Token::Eoi));
        assert_eq!(std::ops::Range::from(span), 2..2);
    }

    #[test]
    fn simple_expression() {
        assert_snapshot!(lex("x + y"), @r"
        0:1: Symbol(Mord, 'x')
        2:3: Symbol(Mbin, '+')
        4:5: Symbol(Mord, 'y')
        ");
    }

    #[test]
    fn greek_and_minus() {
        assert_snapshot!(lex(r"\alpha-2"), @r"
        0:6: Symbol(Mord, 'α')
        6:7: Symbol(Mbin, '−')
        7:8: Symbol(Mord, '2')
        ");
    }

    #[test]
    fn comment() {
        assert_snapshot!(lex("a%hi\nb"), @r"
        0:1: Symbol(Mord, 'a')
        5:6: Symbol(Mord, 'b')
        ");
    }

    #[test]
    fn operator_with_scripts() {
        assert_snapshot!(lex(r"\sum_{k}^n"), @r"
        0:4: BigOp('∑', Auto)
        4:5: Underscore
        5:6: GroupBegin
        6:7: Symbol(Mord, 'k')
        7:8: GroupEnd
        8:9: Circumflex
        9:10: Symbol(Mord, 'n')
        ");
    }

    #[test]
    fn limits_after_named_operator() {
        assert_snapshot!(lex(r"\lim\limits"), @r#"
        0:4: NamedOp("lim", Auto)
        4:11: Limits(OverUnder)
        "#);
    }

    #[test]
    fn text_arguments() {
        assert_snapshot!(lex(r"\textcolor {red}{x}"), @r#"
        0:16: TextColor("red")
        16:17: GroupBegin
        17:18: Symbol(Mord, 'x')
        18:19: GroupEnd
        "#);
        assert_snapshot!(lex(r"\operatorname*{sn}x"), @r#"
        0:18: OperatorName("sn", true)
        18:19: Symbol(Mord, 'x')
        "#);
    }

    #[test]
    fn fraction_arguments() {
        assert_snapshot!(lex(r"\dfrac12"), @r"
        0:6: Frac(Some(Displaystyle))
        6:7: Symbol(Mord, '1')
        7:8: Symbol(Mord, '2')
        ");
    }

    #[test]
    fn lexer_errors() {
        let problems = [
            (r"\foo", 0..4, "Unknown command \"\\foo\"."),
            ("}", 0..1, "Unmatched closing token: \"}\"."),
            (r"\textcolor red", 11..12, "Expected text in \\textcolor."),
            (r"\textcolor{red", 10..14, "Expected token \"}\", but not found."),
            ("x&y", 1..2, "Disallowed character: '&'."),
        ];

        for (problem, range, message) in problems {
            let mut lexer = Lexer::new(problem);
            let err = loop {
                match lexer.next_token() {
                    Ok(tokloc) if matches!(tokloc.token(), Token::Eoi) => {
                        panic!("no error for {problem:?}")
                    }
                    Ok(_) => {}
                    Err(err) => break err,
                }
            };
            assert_eq!(err.0, range, "{problem}");
            assert_eq!(err.error_message(), message, "{problem}");
        }
    }
}
