use std::fmt;
use std::ops::Range;

use strum_macros::IntoStaticStr;

use crate::token::EndToken;

/// An error in the markup, with the byte range it refers to.
#[derive(Debug, Clone)]
pub struct MarkupError(pub Range<usize>, pub(crate) MarkupErrKind);

#[derive(Debug, Clone)]
pub(crate) enum MarkupErrKind {
    UnclosedGroup(EndToken),
    UnmatchedClose(EndToken),
    ExpectedArgumentGotClose,
    ExpectedArgumentGotEOF,
    DisallowedChar(char),
    UnknownCommand(Box<str>),
    CannotBeUsedHere {
        got: LimitedUsabilityToken,
        correct_place: Place,
    },
    BoundFollowedByBound,
    DuplicateSubOrSup,
    ExpectedText(&'static str),
    InvalidOperatorName(Box<str>),
    HardLimitExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum Place {
    #[strum(serialize = r"after an operator like \sum or \lim")]
    AfterOperator,
    #[strum(serialize = "inside a group or at the top level")]
    InSequence,
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum LimitedUsabilityToken {
    #[strum(serialize = r"\limits, \nolimits or \displaylimits")]
    Limits,
    #[strum(serialize = r"\displaystyle, \large, ...")]
    StyleSwitch,
}

impl MarkupErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            MarkupErrKind::UnclosedGroup(expected) => {
                "Expected token \"".to_string() + <&str>::from(expected) + "\", but not found."
            }
            MarkupErrKind::UnmatchedClose(got) => {
                "Unmatched closing token: \"".to_string() + <&str>::from(got) + "\"."
            }
            MarkupErrKind::ExpectedArgumentGotClose => {
                "Expected argument but got closing token \"}\".".to_string()
            }
            MarkupErrKind::ExpectedArgumentGotEOF => {
                "Expected argument but reached end of input.".to_string()
            }
            MarkupErrKind::DisallowedChar(got) => {
                let mut text = "Disallowed character: '".to_string();
                text.push(*got);
                text += "'.";
                text
            }
            MarkupErrKind::UnknownCommand(cmd) => {
                "Unknown command \"\\".to_string() + cmd + "\"."
            }
            MarkupErrKind::CannotBeUsedHere { got, correct_place } => {
                "Got \"".to_string()
                    + <&str>::from(got)
                    + "\", which may only appear "
                    + <&str>::from(correct_place)
                    + "."
            }
            MarkupErrKind::BoundFollowedByBound => {
                "'^' or '_' directly followed by '^' or '_'.".to_string()
            }
            MarkupErrKind::DuplicateSubOrSup => "Duplicate subscript or superscript.".to_string(),
            MarkupErrKind::ExpectedText(place) => "Expected text in ".to_string() + place + ".",
            MarkupErrKind::InvalidOperatorName(name) => {
                "Invalid operator name: \"".to_string() + name + "\"."
            }
            MarkupErrKind::HardLimitExceeded => {
                "Hard limit exceeded. Please simplify your formula.".to_string()
            }
        }
    }
}

impl MarkupError {
    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

#[cfg(feature = "ariadne")]
impl MarkupError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            MarkupErrKind::UnclosedGroup(expected) => {
                format!("expected \"{}\" to close this group", <&str>::from(expected))
            }
            MarkupErrKind::UnmatchedClose(got) => format!("unmatched \"{}\"", <&str>::from(got)),
            MarkupErrKind::ExpectedArgumentGotClose | MarkupErrKind::ExpectedArgumentGotEOF => {
                "expected an argument here".into()
            }
            MarkupErrKind::DisallowedChar(_) => "disallowed character".into(),
            MarkupErrKind::UnknownCommand(_) => "unknown command".into(),
            MarkupErrKind::CannotBeUsedHere { correct_place, .. } => {
                format!("may only appear {}", <&str>::from(correct_place))
            }
            MarkupErrKind::BoundFollowedByBound => "unexpected bound".into(),
            MarkupErrKind::DuplicateSubOrSup => "duplicate".into(),
            MarkupErrKind::ExpectedText(place) => format!("expected text in {place}"),
            MarkupErrKind::InvalidOperatorName(_) => "invalid name here".into(),
            MarkupErrKind::HardLimitExceeded => "limit exceeded".into(),
        };

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(ReportKind::Error, (source_name, self.0.start..self.0.start))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0.clone())).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.start, self.1.string())
    }
}

impl std::error::Error for MarkupError {}
