//! Atom trees back to markup.

use box_model::mathstyle::MathstyleName;

use crate::atom::{Atom, AtomKind, FontSize};
use crate::commands::size_command;

#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Leave out color and size commands.
    pub skip_styles: bool,
}

/// Whether `s` ends with a control word like `\alpha`.
fn ends_with_control_word(s: &str) -> bool {
    let trimmed = s.trim_end_matches(|ch: char| ch.is_ascii_alphabetic());
    trimmed.len() < s.len() && trimmed.ends_with('\\')
}

/// Concatenate markup fragments, separating a control word from a following letter or `*`,
/// which would otherwise be read as part of the command name.
pub fn join_latex<S: AsRef<str>>(fragments: impl IntoIterator<Item = S>) -> String {
    let mut result = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        if ends_with_control_word(&result)
            && fragment.starts_with(|ch: char| ch.is_ascii_alphabetic() || ch == '*')
        {
            result.push(' ');
        }
        result.push_str(fragment);
    }
    result
}

pub fn serialize_list(atoms: &[Atom], options: SerializeOptions) -> String {
    join_latex(atoms.iter().map(|atom| atom.serialize(options)))
}

fn script(s: &mut String, marker: char, branch: &str) {
    s.push(marker);
    if branch.chars().count() == 1 {
        s.push_str(branch);
    } else {
        s.push('{');
        s.push_str(branch);
        s.push('}');
    }
}

impl Atom {
    /// The markup of the scripts of this atom: subscript first, then superscript.
    pub fn supsub_to_latex(&self, options: SerializeOptions) -> String {
        let mut s = String::new();
        if let Some(subscript) = &self.subscript {
            script(&mut s, '_', &serialize_list(subscript, options));
        }
        if let Some(superscript) = &self.superscript {
            script(&mut s, '^', &serialize_list(superscript, options));
        }
        s
    }

    fn body_to_latex(&self, options: SerializeOptions) -> String {
        match &self.body {
            Some(body) => serialize_list(body, options),
            None => self.value.clone().unwrap_or_default(),
        }
    }

    /// The canonical markup of this atom, including its scripts.
    pub fn serialize(&self, options: SerializeOptions) -> String {
        let mut result: Vec<String> = Vec::new();
        match &self.kind {
            AtomKind::Symbol => {
                result.extend(self.command.clone().or_else(|| self.value.clone()));
            }
            AtomKind::Operator(info) => {
                if self.is_zero_width_operator() {
                    return self.supsub_to_latex(options);
                }
                result.extend(self.command.clone());
                if info.has_argument {
                    result.push(format!("{{{}}}", self.body_to_latex(options)));
                }
                if self.explicit_subsup_placement {
                    result.push(self.subsup_placement.command().to_string());
                }
            }
            AtomKind::Group { mathstyle } => {
                result.push(self.group_to_latex(*mathstyle, options));
            }
            AtomKind::Fraction { above, below, .. } => {
                result.extend(self.command.clone());
                result.push(format!(
                    "{{{}}}{{{}}}",
                    serialize_list(above, options),
                    serialize_list(below, options)
                ));
            }
            AtomKind::Phantom(kind) => {
                result.push(kind.command().to_string());
                result.push(format!("{{{}}}", self.body_to_latex(options)));
            }
        }
        result.push(self.supsub_to_latex(options));
        join_latex(result)
    }

    fn group_to_latex(
        &self,
        mathstyle: Option<MathstyleName>,
        options: SerializeOptions,
    ) -> String {
        let mut body = self.body_to_latex(options);
        let size = match self.style.font_size {
            Some(FontSize::Size(size)) if !options.skip_styles => size_command(size),
            _ => None,
        };
        let color = self.style.color.as_deref().filter(|_| !options.skip_styles);
        let background = self
            .style
            .background_color
            .as_deref()
            .filter(|_| !options.skip_styles);

        if mathstyle.is_none() && size.is_none() && color.is_none() && background.is_none() {
            return format!("{{{body}}}");
        }
        if let Some(size) = size {
            body = join_latex([size, body.as_str()]);
        }
        if let Some(mathstyle) = mathstyle {
            body = join_latex([format!("\\{}", mathstyle.as_str()), body]);
        }
        if let Some(color) = color {
            body = format!("\\textcolor{{{color}}}{{{body}}}");
        }
        if let Some(background) = background {
            body = format!("\\colorbox{{{background}}}{{{body}}}");
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{AtomType, PhantomKind, Style, SubsupPlacement};

    fn letter(ch: &str) -> Atom {
        Atom::symbol(AtomType::Mord, None, ch)
    }

    #[test]
    fn control_words_are_separated_from_letters() {
        assert_eq!(join_latex(["\\sin", "x"]), "\\sin x");
        assert_eq!(join_latex(["\\sum", "_{k}"]), "\\sum_{k}");
        assert_eq!(join_latex(["\\\\", "x"]), "\\\\x");
        assert_eq!(join_latex(["a", "", "b"]), "ab");
        assert_eq!(join_latex(["\\lim", "*", "x"]), "\\lim *x");
        assert_eq!(join_latex(["\\operatorname*{sn}", "*"]), "\\operatorname*{sn}*");
    }

    #[test]
    fn operator_with_explicit_limits() {
        let atom = Atom::extensible_operator("\\sum", "∑", SubsupPlacement::Auto)
            .with_explicit_placement(SubsupPlacement::Adjacent)
            .with_scripts(Some(vec![letter("n")]), Some(vec![letter("k"), letter("=")]));
        assert_eq!(
            atom.serialize(SerializeOptions::default()),
            "\\sum\\nolimits_{k=}^n"
        );
    }

    #[test]
    fn implicit_limits_are_not_written() {
        let atom = Atom::extensible_operator("\\int", "∫", SubsupPlacement::Adjacent)
            .with_scripts(None, Some(vec![letter("0")]));
        assert_eq!(atom.serialize(SerializeOptions::default()), "\\int_0");
    }

    #[test]
    fn zero_width_operator_writes_only_its_scripts() {
        let atom = Atom::zero_width_operator().with_scripts(Some(vec![letter("2")]), None);
        assert_eq!(atom.serialize(SerializeOptions::default()), "^2");
    }

    #[test]
    fn operator_with_argument() {
        let atom = Atom::named_operator("\\operatorname", "sn", SubsupPlacement::Adjacent);
        let atom = Atom {
            kind: AtomKind::Operator(crate::atom::OperatorInfo {
                has_argument: true,
                ..Default::default()
            }),
            ..atom
        };
        assert_eq!(atom.serialize(SerializeOptions::default()), "\\operatorname{sn}");
        let mathop = Atom::body_operator("\\mathop", vec![letter("x")], true, SubsupPlacement::Auto);
        assert_eq!(mathop.serialize(SerializeOptions::default()), "\\mathop{x}");
    }

    #[test]
    fn groups() {
        let options = SerializeOptions::default();
        let plain = Atom::group(vec![letter("x")], Style::default(), None);
        assert_eq!(plain.serialize(options), "{x}");

        let styled = Atom::group(
            vec![letter("x")],
            Style {
                color: Some("red".to_string()),
                font_size: Some(FontSize::Size(7)),
                ..Default::default()
            },
            Some(MathstyleName::Displaystyle),
        );
        assert_eq!(
            styled.serialize(options),
            "\\textcolor{red}{\\displaystyle\\Large x}"
        );
        assert_eq!(styled.serialize(SerializeOptions { skip_styles: true }), "\\displaystyle x");
    }

    #[test]
    fn fractions_and_phantoms() {
        let options = SerializeOptions::default();
        let frac = Atom::fraction("\\dfrac", vec![letter("1")], vec![letter("2")], None);
        assert_eq!(frac.serialize(options), "\\dfrac{1}{2}");
        let phantom = Atom::phantom(vec![letter("x")], PhantomKind::VPhantom);
        assert_eq!(phantom.serialize(options), "\\vphantom{x}");
    }
}
