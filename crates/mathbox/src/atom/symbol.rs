use box_model::boxes::MathBox;
use box_model::font_metrics::{FontFamily, has_glyph};

use super::{Atom, AtomType};
use crate::context::{Context, LetterShapeStyle};

fn is_upper_greek(ch: char) -> bool {
    matches!(ch, 'Α'..='Ω')
}

fn is_lower_greek(ch: char) -> bool {
    matches!(ch, 'α'..='ω' | 'ϑ' | 'ϕ' | 'ϖ' | 'ϱ' | 'ϵ')
}

/// Whether a letter is set in italic under the given letter shape style.
fn is_italic(ch: char, shape: LetterShapeStyle) -> bool {
    match shape {
        LetterShapeStyle::Tex | LetterShapeStyle::Auto => {
            ch.is_ascii_alphabetic() || is_lower_greek(ch)
        }
        LetterShapeStyle::Iso => {
            ch.is_ascii_alphabetic() || is_lower_greek(ch) || is_upper_greek(ch)
        }
        LetterShapeStyle::French => ch.is_ascii_lowercase(),
        LetterShapeStyle::Upright => false,
    }
}

/// The font a symbol is set in.
pub(super) fn symbol_font(value: &str, atom_type: AtomType, shape: LetterShapeStyle) -> FontFamily {
    let mut chars = value.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && atom_type == AtomType::Mord
        && is_italic(ch, shape)
        && has_glyph(ch, FontFamily::MathItalic)
    {
        return FontFamily::MathItalic;
    }
    FontFamily::MainRegular
}

impl Atom {
    pub(super) fn create_symbol_box(&self, context: &Context<'_>) -> Option<MathBox> {
        let value = self.value.as_deref()?;
        let font = symbol_font(value, self.atom_type, context.letter_shape_style());
        let b = MathBox::glyph(value, font, self.atom_type.box_type());
        let b = self.bind(context, b);
        Some(if self.has_scripts() {
            self.attach_supsub(context, b)
        } else {
            b
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_shapes() {
        let font = |value, shape| symbol_font(value, AtomType::Mord, shape);
        assert_eq!(font("x", LetterShapeStyle::Tex), FontFamily::MathItalic);
        assert_eq!(font("A", LetterShapeStyle::Tex), FontFamily::MathItalic);
        assert_eq!(font("α", LetterShapeStyle::Tex), FontFamily::MathItalic);
        assert_eq!(font("Γ", LetterShapeStyle::Tex), FontFamily::MainRegular);
        assert_eq!(font("A", LetterShapeStyle::French), FontFamily::MainRegular);
        assert_eq!(font("x", LetterShapeStyle::French), FontFamily::MathItalic);
        assert_eq!(font("x", LetterShapeStyle::Upright), FontFamily::MainRegular);
        assert_eq!(font("2", LetterShapeStyle::Iso), FontFamily::MainRegular);
    }

    #[test]
    fn only_ordinary_letters_are_italic() {
        assert_eq!(
            symbol_font("x", AtomType::Mbin, LetterShapeStyle::Tex),
            FontFamily::MainRegular
        );
        assert_eq!(
            symbol_font("xy", AtomType::Mord, LetterShapeStyle::Tex),
            FontFamily::MainRegular
        );
    }
}
