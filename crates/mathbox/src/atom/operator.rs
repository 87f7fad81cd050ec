//! Operators: large symbols, named operators and `\mathop` (TeX rule 13).

use box_model::boxes::{BoxClasses, BoxType, MathBox};
use box_model::font_metrics::{AXIS_HEIGHT, FontFamily};

use super::{Atom, OperatorInfo, SubsupPlacement, render_list};
use crate::context::{Context, LetterShapeStyle};

/// The font of a named operator. Operator names are upright unless their variant asks
/// otherwise.
fn operator_font(info: &OperatorInfo, shape: LetterShapeStyle) -> FontFamily {
    match (info.variant.as_deref(), info.variant_style.as_deref()) {
        (_, Some("italic" | "bolditalic")) => FontFamily::MathItalic,
        (Some("math"), None) if shape != LetterShapeStyle::Upright => FontFamily::MathItalic,
        _ => FontFamily::MainRegular,
    }
}

impl Atom {
    pub(super) fn create_operator_box(
        &self,
        context: &Context<'_>,
        info: &OperatorInfo,
    ) -> Option<MathBox> {
        let mut base_shift = 0.0;
        let mut slant = 0.0;
        let mut base = if info.is_extensible_symbol {
            let symbol = self.value.as_deref()?;
            let command = self.command.as_deref().unwrap_or(symbol);
            let large = context.is_display_style() && !context.is_small_operator(command);
            log::debug!(
                "{command}: {} symbol in {:?}",
                if large { "large" } else { "small" },
                context.mathstyle()
            );
            let (font, size_class) = if large {
                (FontFamily::Size2Regular, BoxClasses::LARGE_OP)
            } else {
                (FontFamily::Size1Regular, BoxClasses::SMALL_OP)
            };
            let mut b = MathBox::glyph(symbol, font, BoxType::Op);
            b.classes |= BoxClasses::OP_SYMBOL | size_class;
            b.right = b.italic;
            // Center the symbol on the axis.
            base_shift = (b.height - b.depth) / 2.0 - AXIS_HEIGHT * context.scaling_factor();
            slant = b.italic;
            b
        } else if let Some(body) = &self.body {
            // An empty body still carries its scripts.
            let mut b = match render_list(context, body) {
                Some(b) => b,
                None if self.has_scripts() => MathBox::empty(BoxType::Op),
                None => return None,
            };
            b.box_type = BoxType::Op;
            b
        } else {
            let name = self.value.as_deref()?;
            let font = operator_font(info, context.letter_shape_style());
            MathBox::glyph(name, font, BoxType::Op)
        };

        let limits = self.has_scripts()
            && match self.subsup_placement {
                SubsupPlacement::OverUnder => true,
                SubsupPlacement::Auto => context.is_display_style(),
                SubsupPlacement::Adjacent => false,
            };
        if self.has_scripts() {
            log::trace!(
                "{}: scripts {}",
                self.command.as_deref().unwrap_or_default(),
                if limits { "over and under" } else { "adjacent" }
            );
        }

        let result = if limits {
            self.make_limits_stack(context, base, base_shift, slant)
        } else {
            if info.is_extensible_symbol {
                base.set_top(base_shift);
            }
            self.attach_supsub(context, base)
        };

        let mut group = MathBox::row(vec![self.bind(context, result)], BoxType::Op);
        group.classes |= BoxClasses::OP_GROUP;
        Some(group)
    }
}
