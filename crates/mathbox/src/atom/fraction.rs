//! Fractions (TeX rule 15).

use box_model::boxes::{BoxClasses, BoxType, MathBox};
use box_model::mathstyle::MathstyleName;
use box_model::vlist::{VListChild, VListParam, make_vlist};

use super::{Atom, render_in_scope};
use crate::context::{Context, ScopeKind};

impl Atom {
    pub(super) fn create_fraction_box(
        &self,
        context: &Context<'_>,
        above: &[Atom],
        below: &[Atom],
        mathstyle: Option<MathstyleName>,
    ) -> Option<MathBox> {
        let scope = mathstyle.map_or(ScopeKind::Auto, ScopeKind::Explicit);
        let frac = Context::new(context, None, scope);
        let numer = render_in_scope(&frac, above, ScopeKind::Numerator);
        let denom = render_in_scope(&frac, below, ScopeKind::Denominator);

        let metrics = frac.metrics();
        let rule = metrics.default_rule_thickness;
        let axis = metrics.axis_height;
        let (mut numer_shift, clearance, mut denom_shift) = if frac.is_display_style() {
            (metrics.num1, 3.0 * rule, metrics.denom1)
        } else {
            (metrics.num2, rule, metrics.denom2)
        };

        // Rule 15d.
        let numer_gap = (numer_shift - numer.depth) - (axis + rule / 2.0);
        if numer_gap < clearance {
            numer_shift += clearance - numer_gap;
        }
        let denom_gap = (axis - rule / 2.0) - (denom.height - denom_shift);
        if denom_gap < clearance {
            denom_shift += clearance - denom_gap;
        }

        let width = numer.advance().max(denom.advance());
        let mut bar = MathBox::rule(width, rule);
        bar.classes |= BoxClasses::FRAC_LINE;

        let centered = |element: MathBox, shift: f64| VListChild {
            center: true,
            ..VListChild::shifted(element, shift, 0.0)
        };
        let stack = make_vlist(
            VListParam::IndividualShift,
            vec![
                centered(denom, denom_shift).into(),
                centered(bar, -(axis - rule / 2.0)).into(),
                centered(numer, -numer_shift).into(),
            ],
            BoxType::Inner,
        );
        let stack = frac.wrap(stack);

        let null_delimiter = context
            .get_register_as_em("nulldelimiterspace")
            .unwrap_or(0.0);
        let mut b = MathBox::row(
            vec![
                MathBox::kern(null_delimiter),
                stack,
                MathBox::kern(null_delimiter),
            ],
            BoxType::Inner,
        );
        b.classes |= BoxClasses::MFRAC;
        let b = self.bind(context, b);
        Some(self.attach_supsub(context, b))
    }
}

#[cfg(test)]
mod tests {
    use box_model::boxes::BoxContent;
    use box_model::mathstyle::Mathstyle;

    use super::*;
    use crate::atom::AtomType;
    use crate::context::{GlobalContext, LetterShapeStyle};
    use crate::registers::default_registers;

    fn stack(b: &MathBox) -> &MathBox {
        let BoxContent::Row { children } = &b.content else {
            panic!("expected a row");
        };
        &children[1]
    }

    fn frac(mathstyle: Option<MathstyleName>) -> Atom {
        Atom::fraction(
            "\\frac",
            vec![Atom::symbol(AtomType::Mord, None, "1")],
            vec![Atom::symbol(AtomType::Mord, None, "2")],
            mathstyle,
        )
    }

    #[test]
    fn bar_sits_on_the_axis() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let Some(b) = frac(None).render(&root) else {
            panic!("expected a box");
        };
        assert!(b.classes.contains(BoxClasses::MFRAC));
        assert_eq!(b.box_type, BoxType::Inner);
        let BoxContent::Stack { children } = &stack(&b).content else {
            panic!("expected a stack");
        };
        let metrics = root.metrics();
        let bar = &children[1];
        assert!(bar.element.classes.contains(BoxClasses::FRAC_LINE));
        let bar_center = bar.shift + bar.element.height / 2.0;
        assert!((bar_center - metrics.axis_height).abs() < 1e-9);
        // Padded by the null delimiter space on both sides.
        assert!((b.width - stack(&b).width - 0.24).abs() < 1e-9);
    }

    #[test]
    fn display_fractions_are_taller() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let text = frac(None).render(&root);
        let display = frac(Some(MathstyleName::Displaystyle)).render(&root);
        let (Some(text), Some(display)) = (text, display) else {
            panic!("expected boxes");
        };
        assert!(display.height > text.height);
        assert!(display.depth > text.depth);
    }

    #[test]
    fn empty_numerator() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atom = Atom::fraction("\\frac", Vec::new(), Vec::new(), None);
        let Some(b) = atom.render(&root) else {
            panic!("expected a box");
        };
        assert!((b.width - 0.24).abs() < 1e-9);
        assert!(b.height > 0.0);
    }
}
