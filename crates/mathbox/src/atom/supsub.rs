//! Attaching scripts to a base: TeX rules 13a and 18a-f.

use box_model::boxes::{BoxClasses, BoxContent, BoxType, MathBox};
use box_model::vlist::{VListChild, VListElem, VListParam, make_vlist};

use super::{Atom, render_list};
use crate::context::{Context, ScopeKind};

/// A script rendered in its own scope, in the em of the base's context.
struct Script {
    b: MathBox,
    /// `supDrop` or `subDrop` of the script's font, in the em of the base's context.
    drop: f64,
}

fn render_script(context: &Context<'_>, atoms: &[Atom], scope: ScopeKind) -> Script {
    let nested = Context::new(context, None, scope);
    let metrics = nested.metrics();
    let drop = match scope {
        ScopeKind::Superscript => metrics.sup_drop,
        _ => metrics.sub_drop,
    } * nested.scaling_factor();
    let b = render_list(&nested, atoms).unwrap_or_else(|| MathBox::empty(BoxType::Ord));
    Script {
        b: nested.wrap(b),
        drop,
    }
}

/// A single character, as opposed to an operator or a composite base.
fn is_character_box(base: &MathBox) -> bool {
    match &base.content {
        BoxContent::Glyph { text, .. } => {
            base.box_type != BoxType::Op && text.chars().nth(1).is_none()
        }
        _ => false,
    }
}

impl Atom {
    /// Place the scripts of this atom to the right of `base`, raised and lowered.
    pub(super) fn attach_supsub(&self, context: &Context<'_>, base: MathBox) -> MathBox {
        let sup = self
            .superscript
            .as_deref()
            .map(|atoms| render_script(context, atoms, ScopeKind::Superscript));
        let sub = self
            .subscript
            .as_deref()
            .map(|atoms| render_script(context, atoms, ScopeKind::Subscript));
        if sup.is_none() && sub.is_none() {
            return base;
        }

        let metrics = context.metrics();
        let scriptspace = context.get_register_as_em("scriptspace").unwrap_or(0.0);
        let is_char = is_character_box(&base);

        // Rule 18a.
        let mut sup_shift = match &sup {
            Some(sup) if !is_char => base.effective_height() - sup.drop,
            _ => 0.0,
        };
        let mut sub_shift = match &sub {
            Some(sub) if !is_char => base.effective_depth() + sub.drop,
            _ => 0.0,
        };

        // Operator symbols already advance by their italic correction.
        let (sup_margin, sub_margin) = match &base.content {
            BoxContent::Glyph { .. } if base.classes.contains(BoxClasses::OP_SYMBOL) => {
                (0.0, -base.right)
            }
            BoxContent::Glyph { .. } => (base.italic, 0.0),
            _ => (0.0, 0.0),
        };

        let min_sup_shift = if context.is_display_style() && !context.is_cramped() {
            metrics.sup1
        } else if context.is_cramped() {
            metrics.sup3
        } else {
            metrics.sup2
        };

        let mut children: Vec<VListElem> = Vec::with_capacity(2);
        match (sup, sub) {
            (Some(Script { b: mut sup, .. }), None) => {
                // Rule 18c.
                sup_shift = sup_shift
                    .max(min_sup_shift)
                    .max(sup.depth + 0.25 * metrics.x_height);
                sup.right = scriptspace;
                children.push(VListChild::shifted(sup, -sup_shift, sup_margin).into());
            }
            (None, Some(Script { b: mut sub, .. })) => {
                // Rule 18b.
                sub_shift = sub_shift
                    .max(metrics.sub1)
                    .max(sub.height - 0.8 * metrics.x_height);
                sub.right = scriptspace;
                children.push(VListChild::shifted(sub, sub_shift, sub_margin).into());
            }
            (Some(Script { b: mut sup, .. }), Some(Script { b: mut sub, .. })) => {
                sup_shift = sup_shift
                    .max(min_sup_shift)
                    .max(sup.depth + 0.25 * metrics.x_height);
                // Rule 18e.
                sub_shift = sub_shift.max(metrics.sub2);
                let rule_thickness = metrics.default_rule_thickness;
                let gap = (sup_shift - sup.depth) - (sub.height - sub_shift);
                if gap < 4.0 * rule_thickness {
                    sub_shift = 4.0 * rule_thickness - (sup_shift - sup.depth) + sub.height;
                    let psi = 0.8 * metrics.x_height - (sup_shift - sup.depth);
                    if psi > 0.0 {
                        sup_shift += psi;
                        sub_shift -= psi;
                    }
                }
                sup.right = scriptspace;
                sub.right = scriptspace;
                children.push(VListChild::shifted(sub, sub_shift, sub_margin).into());
                children.push(VListChild::shifted(sup, -sup_shift, sup_margin).into());
            }
            (None, None) => return base,
        }

        let mut scripts = make_vlist(VListParam::IndividualShift, children, BoxType::Ignore);
        scripts.classes |= BoxClasses::MSUBSUP;
        let box_type = base.box_type;
        MathBox::row(vec![base, scripts], box_type)
    }

    /// Stack the scripts of an operator above and below it (rule 13a).
    ///
    /// `base_shift` moves the base down so that it is centered on the axis, `slant` moves the
    /// superscript right and the subscript left.
    pub(super) fn make_limits_stack(
        &self,
        context: &Context<'_>,
        base: MathBox,
        base_shift: f64,
        slant: f64,
    ) -> MathBox {
        let metrics = context.metrics();
        let sup = self
            .superscript
            .as_deref()
            .map(|atoms| render_script(context, atoms, ScopeKind::Superscript).b);
        let sub = self
            .subscript
            .as_deref()
            .map(|atoms| render_script(context, atoms, ScopeKind::Subscript).b);

        let sup_kern =
            |sup: &MathBox| metrics.big_op_spacing1.max(metrics.big_op_spacing3 - sup.depth);
        let sub_kern =
            |sub: &MathBox| metrics.big_op_spacing2.max(metrics.big_op_spacing4 - sub.height);
        let padding = metrics.big_op_spacing5;

        let (param, elems): (VListParam, Vec<VListElem>) = match (sup, sub) {
            (Some(sup), Some(sub)) => {
                let below = sub_kern(&sub);
                let above = sup_kern(&sup);
                let bottom = padding + sub.height + sub.depth + below + base.depth + base_shift;
                (
                    VListParam::Bottom(bottom),
                    vec![
                        VListElem::Kern(padding),
                        VListChild::centered(sub, -slant / 2.0).into(),
                        VListElem::Kern(below),
                        VListChild::centered(base, 0.0).into(),
                        VListElem::Kern(above),
                        VListChild::centered(sup, slant / 2.0).into(),
                        VListElem::Kern(padding),
                    ],
                )
            }
            (None, Some(sub)) => {
                let below = sub_kern(&sub);
                let top = base.height - base_shift;
                (
                    VListParam::Top(top),
                    vec![
                        VListElem::Kern(padding),
                        VListChild::centered(sub, -slant / 2.0).into(),
                        VListElem::Kern(below),
                        VListChild::centered(base, 0.0).into(),
                    ],
                )
            }
            (Some(sup), None) => {
                let above = sup_kern(&sup);
                let bottom = base.depth + base_shift;
                (
                    VListParam::Bottom(bottom),
                    vec![
                        VListChild::centered(base, 0.0).into(),
                        VListElem::Kern(above),
                        VListChild::centered(sup, slant / 2.0).into(),
                        VListElem::Kern(padding),
                    ],
                )
            }
            (None, None) => return base,
        };
        let mut stack = make_vlist(param, elems, BoxType::Op);
        stack.classes |= BoxClasses::LIMITS;
        stack
    }
}

#[cfg(test)]
mod tests {
    use box_model::mathstyle::Mathstyle;

    use super::*;
    use crate::atom::AtomType;
    use crate::context::{GlobalContext, LetterShapeStyle};
    use crate::registers::default_registers;

    fn letter(ch: &str) -> Atom {
        Atom::symbol(AtomType::Mord, None, ch)
    }

    fn scripts(b: &MathBox) -> &MathBox {
        let BoxContent::Row { children } = &b.content else {
            panic!("expected a row");
        };
        &children[1]
    }

    fn stack_shifts(b: &MathBox) -> Vec<f64> {
        let BoxContent::Stack { children } = &b.content else {
            panic!("expected a stack");
        };
        children.iter().map(|c| c.shift).collect()
    }

    #[test]
    fn superscript_on_a_letter() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atom = letter("x").with_scripts(Some(vec![letter("2")]), None);
        let Some(b) = atom.render(&root) else {
            panic!("expected a box");
        };
        let scripts = scripts(&b);
        assert!(scripts.classes.contains(BoxClasses::MSUBSUP));
        // A character base is not dropped: the shift is sup2 of the text size.
        let shifts = stack_shifts(scripts);
        assert!((shifts[0] - root.metrics().sup2).abs() < 1e-9);
        assert!(b.height > 0.43056);
    }

    #[test]
    fn both_scripts_keep_their_distance() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Display,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atom = letter("x").with_scripts(Some(vec![letter("y")]), Some(vec![letter("y")]));
        let Some(b) = atom.render(&root) else {
            panic!("expected a box");
        };
        let BoxContent::Stack { children } = &scripts(&b).content else {
            panic!("expected a stack");
        };
        let (sub, sup) = (&children[0], &children[1]);
        let gap = (sup.shift - sup.element.depth) - (sub.shift + sub.element.height);
        assert!(gap >= 4.0 * root.metrics().default_rule_thickness - 1e-9);
        assert_eq!(sub.element.right, sup.element.right);
    }

    #[test]
    fn empty_script_branch() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atom = letter("x").with_scripts(None, Some(Vec::new()));
        let Some(b) = atom.render(&root) else {
            panic!("expected a box");
        };
        assert_eq!(b.children().count(), 2);
        assert!((b.height - 0.43056).abs() < 1e-9);
    }

    #[test]
    fn italic_correction_moves_superscript() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atom = letter("f").with_scripts(Some(vec![letter("2")]), Some(vec![letter("2")]));
        let Some(b) = atom.render(&root) else {
            panic!("expected a box");
        };
        let BoxContent::Stack { children } = &scripts(&b).content else {
            panic!("expected a stack");
        };
        assert_eq!(children[0].margin_left, 0.0);
        assert!((children[1].margin_left - 0.10764).abs() < 1e-9);
    }
}
