//! Vertical lists.
//!
//! Children are given bottom to top. Kerns between them are explicit. The parameter decides
//! where the baseline of the resulting stack lies. The extents of the stack are never
//! negative, even if all children lie above (or below) the baseline.

use crate::boxes::{BoxContent, BoxType, MathBox, StackChild};

#[derive(Debug, Clone, PartialEq)]
pub struct VListChild {
    pub element: MathBox,
    pub margin_left: f64,
    /// Center the child within the stack's width (before applying `margin_left`).
    pub center: bool,
    /// Downward shift of the child's baseline. Only used with [`VListParam::IndividualShift`].
    pub shift: f64,
}

impl VListChild {
    pub fn new(element: MathBox) -> Self {
        VListChild {
            element,
            margin_left: 0.0,
            center: false,
            shift: 0.0,
        }
    }

    pub fn centered(element: MathBox, margin_left: f64) -> Self {
        VListChild {
            element,
            margin_left,
            center: true,
            shift: 0.0,
        }
    }

    pub fn shifted(element: MathBox, shift: f64, margin_left: f64) -> Self {
        VListChild {
            element,
            margin_left,
            center: false,
            shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VListElem {
    Child(VListChild),
    Kern(f64),
}

impl From<MathBox> for VListElem {
    fn from(element: MathBox) -> Self {
        VListElem::Child(VListChild::new(element))
    }
}

impl From<VListChild> for VListElem {
    fn from(child: VListChild) -> Self {
        VListElem::Child(child)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VListParam {
    /// Every child carries its own baseline shift. No kerns are allowed.
    IndividualShift,
    /// The top of the stack is `amount` above the baseline.
    Top(f64),
    /// The bottom of the stack is `amount` below the baseline.
    Bottom(f64),
    /// The baseline is `amount` below the baseline of the first child.
    Shift(f64),
    /// The baseline is the baseline of the first child.
    FirstBaseline,
}

fn extent(elem: &VListElem) -> f64 {
    match elem {
        VListElem::Child(child) => child.element.height + child.element.depth,
        VListElem::Kern(kern) => *kern,
    }
}

fn first_depth(elems: &[VListElem]) -> f64 {
    match elems.first() {
        Some(VListElem::Child(child)) => child.element.effective_depth(),
        _ => {
            debug_assert!(false, "the first element of a shifted vlist must be a box");
            0.0
        }
    }
}

/// Stack `elems` vertically.
pub fn make_vlist(param: VListParam, elems: Vec<VListElem>, box_type: BoxType) -> MathBox {
    let mut min_pos = f64::INFINITY;
    let mut max_pos = f64::NEG_INFINITY;
    let mut children: Vec<(StackChild, bool)> = Vec::with_capacity(elems.len());

    if let VListParam::IndividualShift = param {
        for elem in elems {
            let VListElem::Child(child) = elem else {
                debug_assert!(false, "kerns are not allowed with individual shifts");
                continue;
            };
            let pos = -child.shift;
            min_pos = min_pos.min(pos - child.element.effective_depth());
            max_pos = max_pos.max(pos + child.element.effective_height());
            children.push((
                StackChild {
                    element: child.element,
                    shift: pos,
                    margin_left: child.margin_left,
                },
                child.center,
            ));
        }
    } else {
        let bottom = match param {
            VListParam::Top(amount) => amount - elems.iter().map(extent).sum::<f64>(),
            VListParam::Bottom(amount) => -amount,
            VListParam::Shift(amount) => -first_depth(&elems) - amount,
            VListParam::FirstBaseline | VListParam::IndividualShift => -first_depth(&elems),
        };
        let mut curr_pos = bottom;
        min_pos = bottom;
        max_pos = bottom;
        for elem in elems {
            match elem {
                VListElem::Kern(kern) => curr_pos += kern,
                VListElem::Child(child) => {
                    let shift = curr_pos + child.element.effective_depth();
                    curr_pos += child.element.height + child.element.depth;
                    children.push((
                        StackChild {
                            element: child.element,
                            shift,
                            margin_left: child.margin_left,
                        },
                        child.center,
                    ));
                }
            }
            min_pos = min_pos.min(curr_pos);
            max_pos = max_pos.max(curr_pos);
        }
    }

    let width = children
        .iter()
        .map(|(child, _)| child.margin_left + child.element.advance())
        .fold(0.0_f64, f64::max);
    let children = children
        .into_iter()
        .map(|(mut child, center)| {
            if center {
                child.margin_left += (width - child.element.advance()) / 2.0;
            }
            child
        })
        .collect();

    MathBox {
        content: BoxContent::Stack { children },
        box_type,
        width,
        height: if max_pos.is_finite() { max_pos.max(0.0) } else { 0.0 },
        depth: if min_pos.is_finite() { (-min_pos).max(0.0) } else { 0.0 },
        ..Default::default()
    }
}
