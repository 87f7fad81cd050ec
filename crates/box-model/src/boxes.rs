use std::fmt::Write;

use bitflags::bitflags;
use strum_macros::IntoStaticStr;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::fmt::{new_line_and_indent, push_em};
use crate::font_metrics::{FontFamily, get_character_metrics};

/// The spacing class of a box. Inter-atom spacing is looked up from the classes of adjacent
/// boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoxType {
    #[default]
    #[strum(serialize = "mord")]
    Ord,
    #[strum(serialize = "mbin")]
    Bin,
    #[strum(serialize = "mrel")]
    Rel,
    #[strum(serialize = "mopen")]
    Open,
    #[strum(serialize = "mclose")]
    Close,
    #[strum(serialize = "mpunct")]
    Punct,
    #[strum(serialize = "minner")]
    Inner,
    #[strum(serialize = "mop")]
    Op,
    /// Kerns and other boxes that take no part in spacing.
    #[strum(serialize = "ignore")]
    Ignore,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct BoxClasses: u16 {
        const OP_SYMBOL = 1;
        const LARGE_OP = 1 << 1;
        const SMALL_OP = 1 << 2;
        /// An operator together with its limits or scripts; selected as one unit.
        const OP_GROUP = 1 << 3;
        const MSUBSUP = 1 << 4;
        const MFRAC = 1 << 5;
        const FRAC_LINE = 1 << 6;
        const LIMITS = 1 << 7;
        const PHANTOM = 1 << 8;
        const SELECTED = 1 << 9;
    }
}

impl BoxClasses {
    fn write_names(self, s: &mut String) {
        for (name, _) in self.iter_names() {
            s.push(' ');
            s.extend(
                name.chars()
                    .map(|ch| if ch == '_' { '-' } else { ch.to_ascii_lowercase() }),
            );
        }
    }
}

/// A child of a vertical stack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StackChild {
    pub element: MathBox,
    /// Position of the child's baseline above the stack's baseline.
    pub shift: f64,
    pub margin_left: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum BoxContent {
    /// No content; with a width this is a kern.
    #[default]
    Empty,
    Glyph {
        text: String,
        font: FontFamily,
    },
    Row {
        children: Vec<MathBox>,
    },
    Stack {
        children: Vec<StackChild>,
    },
    /// A filled rectangle, e.g. a fraction bar.
    Rule,
}

/// The geometric output unit of a render pass.
///
/// All lengths are in em of the font size of the enclosing box. A positive `top` moves the box
/// down without changing its intrinsic `height` and `depth`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MathBox {
    pub content: BoxContent,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub box_type: BoxType,
    pub classes: BoxClasses,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub italic: f64,
    pub top: f64,
    /// Extra space after the box.
    pub right: f64,
    /// Ratio of the content's em to the em of the enclosing box.
    pub scale: f64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub color: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub background_color: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub atom_id: Option<String>,
    pub caret: bool,
}

impl Default for MathBox {
    fn default() -> Self {
        MathBox {
            content: BoxContent::Empty,
            box_type: BoxType::Ord,
            classes: BoxClasses::empty(),
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            italic: 0.0,
            top: 0.0,
            right: 0.0,
            scale: 1.0,
            color: None,
            background_color: None,
            atom_id: None,
            caret: false,
        }
    }
}

impl MathBox {
    /// A box containing `text` set in `font`, measured from the metrics table.
    ///
    /// Height and depth are never negative, even for glyphs that sit entirely above the
    /// baseline, like `=`.
    pub fn glyph(text: &str, font: FontFamily, box_type: BoxType) -> MathBox {
        let mut b = MathBox {
            box_type,
            ..Default::default()
        };
        for ch in text.chars() {
            let metrics = get_character_metrics(ch, font);
            b.width += metrics.width;
            b.height = b.height.max(metrics.height);
            b.depth = b.depth.max(metrics.depth);
            b.italic = metrics.italic;
        }
        b.content = BoxContent::Glyph {
            text: text.to_string(),
            font,
        };
        b
    }

    /// A horizontal list. Its extents account for the `top` and `right` of the children.
    pub fn row(children: Vec<MathBox>, box_type: BoxType) -> MathBox {
        let mut width = 0.0_f64;
        let mut height = 0.0_f64;
        let mut depth = 0.0_f64;
        for child in &children {
            width += child.advance();
            height = height.max(child.effective_height());
            depth = depth.max(child.effective_depth());
        }
        let italic = children.last().map_or(0.0, |last| last.italic);
        MathBox {
            content: BoxContent::Row { children },
            box_type,
            width,
            height,
            depth,
            italic,
            ..Default::default()
        }
    }

    /// A horizontal space of `width` em.
    pub fn kern(width: f64) -> MathBox {
        MathBox {
            box_type: BoxType::Ignore,
            width,
            ..Default::default()
        }
    }

    pub fn rule(width: f64, thickness: f64) -> MathBox {
        MathBox {
            content: BoxContent::Rule,
            box_type: BoxType::Ignore,
            width,
            height: thickness,
            ..Default::default()
        }
    }

    /// An empty box of zero size.
    pub fn empty(box_type: BoxType) -> MathBox {
        MathBox {
            box_type,
            ..Default::default()
        }
    }

    #[inline]
    pub fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    /// Height above the baseline after applying `top`.
    #[inline]
    pub fn effective_height(&self) -> f64 {
        self.height - self.top
    }

    /// Depth below the baseline after applying `top`.
    #[inline]
    pub fn effective_depth(&self) -> f64 {
        self.depth + self.top
    }

    /// Horizontal space taken up in a row.
    #[inline]
    pub fn advance(&self) -> f64 {
        self.width + self.right
    }

    pub fn is_glyph(&self, text: &str) -> bool {
        matches!(&self.content, BoxContent::Glyph { text: t, .. } if t == text)
    }

    pub fn children(&self) -> impl Iterator<Item = &MathBox> {
        let (row, stack): (&[MathBox], &[StackChild]) = match &self.content {
            BoxContent::Row { children } => (children, &[]),
            BoxContent::Stack { children } => (&[], children),
            _ => (&[], &[]),
        };
        row.iter().chain(stack.iter().map(|child| &child.element))
    }

    /// Express this box in an em that is `1 / factor` times the current one.
    pub fn rescale(&mut self, factor: f64) {
        if factor == 1.0 {
            return;
        }
        self.width *= factor;
        self.height *= factor;
        self.depth *= factor;
        self.italic *= factor;
        self.top *= factor;
        self.right *= factor;
        self.scale *= factor;
    }

    /// Find the first box bound to `atom_id`, depth first.
    pub fn find_by_atom_id(&self, atom_id: &str) -> Option<&MathBox> {
        if self.atom_id.as_deref() == Some(atom_id) {
            return Some(self);
        }
        self.children()
            .find_map(|child| child.find_by_atom_id(atom_id))
    }

    /// Write a readable dump of the box tree, one box per line.
    pub fn emit(&self, s: &mut String, base_indent: usize) -> std::fmt::Result {
        new_line_and_indent(s, base_indent);
        self.emit_line(s)?;
        let child_indent = base_indent + 1;
        match &self.content {
            BoxContent::Row { children } => {
                for child in children {
                    child.emit(s, child_indent)?;
                }
            }
            BoxContent::Stack { children } => {
                for child in children {
                    new_line_and_indent(s, child_indent);
                    s.push_str("@ ");
                    push_em(s, child.shift);
                    if child.margin_left != 0.0 {
                        s.push_str(" ml=");
                        push_em(s, child.margin_left);
                    }
                    child.element.emit(s, child_indent + 1)?;
                }
            }
            BoxContent::Empty | BoxContent::Glyph { .. } | BoxContent::Rule => {}
        }
        Ok(())
    }

    fn emit_line(&self, s: &mut String) -> std::fmt::Result {
        s.push_str(match &self.content {
            BoxContent::Empty => "kern",
            BoxContent::Glyph { .. } => "glyph",
            BoxContent::Row { .. } => "row",
            BoxContent::Stack { .. } => "stack",
            BoxContent::Rule => "rule",
        });
        if self.box_type != BoxType::Ignore {
            s.push(' ');
            s.push_str(<&str>::from(self.box_type));
        }
        self.classes.write_names(s);
        if let BoxContent::Glyph { text, font } = &self.content {
            write!(s, " {:?} {}", text, font.as_str())?;
        }
        s.push_str(" w=");
        push_em(s, self.width);
        s.push_str(" h=");
        push_em(s, self.height);
        s.push_str(" d=");
        push_em(s, self.depth);
        for (label, value) in [(" top=", self.top), (" right=", self.right)] {
            if value != 0.0 {
                s.push_str(label);
                push_em(s, value);
            }
        }
        if self.scale != 1.0 {
            s.push_str(" scale=");
            push_em(s, self.scale);
        }
        if let Some(color) = &self.color {
            write!(s, " color={color}")?;
        }
        if let Some(background) = &self.background_color {
            write!(s, " bg={background}")?;
        }
        if let Some(id) = &self.atom_id {
            write!(s, " id={id}")?;
        }
        if self.caret {
            s.push_str(" caret");
        }
        Ok(())
    }

    /// The dump produced by [`MathBox::emit`] as a new string.
    pub fn dump(&self) -> String {
        let mut s = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.emit(&mut s, 0);
        s
    }
}
