//! The expression tree and its rendering.
//!
//! Every node of the tree is an [`Atom`]. Rendering is top-down: each atom gets a child
//! [`Context`] built from its local style, produces a [`MathBox`] in that context's em, and the
//! box is rescaled to the parent's em on the way back up.

mod fraction;
mod group;
mod operator;
mod phantom;
mod supsub;
mod symbol;

use strum_macros::{EnumString, IntoStaticStr};

use box_model::boxes::{BoxClasses, BoxType, MathBox};
use box_model::mathstyle::MathstyleName;

use crate::context::{Context, LetterShapeStyle, ScopeKind};

/// The zero-width space. An operator with this value carries scripts that have no base.
pub const ZERO_WIDTH_SPACE: &str = "\u{200B}";

/// The semantic role of an atom. Serialized as the `type` tag of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum AtomType {
    Mord,
    Mbin,
    Mrel,
    Mopen,
    Mclose,
    Mpunct,
    Minner,
    Mop,
    Group,
    Genfrac,
    Phantom,
}

impl AtomType {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The spacing class of boxes rendered from atoms of this type.
    pub fn box_type(self) -> BoxType {
        match self {
            AtomType::Mord | AtomType::Group | AtomType::Phantom => BoxType::Ord,
            AtomType::Mbin => BoxType::Bin,
            AtomType::Mrel => BoxType::Rel,
            AtomType::Mopen => BoxType::Open,
            AtomType::Mclose => BoxType::Close,
            AtomType::Mpunct => BoxType::Punct,
            AtomType::Minner | AtomType::Genfrac => BoxType::Inner,
            AtomType::Mop => BoxType::Op,
        }
    }

    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            AtomType::Mord
                | AtomType::Mbin
                | AtomType::Mrel
                | AtomType::Mopen
                | AtomType::Mclose
                | AtomType::Mpunct
                | AtomType::Minner
        )
    }
}

/// Where the scripts of an atom go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum SubsupPlacement {
    /// Over and under in display style, adjacent otherwise.
    #[default]
    Auto,
    OverUnder,
    Adjacent,
}

impl SubsupPlacement {
    /// The command that selects this placement explicitly.
    pub fn command(self) -> &'static str {
        match self {
            SubsupPlacement::Auto => "\\displaylimits",
            SubsupPlacement::OverUnder => "\\limits",
            SubsupPlacement::Adjacent => "\\nolimits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// Inherit the size of the enclosing scope.
    Auto,
    /// A size from 1 (`\tiny`) to 10 (`\Huge`).
    Size(u8),
}

/// Local overrides applied to the scope of an atom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_size: Option<FontSize>,
    pub letter_shape_style: Option<LetterShapeStyle>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

/// The fields that only operators have.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatorInfo {
    pub variant: Option<String>,
    pub variant_style: Option<String>,
    /// The operator was written with a braced argument, e.g. `\operatorname{sn}`.
    pub has_argument: bool,
    /// A symbol that comes in a small and a large size, e.g. `\sum`.
    pub is_extensible_symbol: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhantomKind {
    /// Invisible, but takes up its full space.
    #[default]
    Phantom,
    /// Only the width is kept.
    HPhantom,
    /// Only the height and depth are kept.
    VPhantom,
}

impl PhantomKind {
    pub fn command(self) -> &'static str {
        match self {
            PhantomKind::Phantom => "\\phantom",
            PhantomKind::HPhantom => "\\hphantom",
            PhantomKind::VPhantom => "\\vphantom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtomKind {
    Symbol,
    Operator(OperatorInfo),
    Group {
        mathstyle: Option<MathstyleName>,
    },
    Fraction {
        above: Vec<Atom>,
        below: Vec<Atom>,
        mathstyle: Option<MathstyleName>,
    },
    Phantom(PhantomKind),
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub atom_type: AtomType,
    /// The command this atom was created from, e.g. `\sum`.
    pub command: Option<String>,
    pub value: Option<String>,
    pub body: Option<Vec<Atom>>,
    pub superscript: Option<Vec<Atom>>,
    pub subscript: Option<Vec<Atom>>,
    pub style: Style,
    pub is_selected: bool,
    pub caret: bool,
    pub id: Option<String>,
    pub subsup_placement: SubsupPlacement,
    /// Whether the placement was chosen with `\limits`, `\nolimits` or `\displaylimits`.
    pub explicit_subsup_placement: bool,
    pub kind: AtomKind,
}

impl Atom {
    pub(crate) fn new(atom_type: AtomType, kind: AtomKind) -> Atom {
        Atom {
            atom_type,
            command: None,
            value: None,
            body: None,
            superscript: None,
            subscript: None,
            style: Style::default(),
            is_selected: false,
            caret: false,
            id: None,
            subsup_placement: SubsupPlacement::Auto,
            explicit_subsup_placement: false,
            kind,
        }
    }

    pub fn symbol(atom_type: AtomType, command: Option<&str>, value: &str) -> Atom {
        debug_assert!(atom_type.is_symbol(), "not a symbol type: {atom_type:?}");
        Atom {
            command: command.map(str::to_string),
            value: Some(value.to_string()),
            ..Atom::new(atom_type, AtomKind::Symbol)
        }
    }

    /// A symbol operator like `\sum`, which is set larger in display style.
    pub fn extensible_operator(command: &str, symbol: &str, placement: SubsupPlacement) -> Atom {
        Atom {
            command: Some(command.to_string()),
            value: Some(symbol.to_string()),
            subsup_placement: placement,
            ..Atom::new(
                AtomType::Mop,
                AtomKind::Operator(OperatorInfo {
                    is_extensible_symbol: true,
                    ..Default::default()
                }),
            )
        }
    }

    /// An operator that is set as upright text, like `\sin`.
    pub fn named_operator(command: &str, name: &str, placement: SubsupPlacement) -> Atom {
        Atom {
            command: Some(command.to_string()),
            value: Some(name.to_string()),
            subsup_placement: placement,
            ..Atom::new(AtomType::Mop, AtomKind::Operator(OperatorInfo::default()))
        }
    }

    /// An operator whose base is an arbitrary list, like `\mathop{...}`.
    pub fn body_operator(
        command: &str,
        body: Vec<Atom>,
        has_argument: bool,
        placement: SubsupPlacement,
    ) -> Atom {
        Atom {
            command: Some(command.to_string()),
            body: Some(body),
            subsup_placement: placement,
            ..Atom::new(
                AtomType::Mop,
                AtomKind::Operator(OperatorInfo {
                    has_argument,
                    ..Default::default()
                }),
            )
        }
    }

    /// The invisible operator that carries scripts written without a base.
    pub fn zero_width_operator() -> Atom {
        Atom {
            value: Some(ZERO_WIDTH_SPACE.to_string()),
            subsup_placement: SubsupPlacement::Adjacent,
            ..Atom::new(AtomType::Mop, AtomKind::Operator(OperatorInfo::default()))
        }
    }

    pub fn group(body: Vec<Atom>, style: Style, mathstyle: Option<MathstyleName>) -> Atom {
        Atom {
            body: Some(body),
            style,
            ..Atom::new(AtomType::Group, AtomKind::Group { mathstyle })
        }
    }

    pub fn fraction(
        command: &str,
        above: Vec<Atom>,
        below: Vec<Atom>,
        mathstyle: Option<MathstyleName>,
    ) -> Atom {
        Atom {
            command: Some(command.to_string()),
            ..Atom::new(
                AtomType::Genfrac,
                AtomKind::Fraction {
                    above,
                    below,
                    mathstyle,
                },
            )
        }
    }

    pub fn phantom(body: Vec<Atom>, kind: PhantomKind) -> Atom {
        Atom {
            command: Some(kind.command().to_string()),
            body: Some(body),
            ..Atom::new(AtomType::Phantom, AtomKind::Phantom(kind))
        }
    }

    pub fn with_scripts(
        mut self,
        superscript: Option<Vec<Atom>>,
        subscript: Option<Vec<Atom>>,
    ) -> Atom {
        self.superscript = superscript;
        self.subscript = subscript;
        self
    }

    pub fn with_explicit_placement(mut self, placement: SubsupPlacement) -> Atom {
        self.subsup_placement = placement;
        self.explicit_subsup_placement = true;
        self
    }

    /// Whether this is the invisible operator that carries scripts written without a base.
    pub fn is_zero_width_operator(&self) -> bool {
        matches!(self.kind, AtomKind::Operator(_))
            && self.value.as_deref() == Some(ZERO_WIDTH_SPACE)
    }

    #[inline]
    pub fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }

    /// Render this atom in a new scope below `parent`. The box is in the parent's em.
    pub fn render(&self, parent: &Context<'_>) -> Option<MathBox> {
        let context = Context::new(parent, Some(&self.style), ScopeKind::Auto);
        let b = self.create_box(&context)?;
        Some(context.wrap(b))
    }

    /// Build the box of this atom in `context`. `None` means the atom produces nothing.
    pub fn create_box(&self, context: &Context<'_>) -> Option<MathBox> {
        match &self.kind {
            AtomKind::Symbol => self.create_symbol_box(context),
            AtomKind::Operator(info) => self.create_operator_box(context, info),
            AtomKind::Group { mathstyle } => self.create_group_box(context, *mathstyle),
            AtomKind::Fraction {
                above,
                below,
                mathstyle,
            } => self.create_fraction_box(context, above, below, *mathstyle),
            AtomKind::Phantom(kind) => self.create_phantom_box(context, *kind),
        }
    }

    /// Associate `b` with this atom: atom id, caret, selection and colors.
    pub(crate) fn bind(&self, context: &Context<'_>, mut b: MathBox) -> MathBox {
        if context.wants_atom_ids() && !context.is_phantom() {
            b.atom_id = self.id.clone().or_else(|| context.make_id());
        }
        if self.caret {
            b.caret = true;
        }
        if self.is_selected {
            b.classes |= BoxClasses::SELECTED;
        }
        if b.color.is_none() {
            b.color = context.computed_color().map(str::to_string);
        }
        if b.background_color.is_none() {
            b.background_color = context.computed_background_color().map(str::to_string);
        }
        b
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    None,
    Thin,
    TextThin,
    TextMedium,
    TextThick,
}

/// The space between two adjacent boxes (TeXbook, chapter 18).
const fn inter_atom_spacing(left: BoxType, right: BoxType) -> Spacing {
    use BoxType::*;
    use Spacing::*;
    match left {
        Ord | Close => match right {
            Op => Thin,
            Bin => TextMedium,
            Rel => TextThick,
            Inner => TextThin,
            Ord | Open | Close | Punct | Ignore => None,
        },
        Op => match right {
            Ord | Op => Thin,
            Rel => TextThick,
            Inner => TextThin,
            Bin | Open | Close | Punct | Ignore => None,
        },
        Bin => match right {
            Ord | Op | Open | Inner => TextMedium,
            Bin | Rel | Close | Punct | Ignore => None,
        },
        Rel => match right {
            Ord | Op | Open | Inner => TextThick,
            Bin | Rel | Close | Punct | Ignore => None,
        },
        Punct => match right {
            Ord | Op | Rel | Open | Close | Punct | Inner => TextThin,
            Bin | Ignore => None,
        },
        Inner => match right {
            Ord | Open | Punct | Inner => TextThin,
            Op => Thin,
            Bin => TextMedium,
            Rel => TextThick,
            Close | Ignore => None,
        },
        Open | Ignore => None,
    }
}

/// A binary operator without an operand on its left or right is an ordinary symbol.
fn demote_binary_operators(boxes: &mut [MathBox]) {
    let mut prev: Option<usize> = None;
    for idx in 0..boxes.len() {
        let current = boxes[idx].box_type;
        if current == BoxType::Ignore {
            continue;
        }
        let prev_type = prev.map(|p| boxes[p].box_type);
        match current {
            BoxType::Bin
                if matches!(
                    prev_type,
                    None | Some(
                        BoxType::Bin
                            | BoxType::Op
                            | BoxType::Rel
                            | BoxType::Open
                            | BoxType::Punct
                    )
                ) =>
            {
                boxes[idx].box_type = BoxType::Ord;
            }
            BoxType::Rel | BoxType::Close | BoxType::Punct => {
                if let Some(p) = prev
                    && boxes[p].box_type == BoxType::Bin
                {
                    boxes[p].box_type = BoxType::Ord;
                }
            }
            _ => {}
        }
        prev = Some(idx);
    }
    if let Some(p) = prev
        && boxes[p].box_type == BoxType::Bin
    {
        boxes[p].box_type = BoxType::Ord;
    }
}

fn spacing_in_em(context: &Context<'_>, spacing: Spacing) -> Option<f64> {
    let register = match spacing {
        Spacing::None => return None,
        Spacing::Thin => "thinmuskip",
        _ if context.is_tight() => return None,
        Spacing::TextThin => "thinmuskip",
        Spacing::TextMedium => "medmuskip",
        Spacing::TextThick => "thickmuskip",
    };
    context
        .get_register_as_em(register)
        .filter(|&em| em != 0.0)
}

/// Render a list of atoms as one row, with inter-atom spacing. `None` if nothing was rendered.
pub fn render_list(context: &Context<'_>, atoms: &[Atom]) -> Option<MathBox> {
    let mut boxes: Vec<MathBox> = atoms.iter().filter_map(|atom| atom.render(context)).collect();
    if boxes.is_empty() {
        return None;
    }
    demote_binary_operators(&mut boxes);

    let mut children = Vec::with_capacity(boxes.len() * 2);
    let mut prev_type: Option<BoxType> = None;
    for b in boxes {
        if let Some(prev) = prev_type
            && let Some(space) = spacing_in_em(context, inter_atom_spacing(prev, b.box_type))
        {
            children.push(MathBox::kern(space));
        }
        if b.box_type != BoxType::Ignore {
            prev_type = Some(b.box_type);
        }
        children.push(b);
    }
    Some(MathBox::row(children, BoxType::Ord))
}

/// Render a list in a nested scope of the given kind and bring the result back to the em of
/// `context`. An empty list gives an empty box.
pub(crate) fn render_in_scope(context: &Context<'_>, atoms: &[Atom], scope: ScopeKind) -> MathBox {
    let nested = Context::new(context, None, scope);
    let b = render_list(&nested, atoms).unwrap_or_else(|| MathBox::empty(BoxType::Ord));
    nested.wrap(b)
}

#[cfg(test)]
mod tests {
    use box_model::boxes::BoxContent;
    use box_model::mathstyle::Mathstyle;

    use super::*;
    use crate::context::GlobalContext;
    use crate::registers::default_registers;

    fn letter(ch: &str) -> Atom {
        Atom::symbol(AtomType::Mord, None, ch)
    }

    fn types(b: &MathBox) -> Vec<&'static str> {
        b.children().map(|c| <&str>::from(c.box_type)).collect()
    }

    #[test]
    fn spacing_table() {
        assert_eq!(inter_atom_spacing(BoxType::Ord, BoxType::Bin), Spacing::TextMedium);
        assert_eq!(inter_atom_spacing(BoxType::Op, BoxType::Ord), Spacing::Thin);
        assert_eq!(inter_atom_spacing(BoxType::Open, BoxType::Ord), Spacing::None);
        assert_eq!(inter_atom_spacing(BoxType::Inner, BoxType::Close), Spacing::None);
    }

    #[test]
    fn leading_binary_is_ordinary() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atoms = [
            Atom::symbol(AtomType::Mbin, None, "-"),
            letter("x"),
            Atom::symbol(AtomType::Mbin, None, "+"),
            letter("y"),
            Atom::symbol(AtomType::Mrel, None, "="),
            Atom::symbol(AtomType::Mbin, None, "+"),
        ];
        let Some(row) = render_list(&root, &atoms) else {
            panic!("expected a row");
        };
        assert_eq!(
            types(&row),
            [
                "mord", "mord", "ignore", "mbin", "ignore", "mord", "ignore", "mrel", "ignore",
                "mord"
            ]
        );
    }

    #[test]
    fn tight_styles_drop_text_spacing() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Script,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        let atoms = [
            letter("x"),
            Atom::symbol(AtomType::Mrel, None, "="),
            letter("y"),
        ];
        let Some(row) = render_list(&root, &atoms) else {
            panic!("expected a row");
        };
        assert_eq!(types(&row), ["mord", "mrel", "mord"]);
    }

    #[test]
    fn empty_list() {
        let global = GlobalContext::default();
        let root = Context::root(
            &global,
            Mathstyle::Text,
            5,
            LetterShapeStyle::Tex,
            default_registers(),
        );
        assert!(render_list(&root, &[]).is_none());
        let b = render_in_scope(&root, &[], ScopeKind::Superscript);
        assert!(matches!(b.content, BoxContent::Empty));
        assert_eq!(b.width, 0.0);
    }
}
