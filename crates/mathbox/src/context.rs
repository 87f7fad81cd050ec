//! The rendering environment of a scope.
//!
//! Contexts form a chain from the innermost scope to the root. Most properties are resolved
//! lazily by walking up the chain until a scope defines them.

use std::cell::{Cell, RefCell};
use std::hash::{BuildHasher, RandomState};
use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashSet;
use strum_macros::{EnumString, IntoStaticStr};

use box_model::boxes::{BoxClasses, MathBox};
use box_model::dimension::{Dimension, Glue, RegisterValue};
use box_model::font_metrics::{FONT_SCALE, FontMetrics};
use box_model::mathstyle::{Mathstyle, MathstyleName};

use crate::atom::{FontSize, Style};
use crate::registers::Registers;

/// How letters are shaped (italic or upright).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum LetterShapeStyle {
    /// Latin letters and lowercase Greek are italic.
    #[default]
    Tex,
    /// All letters are italic.
    Iso,
    /// Only lowercase Latin letters are italic.
    French,
    Upright,
    /// Inherit from the enclosing scope.
    Auto,
}

/// Where the mathstyle of a new scope comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeKind {
    /// Inherit the mathstyle of the parent.
    #[default]
    Auto,
    Cramp,
    Superscript,
    Subscript,
    Numerator,
    Denominator,
    /// An explicit style, e.g. `\displaystyle`.
    Explicit(MathstyleName),
}

/// Where atom ids come from.
#[derive(Debug)]
pub enum IdSeed {
    /// Time-based ids with a random component.
    Random,
    /// Base-36 encoded numbers, incremented on every use.
    Counter(Cell<u64>),
}

#[derive(Debug)]
pub struct AtomIdSettings {
    /// If set, every atom gets this id.
    pub override_id: Option<String>,
    pub seed: IdSeed,
}

impl AtomIdSettings {
    pub fn counter(start: u64) -> Self {
        AtomIdSettings {
            override_id: None,
            seed: IdSeed::Counter(Cell::new(start)),
        }
    }
}

/// State shared by every context of a render pass.
#[derive(Debug)]
pub struct GlobalContext {
    /// `None` when boxes need not be bound to their atoms.
    pub atom_ids: Option<AtomIdSettings>,
    /// Extensible symbols that keep their small size in display style.
    pub small_operators: FxHashSet<String>,
}

impl GlobalContext {
    pub fn new(atom_ids: Option<AtomIdSettings>) -> Self {
        GlobalContext {
            atom_ids,
            small_operators: ["\\smallint".to_string()].into_iter().collect(),
        }
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        GlobalContext::new(None)
    }
}

#[derive(Debug)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    mathstyle: Option<Mathstyle>,
    size: Option<u8>,
    letter_shape_style: Option<LetterShapeStyle>,
    color: Option<&'a str>,
    background_color: Option<&'a str>,
    is_phantom: bool,
    registers: RefCell<Registers>,
    global: &'a GlobalContext,
}

impl<'a> Context<'a> {
    /// The outermost scope of a render pass. Its mathstyle and size are always defined.
    pub fn root(
        global: &'a GlobalContext,
        mathstyle: Mathstyle,
        size: u8,
        letter_shape_style: LetterShapeStyle,
        registers: Registers,
    ) -> Self {
        debug_assert!((1..=10).contains(&size), "size out of range: {size}");
        Context {
            parent: None,
            mathstyle: Some(mathstyle),
            size: Some(size),
            letter_shape_style: Some(letter_shape_style),
            color: None,
            background_color: None,
            is_phantom: false,
            registers: RefCell::new(registers),
            global,
        }
    }

    /// A nested scope. Overrides in `style` that are absent or set to `auto`/`none` are
    /// ignored.
    pub fn new(parent: &'a Context<'a>, style: Option<&'a Style>, scope: ScopeKind) -> Self {
        let mut context = Context {
            parent: Some(parent),
            mathstyle: None,
            size: None,
            letter_shape_style: None,
            color: None,
            background_color: None,
            is_phantom: parent.is_phantom,
            registers: RefCell::default(),
            global: parent.global,
        };
        if let Some(style) = style {
            context.color = style.color.as_deref().filter(|c| *c != "none");
            context.background_color = style.background_color.as_deref().filter(|c| *c != "none");
            if let Some(FontSize::Size(size)) = style.font_size
                && parent.size != Some(size)
            {
                context.size = Some(size);
            }
            context.letter_shape_style = style
                .letter_shape_style
                .filter(|&shape| shape != LetterShapeStyle::Auto);
        }
        let parent_style = parent.mathstyle();
        context.mathstyle = match scope {
            ScopeKind::Auto => None,
            ScopeKind::Cramp => Some(parent_style.cramp()),
            ScopeKind::Superscript => Some(parent_style.sup()),
            ScopeKind::Subscript => Some(parent_style.sub()),
            ScopeKind::Numerator => Some(parent_style.frac_num()),
            ScopeKind::Denominator => Some(parent_style.frac_den()),
            ScopeKind::Explicit(name) => Some(name.mathstyle()),
        };
        context
    }

    /// Mark this scope and every scope nested in it as invisible.
    pub fn with_phantom(mut self) -> Self {
        self.is_phantom = true;
        self
    }

    #[inline]
    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn mathstyle(&self) -> Mathstyle {
        let mut context = self;
        loop {
            if let Some(style) = context.mathstyle {
                return style;
            }
            match context.parent {
                Some(parent) => context = parent,
                None => {
                    debug_assert!(false, "the root context has no mathstyle");
                    return Mathstyle::Text;
                }
            }
        }
    }

    /// The base size (1 to 10) before the mathstyle's size delta is applied.
    pub fn size(&self) -> u8 {
        let mut context = self;
        loop {
            if let Some(size) = context.size {
                return size;
            }
            match context.parent {
                Some(parent) => context = parent,
                None => {
                    debug_assert!(false, "the root context has no size");
                    return box_model::font_metrics::DEFAULT_FONT_SIZE;
                }
            }
        }
    }

    pub fn letter_shape_style(&self) -> LetterShapeStyle {
        let mut context = self;
        loop {
            if let Some(style) = context.letter_shape_style {
                return style;
            }
            match context.parent {
                Some(parent) => context = parent,
                None => return LetterShapeStyle::default(),
            }
        }
    }

    /// The color of this scope, or of its parent. Grandparents are not consulted.
    pub fn computed_color(&self) -> Option<&'a str> {
        self.color.or_else(|| self.parent.and_then(|p| p.color))
    }

    /// The background color of this scope, or of its parent. Grandparents are not consulted.
    pub fn computed_background_color(&self) -> Option<&'a str> {
        self.background_color
            .or_else(|| self.parent.and_then(|p| p.background_color))
    }

    #[inline]
    pub fn is_phantom(&self) -> bool {
        self.is_phantom
    }

    #[inline]
    pub fn is_display_style(&self) -> bool {
        self.mathstyle().is_display()
    }

    #[inline]
    pub fn is_cramped(&self) -> bool {
        self.mathstyle().cramped()
    }

    #[inline]
    pub fn is_tight(&self) -> bool {
        self.mathstyle().is_tight()
    }

    #[inline]
    pub fn metrics(&self) -> &'static FontMetrics {
        self.mathstyle().metrics()
    }

    /// The font scale of this scope: the size shifted by the mathstyle's delta.
    pub fn effective_font_size(&self) -> f64 {
        let index = (i16::from(self.size()) + i16::from(self.mathstyle().size_delta()))
            .clamp(1, (FONT_SCALE.len() - 1) as i16);
        FONT_SCALE[index as usize]
    }

    /// The ratio of this scope's font size to its parent's. 1.0 at the root.
    pub fn scaling_factor(&self) -> f64 {
        match self.parent {
            Some(parent) => self.effective_font_size() / parent.effective_font_size(),
            None => 1.0,
        }
    }

    /// Convert a length in this scope's em to the parent's em.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        value * self.scaling_factor()
    }

    pub fn is_small_operator(&self, symbol: &str) -> bool {
        self.global.small_operators.contains(symbol)
    }

    /// Find the innermost scope that defines `name`.
    fn lookup<T>(&self, name: &str, f: impl Fn(&RegisterValue) -> Option<T>) -> Option<T> {
        let mut context = self;
        loop {
            if let Some(value) = context.registers.borrow().get(name) {
                // A local value that cannot be converted hides the ancestors' values.
                return f(value);
            }
            context = context.parent?;
        }
    }

    pub fn get_register(&self, name: &str) -> Option<RegisterValue> {
        self.lookup(name, |value| Some(value.clone()))
    }

    pub fn get_register_as_glue(&self, name: &str) -> Option<Glue> {
        self.lookup(name, RegisterValue::as_glue)
    }

    pub fn get_register_as_dimension(&self, name: &str) -> Option<Dimension> {
        self.lookup(name, RegisterValue::as_dimension)
    }

    /// The natural size of a register in em.
    pub fn get_register_as_em(&self, name: &str) -> Option<f64> {
        self.get_register_as_dimension(name).map(Dimension::to_em)
    }

    /// Set a register in this scope only. `None` removes the local value.
    pub fn set_register(&self, name: &str, value: Option<RegisterValue>) {
        let mut registers = self.registers.borrow_mut();
        match value {
            Some(value) => {
                registers.insert(name.to_string(), value);
            }
            None => {
                registers.remove(name);
            }
        }
    }

    /// Set a register at the root, removing local values along the chain so the new value is
    /// visible from here.
    pub fn set_global_register(&self, name: &str, value: RegisterValue) {
        let mut context = self;
        while let Some(parent) = context.parent {
            context.registers.borrow_mut().remove(name);
            context = parent;
        }
        context.registers.borrow_mut().insert(name.to_string(), value);
        log::trace!("global register {name} set");
    }

    /// Whether rendered boxes should be bound to the ids of their atoms.
    #[inline]
    pub fn wants_atom_ids(&self) -> bool {
        self.global.atom_ids.is_some()
    }

    /// An id for binding a box to its atom, or `None` if ids are not requested.
    pub fn make_id(&self) -> Option<String> {
        let settings = self.global.atom_ids.as_ref()?;
        if let Some(id) = &settings.override_id {
            return Some(id.clone());
        }
        Some(match &settings.seed {
            IdSeed::Counter(seed) => {
                let value = seed.get();
                seed.set(value + 1);
                to_base36(value)
            }
            IdSeed::Random => random_id(),
        })
    }

    /// Prepare a box built in this scope for the parent scope: rescale it to the parent's em,
    /// apply the local colors and mark it invisible if this scope is a phantom.
    pub fn wrap(&self, mut b: MathBox) -> MathBox {
        if self.parent.is_some() {
            b.rescale(self.scaling_factor());
        }
        if b.color.is_none() {
            b.color = self.color.map(str::to_string);
        }
        if b.background_color.is_none() {
            b.background_color = self.background_color.map(str::to_string);
        }
        if self.is_phantom && !self.parent.is_some_and(Context::is_phantom) {
            b.classes |= BoxClasses::PHANTOM;
        }
        b
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut digits = Vec::new();
    loop {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

fn random_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    let time = to_base36(millis);
    let tail = &time[time.len().saturating_sub(2)..];
    let random = RandomState::new().hash_one(millis) % 100_000;
    format!("{tail}{}", to_base36(random))
}
