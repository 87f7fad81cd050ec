use box_model::boxes::{BoxType, MathBox};
use box_model::mathstyle::MathstyleName;

use super::{Atom, render_list};
use crate::context::{Context, ScopeKind};

impl Atom {
    /// A braced list, optionally in an explicit mathstyle. An empty group still produces an
    /// (empty) box, so that scripts have something to attach to.
    pub(super) fn create_group_box(
        &self,
        context: &Context<'_>,
        mathstyle: Option<MathstyleName>,
    ) -> Option<MathBox> {
        let scope = mathstyle.map_or(ScopeKind::Auto, ScopeKind::Explicit);
        let nested = Context::new(context, None, scope);
        let body = self.body.as_deref().unwrap_or_default();
        let b = render_list(&nested, body).unwrap_or_else(|| MathBox::empty(BoxType::Ord));
        let b = self.bind(context, nested.wrap(b));
        Some(self.attach_supsub(context, b))
    }
}
