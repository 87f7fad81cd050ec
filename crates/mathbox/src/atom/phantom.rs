use box_model::boxes::{BoxType, MathBox};

use super::{Atom, PhantomKind, render_list};
use crate::context::{Context, ScopeKind};

impl Atom {
    /// Invisible content that takes up space. Nothing inside a phantom is bound to an atom.
    pub(super) fn create_phantom_box(
        &self,
        context: &Context<'_>,
        kind: PhantomKind,
    ) -> Option<MathBox> {
        let nested = Context::new(context, None, ScopeKind::Auto).with_phantom();
        let body = match render_list(&nested, self.body.as_deref().unwrap_or_default()) {
            Some(body) => body,
            None if self.has_scripts() => MathBox::empty(BoxType::Ord),
            None => return None,
        };
        let mut b = nested.wrap(body);
        match kind {
            PhantomKind::Phantom => {}
            PhantomKind::HPhantom => {
                b.height = 0.0;
                b.depth = 0.0;
            }
            PhantomKind::VPhantom => {
                b.width = 0.0;
                b.right = 0.0;
            }
        }
        let b = self.bind(context, b);
        Some(self.attach_supsub(context, b))
    }
}
