use super::{Context, Span, Ty};
use crate::{
    collections::storage::{ArenaAlloc, ArenaPtr, BaseArenaPtr},
    impl_arena,
};

/// The data of a local variable declaration.
pub struct VarDeclData {
    /// The declared name.
    name: String,
    /// The declared type, including its data location.
    ty: Ty,
    /// The source range of the declaration.
    span: Span,
}

/// A local variable declaration.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct VarDecl(BaseArenaPtr<VarDeclData>);

impl_arena!(Context, VarDeclData, VarDecl, vars);

impl VarDecl {
    pub fn new(ctx: &mut Context, name: impl Into<String>, ty: Ty, span: Span) -> VarDecl {
        ctx.alloc(VarDeclData {
            name: name.into(),
            ty,
            span,
        })
    }

    pub fn name(self, ctx: &Context) -> &str { &self.deref(ctx).name }

    pub fn ty(self, ctx: &Context) -> Ty { self.deref(ctx).ty }

    pub fn span(self, ctx: &Context) -> Span { self.deref(ctx).span }

    /// The stable numeric id of the declaration.
    pub fn id(self) -> usize { self.0.id() }
}
