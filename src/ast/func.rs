use super::{Context, Span};
use crate::{
    cfg::FuncFlow,
    collections::storage::{ArenaAlloc, ArenaPtr, BaseArenaPtr},
    impl_arena,
};

/// The data of a function definition.
///
/// A function is either *implemented* (it has a body, and the control-flow
/// provider attaches a [FuncFlow] for it) or a bare declaration, e.g. an
/// interface member. Analyses only ever look at implemented functions.
pub struct FuncData {
    /// The name of the function.
    name: String,
    /// The source range of the definition.
    span: Span,
    /// Whether the function has a body.
    implemented: bool,
    /// The control flow of the body, attached by the provider.
    flow: Option<FuncFlow>,
}

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Func(BaseArenaPtr<FuncData>);

impl_arena!(Context, FuncData, Func, funcs);

impl Func {
    /// Create a function definition with a body.
    pub fn define(ctx: &mut Context, name: impl Into<String>, span: Span) -> Func {
        ctx.alloc(FuncData {
            name: name.into(),
            span,
            implemented: true,
            flow: None,
        })
    }

    /// Create a bodyless function declaration.
    pub fn declare(ctx: &mut Context, name: impl Into<String>, span: Span) -> Func {
        ctx.alloc(FuncData {
            name: name.into(),
            span,
            implemented: false,
            flow: None,
        })
    }

    pub fn name(self, ctx: &Context) -> &str { &self.deref(ctx).name }

    pub fn span(self, ctx: &Context) -> Span { self.deref(ctx).span }

    pub fn is_implemented(self, ctx: &Context) -> bool { self.deref(ctx).implemented }

    /// Attach the control flow of the body.
    pub fn set_flow(self, ctx: &mut Context, flow: FuncFlow) {
        self.deref_mut(ctx).flow = Some(flow);
    }

    pub fn flow(self, ctx: &Context) -> Option<FuncFlow> { self.deref(ctx).flow }
}

impl Context {
    /// All functions of the unit, in the order they were defined.
    pub fn funcs(&self) -> Vec<Func> {
        self.funcs.iter().map(|(ptr, _)| Func(ptr)).collect()
    }
}
