use solitonc::{
    ast::{Context, DataLocation, Func, Node, Span, Ty, VarDecl},
    cfg::FuncFlow,
};

/// A local declared as a storage pointer to a struct.
pub fn storage_var(ctx: &mut Context, name: &str, span: impl Into<Span>) -> VarDecl {
    let ty = Ty::struct_(ctx, "Vault", DataLocation::Storage);
    VarDecl::new(ctx, name, ty, span.into())
}

/// A local declared as a memory reference, never a storage pointer.
pub fn memory_var(ctx: &mut Context, name: &str, span: impl Into<Span>) -> VarDecl {
    let ty = Ty::struct_(ctx, "Vault", DataLocation::Memory);
    VarDecl::new(ctx, name, ty, span.into())
}

/// A plain value-typed local.
pub fn uint_var(ctx: &mut Context, name: &str, span: impl Into<Span>) -> VarDecl {
    let ty = Ty::uint(ctx, 256);
    VarDecl::new(ctx, name, ty, span.into())
}

/// A fresh syntax-node anchor. Anchors allocated later get larger ids.
pub fn anchor(ctx: &mut Context, span: impl Into<Span>) -> Node { Node::new(ctx, span.into()) }

/// An implemented function with a fresh, still unconnected flow attached.
pub fn define_func(ctx: &mut Context, name: &str) -> (Func, FuncFlow) {
    let func = Func::define(ctx, name, Span::default());
    let flow = FuncFlow::new(ctx);
    func.set_flow(ctx, flow);
    (func, flow)
}
