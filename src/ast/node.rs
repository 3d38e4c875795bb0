use super::{Context, Span};
use crate::{
    collections::storage::{ArenaAlloc, ArenaPtr, BaseArenaPtr},
    impl_arena,
};

/// The data of a syntax-node anchor.
///
/// The front end hands the analyses opaque anchors into the syntax tree:
/// enough to point a diagnostic at a source range and to order diagnostics
/// by source position, nothing more. Anchors are allocated in source order,
/// so ascending ids follow the source text.
pub struct NodeData {
    span: Span,
}

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Node(BaseArenaPtr<NodeData>);

impl_arena!(Context, NodeData, Node, nodes);

impl Node {
    pub fn new(ctx: &mut Context, span: Span) -> Node { ctx.alloc(NodeData { span }) }

    pub fn span(self, ctx: &Context) -> Span { self.deref(ctx).span }

    /// The stable numeric id of the node.
    pub fn id(self) -> usize { self.0.id() }
}
