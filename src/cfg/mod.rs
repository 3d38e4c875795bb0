//! The control-flow view of a function body.
//!
//! A function body is a directed graph of basic blocks. A block carries the
//! variable occurrences that happen while control is inside it, in program
//! order, and the set of blocks control may continue to. The graph itself
//! is built by the control-flow provider upstream; this module only defines
//! the records and the plain construction operations a provider (or a test)
//! needs.

use crate::{
    ast::{Context, Node, VarDecl},
    collections::storage::{ArenaAlloc, ArenaPtr, BaseArenaPtr},
    impl_arena,
};

/// How a variable occurs at a program point.
///
/// The variant order is meaningful: it is the final tie-breaker when
/// diagnostics are ordered.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OccurrenceKind {
    /// The variable comes into scope, unassigned.
    Declaration,
    /// The variable is read.
    Access,
    /// The variable is definitely initialized.
    Assignment,
    /// The variable is referenced inside an inline-assembly block.
    InlineAssembly,
}

/// An occurrence of a variable in a block.
///
/// An occurrence has no identity of its own; the triple of declaration,
/// kind and bound syntax node is the occurrence, so equal triples collapse
/// when collected into a set.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct VarOccurrence {
    decl: VarDecl,
    kind: OccurrenceKind,
    /// The syntax node at which the variable occurred, if one is bound.
    /// Declarations typically have none; diagnostics then fall back to the
    /// declaration's own span.
    node: Option<Node>,
}

impl VarOccurrence {
    pub fn new(decl: VarDecl, kind: OccurrenceKind, node: Option<Node>) -> VarOccurrence {
        VarOccurrence { decl, kind, node }
    }

    pub fn declaration(decl: VarDecl) -> VarOccurrence {
        VarOccurrence::new(decl, OccurrenceKind::Declaration, None)
    }

    pub fn access(decl: VarDecl, node: Node) -> VarOccurrence {
        VarOccurrence::new(decl, OccurrenceKind::Access, Some(node))
    }

    pub fn assignment(decl: VarDecl, node: Node) -> VarOccurrence {
        VarOccurrence::new(decl, OccurrenceKind::Assignment, Some(node))
    }

    pub fn inline_assembly(decl: VarDecl, node: Node) -> VarOccurrence {
        VarOccurrence::new(decl, OccurrenceKind::InlineAssembly, Some(node))
    }

    pub fn decl(self) -> VarDecl { self.decl }

    pub fn kind(self) -> OccurrenceKind { self.kind }

    pub fn node(self) -> Option<Node> { self.node }
}

/// The data of a basic block.
pub struct BlockData {
    /// Variable occurrences in the block, in program order.
    occurrences: Vec<VarOccurrence>,
    /// Blocks control may have come from.
    entries: Vec<Block>,
    /// Blocks control may continue to.
    exits: Vec<Block>,
}

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Block(BaseArenaPtr<BlockData>);

impl_arena!(Context, BlockData, Block, blocks);

impl Block {
    pub fn new(ctx: &mut Context) -> Block {
        ctx.alloc(BlockData {
            occurrences: Vec::new(),
            entries: Vec::new(),
            exits: Vec::new(),
        })
    }

    /// Append an occurrence at the end of the block.
    pub fn push_occurrence(self, ctx: &mut Context, occurrence: VarOccurrence) {
        self.deref_mut(ctx).occurrences.push(occurrence);
    }

    /// Add an edge from this block to `to`, keeping both sides' lists in
    /// sync.
    pub fn add_exit(self, ctx: &mut Context, to: Block) {
        self.deref_mut(ctx).exits.push(to);
        to.deref_mut(ctx).entries.push(self);
    }

    pub fn occurrences(self, ctx: &Context) -> &[VarOccurrence] { &self.deref(ctx).occurrences }

    pub fn entries(self, ctx: &Context) -> &[Block] { &self.deref(ctx).entries }

    pub fn exits(self, ctx: &Context) -> &[Block] { &self.deref(ctx).exits }

    pub fn id(self) -> usize { self.0.id() }
}

/// The control flow of one function body.
///
/// The provider guarantees the shape: `entry` has no entries; `exit` is the
/// unique sink all normally-returning paths end in; `revert` is the sink
/// for reverting and throwing paths. A path that diverges never reaches
/// `exit`, which is what lets the analysis ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncFlow {
    pub entry: Block,
    pub exit: Block,
    pub revert: Block,
}

impl FuncFlow {
    /// Create a fresh flow with empty entry, exit and revert blocks.
    pub fn new(ctx: &mut Context) -> FuncFlow {
        FuncFlow {
            entry: Block::new(ctx),
            exit: Block::new(ctx),
            revert: Block::new(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataLocation, Span, Ty, VarDecl};

    #[test]
    fn test_edges_stay_in_sync() {
        let mut ctx = Context::default();
        let a = Block::new(&mut ctx);
        let b = Block::new(&mut ctx);
        let c = Block::new(&mut ctx);

        a.add_exit(&mut ctx, b);
        a.add_exit(&mut ctx, c);
        c.add_exit(&mut ctx, b);

        assert_eq!(a.exits(&ctx), &[b, c]);
        assert_eq!(b.entries(&ctx), &[a, c]);
        assert_eq!(c.entries(&ctx), &[a]);
        assert!(a.entries(&ctx).is_empty());
        assert!(b.exits(&ctx).is_empty());
    }

    #[test]
    fn test_occurrence_identity() {
        let mut ctx = Context::default();
        let ty = Ty::struct_(&mut ctx, "Vault", DataLocation::Storage);
        let decl = VarDecl::new(&mut ctx, "v", ty, Span::default());
        let node = Node::new(&mut ctx, Span::default());

        assert_eq!(
            VarOccurrence::access(decl, node),
            VarOccurrence::access(decl, node)
        );
        assert_ne!(
            VarOccurrence::access(decl, node),
            VarOccurrence::assignment(decl, node)
        );
    }
}
