//! # Uninitialized Storage-Pointer Accesses
//!
//! A local variable of storage-pointer type that is read before anything
//! was assigned to it is a dangling reference into contract storage. This
//! pass walks every implemented function and reports each such read that
//! can actually reach the function's exit: a read on a path that always
//! reverts is harmless and stays silent.
//!
//! The pass is a forward may-analysis on the function's control flow. For
//! every block it keeps the set of declarations that are possibly
//! unassigned when control enters the block, together with the offending
//! reads collected so far, and propagates both along the edges until the
//! sets stop growing. Both sets only ever grow under the union merge and
//! are bounded by the function, so the worklist runs dry without any
//! visited bookkeeping, back edges included.

use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::{GlobalPass, LocalPass, PassError, PassResult};
use crate::{
    ast::{Context, DataLocation, Func, VarDecl},
    cfg::{Block, FuncFlow, OccurrenceKind, VarOccurrence},
    diagnostics::{Diagnostic, Reporter},
};

pub const UNINIT_STORAGE: &str = "uninit-storage";

#[derive(Debug, Error)]
pub enum UninitStorageError {
    #[error("function `{0}` is implemented but has no control flow attached")]
    MissingFlow(String),

    #[error("exit node of function `{0}` has outgoing control flow")]
    ExitNotSink(String),

    #[error("revert node of function `{0}` has outgoing control flow")]
    RevertNotSink(String),
}

impl From<UninitStorageError> for PassError {
    fn from(err: UninitStorageError) -> Self {
        PassError::analysis_error(UNINIT_STORAGE, Box::new(err))
    }
}

/// The per-block analysis state.
#[derive(Default, Clone)]
struct NodeInfo {
    /// Declarations possibly unassigned when control enters the block.
    unassigned: FxHashSet<VarDecl>,
    /// Storage-pointer reads seen while their variable was still
    /// unassigned, on some path through this block or an earlier one.
    pending_accesses: FxHashSet<VarOccurrence>,
}

impl NodeInfo {
    /// Merge a predecessor's out-state into this state.
    ///
    /// Returns true if either set grew, i.e. the block has to be traversed
    /// again.
    fn propagate_from(&mut self, pred: &NodeInfo) -> bool {
        let unassigned_before = self.unassigned.len();
        let pending_before = self.pending_accesses.len();
        self.unassigned.extend(pred.unassigned.iter().copied());
        self.pending_accesses
            .extend(pred.pending_accesses.iter().copied());
        self.unassigned.len() > unassigned_before
            || self.pending_accesses.len() > pending_before
    }
}

/// The uninitialized-storage-access check.
///
/// Findings go to the reporter; the boolean result of the global run says
/// whether the unit came through without errors (warnings pass).
pub struct UninitStorageCheck<'a> {
    reporter: &'a mut Reporter,
}

impl<'a> UninitStorageCheck<'a> {
    pub fn new(reporter: &'a mut Reporter) -> UninitStorageCheck<'a> {
        UninitStorageCheck { reporter }
    }

    fn check_uninitialized_access(&mut self, ctx: &Context, func: Func, flow: FuncFlow) {
        let mut node_infos: FxHashMap<Block, NodeInfo> = FxHashMap::default();
        let mut worklist: Vec<Block> = vec![flow.entry];
        let mut visits = 0usize;

        // Walk all paths from the entry until every block has been seen
        // with its maximal sets. Blocks not reachable from the entry are
        // never pulled in, which is exactly right: nothing in them can
        // happen.
        while let Some(block) = worklist.pop() {
            visits += 1;

            let mut info = node_infos.entry(block).or_default().clone();
            for occurrence in block.occurrences(ctx) {
                match occurrence.kind() {
                    OccurrenceKind::Declaration => {
                        info.unassigned.insert(occurrence.decl());
                    }
                    OccurrenceKind::Assignment => {
                        info.unassigned.remove(&occurrence.decl());
                    }
                    OccurrenceKind::InlineAssembly => {
                        // Any reference inside inline assembly counts as an
                        // assignment.
                        // TODO: only clear the variable once we know the
                        // assembly block actually assigns to it.
                        info.unassigned.remove(&occurrence.decl());
                    }
                    OccurrenceKind::Access => {
                        if info.unassigned.contains(&occurrence.decl())
                            && occurrence
                                .decl()
                                .ty(ctx)
                                .data_stored_in(ctx, DataLocation::Storage)
                        {
                            // Only record the read. The path may still
                            // always revert; it is an error only if the
                            // read survives up to the exit node.
                            info.pending_accesses.insert(*occurrence);
                        }
                    }
                }
            }

            for &succ in block.exits(ctx) {
                if node_infos.entry(succ).or_default().propagate_from(&info) {
                    worklist.push(succ);
                }
            }
        }

        tracing::debug!(
            "uninit-storage: `{}` converged after {} block visits",
            func.name(ctx),
            visits
        );

        let exit_info = node_infos.remove(&flow.exit).unwrap_or_default();
        self.emit(ctx, exit_info);
    }

    fn emit(&mut self, ctx: &Context, exit_info: NodeInfo) {
        if exit_info.pending_accesses.is_empty() {
            return;
        }

        let mut ordered: Vec<VarOccurrence> = exit_info.pending_accesses.into_iter().collect();
        ordered.sort_by(diagnostic_order);

        for occurrence in ordered {
            let decl = occurrence.decl();
            let mut diagnostic = Diagnostic::type_error(
                match occurrence.node() {
                    Some(node) => node.span(ctx),
                    None => decl.span(ctx),
                },
                "This variable is of storage pointer type and is accessed without prior \
                 assignment.",
            );
            if occurrence.node().is_some() {
                diagnostic =
                    diagnostic.with_note("The variable was declared here.", decl.span(ctx));
            }
            self.reporter.report(diagnostic);
        }
    }
}

/// The order diagnostics are emitted in: by bound syntax node id, with
/// unbound occurrences after bound ones, then by declaration id, then by
/// the occurrence kind.
///
/// The key is total over the occurrence identity, so the emitted sequence
/// does not depend on hash-set iteration order.
fn diagnostic_order(lhs: &VarOccurrence, rhs: &VarOccurrence) -> Ordering {
    let by_node = match (lhs.node(), rhs.node()) {
        (Some(lhs_node), Some(rhs_node)) => lhs_node.id().cmp(&rhs_node.id()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_node
        .then_with(|| lhs.decl().id().cmp(&rhs.decl().id()))
        .then_with(|| lhs.kind().cmp(&rhs.kind()))
}

impl LocalPass for UninitStorageCheck<'_> {
    type Output = ();

    fn run(&mut self, ctx: &Context, func: Func) -> PassResult<()> {
        let flow = func
            .flow(ctx)
            .ok_or_else(|| UninitStorageError::MissingFlow(func.name(ctx).to_string()))?;

        // Both sinks must actually be sinks, otherwise the provider handed
        // us a broken graph and anything we report would be noise.
        if !flow.exit.exits(ctx).is_empty() {
            return Err(UninitStorageError::ExitNotSink(func.name(ctx).to_string()).into());
        }
        if !flow.revert.exits(ctx).is_empty() {
            return Err(UninitStorageError::RevertNotSink(func.name(ctx).to_string()).into());
        }

        self.check_uninitialized_access(ctx, func, flow);
        Ok(())
    }
}

impl GlobalPass for UninitStorageCheck<'_> {
    type Output = bool;

    fn run(&mut self, ctx: &Context) -> PassResult<bool> {
        for func in ctx.funcs() {
            if !func.is_implemented(ctx) {
                continue;
            }
            if let Err(err) = LocalPass::run(self, ctx, func) {
                // A malformed input aborts this function only; the rest of
                // the unit is still analyzed. Surface the failure instead
                // of misreporting.
                tracing::error!("{}", err);
                self.reporter
                    .report(Diagnostic::internal_error(func.span(ctx), err.to_string()));
            }
        }
        Ok(!self.reporter.has_errors())
    }
}

/// Run the check over every implemented function of the unit.
///
/// Returns true iff no error-level diagnostics were reported.
pub fn analyze(ctx: &Context, reporter: &mut Reporter) -> bool {
    let mut check = UninitStorageCheck::new(reporter);
    GlobalPass::run(&mut check, ctx).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, Span, Ty};

    fn storage_var(ctx: &mut Context, name: &str) -> VarDecl {
        let ty = Ty::struct_(ctx, "Vault", DataLocation::Storage);
        VarDecl::new(ctx, name, ty, Span::default())
    }

    #[test]
    fn test_propagate_from_reports_growth() {
        let mut ctx = Context::default();
        let a = storage_var(&mut ctx, "a");
        let b = storage_var(&mut ctx, "b");

        let mut from = NodeInfo::default();
        from.unassigned.insert(a);

        let mut to = NodeInfo::default();
        assert!(to.propagate_from(&from));
        // merging the same state again changes nothing
        assert!(!to.propagate_from(&from));

        from.unassigned.insert(b);
        assert!(to.propagate_from(&from));
    }

    #[test]
    fn test_kind_order() {
        assert!(OccurrenceKind::Declaration < OccurrenceKind::Access);
        assert!(OccurrenceKind::Access < OccurrenceKind::Assignment);
        assert!(OccurrenceKind::Assignment < OccurrenceKind::InlineAssembly);
    }

    #[test]
    fn test_diagnostic_order() {
        let mut ctx = Context::default();
        let a = storage_var(&mut ctx, "a");
        let b = storage_var(&mut ctx, "b");
        let first = Node::new(&mut ctx, Span::default());
        let second = Node::new(&mut ctx, Span::default());

        // bound nodes order by node id
        assert_eq!(
            diagnostic_order(&VarOccurrence::access(a, first), &VarOccurrence::access(b, second)),
            Ordering::Less
        );

        // an unbound occurrence comes after any bound one
        assert_eq!(
            diagnostic_order(
                &VarOccurrence::new(a, OccurrenceKind::Access, None),
                &VarOccurrence::access(b, second)
            ),
            Ordering::Greater
        );

        // both unbound: declaration id decides
        assert_eq!(
            diagnostic_order(
                &VarOccurrence::new(a, OccurrenceKind::Access, None),
                &VarOccurrence::new(b, OccurrenceKind::Access, None)
            ),
            Ordering::Less
        );

        // same node, same declaration: kind ordinal decides
        assert_eq!(
            diagnostic_order(
                &VarOccurrence::access(a, first),
                &VarOccurrence::assignment(a, first)
            ),
            Ordering::Less
        );
    }
}
