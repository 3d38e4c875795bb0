use super::{func::FuncData, node::NodeData, source_loc::Source, ty::TyData, var::VarDeclData};
use crate::{
    cfg::BlockData,
    collections::storage::{BaseArena, UniqueArena},
};

/// The context of a translation unit.
///
/// The context owns every front-end entity: interned types, variable
/// declarations, syntax-node anchors, functions and control-flow blocks.
/// Handles into the context are cheap copies; everything is released
/// together when the context is dropped.
#[derive(Default)]
pub struct Context {
    /// The unique storage of types.
    pub(crate) tys: UniqueArena<TyData>,
    /// The storage of variable declarations.
    pub(crate) vars: BaseArena<VarDeclData>,
    /// The storage of syntax-node anchors.
    pub(crate) nodes: BaseArena<NodeData>,
    /// The storage of functions.
    pub(crate) funcs: BaseArena<FuncData>,
    /// The storage of control-flow blocks.
    pub(crate) blocks: BaseArena<BlockData>,
    /// Where the unit came from, for diagnostics.
    source: Source,
}

impl Context {
    pub fn new(source: Source) -> Context {
        Context {
            source,
            ..Context::default()
        }
    }

    pub fn source(&self) -> &Source { &self.source }
}
