//! The syntax-tree entities the analyses operate on.
//!
//! This is the resolved view a later compiler stage sees: declarations and
//! functions with stable ids and source spans. Parsing and name resolution
//! happen upstream and are not part of this crate.

mod context;
mod func;
mod node;
mod source_loc;
mod ty;
mod var;

pub use context::Context;
pub use func::{Func, FuncData};
pub use node::{Node, NodeData};
pub use source_loc::{Loc, Source, Span};
pub use ty::{DataLocation, Ty, TyData};
pub use var::{VarDecl, VarDeclData};
