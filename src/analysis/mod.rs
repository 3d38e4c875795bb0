//! Analyses over the resolved syntax tree.
//!
//! Analyses are passes: a [LocalPass] runs on one function, a [GlobalPass]
//! on the whole unit. Findings about the *program* go through the
//! diagnostics reporter; a [PassError] is reserved for malformed *inputs*,
//! i.e. a collaborator handed the pass something that violates its
//! contract.

pub mod uninit_storage;

use thiserror::Error;

use crate::ast::{Context, Func};

#[derive(Debug, Error)]
pub enum PassErrorKind {
    #[error("analysis error")]
    AnalysisError,

    #[error("other error")]
    Other,
}

#[derive(Debug, Error)]
#[error("{kind} on {pass_name}: {err}")]
pub struct PassError {
    kind: PassErrorKind,
    err: Box<dyn std::error::Error>,
    pass_name: String,
}

pub type PassResult<T> = Result<T, PassError>;

impl PassError {
    pub fn analysis_error(pass_name: impl Into<String>, err: Box<dyn std::error::Error>) -> Self {
        Self {
            kind: PassErrorKind::AnalysisError,
            err,
            pass_name: pass_name.into(),
        }
    }

    pub fn other(pass_name: impl Into<String>, err: Box<dyn std::error::Error>) -> Self {
        Self {
            kind: PassErrorKind::Other,
            err,
            pass_name: pass_name.into(),
        }
    }
}

/// A pass that can be run on a function.
pub trait LocalPass {
    /// The output of the pass.
    type Output;

    /// Run the pass on the given function.
    fn run(&mut self, ctx: &Context, func: Func) -> PassResult<Self::Output>;
}

/// A pass that can be run on a whole unit.
pub trait GlobalPass {
    /// The output of the pass.
    type Output;

    /// Run the pass on the given unit.
    fn run(&mut self, ctx: &Context) -> PassResult<Self::Output>;
}
