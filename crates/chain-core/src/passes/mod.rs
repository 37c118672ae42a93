//! The four pipeline passes, run in order: flatten, classify, rewrite (which
//! calls substitute per step).

pub mod classify;
pub mod flatten;
pub mod naming;
pub mod rewrite;
pub mod substitute;

pub use classify::{classify, PipelineStep, StepKind};
pub use flatten::flatten;
pub use naming::FreshNames;
pub use rewrite::{Binding, RewriteResult, Rewriter, Statement};
pub use substitute::Substituter;
