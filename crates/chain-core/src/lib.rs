//! Rewrites `@chain`-style pipelines into a sequence of bindings.
//!
//! A pipeline is a seed value followed by steps. Every step receives the
//! current value, either where a `_` placeholder appears or as the implicit
//! first argument, and its result becomes the next current value:
//!
//! ```
//! use chain_core::ast::Node;
//!
//! let block = chain_core::transform(
//!     &[Node::ident("df")],
//!     &[
//!         Node::apply("dropmissing", vec![]),
//!         Node::apply("filter", vec![Node::ident("pred"), Node::placeholder()]),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(
//!     block.to_string(),
//!     "begin __chain_1 = dropmissing(df); __chain_2 = filter(pred, __chain_1); __chain_2 end"
//! );
//! ```

#[macro_use]
pub mod macros;

pub mod ast;
pub mod config;
pub mod error;
pub mod passes;
mod transform;

// Re-export commonly used items for convenience
pub use tracing;

pub use config::ChainConfig;
pub use transform::PipelineTransformer;

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;

/// Transform a pipeline with the default configuration.
pub fn transform(seeds: &[ast::BNode], steps: &[ast::BNode]) -> Result<ast::BNode> {
    PipelineTransformer::default().transform(seeds, steps)
}

/// Expand every pipeline invocation in `node` with the default configuration.
pub fn expand(node: &ast::BNode) -> Result<ast::BNode> {
    PipelineTransformer::default().expand(node)
}
