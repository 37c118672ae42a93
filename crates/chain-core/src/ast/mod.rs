//! Expression trees handed to and produced by the pipeline passes.
//!
//! Trees are immutable. Children are shared through `Arc`, so a pass that
//! rebuilds a tree reuses every subtree it did not change.

use crate::{common_enum, common_struct};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod ident;
pub mod json;

pub use ident::*;

pub type BNode = Arc<Node>;

common_enum! {
    /// Directive attached to a single pipeline step.
    #[derive(Copy, derive_more::Display)]
    pub enum MarkerTag {
        /// Evaluated for its effect only, the value does not flow forward.
        #[display("@aside")]
        Aside,
        /// Elementwise application of a named function.
        #[display("@.")]
        Broadcast,
    }
}

common_enum! {
    /// An expression tree node.
    #[derive(derive_more::From)]
    pub enum Node {
        Ident(Ident),
        Call(NodeCall),
        Assign(NodeAssign),
        /// `begin ... end`, only meaningful as a pipeline step
        Group(NodeGroup),
        Marker(NodeMarker),
        /// the current pipeline value, `_`
        Placeholder,
        Opaque(NodeOpaque),
    }
}

common_struct! {
    pub struct NodeCall {
        pub callee: BNode,
        pub args: Vec<BNode>,
    }
}

common_struct! {
    pub struct NodeAssign {
        /// Kept as a node so that destructuring targets can be reported.
        pub target: BNode,
        pub value: BNode,
    }
}

common_struct! {
    pub struct NodeGroup {
        pub lines: Vec<BNode>,
    }
}

common_struct! {
    pub struct NodeMarker {
        pub tag: MarkerTag,
        pub inner: BNode,
    }
}

common_struct! {
    /// A node kind the passes never look into.
    pub struct NodeOpaque {
        pub payload: String,
    }
}

impl Node {
    pub fn ident(name: impl Into<Ident>) -> BNode {
        Arc::new(Node::Ident(name.into()))
    }
    pub fn placeholder() -> BNode {
        Arc::new(Node::Placeholder)
    }
    pub fn opaque(payload: impl Into<String>) -> BNode {
        Arc::new(Node::Opaque(NodeOpaque {
            payload: payload.into(),
        }))
    }
    pub fn call(callee: BNode, args: Vec<BNode>) -> BNode {
        Arc::new(Node::Call(NodeCall { callee, args }))
    }
    /// Call of a plain function name: `Node::apply("f", vec![x])` is `f(x)`.
    pub fn apply(name: impl Into<Ident>, args: Vec<BNode>) -> BNode {
        Self::call(Self::ident(name), args)
    }
    pub fn assign(target: BNode, value: BNode) -> BNode {
        Arc::new(Node::Assign(NodeAssign { target, value }))
    }
    pub fn group(lines: Vec<BNode>) -> BNode {
        Arc::new(Node::Group(NodeGroup { lines }))
    }
    pub fn marker(tag: MarkerTag, inner: BNode) -> BNode {
        Arc::new(Node::Marker(NodeMarker { tag, inner }))
    }
    pub fn aside(inner: BNode) -> BNode {
        Self::marker(MarkerTag::Aside, inner)
    }
    pub fn broadcast(inner: BNode) -> BNode {
        Self::marker(MarkerTag::Broadcast, inner)
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Node::Ident(ident) => Some(ident),
            _ => None,
        }
    }
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder)
    }

    /// Whether this node is a call of the pipeline invocation `invocation`.
    pub fn is_invocation_of(&self, invocation: &Ident) -> bool {
        match self {
            Node::Call(call) => call.callee.as_ident() == Some(invocation),
            _ => false,
        }
    }

    /// Whether the rendering can be followed by an argument list without
    /// changing how it reads.
    fn is_atomic(&self) -> bool {
        match self {
            Node::Ident(_) | Node::Placeholder | Node::Call(_) => true,
            Node::Opaque(opaque) => {
                !opaque.payload.is_empty()
                    && opaque
                        .payload
                        .chars()
                        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '!'))
            }
            Node::Assign(_) | Node::Group(_) | Node::Marker(_) => false,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&BNode> {
        match self {
            Node::Call(call) => std::iter::once(&call.callee).chain(&call.args).collect(),
            Node::Assign(assign) => vec![&assign.target, &assign.value],
            Node::Group(group) => group.lines.iter().collect(),
            Node::Marker(marker) => vec![&marker.inner],
            Node::Ident(_) | Node::Placeholder | Node::Opaque(_) => Vec::new(),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Ident(ident) => write!(f, "{}", ident),
            Node::Placeholder => f.write_str("_"),
            Node::Opaque(opaque) => f.write_str(&opaque.payload),
            Node::Call(call) => match call.callee.as_ref() {
                Node::Marker(NodeMarker {
                    tag: MarkerTag::Broadcast,
                    inner,
                }) => write!(f, "{}.({})", inner, call.args.iter().join(", ")),
                callee if callee.is_atomic() => {
                    write!(f, "{}({})", callee, call.args.iter().join(", "))
                }
                callee => write!(f, "({})({})", callee, call.args.iter().join(", ")),
            },
            Node::Assign(assign) => write!(f, "{} = {}", assign.target, assign.value),
            Node::Group(group) => write!(f, "begin {} end", group.lines.iter().join("; ")),
            Node::Marker(marker) => write!(f, "{} {}", marker.tag, marker.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parenthesizes_compound_callees() {
        let x = || vec![Node::ident("x")];
        assert_eq!(Node::apply("f", x()).to_string(), "f(x)");
        assert_eq!(Node::call(Node::opaque("nrow"), x()).to_string(), "nrow(x)");
        assert_eq!(
            Node::call(Node::apply("curry", vec![Node::ident("a")]), x()).to_string(),
            "curry(a)(x)"
        );
        assert_eq!(Node::call(Node::opaque("a + b"), x()).to_string(), "(a + b)(x)");
        assert_eq!(
            Node::call(Node::assign(Node::ident("y"), Node::ident("g")), x()).to_string(),
            "(y = g)(x)"
        );
        assert_eq!(Node::call(Node::aside(Node::ident("g")), x()).to_string(), "(@aside g)(x)");
        assert_eq!(Node::call(Node::broadcast(Node::ident("g")), x()).to_string(), "g.(x)");
    }
}
