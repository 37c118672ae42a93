use crate::ast::{BNode, Ident, Node};

/// Replaces free `_` placeholders with a value reference.
///
/// A call of the pipeline invocation is a scope boundary: only its first
/// argument belongs to the enclosing pipeline, the rest is the nested
/// pipeline's own body and is copied untouched.
#[derive(Debug, Clone, Copy)]
pub struct Substituter<'a> {
    invocation: &'a Ident,
}

impl<'a> Substituter<'a> {
    pub fn new(invocation: &'a Ident) -> Self {
        Self { invocation }
    }

    pub fn contains_placeholder(&self, node: &BNode) -> bool {
        match node.as_ref() {
            Node::Placeholder => true,
            Node::Call(call) if node.is_invocation_of(self.invocation) => call
                .args
                .first()
                .is_some_and(|first| self.contains_placeholder(first)),
            _ => node
                .children()
                .into_iter()
                .any(|child| self.contains_placeholder(child)),
        }
    }

    /// Rebuild `expr` with every free placeholder replaced by `replacement`.
    /// Subtrees without placeholders are shared, not copied.
    pub fn substitute(&self, expr: &BNode, replacement: &BNode) -> BNode {
        if !self.contains_placeholder(expr) {
            return expr.clone();
        }
        match expr.as_ref() {
            Node::Placeholder => replacement.clone(),
            Node::Call(call) if expr.is_invocation_of(self.invocation) => {
                let mut args = call.args.clone();
                if let Some(first) = args.first_mut() {
                    *first = self.substitute(first, replacement);
                }
                Node::call(call.callee.clone(), args)
            }
            Node::Call(call) => Node::call(
                self.substitute(&call.callee, replacement),
                self.substitute_all(&call.args, replacement),
            ),
            Node::Assign(assign) => Node::assign(
                self.substitute(&assign.target, replacement),
                self.substitute(&assign.value, replacement),
            ),
            Node::Group(group) => Node::group(self.substitute_all(&group.lines, replacement)),
            Node::Marker(marker) => {
                Node::marker(marker.tag, self.substitute(&marker.inner, replacement))
            }
            Node::Ident(_) | Node::Opaque(_) => expr.clone(),
        }
    }

    fn substitute_all(&self, nodes: &[BNode], replacement: &BNode) -> Vec<BNode> {
        nodes
            .iter()
            .map(|node| self.substitute(node, replacement))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn chain() -> Ident {
        Ident::new("@chain")
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let invocation = chain();
        let sub = Substituter::new(&invocation);
        let expr = Node::apply(
            "f",
            vec![
                Node::placeholder(),
                Node::apply("g", vec![Node::placeholder(), Node::ident("k")]),
                Node::aside(Node::placeholder()),
            ],
        );

        let out = sub.substitute(&expr, &Node::ident("t"));

        assert_eq!(out.to_string(), "f(t, g(t, k), @aside t)");
        assert!(!sub.contains_placeholder(&out));
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let invocation = chain();
        let sub = Substituter::new(&invocation);
        let shared = Node::apply("g", vec![Node::ident("k")]);
        let expr = Node::apply("f", vec![shared.clone(), Node::placeholder()]);

        let out = sub.substitute(&expr, &Node::ident("t"));

        let Node::Call(call) = out.as_ref() else {
            panic!("expected call, found {}", out);
        };
        assert!(Arc::ptr_eq(&call.args[0], &shared));

        let without = Node::apply("h", vec![]);
        assert!(Arc::ptr_eq(&sub.substitute(&without, &Node::ident("t")), &without));
    }

    #[test]
    fn test_nested_invocation_only_first_argument() {
        let invocation = chain();
        let sub = Substituter::new(&invocation);
        let nested = Node::apply(
            "@chain",
            vec![
                Node::placeholder(),
                Node::group(vec![
                    Node::apply("filter", vec![Node::placeholder()]),
                    Node::ident("sum"),
                ]),
            ],
        );

        let out = sub.substitute(&nested, &Node::ident("t"));

        assert_eq!(out.to_string(), "@chain(t, begin filter(_); sum end)");
    }

    #[test]
    fn test_placeholder_behind_boundary_is_not_counted() {
        let invocation = chain();
        let sub = Substituter::new(&invocation);
        let nested = Node::apply(
            "@chain",
            vec![Node::ident("x"), Node::apply("f", vec![Node::placeholder()])],
        );
        assert!(!sub.contains_placeholder(&nested));

        let wrapped = Node::apply("g", vec![nested]);
        assert!(!sub.contains_placeholder(&wrapped));
    }
}
