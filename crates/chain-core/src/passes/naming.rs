use crate::ast::{BNode, Ident, Node};
use std::collections::HashSet;

/// Per-call generator for internal binding names.
///
/// Names are `prefix` followed by a counter. Any name already present in the
/// input trees is skipped, so synthesized bindings never shadow user names.
#[derive(Debug, Clone)]
pub struct FreshNames {
    prefix: String,
    counter: usize,
    taken: HashSet<String>,
}

impl FreshNames {
    pub fn new(prefix: impl Into<String>, roots: &[BNode]) -> Self {
        let mut taken = HashSet::new();
        for root in roots {
            collect_idents(root, &mut taken);
        }
        Self {
            prefix: prefix.into(),
            counter: 0,
            taken,
        }
    }

    pub fn next_name(&mut self) -> Ident {
        loop {
            self.counter += 1;
            let name = format!("{}{}", self.prefix, self.counter);
            if self.taken.insert(name.clone()) {
                return Ident::new(name);
            }
        }
    }
}

fn collect_idents(node: &BNode, taken: &mut HashSet<String>) {
    if let Node::Ident(ident) = node.as_ref() {
        taken.insert(ident.name.clone());
    }
    for child in node.children() {
        collect_idents(child, taken);
    }
}
