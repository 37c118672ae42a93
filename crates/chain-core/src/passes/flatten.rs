use crate::ast::{BNode, Node};

/// Splice every `begin ... end` group into the step sequence, recursively.
///
/// Order is preserved, steps may have side effects.
pub fn flatten(steps: &[BNode]) -> Vec<BNode> {
    let mut out = Vec::with_capacity(steps.len());
    flatten_into(steps, &mut out);
    out
}

fn flatten_into(steps: &[BNode], out: &mut Vec<BNode>) {
    for step in steps {
        match step.as_ref() {
            Node::Group(group) => flatten_into(&group.lines, out),
            _ => out.push(step.clone()),
        }
    }
}
