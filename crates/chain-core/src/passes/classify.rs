use crate::ast::{BNode, Ident, MarkerTag, Node, NodeMarker};
use crate::error::{Error, Result};

/// Syntactic shape of a flattened step, decides which rewrite rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StepKind {
    Plain,
    AssignPlain,
    Aside,
    Broadcast,
    AssignBroadcast,
}

impl StepKind {
    pub fn is_assignment(self) -> bool {
        matches!(self, StepKind::AssignPlain | StepKind::AssignBroadcast)
    }

    pub fn is_broadcast(self) -> bool {
        matches!(self, StepKind::Broadcast | StepKind::AssignBroadcast)
    }
}

/// A classified step.
///
/// For broadcast kinds `expr` is the bare function identifier, for aside and
/// assignment kinds it is the unwrapped inner expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub index: usize,
    pub kind: StepKind,
    pub binding: Option<Ident>,
    pub expr: BNode,
}

impl PipelineStep {
    fn new(index: usize, kind: StepKind, binding: Option<Ident>, expr: BNode) -> Self {
        Self {
            index,
            kind,
            binding,
            expr,
        }
    }
}

/// Classify one flattened step. Rules are tried in priority order: aside
/// marker, broadcast marker, assignment, plain.
pub fn classify(index: usize, step: &BNode) -> Result<PipelineStep> {
    let classified = match step.as_ref() {
        Node::Marker(NodeMarker {
            tag: MarkerTag::Aside,
            inner,
        }) => PipelineStep::new(index, StepKind::Aside, None, inner.clone()),
        Node::Marker(NodeMarker {
            tag: MarkerTag::Broadcast,
            inner,
        }) => PipelineStep::new(
            index,
            StepKind::Broadcast,
            None,
            broadcast_target(index, inner)?,
        ),
        Node::Assign(assign) => {
            let target = assign.target.as_ident().cloned().ok_or_else(|| {
                Error::AmbiguousAssignmentTarget {
                    step: index,
                    found: assign.target.to_string(),
                }
            })?;
            match assign.value.as_ref() {
                Node::Marker(NodeMarker {
                    tag: MarkerTag::Broadcast,
                    inner,
                }) => PipelineStep::new(
                    index,
                    StepKind::AssignBroadcast,
                    Some(target),
                    broadcast_target(index, inner)?,
                ),
                _ => PipelineStep::new(
                    index,
                    StepKind::AssignPlain,
                    Some(target),
                    assign.value.clone(),
                ),
            }
        }
        _ => PipelineStep::new(index, StepKind::Plain, None, step.clone()),
    };
    Ok(classified)
}

fn broadcast_target(index: usize, inner: &BNode) -> Result<BNode> {
    match inner.as_ref() {
        Node::Ident(_) => Ok(inner.clone()),
        _ => Err(Error::MalformedMarker {
            step: index,
            found: inner.to_string(),
        }),
    }
}
