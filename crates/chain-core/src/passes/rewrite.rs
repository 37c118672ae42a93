use crate::ast::{BNode, Ident, Node};
use crate::error::{Error, Result};
use crate::passes::classify::{classify, PipelineStep, StepKind};
use crate::passes::naming::FreshNames;
use crate::passes::substitute::Substituter;
use std::iter;

/// Where the value of a statement goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Synthesized internal name.
    Temp(Ident),
    /// Name written by the user in an assignment step.
    User(Ident),
    /// Evaluated for effect only.
    Discard,
}

impl Binding {
    pub fn name(&self) -> Option<&Ident> {
        match self {
            Binding::Temp(name) | Binding::User(name) => Some(name),
            Binding::Discard => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub binding: Binding,
    pub value: BNode,
}

impl Statement {
    pub fn into_node(self) -> BNode {
        match self.binding {
            Binding::Temp(name) | Binding::User(name) => {
                Node::assign(Node::ident(name), self.value)
            }
            Binding::Discard => self.value,
        }
    }
}

/// Ordered bindings plus the reference to the pipeline's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub statements: Vec<Statement>,
    /// An identifier as soon as one statement was emitted, otherwise the seed.
    pub final_value: BNode,
}

impl RewriteResult {
    /// Compose into a single `begin ... end` block ending in the final value,
    /// or the bare final value when nothing was bound.
    pub fn into_node(self) -> BNode {
        if self.statements.is_empty() {
            return self.final_value;
        }
        let lines = self
            .statements
            .into_iter()
            .map(Statement::into_node)
            .chain(iter::once(self.final_value))
            .collect();
        Node::group(lines)
    }
}

/// Threads the current value through classified steps.
pub struct Rewriter<'a, 'n> {
    substituter: Substituter<'a>,
    names: &'n mut FreshNames,
    statements: Vec<Statement>,
}

impl<'a, 'n> Rewriter<'a, 'n> {
    pub fn new(invocation: &'a Ident, names: &'n mut FreshNames) -> Self {
        Self {
            substituter: Substituter::new(invocation),
            names,
            statements: Vec::new(),
        }
    }

    /// Thread `seed` through `steps`, which are already classified and
    /// numbered by the caller.
    pub fn rewrite(mut self, seed: &BNode, steps: Vec<PipelineStep>) -> Result<RewriteResult> {
        if steps.is_empty() {
            return Ok(RewriteResult {
                statements: Vec::new(),
                final_value: seed.clone(),
            });
        }

        let mut current = self.bind_seed(seed)?;
        for step in steps {
            current = self.apply(step, current);
        }

        Ok(RewriteResult {
            statements: self.statements,
            final_value: current,
        })
    }

    fn bind_seed(&mut self, seed: &BNode) -> Result<BNode> {
        let step = classify(0, seed)?;
        match step.kind {
            StepKind::Plain if step.expr.as_ident().is_some() => Ok(step.expr),
            StepKind::Plain | StepKind::AssignPlain => Ok(self.bind(step.binding, step.expr)),
            StepKind::Aside | StepKind::Broadcast | StepKind::AssignBroadcast => {
                Err(Error::MarkerAsSeed {
                    step: 0,
                    found: seed.to_string(),
                })
            }
        }
    }

    fn apply(&mut self, step: PipelineStep, current: BNode) -> BNode {
        trace!(
            index = step.index,
            kind = %step.kind,
            binding = ?step.binding,
            "rewriting pipeline step"
        );
        match step.kind {
            StepKind::Plain | StepKind::AssignPlain => {
                let value = self.thread(&step.expr, &current);
                self.bind(step.binding, value)
            }
            StepKind::Broadcast | StepKind::AssignBroadcast => {
                let value = Node::call(Node::broadcast(step.expr), vec![current]);
                self.bind(step.binding, value)
            }
            StepKind::Aside => {
                let value = self.thread(&step.expr, &current);
                self.statements.push(Statement {
                    binding: Binding::Discard,
                    value,
                });
                current
            }
        }
    }

    /// Explicit placeholders win, otherwise the current value becomes the
    /// first argument.
    fn thread(&self, expr: &BNode, current: &BNode) -> BNode {
        if self.substituter.contains_placeholder(expr) {
            return self.substituter.substitute(expr, current);
        }
        match expr.as_ref() {
            // `y = g` feeds `g` and keeps the assignment
            Node::Assign(assign) => {
                Node::assign(assign.target.clone(), self.thread(&assign.value, current))
            }
            Node::Call(call) => Node::call(
                call.callee.clone(),
                iter::once(current.clone())
                    .chain(call.args.iter().cloned())
                    .collect(),
            ),
            _ => Node::call(expr.clone(), vec![current.clone()]),
        }
    }

    fn bind(&mut self, user: Option<Ident>, value: BNode) -> BNode {
        let (binding, name) = match user {
            Some(name) => (Binding::User(name.clone()), name),
            None => {
                let name = self.names.next_name();
                (Binding::Temp(name.clone()), name)
            }
        };
        self.statements.push(Statement { binding, value });
        Node::ident(name)
    }
}
