use crate::ast::{BNode, Node};
use crate::config::ChainConfig;
use crate::error::{Error, Result};
use crate::passes::{classify, flatten, FreshNames, RewriteResult, Rewriter};

/// Entry point tying the passes together.
#[derive(Debug, Clone, Default)]
pub struct PipelineTransformer {
    config: ChainConfig,
}

impl PipelineTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Transform a pipeline given as seed arguments and steps.
    ///
    /// Seeds and steps are flattened together; the first flattened node is
    /// the initial value. Returns the seed unchanged when there is nothing to
    /// apply to it.
    pub fn transform(&self, seeds: &[BNode], steps: &[BNode]) -> Result<BNode> {
        if seeds.is_empty() {
            return Err(Error::EmptySeed);
        }
        let args: Vec<BNode> = seeds.iter().chain(steps).cloned().collect();
        self.transform_invocation(&args)
    }

    /// Transform the raw argument list of a pipeline invocation, e.g. the
    /// arguments of `@chain(x, begin f; g end)`.
    pub fn transform_invocation(&self, args: &[BNode]) -> Result<BNode> {
        Ok(self.rewrite_invocation(args)?.into_node())
    }

    /// Same as [`Self::transform_invocation`] without composing the block.
    pub fn rewrite_invocation(&self, args: &[BNode]) -> Result<RewriteResult> {
        let mut names = FreshNames::new(self.config.temp_prefix.clone(), args);
        self.rewrite_with(args, &mut names)
    }

    fn rewrite_with(&self, args: &[BNode], names: &mut FreshNames) -> Result<RewriteResult> {
        let flat = flatten(args);
        let (seed, rest) = flat.split_first().ok_or(Error::EmptySeed)?;
        let steps = rest
            .iter()
            .enumerate()
            .map(|(offset, node)| classify(offset + 1, node))
            .collect::<Result<Vec<_>>>()?;

        let result = Rewriter::new(&self.config.invocation, names).rewrite(seed, steps)?;

        debug!(
            invocation = %self.config.invocation,
            steps = rest.len(),
            statements = result.statements.len(),
            "rewrote pipeline"
        );
        Ok(result)
    }

    /// Expand every pipeline invocation inside `node`.
    ///
    /// The outermost invocation is transformed first, so a nested invocation
    /// sees the outer value in its first argument before it is expanded with
    /// its own placeholders. Synthesized names are unique across the whole
    /// tree.
    pub fn expand(&self, node: &BNode) -> Result<BNode> {
        let mut names =
            FreshNames::new(self.config.temp_prefix.clone(), std::slice::from_ref(node));
        self.expand_with(node, &mut names)
    }

    fn expand_with(&self, node: &BNode, names: &mut FreshNames) -> Result<BNode> {
        let rebuilt = match node.as_ref() {
            Node::Call(call) if node.is_invocation_of(&self.config.invocation) => {
                let transformed = self.rewrite_with(&call.args, names)?.into_node();
                return self.expand_with(&transformed, names);
            }
            Node::Call(call) => Node::call(
                self.expand_with(&call.callee, names)?,
                self.expand_all(&call.args, names)?,
            ),
            Node::Assign(assign) => Node::assign(
                self.expand_with(&assign.target, names)?,
                self.expand_with(&assign.value, names)?,
            ),
            Node::Group(group) => Node::group(self.expand_all(&group.lines, names)?),
            Node::Marker(marker) => {
                Node::marker(marker.tag, self.expand_with(&marker.inner, names)?)
            }
            Node::Ident(_) | Node::Placeholder | Node::Opaque(_) => return Ok(node.clone()),
        };
        // keep the original allocation when nothing below changed
        Ok(if rebuilt == *node { node.clone() } else { rebuilt })
    }

    fn expand_all(&self, nodes: &[BNode], names: &mut FreshNames) -> Result<Vec<BNode>> {
        nodes
            .iter()
            .map(|node| self.expand_with(node, names))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;

    #[test]
    fn test_custom_invocation_and_prefix() {
        let transformer = PipelineTransformer::with_config(
            ChainConfig::new(Ident::new("@pipe")).with_temp_prefix("v"),
        );
        let program = Node::apply("@pipe", vec![Node::ident("x"), Node::apply("f", vec![])]);

        let expanded = transformer.expand(&program).unwrap();

        assert_eq!(expanded.to_string(), "begin v1 = f(x); v1 end");
    }

    #[test]
    fn test_errors_abort_without_output() {
        let transformer = PipelineTransformer::new();
        let err = transformer
            .transform_invocation(&[
                Node::ident("x"),
                Node::apply("f", vec![]),
                Node::broadcast(Node::opaque("1 + 1")),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            Error::MalformedMarker {
                step: 2,
                found: "1 + 1".to_string(),
            }
        );
    }
}
