use crate::ast::Ident;
use std::sync::OnceLock;

pub const DEFAULT_INVOCATION: &str = "@chain";
pub const DEFAULT_TEMP_PREFIX: &str = "__chain_";

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|val| {
        let trimmed = val.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Name of the pipeline-invocation callee, `CHAIN_INVOCATION` overrides it.
pub fn invocation_name() -> &'static str {
    static INVOCATION: OnceLock<String> = OnceLock::new();
    INVOCATION.get_or_init(|| {
        env_string("CHAIN_INVOCATION").unwrap_or_else(|| DEFAULT_INVOCATION.to_string())
    })
}

/// Prefix of synthesized binding names, `CHAIN_TEMP_PREFIX` overrides it.
pub fn temp_prefix() -> &'static str {
    static PREFIX: OnceLock<String> = OnceLock::new();
    PREFIX.get_or_init(|| {
        env_string("CHAIN_TEMP_PREFIX").unwrap_or_else(|| DEFAULT_TEMP_PREFIX.to_string())
    })
}

/// Settings shared by every pass of one transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Callee identifying a (nested) pipeline invocation.
    pub invocation: Ident,
    pub temp_prefix: String,
}

impl ChainConfig {
    pub fn new(invocation: impl Into<Ident>) -> Self {
        Self {
            invocation: invocation.into(),
            temp_prefix: temp_prefix().to_string(),
        }
    }

    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(invocation_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ChainConfig::new("@pipe").with_temp_prefix("tmp_");
        assert_eq!(config.invocation, Ident::new("@pipe"));
        assert_eq!(config.temp_prefix, "tmp_");
    }

    #[test]
    fn test_unset_env_falls_back() {
        assert_eq!(env_string("CHAIN_CORE_TEST_UNSET_VARIABLE"), None);
    }
}
