//! Session configuration.
//!
//! This module provides the option set a caller hands to the event source
//! when starting a session. The consumer itself only reads `allowed_tools`,
//! `max_turns`, and the sub-agent registry; everything else is forwarded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{AgentSinkError, Result};

/// Configuration for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model variant to execute the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Tool names the session may invoke.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,

    /// Ceiling on tool-invocation events before forced termination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,

    /// Sub-agents the session may delegate to, by name.
    ///
    /// Purely descriptive metadata forwarded to the event source; the
    /// consumer only records that a delegation occurred.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sub_agents: IndexMap<String, SubAgentSpec>,
}

impl SessionConfig {
    /// Create a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add one allowed tool.
    #[must_use]
    pub fn allowed_tool(mut self, name: impl Into<String>) -> Self {
        self.allowed_tools.push(name.into());
        self
    }

    /// Set the allowed tool names.
    #[must_use]
    pub fn allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Set the turn ceiling.
    #[must_use]
    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Register a sub-agent.
    #[must_use]
    pub fn sub_agent(mut self, name: impl Into<String>, spec: SubAgentSpec) -> Self {
        self.sub_agents.insert(name.into(), spec);
        self
    }

    /// Whether any registered sub-agent declares `name` in its tool set.
    #[must_use]
    pub fn declares_sub_agent_tool(&self, name: &str) -> bool {
        self.sub_agents
            .values()
            .any(|spec| spec.allowed_tools.iter().any(|t| t == name))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_turns` is zero, which would
    /// terminate every session on its first tool invocation.
    pub fn validate(&self) -> Result<()> {
        if self.max_turns == Some(0) {
            return Err(AgentSinkError::Configuration(
                "max_turns must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Descriptive metadata for a delegatable sub-agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubAgentSpec {
    /// What the sub-agent does; shown to the delegating model.
    pub description: String,

    /// Prompt template the sub-agent is launched with.
    pub prompt_template: String,

    /// Tool names the sub-agent may invoke.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,

    /// Model override for the sub-agent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl SubAgentSpec {
    /// Create a new sub-agent spec.
    pub fn new(description: impl Into<String>, prompt_template: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            prompt_template: prompt_template.into(),
            allowed_tools: Vec::new(),
            model: None,
        }
    }

    /// Set the sub-agent's tool set.
    #[must_use]
    pub fn allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sub-agent's model override.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_builder() {
        let config = SessionConfig::new()
            .model("haiku-lite")
            .allowed_tools(["Read", "Glob"])
            .max_turns(5)
            .sub_agent(
                "security-scanner",
                SubAgentSpec::new("Scans for vulnerabilities", "Scan {dir} for issues")
                    .allowed_tools(["Read", "Grep"]),
            );

        assert_eq!(config.model.as_deref(), Some("haiku-lite"));
        assert_eq!(config.allowed_tools, vec!["Read", "Glob"]);
        assert_eq!(config.max_turns, Some(5));
        assert_eq!(config.sub_agents.len(), 1);
    }

    #[test]
    fn test_declares_sub_agent_tool() {
        let config = SessionConfig::new().sub_agent(
            "security-scanner",
            SubAgentSpec::new("scanner", "scan").allowed_tools(["Grep"]),
        );

        assert!(config.declares_sub_agent_tool("Grep"));
        assert!(!config.declares_sub_agent_tool("Bash"));
    }

    #[test]
    fn test_validate_rejects_zero_turns() {
        let config = SessionConfig::new().max_turns(0);
        assert!(config.validate().is_err());

        let config = SessionConfig::new().max_turns(1);
        assert!(config.validate().is_ok());

        assert!(SessionConfig::new().validate().is_ok());
    }

    #[test]
    fn test_serde_skips_empty() {
        let json = serde_json::to_value(SessionConfig::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let json = serde_json::to_value(SessionConfig::new().max_turns(3)).unwrap();
        assert_eq!(json, serde_json::json!({"max_turns": 3}));
    }

    #[test]
    fn test_sub_agent_registry_preserves_order() {
        let config = SessionConfig::new()
            .sub_agent("b-agent", SubAgentSpec::new("b", "b"))
            .sub_agent("a-agent", SubAgentSpec::new("a", "a"));

        let names: Vec<_> = config.sub_agents.keys().cloned().collect();
        assert_eq!(names, vec!["b-agent", "a-agent"]);
    }
}
