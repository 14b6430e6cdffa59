//! Agent Personas
//!
//! Persona records describing an AI agent (name, role, goal, backstory,
//! tools) and the system prompt rendered from them.

pub mod catalog;

pub use catalog::TemplateCatalog;

use serde::{Deserialize, Serialize};

/// An agent persona record
///
/// Tool names are inert identifiers carried with the persona; this crate does
/// not execute tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPersona {
    /// Stable identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description shown in catalogs
    pub description: String,

    /// Professional role the agent plays
    pub role: String,

    /// What the agent works towards
    pub goal: String,

    /// Background framing the agent's behavior
    pub backstory: String,

    /// Tool identifiers associated with the persona
    #[serde(default)]
    pub tools: Vec<String>,

    /// Catalog category
    #[serde(default)]
    pub category: String,
}

impl AgentPersona {
    /// Render the system prompt that puts a model in character as this agent.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}, an AI agent with the following characteristics:\n\n\
             Role: {}\n\
             Goal: {}\n\
             Backstory: {}\n\n\
             Description: {}\n\n\
             Please respond to user queries in character, maintaining your role \
             and working towards your goal. Be helpful, professional, and stay \
             true to your backstory.",
            self.name, self.role, self.goal, self.backstory, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AgentPersona {
        AgentPersona {
            id: "navigator".to_string(),
            name: "Navigator".to_string(),
            description: "Route planning assistant".to_string(),
            role: "Senior Logistics Planner".to_string(),
            goal: "Find the fastest safe route".to_string(),
            backstory: "You have planned routes for a decade.".to_string(),
            tools: vec!["map_search".to_string()],
            category: "Logistics".to_string(),
        }
    }

    #[test]
    fn test_system_prompt_contains_all_fields() {
        let prompt = sample().system_prompt();
        assert!(prompt.starts_with("You are Navigator, an AI agent"));
        assert!(prompt.contains("Role: Senior Logistics Planner"));
        assert!(prompt.contains("Goal: Find the fastest safe route"));
        assert!(prompt.contains("Backstory: You have planned routes for a decade."));
        assert!(prompt.contains("Description: Route planning assistant"));
        assert!(prompt.ends_with("stay true to your backstory."));
    }

    #[test]
    fn test_persona_serde_roundtrip() {
        let persona = sample();
        let json = serde_json::to_string(&persona).unwrap();
        let back: AgentPersona = serde_json::from_str(&json).unwrap();
        assert_eq!(back, persona);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "minimal",
            "name": "Minimal",
            "description": "d",
            "role": "r",
            "goal": "g",
            "backstory": "b"
        }"#;
        let persona: AgentPersona = serde_json::from_str(json).unwrap();
        assert!(persona.tools.is_empty());
        assert!(persona.category.is_empty());
    }
}
