//! Persona Template Catalog
//!
//! Built-in persona templates compiled into the crate, with id and category
//! lookup.

use crate::error::{AgentryError, Result};
use crate::persona::AgentPersona;

/// Catalog of persona templates
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<AgentPersona>,
}

impl TemplateCatalog {
    /// Load the built-in template catalog.
    pub fn builtin() -> Result<Self> {
        let raw = include_str!("../../templates.json");
        let templates = serde_json::from_str(raw).map_err(|e| {
            AgentryError::Config(format!("Failed to parse built-in templates.json: {}", e))
        })?;

        Ok(Self { templates })
    }

    /// Build a catalog from caller-supplied personas.
    pub fn from_personas(templates: Vec<AgentPersona>) -> Self {
        Self { templates }
    }

    /// All templates, in catalog order.
    pub fn all(&self) -> &[AgentPersona] {
        &self.templates
    }

    /// Look up a template by id.
    pub fn by_id(&self, id: &str) -> Option<&AgentPersona> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in a category, in catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&AgentPersona> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Distinct categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for template in &self.templates {
            if !seen.contains(&template.category.as_str()) {
                seen.push(template.category.as_str());
            }
        }
        seen
    }
}
