//! In-memory template table.
//!
//! Serves as the resolver for tests and tools, and as the cache that
//! data-driven loaders populate once and hand to the engine.

use std::collections::BTreeMap;

use super::{Template, TemplateId, TemplateResolver};

/// Template resolver backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTemplates {
    templates: BTreeMap<TemplateId, Template>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a template, returning the one it replaced.
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.id.clone(), template)
    }

    pub fn with(mut self, template: Template) -> Self {
        self.insert(template);
        self
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for StaticTemplates {
    fn from_iter<T: IntoIterator<Item = Template>>(iter: T) -> Self {
        let mut table = Self::new();
        for template in iter {
            table.insert(template);
        }
        table
    }
}

impl TemplateResolver for StaticTemplates {
    fn resolve(&self, id: &TemplateId) -> Option<Template> {
        self.templates.get(id).cloned()
    }
}
