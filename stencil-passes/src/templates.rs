//! Template registry
//!
//! Describes every template visible across a file set. Built by the driver
//! before the fileset passes run; only fileset passes consult it.

use std::collections::HashMap;

use crate::ast::{FileSetNode, NodeId, Visibility};

/// What the registry knows about one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub name: String,
    pub file_path: String,
    pub id: NodeId,
    pub visibility: Visibility,
}

#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateMetadata>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the metadata of every template in the set
    ///
    /// A later template with an already registered name replaces the
    /// earlier one; duplicate detection is a pass concern.
    pub fn from_file_set(file_set: &FileSetNode) -> Self {
        let mut registry = Self::new();
        for file in &file_set.files {
            for template in &file.templates {
                registry.register(TemplateMetadata {
                    name: template.name.clone(),
                    file_path: file.path.clone(),
                    id: template.id,
                    visibility: template.visibility,
                });
            }
        }
        registry
    }

    pub fn register(&mut self, metadata: TemplateMetadata) {
        self.templates.insert(metadata.name.clone(), metadata);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateMetadata> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
