//! Metadata methods for variable and constraint groups.

use std::collections::BTreeMap;

use crate::model::error::ModelError;
use crate::model::Model;

impl Model {
    /// Set metadata for a variable group.
    pub fn set_variable_metadata(
        &mut self,
        group: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        if self.variables.get(group).is_none() {
            return Err(ModelError::UnknownGroup(group.to_string()));
        }
        self.variable_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(group.to_string(), metadata);
        Ok(())
    }

    /// Get metadata for a variable group.
    pub fn get_variable_metadata(&self, group: &str) -> Option<&serde_json::Value> {
        self.variable_metadata
            .as_ref()
            .and_then(|meta| meta.get(group))
    }

    /// Set metadata for a constraint group.
    pub fn set_constraint_metadata(
        &mut self,
        group: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ModelError> {
        if self.constraints.get(group).is_none() {
            return Err(ModelError::UnknownGroup(group.to_string()));
        }
        self.constraint_metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(group.to_string(), metadata);
        Ok(())
    }

    /// Get metadata for a constraint group.
    pub fn get_constraint_metadata(&self, group: &str) -> Option<&serde_json::Value> {
        self.constraint_metadata
            .as_ref()
            .and_then(|meta| meta.get(group))
    }
}
