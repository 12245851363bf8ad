//! Ordered, copy-on-write ingredient list.
//!
//! Every edit returns a new snapshot. Entries that an edit does not touch are
//! shared with the previous snapshot, so observers can compare them by pointer.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::IngredientError;

/// A single ingredient row. Both fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Which half of an ingredient row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Quantity,
}

impl IngredientField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientField::Name => "name",
            IngredientField::Quantity => "quantity",
        }
    }
}

/// Immutable snapshot of the ingredient rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientList {
    entries: Arc<[Arc<Ingredient>]>,
}

impl Default for IngredientList {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientList {
    /// A list holding one empty row.
    pub fn new() -> Self {
        Self {
            entries: Arc::from(vec![Arc::new(Ingredient::default())]),
        }
    }

    /// Build a list from existing rows. An empty input yields a single empty row.
    pub fn from_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let entries: Vec<Arc<Ingredient>> = ingredients.into_iter().map(Arc::new).collect();
        if entries.is_empty() {
            return Self::new();
        }
        Self {
            entries: Arc::from(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ingredient> {
        self.entries.get(index).map(|e| e.as_ref())
    }

    /// Shared handle to one row, for identity comparisons between snapshots.
    pub fn entry(&self, index: usize) -> Option<&Arc<Ingredient>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter().map(|e| e.as_ref())
    }

    /// Whether the UI should offer a remove control.
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    /// Append one empty row.
    pub fn add(&self) -> Self {
        let mut entries = self.entries.to_vec();
        entries.push(Arc::new(Ingredient::default()));
        Self {
            entries: Arc::from(entries),
        }
    }

    /// Drop the row at `index`. The last remaining row cannot be removed.
    pub fn remove(&self, index: usize) -> Result<Self, IngredientError> {
        self.check_index(index)?;
        if !self.can_remove() {
            return Err(IngredientError::LastIngredient);
        }

        let entries: Vec<Arc<Ingredient>> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| Arc::clone(e))
            .collect();

        Ok(Self {
            entries: Arc::from(entries),
        })
    }

    /// Replace one field of the row at `index`.
    pub fn update(
        &self,
        index: usize,
        field: IngredientField,
        value: impl Into<String>,
    ) -> Result<Self, IngredientError> {
        self.check_index(index)?;

        let mut edited = Ingredient::clone(&self.entries[index]);
        match field {
            IngredientField::Name => edited.name = value.into(),
            IngredientField::Quantity => edited.quantity = value.into(),
        }

        let mut entries = self.entries.to_vec();
        entries[index] = Arc::new(edited);
        Ok(Self {
            entries: Arc::from(entries),
        })
    }

    /// Owned copy of the rows, in order.
    pub fn to_vec(&self) -> Vec<Ingredient> {
        self.iter().cloned().collect()
    }

    fn check_index(&self, index: usize) -> Result<(), IngredientError> {
        if index >= self.entries.len() {
            return Err(IngredientError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}
