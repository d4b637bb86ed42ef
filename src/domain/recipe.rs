//! Recipe Entity
//!
//! The recipe itself is mostly edited through CRUD surfaces outside this
//! core; here it is the referent of schedule entries and ordered rows.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A recipe, referenced by calendar entries and by its ordered rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    /// Portions one batch yields; scales the shopping aggregation
    pub serves: u32,
}

impl Recipe {
    pub fn new(id: u32, title: String, serves: u32) -> Self {
        Self { id, title, serves }
    }
}

impl Entity for Recipe {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_creation() {
        let recipe = Recipe::new(1, "Shakshuka".to_string(), 2);
        assert_eq!(recipe.id(), 1);
        assert_eq!(recipe.title, "Shakshuka");
        assert_eq!(recipe.serves, 2);
    }
}
