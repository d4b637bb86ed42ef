//! Recipe Row Entity
//!
//! One line of a recipe's editable body: a step, an ingredient, or a section
//! header. Steps form one ordered collection per recipe; ingredients and
//! section headers share another.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Row kind determines which ordered collection the row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    #[default]
    Ingredient,
    /// Heading grouping the ingredients below it
    Section,
    Step,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Ingredient => "ingredient",
            RowKind::Section => "section",
            RowKind::Step => "step",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "section" => RowKind::Section,
            "step" => RowKind::Step,
            _ => RowKind::Ingredient,
        }
    }
}

/// A row of a recipe body, ordered by fractional position
///
/// `position` is an opaque sort key: display order is obtained by sorting on
/// it, and an index into that sorted sequence is a view-time artifact only.
/// The key is assigned at creation and rewritten exclusively by a completed
/// drag, never by content edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRow {
    /// Unique identifier
    pub id: u32,
    /// Recipe this row belongs to
    pub recipe_id: u32,
    /// Which ordered collection the row lives in
    pub kind: RowKind,
    /// Row text content (ingredient line, step instruction, section title)
    pub text: String,
    /// Fractional sort key within the collection
    pub position: f64,
}

impl RecipeRow {
    pub fn new(id: u32, recipe_id: u32, kind: RowKind, text: String, position: f64) -> Self {
        Self {
            id,
            recipe_id,
            kind,
            text,
            position,
        }
    }
}

impl Entity for RecipeRow {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
