//! Team domain entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Team represents the household or group a calendar belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

impl Entity for Team {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Team {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }
}
