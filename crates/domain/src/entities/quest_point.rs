//! Quest-point entity - a location-bound collection of ordered quests.

use serde::{Deserialize, Serialize};

use crate::ids::{CityId, QuestPointId};

/// A point of interest on the city map. The quests it contains are fetched
/// separately and ordered by their `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestPoint {
    pub id: QuestPointId,
    pub city_id: CityId,
    pub name: String,
    pub description: String,
}

impl QuestPoint {
    pub fn new(city_id: CityId, name: impl Into<String>) -> Self {
        Self {
            id: QuestPointId::new(),
            city_id,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
