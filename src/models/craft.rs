use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{Fields, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Craft {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub materials: Option<Vec<String>>,
    pub instructions: String,
    pub difficulty: String,
    pub time_to_complete: String,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCraft {
    pub title: String,
    pub description: String,
    pub materials: Option<Vec<String>>,
    pub instructions: String,
    pub difficulty: String,
    pub time_to_complete: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl NewCraft {
    pub fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(input)?;
        let craft = Self {
            title: fields.required_string("title"),
            description: fields.required_string("description"),
            materials: fields.optional_string_list("materials"),
            instructions: fields.required_string("instructions"),
            difficulty: fields.required_string("difficulty"),
            time_to_complete: fields.required_string("timeToComplete"),
            category: fields.required_string("category"),
            image_url: fields.optional_string("imageUrl"),
        };
        fields.finish()?;
        Ok(craft)
    }

    pub fn into_craft(self, id: i32, created_at: DateTime<Utc>) -> Craft {
        Craft {
            id,
            title: self.title,
            description: self.description,
            materials: self.materials,
            instructions: self.instructions,
            difficulty: self.difficulty,
            time_to_complete: self.time_to_complete,
            category: self.category,
            image_url: self.image_url,
            created_at,
        }
    }
}
