use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{Fields, ValidationErrors};

/// Attendee count stored when a client leaves `attendees` out.
pub const DEFAULT_ATTENDEES: i32 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub attendees: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub attendees: i32,
}

impl NewEvent {
    pub fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(input)?;
        let event = Self {
            title: fields.required_string("title"),
            description: fields.required_string("description"),
            date: fields.required_timestamp("date"),
            location: fields.optional_string("location"),
            image_url: fields.optional_string("imageUrl"),
            attendees: fields
                .optional_integer("attendees")
                .unwrap_or(DEFAULT_ATTENDEES),
        };
        fields.finish()?;
        Ok(event)
    }

    pub fn into_event(self, id: i32, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            image_url: self.image_url,
            attendees: self.attendees,
            created_at,
        }
    }
}
