use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{Fields, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub is_leader: Option<bool>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub is_leader: Option<bool>,
}

impl NewTeamMember {
    pub fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(input)?;
        let member = Self {
            name: fields.required_string("name"),
            role: fields.required_string("role"),
            bio: fields.optional_string("bio"),
            image_url: fields.optional_string("imageUrl"),
            is_leader: fields.optional_boolean("isLeader"),
        };
        fields.finish()?;
        Ok(member)
    }

    pub fn into_team_member(self, id: i32, created_at: DateTime<Utc>) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            role: self.role,
            bio: self.bio,
            image_url: self.image_url,
            is_leader: self.is_leader,
            created_at,
        }
    }
}
