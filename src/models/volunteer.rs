use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{Fields, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub school: Option<String>,
    pub interests: Option<Vec<String>>,
    pub availability: Option<String>,
    pub service_hours: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Volunteer sign-up as submitted by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub school: Option<String>,
    pub interests: Option<Vec<String>>,
    pub availability: Option<String>,
    pub service_hours: Option<bool>,
}

impl NewVolunteer {
    pub fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(input)?;
        let volunteer = Self {
            name: fields.required_string("name"),
            email: fields.required_string("email"),
            phone: fields.optional_string("phone"),
            age: fields.optional_integer("age"),
            school: fields.optional_string("school"),
            interests: fields.optional_string_list("interests"),
            availability: fields.optional_string("availability"),
            service_hours: fields.optional_boolean("serviceHours"),
        };
        fields.finish()?;
        Ok(volunteer)
    }

    pub fn into_volunteer(self, id: i32, created_at: DateTime<Utc>) -> Volunteer {
        Volunteer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            age: self.age,
            school: self.school,
            interests: self.interests,
            availability: self.availability,
            service_hours: self.service_hours,
            created_at,
        }
    }
}
