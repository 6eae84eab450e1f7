use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{Storage, StorageError};
use crate::models::{
    Craft, Event, NewCraft, NewEvent, NewTeamMember, NewVolunteer, TeamMember, Volunteer,
};

/// PostgreSQL-backed [`Storage`].
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!("Successfully connected to database");
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("Migrations run successfully");
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create_volunteer(&self, new: NewVolunteer) -> Result<Volunteer, StorageError> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            INSERT INTO volunteers
                (name, email, phone, age, school, interests, availability, service_hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.age)
        .bind(new.school)
        .bind(new.interests)
        .bind(new.availability)
        .bind(new.service_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(volunteer)
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StorageError> {
        let volunteers = sqlx::query_as::<_, Volunteer>("SELECT * FROM volunteers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(volunteers)
    }

    async fn create_craft(&self, new: NewCraft) -> Result<Craft, StorageError> {
        let craft = sqlx::query_as::<_, Craft>(
            r#"
            INSERT INTO crafts
                (title, description, materials, instructions, difficulty,
                 time_to_complete, category, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.materials)
        .bind(new.instructions)
        .bind(new.difficulty)
        .bind(new.time_to_complete)
        .bind(new.category)
        .bind(new.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(craft)
    }

    async fn list_crafts(&self) -> Result<Vec<Craft>, StorageError> {
        let crafts = sqlx::query_as::<_, Craft>("SELECT * FROM crafts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(crafts)
    }

    async fn get_craft(&self, id: i32) -> Result<Option<Craft>, StorageError> {
        let craft = sqlx::query_as::<_, Craft>("SELECT * FROM crafts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(craft)
    }

    async fn create_team_member(&self, new: NewTeamMember) -> Result<TeamMember, StorageError> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (name, role, bio, image_url, is_leader)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new.name)
        .bind(new.role)
        .bind(new.bio)
        .bind(new.image_url)
        .bind(new.is_leader)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, StorageError> {
        let members = sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn create_event(&self, new: NewEvent) -> Result<Event, StorageError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, date, location, image_url, attendees)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.date)
        .bind(new.location)
        .bind(new.image_url)
        .bind(new.attendees)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StorageError> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }
}
