//! Persistence gateway.
//!
//! Handlers talk to the store only through [`Storage`], held as an
//! `Arc<dyn Storage>` in the router state.
//!
//! | Type | When to use |
//! |------|-------------|
//! | [`PgStorage`] | Production; PostgreSQL through a connection pool |
//! | [`MemoryStorage`] | Tests and local experiments |
//!
//! [`PgStorage`]: postgres::PgStorage
//! [`MemoryStorage`]: memory::MemoryStorage

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    Craft, Event, NewCraft, NewEvent, NewTeamMember, NewVolunteer, TeamMember, Volunteer,
};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Create and read operations for every entity.
///
/// Each `create_*` performs exactly one write; the store assigns `id` and
/// `created_at`. Lists come back ordered by `id`.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn create_volunteer(&self, new: NewVolunteer) -> Result<Volunteer, StorageError>;

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StorageError>;

    async fn create_craft(&self, new: NewCraft) -> Result<Craft, StorageError>;

    async fn list_crafts(&self) -> Result<Vec<Craft>, StorageError>;

    /// Returns `None` when no craft has this `id`.
    async fn get_craft(&self, id: i32) -> Result<Option<Craft>, StorageError>;

    async fn create_team_member(&self, new: NewTeamMember) -> Result<TeamMember, StorageError>;

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, StorageError>;

    async fn create_event(&self, new: NewEvent) -> Result<Event, StorageError>;

    async fn list_events(&self) -> Result<Vec<Event>, StorageError>;
}
