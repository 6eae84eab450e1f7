//! In-memory storage.
//!
//! Rows live in per-table vectors behind a [`RwLock`] and vanish with the
//! process. Identifiers are assigned from per-table counters starting at 1.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{Storage, StorageError};
use crate::models::{
    Craft, Event, NewCraft, NewEvent, NewTeamMember, NewVolunteer, TeamMember, Volunteer,
};

/// Rows plus the last identifier handed out.
struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }

    fn next_id(&mut self) -> Result<i32, StorageError> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageError::Internal("identifier sequence exhausted".into()))?;
        Ok(self.last_id)
    }
}

struct Inner {
    volunteers: Table<Volunteer>,
    crafts: Table<Craft>,
    team_members: Table<TeamMember>,
    events: Table<Event>,
}

pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                volunteers: Table::new(),
                crafts: Table::new(),
                team_members: Table::new(),
                events: Table::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::Internal("storage lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StorageError> {
        self.inner
            .write()
            .map_err(|_| StorageError::Internal("storage lock poisoned".into()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_volunteer(&self, new: NewVolunteer) -> Result<Volunteer, StorageError> {
        let mut inner = self.write()?;
        let id = inner.volunteers.next_id()?;
        let volunteer = new.into_volunteer(id, Utc::now());
        inner.volunteers.rows.push(volunteer.clone());
        Ok(volunteer)
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StorageError> {
        Ok(self.read()?.volunteers.rows.clone())
    }

    async fn create_craft(&self, new: NewCraft) -> Result<Craft, StorageError> {
        let mut inner = self.write()?;
        let id = inner.crafts.next_id()?;
        let craft = new.into_craft(id, Utc::now());
        inner.crafts.rows.push(craft.clone());
        Ok(craft)
    }

    async fn list_crafts(&self) -> Result<Vec<Craft>, StorageError> {
        Ok(self.read()?.crafts.rows.clone())
    }

    async fn get_craft(&self, id: i32) -> Result<Option<Craft>, StorageError> {
        Ok(self
            .read()?
            .crafts
            .rows
            .iter()
            .find(|craft| craft.id == id)
            .cloned())
    }

    async fn create_team_member(&self, new: NewTeamMember) -> Result<TeamMember, StorageError> {
        let mut inner = self.write()?;
        let id = inner.team_members.next_id()?;
        let member = new.into_team_member(id, Utc::now());
        inner.team_members.rows.push(member.clone());
        Ok(member)
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, StorageError> {
        Ok(self.read()?.team_members.rows.clone())
    }

    async fn create_event(&self, new: NewEvent) -> Result<Event, StorageError> {
        let mut inner = self.write()?;
        let id = inner.events.next_id()?;
        let event = new.into_event(id, Utc::now());
        inner.events.rows.push(event.clone());
        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StorageError> {
        Ok(self.read()?.events.rows.clone())
    }
}
