use crate::model::id::RoomId;
use shared::error::{AppError, AppResult};

pub mod event;

use event::UpdateRoom;

/// A bookable room from the catalog. Fields are private on purpose: the
/// catalog invariants (non-blank name/location, positive capacity) hold for
/// the whole lifetime of the value, and `resources` is only ever handed out
/// as a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    name: String,
    capacity: i32,
    location: String,
    resources: Vec<String>,
    active: bool,
}

impl Room {
    pub fn new(
        id: RoomId,
        name: String,
        capacity: i32,
        location: String,
        resources: Vec<String>,
        active: bool,
    ) -> AppResult<Self> {
        validate_name(&name)?;
        validate_capacity(capacity)?;
        validate_location(&location)?;
        Ok(Self {
            id,
            name,
            capacity,
            location,
            resources,
            active,
        })
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns a copy; the internal collection is never exposed.
    pub fn resources(&self) -> Vec<String> {
        self.resources.clone()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rename(&mut self, name: String) -> AppResult<()> {
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_capacity(&mut self, capacity: i32) -> AppResult<()> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(())
    }

    pub fn relocate(&mut self, location: String) -> AppResult<()> {
        validate_location(&location)?;
        self.location = location;
        Ok(())
    }

    pub fn replace_resources(&mut self, resources: Vec<String>) {
        self.resources = resources;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn apply(&mut self, event: UpdateRoom) -> AppResult<()> {
        if let Some(name) = event.name {
            self.rename(name)?;
        }
        if let Some(capacity) = event.capacity {
            self.change_capacity(capacity)?;
        }
        if let Some(location) = event.location {
            self.relocate(location)?;
        }
        if let Some(resources) = event.resources {
            self.replace_resources(resources);
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidRequest("room name must not be blank".into()));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> AppResult<()> {
    if capacity <= 0 {
        return Err(AppError::InvalidRequest(
            "room capacity must be greater than zero".into(),
        ));
    }
    Ok(())
}

fn validate_location(location: &str) -> AppResult<()> {
    if location.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "room location must not be blank".into(),
        ));
    }
    Ok(())
}
