use crate::model::{id::UserId, role::Role};
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: Role,
}

impl User {
    pub fn new(id: UserId, name: String, email: String, role: Role) -> AppResult<Self> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest("user name must not be blank".into()));
        }
        if email.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "user email must not be blank".into(),
            ));
        }
        Ok(Self {
            id,
            name,
            email,
            role,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
