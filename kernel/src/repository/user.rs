use async_trait::async_trait;

use crate::model::id::UserId;
use crate::model::user::{event::CreateUser, User};
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
}
