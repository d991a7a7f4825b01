use async_trait::async_trait;
use derive_new::new;

use kernel::model::id::UserId;
use kernel::model::user::{event::CreateUser, User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user = User::new(UserId::new(), event.name, event.email, event.role)?;

        let res = sqlx::query(
            r#"
            INSERT INTO users (user_id, user_name, email, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.email())
        .bind(user.role().to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no user record has been created".into(),
            ));
        }

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, role
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, role
            FROM users
            ORDER BY user_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }
}
