use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
        } = value;
        let role = role
            .parse::<Role>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        User::new(user_id, user_name, email, role)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}
