use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reminder: ReminderConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let reminder = ReminderConfig {
            sweep_interval_seconds: match std::env::var("REMINDER_SWEEP_INTERVAL_SECONDS") {
                Ok(v) => v.parse()?,
                Err(_) => 60,
            },
        };
        Ok(Self { database, reminder })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct ReminderConfig {
    pub sweep_interval_seconds: u64,
}
