use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_minutes: i64,
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "recipebox.sid".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
