use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub allowed_origin: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from the environment once at startup.
    ///
    /// `JWT_SECRET` is mandatory: without it every token would be signed with a
    /// well-known value, so startup fails instead of falling back.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);
        let database_url = std::env::var("DATABASE_URL")?;
        let allowed_origin = std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "*".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_seconds: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 60 * 24 * 7),
        };
        Ok(Self {
            port,
            database_url,
            allowed_origin,
            jwt,
        })
    }
}
