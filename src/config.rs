use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    /// Put `GET /siswa` behind the auth gate.
    pub list_requires_auth: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("ACCESS_TOKEN_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "siswa-api".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "siswa-clients".into()),
        };
        Ok(Self {
            database_url,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(5000),
            list_requires_auth: std::env::var("LIST_REQUIRES_AUTH")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

fn parse_flag(v: &str) -> bool {
    !matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
