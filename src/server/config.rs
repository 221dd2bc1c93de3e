use std::env;
use std::net::SocketAddr;

#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub http_addr: SocketAddr,
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let http_addr = env::var("HTTP_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid HTTP_ADDR: {e}"))?;

        let cors_origin = env::var("CORS_ORIGIN").ok();

        Ok(ServerConfig {
            database_url,
            http_addr,
            cors_origin,
        })
    }
}
