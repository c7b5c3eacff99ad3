use std::env;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_type: String,
    pub cron_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8094".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid u16".to_string())?;

        let store_type = env::var("STORE_TYPE").unwrap_or_else(|_| "memory".to_string());

        let cron_secret =
            env::var("CRON_SECRET").map_err(|_| "CRON_SECRET must be set".to_string())?;

        Ok(Config {
            host,
            port,
            store_type,
            cron_secret,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
