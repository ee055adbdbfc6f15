use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub token_cookie: String,
    // comma separated
    pub cors_origins: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "jobboard")?
            .set_default("listen_port", "5000")?
            .set_default("database_name", "jobsDB")?
            .set_default("token_ttl_hours", 24)?
            .set_default("token_cookie", "token")?
            .set_default("cors_origins", "http://localhost:5173")?
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
