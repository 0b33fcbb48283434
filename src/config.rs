//! Runtime configuration from environment (and `.env` when present).

use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// `DATABASE_URL` value that selects the in-process store instead of PostgreSQL.
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub db_max_connections: u32,
    pub admin: AdminSeed,
}

/// Account created on startup when no admin row exists.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub name: String,
    pub userid: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        AdminSeed {
            name: "MasterAdmin".into(),
            userid: "admin".into(),
            password: "pass".into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = AdminSeed::default();

        Ok(AppConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/inventory".into()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parsed("PORT", 5000)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 5)?,
            admin: AdminSeed {
                name: env::var("ADMIN_NAME").unwrap_or(defaults.name),
                userid: env::var("ADMIN_USERID").unwrap_or(defaults.userid),
                password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.password),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn parsed<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_value(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
