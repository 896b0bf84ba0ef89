use anyhow::{Context, Result};
use shared::config::{optional, parse_bool, required};

/// Bootstrap admin account written into the store at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub simulated_latency_ms: u64,
    pub admin: AdminSeed,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let port = optional::<u16>("PORT", 8000).context("PORT must be a valid u16 integer")?;
        let jwt_secret = required("JWT_SECRET")?;
        let bcrypt_cost =
            optional::<u32>("BCRYPT_COST", 4).context("BCRYPT_COST must be a valid integer")?;
        let simulated_latency_ms = optional::<u64>("SIMULATED_LATENCY_MS", 0)
            .context("SIMULATED_LATENCY_MS must be a valid integer")?;

        let admin = AdminSeed {
            email: required("ADMIN_EMAIL")?,
            password: required("ADMIN_PASSWORD")?,
            name: optional::<String>("ADMIN_NAME", "Administrator".into())?,
        };

        Ok(Self {
            port,
            jwt_secret,
            bcrypt_cost,
            simulated_latency_ms,
            admin,
            is_dev: parse_bool("DEV_MODE"),
            enable_file_log: parse_bool("ENABLE_FILE_LOG"),
        })
    }
}
