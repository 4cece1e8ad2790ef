use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_public_key: String, // Public key (PEM)
    pub business_hours_start: u32,
    pub business_hours_end: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            business_hours_start: env::var("BUSINESS_HOURS_START").unwrap_or_else(|_| "9".to_string()).parse().expect("BUSINESS_HOURS_START must be an hour (0-23)"),
            business_hours_end: env::var("BUSINESS_HOURS_END").unwrap_or_else(|_| "17".to_string()).parse().expect("BUSINESS_HOURS_END must be an hour (1-24)"),
        }
    }
}
