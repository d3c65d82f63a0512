/// Process configuration, resolved from the environment once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub private_key_path: String,
    pub public_key_path: String,
    pub bind_addr: String,
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// DATABASE_URL has no default; everything else falls back to the
    /// conventional local-development values.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/twit".to_string()),
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "app.rsa".to_string()),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "app.rsa.pub".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}
