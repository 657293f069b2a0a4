use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    // Recommendation cache / mind backend
    pub recommendation_cache_ttl_ms: u64,
    pub mind_backend_url: String,
    pub mind_backend_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            recommendation_cache_ttl_ms: parse_millis(
                "RECOMMENDATION_CACHE_TTL_MS",
                &env::var("RECOMMENDATION_CACHE_TTL_MS").unwrap_or_else(|_| "1800000".into()), // 30 minutes
            ),
            mind_backend_url: env::var("MIND_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            mind_backend_timeout_ms: parse_millis(
                "MIND_BACKEND_TIMEOUT_MS",
                &env::var("MIND_BACKEND_TIMEOUT_MS").unwrap_or_else(|_| "20000".into()),
            ),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn recommendation_cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(
            i64::try_from(self.recommendation_cache_ttl_ms).unwrap_or(i64::MAX),
        )
    }

    pub fn mind_backend_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.mind_backend_timeout_ms)
    }
}

/// Millisecond settings must be whole, non-negative numbers.
fn parse_millis(name: &str, raw: &str) -> u64 {
    raw.trim()
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a non-negative number of milliseconds"))
}

#[cfg(test)]
impl Config {
    /// Config suitable for router tests; nothing here is dialled.
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/mindwell_test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "test-secret".into(),
            recommendation_cache_ttl_ms: 30 * 60 * 1000,
            mind_backend_url: "http://127.0.0.1:9".into(),
            mind_backend_timeout_ms: 1_000,
        }
    }
}
