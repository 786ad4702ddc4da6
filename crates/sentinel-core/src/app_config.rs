use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Basic-auth credentials for the search cluster.
#[derive(Clone, PartialEq, Eq)]
pub struct ElasticCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ElasticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Cluster base URL, e.g. `http://localhost:9200`.
    pub elastic_url: String,
    pub elastic_index: String,
    pub elastic_credentials: Option<ElasticCredentials>,
    pub search_timeout_secs: u64,
    pub search_max_retries: u32,
    pub search_retry_backoff_ms: u64,
    /// Upper bound on hits fetched by queries that reshape rows.
    pub search_max_hits: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("elastic_url", &self.elastic_url)
            .field("elastic_index", &self.elastic_index)
            .field(
                "elastic_credentials",
                &self.elastic_credentials.as_ref().map(|_| "[redacted]"),
            )
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("search_max_retries", &self.search_max_retries)
            .field("search_retry_backoff_ms", &self.search_retry_backoff_ms)
            .field("search_max_hits", &self.search_max_hits)
            .finish()
    }
}
