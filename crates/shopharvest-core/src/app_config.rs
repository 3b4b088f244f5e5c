/// Desktop-browser identity sent with every storefront request unless
/// `SHOPHARVEST_USER_AGENT` overrides it.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Selects the log rendering: `production` disables ANSI colors.
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    /// `0` disables the per-request timeout.
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight collection-detail and blog-article fetches.
    pub max_concurrency: usize,
    pub product_limit: u32,
}
