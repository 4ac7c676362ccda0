/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the admin
/// password, which stays unset (and every admin check fails) until provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `25562`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Password staff send in `x-admin-password` to edit command permissions.
    pub admin_password: Option<String>,
    /// Leaderboard page size when the request gives none (default: `10`).
    pub leaderboard_page_size: u64,
    /// Upper bound for a requested leaderboard page size (default: `50`).
    pub leaderboard_max_page_size: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `25562`                    |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `ADMIN_PASSWORD`            | unset                      |
    /// | `LEADERBOARD_PAGE_SIZE`     | `10`                       |
    /// | `LEADERBOARD_MAX_PAGE_SIZE` | `50`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "25562".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let leaderboard_page_size: u64 = std::env::var("LEADERBOARD_PAGE_SIZE")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("LEADERBOARD_PAGE_SIZE must be a valid u64");

        let leaderboard_max_page_size: u64 = std::env::var("LEADERBOARD_MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("LEADERBOARD_MAX_PAGE_SIZE must be a valid u64");

        assert!(
            leaderboard_page_size >= 1 && leaderboard_page_size <= leaderboard_max_page_size,
            "LEADERBOARD_PAGE_SIZE must be between 1 and LEADERBOARD_MAX_PAGE_SIZE"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_password,
            leaderboard_page_size,
            leaderboard_max_page_size,
        }
    }
}
