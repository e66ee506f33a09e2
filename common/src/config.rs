/// Default address of the appliance's admin API.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8100";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the admin API, without a trailing slash.
    pub endpoint: String,
    /// Session cookie sent with every request (`name=value`).
    pub session: Option<String>,
    /// Print request bodies instead of sending them.
    ///
    /// Validation still runs.
    pub dry_run: bool,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session: None,
            dry_run: false,
            quiet: 0,
        }
    }
}

impl Config {
    /// Joins `path` onto the endpoint, tolerating a trailing slash on either side.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let cfg = Config {
            endpoint: "http://router:8100/".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.url("/admin/vlans"), "http://router:8100/admin/vlans");
        assert_eq!(cfg.url("admin/status"), "http://router:8100/admin/status");
    }
}
