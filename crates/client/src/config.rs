//! Client configuration

/// Connection settings for the parish API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL without the `/api/v1` prefix (e.g. `http://localhost:3000`).
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Root of the versioned API, without a trailing slash.
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_strips_trailing_slash() {
        assert_eq!(
            ClientConfig::new("http://parish.local/").api_root(),
            "http://parish.local/api/v1"
        );
    }
}
