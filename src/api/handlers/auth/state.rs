//! Runtime configuration shared by session handlers.

/// Auth-related settings resolved from the CLI at startup.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    frontend_base_url: String,
}

impl AuthConfig {
    pub fn new(frontend_base_url: String) -> Self {
        Self { frontend_base_url }
    }

    /// Origin allowed by CORS and used to decide cookie security.
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    /// Only mark cookies secure when the frontend is served over HTTPS.
    pub fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_frontend_means_secure_cookies() {
        let config = AuthConfig::new("https://app.rezervi.dev".to_string());
        assert!(config.session_cookie_secure());
    }

    #[test]
    fn http_frontend_means_plain_cookies() {
        let config = AuthConfig::new("http://localhost:5173".to_string());
        assert!(!config.session_cookie_secure());
    }
}
