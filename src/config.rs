use serde::{Deserialize, Serialize};

/// Reescritura por prefijo de las URLs salientes (`/api/...` -> backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub source: String,
    pub destination: String,
}

impl RewriteRule {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.trim_end_matches('/').to_string(),
            destination: destination.trim_end_matches('/').to_string(),
        }
    }

    /// Reescribir `url` si empieza con `source` en un límite de segmento
    pub fn apply(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(self.source.as_str())?;
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') {
            Some(format!("{}{}", self.destination, rest))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub rewrites: Vec<RewriteRule>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "/api".to_string(),
            backend_url_production: "https://marksarion.onrender.com".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            rewrites: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let rewrites = option_env!("API_PROXY_TARGET")
            .filter(|target| !target.is_empty())
            .map(|target| vec![RewriteRule::new("/api", target)])
            .unwrap_or_default();

        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            rewrites,
        }
    }

    /// URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// URL completa de un path: base + path, luego la primera regla que aplique
    pub fn endpoint(&self, path: &str) -> String {
        let url = format!("{}{}", self.backend_url().trim_end_matches('/'), path);
        self.rewrites
            .iter()
            .find_map(|rule| rule.apply(&url))
            .unwrap_or(url)
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), "/api");

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://marksarion.onrender.com");
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let config = AppConfig {
            backend_url_development: "https://backend.example/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.endpoint("/positions"), "https://backend.example/positions");
    }

    #[test]
    fn rewrite_forwards_api_prefix() {
        let config = AppConfig {
            rewrites: vec![RewriteRule::new("/api", "http://localhost:23176/")],
            ..AppConfig::default()
        };
        assert_eq!(config.endpoint("/auth/login"), "http://localhost:23176/auth/login");
        assert_eq!(config.endpoint("/positions/7"), "http://localhost:23176/positions/7");
    }

    #[test]
    fn rewrite_respects_segment_boundary() {
        let rule = RewriteRule::new("/api", "http://backend");
        assert_eq!(rule.apply("/apiary/x"), None);
        assert_eq!(rule.apply("/api"), Some("http://backend".to_string()));
        assert_eq!(rule.apply("/api?x=1"), Some("http://backend?x=1".to_string()));
    }
}
