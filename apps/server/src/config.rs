// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::path::PathBuf;

/// Origins allowed when `CORS_ORIGINS` is unset (Angular/Vite dev servers).
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:4200,http://localhost:5173,http://127.0.0.1:4200,http://127.0.0.1:5173";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Directory where uploaded files are stored.
    pub upload_dir: PathBuf,
    /// Maximum file size in MB.
    pub max_file_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Allowed CORS origins (comma-separated, or "*" for all).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "57750".into())
                .parse()
                .unwrap_or(57750),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    std::env::current_dir()
                        .map(|dir| dir.join("uploads"))
                        .unwrap_or_else(|_| PathBuf::from("./uploads"))
                }),
            max_file_size_mb: std::env::var("MAX_FILE_SIZE_MB")
                .unwrap_or_else(|_| "500".into())
                .parse()
                .unwrap_or(500),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .unwrap_or(300),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
            ),
        }
    }

    /// Maximum upload size in bytes.
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Whether any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_origins(value: &str) -> Config {
        Config {
            cors_origins: parse_origins(value),
            ..Config::from_env()
        }
    }

    #[test]
    fn test_default_origins_are_local_dev_servers() {
        let config = with_origins(DEFAULT_CORS_ORIGINS);
        assert_eq!(config.cors_origins.len(), 4);
        assert!(config.cors_origins.contains(&"http://localhost:5173".to_string()));
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_wildcard_origin() {
        assert!(with_origins("*").allows_any_origin());
        assert_eq!(
            with_origins(" https://a.example , ,https://b.example").cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_max_file_size_bytes() {
        let config = Config {
            max_file_size_mb: 2,
            ..Config::from_env()
        };
        assert_eq!(config.max_file_size_bytes(), 2 * 1024 * 1024);
    }
}
