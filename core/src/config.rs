//! Client configuration: the API base URL and the page size.

use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PAGE_SIZE: usize = 6;

pub const API_URL_ENV: &str = "SCHOOL_FINDER_API_URL";
pub const PAGE_SIZE_ENV: &str = "SCHOOL_FINDER_PAGE_SIZE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidPageSize { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub api_base_url: String,
    pub page_size: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DirectoryConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl { var: API_URL_ENV });
            }
            config.api_base_url = url.to_string();
        }
        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            config.page_size = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidPageSize {
                        var: PAGE_SIZE_ENV,
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }
}
