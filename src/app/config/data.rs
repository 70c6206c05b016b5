use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Options for string-based configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum StrOpt {
    /// Base URL of the remote story API
    ApiBaseUrl,
    /// Socket address the HTTP server binds to
    ListenAddr,
}

/// Options for path-based configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
}

/// Options for numeric configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Maximum number of stories fetched from the remote index
    TopStoriesLimit,
    /// How long a cached story set stays fresh, in minutes
    CacheTtlMinutes,
    /// Page size used when a request does not specify one
    DefaultPageSize,
    /// Timeout for network requests in seconds
    Timeout,
    /// Maximum age of log files in days before they are deleted
    MaxLogAge,
}

/// The configuration data structure that holds all configurable values.
///
/// This struct is responsible for storing and managing all configuration values.
/// It provides methods to access and modify these values in a type-safe manner.
///
/// Missing keys in the configuration file fall back to their default values,
/// so a partial file loads cleanly.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads when wrapped in an `Arc<Mutex<>>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Base URL of the remote story API
    api_base_url: ArcStr,
    /// Socket address the HTTP server binds to
    listen_addr: ArcStr,
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Current log level
    log_level: LogLevel,
    /// Maximum number of stories fetched from the remote index
    top_stories_limit: usize,
    /// How long a cached story set stays fresh, in minutes
    cache_ttl_minutes: usize,
    /// Page size used when a request does not specify one
    default_page_size: usize,
    /// Timeout for network requests in seconds
    timeout: usize,
    /// Maximum age of log files in days before they are deleted
    max_log_age: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            api_base_url: ArcStr::from("https://hacker-news.firebaseio.com"),
            listen_addr: ArcStr::from("127.0.0.1:8080"),
            log_dir: ArcPath::from(Path::new("/tmp/hn/logs")),
            log_level: LogLevel::Warning,
            top_stories_limit: 200,
            cache_ttl_minutes: 10,
            default_page_size: 200,
            timeout: 30,
            max_log_age: 0,
        }
    }
}

impl Data {
    /// Gets a string-based configuration value.
    ///
    /// # Arguments
    /// * `opt` - The string option to retrieve
    ///
    /// # Returns
    /// The requested string value.
    pub fn str(&self, opt: StrOpt) -> ArcStr {
        match opt {
            StrOpt::ApiBaseUrl => self.api_base_url.clone(),
            StrOpt::ListenAddr => self.listen_addr.clone(),
        }
    }

    /// Sets a string-based configuration value.
    ///
    /// # Arguments
    /// * `opt` - The string option to set
    /// * `value` - The new string value
    pub fn set_str(&mut self, opt: StrOpt, value: ArcStr) {
        match opt {
            StrOpt::ApiBaseUrl => self.api_base_url = value,
            StrOpt::ListenAddr => self.listen_addr = value,
        }
    }

    /// Gets a path-based configuration value.
    ///
    /// # Arguments
    /// * `opt` - The path option to retrieve
    ///
    /// # Returns
    /// The requested path value.
    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => self.log_dir.clone(),
        }
    }

    /// Sets a path-based configuration value.
    ///
    /// # Arguments
    /// * `opt` - The path option to set
    /// * `path` - The new path value
    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path,
        }
    }

    /// Gets the current log level.
    ///
    /// # Returns
    /// The current log level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the log level.
    ///
    /// # Arguments
    /// * `level` - The new log level value
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Gets a numeric configuration value.
    ///
    /// # Arguments
    /// * `opt` - The numeric option to retrieve
    ///
    /// # Returns
    /// The requested numeric value.
    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::TopStoriesLimit => self.top_stories_limit,
            USizeOpt::CacheTtlMinutes => self.cache_ttl_minutes,
            USizeOpt::DefaultPageSize => self.default_page_size,
            USizeOpt::Timeout => self.timeout,
            USizeOpt::MaxLogAge => self.max_log_age,
        }
    }

    /// Sets a numeric configuration value.
    ///
    /// # Arguments
    /// * `opt` - The numeric option to set
    /// * `value` - The new numeric value
    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::TopStoriesLimit => self.top_stories_limit = value,
            USizeOpt::CacheTtlMinutes => self.cache_ttl_minutes = value,
            USizeOpt::DefaultPageSize => self.default_page_size = value,
            USizeOpt::Timeout => self.timeout = value,
            USizeOpt::MaxLogAge => self.max_log_age = value,
        }
    }
}
