//! Configuration for CityLib
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a catalog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the record files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── books.txt      (one book per line)
    ///     └── members.txt    (one member per line)
    pub data_dir: PathBuf,

    /// File name of the book records, relative to `data_dir`
    pub books_file: String,

    /// File name of the member records, relative to `data_dir`
    pub members_file: String,

    // -------------------------------------------------------------------------
    // Persistence Behavior
    // -------------------------------------------------------------------------
    /// What to do with lines that cannot be parsed on load
    pub load_mode: LoadMode,

    /// Whether to fsync the record files after each save
    pub sync_strategy: SyncStrategy,
}

/// Load strategy for malformed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip the bad line, log it, keep loading the rest of the file
    #[default]
    Permissive,

    /// Fail the whole load on the first bad line
    Strict,
}

/// Sync strategy for saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStrategy {
    /// Leave flushing to the OS (fastest)
    #[default]
    Never,

    /// fsync both files after every save (safest)
    EverySave,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            books_file: "books.txt".to_string(),
            members_file: "members.txt".to_string(),
            load_mode: LoadMode::Permissive,
            sync_strategy: SyncStrategy::Never,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the book records file
    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    /// Full path of the member records file
    pub fn members_path(&self) -> PathBuf {
        self.data_dir.join(&self.members_file)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for both record files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the book records file name
    pub fn books_file(mut self, name: impl Into<String>) -> Self {
        self.config.books_file = name.into();
        self
    }

    /// Set the member records file name
    pub fn members_file(mut self, name: impl Into<String>) -> Self {
        self.config.members_file = name.into();
        self
    }

    /// Set the load mode
    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        self.config.load_mode = mode;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
