//! Persistence configuration.

/// Configuration for reading and writing tombstone files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to fsync the block directory after the atomic rename.
    pub sync_directory: bool,

    /// Largest tombstone file `read_file` will load into memory.
    pub max_file_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_directory: true,
            max_file_size: 256 * 1024 * 1024, // 256 MB
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to fsync the directory after replacing the file.
    #[must_use]
    pub const fn sync_directory(mut self, value: bool) -> Self {
        self.sync_directory = value;
        self
    }

    /// Sets the maximum accepted file size.
    #[must_use]
    pub const fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.sync_directory);
        assert_eq!(config.max_file_size, 256 * 1024 * 1024);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().sync_directory(false).max_file_size(1024);

        assert!(!config.sync_directory);
        assert_eq!(config.max_file_size, 1024);
    }
}
