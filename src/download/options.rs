//! Options recognized when constructing a [`Download`](super::Download).

use super::config::Config;

/// Options for [`Download::with_options`](super::Download::with_options).
///
/// ```rust
/// use rangefetch::{Config, DownloadOptions};
///
/// let options = DownloadOptions::new()
///     .force_restart(true)
///     .config(Config::stock().unwrap());
/// assert!(options.is_force_restart());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub(crate) force_restart: bool,
    pub(crate) config: Option<Config>,
}

impl DownloadOptions {
    /// Options resuming any partial file with the process default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore a partial destination file and download from byte zero.
    ///
    /// The existing file is truncated when the transfer starts, not before.
    pub fn force_restart(mut self, force_restart: bool) -> Self {
        self.force_restart = force_restart;
        self
    }

    /// Use `config` instead of [`Config::default_config`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Gets whether partial files are ignored.
    pub fn is_force_restart(&self) -> bool {
        self.force_restart
    }

    /// Gets the configuration override, if any.
    pub fn config_override(&self) -> Option<&Config> {
        self.config.as_ref()
    }
}
