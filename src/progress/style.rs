//! Progress bar styling and configuration options.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::progress::ProgressBarOpts;
//! use rangefetch::Download;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut download = Download::new("core.tar.bz2", "https://example.com/core.tar.bz2").await?;
//!
//! let opts = ProgressBarOpts::with_pip_style();
//! let bar = opts.for_download(&download)?;
//! download
//!     .run_and_poll(|completed| bar.set_position(completed), Duration::from_millis(100))
//!     .await?;
//! opts.finish(&bar);
//! # Ok(())
//! # }
//! ```

use crate::download::Download;

use indicatif::{style::TemplateError, ProgressBar, ProgressStyle};

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Template for downloads of unknown size.
    ///
    /// `⠙ 1.20 MiB 640.00 KiB/s`
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {bytes:>11.green} {bytes_per_sec:>13.red}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾╴─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";
    /// Use rough blocks as progress characters: `"█  "`.
    pub const CHARS_ROUGH: &'static str = "█  ";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    pub fn to_progress_style(&self) -> Result<ProgressStyle, TemplateError> {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = &self.template {
            style = style.template(template)?;
        }
        if let Some(progress_chars) = &self.progress_chars {
            style = style.progress_chars(progress_chars);
        }
        Ok(style)
    }

    /// Create a [`ProgressBar`] of length `len` based on the provided options.
    pub fn to_progress_bar(&self, len: u64) -> Result<ProgressBar, TemplateError> {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return Ok(ProgressBar::hidden());
        }

        Ok(ProgressBar::new(len).with_style(self.to_progress_style()?))
    }

    /// Create a [`ProgressBar`] for `download`, positioned at the bytes it
    /// already has on disk.
    ///
    /// Downloads of unknown size get a spinner.
    pub fn for_download(&self, download: &Download) -> Result<ProgressBar, TemplateError> {
        if !self.enabled {
            return Ok(ProgressBar::hidden());
        }

        let bar = match download.total() {
            Some(total) => self.to_progress_bar(total)?,
            None => ProgressBar::new_spinner()
                .with_style(ProgressStyle::default_spinner().template(Self::TEMPLATE_SPINNER)?),
        };
        Ok(bar.with_position(download.completed()))
    }

    /// Finish `bar`, clearing it if the options say so.
    pub fn finish(&self, bar: &ProgressBar) {
        if self.clear {
            bar.finish_and_clear();
        } else {
            bar.finish();
        }
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Gets whether the bar is drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
