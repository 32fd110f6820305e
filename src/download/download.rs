//! The download job.
//!
//! A [`Download`] ties one destination file to one URL. Constructing it sends
//! the request and negotiates where the transfer starts; [`Download::run`]
//! then streams the body to disk while [`Download::completed`] (or a
//! [`ProgressHandle`]) reports how many bytes are on disk.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rangefetch::Download;
//! use std::time::Duration;
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let mut download = Download::new("avr-1.6.20.tar.bz2", "https://example.com/avr-1.6.20.tar.bz2").await?;
//! download
//!     .run_and_poll(|completed| println!("{} bytes", completed), Duration::from_millis(250))
//!     .await?;
//! assert_eq!(download.total(), Some(download.completed()));
//! # Ok(())
//! # }
//! ```

use super::config::Config;
use super::options::DownloadOptions;
use super::resume::{negotiate, Phase, ResumeState};
use crate::error::{Error, Result};

use futures::StreamExt;
use reqwest::{
    header::{HeaderMap, RANGE},
    Response, StatusCode, Url,
};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

/// Read-only view on the completed byte counter of a [`Download`].
///
/// Handles stay valid while the download runs, so another task can report
/// progress without borrowing the job.
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    completed: Arc<AtomicU64>,
}

impl ProgressHandle {
    /// Bytes of the destination file known to be on disk.
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }
}

/// A resumable download of one URL into one file.
pub struct Download {
    path: PathBuf,
    url: Url,
    resume: bool,
    config: Config,
    state: ResumeState,
    phase: Phase,
    total: Option<u64>,
    completed: Arc<AtomicU64>,
    response: Option<Response>,
    status: StatusCode,
    headers: HeaderMap,
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("path", &self.path)
            .field("url", &self.url.as_str())
            .field("resume", &self.resume)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("total", &self.total)
            .field("completed", &self.completed())
            .field("status", &self.status)
            .finish()
    }
}

impl Download {
    /// Starts downloading `url` into `path`, resuming a partial file.
    ///
    /// Uses the process-wide default [`Config`].
    pub async fn new(path: impl Into<PathBuf>, url: &str) -> Result<Self> {
        Self::with_options(path, url, DownloadOptions::default()).await
    }

    /// Starts downloading `url` into `path`.
    ///
    /// The URL is validated before anything else happens: an unparsable URL
    /// or a scheme other than `http`/`https` fails without touching the
    /// network or the file. The request is then sent, asking for the missing
    /// tail of the file when one exists and `force_restart` is not set.
    ///
    /// The returned job holds the open response; no byte of the body is read
    /// and the destination is not modified until [`Download::run`].
    pub async fn with_options(
        path: impl Into<PathBuf>,
        url: &str,
        options: DownloadOptions,
    ) -> Result<Self> {
        let url = parse_url(url)?;
        let path = path.into();
        let resume = !options.force_restart;
        let config = match options.config {
            Some(config) => config,
            None => Config::default_config()?,
        };

        let offset = match resume {
            true => local_length(&path).await?,
            false => 0,
        };

        debug!("Fetching {} into {:?} from offset {}", url, path, offset);
        let mut request = config.client().get(url.clone());
        if offset > 0 {
            request = request.header(RANGE, format!("bytes={}-", offset));
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        let negotiated = negotiate(&url, offset, status, &headers)?;
        if let ResumeState::Restarting { discarded } = negotiated.state {
            debug!(
                "{} ignored the range request, discarding {} local bytes",
                url, discarded
            );
        }
        debug!(
            "Negotiated {:?} for {} (size {:?})",
            negotiated.state, url, negotiated.total
        );

        Ok(Self {
            path,
            url,
            resume,
            config,
            state: negotiated.state,
            phase: negotiated.state.into(),
            total: negotiated.total,
            completed: Arc::new(AtomicU64::new(negotiated.state.offset())),
            response: Some(response),
            status,
            headers,
        })
    }

    /// Streams the response body into the destination file.
    ///
    /// Resumed downloads append to the file; every other download truncates
    /// it first. Each chunk is on disk before it is counted, so after a
    /// failure the file length equals [`Download::completed`] and a new
    /// `Download` on the same path resumes from there.
    ///
    /// The transfer runs once: calling `run` again returns
    /// [`Error::AlreadyFinished`].
    pub async fn run(&mut self) -> Result<()> {
        let response = self.response.take().ok_or(Error::AlreadyFinished)?;
        self.phase = Phase::Transferring;

        match self.transfer(response).await {
            Ok(()) => {
                self.phase = Phase::Completed;
                debug!("Downloaded {} bytes into {:?}", self.completed(), self.path);
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Failed;
                warn!(
                    "Download of {} stopped after {} bytes: {}",
                    self.url,
                    self.completed(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Runs the transfer while calling `callback` with the completed byte
    /// count every `interval`.
    ///
    /// The callback sees non-decreasing values and is called a last time
    /// with the final count once the transfer ends. The transfer's result is
    /// returned as is.
    pub async fn run_and_poll<F>(&mut self, mut callback: F, interval: Duration) -> Result<()>
    where
        F: FnMut(u64),
    {
        if interval.is_zero() {
            return Err(Error::InvalidInterval);
        }

        let progress = self.progress_handle();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let transfer = self.run();
        tokio::pin!(transfer);

        loop {
            tokio::select! {
                biased;
                _ = ticker.tick() => callback(progress.completed()),
                result = &mut transfer => {
                    callback(progress.completed());
                    return result;
                }
            }
        }
    }

    async fn transfer(&mut self, response: Response) -> Result<()> {
        let mut file = match self.state {
            ResumeState::Resuming { offset } => {
                let file = OpenOptions::new().append(true).open(&self.path).await?;
                let on_disk = file.metadata().await?.len();
                if on_disk != offset {
                    return Err(Error::IOError {
                        source: io::Error::other(format!(
                            "{:?} changed from {} to {} bytes before the transfer started",
                            self.path, offset, on_disk
                        )),
                    });
                }
                file
            }
            ResumeState::Starting | ResumeState::Restarting { .. } => {
                debug!("Truncating destination file {:?}", self.path);
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&self.path)
                    .await?
            }
        };

        let mut stream = response.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk = item?;
            let chunk_size = chunk.len() as u64;
            let received = self.completed() + chunk_size;
            if let Some(total) = self.total {
                if received > total {
                    return Err(Error::SizeMismatch {
                        expected: total,
                        actual: received,
                    });
                }
            }

            file.write_all(&chunk).await?;
            // Wait for the write to land before the bytes are reported.
            file.flush().await?;
            self.completed.fetch_add(chunk_size, Ordering::Release);
            trace!("{:?}: {} bytes on disk", self.path, received);
        }

        let completed = self.completed();
        match self.total {
            Some(total) if total != completed => Err(Error::SizeMismatch {
                expected: total,
                actual: completed,
            }),
            Some(_) => Ok(()),
            None => {
                self.total = Some(completed);
                Ok(())
            }
        }
    }

    /// Bytes of the destination file known to be on disk.
    ///
    /// Right after construction this is the resume offset.
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Complete size of the download, `None` while unknown.
    ///
    /// Without a `Content-Length` the size is only known once
    /// [`Download::run`] succeeds.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Complete size of the download, `-1` while unknown.
    pub fn size(&self) -> i64 {
        self.total
            .map_or(-1, |total| i64::try_from(total).unwrap_or(i64::MAX))
    }

    /// A handle on the completed counter usable while the job runs.
    pub fn progress_handle(&self) -> ProgressHandle {
        ProgressHandle {
            completed: Arc::clone(&self.completed),
        }
    }

    /// Destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Gets whether an existing partial file was eligible for resuming.
    pub fn resumable(&self) -> bool {
        self.resume
    }

    /// The configuration snapshot the request was sent with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// How the transfer starts.
    pub fn state(&self) -> ResumeState {
        self.state
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Headers of the response.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Hands the unread response over to the caller.
    ///
    /// The job will not transfer anything afterwards: [`Download::run`]
    /// returns [`Error::AlreadyFinished`].
    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }
}

impl Drop for Download {
    fn drop(&mut self) {
        if self.response.take().is_some() {
            debug!("Releasing the unread response of {}", self.url);
        }
    }
}

fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::InvalidUrl(format!("the url \"{}\" cannot be parsed: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::UnsupportedScheme(format!(
            "\"{}\" in the url \"{}\"",
            scheme, url
        ))),
    }
}

/// Length of the file already at `path`, zero when there is none.
async fn local_length(path: &Path) -> Result<u64> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        Ok(_) => Ok(0),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com/file.zip").is_ok());
        assert!(parse_url("http://example.com/file.zip").is_ok());
    }

    #[test]
    fn test_parse_url_rejects_other_schemes() {
        assert!(matches!(
            parse_url("asd://example.com/test.txt"),
            Err(Error::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse_url("ftp://example.com/test.txt"),
            Err(Error::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        assert!(matches!(parse_url("://"), Err(Error::InvalidUrl(_))));
        assert!(matches!(parse_url(""), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_local_length() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        assert_eq!(local_length(&missing).await.unwrap(), 0);

        let partial = dir.path().join("partial.bin");
        std::fs::write(&partial, b"0123456789").unwrap();
        assert_eq!(local_length(&partial).await.unwrap(), 10);

        assert_eq!(local_length(dir.path()).await.unwrap(), 0);
    }

    #[test]
    fn test_progress_handle_shares_counter() {
        let counter = Arc::new(AtomicU64::new(7));
        let handle = ProgressHandle {
            completed: Arc::clone(&counter),
        };
        counter.fetch_add(3, Ordering::Release);
        assert_eq!(handle.clone().completed(), 10);
    }
}
