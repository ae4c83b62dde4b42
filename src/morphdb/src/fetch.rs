//! Spell dump retrieval
//!
//! [`DumpSource`] abstracts where dumps come from so the pipeline can run
//! against the SimC repository or against in-memory text.

use std::io::Read;

use thiserror::Error;

use crate::classes::{dump_url, SIMC_BASE_URL};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can produce the raw spell dump for a class
pub trait DumpSource {
    /// Human-readable location of a class dump (used for logs and provenance)
    fn location(&self, class: &str) -> String;

    /// Location of the whole collection of dumps
    fn base_location(&self) -> String;

    /// Fetch the dump text for a class
    fn fetch(&self, class: &str) -> Result<String, FetchError>;
}

/// Downloads dumps over HTTP(S) from a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpSource {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        HttpSource::new(SIMC_BASE_URL)
    }
}

impl DumpSource for HttpSource {
    fn location(&self, class: &str) -> String {
        dump_url(&self.base_url, class)
    }

    fn base_location(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    fn fetch(&self, class: &str) -> Result<String, FetchError> {
        let url = self.location(class);

        let response = match ureq::get(&url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status { url, status });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::Transport {
                    url,
                    source: Box::new(transport),
                });
            }
        };

        // Read through the body reader; into_string() caps responses at 10 MB
        let mut body = String::new();
        if let Err(source) = response.into_reader().read_to_string(&mut body) {
            return Err(FetchError::Body { url, source });
        }

        Ok(body)
    }
}

/// Fetch a class dump, turning any failure into empty content.
///
/// Failures are logged with the class and cause; callers see "no morphs".
pub fn fetch_or_empty(source: &dyn DumpSource, class: &str) -> String {
    tracing::info!("Downloading {}...", source.location(class));

    match source.fetch(class) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Error downloading {}: {}", class, e);
            String::new()
        }
    }
}
