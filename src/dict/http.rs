//! HTTP dictionary client.
//!
//! Asks a web dictionary with one GET per word. Modeled on the
//! dictionaryapi.dev shape: a 200 means the word has entries, a 404 means
//! it definitively does not, and anything else - transport failure
//! included - is `Unknown` for the engine's policy to resolve.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::{Dictionary, Lookup};

const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Dictionary backed by a per-word HTTP existence check.
#[derive(Clone, Debug)]
pub struct HttpDictionary {
    base_url: String,
    client: Client,
}

impl HttpDictionary {
    /// Create a client against a custom base URL.
    ///
    /// Words are appended as one path segment: `{base_url}/{word}`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Client against the public dictionaryapi.dev English endpoint.
    #[must_use]
    pub fn dictionaryapi() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    fn url_for(&self, word: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), word)
    }
}

impl Dictionary for HttpDictionary {
    fn lookup(&self, word: &str) -> Lookup {
        let url = self.url_for(word);

        match self.client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => Lookup::Found,
            Ok(resp) if resp.status() == StatusCode::NOT_FOUND => Lookup::NotFound,
            Ok(_) | Err(_) => Lookup::Unknown,
        }
    }
}
