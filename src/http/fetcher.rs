//! Single-request page retrieval.
//!
//! [`PageFetcher`] is the leaf every other component uses to read a catalog
//! page: one GET, whole body in memory, status kept next to it. Binary assets
//! never go through here; they are streamed by the
//! [`RangedDownloader`](crate::download::RangedDownloader).

use crate::error::{Error, Result};

use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// A fetched page: where it came from, how the host answered and the raw body.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the page was requested from.
    pub url: Url,
    /// Status code of the response.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Page {
    /// Return `true` if the host answered `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// The body decoded as UTF-8 markup. Invalid sequences are replaced.
    pub fn markup(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-200 page into [`Error::Fetch`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(Error::Fetch {
                url: self.url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Performs plain GET requests for catalog pages.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: ClientWithMiddleware,
}

impl PageFetcher {
    /// Create a fetcher on top of an existing middleware client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Perform a single GET and return the page whatever its status.
    pub async fn get(&self, url: &Url) -> Result<Page> {
        debug!("Fetching page {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%status, bytes = body.len(), "Fetched page {}", url);

        Ok(Page {
            url: url.clone(),
            status,
            body,
        })
    }

    /// Fetch a page and return its markup, failing with [`Error::Fetch`] on
    /// anything but `200 OK`.
    pub async fn fetch_markup(&self, url: &Url) -> Result<String> {
        let page = self.get(url).await?.error_for_status()?;
        Ok(page.markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(status: StatusCode) -> Page {
        Page {
            url: Url::parse("https://artist.bandcamp.com/album/lp").unwrap(),
            status,
            body: "caf\u{e9}".as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_page_markup_decodes_utf8() {
        assert_eq!(page(StatusCode::OK).markup(), "caf\u{e9}");
    }

    #[test]
    fn test_error_for_status() {
        assert!(page(StatusCode::OK).error_for_status().is_ok());
        match page(StatusCode::NOT_FOUND).error_for_status() {
            Err(Error::Fetch { status, url }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/album/lp"));
            }
            other => panic!("Expected a fetch error, got {:?}", other),
        }
    }
}
