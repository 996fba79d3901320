//! Markup source boundary: where entry documents come from.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::markup::{parse_html, Document};
use crate::{Error, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Anything that can produce the parsed entry document for a word. The
/// resolution engine is written against this trait so tests can feed it
/// in-memory entries.
#[async_trait]
pub trait MarkupSource: Send + Sync {
    async fn fetch(&self, word: &str) -> Result<Arc<Document>>;
}

/// Client for the MediaWiki `action=parse` API.
pub struct WiktionaryClient {
    client: Client,
    endpoint: Url,
}

impl WiktionaryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.api_endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Deserialize)]
struct ParseResponse {
    parse: Option<ParseResult>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ParseResult {
    text: ParseText,
}

#[derive(Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[async_trait]
impl MarkupSource for WiktionaryClient {
    async fn fetch(&self, word: &str) -> Result<Arc<Document>> {
        tracing::debug!(%word, "fetching entry");
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[
                ("action", "parse"),
                ("origin", "*"),
                ("page", word),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ParseResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(if error.code == "missingtitle" {
                Error::WordNotFound(word.to_owned())
            } else {
                Error::BadResponse(format!("{}: {}", error.code, error.info))
            });
        }
        let Some(parse) = body.parse else {
            return Err(Error::BadResponse(String::from(
                "response carries neither a parse result nor an error",
            )));
        };

        Ok(Arc::new(parse_html(&parse.text.html)))
    }
}
