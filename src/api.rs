use log::debug;
use reqwest::StatusCode;
use url::Url;

use crate::error::Error;
use crate::error::Result;
use crate::parser;
use crate::schema::Stream;

pub const STREAM_DATA_URL: &str = "https://geheimezender.com/streamdata-desktop.php";

pub struct StreamClient {
    client: reqwest::Client,
    url: Url,
}

impl StreamClient {
    pub fn new(url: Url) -> Result<Self> {
        Ok(Self {
            client: reqwest_client()?,
            url,
        })
    }

    pub fn with_default_url() -> Result<Self> {
        Self::new(Url::parse(STREAM_DATA_URL)?)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads the stream list page.  Anything but `200 OK` is an error.
    pub async fn fetch_document(&self) -> Result<String> {
        debug!("GET {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        debug!("Server returned {status:?}");
        if status != StatusCode::OK {
            return Err(Error::HttpStatus { status });
        }
        Ok(response.text().await?)
    }

    pub async fn fetch_streams(&self) -> Result<Vec<Stream>> {
        parser::parse_document(&self.fetch_document().await?)
    }
}

fn reqwest_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().connection_verbose(true).build()
}
