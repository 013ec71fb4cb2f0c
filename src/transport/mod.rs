pub mod client;
pub mod url_parser;

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::refs::Advertisement;
use client::git_client::GitProtocol;
use client::Protocol;
use url_parser::GitUrl;

pub const DEFAULT_PORT: u16 = 9418;
pub const DEFAULT_SERVICE: &str = "git-upload-pack";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Only one read of this size is made; longer advertisements are cut short.
pub const MAX_RESPONSE_LEN: usize = 4096;

/// How to reach the daemon and which service to ask it for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub port: u16,
    pub service: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            port: DEFAULT_PORT,
            service: DEFAULT_SERVICE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct Transport {
    client: Box<dyn Protocol>,
    url: GitUrl,
}

impl Transport {
    pub fn from_url(repo_url: &str, options: &ClientOptions) -> Result<Self> {
        let url = url_parser::parse(repo_url)?;
        Ok(Self::new(url, options))
    }

    pub fn new(url: GitUrl, options: &ClientOptions) -> Self {
        let client = Box::new(GitProtocol::new(&url, options)) as Box<dyn Protocol>;
        debug!(url = %url, client = client.protocol(), "transport ready");
        Transport { client, url }
    }

    pub fn url(&self) -> &GitUrl {
        &self.url
    }

    pub fn discover_refs(&mut self) -> Result<Advertisement> {
        self.client.discover_refs()
    }
}
