//! # git-ls-remote
//!
//! Ask a git daemon which refs it has, over the anonymous `git://` protocol.
//!
mod error;
mod refs;
mod transport;

pub use error::{Error, Result, UrlError};
pub use refs::{parse_advertisement, Advertisement, Ref, Refs};
pub use transport::url_parser::{parse as parse_url, GitUrl};
pub use transport::{
    ClientOptions, Transport, DEFAULT_PORT, DEFAULT_SERVICE, DEFAULT_TIMEOUT, MAX_RESPONSE_LEN,
};

/// A remote repository and what its server advertised.
#[derive(Debug)]
pub struct Remote {
    url: GitUrl,
    advertisement: Advertisement,
}

impl Remote {
    /// discover the refs of a remote repo
    /// # Arguments
    ///
    /// * `url` - the repo url, either `proto://host/repo` or `proto:host/repo`
    /// * `options` - port, service and timeout used to reach the daemon
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use git_ls_remote::{ClientOptions, Remote};
    /// let remote = Remote::discover("git://localhost/project.git", &ClientOptions::default());
    /// ```
    ///
    pub fn discover(url: &str, options: &ClientOptions) -> Result<Self> {
        let mut transport = Transport::from_url(url, options)?;
        let advertisement = transport.discover_refs()?;
        Ok(Remote {
            url: transport.url().clone(),
            advertisement,
        })
    }

    pub fn url(&self) -> &GitUrl {
        &self.url
    }

    pub fn refs(&self) -> &[Ref] {
        &self.advertisement.refs
    }

    pub fn capabilities(&self) -> &[String] {
        &self.advertisement.capabilities
    }
}
