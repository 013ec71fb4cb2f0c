use std::fmt::Formatter;

use crate::error::UrlError;

/// A git url split into protocol, host and repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUrl {
    proto: String,
    host: String,
    repo: String,
}

impl GitUrl {
    /// Build a url from its parts, none of which may be empty.
    pub fn new<P, H, R>(proto: P, host: H, repo: R) -> Result<Self, UrlError>
    where
        P: Into<String>,
        H: Into<String>,
        R: Into<String>,
    {
        let (proto, host, repo) = (proto.into(), host.into(), repo.into());
        if proto.is_empty() {
            Err(UrlError::EmptyField("proto"))
        } else if host.is_empty() {
            Err(UrlError::EmptyField("host"))
        } else if repo.is_empty() {
            Err(UrlError::EmptyField("repo"))
        } else {
            Ok(GitUrl { proto, host, repo })
        }
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl std::fmt::Display for GitUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}/{}", self.proto, self.host, self.repo)
    }
}

/// Parse `proto://host/repo` or `proto:host/repo`.
///
/// The url is cut on every run of `/` and `:`; the first piece is the protocol,
/// the second the host and the rest, joined with `/`, the repository.
pub fn parse(url: &str) -> Result<GitUrl, UrlError> {
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parts = url.split(|c| c == '/' || c == ':').filter(|s| !s.is_empty());
    let (proto, host) = match (parts.next(), parts.next()) {
        (Some(proto), Some(host)) => (proto, host),
        _ => return Err(UrlError::TooFewParts(url.to_string())),
    };
    let repo = parts.collect::<Vec<_>>().join("/");
    if repo.is_empty() {
        return Err(UrlError::TooFewParts(url.to_string()));
    }

    GitUrl::new(proto, host, repo)
}
