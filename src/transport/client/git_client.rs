use std::io::{Error as IoError, ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use super::packet::{error_packet, service_request};
use crate::error::{Error, Result};
use crate::refs::{parse_advertisement, Advertisement};
use crate::transport::client::Protocol;
use crate::transport::url_parser::GitUrl;
use crate::transport::{ClientOptions, MAX_RESPONSE_LEN};

/// Anonymous `git://` access to a git daemon over plain TCP.
#[derive(Debug)]
pub struct GitProtocol {
    url: GitUrl,
    options: ClientOptions,
}

impl GitProtocol {
    pub fn new(url: &GitUrl, options: &ClientOptions) -> Self {
        GitProtocol {
            url: url.clone(),
            options: options.clone(),
        }
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.url.host(), self.options.port)
    }

    /// Send `request` and return the first read of the answer, at most
    /// `MAX_RESPONSE_LEN` bytes. The stream is closed before returning.
    fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        let addr = self.addr();
        let mut stream = connect(self.url.host(), self.options.port, self.options.timeout)
            .map_err(|e| Error::from_io(&addr, e))?;
        stream
            .set_read_timeout(Some(self.options.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.options.timeout)))
            .map_err(|e| Error::from_io(&addr, e))?;

        debug!(addr = %addr, len = request.len(), "sending service request");
        stream
            .write_all(request)
            .map_err(|e| Error::from_io(&addr, e))?;

        let mut buf = vec![0; MAX_RESPONSE_LEN];
        let read = stream
            .read(&mut buf)
            .map_err(|e| Error::from_io(&addr, e))?;
        buf.truncate(read);
        Ok(buf)
    }
}

/// Try each address `host` resolves to until one accepts a connection.
fn connect(host: &str, port: u16, timeout: Duration) -> std::io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "connect failed");
                last_err = Some(e)
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        IoError::new(
            ErrorKind::AddrNotAvailable,
            format!("{} did not resolve to any address", host),
        )
    }))
}

impl Protocol for GitProtocol {
    fn discover_refs(&mut self) -> Result<Advertisement> {
        let request = service_request(&self.options.service, self.url.repo(), self.url.host());
        let response = self.exchange(&request)?;
        info!("Received {} bytes from {}", response.len(), self.url.host());

        if let Some(msg) = error_packet(&response) {
            return Err(Error::Remote(msg));
        }
        Ok(parse_advertisement(&String::from_utf8_lossy(&response)))
    }

    fn protocol(&self) -> &'static str {
        "git-protocol"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::url_parser::parse;
    use std::net::TcpListener;
    use std::thread;

    fn options(port: u16) -> ClientOptions {
        ClientOptions {
            port,
            timeout: Duration::from_millis(500),
            ..ClientOptions::default()
        }
    }

    #[test]
    fn test_sends_request_and_reads_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0; 512];
            let n = stream.read(&mut buf).unwrap();
            stream
                .write_all(b"003fabc HEAD\0side-band-64k\n0041def refs/heads/main\n0000")
                .unwrap();
            buf[..n].to_vec()
        });

        let url = parse("git://127.0.0.1/team/repo.git").unwrap();
        let mut client = GitProtocol::new(&url, &options(port));
        let adv = client.discover_refs().unwrap();
        let request = server.join().unwrap();

        assert_eq!(request, b"0032git-upload-pack /team/repo.git\0host=127.0.0.1\0".to_vec());
        assert_eq!(adv.capabilities, vec!["side-band-64k"]);
        assert_eq!(adv.refs.len(), 2);
        assert_eq!(adv.refs[1].name, "refs/heads/main");
        assert_eq!(client.protocol(), "git-protocol");
    }

    #[test]
    fn test_refused_connection() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = parse("git://127.0.0.1/repo.git").unwrap();
        let err = GitProtocol::new(&url, &options(port))
            .discover_refs()
            .unwrap_err();
        assert!(matches!(err, Error::Connection { .. }), "{:?}", err);
    }
}
