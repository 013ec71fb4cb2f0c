//! Send a git service request over TCP and list what the server advertises.

use std::process;
use std::time::Duration;

use clap::Parser;
use git_ls_remote::{
    ClientOptions, Error, Remote, DEFAULT_PORT, DEFAULT_SERVICE, DEFAULT_TIMEOUT,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send a git service request over TCP.
#[derive(Parser, Debug)]
#[command(name = "git-ls-remote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Git URL (e.g. 'git://host/repo' or 'ssh:host/repo')
    url: String,

    /// Git service port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Git service to request
    #[arg(long, default_value = DEFAULT_SERVICE)]
    service: String,

    /// Connect and read timeout, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::InvalidUrl(_) => 1,
        Error::Timeout { .. } => 2,
        Error::Connection { .. } => 3,
        Error::Remote(_) => 4,
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = ClientOptions {
        port: cli.port,
        service: cli.service,
        timeout: Duration::from_secs(cli.timeout),
    };

    let remote = match Remote::discover(&cli.url, &options) {
        Ok(remote) => remote,
        Err(e) => {
            error!("{}", e);
            process::exit(exit_code(&e));
        }
    };

    println!("Discovered references:");
    for r in remote.refs() {
        println!("  {}  {}", r.id, r.name);
    }

    println!("\nAdvertised capabilities:");
    for cap in remote.capabilities() {
        println!("  - {}", cap);
    }

    info!("Done.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["git-ls-remote", "git://host/repo.git"]).unwrap();
        assert_eq!(cli.url, "git://host/repo.git");
        assert_eq!(cli.port, 9418);
        assert_eq!(cli.service, "git-upload-pack");
        assert_eq!(cli.timeout, 5);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "git-ls-remote",
            "--port",
            "19418",
            "--service",
            "git-receive-pack",
            "--timeout",
            "1",
            "-vv",
            "git:host/repo.git",
        ])
        .unwrap();
        assert_eq!(cli.port, 19418);
        assert_eq!(cli.service, "git-receive-pack");
        assert_eq!(cli.timeout, 1);
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["git-ls-remote", "--timeout", "0", "git://h/r"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let url_err: Error = git_ls_remote::UrlError::Empty.into();
        assert_eq!(exit_code(&url_err), 1);
        assert_eq!(exit_code(&Error::Timeout { addr: "h:1".into() }), 2);
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let conn = Error::Connection {
            addr: "h:1".into(),
            source: refused,
        };
        assert_eq!(exit_code(&conn), 3);
        assert_eq!(exit_code(&Error::Remote("no".into())), 4);
    }
}
