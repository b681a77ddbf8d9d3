//! # Target Addresses & Channels
//!
//! Parsing of `host:port` target addresses and establishment of the transport channel
//! the RPC probes issue their calls over.
//!
//! Address validation happens eagerly, before any probe runs: a malformed target is a
//! caller error and surfaces as a [`TargetParseError`] from [`Target::parse`]. Channel
//! establishment happens inside each probe, so every probe owns its channel and drops
//! it when it finishes, whatever the outcome.
use std::fmt;
use std::str::FromStr;
use tonic::transport::{Channel, Endpoint};

/// Error parsing a `host:port` target address.
#[derive(Debug, thiserror::Error)]
pub enum TargetParseError {
    #[error("Target '{0}' is missing a port, expected 'host:port'")]
    MissingPort(String),
    #[error("Target '{target}' has an invalid port '{port}'")]
    InvalidPort { target: String, port: String },
    #[error("Target '{0}' has an empty host, expected 'host:port'")]
    EmptyHost(String),
    #[error("Target '{0}' has an invalid host, IPv6 hosts must be written as '[host]:port'")]
    InvalidHost(String),
}

/// A validated `host:port` endpoint address.
///
/// IPv6 hosts are accepted in bracketed form (`[::1]:9080`) and rendered back the same
/// way, so the value can always be fed to a resolver or URL builder as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: u16,
}

impl Target {
    /// Parses a `host:port` string, rejecting malformed input before any network activity.
    pub fn parse(input: &str) -> Result<Self, TargetParseError> {
        let input = input.trim();

        let (raw_host, raw_port) = input
            .rsplit_once(':')
            .ok_or_else(|| TargetParseError::MissingPort(input.to_string()))?;

        let port: u16 = raw_port
            .parse()
            .map_err(|_| TargetParseError::InvalidPort {
                target: input.to_string(),
                port: raw_port.to_string(),
            })?;

        let host = match raw_host.strip_prefix('[') {
            Some(bracketed) => bracketed
                .strip_suffix(']')
                .ok_or_else(|| TargetParseError::InvalidHost(input.to_string()))?,
            None if raw_host.contains(':') => {
                return Err(TargetParseError::InvalidHost(input.to_string()));
            }
            None => raw_host,
        };

        if host.is_empty() {
            return Err(TargetParseError::EmptyHost(input.to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The `host:port` form suitable for a TCP resolver, brackets restored for IPv6.
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The plaintext HTTP/2 URL tonic expects for this target.
    pub fn http_uri(&self) -> String {
        format!("http://{}", self.authority())
    }
}

impl FromStr for Target {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.authority())
    }
}

/// Error establishing a transport channel to a target.
#[derive(Debug, thiserror::Error)]
pub enum ChannelConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
    #[error("Connection to server '{0}' failed: {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// Establishes a transport channel to the target.
///
/// The returned channel is owned by the calling probe and released on drop; nothing is
/// cached or shared across probes.
pub async fn connect(target: &Target) -> Result<Channel, ChannelConnectError> {
    let url = target.http_uri();

    let channel = Endpoint::new(url.clone())
        .map_err(|err| ChannelConnectError::InvalidUrl(url.clone(), err))?
        .connect()
        .await
        .map_err(|err| ChannelConnectError::ConnectionFailed(url, err))?;

    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let target = Target::parse("localhost:9080").unwrap();
        assert_eq!(target.host(), "localhost");
        assert_eq!(target.port(), 9080);
        assert_eq!(target.authority(), "localhost:9080");
        assert_eq!(target.http_uri(), "http://localhost:9080");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let target = Target::parse("  127.0.0.1:80 ").unwrap();
        assert_eq!(target.authority(), "127.0.0.1:80");
    }

    #[test]
    fn parses_bracketed_ipv6() {
        let target = Target::parse("[::1]:9080").unwrap();
        assert_eq!(target.host(), "::1");
        assert_eq!(target.port(), 9080);
        assert_eq!(target.authority(), "[::1]:9080");
        assert_eq!(target.http_uri(), "http://[::1]:9080");
    }

    #[test]
    fn rejects_missing_port() {
        assert!(matches!(
            Target::parse("localhost"),
            Err(TargetParseError::MissingPort(_))
        ));
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(matches!(
            Target::parse("localhost:port"),
            Err(TargetParseError::InvalidPort { .. })
        ));
        assert!(matches!(
            Target::parse("localhost:99999"),
            Err(TargetParseError::InvalidPort { .. })
        ));
    }

    #[test]
    fn rejects_empty_host() {
        assert!(matches!(
            Target::parse(":9080"),
            Err(TargetParseError::EmptyHost(_))
        ));
    }

    #[test]
    fn rejects_unbracketed_ipv6() {
        assert!(matches!(
            Target::parse("::1:9080"),
            Err(TargetParseError::InvalidHost(_))
        ));
    }

    #[test]
    fn rejects_unbalanced_bracket() {
        assert!(matches!(
            Target::parse("[::1:9080"),
            Err(TargetParseError::InvalidHost(_))
        ));
    }

    #[test]
    fn from_str_round_trips_through_display() {
        let target: Target = "[2001:db8::1]:443".parse().unwrap();
        assert_eq!(target.to_string(), "[2001:db8::1]:443");
    }
}
