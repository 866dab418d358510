//! Address extraction from load-balancer configuration text.

use std::fmt;

use crate::domain::error::ParseError;

/// Marker substring tagging peer-to-peer links. Those backends are not
/// RPC-facing and are never probed.
const PEER_LINK_MARKER: &str = "wsp2p";

/// Leading token of a backend server line.
const SERVER_TOKEN: &str = "server";

/// A `host:port` pair extracted from one server line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointAddress {
    pub host: String,
    pub port: u16,
}

impl EndpointAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Extracts the ordered list of RPC endpoint addresses from configuration
/// text.
///
/// Address lines have the shape `server <name> <host:port> [options...]`,
/// recognized by their first whitespace-delimited token regardless of
/// indentation; lines carrying the peer-link marker are dropped. The address
/// field splits on its last `:` and the port must be numeric. The first
/// malformed line fails the whole source.
///
/// IPv6 bracket syntax is outside this grammar; the last-colon split happens
/// to tolerate extra colons in the host part, but no guarantee is made.
pub fn extract_addresses(text: &str) -> Result<Vec<EndpointAddress>, ParseError> {
    let mut addresses = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let mut fields = line.split_whitespace();
        if fields.next() != Some(SERVER_TOKEN) || line.contains(PEER_LINK_MARKER) {
            continue;
        }
        let number = index + 1;
        // Skip the backend name; the next field is the address.
        let address = fields.nth(1).ok_or_else(|| ParseError::MissingAddress {
            line: number,
            content: line.to_string(),
        })?;
        addresses.push(parse_address(address, number)?);
    }
    Ok(addresses)
}

fn parse_address(address: &str, line: usize) -> Result<EndpointAddress, ParseError> {
    let Some((host, port)) = address.rsplit_once(':') else {
        return Err(ParseError::MissingPort {
            line,
            address: address.to_string(),
        });
    };
    if host.is_empty() {
        return Err(ParseError::EmptyHost {
            line,
            address: address.to_string(),
        });
    }
    let port = port.parse::<u16>().map_err(|_| ParseError::InvalidPort {
        line,
        address: address.to_string(),
    })?;
    Ok(EndpointAddress::new(host, port))
}
