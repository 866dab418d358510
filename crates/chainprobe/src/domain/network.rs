//! The closed set of networks this tool verifies.

use std::fmt;
use std::str::FromStr;

/// One relay or test network among the fixed known set.
///
/// The variant order is the canonical pass order; reports always enumerate
/// networks in this order, so adding a variant here is a deliberate,
/// exhaustiveness-checked change rather than a new free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    Kusama,
    Paseo,
    Polkadot,
    Westend,
}

impl Network {
    /// Canonical pass order.
    pub const ALL: [Network; 4] = [
        Network::Kusama,
        Network::Paseo,
        Network::Polkadot,
        Network::Westend,
    ];

    /// Lowercase identifier used for file-name matching and CLI arguments.
    pub fn identifier(&self) -> &'static str {
        match self {
            Network::Kusama => "kusama",
            Network::Paseo => "paseo",
            Network::Polkadot => "polkadot",
            Network::Westend => "westend",
        }
    }

    /// Assigns a config file to a network by case-insensitive substring
    /// match on the file name.
    ///
    /// The first match in canonical order wins, so every file maps to at
    /// most one network.
    pub fn classify(file_name: &str) -> Option<Network> {
        let lowered = file_name.to_ascii_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| lowered.contains(network.identifier()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Kusama => "Kusama",
            Network::Paseo => "Paseo",
            Network::Polkadot => "Polkadot",
            Network::Westend => "Westend",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kusama" => Ok(Network::Kusama),
            "paseo" => Ok(Network::Paseo),
            "polkadot" => Ok(Network::Polkadot),
            "westend" => Ok(Network::Westend),
            _ => Err(UnknownNetwork {
                name: s.to_string(),
            }),
        }
    }
}

/// Returned when an argument names a network outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network `{name}` (expected one of kusama, paseo, polkadot, westend)")]
pub struct UnknownNetwork {
    pub name: String,
}
