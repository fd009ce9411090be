//! Subnet prefix (CIDR) parsing and containment.
//!
//! [`SubnetPrefix`] wraps [`ipnet::IpNet`] for IPv4 and IPv6 prefixes.

use crate::error::LookupError;
use ipnet::IpNet;
use std::net::IpAddr;
use std::str::FromStr;

/// A subnet prefix: an address plus the number of leading network bits.
///
/// Host bits in the address are allowed and ignored, `10.0.0.5/24` covers
/// the same range as `10.0.0.0/24`.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct SubnetPrefix {
    net: IpNet,
}

impl SubnetPrefix {
    /// Create a new [`SubnetPrefix`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<SubnetPrefix, LookupError> {
        let fail = |reason: String| LookupError::PrefixParse {
            input: addr_cidr.to_string(),
            reason,
        };

        let net = IpNet::from_str(addr_cidr).map_err(|e| fail(e.to_string()))?;

        // ipnet tolerates leading zeros that the address parser rejects.
        let (addr, len) = addr_cidr
            .split_once('/')
            .ok_or_else(|| fail("missing '/'".to_string()))?;
        if len.len() > 1 && len.starts_with('0') {
            return Err(fail(format!("invalid prefix length {len}")));
        }
        if addr.parse::<IpAddr>().is_err() {
            return Err(fail(format!("invalid address {addr}")));
        }

        Ok(SubnetPrefix { net })
    }

    /// The address as written.
    pub fn addr(&self) -> IpAddr {
        self.net.addr()
    }

    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    /// True when `ip` has the same family and its leading bits match.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.net.contains(ip)
    }

    /// Get the lowest (network) address in the prefix.
    pub fn lo(&self) -> IpAddr {
        self.net.network()
    }

    /// Get the highest address in the prefix.
    pub fn hi(&self) -> IpAddr {
        self.net.broadcast()
    }
}

impl FromStr for SubnetPrefix {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubnetPrefix::new(s)
    }
}

impl std::fmt::Display for SubnetPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.net)
    }
}
