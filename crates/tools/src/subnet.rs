//! Subnet calculator.
//!
//! Parsing is non-strict: host bits in the address are allowed and masked
//! off, so `192.168.1.77/24` describes `192.168.1.0/24`. Both IPv4 and IPv6
//! are accepted, with either a prefix length or (IPv4 only) a dotted netmask.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// 2^128, the size of `::/0`, which does not fit in a `u128`.
const IPV6_ALL_ADDRESSES: &str = "340282366920938463463374607431768211456";
const IPV6_ALL_USABLE: &str = "340282366920938463463374607431768211454";

/// A parsed network with its derived addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetDetails {
    pub network: IpAddr,
    pub prefix_len: u8,
    pub broadcast: IpAddr,
    pub netmask: IpAddr,
    pub wildcard: IpAddr,
    /// Number of addresses, in decimal
    pub total: String,
    /// `total - 2` when `total > 2`, else 0, in decimal
    pub usable: String,
    /// First and last usable host, `None` for networks of two addresses or fewer
    pub first_usable: Option<IpAddr>,
    pub last_usable: Option<IpAddr>,
}

/// Subnet parse failure, worded for the model to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetError(String);

impl fmt::Display for SubnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SubnetError {}

fn not_a_network(input: &str) -> SubnetError {
    SubnetError(format!(
        "'{}' does not appear to be an IPv4 or IPv6 network",
        input
    ))
}

fn bad_netmask(mask: &str) -> SubnetError {
    SubnetError(format!("'{}' is not a valid netmask", mask))
}

/// Parse CIDR notation into subnet details.
pub fn parse_subnet(cidr: &str) -> Result<SubnetDetails, SubnetError> {
    let input = cidr.trim();
    let (addr, mask) = match input.split_once('/') {
        Some((addr, mask)) => (addr, Some(mask)),
        None => (input, None),
    };

    match addr.parse::<IpAddr>().map_err(|_| not_a_network(input))? {
        IpAddr::V4(addr) => {
            let prefix = match mask {
                None => 32,
                Some(mask) => parse_v4_mask(mask)?,
            };
            Ok(v4_details(addr, prefix))
        }
        IpAddr::V6(addr) => {
            let prefix = match mask {
                None => 128,
                Some(mask) => match mask.parse::<u8>() {
                    Ok(p) if p <= 128 && !mask.starts_with('+') => p,
                    _ => return Err(bad_netmask(mask)),
                },
            };
            Ok(v6_details(addr, prefix))
        }
    }
}

fn parse_v4_mask(mask: &str) -> Result<u8, SubnetError> {
    if let Ok(prefix) = mask.parse::<u8>() {
        if prefix <= 32 && !mask.starts_with('+') {
            return Ok(prefix);
        }
        return Err(bad_netmask(mask));
    }

    let bits = u32::from(mask.parse::<Ipv4Addr>().map_err(|_| bad_netmask(mask))?);
    // Contiguous netmask (255.255.240.0) or its inverse as a host mask (0.0.15.255).
    if bits.leading_ones() + bits.trailing_zeros() == 32 {
        Ok(bits.leading_ones() as u8)
    } else if bits.leading_zeros() + bits.trailing_ones() == 32 {
        Ok(bits.leading_zeros() as u8)
    } else {
        Err(bad_netmask(mask))
    }
}

fn v4_details(addr: Ipv4Addr, prefix: u8) -> SubnetDetails {
    let mask: u32 = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    let network = u32::from(addr) & mask;
    let broadcast = network | !mask;
    let total = u64::from(!mask) + 1;

    let (first, last) = if total > 2 {
        (
            Some(IpAddr::V4(Ipv4Addr::from(network + 1))),
            Some(IpAddr::V4(Ipv4Addr::from(broadcast - 1))),
        )
    } else {
        (None, None)
    };

    SubnetDetails {
        network: IpAddr::V4(Ipv4Addr::from(network)),
        prefix_len: prefix,
        broadcast: IpAddr::V4(Ipv4Addr::from(broadcast)),
        netmask: IpAddr::V4(Ipv4Addr::from(mask)),
        wildcard: IpAddr::V4(Ipv4Addr::from(!mask)),
        total: total.to_string(),
        usable: (if total > 2 { total - 2 } else { 0 }).to_string(),
        first_usable: first,
        last_usable: last,
    }
}

fn v6_details(addr: Ipv6Addr, prefix: u8) -> SubnetDetails {
    let mask: u128 = if prefix == 0 { 0 } else { u128::MAX << (128 - prefix) };
    let network = u128::from(addr) & mask;
    let last = network | !mask;

    // IPv6 has no broadcast; hosts run from network + 1 through the last address.
    let (total, usable, first_usable, last_usable) = match (!mask).checked_add(1) {
        Some(total) if total > 2 => (
            total.to_string(),
            (total - 2).to_string(),
            Some(IpAddr::V6(Ipv6Addr::from(network + 1))),
            Some(IpAddr::V6(Ipv6Addr::from(last))),
        ),
        Some(total) => (total.to_string(), "0".to_string(), None, None),
        None => (
            IPV6_ALL_ADDRESSES.to_string(),
            IPV6_ALL_USABLE.to_string(),
            Some(IpAddr::V6(Ipv6Addr::from(1u128))),
            Some(IpAddr::V6(Ipv6Addr::from(u128::MAX))),
        ),
    };

    SubnetDetails {
        network: IpAddr::V6(Ipv6Addr::from(network)),
        prefix_len: prefix,
        broadcast: IpAddr::V6(Ipv6Addr::from(last)),
        netmask: IpAddr::V6(Ipv6Addr::from(mask)),
        wildcard: IpAddr::V6(Ipv6Addr::from(!mask)),
        total,
        usable,
        first_usable,
        last_usable,
    }
}

fn or_na(addr: Option<IpAddr>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Tool entry point: subnet details as text, or `Error: <reason>`.
pub fn calculate_subnet(cidr: &str) -> String {
    match parse_subnet(cidr) {
        Ok(details) => format!(
            "\nSubnet Details for {}:\n  Network Address: {}\n  Broadcast Address: {}\n  Subnet Mask: {}\n  Wildcard Mask: {}\n  Total Hosts: {}\n  Usable Hosts: {}\n  First Usable: {}\n  Last Usable: {}\n",
            cidr,
            details.network,
            details.broadcast,
            details.netmask,
            details.wildcard,
            details.total,
            details.usable,
            or_na(details.first_usable),
            or_na(details.last_usable),
        ),
        Err(e) => format!("Error: {}", e),
    }
}
