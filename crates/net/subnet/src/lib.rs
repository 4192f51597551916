//! IPv4/IPv6 subnet parsing and matching.
//!
//! A subnet is stored as fixed 16-byte network/mask images in network byte
//! order, so containment is a byte-wise mask-and-compare for either family.
//! The parser accepts plain addresses, an address plus a separate
//! mask-or-prefix argument, and the legacy truncated dotted-quad network
//! notation (`"9.67"` meaning `9.67.0.0/16`).

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;
use tracing::error;

use trellis_net_addr::AddrFamily;

/// Fixed width of the network/mask images; IPv4 uses the first 4 bytes.
const SUBNET_BYTES: usize = 16;

/// Error from [`IpSubnet::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubnetParseError {
    /// The text does not even look like an IP token. Callers whose config
    /// accepts host-or-address can fall back to hostname handling on this.
    #[error("`{0}` does not look like an IP address")]
    NotAnAddress(String),

    /// IPv4-mapped IPv6 input. Containment tests stay family-consistent
    /// only when IPv4 addresses are written in plain dotted form.
    #[error("IPv4-mapped IPv6 `{0}` is not supported; use plain a.b.c.d form")]
    V4MappedAddress(String),

    #[error("`{0}` is not a valid IPv4/IPv6 address or network")]
    InvalidAddress(String),

    #[error("`{0}` is not a valid netmask or prefix length")]
    InvalidNetmask(String),
}

/// An IP network: family tag plus network and mask byte images.
///
/// Only the first [`AddrFamily::addr_len`] bytes of each image are
/// meaningful; the remainder is zero. Every constructed value satisfies
/// `net & mask == net`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpSubnet {
    family: AddrFamily,
    net: [u8; SUBNET_BYTES],
    mask: [u8; SUBNET_BYTES],
}

impl IpSubnet {
    /// Parse `ip_text` (with an optional separate mask argument) into a
    /// subnet.
    ///
    /// Accepted shapes for `ip_text`: an IPv6 literal, a dotted-quad IPv4
    /// address, or - only when `mask_or_bits` is `None` - the legacy
    /// truncated network notation. `mask_or_bits` is either a prefix
    /// length (`1..=32` for IPv4, `1..=128` for IPv6) or, for IPv4 only, a
    /// dotted-quad netmask literal.
    ///
    /// Network bits outside the mask are cleared before returning, so
    /// `parse("10.1.2.3", Some("8"))` yields `10.0.0.0/8`.
    pub fn parse(ip_text: &str, mask_or_bits: Option<&str>) -> Result<Self, SubnetParseError> {
        if !looks_like_ip(ip_text) {
            return Err(SubnetParseError::NotAnAddress(ip_text.to_owned()));
        }

        let mut subnet = Self::parse_addr_or_network(ip_text, mask_or_bits.is_none())?;
        if let Some(mask_text) = mask_or_bits {
            subnet.apply_mask_text(mask_text)?;
        }
        subnet.clamp_to_mask();
        Ok(subnet)
    }

    /// Host subnet (/32 or /128) for a single address.
    pub fn host(ip: IpAddr) -> Self {
        let family = AddrFamily::of_ip(&ip);
        let mut net = [0u8; SUBNET_BYTES];
        match ip {
            IpAddr::V4(v4) => net[..4].copy_from_slice(&v4.octets()),
            IpAddr::V6(v6) => net.copy_from_slice(&v6.octets()),
        }
        Self {
            family,
            net,
            mask: prefix_mask(family.addr_bits()),
        }
    }

    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// Network image, truncated to the family's address length.
    pub fn network_bytes(&self) -> &[u8] {
        &self.net[..self.family.addr_len()]
    }

    /// Mask image, truncated to the family's address length.
    pub fn mask_bytes(&self) -> &[u8] {
        &self.mask[..self.family.addr_len()]
    }

    /// Network address as an IP value.
    pub fn network_ip(&self) -> IpAddr {
        match self.family {
            AddrFamily::V4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&self.net[..4]);
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            AddrFamily::V6 => IpAddr::V6(Ipv6Addr::from(self.net)),
        }
    }

    /// Number of leading 1-bits in the mask.
    pub fn prefix_len(&self) -> u32 {
        let mut bits = 0;
        for byte in self.mask_bytes() {
            bits += byte.leading_ones();
            if *byte != 0xFF {
                break;
            }
        }
        bits
    }

    /// Does `ip` fall inside this subnet? Cross-family is always false.
    pub fn contains(&self, ip: IpAddr) -> bool {
        let mut bytes = [0u8; SUBNET_BYTES];
        match ip {
            IpAddr::V4(v4) => {
                if self.family != AddrFamily::V4 {
                    return false;
                }
                bytes[..4].copy_from_slice(&v4.octets());
            }
            IpAddr::V6(v6) => {
                if self.family != AddrFamily::V6 {
                    return false;
                }
                bytes.copy_from_slice(&v6.octets());
            }
        }
        bytes
            .iter()
            .zip(&self.mask)
            .zip(&self.net)
            .all(|((byte, mask), net)| byte & mask == *net)
    }

    /// Containment check on a socket address (port ignored).
    pub fn contains_sockaddr(&self, addr: &SocketAddr) -> bool {
        self.contains(addr.ip())
    }

    fn parse_addr_or_network(
        text: &str,
        network_allowed: bool,
    ) -> Result<Self, SubnetParseError> {
        if let Ok(v6) = Ipv6Addr::from_str(text) {
            if v6.to_ipv4_mapped().is_some() {
                // containment assumes v4 is never stored as mapped v6
                error!(
                    addr = %text,
                    "IPv4-mapped IPv6 is not accepted; use plain a.b.c.d form"
                );
                return Err(SubnetParseError::V4MappedAddress(text.to_owned()));
            }
            return Ok(Self::host(IpAddr::V6(v6)));
        }
        if let Ok(v4) = Ipv4Addr::from_str(text) {
            return Ok(Self::host(IpAddr::V4(v4)));
        }
        if network_allowed {
            return Self::parse_network(text);
        }
        Err(SubnetParseError::InvalidAddress(text.to_owned()))
    }

    /// Legacy truncated network notation: 1-4 dot-joined octets, an
    /// optional single trailing dot, each octet 0-255, packed from the
    /// high octet down. The mask covers exactly the populated octets, so
    /// `"9.67"` is `9.67.0.0/16`.
    fn parse_network(text: &str) -> Result<Self, SubnetParseError> {
        let invalid = || SubnetParseError::InvalidAddress(text.to_owned());

        let mut net = [0u8; SUBNET_BYTES];
        let mut mask = [0u8; SUBNET_BYTES];
        let trimmed = text.strip_suffix('.').unwrap_or(text);
        let mut count = 0usize;
        for part in trimmed.split('.') {
            if count == 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let octet: u32 = part.parse().map_err(|_| invalid())?;
            if octet > 255 {
                return Err(invalid());
            }
            net[count] = octet as u8;
            mask[count] = 0xFF;
            count += 1;
        }

        Ok(Self {
            family: AddrFamily::V4,
            net,
            mask,
        })
    }

    /// Mask argument handling: a full-string prefix length within the
    /// family's width, or - IPv4 only - a dotted-quad netmask literal.
    fn apply_mask_text(&mut self, text: &str) -> Result<(), SubnetParseError> {
        if let Ok(bits) = text.parse::<u32>() {
            if (1..=self.family.addr_bits()).contains(&bits) {
                self.mask = prefix_mask(bits);
                return Ok(());
            }
        }
        if self.family == AddrFamily::V4 {
            if let Ok(quad) = Ipv4Addr::from_str(text) {
                let mut mask = [0u8; SUBNET_BYTES];
                mask[..4].copy_from_slice(&quad.octets());
                self.mask = mask;
                return Ok(());
            }
        }
        error!(netmask = %text, "bad netmask");
        Err(SubnetParseError::InvalidNetmask(text.to_owned()))
    }

    /// Clear network bits the mask does not cover.
    fn clamp_to_mask(&mut self) {
        for (net, mask) in self.net.iter_mut().zip(self.mask) {
            *net &= mask;
        }
    }
}

impl fmt::Display for IpSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_ip(), self.prefix_len())
    }
}

impl FromStr for IpSubnet {
    type Err = SubnetParseError;

    /// Single-token form: `"addr"`, `"addr/bits"` or `"addr/m.m.m.m"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((ip, mask)) => Self::parse(ip, Some(mask)),
            None => Self::parse(s, None),
        }
    }
}

/// Cheap token-shape check so callers whose syntax allows hostname or
/// address can tell the two apart without committing to a full parse.
/// Anything containing ':' is taken as an IPv6 candidate; otherwise only
/// digits and dots qualify.
fn looks_like_ip(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.contains(':') {
        return true;
    }
    text.bytes().all(|b| b == b'.' || b.is_ascii_digit())
}

/// Left-aligned run of `bits` 1-bits over the 16-byte image.
fn prefix_mask(bits: u32) -> [u8; SUBNET_BYTES] {
    let mut mask = [0u8; SUBNET_BYTES];
    let full = (bits / 8) as usize;
    for byte in mask.iter_mut().take(full) {
        *byte = 0xFF;
    }
    let partial = bits % 8;
    if partial != 0 {
        mask[full] = 0xFF << (8 - partial);
    }
    mask
}
