//! Address family tags for IPv4/IPv6 dispatch.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Address family of a socket address or subnet.
///
/// The family tag can never disagree with an address payload: socket
/// addresses are tagged sums and the family is read off the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrFamily {
    V4,
    V6,
}

impl AddrFamily {
    /// Byte length of the serialized address payload for this family.
    pub const fn addr_len(self) -> usize {
        match self {
            AddrFamily::V4 => 4,
            AddrFamily::V6 => 16,
        }
    }

    /// Width of an address of this family, in bits.
    pub const fn addr_bits(self) -> u32 {
        8 * self.addr_len() as u32
    }

    /// Family of an IP address.
    pub const fn of_ip(ip: &IpAddr) -> AddrFamily {
        match ip {
            IpAddr::V4(_) => AddrFamily::V4,
            IpAddr::V6(_) => AddrFamily::V6,
        }
    }

    /// Family of a socket address.
    pub const fn of(addr: &SocketAddr) -> AddrFamily {
        match addr {
            SocketAddr::V4(_) => AddrFamily::V4,
            SocketAddr::V6(_) => AddrFamily::V6,
        }
    }
}

impl fmt::Display for AddrFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrFamily::V4 => f.write_str("IPv4"),
            AddrFamily::V6 => f.write_str("IPv6"),
        }
    }
}
