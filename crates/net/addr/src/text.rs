//! Strict, family-dispatched address text conversion.
//!
//! Parsing is strict against the requested family: the other family's
//! textual form is an error, never a fallback to the sibling parser.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use crate::family::AddrFamily;

/// Error parsing address text against a required family.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddrTextError {
    #[error("`{text}` is not a valid {family} address")]
    FamilyMismatch { family: AddrFamily, text: String },
}

/// Render the address portion (no port) of a socket address.
///
/// IPv4 renders dotted quad, IPv6 the standard colon-hex form.
pub fn addr_to_string(addr: &SocketAddr) -> String {
    addr.ip().to_string()
}

/// Parse `text` strictly as an address of `family`.
pub fn parse_ip(family: AddrFamily, text: &str) -> Result<IpAddr, AddrTextError> {
    let parsed = match family {
        AddrFamily::V4 => Ipv4Addr::from_str(text).map(IpAddr::V4),
        AddrFamily::V6 => Ipv6Addr::from_str(text).map(IpAddr::V6),
    };
    parsed.map_err(|_| AddrTextError::FamilyMismatch {
        family,
        text: text.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_render_v4_dotted_quad() {
        let addr: SocketAddr = "192.0.2.7:8080".parse().unwrap();
        assert_eq!(addr_to_string(&addr), "192.0.2.7");
    }

    #[test]
    fn test_render_v6_colon_hex() {
        let addr: SocketAddr = "[2001:db8::1]:8080".parse().unwrap();
        assert_eq!(addr_to_string(&addr), "2001:db8::1");
    }

    #[test]
    fn test_parse_strict_family_no_fallback() {
        assert!(parse_ip(AddrFamily::V4, "::1").is_err());
        assert!(parse_ip(AddrFamily::V6, "127.0.0.1").is_err());
        assert_eq!(
            parse_ip(AddrFamily::V4, "127.0.0.1"),
            Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        assert_eq!(
            parse_ip(AddrFamily::V6, "::1"),
            Ok(IpAddr::V6(Ipv6Addr::LOCALHOST))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_ip(AddrFamily::V4, "not-an-address").unwrap_err();
        let AddrTextError::FamilyMismatch { family, text } = err;
        assert_eq!(family, AddrFamily::V4);
        assert_eq!(text, "not-an-address");
    }

    proptest! {
        #[test]
        fn prop_v4_round_trip(bits: u32, port: u16) {
            let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::from(bits)), port);
            let text = addr_to_string(&addr);
            prop_assert_eq!(parse_ip(AddrFamily::V4, &text), Ok(addr.ip()));
        }

        #[test]
        fn prop_v6_round_trip(bits: u128, port: u16) {
            let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::from(bits)), port);
            let text = addr_to_string(&addr);
            prop_assert_eq!(parse_ip(AddrFamily::V6, &text), Ok(addr.ip()));
        }
    }
}
