//! Family-tagged socket address lists and strict address text conversion.
//!
//! - [`family`] - IPv4/IPv6 family tags and per-family address lengths
//! - [`list`] - ordered owned address lists with family filter/preference
//! - [`text`] - family-dispatched address parsing and rendering

pub mod family;
pub mod list;
pub mod text;

pub use family::AddrFamily;
pub use list::{AddrList, same_host};
pub use text::{AddrTextError, addr_to_string, parse_ip};
