//! Blocking hostname resolution into owned address lists.
//!
//! - [`lookup`] - the name-resolution seam and the list-building resolver
//! - [`flags`] - hint bits passed through to the lookup backend verbatim
//! - [`link_local`] - IPv6 link-local discovery for a named device
//!
//! Resolution is synchronous: every call completes or fails before
//! returning, and no caching happens anywhere in this crate.

pub mod flags;
pub mod link_local;
pub mod lookup;

pub use flags::ResolveFlags;
pub use link_local::link_local_addr_by_dev;
pub use lookup::{HostLookup, ResolveError, Resolver, SystemLookup};
