//! Hostname lookup seam and the list-building resolver on top of it.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;
use tracing::{error, trace};

use trellis_net_addr::{AddrFamily, AddrList};

use crate::flags::ResolveFlags;

/// Error from [`Resolver`] operations.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The lookup backend itself failed.
    #[error("lookup for `{host}` failed: {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },

    /// The backend returned, but nothing usable resulted.
    #[error("no usable address for `{host}` port {port}")]
    NoAddresses { host: String, port: u16 },
}

/// External name-resolution facility.
///
/// Implementations return entries in resolution order; that order is
/// preserved all the way into the caller's list. A `family` of `None`
/// means both families are acceptable.
pub trait HostLookup {
    fn lookup(
        &self,
        host: &str,
        port: u16,
        family: Option<AddrFamily>,
        flags: ResolveFlags,
    ) -> io::Result<Vec<SocketAddr>>;
}

/// System resolver backend over the blocking `std` lookup.
///
/// The std resolver takes neither a family hint nor flag bits, so the
/// hint is applied as a post-filter and the flags are accepted and
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl HostLookup for SystemLookup {
    fn lookup(
        &self,
        host: &str,
        port: u16,
        family: Option<AddrFamily>,
        _flags: ResolveFlags,
    ) -> io::Result<Vec<SocketAddr>> {
        let addrs = (host, port).to_socket_addrs()?;
        Ok(addrs
            .filter(|addr| family.is_none_or(|family| AddrFamily::of(addr) == family))
            .collect())
    }
}

/// Builds and extends [`AddrList`]s from a lookup backend.
#[derive(Debug, Clone, Default)]
pub struct Resolver<L = SystemLookup> {
    backend: L,
}

impl Resolver<SystemLookup> {
    /// Resolver over the system lookup.
    pub fn system() -> Self {
        Self {
            backend: SystemLookup,
        }
    }
}

impl<L: HostLookup> Resolver<L> {
    pub fn new(backend: L) -> Self {
        Self { backend }
    }

    /// Resolve `host` into a fresh list.
    pub fn resolve(
        &self,
        host: &str,
        port: u16,
        family: Option<AddrFamily>,
        flags: ResolveFlags,
    ) -> Result<AddrList, ResolveError> {
        let mut list = AddrList::new();
        self.resolve_into(&mut list, host, port, family, flags)?;
        Ok(list)
    }

    /// Resolve `host` and append every entry onto `list`.
    ///
    /// Existing entries are kept untouched. The caller's `port` overrides
    /// whatever port the backend reported; backend ordering is preserved.
    /// The whole call fails if the backend errors or if it returns zero
    /// usable entries - appending nothing to a non-empty list is still
    /// that failure.
    pub fn resolve_into(
        &self,
        list: &mut AddrList,
        host: &str,
        port: u16,
        family: Option<AddrFamily>,
        flags: ResolveFlags,
    ) -> Result<(), ResolveError> {
        let entries = self
            .backend
            .lookup(host, port, family, flags)
            .map_err(|source| {
                error!(host, port, ?family, ?flags, %source, "hostname lookup failed");
                ResolveError::Lookup {
                    host: host.to_owned(),
                    source,
                }
            })?;

        let mut appended = 0usize;
        for mut addr in entries {
            addr.set_port(port);
            trace!(addr = %addr.ip(), port, "resolved address");
            list.push(addr);
            appended += 1;
        }

        if appended == 0 {
            error!(host, port, ?family, "lookup returned no usable address");
            return Err(ResolveError::NoAddresses {
                host: host.to_owned(),
                port,
            });
        }
        Ok(())
    }
}
