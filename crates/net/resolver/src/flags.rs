//! Resolver hint flags.

use bitflags::bitflags;

bitflags! {
    /// Hints forwarded verbatim to the name-resolution backend.
    ///
    /// The bits are opaque to everything else in this crate; a backend
    /// that cannot express a hint accepts and ignores it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResolveFlags: u32 {
        /// Addresses are intended for a listening socket.
        const PASSIVE = 1 << 0;
        /// Request the canonical name of the host.
        const CANONICAL_NAME = 1 << 1;
        /// The host string is a numeric address; never query a server.
        const NUMERIC_HOST = 1 << 2;
        /// The service is numeric; never resolve a service name.
        const NUMERIC_SERVICE = 1 << 3;
    }
}
