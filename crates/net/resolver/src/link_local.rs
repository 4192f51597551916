//! IPv6 link-local discovery for a named network device.
//!
//! Queries the system's interfaces through `netdev`, which covers Linux,
//! macOS, Windows and the BSDs; on platforms without interface
//! enumeration the query simply finds nothing.

use std::net::{SocketAddr, SocketAddrV6};

use tracing::debug;

/// First IPv6 link-local address bound to device `dev`.
///
/// The returned address carries the interface index as its scope id and
/// port 0. Returns `None` when the device is unknown or has no
/// link-local address.
pub fn link_local_addr_by_dev(dev: &str) -> Option<SocketAddr> {
    for iface in netdev::get_interfaces() {
        if iface.name != dev {
            continue;
        }
        for net in &iface.ipv6 {
            let addr = net.addr();
            if addr.is_unicast_link_local() {
                return Some(SocketAddr::V6(SocketAddrV6::new(addr, 0, 0, iface.index)));
            }
        }
        debug!(device = dev, "no link-local address on device");
        return None;
    }
    debug!(device = dev, "device not found");
    None
}
