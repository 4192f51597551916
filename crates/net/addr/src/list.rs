//! Ordered, owned socket address lists and family-based transforms.
//!
//! Resolution appends entries in backend order; the transforms here remove
//! or regroup entries without disturbing the relative order of survivors.
//! A list has exactly one owner; cloning it is a deep copy with fully
//! independent storage.

use std::net::SocketAddr;
use std::slice;

use crate::family::AddrFamily;

/// Two addresses refer to the same host: same family, same address bytes.
///
/// Ports (and IPv6 flow/scope information) are not compared. Mismatched
/// families compare unequal.
pub fn same_host(a: &SocketAddr, b: &SocketAddr) -> bool {
    match (a, b) {
        (SocketAddr::V4(a), SocketAddr::V4(b)) => a.ip() == b.ip(),
        (SocketAddr::V6(a), SocketAddr::V6(b)) => a.ip() == b.ip(),
        _ => false,
    }
}

/// An ordered, exclusively owned list of resolved socket addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddrList(Vec<SocketAddr>);

impl AddrList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one address at the tail.
    pub fn push(&mut self, addr: SocketAddr) {
        self.0.push(addr);
    }

    /// Move every entry of `other` onto the tail of this list.
    pub fn append(&mut self, other: &mut AddrList) {
        self.0.append(&mut other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&SocketAddr> {
        self.0.first()
    }

    pub fn iter(&self) -> slice::Iter<'_, SocketAddr> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SocketAddr] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<SocketAddr> {
        self.0
    }

    /// Keep only entries of `family`, preserving their relative order.
    ///
    /// Filtering an already-filtered list by the same family is a no-op.
    pub fn retain_family(&mut self, family: AddrFamily) {
        self.0.retain(|addr| AddrFamily::of(addr) == family);
    }

    /// Stable partition: move every `family` entry in front of the rest.
    ///
    /// Both groups keep their original relative order.
    pub fn prefer_family(&mut self, family: AddrFamily) {
        let mut preferred = Vec::with_capacity(self.0.len());
        let mut rest = Vec::new();
        for addr in self.0.drain(..) {
            if AddrFamily::of(&addr) == family {
                preferred.push(addr);
            } else {
                rest.push(addr);
            }
        }
        preferred.append(&mut rest);
        self.0 = preferred;
    }

    /// Apply the combined family policy used when building connect lists.
    ///
    /// `no_ipv4` keeps only IPv6 entries, `no_ipv6` keeps only IPv4
    /// entries; the remainder is then partitioned so the preferred family
    /// comes first.
    pub fn filter_ip_version(&mut self, no_ipv4: bool, no_ipv6: bool, prefer_ipv4: bool) {
        if no_ipv4 {
            self.retain_family(AddrFamily::V6);
        }
        if no_ipv6 {
            self.retain_family(AddrFamily::V4);
        }
        if prefer_ipv4 {
            self.prefer_family(AddrFamily::V4);
        } else {
            self.prefer_family(AddrFamily::V6);
        }
    }
}

impl From<Vec<SocketAddr>> for AddrList {
    fn from(addrs: Vec<SocketAddr>) -> Self {
        Self(addrs)
    }
}

impl FromIterator<SocketAddr> for AddrList {
    fn from_iter<I: IntoIterator<Item = SocketAddr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AddrList {
    type Item = SocketAddr;
    type IntoIter = std::vec::IntoIter<SocketAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddrList {
    type Item = &'a SocketAddr;
    type IntoIter = slice::Iter<'a, SocketAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> AddrList {
        [
            "10.0.0.1:1",
            "[2001:db8::1]:2",
            "10.0.0.2:3",
            "[2001:db8::2]:4",
            "10.0.0.3:5",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
    }

    #[test]
    fn test_same_host_ignores_port() {
        let a: SocketAddr = "10.0.0.1:80".parse().unwrap();
        let b: SocketAddr = "10.0.0.1:443".parse().unwrap();
        assert!(same_host(&a, &b));

        let a6: SocketAddr = "[fe80::1]:80".parse().unwrap();
        let b6: SocketAddr = "[fe80::1]:8080".parse().unwrap();
        assert!(same_host(&a6, &b6));
    }

    #[test]
    fn test_same_host_cross_family_unequal() {
        let v4: SocketAddr = "1.2.3.4:80".parse().unwrap();
        let v6: SocketAddr = "[::ffff:1.2.3.4]:80".parse().unwrap();
        assert!(!same_host(&v4, &v6));
    }

    #[test]
    fn test_same_host_different_address() {
        let a: SocketAddr = "10.0.0.1:80".parse().unwrap();
        let b: SocketAddr = "10.0.0.2:80".parse().unwrap();
        assert!(!same_host(&a, &b));
    }

    #[test]
    fn test_retain_family_keeps_order() {
        let mut list = sample_list();
        list.retain_family(AddrFamily::V4);

        let ports: Vec<u16> = list.iter().map(|a| a.port()).collect();
        assert_eq!(ports, vec![1, 3, 5]);
        assert!(list.iter().all(|a| AddrFamily::of(a) == AddrFamily::V4));
    }

    #[test]
    fn test_retain_family_removes_exactly_non_matching() {
        let mut list = sample_list();
        let v6_count = list
            .iter()
            .filter(|a| AddrFamily::of(a) == AddrFamily::V6)
            .count();
        let before = list.len();
        list.retain_family(AddrFamily::V4);
        assert_eq!(list.len(), before - v6_count);
    }

    #[test]
    fn test_retain_family_idempotent() {
        let mut list = sample_list();
        list.retain_family(AddrFamily::V6);
        let once = list.clone();
        list.retain_family(AddrFamily::V6);
        assert_eq!(list, once);
    }

    #[test]
    fn test_prefer_family_stable_two_group_order() {
        let mut list = sample_list();
        list.prefer_family(AddrFamily::V6);

        let ports: Vec<u16> = list.iter().map(|a| a.port()).collect();
        // v6 entries first in original order, then v4 in original order
        assert_eq!(ports, vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_prefer_family_total_order_after_repeated_runs() {
        // alternating families stress the regrouping
        let mut list: AddrList = [
            "[::1]:1", "1.1.1.1:2", "[::2]:3", "2.2.2.2:4", "[::3]:5", "3.3.3.3:6",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

        list.prefer_family(AddrFamily::V4);
        let ports: Vec<u16> = list.iter().map(|a| a.port()).collect();
        assert_eq!(ports, vec![2, 4, 6, 1, 3, 5]);
    }

    #[test]
    fn test_prefer_family_on_empty_list() {
        let mut list = AddrList::new();
        list.prefer_family(AddrFamily::V4);
        assert!(list.is_empty());
    }

    #[test]
    fn test_filter_ip_version_no_ipv4_keeps_v6_only() {
        let mut list = sample_list();
        list.filter_ip_version(true, false, false);
        assert!(!list.is_empty());
        assert!(list.iter().all(|a| AddrFamily::of(a) == AddrFamily::V6));
    }

    #[test]
    fn test_filter_ip_version_no_ipv6_keeps_v4_only() {
        let mut list = sample_list();
        list.filter_ip_version(false, true, true);
        assert!(!list.is_empty());
        assert!(list.iter().all(|a| AddrFamily::of(a) == AddrFamily::V4));
    }

    #[test]
    fn test_filter_ip_version_prefer_v4_front() {
        let mut list = sample_list();
        list.filter_ip_version(false, false, true);
        assert_eq!(list.len(), 5);
        assert_eq!(
            AddrFamily::of(list.first().unwrap()),
            AddrFamily::V4
        );
        let ports: Vec<u16> = list.iter().map(|a| a.port()).collect();
        assert_eq!(ports, vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let source = sample_list();
        let mut copy = source.clone();
        assert_eq!(copy, source);

        copy.retain_family(AddrFamily::V6);
        copy.push("[::9]:99".parse().unwrap());
        assert_eq!(source, sample_list());
        assert_ne!(copy, source);
    }

    #[test]
    fn test_append_moves_entries() {
        let mut list = AddrList::new();
        let mut tail = sample_list();
        list.append(&mut tail);
        assert!(tail.is_empty());
        assert_eq!(list.len(), 5);
    }
}
