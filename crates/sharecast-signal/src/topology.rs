//! Peer topology: which peers joined which host.

use std::collections::{HashMap, HashSet};

use sharecast_common::ConnectionId;

#[derive(Debug, Default)]
pub struct PeerTopology {
    /// host -> joined peers
    peers: HashMap<ConnectionId, HashSet<ConnectionId>>,
    /// peer -> hosts it joined
    memberships: HashMap<ConnectionId, HashSet<ConnectionId>>,
}

impl PeerTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty peer set for `host`. Returns the peers of the set it
    /// replaces, if any.
    pub fn init_host(&mut self, host: &ConnectionId) -> HashSet<ConnectionId> {
        let former = self.remove_host(host);
        self.peers.insert(host.clone(), HashSet::new());
        former
    }

    /// Add `peer` to `host`'s set. Returns false, without mutating anything,
    /// if `host` has no active set.
    pub fn add_peer(&mut self, host: &ConnectionId, peer: &ConnectionId) -> bool {
        let Some(set) = self.peers.get_mut(host) else {
            return false;
        };
        set.insert(peer.clone());
        self.memberships
            .entry(peer.clone())
            .or_default()
            .insert(host.clone());
        true
    }

    pub fn peers_of(&self, host: &ConnectionId) -> HashSet<ConnectionId> {
        self.peers.get(host).cloned().unwrap_or_default()
    }

    /// Drop `host`'s peer set entirely. Returns the peers it held.
    pub fn remove_host(&mut self, host: &ConnectionId) -> HashSet<ConnectionId> {
        let former = self.peers.remove(host).unwrap_or_default();
        for peer in &former {
            self.unlink_membership(peer, host);
        }
        former
    }

    /// Remove a single peer from `host`'s set. Returns true if it was present.
    pub fn remove_peer(&mut self, host: &ConnectionId, peer: &ConnectionId) -> bool {
        let removed = self
            .peers
            .get_mut(host)
            .is_some_and(|set| set.remove(peer));
        if removed {
            self.unlink_membership(peer, host);
        }
        removed
    }

    /// Remove `peer` from every set it belongs to. Returns the affected hosts.
    pub fn remove_peer_everywhere(&mut self, peer: &ConnectionId) -> Vec<ConnectionId> {
        let hosts: Vec<ConnectionId> = self
            .memberships
            .remove(peer)
            .map(|hosts| hosts.into_iter().collect())
            .unwrap_or_default();
        for host in &hosts {
            if let Some(set) = self.peers.get_mut(host) {
                set.remove(peer);
            }
        }
        hosts
    }

    /// True when one side hosts a set containing the other.
    pub fn is_linked(&self, a: &ConnectionId, b: &ConnectionId) -> bool {
        let contains = |host: &ConnectionId, peer: &ConnectionId| {
            self.peers.get(host).is_some_and(|set| set.contains(peer))
        };
        contains(a, b) || contains(b, a)
    }

    fn unlink_membership(&mut self, peer: &ConnectionId, host: &ConnectionId) {
        if let Some(hosts) = self.memberships.get_mut(peer) {
            hosts.remove(host);
            if hosts.is_empty() {
                self.memberships.remove(peer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ConnectionId {
        ConnectionId::from(s)
    }

    #[test]
    fn add_peer_after_init() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h"));

        assert!(topo.add_peer(&id("h"), &id("p")));
        assert!(topo.peers_of(&id("h")).contains(&id("p")));
    }

    #[test]
    fn add_peer_without_host_fails_and_changes_nothing() {
        let mut topo = PeerTopology::new();
        assert!(!topo.add_peer(&id("h"), &id("p")));
        assert!(topo.peers_of(&id("h")).is_empty());
        assert!(!topo.is_linked(&id("h"), &id("p")));
        assert!(topo.remove_peer_everywhere(&id("p")).is_empty());
    }

    #[test]
    fn init_host_resets_previous_peers() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h"));
        topo.add_peer(&id("h"), &id("p"));

        let former = topo.init_host(&id("h"));
        assert_eq!(former, HashSet::from([id("p")]));
        assert!(topo.peers_of(&id("h")).is_empty());
        assert!(!topo.is_linked(&id("h"), &id("p")));
        assert!(topo.remove_peer_everywhere(&id("p")).is_empty());

        // A fresh host has nothing to hand back.
        assert!(topo.init_host(&id("h2")).is_empty());
    }

    #[test]
    fn remove_peer_leaves_others() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h"));
        topo.add_peer(&id("h"), &id("p1"));
        topo.add_peer(&id("h"), &id("p2"));

        assert!(topo.remove_peer(&id("h"), &id("p1")));
        assert!(!topo.remove_peer(&id("h"), &id("p1")));

        let peers = topo.peers_of(&id("h"));
        assert_eq!(peers.len(), 1);
        assert!(peers.contains(&id("p2")));
    }

    #[test]
    fn remove_peer_everywhere_covers_all_hosts() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h1"));
        topo.init_host(&id("h2"));
        topo.add_peer(&id("h1"), &id("p"));
        topo.add_peer(&id("h2"), &id("p"));
        topo.add_peer(&id("h2"), &id("q"));

        let mut hosts = topo.remove_peer_everywhere(&id("p"));
        hosts.sort();
        assert_eq!(hosts, vec![id("h1"), id("h2")]);

        assert!(topo.peers_of(&id("h1")).is_empty());
        assert_eq!(topo.peers_of(&id("h2")).len(), 1);
        // h1 still hosts an (empty) set that accepts new peers.
        assert!(topo.add_peer(&id("h1"), &id("r")));
    }

    #[test]
    fn remove_host_returns_former_peers() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h"));
        topo.add_peer(&id("h"), &id("p"));

        let former = topo.remove_host(&id("h"));
        assert!(former.contains(&id("p")));
        assert!(topo.remove_host(&id("h")).is_empty());
        // Without a set, the host can no longer take peers.
        assert!(!topo.add_peer(&id("h"), &id("q")));
    }

    #[test]
    fn links_are_symmetric_between_host_and_peer() {
        let mut topo = PeerTopology::new();
        topo.init_host(&id("h"));
        topo.add_peer(&id("h"), &id("p1"));
        topo.add_peer(&id("h"), &id("p2"));

        assert!(topo.is_linked(&id("h"), &id("p1")));
        assert!(topo.is_linked(&id("p1"), &id("h")));
        // Viewers of the same host are not linked to each other.
        assert!(!topo.is_linked(&id("p1"), &id("p2")));
    }
}
