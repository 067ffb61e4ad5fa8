//! Negotiation relay: forwards opaque offer/answer/candidate payloads between
//! two named connections.

use sharecast_common::{ConnectionId, SignalError};

use crate::protocol::{NegotiationKind, NegotiationPayload, ServerMessage};
use crate::topology::PeerTopology;

/// A message the coordinator wants delivered to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub target: ConnectionId,
    pub message: ServerMessage,
}

impl Outbound {
    pub fn new(target: ConnectionId, message: ServerMessage) -> Self {
        Self { target, message }
    }
}

/// Stateless forwarder. It never mutates topology and never parses payloads.
#[derive(Debug, Clone, Copy)]
pub struct NegotiationRelay {
    enforce_membership: bool,
}

impl Default for NegotiationRelay {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NegotiationRelay {
    pub fn new(enforce_membership: bool) -> Self {
        Self { enforce_membership }
    }

    /// Check that `from` may address `to`: one must host a session the
    /// other has joined.
    pub fn authorize(
        &self,
        topology: &PeerTopology,
        from: &ConnectionId,
        to: &ConnectionId,
    ) -> Result<(), SignalError> {
        if !self.enforce_membership || topology.is_linked(from, to) {
            Ok(())
        } else {
            Err(SignalError::Forbidden {
                from: from.clone(),
                to: to.clone(),
            })
        }
    }

    /// Build the `on<Kind>` message for `to`, stamped with the sender's id.
    pub fn relay(
        &self,
        kind: NegotiationKind,
        from: &ConnectionId,
        to: &ConnectionId,
        payload: NegotiationPayload,
    ) -> Outbound {
        let socket_id = from.clone();
        let message = match kind {
            NegotiationKind::Offer => ServerMessage::OnOffer {
                offer: payload,
                socket_id,
            },
            NegotiationKind::Answer => ServerMessage::OnAnswer {
                answer: payload,
                socket_id,
            },
            NegotiationKind::IceCandidate => ServerMessage::OnIceCandidate {
                candidate: payload,
                socket_id,
            },
        };
        Outbound::new(to.clone(), message)
    }
}
