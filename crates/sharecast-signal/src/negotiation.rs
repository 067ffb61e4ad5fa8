//! Endpoint-side negotiation sequencing.
//!
//! ICE candidates can arrive before the remote description they belong to
//! has been applied. The receiving endpoint holds them per remote connection
//! until the description lands, then applies them in arrival order. The
//! coordinator itself never buffers.

use std::collections::HashMap;

use sharecast_common::ConnectionId;

use crate::protocol::NegotiationPayload;

/// State of one (local, remote) negotiation pair.
#[derive(Debug, Default)]
pub struct NegotiationPairState {
    remote_description_applied: bool,
    pending_candidates: Vec<NegotiationPayload>,
}

/// What to do with a freshly received candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateDisposition {
    /// The remote description is in place; apply the candidate now.
    Apply(NegotiationPayload),
    /// Held until the remote description is applied.
    Buffered,
}

#[derive(Debug, Default)]
pub struct NegotiationBook {
    pairs: HashMap<ConnectionId, NegotiationPairState>,
}

impl NegotiationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate_received(
        &mut self,
        remote: &ConnectionId,
        candidate: NegotiationPayload,
    ) -> CandidateDisposition {
        let pair = self.pairs.entry(remote.clone()).or_default();
        if pair.remote_description_applied {
            CandidateDisposition::Apply(candidate)
        } else {
            pair.pending_candidates.push(candidate);
            CandidateDisposition::Buffered
        }
    }

    /// Mark the remote description for `remote` as applied and return the
    /// candidates held so far, oldest first.
    pub fn remote_description_applied(&mut self, remote: &ConnectionId) -> Vec<NegotiationPayload> {
        let pair = self.pairs.entry(remote.clone()).or_default();
        pair.remote_description_applied = true;
        std::mem::take(&mut pair.pending_candidates)
    }

    pub fn is_applied(&self, remote: &ConnectionId) -> bool {
        self.pairs
            .get(remote)
            .is_some_and(|pair| pair.remote_description_applied)
    }

    pub fn pending(&self, remote: &ConnectionId) -> usize {
        self.pairs
            .get(remote)
            .map_or(0, |pair| pair.pending_candidates.len())
    }

    /// Drop the pair with `remote`, discarding anything still buffered.
    pub fn forget(&mut self, remote: &ConnectionId) -> bool {
        self.pairs.remove(remote).is_some()
    }

    /// Drop every pair, e.g. when the share ends.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
