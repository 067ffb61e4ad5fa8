//! sharecast-signal: signaling coordinator for screen sharing.
//!
//! Hosts request a short session code, viewers join with it, and the
//! coordinator relays offer/answer/ICE-candidate payloads between a host and
//! each of its viewers. Payloads are never inspected; media flows directly
//! between the endpoints once negotiation completes.

pub mod client;
pub mod connections;
pub mod coordinator;
pub mod negotiation;
pub mod protocol;
pub mod relay;
pub mod sessions;
pub mod topology;
pub mod transport;

pub use client::SignalClient;
pub use connections::ConnectionRegistry;
pub use coordinator::LifecycleCoordinator;
pub use negotiation::{CandidateDisposition, NegotiationBook, NegotiationPairState};
pub use protocol::{ClientMessage, NegotiationKind, NegotiationPayload, ServerMessage};
pub use relay::{NegotiationRelay, Outbound};
pub use sessions::SessionRegistry;
pub use topology::PeerTopology;
pub use transport::serve;
