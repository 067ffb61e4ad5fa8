//! Wire protocol between clients and the signaling coordinator.
//!
//! Every WebSocket text frame carries one JSON object of the form
//! `{"event": "<name>", "data": <payload>}`. Payload-less events omit `data`.
//! Negotiation payloads (SDP offers/answers, ICE candidates) are opaque to
//! the coordinator and forwarded untouched.

use serde::{Deserialize, Serialize};
use sharecast_common::{ConnectionId, SessionCode, SignalError};

// ---------------------------------------------------------------------------
// Negotiation payloads
// ---------------------------------------------------------------------------

/// Opaque negotiation blob owned by the endpoints' media stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NegotiationPayload(serde_json::Value);

impl NegotiationPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for NegotiationPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Which negotiation step a relayed payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationKind {
    Offer,
    Answer,
    IceCandidate,
}

impl NegotiationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound (client -> coordinator)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Request a new session code for the sender.
    StartScreenShare,

    JoinSession {
        code: SessionCode,
    },

    NewOffer {
        offer: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    NewAnswer {
        answer: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    NewIceCandidate {
        candidate: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    /// The host stopped sharing.
    ScreenShareStopped,
}

impl ClientMessage {
    /// Decode one inbound text frame.
    pub fn parse(text: &str) -> Result<Self, SignalError> {
        serde_json::from_str(text).map_err(|e| SignalError::Protocol(e.to_string()))
    }

    /// Event name, for logging. Never includes payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartScreenShare => "startScreenShare",
            Self::JoinSession { .. } => "joinSession",
            Self::NewOffer { .. } => "newOffer",
            Self::NewAnswer { .. } => "newAnswer",
            Self::NewIceCandidate { .. } => "newIceCandidate",
            Self::ScreenShareStopped => "screenShareStopped",
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound (coordinator -> client)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The code a host hands out to viewers.
    SessionCode(SessionCode),

    JoinSuccess,

    JoinFailure,

    /// Tells the host to start negotiating with a newly joined peer.
    GetOffer {
        #[serde(rename = "newClient")]
        new_client: ConnectionId,
    },

    /// `socket_id` is always the sender of the payload.
    OnOffer {
        offer: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    OnAnswer {
        answer: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    OnIceCandidate {
        candidate: NegotiationPayload,
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    ScreenShareEnded,
}

impl ServerMessage {
    /// Event name, for logging. Never includes payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionCode(_) => "sessionCode",
            Self::JoinSuccess => "joinSuccess",
            Self::JoinFailure => "joinFailure",
            Self::GetOffer { .. } => "getOffer",
            Self::OnOffer { .. } => "onOffer",
            Self::OnAnswer { .. } => "onAnswer",
            Self::OnIceCandidate { .. } => "onIceCandidate",
            Self::ScreenShareEnded => "screenShareEnded",
        }
    }
}
