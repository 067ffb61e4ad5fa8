//! Lifecycle coordinator: dispatches inbound messages, drives session and
//! topology state, and delivers the resulting messages.
//!
//! Per host the lifecycle is `Idle -> Sharing -> Ended`. Both an explicit
//! `screenShareStopped` and a host disconnect end the session the same way:
//! every current peer gets one `screenShareEnded`, then the host's codes and
//! peer set are dropped. Restarting a share while already sharing resets
//! the peer set, and the peers it held are told the same way.
//!
//! Session and topology state live behind one mutex so that a join
//! (resolve + add peer) is atomic. Handlers compute their outbound messages
//! under the lock and deliver them after releasing it.


use sharecast_common::{ConnectionId, SessionCode, SignalError};
use sharecast_config::SharecastConfig;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::connections::{ConnectionRegistry, OutboundSender};
use crate::protocol::{ClientMessage, NegotiationKind, NegotiationPayload, ServerMessage};
use crate::relay::{NegotiationRelay, Outbound};
use crate::sessions::SessionRegistry;
use crate::topology::PeerTopology;

#[derive(Debug, Default)]
struct SignalState {
    sessions: SessionRegistry,
    topology: PeerTopology,
}

pub struct LifecycleCoordinator {
    state: Mutex<SignalState>,
    connections: ConnectionRegistry,
    relay: NegotiationRelay,
}

impl Default for LifecycleCoordinator {
    fn default() -> Self {
        Self::new(SessionRegistry::default(), NegotiationRelay::default())
    }
}

impl LifecycleCoordinator {
    pub fn new(sessions: SessionRegistry, relay: NegotiationRelay) -> Self {
        Self {
            state: Mutex::new(SignalState {
                sessions,
                topology: PeerTopology::new(),
            }),
            connections: ConnectionRegistry::new(),
            relay,
        }
    }

    pub fn from_config(config: &SharecastConfig) -> Self {
        Self::new(
            SessionRegistry::new(
                config.sessions.code_length,
                config.sessions.max_code_attempts,
            ),
            NegotiationRelay::new(config.relay.enforce_membership),
        )
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    // ---- Connection lifecycle --------------------------------------------

    /// Register a new connection and return its freshly minted id.
    pub async fn connect(&self, tx: OutboundSender) -> ConnectionId {
        let id = ConnectionId::new();
        self.register(id.clone(), tx).await;
        id
    }

    pub async fn register(&self, id: ConnectionId, tx: OutboundSender) {
        self.connections.register(id.clone(), tx).await;
        info!(connection = %id, "connection registered");
    }

    /// Transport-level disconnect of `id`.
    ///
    /// The connection is unregistered before any state is touched, so nothing
    /// processed afterwards can be relayed to it. If it hosted a session the
    /// session ends; it is also removed from every peer set it joined.
    pub async fn disconnect(&self, id: &ConnectionId) {
        self.connections.unregister(id).await;

        let outbound = {
            let mut state = self.state.lock().await;
            let outbound = end_session_locked(&mut state, id);
            let hosts = state.topology.remove_peer_everywhere(id);
            if !hosts.is_empty() {
                debug!(connection = %id, hosts = hosts.len(), "peer left sessions");
            }
            outbound
        };

        info!(connection = %id, "connection closed");
        self.deliver(outbound).await;
    }

    // ---- Message dispatch ------------------------------------------------

    /// Main entrypoint: handle a message coming from `from` and deliver the
    /// result.
    pub async fn handle(&self, from: &ConnectionId, msg: ClientMessage) {
        debug!(connection = %from, event = msg.name(), "inbound message");

        let outbound = match msg {
            ClientMessage::StartScreenShare => self.start_share(from).await,
            ClientMessage::JoinSession { code } => self.join(from, &code).await,
            ClientMessage::NewOffer { offer, socket_id } => {
                self.negotiate(NegotiationKind::Offer, from, &socket_id, offer)
                    .await
            }
            ClientMessage::NewAnswer { answer, socket_id } => {
                self.negotiate(NegotiationKind::Answer, from, &socket_id, answer)
                    .await
            }
            ClientMessage::NewIceCandidate {
                candidate,
                socket_id,
            } => {
                self.negotiate(NegotiationKind::IceCandidate, from, &socket_id, candidate)
                    .await
            }
            ClientMessage::ScreenShareStopped => self.end_session(from).await,
        };

        self.deliver(outbound).await;
    }

    // ---- Individual handlers ---------------------------------------------

    /// `Idle -> Sharing`: issue a code and reset the host's peer set.
    ///
    /// Peers that joined an earlier share of the same host are dropped from
    /// the set and get one `screenShareEnded` each.
    pub async fn start_share(&self, host: &ConnectionId) -> Vec<Outbound> {
        let mut state = self.state.lock().await;

        match state.sessions.create_session(host) {
            Ok(code) => {
                let mut former: Vec<ConnectionId> =
                    state.topology.init_host(host).into_iter().collect();
                former.sort();
                info!(host = %host, code = %code, dropped_peers = former.len(), "screen share started");

                let mut outbound = vec![Outbound::new(host.clone(), ServerMessage::SessionCode(code))];
                outbound.extend(
                    former
                        .into_iter()
                        .map(|peer| Outbound::new(peer, ServerMessage::ScreenShareEnded)),
                );
                outbound
            }
            Err(e) => {
                warn!(host = %host, error = %e, "could not issue session code");
                Vec::new()
            }
        }
    }

    /// Join the session behind `code`.
    ///
    /// On success the requester gets `joinSuccess` and the host is asked to
    /// send an offer to the new peer.
    pub async fn join(&self, requester: &ConnectionId, code: &SessionCode) -> Vec<Outbound> {
        let mut state = self.state.lock().await;

        let joined = match state.sessions.resolve(code) {
            None => Err(SignalError::SessionNotFound(code.to_string())),
            Some(host) if &host == requester => Err(SignalError::Forbidden {
                from: requester.clone(),
                to: host,
            }),
            Some(host) => {
                if state.topology.add_peer(&host, requester) {
                    Ok(host)
                } else {
                    Err(SignalError::SessionNotFound(code.to_string()))
                }
            }
        };

        match joined {
            Ok(host) => {
                info!(peer = %requester, host = %host, code = %code, "peer joined");
                vec![
                    Outbound::new(requester.clone(), ServerMessage::JoinSuccess),
                    Outbound::new(
                        host,
                        ServerMessage::GetOffer {
                            new_client: requester.clone(),
                        },
                    ),
                ]
            }
            Err(e) => {
                debug!(peer = %requester, code = %code, error = %e, "join rejected");
                vec![Outbound::new(requester.clone(), ServerMessage::JoinFailure)]
            }
        }
    }

    /// Forward one negotiation payload from `from` to `to`.
    ///
    /// Misdirected or dangling messages are dropped silently.
    pub async fn negotiate(
        &self,
        kind: NegotiationKind,
        from: &ConnectionId,
        to: &ConnectionId,
        payload: NegotiationPayload,
    ) -> Vec<Outbound> {
        let authorized = {
            let state = self.state.lock().await;
            self.relay.authorize(&state.topology, from, to)
        };
        if let Err(e) = authorized {
            debug!(kind = kind.as_str(), error = %e, "relay dropped");
            return Vec::new();
        }

        if !self.connections.contains(to).await {
            let e = SignalError::UnknownTargetConnection(to.clone());
            debug!(kind = kind.as_str(), from = %from, error = %e, "relay dropped");
            return Vec::new();
        }

        vec![self.relay.relay(kind, from, to, payload)]
    }

    /// `Sharing -> Ended`: notify every current peer, then drop the host's
    /// codes and peer set. Idempotent.
    pub async fn end_session(&self, host: &ConnectionId) -> Vec<Outbound> {
        let mut state = self.state.lock().await;
        end_session_locked(&mut state, host)
    }

    // ---- Introspection ---------------------------------------------------

    pub async fn resolve(&self, code: &SessionCode) -> Option<ConnectionId> {
        self.state.lock().await.sessions.resolve(code)
    }

    pub async fn peers_of(&self, host: &ConnectionId) -> Vec<ConnectionId> {
        let mut peers: Vec<ConnectionId> = self
            .state
            .lock()
            .await
            .topology
            .peers_of(host)
            .into_iter()
            .collect();
        peers.sort();
        peers
    }

    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    // ---- Delivery --------------------------------------------------------

    async fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { target, message } in outbound {
            let event = message.name();
            if let Err(e) = self.connections.send(&target, message).await {
                if e.is_retryable() {
                    warn!(connection = %target, event = event, error = %e, "message dropped");
                } else {
                    debug!(connection = %target, event = event, error = %e, "message dropped");
                }
            }
        }
    }
}

fn end_session_locked(state: &mut SignalState, host: &ConnectionId) -> Vec<Outbound> {
    let mut peers: Vec<ConnectionId> = state.topology.remove_host(host).into_iter().collect();
    let codes = state.sessions.remove_all_for(host);

    if codes.is_empty() && peers.is_empty() {
        return Vec::new();
    }

    peers.sort();
    info!(host = %host, codes = codes.len(), peers = peers.len(), "screen share ended");

    peers
        .into_iter()
        .map(|peer| Outbound::new(peer, ServerMessage::ScreenShareEnded))
        .collect()
}
