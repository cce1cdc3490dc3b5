//! Tunnel endpoint task
//!
//! A UDP endpoint implementing reliable delivery of GTP signalling
//! messages per TS 29.274 §7.6: requests are matched to replies by
//! sequence number and remote address, unreplied requests are
//! retransmitted byte-identically up to a bounded number of times, and
//! incoming requests that expect a triggered message are answered.
//!
//! The dispatcher is the sole owner of the outstanding-message table and
//! the destination map. Everything else reaches it through channels: the
//! caller over the command channel, retry timers over the internal
//! channel, and the socket through the receive arm of the select loop.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::OsRng;
use rand::RngCore;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use gtplink_codec::catalog::MessageDescriptor;
use gtplink_codec::{catalog, GtpVersion, Pdu, PduIes};
use gtplink_common::logging::{log_gtp_message, Direction};
use gtplink_common::NodeConfig;

use crate::messages::{DeliveryStatus, InternalEvent, NodeCommand, NodeError, NodeReply};

/// Sequence numbers are 16 bits wide in GTPv1.
const V1_SEQUENCE_MASK: u32 = 0x0000_FFFF;
/// Sequence numbers are 24 bits wide in GTPv2.
const V2_SEQUENCE_MASK: u32 = 0x00FF_FFFF;

/// Collision redraws before a send fails with `SequenceExhausted`.
const SEQUENCE_DRAW_LIMIT: usize = 16;

/// Hook supplying the IEs for a synthesized response message.
///
/// Mandatory-IE content is application knowledge; the default hook
/// supplies none.
pub type ResponseIeFiller = Box<dyn Fn(&'static MessageDescriptor) -> PduIes + Send + Sync>;

/// Caller-side handle to a running node.
///
/// Wraps the command channel with the node's operations. Handles clone
/// cheaply; the node stops when it is told to shut down or when every
/// handle has been dropped.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    tx: mpsc::Sender<NodeCommand>,
}

impl NodeHandle {
    /// Wraps an existing command channel.
    pub fn new(tx: mpsc::Sender<NodeCommand>) -> Self {
        Self { tx }
    }

    /// Queues a message send with the configured timeout and retry
    /// defaults. One [`NodeReply::SendMessageReply`] follows on the
    /// reply channel.
    ///
    /// # Errors
    ///
    /// Returns the command back when the node has stopped.
    pub async fn send_message(
        &self,
        dest: SocketAddr,
        message: impl Into<String>,
        ies: PduIes,
    ) -> Result<(), mpsc::error::SendError<NodeCommand>> {
        self.send_message_with(dest, message, ies, None, None).await
    }

    /// Queues a message send with explicit per-attempt timeout and
    /// retransmission budget.
    pub async fn send_message_with(
        &self,
        dest: SocketAddr,
        message: impl Into<String>,
        ies: PduIes,
        timeout: Option<Duration>,
        retries: Option<u32>,
    ) -> Result<(), mpsc::error::SendError<NodeCommand>> {
        self.tx
            .send(NodeCommand::SendMessage {
                dest,
                message: message.into(),
                ies,
                timeout,
                retries,
            })
            .await
    }

    /// Asks the node to stop; outstanding requests drain as timeout
    /// replies.
    pub async fn shutdown(&self) -> Result<(), mpsc::error::SendError<NodeCommand>> {
        self.tx.send(NodeCommand::Shutdown).await
    }

    /// True once the node has stopped taking commands.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A remote peer. The TEID is assigned locally on first contact and used
/// in every request sent to that peer.
#[derive(Debug)]
struct Destination {
    teid: u32,
}

/// A sent request awaiting its reply.
///
/// `packet` keeps the exact transmitted bytes; retransmissions reuse them
/// unchanged (29.274 §7.6). The timer handle is the armed one-shot retry
/// timer, aborted when the reply arrives.
struct OutstandingMessage {
    dest: SocketAddr,
    packet: Vec<u8>,
    sequence: u32,
    response: &'static MessageDescriptor,
    retries: u32,
    timeout: Duration,
    timer: Option<JoinHandle<()>>,
}

/// The tunnel endpoint task.
///
/// Construct with [`NodeTask::new`], optionally call [`NodeTask::bind`]
/// to learn the bound address, then drive it with [`NodeTask::run`] on
/// its own tokio task; [`NodeTask::spawn`] does the wiring in one step.
/// Every [`NodeCommand::SendMessage`] produces exactly one
/// [`NodeReply::SendMessageReply`] on the reply channel.
pub struct NodeTask {
    config: NodeConfig,
    reply_tx: mpsc::Sender<NodeReply>,
    socket: Option<Arc<UdpSocket>>,
    destinations: HashMap<SocketAddr, Destination>,
    outstanding: HashMap<u32, OutstandingMessage>,
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
    internal_rx: Option<mpsc::UnboundedReceiver<InternalEvent>>,
    rng: Box<dyn RngCore + Send + Sync>,
    fill_response_ies: ResponseIeFiller,
}

fn default_response_ies(desc: &'static MessageDescriptor) -> PduIes {
    match desc.version {
        GtpVersion::V2 => PduIes::V2(Vec::new()),
        _ => PduIes::V1(Vec::new()),
    }
}

impl NodeTask {
    /// Creates a node task. Nothing is bound until [`NodeTask::bind`] or
    /// [`Task::run`].
    pub fn new(config: NodeConfig, reply_tx: mpsc::Sender<NodeReply>) -> Self {
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        Self {
            config,
            reply_tx,
            socket: None,
            destinations: HashMap::new(),
            outstanding: HashMap::new(),
            internal_tx,
            internal_rx: Some(internal_rx),
            rng: Box::new(OsRng),
            fill_response_ies: Box::new(default_response_ies),
        }
    }

    /// Replaces the sequence/TEID random source. Tests use this to seed a
    /// deterministic generator.
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send + Sync>) -> Self {
        self.rng = rng;
        self
    }

    /// Replaces the hook that fills IEs into synthesized responses.
    pub fn with_response_ie_filler(mut self, filler: ResponseIeFiller) -> Self {
        self.fill_response_ies = filler;
        self
    }

    /// Binds the UDP socket and returns the local address. Idempotent;
    /// `run` calls it when it has not happened yet.
    pub async fn bind(&mut self) -> Result<SocketAddr, NodeError> {
        if let Some(socket) = &self.socket {
            return socket.local_addr().map_err(NodeError::Bind);
        }
        let socket = UdpSocket::bind(self.config.bind_addr)
            .await
            .map_err(NodeError::Bind)?;
        let addr = socket.local_addr().map_err(NodeError::Bind)?;
        info!(addr = %addr, "GTP node listening");
        self.socket = Some(Arc::new(socket));
        Ok(addr)
    }

    /// Wires up the channel pair and spawns the node on its own task.
    ///
    /// Returns the command handle, the reply stream and the join handle
    /// of the running task.
    pub fn spawn(config: NodeConfig) -> (NodeHandle, mpsc::Receiver<NodeReply>, JoinHandle<()>) {
        let capacity = config.channel_capacity;
        let (reply_tx, reply_rx) = mpsc::channel(capacity);
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
        let mut task = NodeTask::new(config, reply_tx);
        let join = tokio::spawn(async move { task.run(cmd_rx).await });
        (NodeHandle::new(cmd_tx), reply_rx, join)
    }

    async fn reply(&self, status: DeliveryStatus) {
        if self
            .reply_tx
            .send(NodeReply::SendMessageReply { status })
            .await
            .is_err()
        {
            debug!("caller reply channel closed");
        }
    }

    /// Looks up or creates the destination for `addr` and returns its
    /// locally assigned TEID.
    fn destination_teid(&mut self, addr: SocketAddr) -> u32 {
        if let Some(dest) = self.destinations.get(&addr) {
            return dest.teid;
        }
        // TODO: replace the random placeholder with a real TEID
        // allocator (29.274 §5.5.3) once sessions exist above this layer
        let teid = self.rng.next_u32();
        debug!(addr = %addr, teid = teid, "new destination");
        self.destinations.insert(addr, Destination { teid });
        teid
    }

    /// Draws a sequence number unique among live outstanding entries,
    /// masked to the version's width. Zero is the no-reply sentinel and
    /// counts as a collision.
    fn draw_sequence(&mut self, version: GtpVersion) -> Option<u32> {
        let mask = match version {
            GtpVersion::V2 => V2_SEQUENCE_MASK,
            _ => V1_SEQUENCE_MASK,
        };
        for _ in 0..SEQUENCE_DRAW_LIMIT {
            let seq = self.rng.next_u32() & mask;
            if seq != 0 && !self.outstanding.contains_key(&seq) {
                return Some(seq);
            }
        }
        None
    }

    async fn handle_send(
        &mut self,
        dest: SocketAddr,
        message: String,
        ies: PduIes,
        timeout: Option<Duration>,
        retries: Option<u32>,
    ) {
        let desc = match catalog::message_by_name(&message) {
            Ok(desc) => desc,
            Err(e) => {
                self.reply(DeliveryStatus::Error(NodeError::Encode(e))).await;
                return;
            }
        };

        let teid = self.destination_teid(dest);
        let response = desc.response();
        let mut sequence = 0;
        if response.is_some() {
            sequence = match self.draw_sequence(desc.version) {
                Some(seq) => seq,
                None => {
                    self.reply(DeliveryStatus::Error(NodeError::SequenceExhausted))
                        .await;
                    return;
                }
            };
        }

        let packet = match desc.encode(sequence, teid, ies) {
            Ok(packet) => packet,
            Err(e) => {
                self.reply(DeliveryStatus::Error(NodeError::Encode(e))).await;
                return;
            }
        };

        let retries = retries.unwrap_or(self.config.default_retries);
        if let Some(response) = response {
            self.outstanding.insert(
                sequence,
                OutstandingMessage {
                    dest,
                    packet: packet.clone(),
                    sequence,
                    response,
                    retries,
                    timeout: timeout
                        .unwrap_or(Duration::from_millis(self.config.default_timeout_ms)),
                    timer: None,
                },
            );
        }

        let Some(socket) = self.socket.clone() else {
            error!("send before bind");
            return;
        };
        debug!(msg = desc.name, seq = sequence, dest = %dest, "sending");
        log_gtp_message(Direction::Tx, desc.name, &packet);
        if let Err(e) = socket.send_to(&packet, dest).await {
            self.outstanding.remove(&sequence);
            self.reply(DeliveryStatus::Error(NodeError::Send(e))).await;
            return;
        }

        if sequence != 0 {
            let event = if retries > 0 {
                InternalEvent::SetupRetry { seq: sequence }
            } else {
                InternalEvent::Timeout { seq: sequence }
            };
            let _ = self.internal_tx.send(event);
        } else {
            self.reply(DeliveryStatus::Ok { response: None }).await;
        }
    }

    async fn handle_internal(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::SetupRetry { seq } => {
                let Some(entry) = self.outstanding.get_mut(&seq) else {
                    debug!(seq = seq, "retry setup for a finished message");
                    return;
                };
                let tx = self.internal_tx.clone();
                let timeout = entry.timeout;
                entry.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(timeout).await;
                    let _ = tx.send(InternalEvent::RetryFired { seq });
                }));
            }
            InternalEvent::RetryFired { seq } => {
                // a reply may have raced the timer; the entry being gone
                // means the reply won
                let Some(entry) = self.outstanding.get_mut(&seq) else {
                    debug!(seq = seq, "stale retry timer ignored");
                    return;
                };
                if entry.retries == 0 {
                    let _ = self.internal_tx.send(InternalEvent::Timeout { seq });
                    return;
                }
                entry.retries -= 1;
                let packet = entry.packet.clone();
                let dest = entry.dest;
                debug!(seq = seq, remaining = entry.retries, "retransmitting");
                let Some(socket) = self.socket.clone() else {
                    return;
                };
                if let Err(e) = socket.send_to(&packet, dest).await {
                    self.outstanding.remove(&seq);
                    self.reply(DeliveryStatus::Error(NodeError::Send(e))).await;
                    return;
                }
                let _ = self.internal_tx.send(InternalEvent::SetupRetry { seq });
            }
            InternalEvent::Timeout { seq } => {
                if let Some(entry) = self.outstanding.remove(&seq) {
                    if let Some(timer) = entry.timer {
                        timer.abort();
                    }
                    warn!(seq = entry.sequence, dest = %entry.dest, "message timed out");
                    self.reply(DeliveryStatus::Timeout).await;
                }
            }
        }
    }

    async fn handle_datagram(&mut self, data: &[u8], source: SocketAddr) {
        let pdu = match Pdu::decode(data) {
            Ok(pdu) => pdu,
            Err(e) => {
                warn!(source = %source, error = %e, "dropping undecodable datagram");
                return;
            }
        };
        let msg_name = pdu.descriptor().map_or("Unknown", |desc| desc.name);
        log_gtp_message(Direction::Rx, msg_name, data);

        let sequence = pdu.sequence();
        if sequence == 0 {
            // unsolicited notification; default policy is to discard
            debug!(source = %source, msg_type = pdu.msg_type(), "discarding unsolicited message");
            return;
        }

        // replies match on (sequence, remote address) for our local port
        let matched = match self.outstanding.get(&sequence) {
            Some(entry) if entry.dest == source => self.outstanding.remove(&sequence),
            _ => None,
        };
        if let Some(entry) = matched {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
            if entry.response.id != pdu.msg_type() {
                debug!(
                    seq = sequence,
                    expected = entry.response.id,
                    got = pdu.msg_type(),
                    "reply type differs from the expected triggered message"
                );
            }
            debug!(seq = sequence, source = %source, "reply matched");
            self.reply(DeliveryStatus::Ok {
                response: Some(pdu),
            })
            .await;
            return;
        }

        self.answer_request(pdu, source).await;
    }

    /// Synthesizes and transmits the triggered message for an inbound
    /// request, echoing its sequence number.
    async fn answer_request(&mut self, pdu: Pdu, source: SocketAddr) {
        let Some(desc) = pdu.descriptor() else {
            debug!(msg_type = pdu.msg_type(), source = %source, "unknown message type, dropping");
            return;
        };
        let Some(response) = desc.response() else {
            debug!(msg = desc.name, source = %source, "no triggered message, dropping");
            return;
        };

        let teid = if desc.response_teid_zero { 0 } else { pdu.teid() };
        let ies = (self.fill_response_ies)(response);
        let packet = match response.encode(pdu.sequence(), teid, ies) {
            Ok(packet) => packet,
            Err(e) => {
                error!(msg = response.name, error = %e, "failed to encode response");
                return;
            }
        };

        let Some(socket) = self.socket.clone() else {
            return;
        };
        log_gtp_message(Direction::Tx, response.name, &packet);
        match socket.send_to(&packet, source).await {
            Ok(_) => debug!(msg = response.name, dest = %source, "answered request"),
            Err(e) => error!(msg = response.name, dest = %source, error = %e, "failed to send response"),
        }
    }

    /// Fails every still-armed outstanding entry with a timeout reply.
    async fn drain(&mut self) {
        let entries: Vec<OutstandingMessage> =
            self.outstanding.drain().map(|(_, entry)| entry).collect();
        for entry in entries {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
            debug!(seq = entry.sequence, "draining outstanding message");
            self.reply(DeliveryStatus::Timeout).await;
        }
    }
}

impl NodeTask {
    /// Runs the dispatcher until [`NodeCommand::Shutdown`] arrives or the
    /// command channel closes.
    ///
    /// Binds the socket first when [`NodeTask::bind`] has not been
    /// called. The dispatcher services caller commands, internal timer
    /// events and inbound datagrams from a single select loop, so it is
    /// the only writer of the outstanding and destination maps.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<NodeCommand>) {
        if let Err(e) = self.bind().await {
            error!(error = %e, "node task failed to start");
            return;
        }
        let Some(socket) = self.socket.clone() else {
            return;
        };
        let Some(mut internal_rx) = self.internal_rx.take() else {
            error!("node task already ran");
            return;
        };

        let mut recv_buf = vec![0u8; self.config.recv_buffer_size];
        info!("node task started");

        loop {
            tokio::select! {
                cmd = rx.recv() => {
                    match cmd {
                        Some(NodeCommand::SendMessage {
                            dest,
                            message,
                            ies,
                            timeout,
                            retries,
                        }) => {
                            self.handle_send(dest, message, ies, timeout, retries).await;
                        }
                        Some(NodeCommand::Shutdown) | None => {
                            info!("node task shutting down");
                            break;
                        }
                    }
                }

                Some(event) = internal_rx.recv() => {
                    self.handle_internal(event).await;
                }

                result = socket.recv_from(&mut recv_buf) => {
                    match result {
                        Ok((len, source)) => {
                            self.handle_datagram(&recv_buf[..len], source).await;
                        }
                        Err(e) => {
                            error!(error = %e, "UDP receive error");
                        }
                    }
                }
            }
        }

        self.drain().await;
        self.socket = None;
        info!("node task stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtplink_codec::{V2Pdu, catalog::v2_msg};
    use tokio::time::timeout as with_timeout;

    /// Deterministic stand-in for the CSPRNG: replays a fixed script of
    /// draws, cycling when it runs out.
    struct ScriptedRng {
        values: Vec<u32>,
        index: usize,
    }

    impl ScriptedRng {
        fn new(values: Vec<u32>) -> Self {
            Self { values, index: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_be_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn test_config() -> NodeConfig {
        NodeConfig::new("127.0.0.1:0".parse().unwrap())
    }

    async fn spawn_node(
        config: NodeConfig,
        rng: Option<Box<dyn RngCore + Send + Sync>>,
    ) -> (
        SocketAddr,
        mpsc::Sender<NodeCommand>,
        mpsc::Receiver<NodeReply>,
    ) {
        let (reply_tx, reply_rx) = mpsc::channel(32);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let mut task = NodeTask::new(config, reply_tx);
        if let Some(rng) = rng {
            task = task.with_rng(rng);
        }
        let addr = task.bind().await.expect("bind failed");
        tokio::spawn(async move { task.run(cmd_rx).await });
        (addr, cmd_tx, reply_rx)
    }

    fn echo_command(dest: SocketAddr) -> NodeCommand {
        NodeCommand::SendMessage {
            dest,
            message: "Echo Request".into(),
            ies: PduIes::None,
            timeout: None,
            retries: None,
        }
    }

    async fn collect_datagrams(socket: &UdpSocket, quiet: Duration) -> Vec<Vec<u8>> {
        let mut datagrams = Vec::new();
        let mut buf = [0u8; 2048];
        while let Ok(Ok((len, _))) = with_timeout(quiet, socket.recv_from(&mut buf)).await {
            datagrams.push(buf[..len].to_vec());
        }
        datagrams
    }

    async fn recv_status(rx: &mut mpsc::Receiver<NodeReply>) -> DeliveryStatus {
        let NodeReply::SendMessageReply { status } =
            with_timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("reply deadline")
                .expect("reply channel closed");
        status
    }

    #[tokio::test]
    async fn test_timeout_with_byte_identical_retransmissions() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();
        let (_, cmd_tx, mut reply_rx) = spawn_node(test_config(), None).await;

        cmd_tx.send(echo_command(peer_addr)).await.unwrap();

        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Timeout
        ));

        // original transmission plus the full retry budget, all identical
        let datagrams = collect_datagrams(&peer, Duration::from_millis(200)).await;
        assert_eq!(datagrams.len(), 6);
        assert!(datagrams.windows(2).all(|pair| pair[0] == pair[1]));

        // exactly one reply
        assert!(
            with_timeout(Duration::from_millis(100), reply_rx.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_echo_answered_by_peer_node() {
        // responder node synthesizes the Echo Response
        let (responder_addr, _responder_cmd, _responder_replies) =
            spawn_node(test_config(), None).await;

        let rng = ScriptedRng::new(vec![0x0600_D1E5, 0x00BE_EF01]);
        let (_, cmd_tx, mut reply_rx) = spawn_node(test_config(), Some(Box::new(rng))).await;

        cmd_tx.send(echo_command(responder_addr)).await.unwrap();

        match recv_status(&mut reply_rx).await {
            DeliveryStatus::Ok {
                response: Some(pdu),
            } => {
                assert_eq!(pdu.msg_type(), v2_msg::ECHO_RESPONSE);
                // the reply echoes the request's sequence number
                assert_eq!(pdu.sequence(), 0x00BE_EF01);
                // Echo replies carry TEID 0
                assert_eq!(pdu.teid(), 0);
            }
            other => panic!("expected Ok with response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_v1_echo_answered_by_peer_node() {
        let (responder_addr, _responder_cmd, _responder_replies) =
            spawn_node(test_config(), None).await;

        let rng = ScriptedRng::new(vec![0x0000_0007, 0x00BE_EF01]);
        let (_, cmd_tx, mut reply_rx) = spawn_node(test_config(), Some(Box::new(rng))).await;

        cmd_tx
            .send(NodeCommand::SendMessage {
                dest: responder_addr,
                message: "GTPv1 Echo Request".into(),
                ies: PduIes::None,
                timeout: None,
                retries: None,
            })
            .await
            .unwrap();

        match recv_status(&mut reply_rx).await {
            DeliveryStatus::Ok {
                response: Some(pdu),
            } => {
                assert!(matches!(pdu, Pdu::V1(_)));
                assert_eq!(pdu.msg_type(), 2);
                // v1 sequence numbers are 16 bits
                assert_eq!(pdu.sequence(), 0xEF01);
            }
            other => panic!("expected Ok with response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sequence_collision_redraws() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();

        // teid draw, then the same sequence twice, then a fresh one
        let rng = ScriptedRng::new(vec![0x1, 0x11_1111, 0x11_1111, 0x22_2222]);
        let (_, cmd_tx, mut reply_rx) = spawn_node(test_config(), Some(Box::new(rng))).await;

        for _ in 0..2 {
            cmd_tx
                .send(NodeCommand::SendMessage {
                    dest: peer_addr,
                    message: "Echo Request".into(),
                    ies: PduIes::None,
                    timeout: Some(Duration::from_millis(50)),
                    retries: Some(1),
                })
                .await
                .unwrap();
        }

        let datagrams = collect_datagrams(&peer, Duration::from_millis(40)).await;
        assert!(datagrams.len() >= 2);
        let first = V2Pdu::decode(&datagrams[0]).unwrap();
        let second = V2Pdu::decode(&datagrams[1]).unwrap();
        assert_eq!(first.sequence, 0x11_1111);
        assert_eq!(second.sequence, 0x22_2222);

        // both sends still complete, one reply each
        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Timeout
        ));
        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Timeout
        ));
        assert!(
            with_timeout(Duration::from_millis(100), reply_rx.recv())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_sequence_space_exhaustion() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();

        // every draw returns 7: the second send can never find a free
        // sequence while the first is outstanding
        let rng = ScriptedRng::new(vec![7]);
        let (_, cmd_tx, mut reply_rx) = spawn_node(test_config(), Some(Box::new(rng))).await;

        cmd_tx
            .send(NodeCommand::SendMessage {
                dest: peer_addr,
                message: "Echo Request".into(),
                ies: PduIes::None,
                timeout: Some(Duration::from_millis(500)),
                retries: None,
            })
            .await
            .unwrap();
        cmd_tx.send(echo_command(peer_addr)).await.unwrap();

        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Error(NodeError::SequenceExhausted)
        ));
    }

    #[tokio::test]
    async fn test_unknown_message_name_fails_send() {
        let (handle, mut reply_rx, _join) = NodeTask::spawn(test_config());
        handle
            .send_message(
                "127.0.0.1:9".parse().unwrap(),
                "No Such Message",
                PduIes::None,
            )
            .await
            .unwrap();

        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Error(NodeError::Encode(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_drains_outstanding() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();
        let (handle, mut reply_rx, join) = NodeTask::spawn(test_config());

        handle
            .send_message_with(
                peer_addr,
                "Echo Request",
                PduIes::None,
                Some(Duration::from_secs(30)),
                None,
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.shutdown().await.unwrap();

        // draining turns the still-armed entry into a timeout reply
        assert!(matches!(
            recv_status(&mut reply_rx).await,
            DeliveryStatus::Timeout
        ));

        with_timeout(Duration::from_secs(5), join)
            .await
            .expect("node did not stop")
            .unwrap();
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_bad_datagram_dropped_then_request_answered() {
        let (node_addr, _cmd_tx, _reply_rx) = spawn_node(test_config(), None).await;
        let probe = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        // garbage is dropped without killing the node
        probe.send_to(&[0xFF, 0x00, 0x01], node_addr).await.unwrap();

        // a well-formed Echo Request gets a synthesized Echo Response
        let request = V2Pdu::new(v2_msg::ECHO_REQUEST, 0x42, vec![])
            .encode()
            .unwrap();
        probe.send_to(&request, node_addr).await.unwrap();

        let mut buf = [0u8; 2048];
        let (len, from) = with_timeout(Duration::from_secs(5), probe.recv_from(&mut buf))
            .await
            .expect("no response")
            .unwrap();
        assert_eq!(from, node_addr);
        let response = V2Pdu::decode(&buf[..len]).unwrap();
        assert_eq!(response.msg_type, v2_msg::ECHO_RESPONSE);
        assert_eq!(response.sequence, 0x42);
        assert_eq!(response.teid, None);
    }

    #[tokio::test]
    async fn test_zero_sequence_is_discarded() {
        let (node_addr, _cmd_tx, _reply_rx) = spawn_node(test_config(), None).await;
        let probe = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        // sequence 0 marks an unsolicited notification; default policy
        // is to discard, so nothing comes back
        let unsolicited = V2Pdu::new(v2_msg::ECHO_REQUEST, 0, vec![]).encode().unwrap();
        probe.send_to(&unsolicited, node_addr).await.unwrap();

        let mut buf = [0u8; 2048];
        assert!(
            with_timeout(Duration::from_millis(200), probe.recv_from(&mut buf))
                .await
                .is_err()
        );
    }
}
