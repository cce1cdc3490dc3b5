//! Node message types
//!
//! The endpoint talks to its caller over two channels: commands in,
//! replies out. Every `SendMessage` command produces exactly one
//! `SendMessageReply` carrying the delivery status.

use std::net::SocketAddr;
use std::time::Duration;

use gtplink_codec::{CodecError, Pdu, PduIes};
use thiserror::Error;

/// Commands from the caller to the node.
#[derive(Debug)]
pub enum NodeCommand {
    /// Send a GTP message to a peer; the node handles sequence numbering,
    /// retransmission and reply matching.
    SendMessage {
        /// Remote UDP address
        dest: SocketAddr,
        /// Registry name of the message (e.g. "Echo Request")
        message: String,
        /// IEs to carry; the variant must match the message's version
        ies: PduIes,
        /// Per-attempt timeout override
        timeout: Option<Duration>,
        /// Retransmission budget override
        retries: Option<u32>,
    },
    /// Stop the node: every request still awaiting a reply reports a
    /// timeout and the socket closes.
    Shutdown,
}

/// Replies from the node to the caller.
#[derive(Debug)]
pub enum NodeReply {
    /// Outcome of one `SendMessage` command
    SendMessageReply {
        /// Delivery status
        status: DeliveryStatus,
    },
}

/// Delivery outcome of a sent message.
#[derive(Debug)]
pub enum DeliveryStatus {
    /// Delivered; carries the decoded reply when one was expected
    Ok {
        /// The triggered message, None for messages that expect no reply
        response: Option<Pdu>,
    },
    /// Retransmission budget exhausted without a reply
    Timeout,
    /// Local failure before or during transmission
    Error(NodeError),
}

impl DeliveryStatus {
    /// True for the `Ok` variant.
    pub fn is_ok(&self) -> bool {
        matches!(self, DeliveryStatus::Ok { .. })
    }
}

/// Endpoint failures.
#[derive(Debug, Error)]
pub enum NodeError {
    /// UDP socket could not be bound
    #[error("failed to bind UDP socket: {0}")]
    Bind(std::io::Error),
    /// UDP write failed
    #[error("failed to send datagram: {0}")]
    Send(std::io::Error),
    /// Outgoing message could not be encoded
    #[error("encode failed: {0}")]
    Encode(#[from] CodecError),
    /// Could not draw a free sequence number after bounded retries
    #[error("sequence number space exhausted")]
    SequenceExhausted,
}

/// Events the dispatcher posts to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InternalEvent {
    /// Arm the one-shot retry timer for an outstanding message
    SetupRetry {
        /// Sequence number of the outstanding entry
        seq: u32,
    },
    /// The retry timer fired
    RetryFired {
        /// Sequence number of the outstanding entry
        seq: u32,
    },
    /// The outstanding message is out of retries
    Timeout {
        /// Sequence number of the outstanding entry
        seq: u32,
    },
}
