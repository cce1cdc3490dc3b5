//! Reliable-delivery GTP signalling endpoint
//!
//! A UDP node that sends GTP request PDUs to remote peers, matches
//! replies by sequence number, retransmits unreplied requests up to a
//! bound (TS 29.274 §7.6), answers incoming requests that expect a
//! triggered message, and reports delivery status to its caller over
//! message channels.
//!
//! # Example
//!
//! ```no_run
//! use gtplink_codec::PduIes;
//! use gtplink_common::NodeConfig;
//! use gtplink_node::{NodeReply, NodeTask};
//!
//! # async fn example() {
//! let config = NodeConfig::new("127.0.0.1:2123".parse().unwrap());
//! let (handle, mut replies, _join) = NodeTask::spawn(config);
//!
//! handle
//!     .send_message("10.0.0.1:2123".parse().unwrap(), "Echo Request", PduIes::None)
//!     .await
//!     .unwrap();
//!
//! let NodeReply::SendMessageReply { status } = replies.recv().await.unwrap();
//! println!("delivery: {status:?}");
//! # }
//! ```

pub mod messages;
pub mod task;

pub use messages::{DeliveryStatus, NodeCommand, NodeError, NodeReply};
pub use task::{NodeHandle, NodeTask, ResponseIeFiller};
