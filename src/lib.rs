// src/lib.rs
//! Feed handler for NASDAQ TotalView-ITCH 5.0 over MoldUDP64 multicast.
//!
//! The hot path is `dispatch::process_packet`: it frames one datagram,
//! decodes each of the 23 message types with zero copies of the payload,
//! applies the seven order-lifecycle messages to a locate-indexed
//! [`market::Market`], and hands every decoded record to the caller's
//! [`dispatch::MessageSink`] in exact wire order. Socket setup, config,
//! and metrics live around it; gap *recovery* is an upstream concern.

/// Per-security order table keyed by reference number
pub mod book;
/// One decoder per message type plus the type-dispatching entry point
pub mod codec;
/// TOML application configuration
pub mod config;
/// Per-datagram fan-out: framer -> codec -> book / consumer
pub mod dispatch;
/// Closed-set coded enums, including the packed-ASCII-key ones
pub mod enums;
/// MoldUDP64 envelope and message-block iteration
pub mod framer;
/// Flat locate-indexed table of books
pub mod market;
/// Decoded message records
pub mod messages;
/// Prometheus counters and the scrape endpoint
pub mod metrics;
/// Multicast socket construction
pub mod net;
/// Borrowing big-endian cursor
pub mod reader;
/// Primitive semantic types, message tags, and the error taxonomy
pub mod types;
/// Small shared helpers
pub mod util;

pub use crate::book::{Book, Order};
pub use crate::dispatch::{process_packet, MessageSink, PacketOutcome};
pub use crate::framer::{Datagram, PacketHeader};
pub use crate::market::Market;
pub use crate::messages::{Message, MessageHeader};
pub use crate::reader::BinaryReader;
pub use crate::types::{DecodeError, MessageType};
