// src/types.rs
use std::fmt;

/// Venue-assigned 16-bit security identifier, 1..65535. Locate 0 is never
/// sent and its book slot stays inert.
pub type Locate = u16;
/// Opaque 16-bit event tracking number.
pub type Tracking = u16;
/// Nanoseconds since midnight Eastern, 6 bytes on the wire, widened to 64.
pub type Timestamp = u64;
/// Unique 64-bit identifier of a resting order.
pub type RefNum = u64;
/// Unique 64-bit identifier of an execution event.
pub type MatchNum = u64;
/// Share count in lots.
pub type Shares = u32;
/// Fixed-point price with 4 implied decimals (1.2345 on the wire is 12345).
pub type Price = u32;

/// 8-byte right-space-padded ASCII security symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub [u8; 8]);

/// 4-byte ASCII market participant identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mpid(pub [u8; 4]);

/// 10-byte ASCII identifier of the outer framing session.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session(pub [u8; 10]);

macro_rules! ascii_field {
    ($name:ident) => {
        impl $name {
            /// Raw wire bytes, padding included.
            #[inline]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// The field without trailing space padding. Non-ASCII bytes are
            /// passed through on the wire but render as an empty string here.
            pub fn trimmed(&self) -> &str {
                std::str::from_utf8(&self.0)
                    .unwrap_or("")
                    .trim_end_matches(' ')
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.trimmed())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.trimmed())
            }
        }

        impl From<&[u8; $name::WIDTH]> for $name {
            fn from(bytes: &[u8; $name::WIDTH]) -> Self {
                Self(*bytes)
            }
        }
    };
}

impl Symbol {
    pub const WIDTH: usize = 8;
}
impl Mpid {
    pub const WIDTH: usize = 4;
}
impl Session {
    pub const WIDTH: usize = 10;
}

ascii_field!(Symbol);
ascii_field!(Mpid);
ascii_field!(Session);

/// The 23 message type tags of the feed. Tags are case-sensitive single
/// ASCII bytes; 'h' (Operational Halt) is distinct from 'H' (Trading Action).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    SystemEvent = b'S',
    StockDirectory = b'R',
    StockTradingAction = b'H',
    RegShoRestriction = b'Y',
    MarketParticipantPosition = b'L',
    MwcbDeclineLevel = b'V',
    MwcbStatus = b'W',
    IpoQuotingPeriodUpdate = b'K',
    LuldAuctionCollar = b'J',
    OperationalHalt = b'h',
    AddOrder = b'A',
    AddOrderMpid = b'F',
    OrderExecuted = b'E',
    OrderExecutedWithPrice = b'C',
    OrderCancel = b'X',
    OrderDelete = b'D',
    OrderReplace = b'U',
    Trade = b'P',
    CrossTrade = b'Q',
    BrokenTrade = b'B',
    Noii = b'I',
    Rpii = b'N',
    DirectListingPriceDiscovery = b'O',
}

impl MessageType {
    pub fn from_tag(raw: u8) -> Option<Self> {
        use MessageType::*;
        Some(match raw {
            b'S' => SystemEvent,
            b'R' => StockDirectory,
            b'H' => StockTradingAction,
            b'Y' => RegShoRestriction,
            b'L' => MarketParticipantPosition,
            b'V' => MwcbDeclineLevel,
            b'W' => MwcbStatus,
            b'K' => IpoQuotingPeriodUpdate,
            b'J' => LuldAuctionCollar,
            b'h' => OperationalHalt,
            b'A' => AddOrder,
            b'F' => AddOrderMpid,
            b'E' => OrderExecuted,
            b'C' => OrderExecutedWithPrice,
            b'X' => OrderCancel,
            b'D' => OrderDelete,
            b'U' => OrderReplace,
            b'P' => Trade,
            b'Q' => CrossTrade,
            b'B' => BrokenTrade,
            b'I' => Noii,
            b'N' => Rpii,
            b'O' => DirectListingPriceDiscovery,
            _ => return None,
        })
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Fixed on-wire message length for this type, 1-byte type tag included.
    /// This is the value the session framer's length prefix must carry.
    pub const fn wire_len(self) -> u16 {
        use MessageType::*;
        match self {
            SystemEvent => 12,
            StockDirectory => 39,
            StockTradingAction => 25,
            RegShoRestriction => 20,
            MarketParticipantPosition => 26,
            MwcbDeclineLevel => 35,
            MwcbStatus => 12,
            IpoQuotingPeriodUpdate => 28,
            LuldAuctionCollar => 35,
            OperationalHalt => 21,
            AddOrder => 36,
            AddOrderMpid => 40,
            OrderExecuted => 31,
            OrderExecutedWithPrice => 36,
            OrderCancel => 23,
            OrderDelete => 19,
            OrderReplace => 35,
            Trade => 44,
            CrossTrade => 40,
            BrokenTrade => 19,
            Noii => 50,
            Rpii => 20,
            DirectListingPriceDiscovery => 48,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}')", self, self.tag() as char)
    }
}

/// Everything that can go wrong while framing or decoding feed bytes.
/// None of these are fatal to the process; the dispatcher decides how much
/// of the current datagram each one invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A read ran past the end of its slice. The surrounding framing can no
    /// longer be trusted, so the rest of the datagram is dropped.
    #[error("short read: needed {needed} bytes, {remaining} remaining")]
    ShortRead { needed: usize, remaining: usize },

    /// The framer's length prefix disagrees with the fixed size of the
    /// message type. The message is skipped using the prefix.
    #[error("length mismatch for {msg_type}: expected {expected}, got {actual}")]
    LengthMismatch {
        msg_type: MessageType,
        expected: u16,
        actual: u16,
    },

    /// Type tag outside the 23-element set. Skipped using the length prefix.
    #[error("unknown message type tag 0x{raw:02x}")]
    UnknownMessageType { raw: u8 },

    /// A coded field held a byte (or packed key) outside its closed set.
    /// The message is discarded; the next one decodes normally.
    #[error("unknown value 0x{raw:x} for {field}")]
    UnknownEnumValue { field: &'static str, raw: u32 },

    /// The envelope promised more messages than the datagram holds.
    #[error("packet truncated after {after} messages")]
    TruncatedPacket { after: u16 },
}

impl DecodeError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::ShortRead { .. } => "short_read",
            DecodeError::LengthMismatch { .. } => "length_mismatch",
            DecodeError::UnknownMessageType { .. } => "unknown_message_type",
            DecodeError::UnknownEnumValue { .. } => "unknown_enum_value",
            DecodeError::TruncatedPacket { .. } => "truncated_packet",
        }
    }
}
