// src/framer.rs
//
// MoldUDP64 session framing: a 20-byte envelope followed by msg_count
// length-prefixed message blocks. The framer borrows the datagram and yields
// (tag, payload) pairs lazily; sequence-number handling belongs to the
// caller, which reads it off the header.
use crate::reader::BinaryReader;
use crate::types::{DecodeError, Session};

pub const ENVELOPE_LEN: usize = 20;

/// Envelope fields: 10-byte session, u64 BE sequence number of the first
/// message block, u16 BE block count. A count of zero is a heartbeat (or
/// end-of-session) and carries no blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub session: Session,
    pub sequence_number: u64,
    pub msg_count: u16,
}

/// One parsed datagram: envelope plus the raw block region.
#[derive(Debug)]
pub struct Datagram<'a> {
    header: PacketHeader,
    blocks: &'a [u8],
}

impl<'a> Datagram<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut r = BinaryReader::new(bytes);
        let session = Session(r.read_bytes::<10>()?);
        let sequence_number = r.read_u64_be()?;
        let msg_count = r.read_u16_be()?;
        Ok(Self {
            header: PacketHeader { session, sequence_number, msg_count },
            blocks: &bytes[ENVELOPE_LEN..],
        })
    }

    #[inline]
    pub fn header(&self) -> &PacketHeader {
        &self.header
    }

    /// Iterate the message blocks: at most `msg_count` items, each the raw
    /// type tag plus the payload after it. Stops with `TruncatedPacket` if
    /// the datagram runs out before the envelope's count is satisfied; the
    /// length prefix includes the 1-byte tag, so a prefix of zero is equally
    /// malformed.
    pub fn messages(&self) -> MessageBlocks<'a> {
        MessageBlocks {
            buf: self.blocks,
            pos: 0,
            yielded: 0,
            count: self.header.msg_count,
            poisoned: false,
        }
    }
}

pub struct MessageBlocks<'a> {
    buf: &'a [u8],
    pos: usize,
    yielded: u16,
    count: u16,
    poisoned: bool,
}

impl<'a> Iterator for MessageBlocks<'a> {
    type Item = Result<(u8, &'a [u8]), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned || self.yielded == self.count {
            return None;
        }
        let remaining = self.buf.len() - self.pos;
        if remaining < 2 {
            self.poisoned = true;
            return Some(Err(DecodeError::TruncatedPacket { after: self.yielded }));
        }
        let msg_len = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]) as usize;
        if msg_len < 1 || remaining < 2 + msg_len {
            self.poisoned = true;
            return Some(Err(DecodeError::TruncatedPacket { after: self.yielded }));
        }
        let tag = self.buf[self.pos + 2];
        let payload = &self.buf[self.pos + 3..self.pos + 2 + msg_len];
        self.pos += 2 + msg_len;
        self.yielded += 1;
        Some(Ok((tag, payload)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.poisoned {
            (0, Some(0))
        } else {
            (0, Some((self.count - self.yielded) as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(session: &[u8; 10], seq: u64, count: u16) -> Vec<u8> {
        let mut v = session.to_vec();
        v.extend_from_slice(&seq.to_be_bytes());
        v.extend_from_slice(&count.to_be_bytes());
        v
    }

    fn push_block(v: &mut Vec<u8>, tag: u8, payload: &[u8]) {
        v.extend_from_slice(&(payload.len() as u16 + 1).to_be_bytes());
        v.push(tag);
        v.extend_from_slice(payload);
    }

    #[test]
    fn heartbeat_yields_nothing() {
        let pkt = envelope(b"SESSION001", 42, 0);
        let d = Datagram::parse(&pkt).unwrap();
        assert_eq!(d.header().session.trimmed(), "SESSION001");
        assert_eq!(d.header().sequence_number, 42);
        assert_eq!(d.header().msg_count, 0);
        assert_eq!(d.messages().count(), 0);
    }

    #[test]
    fn runt_envelope_is_a_short_read() {
        let err = Datagram::parse(&[0u8; 12]).unwrap_err();
        assert_eq!(err, DecodeError::ShortRead { needed: 8, remaining: 2 });
    }

    #[test]
    fn yields_tag_and_payload_in_order() {
        let mut pkt = envelope(b"SESSION001", 7, 2);
        push_block(&mut pkt, b'S', b"payload-a");
        push_block(&mut pkt, b'A', b"pay-b");
        let d = Datagram::parse(&pkt).unwrap();
        let blocks: Vec<_> = d.messages().map(|b| b.unwrap()).collect();
        assert_eq!(blocks, vec![(b'S', &b"payload-a"[..]), (b'A', &b"pay-b"[..])]);
    }

    #[test]
    fn stops_at_msg_count_even_with_trailing_bytes() {
        let mut pkt = envelope(b"SESSION001", 7, 1);
        push_block(&mut pkt, b'S', b"x");
        pkt.extend_from_slice(b"garbage trailing bytes");
        let d = Datagram::parse(&pkt).unwrap();
        assert_eq!(d.messages().count(), 1);
    }

    #[test]
    fn truncated_packet_reports_progress() {
        // Envelope claims 3 blocks, datagram carries 1 complete and half of
        // the second.
        let mut pkt = envelope(b"SESSION001", 9, 3);
        push_block(&mut pkt, b'S', b"ok");
        pkt.extend_from_slice(&10u16.to_be_bytes());
        pkt.push(b'A'); // 1 of the promised 10 bytes
        let d = Datagram::parse(&pkt).unwrap();
        let results: Vec<_> = d.messages().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(DecodeError::TruncatedPacket { after: 1 }));
    }

    #[test]
    fn zero_length_prefix_is_malformed() {
        let mut pkt = envelope(b"SESSION001", 9, 1);
        pkt.extend_from_slice(&0u16.to_be_bytes());
        let d = Datagram::parse(&pkt).unwrap();
        let results: Vec<_> = d.messages().collect();
        assert_eq!(results, vec![Err(DecodeError::TruncatedPacket { after: 0 })]);
    }
}
