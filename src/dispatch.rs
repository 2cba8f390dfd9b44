// src/dispatch.rs
//
// Per-datagram fan-out: frame, decode, mutate the book for the seven
// order-lifecycle types, and hand every decoded record to the consumer in
// exact wire order. Decode errors never abort the process; a bad message
// invalidates itself, a bad frame invalidates the rest of the datagram, and
// the length prefix stays authoritative for cursor advance either way.
use crate::codec::decode_message;
use crate::enums::Side;
use crate::framer::{Datagram, PacketHeader};
use crate::market::Market;
use crate::messages::Message;
use crate::metrics;
use crate::types::{DecodeError, Locate, MessageType, Price, RefNum, Shares};
use log::{debug, warn};

/// Receives every successfully decoded message, in wire order. The book has
/// already been updated when an order-lifecycle message arrives here.
pub trait MessageSink {
    fn on_message(&mut self, msg: &Message);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketOutcome {
    pub header: PacketHeader,
    /// Messages decoded and delivered to the sink.
    pub delivered: u16,
    /// Messages lost to per-message decode errors (or to a truncation that
    /// dropped the tail of the datagram).
    pub errors: u16,
}

/// Process one datagram against the market. Fails only when the envelope
/// itself is unreadable; everything past the envelope is handled internally
/// and reported in the outcome.
pub fn process_packet<S: MessageSink>(
    bytes: &[u8],
    market: &mut Market,
    sink: &mut S,
) -> Result<PacketOutcome, DecodeError> {
    let dgram = Datagram::parse(bytes)?;
    let mut outcome = PacketOutcome {
        header: *dgram.header(),
        delivered: 0,
        errors: 0,
    };

    for block in dgram.messages() {
        let (tag, payload) = match block {
            Ok(b) => b,
            Err(err) => {
                // Framing is gone; drop the rest of the datagram.
                warn!("seq={}: {err}", outcome.header.sequence_number);
                metrics::inc_decode_error(err.kind());
                outcome.errors += 1;
                break;
            }
        };

        let Some(msg_type) = MessageType::from_tag(tag) else {
            let err = DecodeError::UnknownMessageType { raw: tag };
            debug!("seq={}: {err}", outcome.header.sequence_number);
            metrics::inc_decode_error(err.kind());
            outcome.errors += 1;
            continue;
        };

        match decode_message(msg_type, payload) {
            Ok(msg) => {
                apply(market, &msg);
                sink.on_message(&msg);
                outcome.delivered += 1;
            }
            Err(err @ DecodeError::ShortRead { .. }) => {
                warn!("seq={}: {err}", outcome.header.sequence_number);
                metrics::inc_decode_error(err.kind());
                outcome.errors += 1;
                break;
            }
            Err(err) => {
                debug!("seq={}: {err}", outcome.header.sequence_number);
                metrics::inc_decode_error(err.kind());
                outcome.errors += 1;
            }
        }
    }

    metrics::inc_decode_msgs(outcome.delivered as u64);
    Ok(outcome)
}

/// Route the seven order-lifecycle messages into the owning book. All other
/// types leave the market untouched. Decode ran to completion before we get
/// here, so a book is never half-mutated by a bad message.
fn apply(market: &mut Market, msg: &Message) {
    match msg {
        Message::AddOrder(m) => {
            add_to_book(market, m.header.stock_locate, m.order_reference_number, m.shares, m.price, m.side)
        }
        Message::AddOrderMpid(m) => {
            add_to_book(market, m.header.stock_locate, m.order_reference_number, m.shares, m.price, m.side)
        }
        Message::OrderExecuted(m) => {
            market
                .get_book(m.header.stock_locate)
                .reduce(m.order_reference_number, m.executed_shares);
        }
        Message::OrderExecutedWithPrice(m) => {
            market
                .get_book(m.header.stock_locate)
                .reduce(m.order_reference_number, m.executed_shares);
        }
        Message::OrderCancel(m) => {
            market
                .get_book(m.header.stock_locate)
                .reduce(m.order_reference_number, m.canceled_shares);
        }
        Message::OrderDelete(m) => {
            market
                .get_book(m.header.stock_locate)
                .remove(m.order_reference_number);
        }
        Message::OrderReplace(m) => {
            market.get_book(m.header.stock_locate).replace(
                m.original_order_reference_number,
                m.new_order_reference_number,
                m.shares,
                m.price,
            );
        }
        _ => {}
    }
}

fn add_to_book(
    market: &mut Market,
    locate: Locate,
    ref_num: RefNum,
    shares: Shares,
    price: Price,
    side: Side,
) {
    if market.get_book(locate).add(ref_num, shares, price, side) {
        debug!("duplicate add for ref {ref_num} on locate {locate}");
        metrics::inc_duplicate_add();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Side;
    use crate::types::MessageType as T;

    struct PacketBuilder {
        buf: Vec<u8>,
        count: u16,
    }

    impl PacketBuilder {
        fn new(seq: u64) -> Self {
            let mut buf = b"SESSION001".to_vec();
            buf.extend_from_slice(&seq.to_be_bytes());
            buf.extend_from_slice(&0u16.to_be_bytes()); // patched in finish()
            Self { buf, count: 0 }
        }

        fn raw_block(mut self, tag: u8, payload: &[u8]) -> Self {
            self.buf.extend_from_slice(&(payload.len() as u16 + 1).to_be_bytes());
            self.buf.push(tag);
            self.buf.extend_from_slice(payload);
            self.count += 1;
            self
        }

        fn block(self, msg_type: T, body: &[u8]) -> Self {
            let mut payload = vec![0, 1, 0, 2, 0, 0, 0, 0, 0, 3]; // locate=1
            payload.extend_from_slice(body);
            self.raw_block(msg_type.tag(), &payload)
        }

        /// Same as `block` but with an explicit locate.
        fn block_at(self, msg_type: T, locate: u16, body: &[u8]) -> Self {
            let mut payload = locate.to_be_bytes().to_vec();
            payload.extend_from_slice(&[0, 2, 0, 0, 0, 0, 0, 3]);
            payload.extend_from_slice(body);
            self.raw_block(msg_type.tag(), &payload)
        }

        fn finish(mut self) -> Vec<u8> {
            let count = self.count.to_be_bytes();
            self.buf[18] = count[0];
            self.buf[19] = count[1];
            self.buf
        }
    }

    fn add_order_body(ref_num: u64, side: u8, shares: u32, price: u32) -> Vec<u8> {
        let mut b = ref_num.to_be_bytes().to_vec();
        b.push(side);
        b.extend_from_slice(&shares.to_be_bytes());
        b.extend_from_slice(b"TEST    ");
        b.extend_from_slice(&price.to_be_bytes());
        b
    }

    #[derive(Default)]
    struct VecSink(Vec<Message>);

    impl MessageSink for VecSink {
        fn on_message(&mut self, msg: &Message) {
            self.0.push(*msg);
        }
    }

    fn run(pkt: &[u8], market: &mut Market) -> (PacketOutcome, Vec<Message>) {
        let mut sink = VecSink::default();
        let outcome = process_packet(pkt, market, &mut sink).unwrap();
        (outcome, sink.0)
    }

    #[test]
    fn every_decoded_message_reaches_the_sink() {
        let pkt = PacketBuilder::new(100)
            .block(T::SystemEvent, b"O")
            .block(T::AddOrder, &add_order_body(10, b'B', 100, 100_000))
            .block(T::OrderDelete, &10u64.to_be_bytes())
            .finish();
        let mut market = Market::new();
        let (outcome, seen) = run(&pkt, &mut market);
        assert_eq!(outcome.header.sequence_number, 100);
        assert_eq!(outcome.header.msg_count, 3);
        assert_eq!(outcome.delivered, 3);
        assert_eq!(outcome.errors, 0);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].message_type(), T::SystemEvent);
        assert_eq!(seen[1].message_type(), T::AddOrder);
        assert_eq!(seen[2].message_type(), T::OrderDelete);
    }

    #[test]
    fn add_then_execute_leaves_remainder() {
        let mut exec_body = 10u64.to_be_bytes().to_vec();
        exec_body.extend_from_slice(&50u32.to_be_bytes());
        exec_body.extend_from_slice(&256u64.to_be_bytes());

        let pkt = PacketBuilder::new(1)
            .block(T::AddOrder, &add_order_body(10, b'B', 100, 100_000))
            .block(T::OrderExecuted, &exec_body)
            .finish();
        let mut market = Market::new();
        run(&pkt, &mut market);

        let order = market.book(1).get(10).copied().unwrap();
        assert_eq!(order.shares, 50);
        assert_eq!(order.price, 100_000);
        assert_eq!(order.side, Side::Buy);
    }

    #[test]
    fn over_cancel_erases_the_order() {
        let mut cancel_body = 10u64.to_be_bytes().to_vec();
        cancel_body.extend_from_slice(&200u32.to_be_bytes());

        let pkt = PacketBuilder::new(1)
            .block(T::AddOrder, &add_order_body(10, b'B', 100, 100_000))
            .block(T::OrderCancel, &cancel_body)
            .finish();
        let mut market = Market::new();
        run(&pkt, &mut market);
        assert!(!market.book(1).contains(10));
    }

    #[test]
    fn replace_preserves_the_resting_side() {
        let mut replace_body = 10u64.to_be_bytes().to_vec();
        replace_body.extend_from_slice(&12u64.to_be_bytes());
        replace_body.extend_from_slice(&50u32.to_be_bytes());
        replace_body.extend_from_slice(&9999u32.to_be_bytes());

        let pkt = PacketBuilder::new(1)
            .block(T::AddOrder, &add_order_body(10, b'S', 100, 100_000))
            .block(T::OrderReplace, &replace_body)
            .finish();
        let mut market = Market::new();
        run(&pkt, &mut market);

        assert!(!market.book(1).contains(10));
        let new_order = market.book(1).get(12).copied().unwrap();
        assert_eq!(new_order.side, Side::Sell);
        assert_eq!(new_order.shares, 50);
        assert_eq!(new_order.price, 9999);
    }

    #[test]
    fn same_ref_on_different_locates_coexist() {
        let pkt = PacketBuilder::new(1)
            .block_at(T::AddOrder, 1, &add_order_body(10, b'B', 100, 1000))
            .block_at(T::AddOrder, 2, &add_order_body(10, b'S', 200, 2000))
            .block_at(T::OrderDelete, 1, &10u64.to_be_bytes())
            .finish();
        let mut market = Market::new();
        run(&pkt, &mut market);

        assert!(!market.book(1).contains(10));
        let survivor = market.book(2).get(10).copied().unwrap();
        assert_eq!(survivor.shares, 200);
        assert_eq!(survivor.side, Side::Sell);
    }

    #[test]
    fn unknown_enum_value_skips_only_that_message() {
        // Trading action with state 'Z' (not in the set), then a good add in
        // the same packet.
        let mut bad_body = b"ZVZZT   ".to_vec();
        bad_body.push(b'Z');
        bad_body.push(0x00);
        bad_body.extend_from_slice(b"T1  ");

        let pkt = PacketBuilder::new(1)
            .block(T::StockTradingAction, &bad_body)
            .block(T::AddOrder, &add_order_body(10, b'B', 100, 100_000))
            .finish();
        let mut market = Market::new();
        let (outcome, seen) = run(&pkt, &mut market);

        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.errors, 1);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message_type(), T::AddOrder);
        assert!(market.book(1).contains(10));
    }

    #[test]
    fn unknown_tag_skips_via_length_prefix() {
        let pkt = PacketBuilder::new(1)
            .raw_block(b'z', &[0u8; 11])
            .block(T::SystemEvent, b"O")
            .finish();
        let mut market = Market::new();
        let (outcome, seen) = run(&pkt, &mut market);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.errors, 1);
        assert_eq!(seen[0].message_type(), T::SystemEvent);
    }

    #[test]
    fn length_mismatch_skips_and_continues() {
        // An AddOrder block with 5 bytes lopped off, then a valid delete.
        let truncated = &add_order_body(10, b'B', 100, 100_000);
        let mut payload = vec![0, 1, 0, 2, 0, 0, 0, 0, 0, 3];
        payload.extend_from_slice(&truncated[..truncated.len() - 5]);

        let pkt = PacketBuilder::new(1)
            .raw_block(T::AddOrder.tag(), &payload)
            .block(T::OrderDelete, &99u64.to_be_bytes())
            .finish();
        let mut market = Market::new();
        let (outcome, _) = run(&pkt, &mut market);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.errors, 1);
        // The bad add never touched the book.
        assert!(market.book(1).is_empty());
    }

    #[test]
    fn truncated_packet_drops_the_tail() {
        let mut pkt = PacketBuilder::new(1)
            .block(T::SystemEvent, b"O")
            .finish();
        // Promise a second message that is not there.
        pkt[19] = 2;
        let mut market = Market::new();
        let (outcome, seen) = run(&pkt, &mut market);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.errors, 1);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn heartbeat_is_valid_and_silent() {
        let pkt = PacketBuilder::new(77).finish();
        let mut market = Market::new();
        let (outcome, seen) = run(&pkt, &mut market);
        assert_eq!(outcome.header.msg_count, 0);
        assert_eq!(outcome.delivered, 0);
        assert_eq!(outcome.errors, 0);
        assert!(seen.is_empty());
    }

    #[test]
    fn runt_envelope_is_rejected() {
        let mut market = Market::new();
        let mut sink = VecSink::default();
        let err = process_packet(&[0u8; 5], &mut market, &mut sink).unwrap_err();
        assert!(matches!(err, DecodeError::ShortRead { .. }));
    }
}
