// src/codec.rs
//
// One decoder per message type. Each consumes the payload positioned
// immediately after the 1-byte type tag (already consumed by the framer):
// the 10-byte header first, then the type-specific fields in wire order.
// Decoders have no side effects and no I/O; a failed decode leaves nothing
// half-applied downstream because dispatch only acts on an Ok record.
use crate::enums::*;
use crate::messages::*;
use crate::reader::BinaryReader;
use crate::types::{DecodeError, MessageType, Mpid, Symbol};

fn read_header(r: &mut BinaryReader<'_>) -> Result<MessageHeader, DecodeError> {
    Ok(MessageHeader {
        stock_locate: r.read_u16_be()?,
        tracking_number: r.read_u16_be()?,
        timestamp: r.read_u48_be()?,
    })
}

fn read_symbol(r: &mut BinaryReader<'_>) -> Result<Symbol, DecodeError> {
    Ok(Symbol(r.read_bytes::<8>()?))
}

fn read_mpid(r: &mut BinaryReader<'_>) -> Result<Mpid, DecodeError> {
    Ok(Mpid(r.read_bytes::<4>()?))
}

/// Decode one framed message. `payload` excludes the type tag; its length
/// must match the fixed wire size of the type or the message is rejected
/// with `LengthMismatch` before any field is read.
pub fn decode_message(msg_type: MessageType, payload: &[u8]) -> Result<Message, DecodeError> {
    let expected = msg_type.wire_len();
    let actual = payload.len() as u16 + 1;
    if actual != expected {
        return Err(DecodeError::LengthMismatch { msg_type, expected, actual });
    }

    use MessageType as T;
    Ok(match msg_type {
        T::SystemEvent => Message::SystemEvent(decode_system_event(payload)?),
        T::StockDirectory => Message::StockDirectory(decode_stock_directory(payload)?),
        T::StockTradingAction => Message::StockTradingAction(decode_stock_trading_action(payload)?),
        T::RegShoRestriction => Message::RegShoRestriction(decode_reg_sho_restriction(payload)?),
        T::MarketParticipantPosition => {
            Message::MarketParticipantPosition(decode_market_participant_position(payload)?)
        }
        T::MwcbDeclineLevel => Message::MwcbDeclineLevel(decode_mwcb_decline_level(payload)?),
        T::MwcbStatus => Message::MwcbStatus(decode_mwcb_status(payload)?),
        T::IpoQuotingPeriodUpdate => {
            Message::IpoQuotingPeriodUpdate(decode_ipo_quoting_period_update(payload)?)
        }
        T::LuldAuctionCollar => Message::LuldAuctionCollar(decode_luld_auction_collar(payload)?),
        T::OperationalHalt => Message::OperationalHalt(decode_operational_halt(payload)?),
        T::AddOrder => Message::AddOrder(decode_add_order(payload)?),
        T::AddOrderMpid => Message::AddOrderMpid(decode_add_order_mpid(payload)?),
        T::OrderExecuted => Message::OrderExecuted(decode_order_executed(payload)?),
        T::OrderExecutedWithPrice => {
            Message::OrderExecutedWithPrice(decode_order_executed_with_price(payload)?)
        }
        T::OrderCancel => Message::OrderCancel(decode_order_cancel(payload)?),
        T::OrderDelete => Message::OrderDelete(decode_order_delete(payload)?),
        T::OrderReplace => Message::OrderReplace(decode_order_replace(payload)?),
        T::Trade => Message::Trade(decode_trade(payload)?),
        T::CrossTrade => Message::CrossTrade(decode_cross_trade(payload)?),
        T::BrokenTrade => Message::BrokenTrade(decode_broken_trade(payload)?),
        T::Noii => Message::Noii(decode_noii(payload)?),
        T::Rpii => Message::Rpii(decode_rpii(payload)?),
        T::DirectListingPriceDiscovery => {
            Message::DirectListingPriceDiscovery(decode_direct_listing_price_discovery(payload)?)
        }
    })
}

pub fn decode_system_event(bytes: &[u8]) -> Result<SystemEvent, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(SystemEvent {
        header: read_header(&mut r)?,
        event_code: EventCode::read(&mut r)?,
    })
}

pub fn decode_stock_directory(bytes: &[u8]) -> Result<StockDirectory, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(StockDirectory {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        market_category: MarketCategory::read(&mut r)?,
        financial_status: FinancialStatus::read(&mut r)?,
        round_lot_size: r.read_u32_be()?,
        round_lots_only: RoundLotsOnly::read(&mut r)?,
        issue_classification: IssueClassification::read(&mut r)?,
        issue_sub_type: IssueSubType::read(&mut r)?,
        authenticity: Authenticity::read(&mut r)?,
        short_sale_threshold: ShortSaleThresholdIndicator::read(&mut r)?,
        ipo_flag: IpoFlag::read(&mut r)?,
        luld_reference_price_tier: LuldReferencePriceTier::read(&mut r)?,
        etp_flag: EtpFlag::read(&mut r)?,
        etp_leverage_factor: r.read_u32_be()?,
        inverse_indicator: InverseIndicator::read(&mut r)?,
    })
}

pub fn decode_stock_trading_action(bytes: &[u8]) -> Result<StockTradingAction, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(StockTradingAction {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        trading_state: TradingState::read(&mut r)?,
        reserved: r.read_u8()?,
        reason: TradingStateReason::read(&mut r)?,
    })
}

pub fn decode_reg_sho_restriction(bytes: &[u8]) -> Result<RegShoRestriction, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(RegShoRestriction {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        action: RegShoAction::read(&mut r)?,
    })
}

pub fn decode_market_participant_position(
    bytes: &[u8],
) -> Result<MarketParticipantPosition, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(MarketParticipantPosition {
        header: read_header(&mut r)?,
        attribution: read_mpid(&mut r)?,
        symbol: read_symbol(&mut r)?,
        primary_market_maker: PrimaryMarketMaker::read(&mut r)?,
        market_maker_mode: MarketMakerMode::read(&mut r)?,
        participant_state: MarketParticipantState::read(&mut r)?,
    })
}

pub fn decode_mwcb_decline_level(bytes: &[u8]) -> Result<MwcbDeclineLevel, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(MwcbDeclineLevel {
        header: read_header(&mut r)?,
        level_1: r.read_u64_be()?,
        level_2: r.read_u64_be()?,
        level_3: r.read_u64_be()?,
    })
}

pub fn decode_mwcb_status(bytes: &[u8]) -> Result<MwcbStatus, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(MwcbStatus {
        header: read_header(&mut r)?,
        breached_level: MwcbLevel::read(&mut r)?,
    })
}

pub fn decode_ipo_quoting_period_update(
    bytes: &[u8],
) -> Result<IpoQuotingPeriodUpdate, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(IpoQuotingPeriodUpdate {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        quotation_release_time: r.read_u32_be()?,
        release_qualifier: IpoQuotationReleaseQualifier::read(&mut r)?,
        ipo_price: r.read_u32_be()?,
    })
}

pub fn decode_luld_auction_collar(bytes: &[u8]) -> Result<LuldAuctionCollar, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(LuldAuctionCollar {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        reference_price: r.read_u32_be()?,
        upper_price: r.read_u32_be()?,
        lower_price: r.read_u32_be()?,
        extension_number: r.read_u32_be()?,
    })
}

pub fn decode_operational_halt(bytes: &[u8]) -> Result<OperationalHalt, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OperationalHalt {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        market_code: MarketCode::read(&mut r)?,
        action: OperationalHaltAction::read(&mut r)?,
    })
}

pub fn decode_add_order(bytes: &[u8]) -> Result<AddOrder, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(AddOrder {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        side: Side::read(&mut r)?,
        shares: r.read_u32_be()?,
        symbol: read_symbol(&mut r)?,
        price: r.read_u32_be()?,
    })
}

pub fn decode_add_order_mpid(bytes: &[u8]) -> Result<AddOrderMpid, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(AddOrderMpid {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        side: Side::read(&mut r)?,
        shares: r.read_u32_be()?,
        symbol: read_symbol(&mut r)?,
        price: r.read_u32_be()?,
        attribution: read_mpid(&mut r)?,
    })
}

pub fn decode_order_executed(bytes: &[u8]) -> Result<OrderExecuted, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OrderExecuted {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        executed_shares: r.read_u32_be()?,
        match_number: r.read_u64_be()?,
    })
}

pub fn decode_order_executed_with_price(
    bytes: &[u8],
) -> Result<OrderExecutedWithPrice, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OrderExecutedWithPrice {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        executed_shares: r.read_u32_be()?,
        match_number: r.read_u64_be()?,
        printable: Printable::read(&mut r)?,
        execution_price: r.read_u32_be()?,
    })
}

pub fn decode_order_cancel(bytes: &[u8]) -> Result<OrderCancel, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OrderCancel {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        canceled_shares: r.read_u32_be()?,
    })
}

pub fn decode_order_delete(bytes: &[u8]) -> Result<OrderDelete, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OrderDelete {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
    })
}

pub fn decode_order_replace(bytes: &[u8]) -> Result<OrderReplace, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(OrderReplace {
        header: read_header(&mut r)?,
        original_order_reference_number: r.read_u64_be()?,
        new_order_reference_number: r.read_u64_be()?,
        shares: r.read_u32_be()?,
        price: r.read_u32_be()?,
    })
}

pub fn decode_trade(bytes: &[u8]) -> Result<Trade, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(Trade {
        header: read_header(&mut r)?,
        order_reference_number: r.read_u64_be()?,
        side: Side::read(&mut r)?,
        shares: r.read_u32_be()?,
        symbol: read_symbol(&mut r)?,
        price: r.read_u32_be()?,
        match_number: r.read_u64_be()?,
    })
}

pub fn decode_cross_trade(bytes: &[u8]) -> Result<CrossTrade, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(CrossTrade {
        header: read_header(&mut r)?,
        shares: r.read_u64_be()?,
        symbol: read_symbol(&mut r)?,
        cross_price: r.read_u32_be()?,
        match_number: r.read_u64_be()?,
        cross_type: CrossType::read(&mut r)?,
    })
}

pub fn decode_broken_trade(bytes: &[u8]) -> Result<BrokenTrade, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(BrokenTrade {
        header: read_header(&mut r)?,
        match_number: r.read_u64_be()?,
    })
}

pub fn decode_noii(bytes: &[u8]) -> Result<Noii, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(Noii {
        header: read_header(&mut r)?,
        paired_shares: r.read_u64_be()?,
        imbalance_shares: r.read_u64_be()?,
        imbalance_direction: ImbalanceDirection::read(&mut r)?,
        symbol: read_symbol(&mut r)?,
        far_price: r.read_u32_be()?,
        near_price: r.read_u32_be()?,
        current_reference_price: r.read_u32_be()?,
        cross_type: CrossType::read(&mut r)?,
        price_variation_indicator: PriceVariationIndicator::read(&mut r)?,
    })
}

pub fn decode_rpii(bytes: &[u8]) -> Result<Rpii, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(Rpii {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        interest_flag: InterestFlag::read(&mut r)?,
    })
}

pub fn decode_direct_listing_price_discovery(
    bytes: &[u8],
) -> Result<DirectListingPriceDiscovery, DecodeError> {
    let mut r = BinaryReader::new(bytes);
    Ok(DirectListingPriceDiscovery {
        header: read_header(&mut r)?,
        symbol: read_symbol(&mut r)?,
        open_eligibility: OpenEligibility::read(&mut r)?,
        min_allowed_price: r.read_u32_be()?,
        max_allowed_price: r.read_u32_be()?,
        near_execution_price: r.read_u32_be()?,
        near_execution_time: r.read_u64_be()?,
        lower_price_range_collar: r.read_u32_be()?,
        upper_price_range_collar: r.read_u32_be()?,
    })
}
