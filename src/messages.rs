// src/messages.rs
//
// Decoded records for the 23 feed message types. All are plain Copy value
// types sized for the stack; decoding never allocates.
use crate::enums::*;
use crate::types::{
    Locate, MatchNum, MessageType, Mpid, Price, RefNum, Shares, Symbol, Timestamp, Tracking,
};

/// Common prefix of every message: locate, tracking number, and the 48-bit
/// timestamp widened to 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub stock_locate: Locate,
    pub tracking_number: Tracking,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemEvent {
    pub header: MessageHeader,
    pub event_code: EventCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDirectory {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub market_category: MarketCategory,
    pub financial_status: FinancialStatus,
    pub round_lot_size: u32,
    pub round_lots_only: RoundLotsOnly,
    pub issue_classification: IssueClassification,
    pub issue_sub_type: IssueSubType,
    pub authenticity: Authenticity,
    pub short_sale_threshold: ShortSaleThresholdIndicator,
    pub ipo_flag: IpoFlag,
    pub luld_reference_price_tier: LuldReferencePriceTier,
    pub etp_flag: EtpFlag,
    pub etp_leverage_factor: u32,
    pub inverse_indicator: InverseIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockTradingAction {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub trading_state: TradingState,
    pub reserved: u8,
    pub reason: TradingStateReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegShoRestriction {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub action: RegShoAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketParticipantPosition {
    pub header: MessageHeader,
    pub attribution: Mpid,
    pub symbol: Symbol,
    pub primary_market_maker: PrimaryMarketMaker,
    pub market_maker_mode: MarketMakerMode,
    pub participant_state: MarketParticipantState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MwcbDeclineLevel {
    pub header: MessageHeader,
    pub level_1: u64,
    pub level_2: u64,
    pub level_3: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MwcbStatus {
    pub header: MessageHeader,
    pub breached_level: MwcbLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpoQuotingPeriodUpdate {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub quotation_release_time: u32,
    pub release_qualifier: IpoQuotationReleaseQualifier,
    pub ipo_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuldAuctionCollar {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub reference_price: Price,
    pub upper_price: Price,
    pub lower_price: Price,
    pub extension_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationalHalt {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub market_code: MarketCode,
    pub action: OperationalHaltAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOrder {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub side: Side,
    pub shares: Shares,
    pub symbol: Symbol,
    pub price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOrderMpid {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub side: Side,
    pub shares: Shares,
    pub symbol: Symbol,
    pub price: Price,
    pub attribution: Mpid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderExecuted {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub executed_shares: Shares,
    pub match_number: MatchNum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderExecutedWithPrice {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub executed_shares: Shares,
    pub match_number: MatchNum,
    pub printable: Printable,
    pub execution_price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCancel {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub canceled_shares: Shares,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDelete {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReplace {
    pub header: MessageHeader,
    pub original_order_reference_number: RefNum,
    pub new_order_reference_number: RefNum,
    pub shares: Shares,
    pub price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub header: MessageHeader,
    pub order_reference_number: RefNum,
    pub side: Side,
    pub shares: Shares,
    pub symbol: Symbol,
    pub price: Price,
    pub match_number: MatchNum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossTrade {
    pub header: MessageHeader,
    pub shares: u64,
    pub symbol: Symbol,
    pub cross_price: Price,
    pub match_number: MatchNum,
    pub cross_type: CrossType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenTrade {
    pub header: MessageHeader,
    pub match_number: MatchNum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noii {
    pub header: MessageHeader,
    pub paired_shares: u64,
    pub imbalance_shares: u64,
    pub imbalance_direction: ImbalanceDirection,
    pub symbol: Symbol,
    pub far_price: Price,
    pub near_price: Price,
    pub current_reference_price: Price,
    pub cross_type: CrossType,
    pub price_variation_indicator: PriceVariationIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rpii {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub interest_flag: InterestFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectListingPriceDiscovery {
    pub header: MessageHeader,
    pub symbol: Symbol,
    pub open_eligibility: OpenEligibility,
    pub min_allowed_price: Price,
    pub max_allowed_price: Price,
    pub near_execution_price: Price,
    pub near_execution_time: u64,
    pub lower_price_range_collar: Price,
    pub upper_price_range_collar: Price,
}

/// A fully decoded feed message, one variant per wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SystemEvent(SystemEvent),
    StockDirectory(StockDirectory),
    StockTradingAction(StockTradingAction),
    RegShoRestriction(RegShoRestriction),
    MarketParticipantPosition(MarketParticipantPosition),
    MwcbDeclineLevel(MwcbDeclineLevel),
    MwcbStatus(MwcbStatus),
    IpoQuotingPeriodUpdate(IpoQuotingPeriodUpdate),
    LuldAuctionCollar(LuldAuctionCollar),
    OperationalHalt(OperationalHalt),
    AddOrder(AddOrder),
    AddOrderMpid(AddOrderMpid),
    OrderExecuted(OrderExecuted),
    OrderExecutedWithPrice(OrderExecutedWithPrice),
    OrderCancel(OrderCancel),
    OrderDelete(OrderDelete),
    OrderReplace(OrderReplace),
    Trade(Trade),
    CrossTrade(CrossTrade),
    BrokenTrade(BrokenTrade),
    Noii(Noii),
    Rpii(Rpii),
    DirectListingPriceDiscovery(DirectListingPriceDiscovery),
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::SystemEvent(_) => MessageType::SystemEvent,
            Message::StockDirectory(_) => MessageType::StockDirectory,
            Message::StockTradingAction(_) => MessageType::StockTradingAction,
            Message::RegShoRestriction(_) => MessageType::RegShoRestriction,
            Message::MarketParticipantPosition(_) => MessageType::MarketParticipantPosition,
            Message::MwcbDeclineLevel(_) => MessageType::MwcbDeclineLevel,
            Message::MwcbStatus(_) => MessageType::MwcbStatus,
            Message::IpoQuotingPeriodUpdate(_) => MessageType::IpoQuotingPeriodUpdate,
            Message::LuldAuctionCollar(_) => MessageType::LuldAuctionCollar,
            Message::OperationalHalt(_) => MessageType::OperationalHalt,
            Message::AddOrder(_) => MessageType::AddOrder,
            Message::AddOrderMpid(_) => MessageType::AddOrderMpid,
            Message::OrderExecuted(_) => MessageType::OrderExecuted,
            Message::OrderExecutedWithPrice(_) => MessageType::OrderExecutedWithPrice,
            Message::OrderCancel(_) => MessageType::OrderCancel,
            Message::OrderDelete(_) => MessageType::OrderDelete,
            Message::OrderReplace(_) => MessageType::OrderReplace,
            Message::Trade(_) => MessageType::Trade,
            Message::CrossTrade(_) => MessageType::CrossTrade,
            Message::BrokenTrade(_) => MessageType::BrokenTrade,
            Message::Noii(_) => MessageType::Noii,
            Message::Rpii(_) => MessageType::Rpii,
            Message::DirectListingPriceDiscovery(_) => MessageType::DirectListingPriceDiscovery,
        }
    }

    pub fn header(&self) -> &MessageHeader {
        match self {
            Message::SystemEvent(m) => &m.header,
            Message::StockDirectory(m) => &m.header,
            Message::StockTradingAction(m) => &m.header,
            Message::RegShoRestriction(m) => &m.header,
            Message::MarketParticipantPosition(m) => &m.header,
            Message::MwcbDeclineLevel(m) => &m.header,
            Message::MwcbStatus(m) => &m.header,
            Message::IpoQuotingPeriodUpdate(m) => &m.header,
            Message::LuldAuctionCollar(m) => &m.header,
            Message::OperationalHalt(m) => &m.header,
            Message::AddOrder(m) => &m.header,
            Message::AddOrderMpid(m) => &m.header,
            Message::OrderExecuted(m) => &m.header,
            Message::OrderExecutedWithPrice(m) => &m.header,
            Message::OrderCancel(m) => &m.header,
            Message::OrderDelete(m) => &m.header,
            Message::OrderReplace(m) => &m.header,
            Message::Trade(m) => &m.header,
            Message::CrossTrade(m) => &m.header,
            Message::BrokenTrade(m) => &m.header,
            Message::Noii(m) => &m.header,
            Message::Rpii(m) => &m.header,
            Message::DirectListingPriceDiscovery(m) => &m.header,
        }
    }
}
