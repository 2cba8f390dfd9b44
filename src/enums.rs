// src/enums.rs
//
// Closed-set coded enums of the feed. Any on-wire value outside a set is a
// decode error, never a fallback variant. Two enums (IssueSubType,
// TradingStateReason) use packed multi-byte ASCII keys: the key is the wire
// bytes read as a little-endian integer, so lookup stays a dense integer
// switch and pack2(b'A', b'I') equals the wire bytes "AI".
use crate::reader::BinaryReader;
use crate::types::DecodeError;

pub const fn pack2(c1: u8, c2: u8) -> u16 {
    c1 as u16 | (c2 as u16) << 8
}

pub const fn pack4(c1: u8, c2: u8, c3: u8, c4: u8) -> u32 {
    c1 as u32 | (c2 as u32) << 8 | (c3 as u32) << 16 | (c4 as u32) << 24
}

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident($field:literal, $raw:ty, $read:ident) {
        $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Wire field name, used in decode errors.
            pub const FIELD: &'static str = $field;

            pub fn from_raw(raw: $raw) -> Option<Self> {
                $(if raw == $value {
                    return Some(Self::$variant);
                })+
                None
            }

            #[inline]
            pub fn raw(self) -> $raw {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub(crate) fn read(r: &mut BinaryReader<'_>) -> Result<Self, DecodeError> {
                let raw = r.$read()?;
                Self::from_raw(raw).ok_or(DecodeError::UnknownEnumValue {
                    field: Self::FIELD,
                    raw: raw as u32,
                })
            }
        }
    };
}

coded_enum! {
    /// Resting side of an order. Preserved across replaces.
    Side("side", u8, read_u8) {
        Buy = b'B',
        Sell = b'S',
    }
}

coded_enum! {
    /// Which single-price auction a cross event belongs to.
    CrossType("cross_type", u8, read_u8) {
        Opening = b'O',
        Closing = b'C',
        IpoHalt = b'H',
        ExtendedTradingClose = b'A',
    }
}

coded_enum! {
    EventCode("event_code", u8, read_u8) {
        StartOfMessages = b'O',
        StartOfSystemHours = b'S',
        StartOfMarketHours = b'Q',
        EndOfMarketHours = b'M',
        EndOfSystemHours = b'E',
        EndOfMessages = b'C',
    }
}

coded_enum! {
    MarketCategory("market_category", u8, read_u8) {
        NasdaqGlobalSelect = b'Q',
        NasdaqGlobalMarket = b'G',
        NasdaqCapitalMarket = b'S',
        Nyse = b'N',
        NyseAmerican = b'A',
        NyseArca = b'P',
        Bats = b'Z',
        Iex = b'V',
        NotAvailable = b' ',
    }
}

coded_enum! {
    FinancialStatus("financial_status", u8, read_u8) {
        Deficient = b'D',
        Delinquent = b'E',
        Bankrupt = b'Q',
        Suspended = b'S',
        DeficientAndBankrupt = b'G',
        DeficientAndDelinquent = b'H',
        DeficientDelinquentAndBankrupt = b'K',
        CreationsSuspended = b'C',
        Normal = b'N',
    }
}

coded_enum! {
    IssueClassification("issue_classification", u8, read_u8) {
        AmericanDepositaryShare = b'A',
        Bond = b'B',
        CommonStock = b'C',
        DepositoryReceipt = b'F',
        Rule144A = b'I',
        LimitedPartnership = b'L',
        Notes = b'N',
        OrdinaryShare = b'O',
        PreferredStock = b'P',
        OtherSecurities = b'Q',
        Right = b'R',
        SharesOfBeneficialInterest = b'S',
        ConvertibleDebenture = b'T',
        Unit = b'U',
        UnitsBeneficialInterest = b'V',
        Warrant = b'W',
    }
}

coded_enum! {
    /// Two right-space-padded ASCII bytes, keyed little-endian.
    IssueSubType("issue_sub_type", u16, read_u16_le) {
        PreferredTrustSecurities = pack2(b'A', b' '),
        IndexBasedDerivative = pack2(b'B', b' '),
        CommonShares = pack2(b'C', b' '),
        GlobalDepositaryShares = pack2(b'D', b' '),
        EtfPortfolioDepositaryReceipt = pack2(b'E', b' '),
        Holdrs = pack2(b'F', b' '),
        GlobalShares = pack2(b'G', b' '),
        EtfIndexFundShares = pack2(b'I', b' '),
        CorporateBackedTrustSecurity = pack2(b'J', b' '),
        ContingentLitigationRight = pack2(b'L', b' '),
        EquityBasedDerivative = pack2(b'M', b' '),
        NyRegistryShares = pack2(b'N', b' '),
        OpenEndMutualFund = pack2(b'O', b' '),
        PrivatelyHeldSecurity = pack2(b'P', b' '),
        ClosedEndFund = pack2(b'Q', b' '),
        RegS = pack2(b'R', b' '),
        Seed = pack2(b'S', b' '),
        TrackingStock = pack2(b'T', b' '),
        Portal = pack2(b'U', b' '),
        ContingentValueRight = pack2(b'V', b' '),
        TrustIssuedReceipts = pack2(b'W', b' '),
        Trust = pack2(b'X', b' '),
        Other = pack2(b'Y', b' '),
        NotApplicable = pack2(b'Z', b' '),
        AlphaIndexEtn = pack2(b'A', b'I'),
        CommodityBasedTrustShares = pack2(b'C', b'B'),
        CommodityFuturesTrustShares = pack2(b'C', b'F'),
        CommodityLinkedSecurities = pack2(b'C', b'L'),
        CommodityIndexTrustShares = pack2(b'C', b'M'),
        CollateralizedMortgageObligation = pack2(b'C', b'O'),
        CurrencyTrustShares = pack2(b'C', b'T'),
        CommodityCurrencyLinkedSecurities = pack2(b'C', b'U'),
        CurrencyWarrants = pack2(b'C', b'W'),
        EquityGoldShares = pack2(b'E', b'G'),
        EtnEquityIndexLinked = pack2(b'E', b'I'),
        NextShares = pack2(b'E', b'M'),
        ExchangeTradedNotes = pack2(b'E', b'N'),
        EquityUnits = pack2(b'E', b'U'),
        EtnFixedIncomeLinked = pack2(b'F', b'I'),
        EtnFuturesLinked = pack2(b'F', b'L'),
        InterestRate = pack2(b'I', b'R'),
        IndexWarrant = pack2(b'I', b'W'),
        IndexLinkedExchangeableNotes = pack2(b'I', b'X'),
        LimitedLiabilityCompany = pack2(b'L', b'L'),
        ManagedFundShares = pack2(b'M', b'F'),
        EtnMultiFactorIndexLinked = pack2(b'M', b'L'),
        ManagedTrustSecurities = pack2(b'M', b'T'),
        PoisonPill = pack2(b'P', b'P'),
        PartnershipUnits = pack2(b'P', b'U'),
        CommodityRedeemableCommodityLinked = pack2(b'R', b'C'),
        EtnRedeemableFuturesLinked = pack2(b'R', b'F'),
        Reit = pack2(b'R', b'T'),
        CommodityRedeemableCurrencyLinked = pack2(b'R', b'U'),
        SpotRateClosing = pack2(b'S', b'C'),
        SpotRateIntraday = pack2(b'S', b'I'),
        TrustCertificates = pack2(b'T', b'C'),
        TrustUnits = pack2(b'T', b'U'),
        WorldCurrencyOption = pack2(b'W', b'C'),
    }
}

coded_enum! {
    Authenticity("authenticity", u8, read_u8) {
        Production = b'P',
        Test = b'T',
    }
}

coded_enum! {
    ShortSaleThresholdIndicator("short_sale_threshold", u8, read_u8) {
        Restricted = b'Y',
        NotRestricted = b'N',
        NotAvailable = b' ',
    }
}

coded_enum! {
    IpoFlag("ipo_flag", u8, read_u8) {
        IsNewIpo = b'Y',
        NotNewIpo = b'N',
        NotAvailable = b' ',
    }
}

coded_enum! {
    LuldReferencePriceTier("luld_reference_price_tier", u8, read_u8) {
        Tier1 = b'1',
        Tier2 = b'2',
        NotAvailable = b' ',
    }
}

coded_enum! {
    EtpFlag("etp_flag", u8, read_u8) {
        IsEtp = b'Y',
        NotEtp = b'N',
        NotAvailable = b' ',
    }
}

coded_enum! {
    InverseIndicator("inverse_indicator", u8, read_u8) {
        IsInverse = b'Y',
        NotInverse = b'N',
    }
}

coded_enum! {
    RoundLotsOnly("round_lots_only", u8, read_u8) {
        Yes = b'Y',
        No = b'N',
    }
}

coded_enum! {
    /// Per-security trading state published by the venue.
    TradingState("trading_state", u8, read_u8) {
        Halted = b'H',
        Paused = b'P',
        QuotationOnly = b'Q',
        Trading = b'T',
    }
}

coded_enum! {
    /// Four right-space-padded ASCII bytes, keyed little-endian.
    TradingStateReason("trading_state_reason", u32, read_u32_le) {
        HaltNewsPending = pack4(b'T', b'1', b' ', b' '),
        HaltNewsDisseminated = pack4(b'T', b'2', b' ', b' '),
        PauseSingleSecurity = pack4(b'T', b'5', b' ', b' '),
        HaltRegulatory = pack4(b'T', b'6', b' ', b' '),
        HaltEtf = pack4(b'T', b'8', b' ', b' '),
        HaltTrading = pack4(b'T', b'1', b'2', b' '),
        HaltNonCompliance = pack4(b'H', b'4', b' ', b' '),
        HaltFilingsNotCurrent = pack4(b'H', b'9', b' ', b' '),
        HaltSecSuspension = pack4(b'H', b'1', b'0', b' '),
        HaltRegulatoryConcern = pack4(b'H', b'1', b'1', b' '),
        HaltOperational = pack4(b'O', b'1', b' ', b' '),
        PauseLuld = pack4(b'L', b'U', b'D', b'P'),
        HaltMwcbLevel1 = pack4(b'M', b'W', b'C', b'1'),
        HaltMwcbLevel2 = pack4(b'M', b'W', b'C', b'2'),
        HaltMwcbLevel3 = pack4(b'M', b'W', b'C', b'3'),
        HaltMwcbCarryover = pack4(b'M', b'W', b'C', b'0'),
        IpoNotYetTrading = pack4(b'I', b'P', b'O', b'1'),
        QuoteCorporateAction = pack4(b'M', b'1', b' ', b' '),
        QuoteNotAvailable = pack4(b'M', b'2', b' ', b' '),
        ResumeNewsAndTime = pack4(b'T', b'3', b' ', b' '),
        QuoteOnlyPause = pack4(b'T', b'7', b' ', b' '),
        ResumeQualificationsReviewed = pack4(b'R', b'4', b' ', b' '),
        ResumeFilingsSatisfied = pack4(b'R', b'9', b' ', b' '),
        ResumeNewsNotForthcoming = pack4(b'C', b'3', b' ', b' '),
        ResumeQualificationsEnded = pack4(b'C', b'4', b' ', b' '),
        ResumeQualificationsAndFilings = pack4(b'C', b'9', b' ', b' '),
        ResumeOtherRegulator = pack4(b'C', b'1', b'1', b' '),
        ResumeMwcb = pack4(b'M', b'W', b'C', b'Q'),
        ReleaseNewIssue = pack4(b'R', b'1', b' ', b' '),
        ReleaseIssue = pack4(b'R', b'2', b' ', b' '),
        ReleaseIpoQuotation = pack4(b'I', b'P', b'O', b'Q'),
        ExtendIpoPositioning = pack4(b'I', b'P', b'O', b'E'),
        ReasonNotAvailable = pack4(b' ', b' ', b' ', b' '),
    }
}

coded_enum! {
    RegShoAction("reg_sho_action", u8, read_u8) {
        NoRestriction = b'0',
        RestrictedDueToIntradayDrop = b'1',
        RestrictedRemainsInEffect = b'2',
    }
}

coded_enum! {
    PrimaryMarketMaker("primary_market_maker", u8, read_u8) {
        Yes = b'Y',
        No = b'N',
    }
}

coded_enum! {
    MarketMakerMode("market_maker_mode", u8, read_u8) {
        Normal = b'N',
        Passive = b'P',
        Syndicate = b'S',
        PreSyndicate = b'R',
        Penalty = b'L',
    }
}

coded_enum! {
    MarketParticipantState("participant_state", u8, read_u8) {
        Active = b'A',
        Excused = b'E',
        Withdrawn = b'W',
        Suspended = b'S',
        Deleted = b'D',
    }
}

coded_enum! {
    MwcbLevel("breached_level", u8, read_u8) {
        Level1 = b'1',
        Level2 = b'2',
        Level3 = b'3',
    }
}

coded_enum! {
    IpoQuotationReleaseQualifier("release_qualifier", u8, read_u8) {
        Anticipated = b'A',
        CanceledOrPostponed = b'C',
    }
}

coded_enum! {
    MarketCode("market_code", u8, read_u8) {
        Nasdaq = b'Q',
        Bx = b'B',
        Psx = b'X',
    }
}

coded_enum! {
    OperationalHaltAction("operational_halt_action", u8, read_u8) {
        Halted = b'H',
        Resumed = b'T',
    }
}

coded_enum! {
    Printable("printable", u8, read_u8) {
        Yes = b'Y',
        No = b'N',
    }
}

coded_enum! {
    ImbalanceDirection("imbalance_direction", u8, read_u8) {
        BuyImbalance = b'B',
        SellImbalance = b'S',
        NoImbalance = b'N',
        InsufficientOrders = b'O',
        Paused = b'P',
    }
}

coded_enum! {
    PriceVariationIndicator("price_variation_indicator", u8, read_u8) {
        LessThan1Percent = b'L',
        From1To2Percent = b'1',
        From2To3Percent = b'2',
        From3To4Percent = b'3',
        From4To5Percent = b'4',
        From5To6Percent = b'5',
        From6To7Percent = b'6',
        From7To8Percent = b'7',
        From8To9Percent = b'8',
        From9To10Percent = b'9',
        From10To20Percent = b'A',
        From20To30Percent = b'B',
        GreaterThan30Percent = b'C',
        CannotCalculate = b' ',
    }
}

coded_enum! {
    InterestFlag("interest_flag", u8, read_u8) {
        BuySide = b'B',
        SellSide = b'S',
        BothSides = b'A',
        NoRpiOrders = b'N',
    }
}

coded_enum! {
    OpenEligibility("open_eligibility", u8, read_u8) {
        Eligible = b'Y',
        NotEligible = b'N',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_round_trips() {
        assert_eq!(Side::from_raw(b'B'), Some(Side::Buy));
        assert_eq!(Side::from_raw(b'S'), Some(Side::Sell));
        assert_eq!(Side::from_raw(b'X'), None);
        assert_eq!(Side::Buy.raw(), b'B');
    }

    #[test]
    fn unknown_value_names_the_field() {
        let buf = [b'Z'];
        let mut r = BinaryReader::new(&buf);
        assert_eq!(
            TradingState::read(&mut r),
            Err(DecodeError::UnknownEnumValue { field: "trading_state", raw: b'Z' as u32 })
        );
    }

    #[test]
    fn packed_keys_equal_wire_bytes_read_le() {
        assert_eq!(pack2(b'A', b'I'), u16::from_le_bytes(*b"AI"));
        assert_eq!(pack4(b'L', b'U', b'D', b'P'), u32::from_le_bytes(*b"LUDP"));
        assert_eq!(pack4(b'T', b'1', b' ', b' '), u32::from_le_bytes(*b"T1  "));

        let mut r = BinaryReader::new(b"AI");
        assert_eq!(IssueSubType::read(&mut r).unwrap(), IssueSubType::AlphaIndexEtn);

        let mut r = BinaryReader::new(b"LUDP");
        assert_eq!(
            TradingStateReason::read(&mut r).unwrap(),
            TradingStateReason::PauseLuld
        );
    }

    #[test]
    fn single_char_packed_keys_are_space_padded() {
        let mut r = BinaryReader::new(b"C ");
        assert_eq!(IssueSubType::read(&mut r).unwrap(), IssueSubType::CommonShares);

        let mut r = BinaryReader::new(b"IPO1");
        assert_eq!(
            TradingStateReason::read(&mut r).unwrap(),
            TradingStateReason::IpoNotYetTrading
        );

        let mut r = BinaryReader::new(b"    ");
        assert_eq!(
            TradingStateReason::read(&mut r).unwrap(),
            TradingStateReason::ReasonNotAvailable
        );
    }

    #[test]
    fn packed_key_outside_set_is_an_error() {
        let mut r = BinaryReader::new(b"ZQ");
        assert_eq!(
            IssueSubType::read(&mut r),
            Err(DecodeError::UnknownEnumValue {
                field: "issue_sub_type",
                raw: u16::from_le_bytes(*b"ZQ") as u32,
            })
        );
    }

    #[test]
    fn price_variation_buckets_round_trip() {
        for raw in [b'L', b'1', b'5', b'9', b'A', b'C', b' '] {
            let v = PriceVariationIndicator::from_raw(raw).unwrap();
            assert_eq!(v.raw(), raw);
        }
        assert_eq!(PriceVariationIndicator::from_raw(b'D'), None);
    }
}
