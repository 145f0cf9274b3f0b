use serde::{Deserialize, Serialize};

use super::ledger_errors::LedgerError;

/// Economic classification of a ledger posting.
///
/// The numeric values are load-bearing: they are stored in the
/// `profit_details.profit_code` column and match the legacy code set used by
/// the plan's year-end paperwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfitCode {
    /// Annual contribution, incoming forfeitures and regular earnings.
    IncomingContribution = 0,
    /// Partial withdrawal paid out to the participant.
    OutgoingPartialWithdrawal = 1,
    /// Non-vested balance forfeited on termination.
    OutgoingForfeiture = 3,
    /// Direct payment / rollover out of the plan.
    OutgoingDirectPayment = 5,
    /// Incoming QDRO beneficiary allocation.
    IncomingQdroBeneficiary = 6,
    /// Balance transferred to a beneficiary account.
    OutgoingXferBeneficiary = 7,
    /// 100%-vested earnings posted by the year-end allocation engine.
    Incoming100PercentVestedEarnings = 8,
    /// Payment drawn from the 100%-vested amount (ETVA).
    Outgoing100PercentVestedPayment = 9,
}

impl ProfitCode {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn from_i16(value: i16) -> Result<Self, LedgerError> {
        match value {
            0 => Ok(ProfitCode::IncomingContribution),
            1 => Ok(ProfitCode::OutgoingPartialWithdrawal),
            3 => Ok(ProfitCode::OutgoingForfeiture),
            5 => Ok(ProfitCode::OutgoingDirectPayment),
            6 => Ok(ProfitCode::IncomingQdroBeneficiary),
            7 => Ok(ProfitCode::OutgoingXferBeneficiary),
            8 => Ok(ProfitCode::Incoming100PercentVestedEarnings),
            9 => Ok(ProfitCode::Outgoing100PercentVestedPayment),
            other => Err(LedgerError::UnknownCode {
                kind: "profit_code",
                value: other,
            }),
        }
    }
}

/// Human-readable provenance tag carried on every posting. Together with the
/// profit code it identifies which rows the reversal engine may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentType {
    OneHundredPercentEarnings = 1,
    Military = 2,
    VestingOnly = 3,
    Reversal = 4,
    ManualAdjustment = 5,
}

impl CommentType {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn from_i16(value: i16) -> Result<Self, LedgerError> {
        match value {
            1 => Ok(CommentType::OneHundredPercentEarnings),
            2 => Ok(CommentType::Military),
            3 => Ok(CommentType::VestingOnly),
            4 => Ok(CommentType::Reversal),
            5 => Ok(CommentType::ManualAdjustment),
            other => Err(LedgerError::UnknownCode {
                kind: "comment_type",
                value: other,
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommentType::OneHundredPercentEarnings => "100% Earnings",
            CommentType::Military => "Military",
            CommentType::VestingOnly => "V-Only",
            CommentType::Reversal => "Reversal",
            CommentType::ManualAdjustment => "Manual Adjustment",
        }
    }
}

/// Secondary posting-batch marker inherited from the legacy ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YearIteration {
    Standard = 0,
    Military = 1,
    ClassAction = 2,
    Administrative = 3,
}

impl YearIteration {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn from_i16(value: i16) -> Result<Self, LedgerError> {
        match value {
            0 => Ok(YearIteration::Standard),
            1 => Ok(YearIteration::Military),
            2 => Ok(YearIteration::ClassAction),
            3 => Ok(YearIteration::Administrative),
            other => Err(LedgerError::UnknownCode {
                kind: "year_iteration",
                value: other,
            }),
        }
    }
}

/// The complete set of (profit code, comment type) pairs the reversal engine
/// is allowed to remove. Everything the allocation engine and the military
/// poster write is listed here; nothing else ever is.
pub const ENGINE_REVERSIBLE_TAGS: [(ProfitCode, CommentType); 2] = [
    (
        ProfitCode::Incoming100PercentVestedEarnings,
        CommentType::OneHundredPercentEarnings,
    ),
    (ProfitCode::IncomingContribution, CommentType::Military),
];

/// Whether a posting with this tag pair was created by an engine posting path
/// and may be removed by `Revert`.
pub fn is_engine_reversible(profit_code: ProfitCode, comment_type: CommentType) -> bool {
    ENGINE_REVERSIBLE_TAGS
        .iter()
        .any(|&(code, comment)| code == profit_code && comment == comment_type)
}
