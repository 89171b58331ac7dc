//! Persistence mirror contract
//!
//! Every simulation operation emits zero or more [`MirrorEvent`]s into an
//! outbox. A background worker forwards them to an external store on a
//! best-effort basis. Records carry upsert keys (household, task ids) so a
//! replayed event converges to the same stored state.

use serde::{Deserialize, Serialize};

use super::household::Household;
use super::ledger::{LogType, PovertyTrendPoint, SystemLog};

/// Stored snapshot of a household (replace-or-create by id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSnapshot {
    pub id: String,
    pub name: String,
    pub credits: f64,
    pub poverty_index: f64,
    pub labor_hours: f64,
    pub centrality_score: f64,
    pub shock_exposure_risk: f64,
    pub credit_deficit_ratio: f64,
}

impl From<&Household> for HouseholdSnapshot {
    fn from(h: &Household) -> Self {
        Self {
            id: h.id.clone(),
            name: h.name.clone(),
            credits: h.credits,
            poverty_index: h.poverty_index,
            labor_hours: h.labor_hours,
            centrality_score: h.centrality_score,
            shock_exposure_risk: h.shock_exposure_risk,
            credit_deficit_ratio: h.credit_deficit_ratio,
        }
    }
}

/// Bid with the task/household metadata needed to upsert stubs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    pub task_id: String,
    pub household_id: String,
    pub amount: f64,
    pub allocation_score: f64,
    pub task_title: String,
    pub base_credit_requirement: f64,
    pub category: String,
    pub household_name: String,
    pub equity_override: bool,
}

/// Transfer with names for household stub upserts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
    pub ai_suggested: bool,
    pub from_name: String,
    pub to_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub message: String,
    pub household_id: Option<String>,
}

impl From<&SystemLog> for LogRecord {
    fn from(log: &SystemLog) -> Self {
        Self {
            log_type: log.log_type,
            message: log.message.clone(),
            household_id: log.household_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockRecord {
    pub household_id: String,
    pub credit_loss: f64,
    pub new_credits: f64,
    pub new_shock_risk: f64,
    pub new_poverty_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizationRecord {
    pub household_id: String,
    pub hours: f64,
    pub credits_earned: f64,
    pub new_credits: f64,
    pub new_labor_hours: f64,
    pub new_poverty_index: f64,
    pub new_credit_deficit: f64,
}

/// One-way persistence call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum MirrorEvent {
    Households(Vec<HouseholdSnapshot>),
    Bid(BidRecord),
    Transfer(TransferRecord),
    Log(LogRecord),
    TrendPoint(PovertyTrendPoint),
    Shock(ShockRecord),
    Tokenization(TokenizationRecord),
}

impl MirrorEvent {
    /// Snapshot a household population
    pub fn households<'a, I>(households: I) -> Self
    where
        I: IntoIterator<Item = &'a Household>,
    {
        MirrorEvent::Households(households.into_iter().map(HouseholdSnapshot::from).collect())
    }

    /// Short label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            MirrorEvent::Households(_) => "households",
            MirrorEvent::Bid(_) => "bid",
            MirrorEvent::Transfer(_) => "transfer",
            MirrorEvent::Log(_) => "log",
            MirrorEvent::TrendPoint(_) => "trend_point",
            MirrorEvent::Shock(_) => "shock",
            MirrorEvent::Tokenization(_) => "tokenization",
        }
    }
}
