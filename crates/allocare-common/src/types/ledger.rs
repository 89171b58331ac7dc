//! Append-only records: transfers, system log entries, trend points, edges

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credit movement between two households
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
    /// Unix milliseconds
    pub timestamp: i64,
    /// Initiated by the redistribution advisor
    #[serde(default)]
    pub ai_suggested: bool,
}

impl Transfer {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        amount: f64,
        ai_suggested: bool,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            amount,
            timestamp: chrono::Utc::now().timestamp_millis(),
            ai_suggested,
        }
    }
}

/// System log entry category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    EquityOverride,
    Shock,
    Redistribution,
    Labor,
    Bid,
    Transfer,
    Stabilization,
    Info,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::EquityOverride => "equity_override",
            LogType::Shock => "shock",
            LogType::Redistribution => "redistribution",
            LogType::Labor => "labor",
            LogType::Bid => "bid",
            LogType::Transfer => "transfer",
            LogType::Stabilization => "stabilization",
            LogType::Info => "info",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain event visible to operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: Uuid,
    /// Unix milliseconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub message: String,
    pub household_id: Option<String>,
}

impl SystemLog {
    /// Create a log entry not tied to a household
    pub fn new(log_type: LogType, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            log_type,
            message: message.into(),
            household_id: None,
        }
    }

    /// Attach the household the entry refers to
    pub fn for_household(mut self, household_id: impl Into<String>) -> Self {
        self.household_id = Some(household_id.into());
        self
    }
}

/// One aggregate sample per simulation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PovertyTrendPoint {
    pub cycle: u64,
    /// Percentage of households above the high-poverty threshold (0 - 100)
    pub poverty_rate: f64,
    pub extreme_poverty_count: usize,
    pub resilience_score: u32,
    pub avg_poverty_index: f64,
}

/// Undirected dependency edge between two households
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub strength: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_wire_names() {
        let json = serde_json::to_string(&LogType::EquityOverride).unwrap();
        assert_eq!(json, "\"equity_override\"");
        assert_eq!(LogType::Stabilization.to_string(), "stabilization");
    }

    #[test]
    fn test_system_log_serializes_type_field() {
        let log = SystemLog::new(LogType::Shock, "shock hit").for_household("h5");
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["type"], "shock");
        assert_eq!(json["householdId"], "h5");
    }

    #[test]
    fn test_log_ids_are_unique() {
        let a = SystemLog::new(LogType::Info, "a");
        let b = SystemLog::new(LogType::Info, "b");
        assert_ne!(a.id, b.id);
    }
}
