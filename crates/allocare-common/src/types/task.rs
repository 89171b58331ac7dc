//! Tasks and bids
//!
//! Tasks are allocatable units of community work. Households bid credits on
//! open tasks; each household holds at most one bid per task.

use serde::{Deserialize, Serialize};

/// Task difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Accepting bids
    Open,
    /// Assigned to a household
    Allocated,
    /// Work finished
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::Allocated => write!(f, "allocated"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A household's credit bid on a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub household_id: String,
    pub amount: f64,
    pub allocation_score: f64,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl Bid {
    pub fn new(household_id: impl Into<String>, amount: f64, allocation_score: f64) -> Self {
        Self {
            household_id: household_id.into(),
            amount,
            allocation_score,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Allocatable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub base_credit_requirement: f64,
    /// Expected contribution to community stability (0.0 - 1.0)
    pub stability_impact: f64,
    pub difficulty: Difficulty,
    pub category: String,
    pub bids: Vec<Bid>,
    /// Household the task was allocated to
    pub allocated: Option<String>,
    /// Set when allocation bypassed bidding
    #[serde(default)]
    pub equity_override: bool,
    pub status: TaskStatus,
}

impl Task {
    /// Create an open task with no bids
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        base_credit_requirement: f64,
        stability_impact: f64,
        difficulty: Difficulty,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            base_credit_requirement,
            stability_impact,
            difficulty,
            category: category.into(),
            bids: Vec::new(),
            allocated: None,
            equity_override: false,
            status: TaskStatus::Open,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    /// Current bid from a household, if any
    pub fn bid_from(&self, household_id: &str) -> Option<&Bid> {
        self.bids.iter().find(|b| b.household_id == household_id)
    }

    /// Insert a bid, replacing any earlier bid from the same household.
    ///
    /// The replacement bid moves to the end of the list.
    pub fn upsert_bid(&mut self, bid: Bid) {
        self.bids.retain(|b| b.household_id != bid.household_id);
        self.bids.push(bid);
    }

    /// Move to `Allocated` for a household
    pub fn allocate(&mut self, household_id: impl Into<String>, equity_override: bool) {
        self.status = TaskStatus::Allocated;
        self.allocated = Some(household_id.into());
        self.equity_override = equity_override;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::new("t1", "Water", "Distribute water", 30.0, 0.8, Difficulty::Medium, "Infrastructure")
    }

    #[test]
    fn test_upsert_replaces_same_household() {
        let mut t = task();
        t.upsert_bid(Bid::new("h1", 10.0, 0.3));
        t.upsert_bid(Bid::new("h2", 20.0, 0.4));
        t.upsert_bid(Bid::new("h1", 50.0, 0.5));

        assert_eq!(t.bids.len(), 2);
        assert_eq!(t.bid_from("h1").unwrap().amount, 50.0);
        assert_eq!(t.bids.last().unwrap().household_id, "h1");
    }

    #[test]
    fn test_allocate() {
        let mut t = task();
        assert!(t.is_open());
        t.allocate("h5", true);
        assert_eq!(t.status, TaskStatus::Allocated);
        assert_eq!(t.allocated.as_deref(), Some("h5"));
        assert!(t.equity_override);
        assert!(!t.is_open());
    }
}
