//! CECS - Community Engagement program jobs
//!
//! Jobs are created in batches when a sector is activated and move through
//! `Pending -> Active -> Verified -> Completed`. Completion pays `credits` to the
//! assigned household; `cash_payment` and coupons are disbursed off-ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobCategory {
    Environment,
    Sanitation,
    Social,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Active,
    Verified,
    Completed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Active => write!(f, "active"),
            JobStatus::Verified => write!(f, "verified"),
            JobStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Evidence a worker must submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofKind {
    Photo,
    Gps,
    Attendance,
}

/// Static description of a job offered on sector activation
#[derive(Debug, Clone, PartialEq)]
pub struct JobTemplate {
    pub title: &'static str,
    pub category: JobCategory,
    pub description: &'static str,
    pub credits: f64,
    pub cash_payment: Decimal,
    pub coupons: &'static [&'static str],
    pub proof_required: ProofKind,
}

/// Community engagement job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CecsJob {
    pub id: Uuid,
    pub title: String,
    pub category: JobCategory,
    pub description: String,
    /// Credits paid to the assignee on verification
    pub credits: f64,
    /// Cash component (rupees)
    pub cash_payment: Decimal,
    /// Voucher codes
    pub coupons: Vec<String>,
    pub sector: String,
    pub status: JobStatus,
    pub proof_required: Option<ProofKind>,
    pub assigned_to: Option<String>,
    pub submission_proof: Option<String>,
}

impl CecsJob {
    /// Instantiate a pending job for a sector
    pub fn from_template(template: &JobTemplate, sector: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: template.title.to_string(),
            category: template.category,
            description: template.description.to_string(),
            credits: template.credits,
            cash_payment: template.cash_payment,
            coupons: template.coupons.iter().map(|c| c.to_string()).collect(),
            sector: sector.into(),
            status: JobStatus::Pending,
            proof_required: Some(template.proof_required),
            assigned_to: None,
            submission_proof: None,
        }
    }

    /// Open the job to submissions (`Pending -> Active`)
    pub fn activate(&mut self) {
        self.status = JobStatus::Active;
    }

    /// Record a worker submission (`Active -> Verified`)
    pub fn submit(&mut self, household_id: impl Into<String>, proof: impl Into<String>) {
        self.status = JobStatus::Verified;
        self.assigned_to = Some(household_id.into());
        self.submission_proof = Some(proof.into());
    }
}
