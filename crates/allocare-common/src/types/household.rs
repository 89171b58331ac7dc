//! Household - a node in the community resilience network
//!
//! A household carries:
//! - Financial state (credits, accumulated labor hours)
//! - Four risk factors normalized to [0, 1]
//! - Two derived scores (poverty index, credit deficit ratio) that are always
//!   recomputed from the other fields and never set independently
//! - Undirected network connections to other households

use serde::{Deserialize, Serialize};

use crate::EXTREME_POVERTY_THRESHOLD;

/// Household record owned by the simulation registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    /// Unique household id (e.g. "h1")
    pub id: String,

    /// Display name
    pub name: String,

    /// Cluster label (e.g. "Sector-A1")
    pub sector: String,

    /// Credit balance, real-valued
    pub credits: f64,

    /// Labor hours available for tokenization
    pub labor_hours: f64,

    /// Income volatility (0.0 - 1.0)
    pub income_instability_score: f64,

    /// Share of dependents in the household (0.0 - 1.0)
    pub dependency_ratio: f64,

    /// Exposure to economic shocks (0.0 - 1.0)
    pub shock_exposure_risk: f64,

    /// Network importance, independent of poverty (0.0 - 1.0)
    pub centrality_score: f64,

    /// Derived composite poverty score (0.0 - 1.0)
    pub poverty_index: f64,

    /// Derived shortfall below the survival threshold (0.0 - 1.0)
    pub credit_deficit_ratio: f64,

    /// Ids of connected households
    pub connections: Vec<String>,

    /// True only for the target of the most recent shock
    #[serde(default)]
    pub last_shocked: bool,

    /// True if the household left extreme poverty through labor this cycle
    #[serde(default)]
    pub exited_poverty_this_cycle: bool,
}

impl Household {
    /// Create a household with zeroed financial and risk fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sector: sector.into(),
            credits: 0.0,
            labor_hours: 0.0,
            income_instability_score: 0.0,
            dependency_ratio: 0.0,
            shock_exposure_risk: 0.0,
            centrality_score: 0.0,
            poverty_index: 0.0,
            credit_deficit_ratio: 0.0,
            connections: Vec::new(),
            last_shocked: false,
            exited_poverty_this_cycle: false,
        }
    }

    /// Set credit balance
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    /// Set accumulated labor hours
    pub fn with_labor_hours(mut self, hours: f64) -> Self {
        self.labor_hours = hours;
        self
    }

    /// Set the three poverty risk factors
    pub fn with_risk(
        mut self,
        income_instability: f64,
        dependency_ratio: f64,
        shock_exposure: f64,
    ) -> Self {
        self.income_instability_score = income_instability;
        self.dependency_ratio = dependency_ratio;
        self.shock_exposure_risk = shock_exposure;
        self
    }

    /// Set network centrality
    pub fn with_centrality(mut self, centrality: f64) -> Self {
        self.centrality_score = centrality;
        self
    }

    /// Set network connections
    pub fn with_connections<I, S>(mut self, connections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connections = connections.into_iter().map(Into::into).collect();
        self
    }

    /// Poverty index above the extreme-poverty threshold
    #[inline]
    pub fn is_extreme_poverty(&self) -> bool {
        self.poverty_index > EXTREME_POVERTY_THRESHOLD
    }
}

impl std::fmt::Display for Household {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Household({}, {}, credits={:.0}, poverty={:.2})",
            self.id, self.name, self.credits, self.poverty_index
        )
    }
}
