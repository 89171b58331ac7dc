//! Pilot community: seed households, tasks and CECS job templates

use allocare_common::{
    Difficulty, Household, JobCategory, JobTemplate, ProofKind, Task,
};
use rust_decimal_macros::dec;

/// Five households across four sectors
pub fn households() -> Vec<Household> {
    vec![
        Household::new("h1", "Priya Sharma", "Sector-A1")
            .with_credits(45.0)
            .with_labor_hours(12.0)
            .with_risk(0.8, 0.7, 0.75)
            .with_centrality(0.6)
            .with_connections(["h2", "h3"]),
        Household::new("h2", "Rajan Kumar", "Sector-A2")
            .with_credits(120.0)
            .with_labor_hours(5.0)
            .with_risk(0.3, 0.2, 0.25)
            .with_centrality(0.8)
            .with_connections(["h1", "h4", "h5"]),
        Household::new("h3", "Meena Devi", "Sector-B1")
            .with_credits(30.0)
            .with_labor_hours(20.0)
            .with_risk(0.9, 0.85, 0.8)
            .with_centrality(0.4)
            .with_connections(["h1", "h5"]),
        Household::new("h4", "Arjun Patel", "Sector-B2")
            .with_credits(85.0)
            .with_labor_hours(8.0)
            .with_risk(0.5, 0.45, 0.4)
            .with_centrality(0.65)
            .with_connections(["h2", "h5"]),
        Household::new("h5", "Fatima Begum", "Sector-A1")
            .with_credits(15.0)
            .with_labor_hours(25.0)
            .with_risk(0.95, 0.9, 0.85)
            .with_centrality(0.35)
            .with_connections(["h2", "h3", "h4"]),
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task::new(
            "t1",
            "Community Water Distribution",
            "Coordinate water supply logistics for 50 households in the eastern zone.",
            30.0,
            0.8,
            Difficulty::Medium,
            "Infrastructure",
        ),
        Task::new(
            "t2",
            "Mobile Health Camp Support",
            "Assist medical team with patient registration and logistics for 2-day health camp.",
            20.0,
            0.9,
            Difficulty::Low,
            "Healthcare",
        ),
        Task::new(
            "t3",
            "Digital Literacy Workshop",
            "Teach basic smartphone and internet skills to 20 community members.",
            40.0,
            0.7,
            Difficulty::High,
            "Education",
        ),
    ]
}

/// Jobs created for every activated sector
pub const CECS_TEMPLATES: [JobTemplate; 5] = [
    JobTemplate {
        title: "Waste Segregation Drive",
        category: JobCategory::Sanitation,
        description: "Monthly segregation of community waste.",
        credits: 25.0,
        cash_payment: dec!(15),
        coupons: &["GROCERY-5"],
        proof_required: ProofKind::Photo,
    },
    JobTemplate {
        title: "Public Sanitation Cleaning",
        category: JobCategory::Sanitation,
        description: "Cleaning of community common areas.",
        credits: 30.0,
        cash_payment: dec!(20),
        coupons: &["GEN-10"],
        proof_required: ProofKind::Gps,
    },
    JobTemplate {
        title: "Recycling Sorting Initiative",
        category: JobCategory::Environment,
        description: "Sorting recyclable materials for processing.",
        credits: 20.0,
        cash_payment: dec!(10),
        coupons: &["GREEN-5"],
        proof_required: ProofKind::Photo,
    },
    JobTemplate {
        title: "Tree Plantation Program",
        category: JobCategory::Environment,
        description: "Planting and nurturing local saplings.",
        credits: 40.0,
        cash_payment: dec!(25),
        coupons: &["ECO-15"],
        proof_required: ProofKind::Photo,
    },
    JobTemplate {
        title: "Local Survey Assistance",
        category: JobCategory::Social,
        description: "Aiding in household data collection.",
        credits: 15.0,
        cash_payment: dec!(30),
        coupons: &["SOCIAL-5"],
        proof_required: ProofKind::Attendance,
    },
];
