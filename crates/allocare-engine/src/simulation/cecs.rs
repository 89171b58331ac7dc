//! CECS job lifecycle: Pending -> Active -> Verified -> Completed

use allocare_common::{CecsJob, JobStatus, LogType, Rejection, SystemLog};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::Simulation;
use crate::scoring;
use crate::seed::CECS_TEMPLATES;

/// Rewards released by a verified job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayout {
    pub job_id: Uuid,
    pub household_id: String,
    pub credits: f64,
    pub cash_payment: Decimal,
    pub coupons: Vec<String>,
}

impl Simulation {
    /// Create one active job per template for a sector
    #[instrument(skip(self), level = "debug")]
    pub fn activate_program(&mut self, sector: &str) -> Vec<Uuid> {
        let jobs: Vec<CecsJob> = CECS_TEMPLATES
            .iter()
            .map(|t| {
                let mut job = CecsJob::from_template(t, sector);
                job.activate();
                job
            })
            .collect();
        let ids = jobs.iter().map(|j| j.id).collect();
        self.cecs_jobs.extend(jobs);

        self.log(SystemLog::new(
            LogType::Info,
            format!(
                "AI flagged {} as critical. NGO activated Community Engagement Program (CECS) with {} jobs.",
                sector,
                CECS_TEMPLATES.len()
            ),
        ));
        info!(sector, jobs = CECS_TEMPLATES.len(), "CECS program activated");
        ids
    }

    pub fn cecs_job(&self, job_id: Uuid) -> Option<&CecsJob> {
        self.cecs_jobs.iter().find(|j| j.id == job_id)
    }

    /// Worker submission of proof for an active job
    #[instrument(skip(self, proof), level = "debug")]
    pub fn submit_job_proof(
        &mut self,
        job_id: Uuid,
        household_id: &str,
        proof: impl Into<String>,
    ) -> Result<(), Rejection> {
        let Some(name) = self.registry.get(household_id).map(|h| h.name.clone()) else {
            debug!(%job_id, household = household_id, "Proof from unknown household");
            return Err(Rejection::UnknownHousehold(household_id.into()));
        };
        let Some(job) = self.cecs_jobs.iter_mut().find(|j| j.id == job_id) else {
            debug!(%job_id, "Proof for unknown job");
            return Err(Rejection::UnknownJob(job_id.to_string()));
        };
        if job.status != JobStatus::Active {
            debug!(%job_id, status = %job.status, "Proof for inactive job");
            return Err(Rejection::JobNotActive(job_id.to_string()));
        }

        job.submit(household_id, proof);
        let message = format!("{} submitted proof for \"{}\".", name, job.title);
        self.log(SystemLog::new(LogType::Info, message).for_household(household_id));
        Ok(())
    }

    /// Reviewer verification: pays credits to the assignee and completes the job
    #[instrument(skip(self), level = "debug")]
    pub fn verify_job(&mut self, job_id: Uuid) -> Result<JobPayout, Rejection> {
        let Some(index) = self.cecs_jobs.iter().position(|j| j.id == job_id) else {
            debug!(%job_id, "Verification of unknown job");
            return Err(Rejection::UnknownJob(job_id.to_string()));
        };
        let job = &self.cecs_jobs[index];
        let assignee = match (&job.assigned_to, job.status) {
            (Some(assignee), JobStatus::Verified) => assignee.clone(),
            _ => {
                debug!(%job_id, status = %job.status, "Verification without submission");
                return Err(Rejection::JobNotVerified(job_id.to_string()));
            }
        };
        let Some(household) = self.registry.get_mut(&assignee) else {
            return Err(Rejection::UnknownHousehold(assignee));
        };

        household.credits += job.credits;
        scoring::poverty::apply(household);
        let name = household.name.clone();

        let job = &mut self.cecs_jobs[index];
        job.status = JobStatus::Completed;
        let payout = JobPayout {
            job_id,
            household_id: assignee.clone(),
            credits: job.credits,
            cash_payment: job.cash_payment,
            coupons: job.coupons.clone(),
        };
        let message = format!(
            "Job \"{}\" verified for {}. Payout: {} Credits + Rs {} Cash.",
            job.title, name, payout.credits, payout.cash_payment
        );
        self.cash_disbursed += payout.cash_payment;

        self.emit_households();
        self.log(SystemLog::new(LogType::Stabilization, message).for_household(assignee));
        info!(
            %job_id,
            household = %payout.household_id,
            credits = payout.credits,
            "CECS job verified"
        );
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::seeded;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_activate_program_creates_active_jobs() {
        let mut sim = seeded();
        let ids = sim.activate_program("Sector-B1");
        assert_eq!(ids.len(), 5);
        assert!(sim
            .cecs_jobs()
            .iter()
            .all(|j| j.status == JobStatus::Active && j.sector == "Sector-B1"));
    }

    #[test]
    fn test_job_lifecycle_pays_assignee() {
        let mut sim = seeded();
        let ids = sim.activate_program("Sector-A1");
        // Tree Plantation Program
        let job_id = ids[3];
        let credits_before = sim.household("h5").unwrap().credits;

        sim.submit_job_proof(job_id, "h5", "photo://saplings.jpg").unwrap();
        assert_eq!(sim.cecs_job(job_id).unwrap().status, JobStatus::Verified);

        let payout = sim.verify_job(job_id).unwrap();
        assert_eq!(payout.credits, 40.0);
        assert_eq!(payout.cash_payment, dec!(25));
        assert_eq!(payout.coupons, vec!["ECO-15".to_string()]);
        assert_eq!(sim.household("h5").unwrap().credits, credits_before + 40.0);
        assert_eq!(sim.cecs_job(job_id).unwrap().status, JobStatus::Completed);
        assert_eq!(sim.cash_disbursed(), dec!(25));

        let h5 = sim.household("h5").unwrap();
        assert_eq!(scoring::score(h5).poverty_index, h5.poverty_index);
    }

    #[test]
    fn test_job_rejections() {
        let mut sim = seeded();
        let ids = sim.activate_program("Sector-A2");
        let job_id = ids[0];

        assert_eq!(
            sim.verify_job(job_id).unwrap_err(),
            Rejection::JobNotVerified(job_id.to_string())
        );
        assert!(matches!(
            sim.submit_job_proof(job_id, "ghost", "p"),
            Err(Rejection::UnknownHousehold(_))
        ));
        assert!(matches!(
            sim.submit_job_proof(Uuid::now_v7(), "h1", "p"),
            Err(Rejection::UnknownJob(_))
        ));

        sim.submit_job_proof(job_id, "h1", "gps://12.9,77.6").unwrap();
        assert_eq!(
            sim.submit_job_proof(job_id, "h2", "p").unwrap_err(),
            Rejection::JobNotActive(job_id.to_string())
        );
        sim.verify_job(job_id).unwrap();
        assert!(matches!(
            sim.verify_job(job_id),
            Err(Rejection::JobNotVerified(_))
        ));
    }
}
