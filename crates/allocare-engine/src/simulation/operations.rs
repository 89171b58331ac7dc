//! Transaction operations: transfer, labor tokenization, bidding, shocks

use allocare_common::{
    Bid, BidRecord, LogType, MirrorEvent, Rejection, ShockRecord, SystemLog, TaskStatus,
    TokenizationRecord, Transfer, TransferRecord, CREDITS_PER_LABOR_HOUR, EQUITY_OVERRIDE_THRESHOLD,
    EXTREME_POVERTY_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::Simulation;
use crate::advisor::{self, RedistributionPolicy, Suggestion};
use crate::scoring;
use crate::stabilization::FloorReport;

/// Shock loss as a share of the target's credits
pub const SHOCK_LOSS_RATE: f64 = 0.3;

/// Shock exposure added to the shocked household
pub const SHOCK_RISK_INCREMENT: f64 = 0.1;

/// Result of a labor tokenization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborReceipt {
    pub household_id: String,
    pub hours: f64,
    pub credits_earned: f64,
    pub new_credits: f64,
    pub new_labor_hours: f64,
    pub new_poverty_index: f64,
    /// Crossed out of extreme poverty with this tokenization
    pub exited_extreme_poverty: bool,
}

/// Result of an accepted bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidOutcome {
    pub task_id: String,
    pub household_id: String,
    pub amount: f64,
    pub allocation_score: f64,
    /// Task was allocated immediately to the bidder
    pub equity_override: bool,
}

/// Result of a shock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockReport {
    pub household_id: String,
    pub credit_loss: f64,
    /// Credits after floor correction and any relief transfer
    pub new_credits: f64,
    pub new_shock_risk: f64,
    pub floor_activated: bool,
    /// Relief transfer performed automatically
    pub redistribution: Option<Transfer>,
    /// Advisory transfer logged when automatic redistribution is off
    pub suggestion: Option<Suggestion>,
}

fn reject<T>(operation: &'static str, rejection: Rejection) -> Result<T, Rejection> {
    debug!(operation, %rejection, "Operation rejected");
    Err(rejection)
}

fn validate_amount(amount: f64) -> Result<(), Rejection> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Rejection::InvalidAmount)
    }
}

impl Simulation {
    /// Move credits between two households.
    ///
    /// Rejected when either household is missing, the households are the
    /// same, the amount is not positive, or the sender holds less than `amount`.
    #[instrument(skip(self), level = "debug")]
    pub fn transfer_credits(
        &mut self,
        from_id: &str,
        to_id: &str,
        amount: f64,
        ai_suggested: bool,
    ) -> Result<Transfer, Rejection> {
        if let Err(rejection) = validate_amount(amount) {
            return reject("transfer_credits", rejection);
        }
        if from_id == to_id {
            return reject("transfer_credits", Rejection::SelfTransfer);
        }
        let (from_name, available) = match self.registry.get(from_id) {
            Some(h) => (h.name.clone(), h.credits),
            None => return reject("transfer_credits", Rejection::UnknownHousehold(from_id.into())),
        };
        let to_name = match self.registry.get(to_id) {
            Some(h) => h.name.clone(),
            None => return reject("transfer_credits", Rejection::UnknownHousehold(to_id.into())),
        };
        if available < amount {
            return reject(
                "transfer_credits",
                Rejection::InsufficientCredits {
                    required: amount,
                    available,
                },
            );
        }

        self.registry.move_credits(from_id, to_id, amount);
        let floor = self.apply_floor();
        self.emergency_fund_active = floor.activated;

        let transfer = Transfer::new(from_id, to_id, amount, ai_suggested);
        self.transfers.push(transfer.clone());

        let message = if ai_suggested {
            format!(
                "AI-Suggested: {} -> {}: {} credits transferred (Redistribution prevents cascade poverty)",
                from_name, to_name, amount
            )
        } else {
            format!("{} -> {}: {} credits transferred", from_name, to_name, amount)
        };
        self.emit(MirrorEvent::Transfer(TransferRecord {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            amount,
            ai_suggested,
            from_name,
            to_name,
        }));
        self.emit_households();
        self.log(SystemLog::new(LogType::Transfer, message).for_household(to_id));
        self.log_all(floor.logs);

        info!(from = from_id, to = to_id, amount, ai_suggested, "Credits transferred");
        Ok(transfer)
    }

    /// Convert labor hours into credits at 10 credits per hour
    #[instrument(skip(self), level = "debug")]
    pub fn tokenize_labor(
        &mut self,
        household_id: &str,
        hours: f64,
    ) -> Result<LaborReceipt, Rejection> {
        if let Err(rejection) = validate_amount(hours) {
            return reject("tokenize_labor", rejection);
        }
        let credits_earned = hours * CREDITS_PER_LABOR_HOUR;

        let Some(household) = self.registry.get_mut(household_id) else {
            return reject("tokenize_labor", Rejection::UnknownHousehold(household_id.into()));
        };
        let was_extreme = household.poverty_index > EXTREME_POVERTY_THRESHOLD;
        household.credits += credits_earned;
        household.labor_hours = (household.labor_hours - hours).max(0.0);
        let fresh = scoring::poverty::apply(household);
        let exited = was_extreme && fresh.poverty_index <= EXTREME_POVERTY_THRESHOLD;
        household.exited_poverty_this_cycle = exited;

        let name = household.name.clone();
        let receipt = LaborReceipt {
            household_id: household_id.to_string(),
            hours,
            credits_earned,
            new_credits: household.credits,
            new_labor_hours: household.labor_hours,
            new_poverty_index: fresh.poverty_index,
            exited_extreme_poverty: exited,
        };

        self.log(
            SystemLog::new(
                LogType::Labor,
                format!("{} tokenized {}h labor -> +{} credits", name, hours, credits_earned),
            )
            .for_household(household_id),
        );
        self.emit(MirrorEvent::Tokenization(TokenizationRecord {
            household_id: household_id.to_string(),
            hours,
            credits_earned,
            new_credits: receipt.new_credits,
            new_labor_hours: receipt.new_labor_hours,
            new_poverty_index: fresh.poverty_index,
            new_credit_deficit: fresh.credit_deficit_ratio,
        }));
        if exited {
            self.log(
                SystemLog::new(LogType::Info, format!("{} moved out of extreme poverty!", name))
                    .for_household(household_id),
            );
        }

        let floor = self.apply_floor();
        self.log_all(floor.logs);

        info!(household = household_id, hours, exited, "Labor tokenized");
        Ok(receipt)
    }

    /// Bid credits on an open task.
    ///
    /// A bidder above the equity override threshold receives the task
    /// immediately; otherwise the task stays open.
    #[instrument(skip(self), level = "debug")]
    pub fn submit_bid(
        &mut self,
        task_id: &str,
        household_id: &str,
        amount: f64,
    ) -> Result<BidOutcome, Rejection> {
        if let Err(rejection) = validate_amount(amount) {
            return reject("submit_bid", rejection);
        }
        let Some(index) = self.task_index(task_id) else {
            return reject("submit_bid", Rejection::UnknownTask(task_id.into()));
        };
        if !self.tasks[index].is_open() {
            let status = self.tasks[index].status.to_string();
            return reject(
                "submit_bid",
                Rejection::TaskNotOpen {
                    task_id: task_id.into(),
                    status,
                },
            );
        }
        let Some(household) = self.registry.get(household_id) else {
            return reject("submit_bid", Rejection::UnknownHousehold(household_id.into()));
        };
        if household.credits < amount {
            let available = household.credits;
            return reject(
                "submit_bid",
                Rejection::InsufficientCredits {
                    required: amount,
                    available,
                },
            );
        }

        let poverty_index = household.poverty_index;
        let household_name = household.name.clone();
        let allocation_score =
            scoring::allocation_score(amount, household.centrality_score, poverty_index);
        let equity_override = poverty_index > EQUITY_OVERRIDE_THRESHOLD;

        let task = &mut self.tasks[index];
        task.upsert_bid(Bid::new(household_id, amount, allocation_score));
        if equity_override {
            task.allocate(household_id, true);
        }
        let record = BidRecord {
            task_id: task_id.to_string(),
            household_id: household_id.to_string(),
            amount,
            allocation_score,
            task_title: task.title.clone(),
            base_credit_requirement: task.base_credit_requirement,
            category: task.category.clone(),
            household_name: household_name.clone(),
            equity_override,
        };

        let entry = if equity_override {
            SystemLog::new(
                LogType::EquityOverride,
                format!(
                    "Equity Override Triggered - {} auto-allocated \"{}\" (Poverty Index: {:.2})",
                    household_name, record.task_title, poverty_index
                ),
            )
        } else {
            SystemLog::new(
                LogType::Bid,
                format!(
                    "{} bid {} credits on \"{}\" (Score: {:.2})",
                    household_name, amount, record.task_title, allocation_score
                ),
            )
        };
        self.emit(MirrorEvent::Bid(record));
        self.log(entry.for_household(household_id));

        info!(task = task_id, household = household_id, amount, equity_override, "Bid submitted");
        Ok(BidOutcome {
            task_id: task_id.to_string(),
            household_id: household_id.to_string(),
            amount,
            allocation_score,
            equity_override,
        })
    }

    /// Allocate an open task to a household that has bid on it
    #[instrument(skip(self), level = "debug")]
    pub fn allocate_task(&mut self, task_id: &str, household_id: &str) -> Result<(), Rejection> {
        let Some(index) = self.task_index(task_id) else {
            return reject("allocate_task", Rejection::UnknownTask(task_id.into()));
        };
        let Some(name) = self.registry.get(household_id).map(|h| h.name.clone()) else {
            return reject("allocate_task", Rejection::UnknownHousehold(household_id.into()));
        };
        let task = &mut self.tasks[index];
        if !task.is_open() {
            let status = task.status.to_string();
            return reject(
                "allocate_task",
                Rejection::TaskNotOpen {
                    task_id: task_id.into(),
                    status,
                },
            );
        }
        if task.bid_from(household_id).is_none() {
            return reject(
                "allocate_task",
                Rejection::NoBidFromHousehold {
                    task_id: task_id.into(),
                    household_id: household_id.into(),
                },
            );
        }

        task.allocate(household_id, false);
        let message = format!("\"{}\" allocated to {}", task.title, name);
        self.log(SystemLog::new(LogType::Info, message).for_household(household_id));
        Ok(())
    }

    /// Mark an allocated task as completed
    #[instrument(skip(self), level = "debug")]
    pub fn complete_task(&mut self, task_id: &str) -> Result<(), Rejection> {
        let Some(index) = self.task_index(task_id) else {
            return reject("complete_task", Rejection::UnknownTask(task_id.into()));
        };
        let task = &mut self.tasks[index];
        if task.status != TaskStatus::Allocated {
            return reject("complete_task", Rejection::TaskNotAllocated(task_id.into()));
        }
        let Some(assignee) = task.allocated.clone() else {
            return reject("complete_task", Rejection::TaskNotAllocated(task_id.into()));
        };

        task.status = TaskStatus::Completed;
        let message = format!("\"{}\" completed", task.title);
        self.log(SystemLog::new(LogType::Info, message).for_household(assignee));
        Ok(())
    }

    /// Hit the most shock-exposed vulnerable household with a 30% credit loss
    #[instrument(skip(self), level = "debug")]
    pub fn simulate_shock(&mut self) -> Result<ShockReport, Rejection> {
        let Some(target) = advisor::select_shock_target(self.registry.as_slice()) else {
            return reject("simulate_shock", Rejection::NoShockCandidate);
        };
        let target_id = target.id.clone();
        let target_name = target.name.clone();
        let credit_loss = (target.credits * SHOCK_LOSS_RATE).floor();

        for household in self.registry.as_mut_slice() {
            household.last_shocked = household.id == target_id;
            if household.last_shocked {
                household.credits = (household.credits - credit_loss).max(0.0);
                household.shock_exposure_risk =
                    (household.shock_exposure_risk + SHOCK_RISK_INCREMENT).min(1.0);
            }
        }
        let floor = self.apply_floor();
        let mut floor_activated = floor.activated;

        self.log(
            SystemLog::new(
                LogType::Shock,
                format!(
                    "Economic Shock: {} lost {} credits (30% reduction)",
                    target_name, credit_loss
                ),
            )
            .for_household(target_id.clone()),
        );
        self.log_all(floor.logs);

        if let Some(shocked) = self.registry.get(&target_id) {
            let record = ShockRecord {
                household_id: target_id.clone(),
                credit_loss,
                new_credits: shocked.credits,
                new_shock_risk: shocked.shock_exposure_risk,
                new_poverty_index: shocked.poverty_index,
            };
            self.emit(MirrorEvent::Shock(record));
        }

        let mut redistribution = None;
        let mut suggestion = None;
        if self.ai_redistribution_enabled {
            let relief = advisor::relief_for(
                self.registry.as_slice(),
                &target_id,
                RedistributionPolicy::SHOCK_RELIEF,
            );
            let relief = relief.filter(|s| s.amount > 0.0);
            if let Some((relief, relief_floor)) =
                relief.and_then(|r| self.auto_redistribute(&r).map(|floor| (r, floor)))
            {
                floor_activated |= relief_floor.activated;
                let donor_name = self.name_of(&relief.from_id);
                self.log(
                    SystemLog::new(
                        LogType::Redistribution,
                        format!(
                            "AI Auto-Redistribution: {} -> {}: {} credits to prevent cascade poverty",
                            donor_name, target_name, relief.amount
                        ),
                    )
                    .for_household(target_id.clone()),
                );
                self.log_all(relief_floor.logs);
                redistribution = self.transfers.last().cloned();
            }
        } else if let Some(advice) = self.ai_suggestion() {
            let from = self.name_of(&advice.from_id);
            let to = self.name_of(&advice.to_id);
            self.log(
                SystemLog::new(
                    LogType::Redistribution,
                    format!(
                        "AI Recommends: Transfer {} credits from {} to {} to prevent cascade poverty",
                        advice.amount, from, to
                    ),
                )
                .for_household(advice.to_id.clone()),
            );
            suggestion = Some(advice);
        }

        self.emergency_fund_active = floor_activated;
        self.emit_households();

        let (new_credits, new_shock_risk) = self
            .registry
            .get(&target_id)
            .map(|h| (h.credits, h.shock_exposure_risk))
            .unwrap_or_default();
        info!(household = %target_id, credit_loss, floor_activated, "Shock simulated");
        Ok(ShockReport {
            household_id: target_id,
            credit_loss,
            new_credits,
            new_shock_risk,
            floor_activated,
            redistribution,
            suggestion,
        })
    }

    /// Alias of [`Simulation::simulate_shock`]
    pub fn trigger_shock(&mut self) -> Result<ShockReport, Rejection> {
        self.simulate_shock()
    }

    /// Enable or disable automatic redistribution
    pub fn set_ai_redistribution(&mut self, enabled: bool) {
        self.ai_redistribution_enabled = enabled;
        let message = if enabled {
            "AI Redistribution Engine ENABLED - Automatic cascade prevention active"
        } else {
            "AI Redistribution Engine DISABLED"
        };
        self.log(SystemLog::new(LogType::Info, message));
        info!(enabled, "AI redistribution toggled");
    }

    /// Flip automatic redistribution; returns the new setting
    pub fn toggle_ai_redistribution(&mut self) -> bool {
        let enabled = !self.ai_redistribution_enabled;
        self.set_ai_redistribution(enabled);
        enabled
    }

    /// Add credits to the emergency pool; returns the new balance
    pub fn fund_emergency_pool(&mut self, amount: f64) -> Result<f64, Rejection> {
        if let Err(rejection) = validate_amount(amount) {
            return reject("fund_emergency_pool", rejection);
        }
        self.emergency_fund_balance += amount;
        self.log(SystemLog::new(
            LogType::Stabilization,
            format!("NGO added {} credits to the Emergency Pool", amount),
        ));
        Ok(self.emergency_fund_balance)
    }

    /// Execute an advisor transfer directly: debit donor, credit recipient, floor pass.
    ///
    /// `None` when either household is gone. The floor logs are returned
    /// unappended so the caller can log the redistribution first.
    pub(super) fn auto_redistribute(&mut self, plan: &Suggestion) -> Option<FloorReport> {
        if !self.registry.move_credits(&plan.from_id, &plan.to_id, plan.amount) {
            return None;
        }
        let floor = self.apply_floor();
        let transfer = Transfer::new(plan.from_id.clone(), plan.to_id.clone(), plan.amount, true);
        self.transfers.push(transfer);
        let record = TransferRecord {
            from_id: plan.from_id.clone(),
            to_id: plan.to_id.clone(),
            amount: plan.amount,
            ai_suggested: true,
            from_name: self.name_of(&plan.from_id),
            to_name: self.name_of(&plan.to_id),
        };
        self.emit(MirrorEvent::Transfer(record));
        Some(floor)
    }

    pub(super) fn name_of(&self, id: &str) -> String {
        self.registry
            .get(id)
            .map(|h| h.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
