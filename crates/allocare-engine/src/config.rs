//! Engine configuration

use std::time::Duration;

use allocare_common::Result;
use allocare_mirror::MirrorConfig;
use serde::{Deserialize, Serialize};

/// Simulation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the cycle drift RNG; entropy when absent
    pub rng_seed: Option<u64>,
    /// Start with automatic redistribution on
    pub ai_redistribution_enabled: bool,
    /// Initial emergency pool balance (credits)
    pub emergency_fund_balance: f64,
    /// System log entries kept in memory
    pub log_capacity: usize,
    /// Transfers kept in memory
    pub transfer_capacity: usize,
    /// Trend points kept in memory
    pub trend_capacity: usize,
    /// Keep cycling after the pilot until interrupted
    pub auto_cycle: bool,
    /// Auto-cycle tick interval in milliseconds
    pub auto_cycle_interval_ms: u64,
    /// Persistence mirror settings
    pub mirror: MirrorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            ai_redistribution_enabled: false,
            emergency_fund_balance: 50_000.0,
            log_capacity: 100,
            transfer_capacity: 50,
            trend_capacity: 20,
            auto_cycle: false,
            auto_cycle_interval_ms: 3000,
            mirror: MirrorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::load_from(|key| std::env::var(key).ok()))
    }

    /// Apply `ALLOCARE_*` overrides from a lookup; unparsable values keep the default
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup("ALLOCARE_RNG_SEED") {
            if let Ok(v) = val.parse() {
                cfg.rng_seed = Some(v);
            }
        }
        if let Some(val) = lookup("ALLOCARE_AI_REDISTRIBUTION") {
            if let Some(v) = parse_flag(&val) {
                cfg.ai_redistribution_enabled = v;
            }
        }
        if let Some(val) = lookup("ALLOCARE_EMERGENCY_FUND") {
            if let Ok(v) = val.parse::<f64>() {
                if v.is_finite() && v >= 0.0 {
                    cfg.emergency_fund_balance = v;
                }
            }
        }
        if let Some(val) = lookup("ALLOCARE_AUTO_CYCLE") {
            if let Some(v) = parse_flag(&val) {
                cfg.auto_cycle = v;
            }
        }
        if let Some(val) = lookup("ALLOCARE_CYCLE_INTERVAL_MS") {
            if let Ok(v) = val.parse::<u64>() {
                if v > 0 {
                    cfg.auto_cycle_interval_ms = v;
                }
            }
        }

        // Mirror settings
        if let Some(val) = lookup("ALLOCARE_MIRROR_ENABLED") {
            if let Some(v) = parse_flag(&val) {
                cfg.mirror.enabled = v;
            }
        }
        if let Some(val) = lookup("ALLOCARE_MIRROR_ENDPOINT") {
            if !val.trim().is_empty() {
                cfg.mirror.endpoint = Some(val.trim().to_string());
            }
        }

        cfg
    }

    /// Auto-cycle tick interval
    pub fn auto_cycle_interval(&self) -> Duration {
        Duration::from_millis(self.auto_cycle_interval_ms)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::load_from(lookup(&[]));
        assert_eq!(cfg.rng_seed, None);
        assert!(!cfg.ai_redistribution_enabled);
        assert_eq!(cfg.emergency_fund_balance, 50_000.0);
        assert_eq!(cfg.log_capacity, 100);
        assert_eq!(cfg.transfer_capacity, 50);
        assert_eq!(cfg.trend_capacity, 20);
        assert!(!cfg.auto_cycle);
        assert_eq!(cfg.auto_cycle_interval(), Duration::from_secs(3));
        assert!(!cfg.mirror.enabled);
    }

    #[test]
    fn test_overrides() {
        let cfg = EngineConfig::load_from(lookup(&[
            ("ALLOCARE_RNG_SEED", "42"),
            ("ALLOCARE_AI_REDISTRIBUTION", "true"),
            ("ALLOCARE_EMERGENCY_FUND", "1200.5"),
            ("ALLOCARE_AUTO_CYCLE", "on"),
            ("ALLOCARE_CYCLE_INTERVAL_MS", "500"),
            ("ALLOCARE_MIRROR_ENABLED", "1"),
            ("ALLOCARE_MIRROR_ENDPOINT", "http://localhost:4000/api"),
        ]));
        assert_eq!(cfg.rng_seed, Some(42));
        assert!(cfg.ai_redistribution_enabled);
        assert_eq!(cfg.emergency_fund_balance, 1200.5);
        assert!(cfg.auto_cycle);
        assert_eq!(cfg.auto_cycle_interval(), Duration::from_millis(500));
        assert!(cfg.mirror.enabled);
        assert_eq!(cfg.mirror.endpoint.as_deref(), Some("http://localhost:4000/api"));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = EngineConfig::load_from(lookup(&[
            ("ALLOCARE_RNG_SEED", "seed"),
            ("ALLOCARE_AI_REDISTRIBUTION", "maybe"),
            ("ALLOCARE_EMERGENCY_FUND", "-5"),
            ("ALLOCARE_CYCLE_INTERVAL_MS", "0"),
        ]));
        assert_eq!(cfg.rng_seed, None);
        assert!(!cfg.ai_redistribution_enabled);
        assert_eq!(cfg.emergency_fund_balance, 50_000.0);
        assert_eq!(cfg.auto_cycle_interval_ms, 3000);
    }
}
