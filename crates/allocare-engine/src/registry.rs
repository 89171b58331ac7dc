//! Household registry
//!
//! Canonical in-memory household list. Every entry point that can change
//! credits or risk factors is followed by [`HouseholdRegistry::recalculate_all`]
//! so derived scores are never observed stale.

use std::collections::HashSet;

use allocare_common::{Household, NetworkEdge};
use serde::{Deserialize, Serialize};

use crate::scoring;

/// Strength assigned to every derived network edge
pub const DEFAULT_EDGE_STRENGTH: f64 = 0.5;

/// Ordered household collection; order is the tie-break order for selections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdRegistry {
    households: Vec<Household>,
}

impl HouseholdRegistry {
    /// Build a registry, scoring every household
    pub fn new(households: Vec<Household>) -> Self {
        let mut registry = Self { households };
        registry.recalculate_all();
        registry
    }

    pub fn get(&self, id: &str) -> Option<&Household> {
        self.households.iter().find(|h| h.id == id)
    }

    /// Mutable lookup; callers must recalculate afterwards
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Household> {
        self.households.iter_mut().find(|h| h.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Household> {
        self.households.iter()
    }

    pub fn as_slice(&self) -> &[Household] {
        &self.households
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Household] {
        &mut self.households
    }

    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    /// Rescore every household in place. Idempotent.
    pub fn recalculate_all(&mut self) {
        for household in &mut self.households {
            scoring::poverty::apply(household);
        }
    }

    /// Replace the whole population and rescore it
    pub fn replace_all(&mut self, households: Vec<Household>) {
        self.households = households;
        self.recalculate_all();
    }

    /// Move credits between two distinct households. Returns false if either is missing.
    pub(crate) fn move_credits(&mut self, from_id: &str, to_id: &str, amount: f64) -> bool {
        if from_id == to_id || !self.contains(from_id) || !self.contains(to_id) {
            return false;
        }
        for household in &mut self.households {
            if household.id == from_id {
                household.credits -= amount;
            } else if household.id == to_id {
                household.credits += amount;
            }
        }
        true
    }

    /// Deduplicated undirected edges derived from `connections`
    pub fn network_edges(&self) -> Vec<NetworkEdge> {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut edges = Vec::new();

        for household in &self.households {
            for target in &household.connections {
                let key = if household.id <= *target {
                    (household.id.clone(), target.clone())
                } else {
                    (target.clone(), household.id.clone())
                };
                if seen.insert(key) {
                    edges.push(NetworkEdge {
                        source: household.id.clone(),
                        target: target.clone(),
                        strength: DEFAULT_EDGE_STRENGTH,
                    });
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HouseholdRegistry {
        HouseholdRegistry::new(vec![
            Household::new("h1", "A", "S")
                .with_credits(45.0)
                .with_risk(0.8, 0.7, 0.75)
                .with_connections(["h2", "h3"]),
            Household::new("h2", "B", "S")
                .with_credits(120.0)
                .with_risk(0.3, 0.2, 0.25)
                .with_connections(["h1"]),
            Household::new("h3", "C", "S")
                .with_credits(30.0)
                .with_risk(0.9, 0.85, 0.8)
                .with_connections(["h1"]),
        ])
    }

    #[test]
    fn test_new_scores_households() {
        let r = registry();
        let h1 = r.get("h1").unwrap();
        // 0.4·0.55 + 0.2·(0.8 + 0.7 + 0.75)
        assert!((h1.poverty_index - 0.67).abs() < 1e-9);
        assert!((h1.credit_deficit_ratio - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut r = registry();
        let before: Vec<_> = r.iter().cloned().collect();
        r.recalculate_all();
        r.recalculate_all();
        let after: Vec<_> = r.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_get_mut_then_recalculate() {
        let mut r = registry();
        r.get_mut("h3").unwrap().credits = 100.0;
        r.recalculate_all();
        assert_eq!(r.get("h3").unwrap().credit_deficit_ratio, 0.0);
    }

    #[test]
    fn test_move_credits() {
        let mut r = registry();
        assert!(r.move_credits("h2", "h1", 20.0));
        assert_eq!(r.get("h2").unwrap().credits, 100.0);
        assert_eq!(r.get("h1").unwrap().credits, 65.0);

        assert!(!r.move_credits("h2", "missing", 20.0));
        assert!(!r.move_credits("h2", "h2", 20.0));
        assert_eq!(r.get("h2").unwrap().credits, 100.0);
    }

    #[test]
    fn test_network_edges_deduplicated() {
        let edges = registry().network_edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].source, "h1");
        assert_eq!(edges[0].target, "h2");
        assert!(edges.iter().all(|e| e.strength == DEFAULT_EDGE_STRENGTH));
    }

    #[test]
    fn test_replace_all_rescores() {
        let mut r = registry();
        r.replace_all(vec![Household::new("h9", "Z", "S").with_credits(100.0)]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("h9").unwrap().poverty_index, 0.0);
    }
}
