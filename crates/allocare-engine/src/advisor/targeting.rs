//! Selection rules
//!
//! Every selection returns the FIRST maximal element in registry order.
//! A later element replaces the current best only if it is strictly greater.

use allocare_common::Household;

/// Poverty index a household must exceed to be a shock target
pub const SHOCK_MIN_POVERTY: f64 = 0.3;

/// First element with the greatest key
pub fn first_max_by<'a, I, F>(items: I, key: F) -> Option<&'a Household>
where
    I: IntoIterator<Item = &'a Household>,
    F: Fn(&Household) -> f64,
{
    items.into_iter().fold(None, |best, candidate| match best {
        Some(current) if key(candidate) <= key(current) => Some(current),
        _ => Some(candidate),
    })
}

/// Highest shock exposure among households with PI > 0.3
pub fn select_shock_target(households: &[Household]) -> Option<&Household> {
    first_max_by(
        households.iter().filter(|h| h.poverty_index > SHOCK_MIN_POVERTY),
        |h| h.shock_exposure_risk,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(id: &str, poverty: f64, shock: f64) -> Household {
        let mut h = Household::new(id, id, "S").with_risk(0.0, 0.0, shock);
        h.poverty_index = poverty;
        h
    }

    #[test]
    fn test_first_max_wins_ties() {
        let households = vec![
            household("a", 0.5, 0.8),
            household("b", 0.5, 0.9),
            household("c", 0.5, 0.9),
        ];
        let target = select_shock_target(&households).unwrap();
        assert_eq!(target.id, "b");
    }

    #[test]
    fn test_shock_requires_poverty_above_threshold() {
        let households = vec![household("a", 0.3, 0.99), household("b", 0.31, 0.1)];
        assert_eq!(select_shock_target(&households).unwrap().id, "b");

        let stable = vec![household("a", 0.1, 0.99)];
        assert!(select_shock_target(&stable).is_none());
    }

    #[test]
    fn test_first_max_by_empty() {
        assert!(first_max_by(std::iter::empty(), |h: &Household| h.credits).is_none());
    }
}
