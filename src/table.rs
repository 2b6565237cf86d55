use std::collections::HashMap;

use crate::env::Hashable;

/// Estimated returns for state-action pairs
///
/// Pairs that were never written read as the configured default value. Reads never insert,
/// so looking up unseen pairs does not grow the table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "S: serde::Serialize + Eq + std::hash::Hash, A: serde::Serialize + Eq + std::hash::Hash",
        deserialize = "S: serde::Deserialize<'de> + Eq + std::hash::Hash, A: serde::Deserialize<'de> + Eq + std::hash::Hash"
    ))
)]
pub struct ActionValueTable<S, A> {
    table: HashMap<S, HashMap<A, f64>>,
    default_value: f64,
}

impl<S: Hashable, A: Hashable> PartialEq for ActionValueTable<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.default_value == other.default_value
    }
}

impl<S: Hashable, A: Hashable> ActionValueTable<S, A> {
    /// Create an empty table where every pair reads as `default_value`
    pub fn new(default_value: f64) -> Self {
        Self {
            table: HashMap::new(),
            default_value,
        }
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Number of recorded state-action pairs
    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// States with at least one recorded entry
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.table.keys()
    }

    /// Get the stored estimate for `(state, action)`, or the default value if unset
    pub fn value(&self, state: &S, action: &A) -> f64 {
        self.table
            .get(state)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(self.default_value)
    }

    /// Overwrite the estimate for `(state, action)`, creating it if absent
    pub fn set_value(&mut self, state: S, action: A, value: f64) {
        self.table.entry(state).or_default().insert(action, value);
    }

    /// The candidate with the highest value in `state`
    ///
    /// Ties go to the earliest candidate in `actions`. **Returns** `None` if `actions` is empty.
    pub fn best_action(&self, state: &S, actions: &[A]) -> Option<A> {
        let mut best: Option<(&A, f64)> = None;
        for action in actions {
            let value = self.value(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }

        best.map(|(action, _)| action.clone())
    }

    /// The highest value among the candidates in `state`, or the default value if `actions` is empty
    pub fn max_value(&self, state: &S, actions: &[A]) -> f64 {
        if actions.is_empty() {
            return self.default_value;
        }

        actions
            .iter()
            .map(|action| self.value(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Snapshot of every recorded entry for `state`
    ///
    /// Actions that were never written are not included.
    pub fn action_values(&self, state: &S) -> HashMap<A, f64> {
        self.table.get(state).cloned().unwrap_or_default()
    }

    /// Blend every entry of `other` into this table
    ///
    /// Each entry becomes `current * (1 - ratio) + incoming * ratio`, where `current` is this
    /// table's value (its default if unset).
    pub fn merge(&mut self, other: &Self, ratio: f64) {
        for (state, actions) in &other.table {
            for (action, &incoming) in actions {
                let current = self.value(state, action);
                self.set_value(
                    state.clone(),
                    action.clone(),
                    current * (1.0 - ratio) + incoming * ratio,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_pairs_read_default() {
        let table = ActionValueTable::<u8, char>::new(-0.5);
        assert_eq!(table.value(&0, &'a'), -0.5);
        assert_eq!(table.value(&42, &'z'), -0.5);
        assert!(table.is_empty(), "Reads do not insert");
    }

    #[test]
    fn set_value_is_isolated() {
        let mut table = ActionValueTable::new(0.0);
        table.set_value(1, 'a', 3.0);
        table.set_value(1, 'b', -2.0);
        table.set_value(2, 'a', 7.0);
        table.set_value(1, 'a', 4.0);

        assert_eq!(table.value(&1, &'a'), 4.0);
        assert_eq!(table.value(&1, &'b'), -2.0);
        assert_eq!(table.value(&2, &'a'), 7.0);
        assert_eq!(table.value(&2, &'b'), 0.0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn best_action_breaks_ties_by_order() {
        let mut table = ActionValueTable::new(0.0);
        table.set_value(0, 'a', 1.0);
        table.set_value(0, 'b', 1.0);

        assert_eq!(table.best_action(&0, &['a', 'b']), Some('a'));
        assert_eq!(table.best_action(&0, &['b', 'a']), Some('b'));

        // Unset candidates tie at the default
        assert_eq!(table.best_action(&1, &['c', 'd']), Some('c'));
    }

    #[test]
    fn best_action_picks_highest() {
        let mut table = ActionValueTable::new(0.0);
        table.set_value(0, 'a', -1.0);
        table.set_value(0, 'c', 0.5);

        assert_eq!(table.best_action(&0, &['a', 'b', 'c']), Some('c'));
        assert_eq!(table.best_action(&0, &['a']), Some('a'));
        assert_eq!(table.best_action(&0, &[]), None);
    }

    #[test]
    fn max_value_functional() {
        let mut table = ActionValueTable::new(0.25);
        table.set_value(0, 'a', -3.0);
        table.set_value(0, 'b', -1.0);

        assert_eq!(table.max_value(&0, &[]), 0.25);
        assert_eq!(table.max_value(&0, &['a', 'b']), -1.0);
        assert_eq!(table.max_value(&0, &['a', 'b', 'c']), 0.25);
    }

    #[test]
    fn action_values_snapshot() {
        let mut table = ActionValueTable::new(0.0);
        table.set_value(0, 'a', 1.0);
        table.set_value(0, 'b', 2.0);
        table.set_value(1, 'a', 3.0);

        let values = table.action_values(&0);
        assert_eq!(values.len(), 2);
        assert_eq!(values[&'a'], 1.0);
        assert_eq!(values[&'b'], 2.0);
        assert!(table.action_values(&5).is_empty());
    }

    #[test]
    fn merge_interpolates() {
        let mut mine = ActionValueTable::new(0.0);
        mine.set_value(0, 'a', 2.0);
        mine.set_value(0, 'b', 1.0);

        let mut theirs = ActionValueTable::new(0.0);
        theirs.set_value(0, 'a', 4.0);
        theirs.set_value(1, 'a', 8.0);

        mine.merge(&theirs, 0.25);

        assert_eq!(mine.value(&0, &'a'), 2.5);
        assert_eq!(mine.value(&0, &'b'), 1.0, "Entries absent from `other` are untouched");
        assert_eq!(mine.value(&1, &'a'), 2.0, "Missing entries blend from the default");
    }

    #[test]
    fn equality_compares_entries_and_default() {
        let mut a = ActionValueTable::new(0.0);
        let mut b = ActionValueTable::new(0.0);
        assert_eq!(a, b);

        a.set_value(0, 'a', 1.0);
        assert_ne!(a, b);
        b.set_value(0, 'a', 1.0);
        assert_eq!(a, b);

        let mut c = ActionValueTable::new(1.0);
        c.set_value(0, 'a', 1.0);
        assert_ne!(a, c, "Default value is part of equality");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let mut table = ActionValueTable::new(0.0);
        table.set_value(String::from("start"), 1u8, 0.5);

        let json = serde_json::to_string(&table).unwrap();
        let restored: ActionValueTable<String, u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }
}
