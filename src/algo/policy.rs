use crate::{env::Hashable, table::ActionValueTable};

/// A mapping from a state and the actions available there to a single action
pub trait Policy<S, A> {
    /// **Returns** `None` when `actions` is empty
    fn choose(&self, state: &S, actions: &[A]) -> Option<A>;
}

impl<S, A, F> Policy<S, A> for F
where
    F: Fn(&S, &[A]) -> Option<A>,
{
    fn choose(&self, state: &S, actions: &[A]) -> Option<A> {
        self(state, actions)
    }
}

/// Always picks the highest valued action, reading straight from an [`ActionValueTable`]
#[derive(Debug)]
pub struct GreedyPolicy<'a, S, A> {
    table: &'a ActionValueTable<S, A>,
}

impl<'a, S, A> GreedyPolicy<'a, S, A> {
    pub fn new(table: &'a ActionValueTable<S, A>) -> Self {
        Self { table }
    }

    /// The table this policy reads from
    pub fn table(&self) -> &'a ActionValueTable<S, A> {
        self.table
    }
}

impl<S, A> Clone for GreedyPolicy<'_, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for GreedyPolicy<'_, S, A> {}

impl<S: Hashable, A: Hashable> Policy<S, A> for GreedyPolicy<'_, S, A> {
    fn choose(&self, state: &S, actions: &[A]) -> Option<A> {
        self.table.best_action(state, actions)
    }
}
