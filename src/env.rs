use std::hash::Hash;

/// A trait for state and action types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Clone + Eq + Hash {}

impl<T> Hashable for T where T: Clone + Eq + Hash {}

/// Represents a single transition produced by one environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, A> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: A,
    /// The reward received after taking the action
    pub reward: f64,
    /// The state of the environment after the action is taken
    pub next_state: S,
    /// Whether `next_state` ends the episode
    pub terminal: bool,
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This trait covers the discrete-time case with one agent and finite state and action
/// spaces. Implementations own their current state; the agent only observes it.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State: Hashable;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Hashable;

    /// Get the state the environment is currently in
    fn current_state(&self) -> Self::State;

    /// Get the actions available in `state`
    ///
    /// Must not be empty for a non-terminal state. May be empty for a terminal state.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Update the environment in response to an action taken from the current state
    ///
    /// The returned `next_state` must equal [`current_state`](Environment::current_state)
    /// once the call returns.
    fn step(&mut self, action: Self::Action) -> Transition<Self::State, Self::Action>;

    /// Reset the environment to an initial state
    fn reset(&mut self);

    /// Determine if `state` is terminal
    fn is_terminal(&self, state: &Self::State) -> bool;
}
