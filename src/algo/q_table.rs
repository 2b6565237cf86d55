use crate::{
    env::{Hashable, Transition},
    error::ConfigError,
    exploration::{Choice, EpsilonGreedy},
    table::ActionValueTable,
    util::ensure_interval,
};

use super::GreedyPolicy;

/// Configuration for the [`QLearningAgent`]
///
/// Every field is required; nothing is clamped or corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct QLearningConfig {
    /// α, the step size of each update - must be in `(0,1]`
    pub learning_rate: f64,
    /// γ, the weight of future rewards - must be in `[0,1]`
    pub discount_factor: f64,
    /// ε at the first episode - must be in `[0,1]`
    pub initial_exploration_rate: f64,
    /// Factor ε is multiplied by after each episode - must be in `(0,1]`
    pub exploration_decay: f64,
    /// Floor for ε - must be in `[0, initial_exploration_rate]`
    pub min_exploration_rate: f64,
    /// Value of every state-action pair before it is first updated
    pub default_value: f64,
    /// Seed for the agent's random source, `None` for entropy
    pub seed: Option<u64>,
}

impl QLearningConfig {
    /// Check every hyperparameter against its documented range
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_interval!(self.learning_rate, > 0.0, 1.0);
        ensure_interval!(self.discount_factor, 0.0, 1.0);
        ensure_interval!(self.initial_exploration_rate, 0.0, 1.0);
        ensure_interval!(self.exploration_decay, > 0.0, 1.0);
        ensure_interval!(self.min_exploration_rate, 0.0, 1.0);
        if self.min_exploration_rate > self.initial_exploration_rate {
            return Err(ConfigError::MinExceedsInitial {
                min: self.min_exploration_rate,
                initial: self.initial_exploration_rate,
            });
        }
        if !self.default_value.is_finite() {
            return Err(ConfigError::NonFiniteDefault(self.default_value));
        }
        Ok(())
    }
}

/// An off-policy temporal-difference agent that learns its environment in an [`ActionValueTable`]
///
/// The update target always bootstraps from the best next action, regardless of which action
/// is taken next.
///
/// ### Generics
/// - `S`, `A` - state and action types, used as table keys
#[derive(Debug, Clone)]
pub struct QLearningAgent<S, A> {
    table: ActionValueTable<S, A>,
    exploration: EpsilonGreedy,
    alpha: f64, // learning rate
    gamma: f64, // discount factor
    episodes: u32, // completed episodes
}

impl<S: Hashable, A: Hashable> QLearningAgent<S, A> {
    /// Initialize a new `QLearningAgent` with an empty table
    ///
    /// **Errors** if any hyperparameter is outside its range, see [`QLearningConfig`]
    pub fn new(config: QLearningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let exploration = EpsilonGreedy::new(
            config.initial_exploration_rate,
            config.exploration_decay,
            config.min_exploration_rate,
            config.seed,
        )?;

        Ok(Self {
            table: ActionValueTable::new(config.default_value),
            exploration,
            alpha: config.learning_rate,
            gamma: config.discount_factor,
            episodes: 0,
        })
    }

    pub fn table(&self) -> &ActionValueTable<S, A> {
        &self.table
    }

    /// Current exploration rate
    pub fn exploration_rate(&self) -> f64 {
        self.exploration.epsilon()
    }

    /// Number of times the exploration rate has been decayed
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    /// Choose an action based on the current state and exploration policy
    ///
    /// **Returns** `None` if `actions` is empty
    pub fn choose_action(&mut self, state: &S, actions: &[A]) -> Option<A> {
        if actions.is_empty() {
            return None;
        }

        match self.exploration.choose() {
            Choice::Explore => self.exploration.sample(actions).cloned(),
            Choice::Exploit => self.table.best_action(state, actions),
        }
    }

    /// Move the estimate for `(state, action)` toward `reward + γ·max Q(next_state, ·)`
    pub fn update(
        &mut self,
        state: S,
        action: A,
        reward: f64,
        next_state: &S,
        next_actions: &[A],
    ) {
        let q_value = self.table.value(&state, &action);
        let max_next_q = self.table.max_value(next_state, next_actions);
        let target = reward + self.gamma * max_next_q;
        // Q + α(target - Q), weighted so that α = 1 yields `target` exactly
        let new_q_value = (1.0 - self.alpha) * q_value + self.alpha * target;

        self.table.set_value(state, action, new_q_value);
    }

    /// Learn from a transition, given the actions available in its next state
    pub fn learn(&mut self, transition: Transition<S, A>, next_actions: &[A]) {
        let Transition {
            state,
            action,
            reward,
            next_state,
            ..
        } = transition;

        self.update(state, action, reward, &next_state, next_actions);
    }

    /// Decay the exploration rate, called once after each episode
    pub fn decay_exploration(&mut self) {
        self.exploration.decay();
        self.episodes += 1;
    }

    /// The deployment policy, with no exploration
    pub fn greedy_policy(&self) -> GreedyPolicy<'_, S, A> {
        GreedyPolicy::new(&self.table)
    }

    /// Blend another agent's knowledge into this one, see [`ActionValueTable::merge`]
    pub fn merge(&mut self, other: &Self, ratio: f64) {
        self.table.merge(&other.table, ratio);
    }
}
