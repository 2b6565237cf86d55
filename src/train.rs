use log::{debug, info, trace, warn};

use crate::{
    algo::{GreedyPolicy, QLearningAgent},
    env::Environment,
};

/// Summary of one episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    /// Sum of rewards received during the episode
    pub reward: f64,
    /// Exploration rate in effect for the episode
    pub exploration_rate: f64,
    /// Number of environment steps taken
    pub steps: usize,
    /// Whether the episode ended in a terminal state rather than hitting the step cap
    /// or running out of actions
    pub terminated: bool,
}

/// Everything a call to [`run`] produces
#[derive(Debug)]
pub struct TrainingRun<'a, S, A> {
    /// One entry per episode, in order
    pub episodes: Vec<EpisodeReport>,
    /// Greedy policy over the agent's trained table
    pub policy: GreedyPolicy<'a, S, A>,
}

impl<S, A> TrainingRun<'_, S, A> {
    /// Total reward of each episode
    pub fn episode_rewards(&self) -> Vec<f64> {
        self.episodes.iter().map(|e| e.reward).collect()
    }

    /// Exploration rate in effect for each episode
    pub fn exploration_rates(&self) -> Vec<f64> {
        self.episodes.iter().map(|e| e.exploration_rate).collect()
    }

    /// Mean reward over the last `n` episodes, or `None` if no episodes ran
    pub fn mean_reward(&self, n: usize) -> Option<f64> {
        let tail = &self.episodes[self.episodes.len().saturating_sub(n)..];
        if tail.is_empty() {
            return None;
        }

        Some(tail.iter().map(|e| e.reward).sum::<f64>() / tail.len() as f64)
    }
}

/// Play one episode, learning from every step
///
/// The episode ends when the current state is terminal, a transition is terminal, no actions
/// are available, or `max_steps` steps have been taken. Does not decay exploration.
pub fn episode<E>(
    agent: &mut QLearningAgent<E::State, E::Action>,
    env: &mut E,
    max_steps: usize,
) -> EpisodeReport
where
    E: Environment,
{
    env.reset();
    let mut state = env.current_state();
    let mut report = EpisodeReport {
        reward: 0.0,
        exploration_rate: agent.exploration_rate(),
        steps: 0,
        terminated: false,
    };

    while report.steps < max_steps {
        if env.is_terminal(&state) {
            report.terminated = true;
            break;
        }

        let actions = env.actions(&state);
        let Some(action) = agent.choose_action(&state, &actions) else {
            warn!(
                "No actions available in a non-terminal state after {} steps, ending episode",
                report.steps
            );
            break;
        };

        let transition = env.step(action);
        let next_actions = env.actions(&transition.next_state);
        let terminal = transition.terminal;
        report.reward += transition.reward;
        report.steps += 1;
        trace!(
            "step {}: reward {:.3}, terminal {}",
            report.steps,
            transition.reward,
            terminal
        );

        state = transition.next_state.clone();
        agent.learn(transition, &next_actions);

        if terminal {
            report.terminated = true;
            break;
        }
    }

    report
}

/// Train `agent` in `env` for `total_episodes` episodes of at most `max_steps_per_episode` steps
///
/// Exploration is decayed after every episode. **Returns** the per-episode metrics and the
/// greedy policy over the trained table.
pub fn run<'a, E>(
    agent: &'a mut QLearningAgent<E::State, E::Action>,
    env: &mut E,
    total_episodes: usize,
    max_steps_per_episode: usize,
) -> TrainingRun<'a, E::State, E::Action>
where
    E: Environment,
{
    let progress_interval = (total_episodes / 10).max(1);
    let mut episodes = Vec::with_capacity(total_episodes);

    for i in 0..total_episodes {
        let report = episode(agent, env, max_steps_per_episode);
        agent.decay_exploration();

        debug!(
            "Episode {}: reward={:.3}, steps={}, terminated={}, exploration={:.4}",
            i + 1,
            report.reward,
            report.steps,
            report.terminated,
            report.exploration_rate
        );
        if (i + 1) % progress_interval == 0 {
            info!(
                "Episode {}/{}: reward={:.2}, exploration={:.3}",
                i + 1,
                total_episodes,
                report.reward,
                agent.exploration_rate()
            );
        }

        episodes.push(report);
    }

    TrainingRun {
        episodes,
        policy: agent.greedy_policy(),
    }
}
