pub mod policy;
pub mod q_table;

pub use policy::{GreedyPolicy, Policy};
pub use q_table::{QLearningAgent, QLearningConfig};
