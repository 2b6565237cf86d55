use std::{collections::HashSet, error::Error, fs, path::Path};

use log::info;
use qtab::{
    algo::{Policy, QLearningAgent, QLearningConfig},
    env::Environment,
    gym::{GridWorld, GridWorldConfig},
    train,
};

const NUM_EPISODES: usize = 1000;
const MAX_STEPS: usize = 100;
const DEMO_STEPS: usize = 20;

fn grid(random_start: bool) -> GridWorldConfig {
    GridWorldConfig {
        width: 5,
        height: 5,
        start: (0, 0),
        goal: (4, 4),
        obstacles: HashSet::from([(1, 1), (2, 2), (3, 1)]),
        goal_reward: 10.0,
        obstacle_penalty: -5.0,
        step_penalty: -0.1,
        random_start,
        seed: None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let mut env = GridWorld::new(grid(true))?;
    let mut agent = QLearningAgent::new(QLearningConfig {
        learning_rate: 0.1,
        discount_factor: 0.9,
        initial_exploration_rate: 1.0,
        exploration_decay: 0.995,
        min_exploration_rate: 0.01,
        default_value: 0.0,
        seed: None,
    })?;

    let result = train::run(&mut agent, &mut env, NUM_EPISODES, MAX_STEPS);
    if let Some(mean) = result.mean_reward(100) {
        info!("Mean reward over the last 100 episodes: {mean:.2}");
    }

    let mut wtr = csv::Writer::from_path(path.join("grid_world.csv"))?;
    wtr.write_record(["episode", "reward", "exploration", "steps", "terminated"])?;
    for (i, e) in result.episodes.iter().enumerate() {
        wtr.write_record(&[
            i.to_string(),
            e.reward.to_string(),
            e.exploration_rate.to_string(),
            e.steps.to_string(),
            e.terminated.to_string(),
        ])?;
    }
    wtr.flush()?;

    let mut eval = GridWorld::new(grid(false))?;
    eval.reset();
    let mut state = eval.current_state();
    println!("Start: {state:?}");
    for step in 1..=DEMO_STEPS {
        let actions = eval.actions(&state);
        let Some(action) = result.policy.choose(&state, &actions) else {
            break;
        };
        let t = eval.step(action);
        println!(
            "Step {step}: {action:?} -> {:?} (reward {:.1})",
            t.next_state, t.reward
        );
        state = t.next_state;
        if t.terminal {
            println!("Goal reached");
            break;
        }
    }

    println!("Action values at {:?}:", eval.start());
    for (action, value) in result.policy.table().action_values(&eval.start()) {
        println!("  {action:?}: {value:.3}");
    }

    Ok(())
}
