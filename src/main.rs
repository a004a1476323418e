//! Cupcake Snake entry point
//!
//! Native builds have no window: this runs the built-in levels headless with
//! a scripted player and logs what happens. Set `RUST_LOG=info` (or `debug`)
//! to see the simulation's own log lines.

use cupcake_snake::levels;
use cupcake_snake::sim::{GameEvent, GameState};
use cupcake_snake::Tuning;

/// Frame time of the scripted run (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;

/// Scripted input: (frames to hold, left, right)
const SCRIPT: &[(u32, bool, bool)] = &[
    // Up through the first room, past the centre cupcake
    (110, false, false),
    // Wiggle right and back to pick up the side cupcake
    (20, false, true),
    (40, false, false),
    (20, true, false),
    // Straight for the exit
    (200, false, false),
];

fn main() {
    env_logger::init();
    log::info!("Cupcake Snake (native, headless) starting...");

    let mut state = GameState::new(Tuning::default());
    state.subscribe(|event| match event {
        GameEvent::CupcakesEaten { count } => println!("  *chomp* x{count}"),
        GameEvent::LevelShown { number, .. } => println!("  entering stage {number}"),
        GameEvent::LevelHidden { id } => println!("  level instance {id} out of view"),
        GameEvent::Death { message, .. } => println!("  died: {message}"),
        GameEvent::Completed => println!("  all stages cleared!"),
    });

    let first = levels::builtin();
    println!("Running scripted player over {} stages...", first.chain_len());
    state.start_level(&first);

    let mut frames = 0u32;
    'script: for &(hold, left, right) in SCRIPT {
        state.set_steering(left, right);
        for _ in 0..hold {
            state.step(FRAME_DT);
            frames += 1;
            if !state.is_alive() || !state.is_running() {
                break 'script;
            }
        }
    }

    println!(
        "Finished after {frames} frames on stage {} (alive: {}, length: {:.0}, growth left: {:.0})",
        state.level(),
        state.is_alive(),
        state.snake().length(),
        state.remaining_length_to_grow()
    );
}
