//! Lane Runner entry point
//!
//! The game runs in the browser through the `web` bindings. Natively this binary
//! plays a headless autopilot run and logs what happened, which is handy for
//! checking tuning changes.
//!
//! Usage: `lane-runner [seed] [tuning.json]`

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use lane_runner::Tuning;
    use lane_runner::sim::{GameEvent, GameState, Snapshot, TickInput, autopilot_input, tick};

    /// Frames per wall-clock second in the headless run
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 12345,
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    log::info!("Lane Runner (headless) starting with seed {}", seed);
    let mut state = GameState::with_tuning(seed, tuning);
    state.attach_player();
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    let mut now_ms = 0.0;
    let mut pickups = 0;
    while state.frames < MAX_FRAMES {
        now_ms += FRAME_MS;
        let input = autopilot_input(&state, now_ms);
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::PickupCollected { .. } => pickups += 1,
                GameEvent::GameOver { .. } => log::info!("{:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }
        if state.phase != lane_runner::sim::GamePhase::Running {
            break;
        }
    }

    let snapshot = Snapshot::capture(&state);
    log::info!(
        "Run finished: phase={:?} score={} frames={} pickups={} live entities={}",
        snapshot.phase,
        snapshot.score,
        snapshot.frames,
        pickups,
        snapshot.entities.len()
    );
    Ok(())
}
