//! Headless round driver.
//!
//! Runs one randomized round with fast-forwarded time and a scripted
//! player walking the field edge, logging events as they fire. Useful
//! for eyeballing round pacing without a frontend.

use anyhow::Result;
use oni_content::BuiltinStages;
use oni_core::{GeneratorTuning, InputState, RoundConfig, RoundPhase, TimeMs};
use oni_runtime::{InMemoryProgressStore, RoundSession, random_seed};

const TICK_MS: u64 = 50;
const MAX_SIM_MS: u64 = 60_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or_else(random_seed);

    let mut session = RoundSession::new(
        RoundConfig::default(),
        GeneratorTuning::default(),
        Box::new(BuiltinStages),
        Box::new(InMemoryProgressStore::default()),
    );
    session.start_randomized(seed, TimeMs::ZERO)?;
    tracing::info!("Simulating seed {} at {}ms per tick", seed, TICK_MS);

    // Scripted input: keep pushing right, wrap to down on the wall.
    let mut now = TimeMs::ZERO;
    let mut frame = session.tick(now, InputState::NONE)?;
    while !frame.phase.is_terminal() && now.0 < MAX_SIM_MS {
        now = now + TICK_MS;
        let input = if frame.player.x < frame.field.width() as i32 - 1 {
            InputState {
                right: true,
                ..InputState::NONE
            }
        } else {
            InputState {
                down: true,
                ..InputState::NONE
            }
        };
        frame = session.tick(now, input)?;
        for event in &frame.events {
            tracing::info!("{}: {:?}", now, event);
        }
    }

    let outcome = match frame.phase {
        RoundPhase::Won => "won",
        RoundPhase::Lost => "lost",
        _ => "timed out",
    };
    println!(
        "seed {}: {} after {} ({} items)",
        seed, outcome, now, frame.items_collected
    );
    Ok(())
}
