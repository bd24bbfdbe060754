//! Console timer demo — a session stopwatch and a periodic countdown
//! against [`FrameClocks`], including a stretch of host pause.
//!
//! Run with `cargo run --example timers` (set `RUST_LOG` to override the
//! default `info` filter).

use std::time::{Duration, Instant};

use stund::time::{ClockMode, FrameClocks, TimeTool};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut clocks = FrameClocks::new();
    // The session stopwatch ignores the host's time scale; the respawn
    // countdown freezes with it.
    let mut session = TimeTool::stopwatch(ClockMode::Unscaled);
    let mut respawn = TimeTool::countdown(2.0, ClockMode::Scaled);
    session.start(&clocks);
    respawn.start(&clocks);

    let mut last = Instant::now();
    for frame in 0..300u32 {
        let dt = last.elapsed().as_secs_f32();
        last = Instant::now();
        clocks.advance(dt);

        if frame == 120 {
            clocks.set_time_scale(0.0);
            log::info!("host paused — scaled clock frozen, countdown holds");
        }
        if frame == 180 {
            clocks.set_time_scale(1.0);
            log::info!("host resumed");
        }

        session.tick(&clocks);
        if respawn.tick(&clocks) {
            log::info!(
                "respawn fired at session t={:.2}s — restarting",
                session.value()
            );
            respawn.restart(&clocks);
        }

        if frame % 60 == 0 {
            log::info!(
                "session {:.2}s | respawn in {:.2}s",
                session.value(),
                respawn.value().max(0.0)
            );
        }
        std::thread::sleep(Duration::from_millis(16));
    }
}
