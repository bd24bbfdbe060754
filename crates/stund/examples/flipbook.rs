//! Console flipbook demo — plays a looping walk cycle over a manual clock
//! and logs the frame the host renderer would display.
//!
//! Run with `cargo run --example flipbook`.

use stund::ecs::World;
use stund::flipbook::{Flipbook, FlipbookClip, FlipbookSheet, Sprite, advance_flipbooks};
use stund::math::Vec2;
use stund::time::{ClockMode, ManualClock};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new();
    let mut clock = ManualClock::new();

    let sheet = FlipbookSheet::new(4, 2, Vec2::new(128.0, 64.0));
    let clip = FlipbookClip::from_range(0, 5, 0.12).looping();
    let walker = world.spawn_one(Flipbook::new(sheet, clip, ClockMode::Scaled));
    world.insert(walker, Sprite::new());
    world.name_entity(walker, "walker");

    for step in 0..24u32 {
        advance_flipbooks(&mut world, &clock);

        let flipbook = world.get::<Flipbook>(walker).unwrap();
        let rect = flipbook.current_rect();
        log::info!(
            "t={:.2}s frame={} uv min=({:.2}, {:.2})",
            step as f32 * 0.05,
            flipbook.current_frame(),
            rect.min.x,
            rect.min.y
        );

        // Pause mid-cycle to show the frame holding.
        if step == 11 {
            world.get_mut::<Flipbook>(walker).unwrap().pause(&clock);
            log::info!("paused");
        }
        if step == 15 {
            world.get_mut::<Flipbook>(walker).unwrap().resume(&clock);
            log::info!("resumed");
        }

        clock.advance(ClockMode::Scaled, 0.05);
    }
}
