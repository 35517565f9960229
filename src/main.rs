use anyhow::{Context, Result};
use glam::Vec3;
use log::info;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use fps_controller::engine::game_loop::FrameClock;
use fps_controller::engine::input::{InputSource, InputState};
use fps_controller::engine::sandbox::Sandbox;
use fps_controller::game::characters::{Character, ControllerConfig};
use fps_controller::game::host::{EntityId, Mover};

const PLAYER: EntityId = 1;
const DUMMY: EntityId = 2;

/// Simulated seconds the demo runs for
const DEMO_LENGTH: f64 = 6.0;

/// Jittery frame times fed to the clock, cycled
const FRAME_TIMES: [f32; 3] = [0.007, 0.016, 0.025];

/// One scripted input event
#[derive(Debug, Clone, Copy)]
enum Scripted {
    Press(InputSource),
    Release(InputSource),
    /// Raw pointer counts, +y down
    Pointer(f64, f64),
}

/// Input timeline: walk up to the dummy, swing twice (one extra click lands
/// mid-swing and is ignored), turn away, crouch, then jump.
fn timeline() -> Vec<(f64, Scripted)> {
    let key = InputSource::key;
    let attack = InputSource::mouse(MouseButton::Left);

    vec![
        (0.5, Scripted::Press(key(KeyCode::KeyW))),
        (1.0, Scripted::Release(key(KeyCode::KeyW))),
        (1.2, Scripted::Press(attack)),
        (1.25, Scripted::Release(attack)),
        (1.4, Scripted::Press(attack)),
        (1.45, Scripted::Release(attack)),
        (2.3, Scripted::Press(attack)),
        (2.35, Scripted::Release(attack)),
        (3.4, Scripted::Pointer(300.0, -40.0)),
        (3.6, Scripted::Press(key(KeyCode::ControlLeft))),
        (4.2, Scripted::Release(key(KeyCode::ControlLeft))),
        (4.6, Scripted::Press(key(KeyCode::Space))),
        (4.7, Scripted::Release(key(KeyCode::Space))),
    ]
}

fn load_config() -> Result<ControllerConfig> {
    match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(&path)
            .with_context(|| format!("Failed to load controller config '{}'", path)),
        None => {
            info!("No config given, using default tuning");
            Ok(ControllerConfig::default())
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting first-person controller demo...");

    let config = load_config()?;

    let mut sandbox = Sandbox::new(
        PLAYER,
        Vec3::new(0.0, 1.2, 0.0),
        config.locomotion.default_height,
    );
    sandbox.add_floor(50.0);
    sandbox.add_target(DUMMY, Vec3::new(0.0, 1.0, -4.0), Vec3::new(0.5, 1.0, 0.5), 3);

    let mut player = Character::new(PLAYER, "Player", &config);
    let mut input = InputState::default();
    let mut clock = FrameClock::new();

    let mut events = timeline().into_iter().peekable();
    let mut frame = 0usize;

    while clock.simulated_secs() < DEMO_LENGTH {
        let ticks = clock.begin_frame(FRAME_TIMES[frame % FRAME_TIMES.len()]);
        frame += 1;

        // The clock has already counted every tick of this frame
        let dt = clock.fixed_timestep();
        let frame_start = clock.simulated_secs() - f64::from(ticks) * f64::from(dt);

        for tick in 0..ticks {
            let now = frame_start + f64::from(tick) * f64::from(dt);
            while let Some((_, event)) = events.next_if(|(at, _)| *at <= now) {
                match event {
                    Scripted::Press(source) => input.press(source),
                    Scripted::Release(source) => input.release(source),
                    Scripted::Pointer(dx, dy) => input.add_mouse_motion(dx, dy),
                }
            }

            let frame_input = input.take_frame();
            let report = player.tick(&frame_input, dt, &mut sandbox);
            sandbox.update(dt);

            if report.attack_started {
                info!("t={:.2}s swing started", now);
            }
            for hit in &report.hits {
                let health = hit
                    .entity
                    .and_then(|entity| sandbox.target(entity))
                    .map_or(-1, |health| health.current());
                info!("t={:.2}s hit at {:?}, target health {}", now, hit.point, health);
            }
        }
    }

    let position = sandbox.position();
    info!(
        "Demo finished after {} frames / {} ticks",
        clock.frame_count(),
        clock.tick_count()
    );
    info!(
        "Player at ({:.2}, {:.2}, {:.2}), pitch {:.1}, grounded {}",
        position.x,
        position.y,
        position.z,
        player.look().pitch(),
        player.locomotion().is_grounded()
    );
    if let Some(dummy) = sandbox.target(DUMMY) {
        info!("Dummy health {}/{}", dummy.current(), dummy.max());
    }
    info!("{} impact effect(s) still alive", sandbox.effects().len());

    Ok(())
}
