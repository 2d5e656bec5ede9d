//! Tilt Maze entry point
//!
//! `tilt-maze [settings.json] [seed]`
//!
//! Carves a maze, prints it, then rolls the body toward the exit under a
//! constant down-right tilt and prints where it came to rest.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use tilt_maze::platform::TiltInput;
    use tilt_maze::renderer::TextRenderer;
    use tilt_maze::sim::{MazeSession, SessionEvent};
    use tilt_maze::{MazeSettings, SettingsError};

    /// Tilt events fed to the body before giving up
    const MAX_FRAMES: u32 = 5_000;
    /// Spacing between tilt events, roughly one display frame
    const FRAME_MS: f64 = 16.0;

    pub fn run() -> Result<(), SettingsError> {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) if path != "-" => MazeSettings::load(path)?,
            _ => MazeSettings::default(),
        };
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(clock_seed);

        let mut canvas = TextRenderer::new(
            settings.width,
            settings.height,
            settings.step_size,
            settings.body_diameter,
        );
        let mut session = MazeSession::new(settings, seed, &mut canvas)?;

        let stats = session.finish_carving(&mut canvas);
        println!("{}", canvas.render());
        log::info!("Generation stats: {}", serde_json::to_string(&stats).unwrap_or_default());

        let tilt = TiltInput::new(10.0, 10.0);
        for frame in 0..MAX_FRAMES {
            let timestamp = frame as f64 * FRAME_MS;
            if let Some(SessionEvent::Arrived { position }) =
                session.apply_tilt(tilt, timestamp, &mut canvas)
            {
                println!("{}", canvas.render());
                log::info!(
                    "Reached the exit after {} frames at ({:.1}, {:.1})",
                    frame,
                    position.x,
                    position.y
                );
                return Ok(());
            }
        }

        println!("{}", canvas.render());
        let pos = session.body().position();
        log::info!(
            "Body came to rest at ({:.1}, {:.1}) without reaching the exit",
            pos.x,
            pos.y
        );
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tilt Maze starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `MazeSession` from their own event loop
}
