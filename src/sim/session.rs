//! One maze from carving to arrival
//!
//! The session owns the grid, the carver and the body. A driver (the native
//! binary, a browser shell, a test) calls `advance_carving` on its reveal
//! timer and forwards tilt events to `apply_tilt`. Every visible change goes
//! to the renderer passed in with the call.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{BodyPhysics, BodyStep};
use super::carve::{GenerationStats, MazeGenerator};
use super::collision::BodyGeometry;
use super::grid::Grid;
use crate::platform::TiltInput;
use crate::renderer::{Renderer, paint_grid};
use crate::settings::{MazeSettings, SettingsError};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Branches are still being carved
    Carving,
    /// Carving is done; the body rolls
    Rolling,
    /// The body reached the exit; input is ignored
    Arrived,
}

/// Notifications for whoever drives the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    CarvingFinished(GenerationStats),
    /// Emitted once, on the event that brought the body to the exit
    Arrived { position: Vec2 },
}

pub struct MazeSession {
    settings: MazeSettings,
    seed: u64,
    grid: Grid,
    generator: MazeGenerator<Pcg32>,
    body: BodyPhysics,
    phase: SessionPhase,
}

impl MazeSession {
    /// Build an uncarved maze and paint its initial state
    pub fn new(
        settings: MazeSettings,
        seed: u64,
        renderer: &mut dyn Renderer,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let grid = Grid::new(settings.width, settings.height);
        let generator =
            MazeGenerator::new(&grid, settings.branch_factor(), Pcg32::seed_from_u64(seed));
        let geometry = BodyGeometry::new(settings.step_size, settings.body_diameter, &grid);
        let body = BodyPhysics::new(&grid, geometry, settings.gravity);

        log::info!(
            "New maze {}x{} ({}) with seed {}",
            settings.width,
            settings.height,
            settings.difficulty.as_str(),
            seed
        );

        paint_grid(&grid, renderer);
        renderer.set_body_position(body.position());

        Ok(Self {
            settings,
            seed,
            grid,
            generator,
            body,
            phase: SessionPhase::Carving,
        })
    }

    pub fn settings(&self) -> &MazeSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &BodyPhysics {
        &self.body
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stats(&self) -> GenerationStats {
        self.generator.stats()
    }

    /// Pause the driver should leave between `advance_carving` calls
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.settings.reveal_delay_ms)
    }

    /// Run one carving branch
    pub fn advance_carving(&mut self, renderer: &mut dyn Renderer) -> Option<SessionEvent> {
        if self.phase != SessionPhase::Carving {
            return None;
        }
        if self.generator.step(&mut self.grid, renderer) {
            return None;
        }
        self.phase = SessionPhase::Rolling;
        Some(SessionEvent::CarvingFinished(self.generator.stats()))
    }

    /// Carve everything that is left
    pub fn finish_carving(&mut self, renderer: &mut dyn Renderer) -> GenerationStats {
        if self.phase == SessionPhase::Carving {
            self.generator.run(&mut self.grid, renderer);
            self.phase = SessionPhase::Rolling;
        }
        self.generator.stats()
    }

    /// Feed one tilt event to the body. Tilt is accepted while carving too;
    /// the body only ever moves through cells carved so far.
    pub fn apply_tilt(
        &mut self,
        tilt: TiltInput,
        timestamp_ms: f64,
        renderer: &mut dyn Renderer,
    ) -> Option<SessionEvent> {
        if self.phase == SessionPhase::Arrived {
            return None;
        }

        match self.body.apply_tilt(tilt, timestamp_ms, &self.grid) {
            BodyStep::Ignored => None,
            BodyStep::Moved(pos) => {
                renderer.set_body_position(pos);
                None
            }
            BodyStep::Arrived(pos) => {
                renderer.set_body_position(pos);
                self.phase = SessionPhase::Arrived;
                log::info!(
                    "Arrived at the exit of the {}x{} maze (seed {})",
                    self.grid.width(),
                    self.grid.height(),
                    self.seed
                );
                Some(SessionEvent::Arrived { position: pos })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;
    use crate::renderer::{CommandRecorder, NullRenderer};
    use crate::sim::grid::CellPos;

    fn small_settings() -> MazeSettings {
        MazeSettings {
            step_size: 10.0,
            body_diameter: 6.0,
            ..MazeSettings::with_size(9, 9)
        }
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = MazeSettings::with_size(8, 9);
        let result = MazeSession::new(settings, 1, &mut NullRenderer);
        assert!(matches!(result, Err(SettingsError::EvenDimension { .. })));
    }

    #[test]
    fn test_new_paints_grid_and_body() {
        let mut recorder = CommandRecorder::default();
        let session = MazeSession::new(small_settings(), 3, &mut recorder).unwrap();
        assert_eq!(recorder.cell_paints().count(), 81);
        assert_eq!(recorder.last_body_position(), Some(Vec2::new(12.0, 2.0)));
        assert_eq!(session.phase(), SessionPhase::Carving);
        assert_eq!(session.grid().path_count(), 0);
    }

    #[test]
    fn test_stepwise_carving_finishes_once() {
        let mut session = MazeSession::new(small_settings(), 5, &mut NullRenderer).unwrap();
        let mut finished = Vec::new();
        for _ in 0..1000 {
            if let Some(event) = session.advance_carving(&mut NullRenderer) {
                finished.push(event);
            }
        }
        assert_eq!(finished.len(), 1);
        assert!(matches!(
            finished[0],
            SessionEvent::CarvingFinished(stats) if stats.exit_reached
        ));
        assert_eq!(session.phase(), SessionPhase::Rolling);
        assert!(session.grid().is_path_at(session.grid().exit()));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut a = MazeSession::new(small_settings(), 42, &mut NullRenderer).unwrap();
        let mut b = MazeSession::new(small_settings(), 42, &mut NullRenderer).unwrap();
        a.finish_carving(&mut NullRenderer);
        b.finish_carving(&mut NullRenderer);
        let paths = |s: &MazeSession| s.grid().path_cells().map(|c| c.pos()).collect::<Vec<_>>();
        assert_eq!(paths(&a), paths(&b));
    }

    #[test]
    fn test_arrival_emitted_once_then_input_ignored() {
        let settings = MazeSettings {
            difficulty: Difficulty::Hard,
            ..small_settings()
        };
        let mut session = MazeSession::new(settings, 7, &mut NullRenderer).unwrap();
        session.finish_carving(&mut NullRenderer);

        // The junction above the exit is always carved
        let exit = session.grid().exit();
        let above = CellPos::new(exit.x, exit.y - 1);
        let start = session.body().geometry().centered_in(above);
        session.body.place(start);

        let mut recorder = CommandRecorder::default();
        let mut arrivals = 0;
        for i in 0..300 {
            let event = session.apply_tilt(TiltInput::new(0.0, 10.0), i as f64 * 16.0, &mut recorder);
            if matches!(event, Some(SessionEvent::Arrived { .. })) {
                arrivals += 1;
            }
        }
        assert_eq!(arrivals, 1);
        assert_eq!(session.phase(), SessionPhase::Arrived);

        let last = recorder.last_body_position();
        recorder.drain();
        assert!(session.apply_tilt(TiltInput::new(10.0, 0.0), 10_000.0, &mut recorder).is_none());
        assert!(recorder.commands.is_empty());
        assert_eq!(session.body().position(), last.unwrap());
    }

    #[test]
    fn test_tilt_during_carving_stays_in_carved_cells() {
        let mut session = MazeSession::new(small_settings(), 11, &mut NullRenderer).unwrap();
        for i in 0..200 {
            session.advance_carving(&mut NullRenderer);
            session.apply_tilt(TiltInput::new(10.0, 10.0), i as f64 * 16.0, &mut NullRenderer);
            let geom = *session.body().geometry();
            let corners =
                crate::sim::collision::Corners::probe(session.grid(), &geom, session.body().position());
            // Nothing is carved before the first branch runs
            if session.grid().path_count() > 0 {
                assert!(corners.all_in());
            }
        }
    }
}
