//! Fixed-period update/render loop
//!
//! The scheduler runs on its own thread and is the sole mutator of the
//! game state. Each iteration: drain queued commands, run one simulation
//! update, attempt one render, then pace. With time left in the period it
//! sleeps the remainder; when an iteration overruns it computes how many
//! updates fit per rendered frame and runs that many catch-up updates
//! (capped) with no intervening renders, so simulated time tracks the
//! wall clock at the cost of dropped frames.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::assets::{AssetProvider, SpriteKind};
use crate::audio::AudioSink;
use crate::consts::*;
use crate::renderer::{Hud, RenderFrame, RenderSurface, SpriteInstance};
use crate::settings::Settings;
use crate::sim::{
    Command, EffectKind, GamePhase, GameState, Projectile, Ship, apply_command, tick,
};

/// Catch-up demand, in whole periods, for an iteration that overran
///
/// `ceil(frame_cost / (period - update_cost))` is how many periods one
/// frame eats while an update must still land every period. The demand
/// also sizes the extended sleep budget, so it is not capped here; only
/// the degenerate divisions settle early (infinity when the update alone
/// ate the period, NaN for 0/0).
fn update_deficit(frame_ms: f64, update_ms: f64, period_ms: f64) -> f64 {
    let raw = (frame_ms / (period_ms - update_ms)).ceil();
    if raw.is_finite() {
        raw.max(0.0)
    } else if raw == f64::INFINITY {
        MAX_FRAME_SKIPS as f64
    } else {
        0.0
    }
}

/// Catch-up updates actually run, capped at the frame-skip limit
pub fn extra_updates(frame_ms: f64, update_ms: f64, period_ms: f64) -> u32 {
    update_deficit(frame_ms, update_ms, period_ms).min(MAX_FRAME_SKIPS as f64) as u32
}

/// Owns the game state and drives it at the target cadence
pub struct Scheduler<R, A, S> {
    state: GameState,
    commands: Receiver<Command>,
    renderer: R,
    audio: A,
    assets: S,
    settings: Settings,
    /// Wall-clock origin for the whole-second regen/cloak timers
    epoch: Instant,
    total_updates: u64,
    total_frames: u64,
}

impl<R: RenderSurface, A: AudioSink, S: AssetProvider> Scheduler<R, A, S> {
    pub fn new(
        state: GameState,
        commands: Receiver<Command>,
        renderer: R,
        audio: A,
        assets: S,
        settings: Settings,
    ) -> Self {
        Scheduler {
            state,
            commands,
            renderer,
            audio,
            assets,
            settings,
            epoch: Instant::now(),
            total_updates: 0,
            total_frames: 0,
        }
    }

    /// Run until the state machine reaches `Over`
    pub fn run(mut self) {
        log::info!("scheduler running at {} updates/sec", UPDATES_PER_SEC);
        let begin = Instant::now();

        while self.state.phase != GamePhase::Over {
            let start = Instant::now();

            self.drain_commands();
            self.update();
            let update_ms = start.elapsed().as_secs_f64() * 1e3;

            self.present();

            let total_ms = start.elapsed().as_secs_f64() * 1e3;
            let frame_ms = total_ms - update_ms;
            let excess_ms = UPDATE_PERIOD_MS - total_ms;

            if excess_ms > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(excess_ms / 1e3));
            } else if excess_ms < 0.0 {
                // Behind schedule: updates catch up, frames drop
                let deficit = update_deficit(frame_ms, update_ms, UPDATE_PERIOD_MS);
                let extra = deficit.min(MAX_FRAME_SKIPS as f64) as u32;
                for _ in 0..extra {
                    self.update();
                }
                // The period budget extends by the full demand even when
                // the update count was capped
                let total_ms = start.elapsed().as_secs_f64() * 1e3;
                let excess_ms = deficit * UPDATE_PERIOD_MS - total_ms;
                if excess_ms >= 0.0 {
                    std::thread::sleep(Duration::from_secs_f64(excess_ms / 1e3));
                }
            }

            let elapsed = begin.elapsed().as_secs_f64();
            if self.settings.show_fps
                && self.total_updates % (UPDATES_PER_SEC as u64 * 10) == 0
                && elapsed > 0.0
            {
                log::debug!(
                    "avg ups {:.1}, avg fps {:.1}",
                    self.total_updates as f64 / elapsed,
                    self.total_frames as f64 / elapsed,
                );
            }
        }

        log::info!(
            "scheduler stopped; final score {} - {}",
            self.state.wins[0],
            self.state.wins[1]
        );
    }

    /// Apply every command received since the last tick boundary
    fn drain_commands(&mut self) {
        let now_secs = self.epoch.elapsed().as_secs();
        while let Ok(cmd) = self.commands.try_recv() {
            apply_command(&mut self.state, cmd, now_secs);
        }
    }

    fn update(&mut self) {
        let now_secs = self.epoch.elapsed().as_secs();
        tick(&mut self.state, now_secs);
        self.total_updates += 1;
    }

    /// Render a snapshot and flush queued sounds
    fn present(&mut self) {
        let frame = self.snapshot();
        if let Err(e) = self.renderer.render(&frame) {
            // Dropping a frame is fine; the simulation keeps its cadence
            log::warn!("dropped frame: {e}");
        }
        self.total_frames += 1;

        for sound in self.state.fx.sounds.drain(..) {
            self.audio.play(sound);
        }
    }

    /// Build the read-only frame snapshot, resolving sprite handles
    fn snapshot(&self) -> RenderFrame {
        let mut sprites = Vec::new();

        sprites.push(SpriteInstance {
            kind: SpriteKind::Starfield,
            handle: self.assets.sprite(SpriteKind::Starfield),
            pos: FIELD_CENTER,
            size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            heading_step: 0,
        });

        let planet = &self.state.planet.body;
        if planet.visible {
            sprites.push(self.sprite(SpriteKind::Planet, planet.pos, planet.width, 0));
        }
        for slug in &self.state.slugs {
            sprites.push(self.projectile_sprite(SpriteKind::Slug, slug));
        }
        for torpedo in &self.state.torpedoes {
            sprites.push(self.projectile_sprite(SpriteKind::Torpedo, torpedo));
        }
        for (ship, kind) in self
            .state
            .ships
            .iter()
            .zip([SpriteKind::Ship1, SpriteKind::Ship2])
        {
            if ship.body.visible {
                sprites.push(self.ship_sprite(kind, ship));
            }
        }
        for effect in &self.state.fx.effects {
            let kind = match effect.kind {
                EffectKind::Explosion => SpriteKind::Explosion,
                EffectKind::ShieldFlicker => SpriteKind::ShieldFlicker,
            };
            let pos = effect.resolve_pos(&self.state.ships);
            sprites.push(self.sprite(kind, pos, SHIP_SIZE, 0));
        }

        RenderFrame {
            phase: self.state.phase,
            sprites,
            hud: Hud {
                shield: [self.state.ships[0].shield_energy, self.state.ships[1].shield_energy],
                weapon: [self.state.ships[0].weapon_energy, self.state.ships[1].weapon_energy],
                wins: self.state.wins,
            },
        }
    }

    fn sprite(&self, kind: SpriteKind, pos: Vec2, size: i32, heading_step: i32) -> SpriteInstance {
        SpriteInstance {
            kind,
            handle: self.assets.sprite(kind),
            pos,
            size: Vec2::splat(size as f32),
            heading_step,
        }
    }

    fn projectile_sprite(&self, kind: SpriteKind, p: &Projectile) -> SpriteInstance {
        let step = p.heading.step();
        let handle = self
            .assets
            .sprite(kind)
            .and_then(|base| self.assets.rotated(base, step));
        SpriteInstance {
            kind,
            handle,
            pos: p.body.pos,
            size: Vec2::new(p.body.width as f32, p.body.height as f32),
            heading_step: step,
        }
    }

    fn ship_sprite(&self, kind: SpriteKind, ship: &Ship) -> SpriteInstance {
        let step = ship.heading.step();
        let handle = self
            .assets
            .sprite(kind)
            .and_then(|base| self.assets.rotated(base, step));
        SpriteInstance {
            kind,
            handle,
            pos: ship.body.pos,
            size: Vec2::new(ship.body.width as f32, ship.body.height as f32),
            heading_step: step,
        }
    }
}
