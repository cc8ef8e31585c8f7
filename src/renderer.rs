//! Render seam
//!
//! Each loop iteration the scheduler builds a read-only `RenderFrame`
//! snapshot and hands it to the platform's `RenderSurface`. There is no
//! interface back into the simulation, and a render failure is logged and
//! skipped - the tick cadence never depends on drawing succeeding.

use glam::Vec2;

use crate::assets::{SpriteHandle, SpriteKind};
use crate::sim::GamePhase;

/// One sprite to draw this frame
#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub kind: SpriteKind,
    /// Resolved rotated bitmap; `None` draws nothing (missing asset)
    pub handle: Option<SpriteHandle>,
    /// Center position in field coordinates
    pub pos: Vec2,
    pub size: Vec2,
    pub heading_step: i32,
}

/// HUD numbers for the two players
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud {
    pub shield: [i32; 2],
    pub weapon: [i32; 2],
    pub wins: [u32; 2],
}

/// Read-only snapshot of one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub sprites: Vec<SpriteInstance>,
    pub hud: Hud,
}

/// Render errors; surfaced to the scheduler, which logs and continues
#[derive(Debug)]
pub enum RenderError {
    /// Output surface is gone (window closed, device lost)
    SurfaceLost,
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "render surface lost"),
            RenderError::Other(msg) => write!(f, "render error: {msg}"),
        }
    }
}

/// Platform drawing target
pub trait RenderSurface {
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError>;
}

/// Surface for headless runs: consumes frames without drawing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSurface for NullRenderer {
    fn render(&mut self, _frame: &RenderFrame) -> Result<(), RenderError> {
        Ok(())
    }
}
