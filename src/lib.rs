//! Starwell - a two-player orbital space-combat arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, collisions, game state)
//! - `scheduler`: Fixed-period update/render loop with frame-skip compensation
//! - `renderer` / `assets` / `audio`: trait seams for the platform shell
//! - `settings`: User preferences persisted as JSON

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game tuning constants
pub mod consts {
    use glam::Vec2;

    /// Playing field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// The gravity well sits at the exact center of the field
    pub const FIELD_CENTER: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);

    /// Target simulation rate (one tick = one update)
    pub const UPDATES_PER_SEC: u32 = 60;
    /// Scheduler period in milliseconds
    pub const UPDATE_PERIOD_MS: f64 = 1000.0 / UPDATES_PER_SEC as f64;
    /// Cap on catch-up updates per loop iteration when rendering lags
    pub const MAX_FRAME_SKIPS: u32 = 5;

    /// Gravitational constant and central mass (tuned, not physical)
    pub const GRAVITY_G: f32 = 2.5;
    pub const GRAVITY_M: f32 = 2.5;

    /// Ship velocity magnitude cap, pixels per tick
    pub const SHIP_TOP_SPEED: f32 = 6.0;
    /// Size of each ship energy pool
    pub const SHIP_TOP_ENERGY: i32 = 50;
    /// Projectile muzzle speeds, pixels per tick (added to ship velocity)
    pub const SLUG_SPEED: f32 = 6.0;
    pub const TORPEDO_SPEED: f32 = 6.0;
    /// Cloak duration in wall-clock seconds
    pub const CLOAK_SECONDS: u64 = 4;

    /// Shield damage per collision kind
    pub const TORPEDO_DAMAGE: i32 = 10;
    pub const SLUG_DAMAGE: i32 = 5;
    pub const PLANET_DAMAGE: i32 = 5;
    pub const SHIP_DAMAGE: i32 = 2;

    /// Weapon-energy costs
    pub const SLUG_COST: i32 = 1;
    pub const TORPEDO_COST: i32 = 5;
    pub const CLOAK_COST: i32 = 10;
    pub const HYPERSPACE_COST: i32 = 10;

    /// Entity sizes (collision circle diameters)
    pub const PLANET_SIZE: i32 = 100;
    pub const SHIP_SIZE: i32 = 20;
    pub const SLUG_SIZE: i32 = 2;
    pub const TORPEDO_SIZE: i32 = 8;
}
