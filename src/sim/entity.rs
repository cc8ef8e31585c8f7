//! Entity model: collision layers, headings, and the three entity kinds
//!
//! Everything that moves or can be hit is one of three kinds: the planet
//! (immobile, indestructible), projectiles (move, die, no energy), and
//! ships (move, die, carry energy pools and a player behind them).

use glam::Vec2;

use crate::consts::*;

/// Which of the two ships an entity or command refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipId {
    P1,
    P2,
}

impl ShipId {
    pub fn index(self) -> usize {
        match self {
            ShipId::P1 => 0,
            ShipId::P2 => 1,
        }
    }

    pub fn opponent(self) -> ShipId {
        match self {
            ShipId::P1 => ShipId::P2,
            ShipId::P2 => ShipId::P1,
        }
    }

    /// The collision layer this ship occupies
    pub fn layer(self) -> Layer {
        match self {
            ShipId::P1 => Layer::Player1,
            ShipId::P2 => Layer::Player2,
        }
    }
}

/// Collision layer an entity occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Planet,
    Player1,
    Player2,
    Slug,
    Torpedo,
}

impl Layer {
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of layers an entity is eligible to collide with
///
/// A bitmask so the eligibility gate is two O(1) bit tests instead of a
/// pair of array scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerMask(u8);

impl LayerMask {
    pub const EMPTY: LayerMask = LayerMask(0);

    pub fn of(layers: &[Layer]) -> Self {
        let mut bits = 0;
        for layer in layers {
            bits |= layer.bit();
        }
        LayerMask(bits)
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }
}

/// Number of discrete rotation steps in a full turn
pub const HEADING_STEPS: i32 = 16;
/// Degrees per rotation step
pub const HEADING_STEP_DEG: f32 = 22.5;

/// Discrete heading, 16 steps of 22.5° each
///
/// The raw step count is unbounded (rotating left past zero goes negative);
/// `step()` folds it into 0..16 for sprite lookup. Step 0 points along +X,
/// steps increase clockwise on screen (Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heading(i32);

impl Heading {
    pub fn new(steps: i32) -> Self {
        Heading(steps)
    }

    /// Folded step index in 0..16
    pub fn step(self) -> i32 {
        self.0.rem_euclid(HEADING_STEPS)
    }

    pub fn rotate(&mut self, delta: i32) {
        self.0 += delta;
    }

    /// Heading angle in radians
    pub fn angle(self) -> f32 {
        (self.0 as f32 * HEADING_STEP_DEG).to_radians()
    }

    /// Unit direction vector in screen coordinates
    pub fn dir(self) -> Vec2 {
        let angle = self.angle();
        Vec2::new(angle.cos(), angle.sin())
    }
}

/// Position, size, visibility, and collision-layer configuration
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    /// Collision circle diameter
    pub width: i32,
    pub height: i32,
    pub visible: bool,
    pub layer: Layer,
    pub collides_with: LayerMask,
}

impl Body {
    /// An entity never collides with itself, but a mask may include the
    /// body's own layer: torpedoes are eligible against other torpedoes.
    /// Ships, slugs, and the planet carry masks excluding their own layer.
    pub fn new(pos: Vec2, width: i32, height: i32, layer: Layer, collides_with: LayerMask) -> Self {
        Body {
            pos,
            width,
            height,
            visible: true,
            layer,
            collides_with,
        }
    }

    /// Collision circle radius
    pub fn radius(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// A slug or torpedo: moves under gravity, dies on any contact
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub vel: Vec2,
    pub alive: bool,
    pub heading: Heading,
}

impl Projectile {
    pub fn new(body: Body, vel: Vec2, heading: Heading) -> Self {
        Projectile {
            body,
            vel,
            alive: true,
            heading,
        }
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Which pool received the last regeneration point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenPool {
    Shield,
    Weapon,
}

/// A player ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub vel: Vec2,
    pub alive: bool,
    pub heading: Heading,
    /// Velocity magnitude cap, pixels per tick
    pub top_speed: f32,
    /// Capacity of each energy pool
    pub top_energy: i32,
    pub weapon_energy: i32,
    /// Crossing below zero kills the ship
    pub shield_energy: i32,
    last_regenerated: RegenPool,
    /// Wall-clock second of the last regeneration tick
    pub last_regen_secs: u64,
    /// Wall-clock second the cloak was engaged
    pub last_cloak_secs: u64,
}

impl Ship {
    pub fn new(body: Body, vel: Vec2, heading: Heading) -> Self {
        Ship {
            body,
            vel,
            alive: true,
            heading,
            top_speed: SHIP_TOP_SPEED,
            top_energy: SHIP_TOP_ENERGY,
            weapon_energy: SHIP_TOP_ENERGY,
            shield_energy: SHIP_TOP_ENERGY,
            last_regenerated: RegenPool::Weapon,
            last_regen_secs: 0,
            last_cloak_secs: 0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn rotate(&mut self, delta: i32) {
        self.heading.rotate(delta);
    }

    /// One unit of thrust along the current heading
    ///
    /// Unlike gravity, thrust that would push the ship past its speed cap is
    /// rejected outright rather than scaled back.
    pub fn thrust(&mut self) {
        let candidate = self.vel + self.heading.dir();
        if candidate.length() <= self.top_speed {
            self.vel = candidate;
        }
    }

    /// Subtract shield points; crossing below zero destroys and hides the
    /// ship in the same step. An already-negative pool takes no further
    /// subtraction.
    pub fn damage(&mut self, points: i32) {
        if self.shield_energy >= 0 {
            self.shield_energy -= points;
        }
        if self.shield_energy < 0 {
            self.body.visible = false;
            self.alive = false;
        }
    }

    /// One regeneration point, alternating between the pools until one is
    /// full, then feeding only the other
    pub fn regen(&mut self) {
        if self.last_regenerated == RegenPool::Shield || self.shield_energy == self.top_energy {
            if self.weapon_energy < self.top_energy {
                self.weapon_energy += 1;
            }
            self.last_regenerated = RegenPool::Weapon;
        } else if self.last_regenerated == RegenPool::Weapon
            || self.weapon_energy == self.top_energy
        {
            if self.shield_energy < self.top_energy {
                self.shield_energy += 1;
            }
            self.last_regenerated = RegenPool::Shield;
        }
    }

    pub fn transfer_weapon_to_shield(&mut self) {
        if self.weapon_energy > 0 && self.shield_energy < self.top_energy {
            self.weapon_energy -= 1;
            self.shield_energy += 1;
        }
    }

    pub fn transfer_shield_to_weapon(&mut self) {
        if self.shield_energy > 0 && self.weapon_energy < self.top_energy {
            self.shield_energy -= 1;
            self.weapon_energy += 1;
        }
    }
}

/// The central gravity well: immobile, indestructible, one per round
#[derive(Debug, Clone)]
pub struct Planet {
    pub body: Body,
}

impl Planet {
    pub fn new() -> Self {
        Planet {
            body: Body::new(
                FIELD_CENTER,
                PLANET_SIZE,
                PLANET_SIZE,
                Layer::Planet,
                LayerMask::of(&[Layer::Player1, Layer::Player2, Layer::Slug, Layer::Torpedo]),
            ),
        }
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::new()
    }
}
