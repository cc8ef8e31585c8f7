//! Game state and round lifecycle
//!
//! The scheduler owns one `GameState` and is its sole mutator. Rounds are
//! reset wholesale: every entity is reconstructed and the phase returns to
//! `Pre`; only the win counters and the RNG survive the reset.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::effects::FxQueue;
use super::entity::{Body, Heading, Layer, LayerMask, Planet, Projectile, Ship, ShipId};
use crate::audio::Sound;
use crate::consts::*;

/// Top-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, no simulation
    Pre,
    /// Simulation active
    Running,
    /// Simulation frozen, rendering continues
    Paused,
    /// Terminal; the process exits
    Over,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub planet: Planet,
    pub ships: [Ship; 2],
    pub slugs: Vec<Projectile>,
    pub torpedoes: Vec<Projectile>,
    pub fx: FxQueue,
    /// Rounds won per player; survives round resets
    pub wins: [u32; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        let mut state = GameState {
            phase: GamePhase::Pre,
            planet: Planet::new(),
            ships: [Self::spawn_ship(ShipId::P1), Self::spawn_ship(ShipId::P2)],
            slugs: Vec::new(),
            torpedoes: Vec::new(),
            fx: FxQueue::default(),
            wins: [0, 0],
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_round();
        state
    }

    /// Reinitialize every entity for a fresh round and return to the title
    /// screen. Win counters and the RNG are process-wide state and are
    /// deliberately left alone.
    pub fn reset_round(&mut self) {
        self.phase = GamePhase::Pre;
        self.planet = Planet::new();
        self.ships = [Self::spawn_ship(ShipId::P1), Self::spawn_ship(ShipId::P2)];
        self.slugs.clear();
        self.torpedoes.clear();
        self.fx.clear();
    }

    /// Starting ship layout: the players face each other across the well in
    /// opposing circular-ish orbits
    fn spawn_ship(id: ShipId) -> Ship {
        let mask = LayerMask::of(&[
            Layer::Planet,
            id.opponent().layer(),
            Layer::Slug,
            Layer::Torpedo,
        ]);
        let (pos, vel, heading) = match id {
            ShipId::P1 => (Vec2::new(400.0, 150.0), Vec2::new(3.0, 0.0), Heading::new(0)),
            ShipId::P2 => (Vec2::new(400.0, 450.0), Vec2::new(-3.0, 0.0), Heading::new(8)),
        };
        let body = Body::new(pos, SHIP_SIZE, SHIP_SIZE, id.layer(), mask);
        Ship::new(body, vel, heading)
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        &self.ships[id.index()]
    }

    pub fn ship_mut(&mut self, id: ShipId) -> &mut Ship {
        &mut self.ships[id.index()]
    }

    /// Fire a slug from the given ship's position along its heading
    ///
    /// Requires a positive weapon pool; the cost may drive it negative.
    /// Slugs are eligible against the planet, the opposing ship, and
    /// torpedoes, but not other slugs.
    pub fn fire_slug(&mut self, id: ShipId) {
        let ship = &mut self.ships[id.index()];
        if ship.weapon_energy <= 0 {
            return;
        }
        ship.weapon_energy -= SLUG_COST;

        let mask = LayerMask::of(&[Layer::Planet, id.opponent().layer(), Layer::Torpedo]);
        let body = Body::new(ship.body.pos, SLUG_SIZE, SLUG_SIZE, Layer::Slug, mask);
        let vel = ship.vel + ship.heading.dir() * SLUG_SPEED;
        self.slugs.push(Projectile::new(body, vel, ship.heading));
        self.fx.play(Sound::SlugLaunch);
    }

    /// Fire a torpedo; like slugs but bigger, costlier, and eligible
    /// against every projectile layer
    pub fn fire_torpedo(&mut self, id: ShipId) {
        let ship = &mut self.ships[id.index()];
        if ship.weapon_energy <= 0 {
            return;
        }
        ship.weapon_energy -= TORPEDO_COST;

        let mask = LayerMask::of(&[
            Layer::Planet,
            id.opponent().layer(),
            Layer::Slug,
            Layer::Torpedo,
        ]);
        let body = Body::new(
            ship.body.pos,
            TORPEDO_SIZE,
            TORPEDO_SIZE,
            Layer::Torpedo,
            mask,
        );
        let vel = ship.vel + ship.heading.dir() * TORPEDO_SPEED;
        self.torpedoes.push(Projectile::new(body, vel, ship.heading));
        self.fx.play(Sound::TorpedoLaunch);
    }

    /// Engage the cloak: invisible for the cloak duration
    pub fn cloak(&mut self, id: ShipId, now_secs: u64) {
        let ship = &mut self.ships[id.index()];
        if ship.weapon_energy >= CLOAK_COST {
            ship.last_cloak_secs = now_secs;
            ship.body.visible = false;
            ship.weapon_energy -= CLOAK_COST;
        }
    }

    /// Hyperspace jump to a uniformly random field position
    pub fn hyperspace(&mut self, id: ShipId) {
        if self.ships[id.index()].weapon_energy >= HYPERSPACE_COST {
            let x = self.rng.random::<f32>() * FIELD_WIDTH;
            let y = self.rng.random::<f32>() * FIELD_HEIGHT;
            let ship = &mut self.ships[id.index()];
            ship.body.pos = Vec2::new(x, y);
            ship.weapon_energy -= HYPERSPACE_COST;
            self.fx.play(Sound::ShipWarp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Pre);
        assert_eq!(state.ships[0].body.pos, Vec2::new(400.0, 150.0));
        assert_eq!(state.ships[1].body.pos, Vec2::new(400.0, 450.0));
        assert_eq!(state.ships[0].vel, Vec2::new(3.0, 0.0));
        assert_eq!(state.ships[1].vel, Vec2::new(-3.0, 0.0));
        assert_eq!(state.ships[1].heading.step(), 8);
        assert_eq!(state.planet.body.pos, FIELD_CENTER);
        assert!(state.slugs.is_empty() && state.torpedoes.is_empty());
    }

    #[test]
    fn test_fire_torpedo_spawn() {
        // Scenario: fresh ship fires a torpedo; energy drops to 45 and the
        // projectile inherits ship velocity plus muzzle speed on heading
        let mut state = GameState::new(1);
        state.fire_torpedo(ShipId::P1);

        assert_eq!(state.ship(ShipId::P1).weapon_energy, 45);
        assert_eq!(state.torpedoes.len(), 1);
        let torp = &state.torpedoes[0];
        assert_eq!(torp.body.layer, Layer::Torpedo);
        assert!(torp.body.collides_with.contains(Layer::Planet));
        assert!(torp.body.collides_with.contains(Layer::Player2));
        assert!(torp.body.collides_with.contains(Layer::Slug));
        assert!(torp.body.collides_with.contains(Layer::Torpedo));
        assert!(!torp.body.collides_with.contains(Layer::Player1));
        // Heading step 0: muzzle velocity is +X
        assert!((torp.vel.x - (3.0 + TORPEDO_SPEED)).abs() < 1e-5);
        assert!(torp.vel.y.abs() < 1e-5);
        assert_eq!(state.fx.sounds, vec![Sound::TorpedoLaunch]);
    }

    #[test]
    fn test_fire_slug_mask_excludes_slugs() {
        let mut state = GameState::new(1);
        state.fire_slug(ShipId::P2);

        assert_eq!(state.ship(ShipId::P2).weapon_energy, 49);
        let slug = &state.slugs[0];
        assert!(slug.body.collides_with.contains(Layer::Player1));
        assert!(!slug.body.collides_with.contains(Layer::Player2));
        assert!(!slug.body.collides_with.contains(Layer::Slug));
        // Heading step 8 is 180°: muzzle velocity is -X
        assert!((slug.vel.x - (-3.0 - SLUG_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_fire_requires_positive_weapon_pool() {
        let mut state = GameState::new(1);
        state.ship_mut(ShipId::P1).weapon_energy = 0;
        state.fire_slug(ShipId::P1);
        state.fire_torpedo(ShipId::P1);
        assert!(state.slugs.is_empty() && state.torpedoes.is_empty());

        // A pool of 1 is enough to fire a torpedo and goes negative
        state.ship_mut(ShipId::P1).weapon_energy = 1;
        state.fire_torpedo(ShipId::P1);
        assert_eq!(state.torpedoes.len(), 1);
        assert_eq!(state.ship(ShipId::P1).weapon_energy, 1 - TORPEDO_COST);
    }

    #[test]
    fn test_cloak_cost_and_visibility() {
        let mut state = GameState::new(1);
        state.cloak(ShipId::P1, 100);
        let ship = state.ship(ShipId::P1);
        assert!(!ship.body.visible);
        assert_eq!(ship.weapon_energy, SHIP_TOP_ENERGY - CLOAK_COST);
        assert_eq!(ship.last_cloak_secs, 100);

        // Too poor to cloak
        state.ship_mut(ShipId::P2).weapon_energy = CLOAK_COST - 1;
        state.cloak(ShipId::P2, 100);
        assert!(state.ship(ShipId::P2).body.visible);
    }

    #[test]
    fn test_hyperspace_moves_within_field() {
        let mut state = GameState::new(42);
        let before = state.ship(ShipId::P1).body.pos;
        state.hyperspace(ShipId::P1);
        let ship = state.ship(ShipId::P1);
        assert_ne!(ship.body.pos, before);
        assert!((0.0..FIELD_WIDTH).contains(&ship.body.pos.x));
        assert!((0.0..FIELD_HEIGHT).contains(&ship.body.pos.y));
        assert_eq!(ship.weapon_energy, SHIP_TOP_ENERGY - HYPERSPACE_COST);
        assert_eq!(state.fx.sounds, vec![Sound::ShipWarp]);
    }

    #[test]
    fn test_reset_preserves_wins() {
        let mut state = GameState::new(1);
        state.wins = [2, 5];
        state.fire_slug(ShipId::P1);
        state.phase = GamePhase::Running;

        state.reset_round();
        assert_eq!(state.wins, [2, 5]);
        assert_eq!(state.phase, GamePhase::Pre);
        assert!(state.slugs.is_empty());
        assert_eq!(state.ships[0].shield_energy, SHIP_TOP_ENERGY);
    }
}
