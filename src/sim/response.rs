//! Collision response rules
//!
//! One rule per entity-kind pair, all six combinations enumerated so each
//! outcome is testable in isolation:
//!
//! - ship vs ship: elastic bounce (swap normal components), 2 damage each
//! - ship vs projectile: projectile dies, ship takes 5 (slug) or 10
//!   (torpedo) damage, velocity unchanged
//! - ship vs planet: elastic bounce off an immovable body, 5 damage
//! - projectile vs projectile: both die
//! - projectile vs planet: projectile dies
//! - planet vs planet: never (one planet, and it cannot move)
//!
//! Every rule starts with `test_collision` and does nothing on a miss, so
//! callers can fire rules unconditionally for each candidate pair.

use glam::Vec2;

use super::collision::test_collision;
use super::effects::FxQueue;
use super::entity::{Layer, Planet, Projectile, Ship, ShipId};
use crate::audio::Sound;
use crate::consts::*;

/// Decompose `vel` against the unit normal `n`, returning (normal,
/// tangential) scalar components. The tangent is `n` rotated 90° CCW.
fn decompose(vel: Vec2, n: Vec2) -> (f32, f32) {
    let t = Vec2::new(-n.y, n.x);
    (vel.dot(n), vel.dot(t))
}

fn recompose(v_n: f32, v_t: f32, n: Vec2) -> Vec2 {
    let t = Vec2::new(-n.y, n.x);
    n * v_n + t * v_t
}

/// Shield flicker on survival, explosion and sound on death
fn ship_hit_feedback(ship: &Ship, id: ShipId, fx: &mut FxQueue) {
    if ship.alive {
        fx.shield_flicker(id);
    } else {
        fx.explosion_on(id);
        fx.play(Sound::ShipExplosion);
    }
}

/// Ship vs ship: elastic exchange for equal effective mass
///
/// Each ship keeps its own tangential component and takes the other's
/// normal component; the recombined velocity is clamped to that ship's
/// speed cap (the exchange can exceed it). Both take fixed damage.
pub fn ship_ship(a: &mut Ship, b: &mut Ship, ids: (ShipId, ShipId), fx: &mut FxQueue) -> bool {
    if !test_collision(&a.body, &b.body) {
        return false;
    }

    // Coincident centers give a degenerate normal; fall back to +X, which
    // matches atan2(0, 0) = 0
    let n = (b.body.pos - a.body.pos).normalize_or(Vec2::X);
    let (a_n, a_t) = decompose(a.vel, n);
    let (b_n, b_t) = decompose(b.vel, n);

    a.vel = recompose(b_n, a_t, n).clamp_length_max(a.top_speed);
    b.vel = recompose(a_n, b_t, n).clamp_length_max(b.top_speed);

    a.damage(SHIP_DAMAGE);
    b.damage(SHIP_DAMAGE);
    ship_hit_feedback(a, ids.0, fx);
    ship_hit_feedback(b, ids.1, fx);
    true
}

/// Ship vs projectile: absorption
///
/// The projectile always dies. Damage depends on its layer; a torpedo also
/// detonates visibly at its own position. Ship velocity is unaffected.
pub fn ship_projectile(ship: &mut Ship, id: ShipId, proj: &mut Projectile, fx: &mut FxQueue) -> bool {
    if !test_collision(&ship.body, &proj.body) {
        return false;
    }

    if proj.body.layer == Layer::Slug {
        ship.damage(SLUG_DAMAGE);
    } else {
        fx.explosion_at(proj.body.pos);
        fx.play(Sound::TorpedoExplosion);
        ship.damage(TORPEDO_DAMAGE);
    }
    proj.destroy();
    ship_hit_feedback(ship, id, fx);
    true
}

/// Ship vs planet: elastic bounce off an immovable body
///
/// The normal component of the ship's velocity is negated, the tangential
/// one kept. No clamp needed: a bounce cannot increase speed. A dead ship
/// short-circuits out before the geometry test; a corpse trapped inside
/// the planet's radius would otherwise retrigger explosions forever and
/// hold up the round reset.
pub fn ship_planet(ship: &mut Ship, id: ShipId, planet: &Planet, fx: &mut FxQueue) -> bool {
    if !ship.alive {
        return false;
    }
    if !test_collision(&ship.body, &planet.body) {
        return false;
    }

    let n = (planet.body.pos - ship.body.pos).normalize_or(Vec2::X);
    let (v_n, v_t) = decompose(ship.vel, n);
    ship.vel = recompose(-v_n, v_t, n);

    ship.damage(PLANET_DAMAGE);
    ship_hit_feedback(ship, id, fx);
    true
}

/// Projectile vs projectile: mutual destruction, no velocity changes
///
/// Torpedoes detonate visibly at their own position; slugs just vanish.
pub fn projectile_projectile(a: &mut Projectile, b: &mut Projectile, fx: &mut FxQueue) -> bool {
    if !test_collision(&a.body, &b.body) {
        return false;
    }

    if a.body.layer == Layer::Torpedo {
        fx.explosion_at(a.body.pos);
        fx.play(Sound::TorpedoExplosion);
    }
    if b.body.layer == Layer::Torpedo {
        fx.explosion_at(b.body.pos);
        fx.play(Sound::TorpedoExplosion);
    }
    a.destroy();
    b.destroy();
    true
}

/// Projectile vs planet: the projectile dies, the planet is unaffected
pub fn projectile_planet(proj: &mut Projectile, planet: &Planet, fx: &mut FxQueue) -> bool {
    if !test_collision(&proj.body, &planet.body) {
        return false;
    }

    if proj.body.layer == Layer::Torpedo {
        fx.explosion_at(proj.body.pos);
        fx.play(Sound::TorpedoExplosion);
    }
    proj.destroy();
    true
}

/// Planet vs planet: structurally impossible, always a miss
pub fn planet_planet(_a: &Planet, _b: &Planet) -> bool {
    false
}
