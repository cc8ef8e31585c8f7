//! Gravitational integrator and field wrapping
//!
//! One tick advances velocity by the central body's pull, then position by
//! velocity (velocities are in pixels per tick), then wraps at the field
//! edges. Ships additionally respect a speed cap; projectiles do not.

use glam::Vec2;

use super::entity::{Projectile, Ship};
use crate::consts::*;

/// Acceleration toward the field center for an entity at `pos`
///
/// `a = G·M·d / r²` per component. No softening term: an entity exactly at
/// the center divides by zero, but the planet occupies that point and
/// collision handling bounces or destroys entities first.
pub fn gravity_accel(pos: Vec2) -> Vec2 {
    let d = FIELD_CENTER - pos;
    let r_sq = d.length_squared();
    (GRAVITY_G * GRAVITY_M) * d / r_sq
}

/// Wrap a position at the field edges
///
/// The boundary comparisons are deliberately asymmetric between the axes
/// (`<=`/`>=` on X, `<`/`>=` on Y); behavior at the exact boundary pixel is
/// observable and kept as-is.
pub fn wrap_position(pos: &mut Vec2) {
    if pos.x <= 0.0 {
        pos.x = FIELD_WIDTH;
    } else if pos.x >= FIELD_WIDTH {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = FIELD_HEIGHT;
    } else if pos.y >= FIELD_HEIGHT {
        pos.y = 0.0;
    }
}

/// Advance a projectile one tick: gravity, move, wrap
///
/// Projectiles have no speed cap; gravity can sling them arbitrarily fast.
pub fn integrate_projectile(p: &mut Projectile) {
    p.vel += gravity_accel(p.body.pos);
    p.body.pos += p.vel;
    wrap_position(&mut p.body.pos);
}

/// Advance a ship one tick: gravity, cap, move, wrap
///
/// Gravity still acts on a ship already at its speed cap, so the candidate
/// velocity is scaled back to the cap rather than rejected (the opposite of
/// thrust, which is an all-or-nothing change).
pub fn integrate_ship(ship: &mut Ship) {
    let candidate = ship.vel + gravity_accel(ship.body.pos);
    let speed = candidate.length();
    ship.vel = if speed <= ship.top_speed {
        candidate
    } else {
        candidate * (ship.top_speed / speed)
    };
    ship.body.pos += ship.vel;
    wrap_position(&mut ship.body.pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Body, Heading, Layer, LayerMask};
    use proptest::prelude::*;

    fn ship_at(pos: Vec2, vel: Vec2) -> Ship {
        let body = Body::new(
            pos,
            SHIP_SIZE,
            SHIP_SIZE,
            Layer::Player1,
            LayerMask::of(&[Layer::Planet, Layer::Player2, Layer::Slug, Layer::Torpedo]),
        );
        Ship::new(body, vel, Heading::default())
    }

    fn slug_at(pos: Vec2, vel: Vec2) -> Projectile {
        let body = Body::new(
            pos,
            SLUG_SIZE,
            SLUG_SIZE,
            Layer::Slug,
            LayerMask::of(&[Layer::Planet, Layer::Player2, Layer::Torpedo]),
        );
        Projectile::new(body, vel, Heading::default())
    }

    #[test]
    fn test_gravity_points_at_center() {
        // Directly above the center: pull is straight down, a = G·M/r
        let a = gravity_accel(Vec2::new(400.0, 150.0));
        assert!(a.x.abs() < 1e-6);
        assert!((a.y - GRAVITY_G * GRAVITY_M / 150.0).abs() < 1e-6);

        // Left of center: pull is straight right
        let a = gravity_accel(Vec2::new(200.0, 300.0));
        assert!(a.x > 0.0);
        assert!(a.y.abs() < 1e-6);
    }

    #[test]
    fn test_wrap_boundary_semantics() {
        // X: inclusive on both edges
        let mut p = Vec2::new(0.0, 100.0);
        wrap_position(&mut p);
        assert_eq!(p.x, FIELD_WIDTH);

        let mut p = Vec2::new(-3.0, 100.0);
        wrap_position(&mut p);
        assert_eq!(p.x, FIELD_WIDTH);

        let mut p = Vec2::new(FIELD_WIDTH, 100.0);
        wrap_position(&mut p);
        assert_eq!(p.x, 0.0);

        // Y: zero stays put, the bottom edge wraps
        let mut p = Vec2::new(100.0, 0.0);
        wrap_position(&mut p);
        assert_eq!(p.y, 0.0);

        let mut p = Vec2::new(100.0, -0.1);
        wrap_position(&mut p);
        assert_eq!(p.y, FIELD_HEIGHT);

        let mut p = Vec2::new(100.0, FIELD_HEIGHT);
        wrap_position(&mut p);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_ship_capped_even_when_gravity_pushes_past() {
        // Already at the cap, gravity pulling roughly along the velocity
        let mut ship = ship_at(Vec2::new(400.0, 150.0), Vec2::new(0.0, SHIP_TOP_SPEED));
        integrate_ship(&mut ship);
        assert!(ship.speed() <= SHIP_TOP_SPEED + 1e-4);
        // Direction is preserved by the scale-back
        assert!(ship.vel.y > 0.0);
    }

    #[test]
    fn test_projectile_has_no_cap() {
        // Falling straight at the well from close range
        let mut slug = slug_at(Vec2::new(400.0, 240.0), Vec2::new(0.0, 7.0));
        let before = slug.vel.length();
        integrate_projectile(&mut slug);
        assert!(slug.vel.length() > before);
        assert!(slug.vel.length() > SHIP_TOP_SPEED);
    }

    proptest! {
        #[test]
        fn prop_ship_speed_never_exceeds_cap(
            x in 1.0f32..799.0,
            y in 1.0f32..599.0,
            vx in -6.0f32..6.0,
            vy in -6.0f32..6.0,
        ) {
            // Keep clear of the planet interior where gravity blows up;
            // collision handling owns that region.
            prop_assume!((Vec2::new(x, y) - FIELD_CENTER).length() > 60.0);
            let mut ship = ship_at(Vec2::new(x, y), Vec2::new(vx, vy));
            for _ in 0..50 {
                integrate_ship(&mut ship);
                prop_assert!(ship.speed() <= SHIP_TOP_SPEED + 1e-3);
            }
        }

        #[test]
        fn prop_positions_stay_in_field(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -6.0f32..6.0,
            vy in -6.0f32..6.0,
        ) {
            prop_assume!((Vec2::new(x, y) - FIELD_CENTER).length() > 60.0);
            let mut slug = slug_at(Vec2::new(x, y), Vec2::new(vx, vy));
            for _ in 0..10 {
                integrate_projectile(&mut slug);
                // Wrap is modular, not a clamp; the X edge itself is
                // reachable for exactly one tick after wrapping.
                prop_assert!((0.0..=FIELD_WIDTH).contains(&slug.body.pos.x));
                prop_assert!((0.0..=FIELD_HEIGHT).contains(&slug.body.pos.y));
            }
        }
    }
}
