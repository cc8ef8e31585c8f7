//! Pairwise collision detection
//!
//! Two entities collide when the layer-eligibility gate passes in both
//! directions and their collision circles intersect. The test is a pure
//! function of the two bodies; all mutation happens in the response rules.

use super::entity::Body;

/// Symmetric layer-eligibility gate
///
/// A is eligible against B only if A's layer is in B's mask AND B's layer
/// is in A's mask. Requiring both directions makes an asymmetric mask
/// configuration (a latent bug class) fail closed.
pub fn eligible(a: &Body, b: &Body) -> bool {
    b.collides_with.contains(a.layer) && a.collides_with.contains(b.layer)
}

/// True iff the pair is layer-eligible and the circles touch or overlap
pub fn test_collision(a: &Body, b: &Body) -> bool {
    eligible(a, b) && a.pos.distance(b.pos) <= a.radius() + b.radius()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Layer, LayerMask};
    use glam::Vec2;

    fn body(pos: Vec2, width: i32, layer: Layer, mask: &[Layer]) -> Body {
        Body::new(pos, width, width, layer, LayerMask::of(mask))
    }

    #[test]
    fn test_overlapping_eligible_pair_collides() {
        let a = body(Vec2::new(100.0, 100.0), 20, Layer::Player1, &[Layer::Player2]);
        let b = body(Vec2::new(110.0, 100.0), 20, Layer::Player2, &[Layer::Player1]);
        assert!(test_collision(&a, &b));
        assert!(test_collision(&b, &a));
    }

    #[test]
    fn test_touching_circles_collide() {
        // Distance exactly equal to the radius sum counts as a hit
        let a = body(Vec2::new(100.0, 100.0), 20, Layer::Player1, &[Layer::Player2]);
        let b = body(Vec2::new(120.0, 100.0), 20, Layer::Player2, &[Layer::Player1]);
        assert!(test_collision(&a, &b));
    }

    #[test]
    fn test_distant_pair_misses() {
        let a = body(Vec2::new(100.0, 100.0), 20, Layer::Player1, &[Layer::Player2]);
        let b = body(Vec2::new(200.0, 100.0), 20, Layer::Player2, &[Layer::Player1]);
        assert!(!test_collision(&a, &b));
    }

    #[test]
    fn test_asymmetric_masks_fail_closed() {
        // B accepts A but A ignores B: overlapping, yet no collision
        let a = body(Vec2::new(100.0, 100.0), 20, Layer::Slug, &[Layer::Planet]);
        let b = body(Vec2::new(105.0, 100.0), 20, Layer::Player2, &[Layer::Slug]);
        assert!(!test_collision(&a, &b));
        assert!(!test_collision(&b, &a));
    }

    #[test]
    fn test_collision_test_is_idempotent() {
        let a = body(Vec2::new(100.0, 100.0), 20, Layer::Player1, &[Layer::Player2]);
        let b = body(Vec2::new(110.0, 100.0), 20, Layer::Player2, &[Layer::Player1]);
        let first = test_collision(&a, &b);
        assert_eq!(first, test_collision(&a, &b));
    }
}
