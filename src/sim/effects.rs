//! Transient visual effects and sound events
//!
//! Effects are render hints: explosions and shield flickers that live for a
//! fixed number of ticks. An effect can follow a ship through a weak
//! `ShipId` anchor resolved against the ship table each frame; it never
//! owns the ship or extends its lifetime. Sounds are fire-and-forget events
//! drained by the scheduler into the audio sink once per iteration.

use glam::Vec2;

use super::entity::{Ship, ShipId};
use crate::audio::Sound;
use crate::consts::UPDATES_PER_SEC;

/// Visual effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Explosion,
    ShieldFlicker,
}

impl EffectKind {
    /// Lifetime in ticks (explosions run 1 s, flickers 0.1 s)
    pub fn duration_ticks(self) -> u32 {
        match self {
            EffectKind::Explosion => UPDATES_PER_SEC,
            EffectKind::ShieldFlicker => UPDATES_PER_SEC / 10,
        }
    }
}

/// Where an effect is drawn
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// Fixed field position (projectile explosions)
    Fixed(Vec2),
    /// Follows a ship; resolved each frame, weakly
    Ship(ShipId),
}

/// One transient visual effect
#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub anchor: Anchor,
    pub age_ticks: u32,
}

impl Effect {
    pub fn expired(&self) -> bool {
        self.age_ticks >= self.kind.duration_ticks()
    }

    /// Current draw position, following the anchored ship if any
    pub fn resolve_pos(&self, ships: &[Ship; 2]) -> Vec2 {
        match self.anchor {
            Anchor::Fixed(pos) => pos,
            Anchor::Ship(id) => ships[id.index()].body.pos,
        }
    }
}

/// Per-tick effect and sound output of the simulation
#[derive(Debug, Clone, Default)]
pub struct FxQueue {
    pub effects: Vec<Effect>,
    pub sounds: Vec<Sound>,
}

impl FxQueue {
    pub fn explosion_at(&mut self, pos: Vec2) {
        self.effects.push(Effect {
            kind: EffectKind::Explosion,
            anchor: Anchor::Fixed(pos),
            age_ticks: 0,
        });
    }

    pub fn explosion_on(&mut self, ship: ShipId) {
        self.effects.push(Effect {
            kind: EffectKind::Explosion,
            anchor: Anchor::Ship(ship),
            age_ticks: 0,
        });
    }

    pub fn shield_flicker(&mut self, ship: ShipId) {
        self.effects.push(Effect {
            kind: EffectKind::ShieldFlicker,
            anchor: Anchor::Ship(ship),
            age_ticks: 0,
        });
    }

    pub fn play(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    /// Age all effects one tick and drop the expired ones
    pub fn step(&mut self) {
        for effect in &mut self.effects {
            effect.age_ticks += 1;
        }
        self.effects.retain(|e| !e.expired());
    }

    pub fn clear(&mut self) {
        self.effects.clear();
        self.sounds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{Body, Heading, Layer, LayerMask};

    fn ships() -> [Ship; 2] {
        let mk = |pos: Vec2, layer: Layer, other: Layer| {
            let body = Body::new(
                pos,
                SHIP_SIZE,
                SHIP_SIZE,
                layer,
                LayerMask::of(&[Layer::Planet, other, Layer::Slug, Layer::Torpedo]),
            );
            Ship::new(body, Vec2::ZERO, Heading::default())
        };
        [
            mk(Vec2::new(400.0, 150.0), Layer::Player1, Layer::Player2),
            mk(Vec2::new(400.0, 450.0), Layer::Player2, Layer::Player1),
        ]
    }

    #[test]
    fn test_effects_expire_after_duration() {
        let mut fx = FxQueue::default();
        fx.shield_flicker(ShipId::P1);
        fx.explosion_at(Vec2::new(10.0, 10.0));

        for _ in 0..EffectKind::ShieldFlicker.duration_ticks() {
            fx.step();
        }
        assert_eq!(fx.effects.len(), 1); // flicker gone, explosion remains

        for _ in 0..EffectKind::Explosion.duration_ticks() {
            fx.step();
        }
        assert!(fx.effects.is_empty());
    }

    #[test]
    fn test_ship_anchor_follows_position() {
        let mut ships = ships();
        let mut fx = FxQueue::default();
        fx.shield_flicker(ShipId::P2);

        ships[1].body.pos = Vec2::new(123.0, 45.0);
        assert_eq!(fx.effects[0].resolve_pos(&ships), Vec2::new(123.0, 45.0));
    }
}
