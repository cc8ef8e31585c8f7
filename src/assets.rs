//! Asset seam
//!
//! Sprites live on the platform side; the core only ever handles opaque
//! handles. A missing or corrupt asset is logged by the provider and shows
//! up here as `None`, which renders as nothing - never a failed tick.

/// Sprite identities the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Ship1,
    Ship2,
    Slug,
    Torpedo,
    Planet,
    Starfield,
    Explosion,
    ShieldFlicker,
}

/// Opaque handle into the platform's bitmap store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteHandle(pub u32);

/// Platform sprite store
pub trait AssetProvider {
    /// Base bitmap for a sprite kind, or `None` if the asset is missing
    fn sprite(&self, kind: SpriteKind) -> Option<SpriteHandle>;

    /// Bitmap rotated to a heading step (step × 22.5°). Providers typically
    /// cache all 16 rotations per base sprite.
    fn rotated(&self, base: SpriteHandle, heading_step: i32) -> Option<SpriteHandle>;
}

/// Provider for headless runs: every asset is missing
#[derive(Debug, Default)]
pub struct NullAssets;

impl AssetProvider for NullAssets {
    fn sprite(&self, _kind: SpriteKind) -> Option<SpriteHandle> {
        None
    }

    fn rotated(&self, _base: SpriteHandle, _heading_step: i32) -> Option<SpriteHandle> {
        None
    }
}
