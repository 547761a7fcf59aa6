//! All game entity types — pure data, no logic.

use std::rc::Rc;

use crate::assets::Sprite;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Collision geometry ───────────────────────────────────────────────────────

/// Axis-aligned box in world pixels.  `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        BoundingBox {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub sprite: Rc<Sprite>,
}

// ── Projectiles & enemies ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    /// Pixels added to `y` each frame (negative = upward).
    pub speed: i32,
    pub active: bool,
    pub sprite: Rc<Sprite>,
}

impl Projectile {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.sprite.width, self.sprite.height)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub active: bool,
    pub sprite: Rc<Sprite>,
}

impl Enemy {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.sprite.width, self.sprite.height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original; sprites are shared.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub background: Rc<Sprite>,
    /// Vertical background offset, always in `0..2 * background.height`.
    pub scroll_offset: i32,
    /// Frames since the last enemy spawn.
    pub spawn_timer: u32,
    /// Frames until the player may fire again.
    pub shoot_cooldown: u32,
    pub score: u32,
}
