//! Tuning values and asset file names.  World units are pixels of the
//! 500×500 play field.

// ── World ────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: i32 = 500;
pub const WORLD_HEIGHT: i32 = 500;
pub const WINDOW_TITLE: &str = "Top-Down Scroller Example";

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: i32 = 250;
pub const PLAYER_START_Y: i32 = 436;
pub const PLAYER_WIDTH: i32 = 64;
pub const PLAYER_HEIGHT: i32 = 64;
pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_MIN_X: i32 = 0;
pub const PLAYER_MAX_X: i32 = 436;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const PROJECTILE_SPEED: i32 = -10;
/// Frames between shots.
pub const SHOOT_COOLDOWN: u32 = 15;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_SPEED: i32 = 2;
pub const ENEMY_SPAWN_Y: i32 = -64;
/// Spawn x is drawn from `0..ENEMY_SPAWN_MAX_X`.
pub const ENEMY_SPAWN_MAX_X: i32 = 436;
/// Enemies past this row are discarded.
pub const ENEMY_BOTTOM_Y: i32 = 500;
pub const ENEMY_SPAWN_INTERVAL: u32 = 200;

// ── Scoring & scrolling ──────────────────────────────────────────────────────

pub const WIN_SCORE: u32 = 30;
pub const SCROLL_STEP: i32 = 4;
/// Copies of the background drawn per frame.
pub const BACKGROUND_REPEAT: i32 = 3;

// ── Asset file names (relative to the working directory) ─────────────────────

pub const BACKGROUND_IMAGE: &str = "Nebula Aqua-Pink.png";
pub const PLAYER_IMAGE: &str = "Spaceship_05_ORANGE.png";
pub const PROJECTILE_IMAGE: &str = "28.png";
pub const ENEMY_IMAGE: &str = "Spaceship_05_Orange.png";
