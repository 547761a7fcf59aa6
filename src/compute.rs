//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Side effects are limited
//! to the injected RNG and the sprite cache, which may touch the disk the
//! first time a projectile or enemy sprite is needed.

use std::rc::Rc;

use rand::Rng;

use crate::assets::{Assets, Sprite, SpriteLoader};
use crate::constants::{
    ENEMY_BOTTOM_Y, ENEMY_IMAGE, ENEMY_SPAWN_INTERVAL, ENEMY_SPAWN_MAX_X, ENEMY_SPAWN_Y,
    ENEMY_SPEED, PLAYER_HEIGHT, PLAYER_MAX_X, PLAYER_MIN_X, PLAYER_SPEED, PLAYER_START_X,
    PLAYER_START_Y, PLAYER_WIDTH, PROJECTILE_IMAGE, PROJECTILE_SPEED, SCROLL_STEP,
    SHOOT_COOLDOWN, WIN_SCORE,
};
use crate::entities::{Enemy, GameState, Input, Player, Projectile};
use crate::error::AssetError;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state around the already-loaded player and
/// background sprites.
pub fn init_state(player_sprite: Rc<Sprite>, background: Rc<Sprite>) -> GameState {
    GameState {
        player: Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            sprite: player_sprite,
        },
        projectiles: Vec::new(),
        enemies: Vec::new(),
        background,
        scroll_offset: 0,
        spawn_timer: 0,
        shoot_cooldown: 0,
        score: 0,
    }
}

/// Host layout hook: the screen is always the size of the window.
pub fn layout(outside_width: u16, outside_height: u16) -> (u16, u16) {
    (outside_width, outside_height)
}

/// Once the win score is reached the player is frozen and no new enemies
/// appear.
pub fn is_won(state: &GameState) -> bool {
    state.score >= WIN_SCORE
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let new_x = (state.player.x - PLAYER_SPEED).max(PLAYER_MIN_X);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let new_x = (state.player.x + PLAYER_SPEED).min(PLAYER_MAX_X);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// True when a fire request this frame would produce a projectile.
pub fn can_shoot(state: &GameState) -> bool {
    !is_won(state) && state.shoot_cooldown == 0
}

/// Fire a projectile from the player's horizontal centre and restart the
/// cooldown.  A no-op while the cooldown is running or the game is won.
pub fn player_shoot(state: &GameState, sprite: Rc<Sprite>) -> GameState {
    if !can_shoot(state) {
        return state.clone();
    }
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        x: state.player.x + state.player.width / 2,
        y: state.player.y,
        speed: PROJECTILE_SPEED,
        active: true,
        sprite,
    });
    GameState {
        projectiles,
        shoot_cooldown: SHOOT_COOLDOWN,
        ..state.clone()
    }
}

/// Append an enemy at `x` just above the visible area.
pub fn spawn_enemy(state: &GameState, sprite: Rc<Sprite>, x: i32) -> GameState {
    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x,
        y: ENEMY_SPAWN_Y,
        speed: ENEMY_SPEED,
        active: true,
        sprite,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict bounding-box overlap using each sprite's pixel size.
pub fn check_collision(projectile: &Projectile, enemy: &Enemy) -> bool {
    projectile.bounds().overlaps(&enemy.bounds())
}

/// Pair every projectile with the first still-alive enemy it overlaps.
/// Both are deactivated, then removed in a separate compacting pass.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut projectiles = state.projectiles.clone();
    let mut enemies = state.enemies.clone();
    let mut hits: u32 = 0;

    for projectile in projectiles.iter_mut() {
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.active && check_collision(projectile, e))
        {
            log::trace!(
                "projectile at ({}, {}) hit enemy at ({}, {})",
                projectile.x,
                projectile.y,
                enemy.x,
                enemy.y
            );
            enemy.active = false;
            projectile.active = false;
            hits += 1;
        }
    }

    projectiles.retain(|p| p.active);
    enemies.retain(|e| e.active);

    GameState {
        projectiles,
        enemies,
        score: state.score + hits,
        ..state.clone()
    }
}

// ── Scrolling ────────────────────────────────────────────────────────────────

/// Advance the scroll offset, wrapping at twice the background height.
pub fn advance_scroll(offset: i32, background_height: i32) -> i32 {
    let wrap = background_height * 2;
    let next = offset + SCROLL_STEP;
    if wrap > 0 {
        next % wrap
    } else {
        next
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Fails only when a projectile or enemy sprite has to be loaded and the
/// load fails; the state passed in is left untouched in that case.
pub fn update<L: SpriteLoader>(
    state: &GameState,
    input: &Input,
    assets: &mut Assets<L>,
    rng: &mut impl Rng,
) -> Result<GameState, AssetError> {
    // ── 1. Move player ───────────────────────────────────────────────────────
    let mut next = state.clone();
    if !is_won(&next) {
        if input.left {
            next = move_player_left(&next);
        }
        if input.right {
            next = move_player_right(&next);
        }
    }

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    if input.fire && can_shoot(&next) {
        let sprite = assets.get(PROJECTILE_IMAGE)?;
        next = player_shoot(&next, sprite);
        log::debug!("projectile fired from x={}", next.player.x);
    }

    // ── 3. Cooldown ──────────────────────────────────────────────────────────
    next.shoot_cooldown = next.shoot_cooldown.saturating_sub(1);

    // ── 4. Move projectiles, drop those past the top edge ────────────────────
    next.projectiles = next
        .projectiles
        .iter()
        .map(|p| Projectile { y: p.y + p.speed, ..p.clone() })
        .filter(|p| p.y >= 0)
        .collect();

    // ── 5. Spawn enemies ─────────────────────────────────────────────────────
    if !is_won(&next) {
        next.spawn_timer += 1;
        if next.spawn_timer >= ENEMY_SPAWN_INTERVAL {
            next.spawn_timer = 0;
            let sprite = assets.get(ENEMY_IMAGE)?;
            let x = rng.gen_range(0..ENEMY_SPAWN_MAX_X);
            next = spawn_enemy(&next, sprite, x);
            log::debug!("enemy spawned at x={}", x);
        }
    }

    // ── 6. Move enemies, drop those past the bottom edge ─────────────────────
    next.enemies = next
        .enemies
        .iter()
        .map(|e| Enemy { y: e.y + e.speed, ..e.clone() })
        .filter(|e| e.y <= ENEMY_BOTTOM_Y)
        .collect();

    // ── 7. Collisions ────────────────────────────────────────────────────────
    let before = next.score;
    next = resolve_collisions(&next);
    if next.score != before && is_won(&next) {
        log::info!("win score reached: {}", next.score);
    }

    // ── 8. Background scroll ─────────────────────────────────────────────────
    next.scroll_offset = advance_scroll(next.scroll_offset, next.background.height);

    Ok(next)
}
