use std::rc::Rc;

use top_down_scroller::assets::Sprite;
use top_down_scroller::entities::*;

fn sprite(w: i32, h: i32) -> Rc<Sprite> {
    Rc::new(Sprite::solid("test.png", w, h, [0, 0, 0]))
}

#[test]
fn bounding_box_from_position_and_size() {
    let b = BoundingBox::new(10, 20, 30, 40);
    assert_eq!(b, BoundingBox { left: 10, top: 20, right: 40, bottom: 60 });
}

#[test]
fn overlap_is_symmetric() {
    let a = BoundingBox::new(0, 0, 10, 10);
    let b = BoundingBox::new(5, 5, 10, 10);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn shared_edge_is_not_overlap() {
    let a = BoundingBox::new(0, 0, 10, 10);
    assert!(!a.overlaps(&BoundingBox::new(10, 0, 10, 10))); // right edge
    assert!(!a.overlaps(&BoundingBox::new(0, 10, 10, 10))); // bottom edge
    assert!(!a.overlaps(&BoundingBox::new(-10, 0, 10, 10))); // left edge
    assert!(!a.overlaps(&BoundingBox::new(0, -10, 10, 10))); // top edge
}

#[test]
fn contained_box_overlaps() {
    let outer = BoundingBox::new(0, 0, 64, 64);
    let inner = BoundingBox::new(20, 20, 4, 4);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn entity_bounds_use_sprite_dimensions() {
    let p = Projectile { x: 5, y: 6, speed: -10, active: true, sprite: sprite(8, 16) };
    assert_eq!(p.bounds(), BoundingBox::new(5, 6, 8, 16));

    let e = Enemy { x: -3, y: -64, speed: 2, active: true, sprite: sprite(64, 48) };
    assert_eq!(e.bounds(), BoundingBox { left: -3, top: -64, right: 61, bottom: -16 });
}

#[test]
fn input_defaults_to_nothing_held() {
    let input = Input::default();
    assert!(!input.left && !input.right && !input.fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 250, y: 436, width: 64, height: 64, sprite: sprite(64, 64) },
        projectiles: Vec::new(),
        enemies: Vec::new(),
        background: sprite(500, 1000),
        scroll_offset: 0,
        spawn_timer: 0,
        shoot_cooldown: 0,
        score: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 7;
    cloned.enemies.push(Enemy { x: 5, y: 5, speed: 2, active: true, sprite: sprite(64, 64) });

    assert_eq!(original.player.x, 250);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());

    // Sprites are shared, not copied
    assert!(Rc::ptr_eq(&original.background, &cloned.background));
}
