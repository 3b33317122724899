// Integration tests (native) for the `balloon-pump` crate.
// These cover construction and configuration; lifecycle behaviour lives in
// lifecycle.rs.

use balloon_pump::engine::{Rng, SpriteId};
use balloon_pump::game::{BalloonState, GameConfig, GameScene, GameSession, MAX_POOL_SIZE};

fn texture_size(key: &str) -> (f32, f32) {
    if key.starts_with("balloon") {
        (300.0, 400.0)
    } else {
        (200.0, 500.0)
    }
}

// A new session puts pump parts and one hidden balloon per slot on the stage.
#[test]
fn new_session_builds_the_stage() {
    let mut scene = GameScene::new(1024.0, 768.0);
    let session =
        GameSession::new(GameConfig::default(), &mut scene, texture_size, Rng::new(3)).unwrap();

    assert_eq!(scene.stage.len(), 3 + MAX_POOL_SIZE);
    assert_eq!(scene.stage.background(), Some("background"));
    assert_eq!(session.balloons().len(), 26);
    assert_eq!(session.burst_count(), 0);
    assert_eq!(session.next_index(), 0);
    assert!(!session.pump_busy());
    assert!(!session.is_complete());

    let handle = scene.stage.get(session.pump_handle()).unwrap();
    assert_eq!(handle.texture, "pumpHandle");
    assert!(handle.interactive);
    assert_eq!((handle.x, handle.y), (1150.0, 425.0));
    assert_eq!(handle.scale_x, 0.3);

    for (i, b) in session.balloons().iter().enumerate() {
        assert_eq!(b.index(), i);
        assert_eq!(session.balloon_state(i), Some(BalloonState::Dormant));
        let sprite = scene.stage.get(b.sprite()).unwrap();
        assert!(!sprite.visible);
        assert_eq!(sprite.scale_x, 0.1);
        assert_eq!(sprite.texture, format!("balloon{}", (b'A' + i as u8) as char));
    }
}

// Balloons sit beneath the pump in draw order.
#[test]
fn pump_draws_over_balloons() {
    let mut scene = GameScene::new(1024.0, 768.0);
    let session =
        GameSession::new(GameConfig::default(), &mut scene, texture_size, Rng::new(3)).unwrap();
    let order: Vec<SpriteId> = scene.stage.draw_order().into_iter().map(|(id, _)| id).collect();
    let handle_pos = order.iter().position(|&id| id == session.pump_handle()).unwrap();
    for b in session.balloons() {
        let pos = order.iter().position(|&id| id == b.sprite()).unwrap();
        assert!(pos < handle_pos);
    }
}

#[test]
fn smaller_pools_are_accepted() {
    let mut scene = GameScene::new(640.0, 480.0);
    let config = GameConfig {
        pool_size: 4,
        ..GameConfig::default()
    };
    let session = GameSession::new(config, &mut scene, texture_size, Rng::new(8)).unwrap();
    assert_eq!(session.balloons().len(), 4);
    assert_eq!(session.balloon_state(4), None);
}

#[test]
fn oversized_pool_is_rejected() {
    let mut scene = GameScene::new(640.0, 480.0);
    let config = GameConfig {
        pool_size: MAX_POOL_SIZE + 1,
        ..GameConfig::default()
    };
    let err = GameSession::new(config, &mut scene, texture_size, Rng::new(8)).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
    assert!(scene.stage.is_empty());
}
