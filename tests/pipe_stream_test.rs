//! Long pipe streams from the spawner.

use flappy_duck::flappy::{OffsetRange, PipeGeometry, PipeSpawner};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn geometry() -> PipeGeometry {
    PipeGeometry {
        canvas_height: 500.0,
        spawn_x: 852.0,
        pipe_width: 52.0,
        pipe_height: 320.0,
        gap: 150.0,
    }
}

#[test]
fn test_stream_offsets_cover_whole_range() {
    let spawner = PipeSpawner::new(geometry(), ChaCha8Rng::seed_from_u64(5)).unwrap();
    let range = spawner.range();
    assert_eq!(range, OffsetRange { min: -130, max: 160 });

    let offsets: Vec<i64> = spawner.take(5000).map(|spec| spec.offset).collect();
    assert!(offsets.iter().all(|&o| range.contains(o)));
    assert_eq!(offsets.iter().min(), Some(&-130));
    assert_eq!(offsets.iter().max(), Some(&160));
}

#[test]
fn test_restart_resets_sequence_not_randomness() {
    let mut spawner = PipeSpawner::new(geometry(), ChaCha8Rng::seed_from_u64(8)).unwrap();
    let first: Vec<_> = spawner.by_ref().take(4).collect();
    assert_eq!(first.iter().map(|s| s.sequence).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

    spawner.restart();
    let again: Vec<_> = spawner.take(4).collect();
    assert_eq!(again[0].sequence, 0);
    assert_ne!(
        first.iter().map(|s| s.offset).collect::<Vec<_>>(),
        again.iter().map(|s| s.offset).collect::<Vec<_>>()
    );
}

#[test]
fn test_every_pair_spawns_off_screen_right() {
    let spawner = PipeSpawner::new(geometry(), ChaCha8Rng::seed_from_u64(13)).unwrap();
    for spec in spawner.take(50) {
        assert_eq!(spec.x, 852.0);
        assert!(spec.trigger_x > spec.x);
        assert_eq!(spec.trigger_height, 500.0);
        assert_eq!(spec.gap_bottom(320.0) - spec.gap_top(320.0), 150.0);
    }
}
