//! Persistence integration tests: the profile file across engine
//! restarts, and mid-round checkpoints.

use std::sync::Arc;

use wordgrid::core::is_vowel;
use wordgrid::store::{load_checkpoint, save_checkpoint};
use wordgrid::{
    Dictionary, Engine, EngineSnapshot, FileStore, Lookup, NoopDiagnostics, RoundPhase,
    SubmitOutcome, TickOutcome,
};

struct Omniscient;

impl Dictionary for Omniscient {
    fn lookup(&self, _word: &str) -> Lookup {
        Lookup::Found
    }
}

/// One word guaranteed playable on the engine's current grid.
fn playable_word(engine: &Engine) -> String {
    let tiles = engine.grid().tiles();
    let vowel = tiles
        .iter()
        .position(|&t| is_vowel(t))
        .expect("every grid has a vowel");
    let companions: Vec<usize> = (0..tiles.len()).filter(|&i| i != vowel).take(2).collect();
    [tiles[vowel], tiles[companions[0]], tiles[companions[1]]]
        .iter()
        .collect()
}

/// A high score set in one process run is visible in the next.
#[test]
fn test_high_score_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    // First session: score something and let the round expire.
    {
        let mut engine = Engine::builder()
            .seed(42)
            .round_seconds(1)
            .store(FileStore::new(&path))
            .build();
        let handle = engine.start_round();
        let word = playable_word(&engine);
        assert!(matches!(
            engine.submit_checked(&word, &Omniscient),
            SubmitOutcome::Accepted { .. }
        ));
        assert!(matches!(engine.tick(handle), TickOutcome::Expired(_)));
    }

    // Second session: the score is back.
    let engine = Engine::builder()
        .seed(43)
        .store(FileStore::new(&path))
        .build();
    assert_eq!(engine.high_score(), 3);
}

/// Hand-corrupted profile state reads as zero, not an error.
#[test]
fn test_corrupt_profile_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, r#"{"highScore": "NaN"}"#).unwrap();

    let engine = Engine::builder()
        .seed(42)
        .store(FileStore::new(&path))
        .build();
    assert_eq!(engine.high_score(), 0);
}

/// A mid-round checkpoint written to disk restores the full session.
#[test]
fn test_checkpoint_restores_mid_round() {
    let dir = tempfile::tempdir().unwrap();
    let ckpt = dir.path().join("round.ckpt");

    let mut engine = Engine::builder().seed(42).store(
        FileStore::new(dir.path().join("profile.json")),
    ).build();
    let handle = engine.start_round();
    engine.tick(handle);
    engine.tick(handle);

    let word = playable_word(&engine);
    assert!(matches!(
        engine.submit_checked(&word, &Omniscient),
        SubmitOutcome::Accepted { .. }
    ));

    save_checkpoint(&ckpt, &engine.snapshot()).unwrap();
    let snapshot: EngineSnapshot = load_checkpoint(&ckpt).unwrap();

    let resumed = Engine::resume(
        snapshot,
        Box::new(FileStore::new(dir.path().join("profile.json"))),
        Arc::new(NoopDiagnostics),
    );
    assert_eq!(resumed.phase(), RoundPhase::Running);
    assert_eq!(resumed.time_remaining(), 58);
    assert_eq!(resumed.score(), 3);
    assert!(resumed.round().is_used(&word));
    assert_eq!(resumed.grid(), engine.grid());
}
