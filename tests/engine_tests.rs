//! Engine integration tests.
//!
//! These drive full sessions through the public API: round lifecycle,
//! timer ownership, the two-phase submission flow, lookup policies, and
//! high-score persistence.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use wordgrid::core::is_vowel;
use wordgrid::{
    Diagnostics, Dictionary, Engine, Feasibility, Grid, Lookup, LookupPolicy, MemoryStore,
    Profile, ProfileStore, Rejection, RoundPhase, StoreError, SubmitOutcome, Theme, TickOutcome,
    WordList,
};

// =============================================================================
// Helpers
// =============================================================================

/// Dictionary that always fails (network down).
struct Offline;

impl Dictionary for Offline {
    fn lookup(&self, _word: &str) -> Lookup {
        Lookup::Unknown
    }
}

/// Dictionary that knows every word.
struct Omniscient;

impl Dictionary for Omniscient {
    fn lookup(&self, _word: &str) -> Lookup {
        Lookup::Found
    }
}

/// Diagnostics observer counting reports.
#[derive(Clone, Default)]
struct CountingDiag {
    lookups: Arc<AtomicU32>,
    persists: Arc<AtomicU32>,
}

impl Diagnostics for CountingDiag {
    fn lookup_failed(&self, _word: &str) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }

    fn persist_failed(&self, _error: &StoreError) {
        self.persists.fetch_add(1, Ordering::SeqCst);
    }
}

/// Build `count` distinct words guaranteed playable on `grid`: each takes
/// a vowel tile plus companion tiles at distinct indices, so the multiset
/// test always passes.
fn playable_words(grid: &Grid, count: usize) -> Vec<String> {
    let tiles = grid.tiles();
    let vowel = tiles
        .iter()
        .position(|&t| is_vowel(t))
        .expect("every grid has a vowel");

    let mut words = Vec::new();
    let mut seen = std::collections::HashSet::new();

    // Pairs of companions (3-letter words), then triples (4-letter).
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            if i == vowel || j == vowel {
                continue;
            }
            let word: String = [tiles[vowel], tiles[i], tiles[j]].iter().collect();
            if seen.insert(word.clone()) {
                words.push(word);
                if words.len() == count {
                    return words;
                }
            }
        }
    }
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            for k in (j + 1)..tiles.len() {
                if i == vowel || j == vowel || k == vowel {
                    continue;
                }
                let word: String =
                    [tiles[vowel], tiles[i], tiles[j], tiles[k]].iter().collect();
                if seen.insert(word.clone()) {
                    words.push(word);
                    if words.len() == count {
                        return words;
                    }
                }
            }
        }
    }

    panic!("grid too repetitive for {count} distinct words");
}

/// Accept `count` playable words through an all-knowing dictionary and
/// return the points gained.
fn accept_words(engine: &mut Engine, count: usize) -> u32 {
    let words = playable_words(engine.grid(), count);
    let mut gained = 0;
    for word in words {
        match engine.submit_checked(&word, &Omniscient) {
            SubmitOutcome::Accepted { points, .. } => gained += points,
            other => panic!("expected accept for {word}, got {other:?}"),
        }
    }
    gained
}

/// Run the clock out; returns the expiry summary.
fn run_out_clock(engine: &mut Engine, handle: wordgrid::TimerHandle) -> wordgrid::RoundSummary {
    loop {
        match engine.tick(handle) {
            TickOutcome::Ticked { .. } => {}
            TickOutcome::Expired(summary) => return summary,
            TickOutcome::Stale => panic!("live handle went stale mid-round"),
        }
    }
}

// =============================================================================
// Round lifecycle
// =============================================================================

/// startRound sets a full clock and a zero score.
#[test]
fn test_start_round_initializes() {
    let mut engine = Engine::builder().seed(42).build();
    assert_eq!(engine.phase(), RoundPhase::Idle);

    engine.start_round();
    assert_eq!(engine.phase(), RoundPhase::Running);
    assert_eq!(engine.time_remaining(), 60);
    assert_eq!(engine.score(), 0);
}

/// After 60 one-second ticks the round is Expired and the countdown no
/// longer fires.
#[test]
fn test_round_expires_after_sixty_ticks() {
    let mut engine = Engine::builder().seed(42).build();
    let handle = engine.start_round();

    for expected in (1..60).rev() {
        assert_eq!(
            engine.tick(handle),
            TickOutcome::Ticked {
                remaining: expected
            }
        );
    }
    let outcome = engine.tick(handle);
    assert!(matches!(outcome, TickOutcome::Expired(_)), "got {outcome:?}");
    assert_eq!(engine.phase(), RoundPhase::Expired);

    // The countdown is cancelled; nothing more fires.
    assert_eq!(engine.tick(handle), TickOutcome::Stale);
    assert_eq!(engine.current_handle(), None);
}

/// Custom round lengths are honored.
#[test]
fn test_custom_round_length() {
    let mut engine = Engine::builder().seed(42).round_seconds(3).build();
    let handle = engine.start_round();

    assert_eq!(engine.tick(handle), TickOutcome::Ticked { remaining: 2 });
    assert_eq!(engine.tick(handle), TickOutcome::Ticked { remaining: 1 });
    assert!(matches!(engine.tick(handle), TickOutcome::Expired(_)));
}

/// Starting a new round while one is active leaves exactly one live
/// countdown: ticks from the superseded handle are ignored.
#[test]
fn test_restart_cancels_previous_countdown() {
    let mut engine = Engine::builder().seed(42).build();
    let first = engine.start_round();
    let second = engine.start_round();

    // The old timer keeps firing; the clock must not double-decrement.
    assert_eq!(engine.tick(first), TickOutcome::Stale);
    assert_eq!(engine.time_remaining(), 60);

    assert_eq!(engine.tick(second), TickOutcome::Ticked { remaining: 59 });
    assert_eq!(engine.tick(first), TickOutcome::Stale);
    assert_eq!(engine.time_remaining(), 59);
}

/// A round can be restarted from Expired.
#[test]
fn test_restart_after_expiry() {
    let mut engine = Engine::builder().seed(42).round_seconds(1).build();
    let handle = engine.start_round();
    assert!(matches!(engine.tick(handle), TickOutcome::Expired(_)));

    let next = engine.start_round();
    assert_eq!(engine.phase(), RoundPhase::Running);
    assert_eq!(engine.time_remaining(), 1);
    assert!(matches!(engine.tick(next), TickOutcome::Expired(_)));
}

// =============================================================================
// Submission and scoring
// =============================================================================

/// Accepted words score their letter count and accumulate.
#[test]
fn test_scoring_by_letter_count() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let words = playable_words(engine.grid(), 2);
    let mut expected = 0;
    for word in &words {
        let outcome = engine.submit_checked(word, &Omniscient);
        expected += word.len() as u32;
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                word: word.clone(),
                points: word.len() as u32,
                score: expected,
            }
        );
    }
    assert_eq!(engine.score(), expected);
}

/// A word cannot score twice in one round.
#[test]
fn test_no_repeats_within_round() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert!(matches!(
        engine.submit_checked(word, &Omniscient),
        SubmitOutcome::Accepted { .. }
    ));
    assert_eq!(
        engine.submit_checked(word, &Omniscient),
        SubmitOutcome::Rejected(Rejection::AlreadyUsed)
    );

    // A fresh round forgets the used set.
    engine.start_round();
    let word = &playable_words(engine.grid(), 1)[0];
    assert!(matches!(
        engine.submit_checked(word, &Omniscient),
        SubmitOutcome::Accepted { .. }
    ));
}

/// Submissions outside a running round are rejected.
#[test]
fn test_submission_disabled_outside_round() {
    let mut engine = Engine::builder().seed(42).round_seconds(1).build();
    assert_eq!(
        engine.submit_checked("CAT", &Omniscient),
        SubmitOutcome::Rejected(Rejection::RoundNotRunning)
    );

    let handle = engine.start_round();
    assert!(matches!(engine.tick(handle), TickOutcome::Expired(_)));
    assert_eq!(
        engine.submit_checked("CAT", &Omniscient),
        SubmitOutcome::Rejected(Rejection::RoundNotRunning)
    );
}

/// The dictionary sees the lowercase form of the submitted word.
#[test]
fn test_dictionary_query_is_lowercase() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let word = playable_words(engine.grid(), 1).remove(0);
    match engine.submit(&word) {
        SubmitOutcome::AwaitingLookup { query } => {
            assert_eq!(query, word.to_ascii_lowercase());
        }
        other => panic!("expected AwaitingLookup, got {other:?}"),
    }
}

/// A definitive not-found rejects the word.
#[test]
fn test_not_in_dictionary() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert_eq!(
        engine.submit_checked(word, &WordList::new()),
        SubmitOutcome::Rejected(Rejection::NotInDictionary)
    );
    assert_eq!(engine.score(), 0);
}

// =============================================================================
// Lookup gating and policies
// =============================================================================

/// While one lookup is pending, further submissions are rejected.
#[test]
fn test_at_most_one_lookup_in_flight() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let words = playable_words(engine.grid(), 2);
    assert!(matches!(
        engine.submit(&words[0]),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    assert_eq!(
        engine.submit(&words[1]),
        SubmitOutcome::Rejected(Rejection::LookupInFlight)
    );

    // Resolving frees the gate.
    assert!(matches!(
        engine.resolve_lookup(Lookup::Found),
        SubmitOutcome::Accepted { .. }
    ));
    assert!(matches!(
        engine.submit(&words[1]),
        SubmitOutcome::AwaitingLookup { .. }
    ));
}

/// Resolving with nothing pending is a benign rejection.
#[test]
fn test_resolve_without_pending() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();
    assert_eq!(
        engine.resolve_lookup(Lookup::Found),
        SubmitOutcome::Rejected(Rejection::NoLookupPending)
    );
}

/// Default policy fails open: an unverifiable word is accepted, and the
/// failure is reported to diagnostics.
#[test]
fn test_fail_open_accepts_on_outage() {
    let diag = CountingDiag::default();
    let mut engine = Engine::builder().seed(42).diagnostics(diag.clone()).build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert!(matches!(
        engine.submit_checked(word, &Offline),
        SubmitOutcome::Accepted { .. }
    ));
    assert_eq!(diag.lookups.load(Ordering::SeqCst), 1);
}

/// Fail-closed rejects an unverifiable word.
#[test]
fn test_fail_closed_rejects_on_outage() {
    let mut engine = Engine::builder()
        .seed(42)
        .policy(LookupPolicy::FailClosed)
        .build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert_eq!(
        engine.submit_checked(word, &Offline),
        SubmitOutcome::Rejected(Rejection::LookupFailed)
    );
    assert_eq!(engine.score(), 0);
}

/// Retry re-asks the dictionary, then rejects when the budget runs out.
#[test]
fn test_retry_policy_exhausts_then_rejects() {
    let mut engine = Engine::builder()
        .seed(42)
        .policy(LookupPolicy::Retry { attempts: 2 })
        .build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert!(matches!(
        engine.submit(word),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    // Two retries allowed after the first failure.
    assert!(matches!(
        engine.resolve_lookup(Lookup::Unknown),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    assert!(matches!(
        engine.resolve_lookup(Lookup::Unknown),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    assert_eq!(
        engine.resolve_lookup(Lookup::Unknown),
        SubmitOutcome::Rejected(Rejection::LookupFailed)
    );
}

/// A retry that eventually succeeds accepts the word.
#[test]
fn test_retry_policy_recovers() {
    let mut engine = Engine::builder()
        .seed(42)
        .policy(LookupPolicy::Retry { attempts: 2 })
        .build();
    engine.start_round();

    let word = &playable_words(engine.grid(), 1)[0];
    assert!(matches!(
        engine.submit(word),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    assert!(matches!(
        engine.resolve_lookup(Lookup::Unknown),
        SubmitOutcome::AwaitingLookup { .. }
    ));
    assert!(matches!(
        engine.resolve_lookup(Lookup::Found),
        SubmitOutcome::Accepted { .. }
    ));
}

/// A lookup that outlives its round cannot score.
#[test]
fn test_pending_lookup_dies_with_round() {
    let mut engine = Engine::builder().seed(42).round_seconds(1).build();
    let handle = engine.start_round();

    let word = playable_words(engine.grid(), 1).remove(0);
    assert!(matches!(
        engine.submit(&word),
        SubmitOutcome::AwaitingLookup { .. }
    ));

    assert!(matches!(engine.tick(handle), TickOutcome::Expired(_)));
    assert_eq!(
        engine.resolve_lookup(Lookup::Found),
        SubmitOutcome::Rejected(Rejection::RoundNotRunning)
    );
    assert_eq!(engine.score(), 0);
}

// =============================================================================
// Summary and high score
// =============================================================================

/// The summary reports the final score and the accepted words in order.
#[test]
fn test_summary_reports_words_in_order() {
    let mut engine = Engine::builder().seed(42).round_seconds(5).build();
    let handle = engine.start_round();

    let words = playable_words(engine.grid(), 3);
    for word in &words {
        assert!(matches!(
            engine.submit_checked(word, &Omniscient),
            SubmitOutcome::Accepted { .. }
        ));
    }

    let summary = run_out_clock(&mut engine, handle);
    assert_eq!(summary.words, words);
    assert_eq!(
        summary.final_score,
        words.iter().map(|w| w.len() as u32).sum::<u32>()
    );
    assert!(summary.new_high_score);
}

/// A better round raises the stored high score; a worse one leaves it.
#[test]
fn test_high_score_updates_only_upward() {
    let store = MemoryStore::with_profile(Profile {
        high_score: 10,
        theme: Theme::Dark,
    });
    let observer = store.clone();

    let mut engine = Engine::builder().seed(42).round_seconds(2).store(store).build();
    assert_eq!(engine.high_score(), 10);

    // Round one: beat the stored score.
    let handle = engine.start_round();
    let gained = accept_words(&mut engine, 4);
    assert!(gained > 10);
    let summary = run_out_clock(&mut engine, handle);
    assert!(summary.new_high_score);
    assert_eq!(summary.high_score, gained);
    assert_eq!(engine.high_score(), gained);
    assert_eq!(observer.load().high_score, gained);

    // Theme set by the surrounding application survives the write.
    assert_eq!(observer.load().theme, Theme::Dark);

    // Round two: a single word cannot beat it; store untouched.
    let handle = engine.start_round();
    let small = accept_words(&mut engine, 1);
    assert!(small < gained);
    let summary = run_out_clock(&mut engine, handle);
    assert!(!summary.new_high_score);
    assert_eq!(summary.high_score, gained);
    assert_eq!(observer.load().high_score, gained);
}

/// A zero-score round never writes the store.
#[test]
fn test_zero_score_round_does_not_persist() {
    let store = MemoryStore::new();
    let observer = store.clone();

    let mut engine = Engine::builder().seed(42).round_seconds(1).store(store).build();
    let handle = engine.start_round();
    let summary = run_out_clock(&mut engine, handle);

    assert!(!summary.new_high_score);
    assert_eq!(observer.load(), Profile::default());
}

// =============================================================================
// Composition feedback
// =============================================================================

/// Tile clicks give live feasibility feedback without consuming the word.
#[test]
fn test_composition_flow() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let word = playable_words(engine.grid(), 1).remove(0);
    for letter in word.chars() {
        assert_eq!(engine.push_letter(letter), Feasibility::Feasible);
    }
    assert_eq!(engine.composition(), word);

    let composed = engine.take_composition();
    assert!(matches!(
        engine.submit_checked(&composed, &Omniscient),
        SubmitOutcome::Accepted { .. }
    ));
}

/// An over-drawn letter flips feedback to Unsatisfiable; feedback alone
/// never rejects.
#[test]
fn test_composition_feedback_is_nondestructive() {
    let mut engine = Engine::builder().seed(42).build();
    engine.start_round();

    let letter = engine.grid().tiles()[0];
    let mut last = Feasibility::Feasible;
    for _ in 0..17 {
        last = engine.push_letter(letter);
    }
    assert_eq!(last, Feasibility::Unsatisfiable);

    // Backing off restores feasibility eventually.
    while engine.composition_feasibility() == Feasibility::Unsatisfiable {
        engine.pop_letter();
    }
    assert_eq!(engine.composition_feasibility(), Feasibility::Feasible);
}
