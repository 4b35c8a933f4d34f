//! Random operation scripts replayed against the editor.
//!
//! Scripts are decoded with [`arbitrary::Unstructured`] from seeded random
//! bytes, so that every run explores the same sequences. The same checks run
//! under the `operation_script` fuzz target.

use arbitrary::{Arbitrary, Unstructured};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use table_editor_rs::testing::{Account, Step, assert_invariants, run_script};

/// Number of seeded scripts replayed.
const SCRIPTS: u64 = 256;

fn random_steps(seed: u64) -> Vec<Step> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = rng.random_range(64..4096);
    let bytes: Vec<u8> = (0..len).map(|_| rng.random_range(0..=u8::MAX)).collect();
    let mut unstructured = Unstructured::new(&bytes);
    Vec::<Step>::arbitrary(&mut unstructured).unwrap_or_default()
}

#[test]
fn test_seeded_scripts_keep_invariants() {
    for seed in 0..SCRIPTS {
        let steps = random_steps(seed);
        let editor = run_script(&steps);
        assert_invariants(&editor.state(), editor.columns());
    }
}

#[test]
fn test_scripted_save_cycle() {
    // Load, edit, save, load again: what a UI round trip looks like.
    let editor = run_script(&[
        Step::Initialize(vec![
            Account::new(1, "ada", 100),
            Account::new(2, "brian", 50),
        ]),
        Step::AddBalance { id: 1, delta: -40 },
        Step::SwapTags { id: 2 },
        Step::Insert(vec![Account::new(3, "carol", 0)]),
        Step::Remove(vec![2]),
        Step::Commit(vec![1, 2, 3]),
    ]);
    let state = editor.state();
    assert_eq!(state.len(), 2);
    assert_eq!(state.dirty().count(), 0);
    assert_eq!(state.get(&1).unwrap().pristine().balance, 60);
    assert!(state.get(&3).is_some());
}

#[test]
fn test_swapped_tags_stay_clean() {
    let tagged = Account {
        tags: (4, 9),
        ..Account::new(1, "ada", 0)
    };
    let editor = run_script(&[
        Step::Initialize(vec![tagged]),
        Step::SwapTags { id: 1 },
        Step::SetOwner {
            id: 1,
            owner: "ada".into(),
        },
    ]);
    let state = editor.state();
    let row = state.get(&1).unwrap();
    assert_eq!(row.current().tags, (9, 4));
    assert!(!row.is_dirty());
}

#[test]
fn test_rejected_steps_leave_state_untouched() {
    let editor = run_script(&[
        Step::Initialize(vec![Account::new(1, "ada", 0)]),
        Step::Insert(vec![Account::new(1, "again", 0)]),
        Step::Rename { id: 1, new_id: 2 },
        Step::SetBalance { id: 5, balance: 1 },
    ]);
    assert_eq!(editor.version(), 1);
}
