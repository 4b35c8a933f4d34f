//! Fuzz test replaying arbitrary operation scripts against a table editor.
//!
//! For every step of the script this fuzzer verifies that:
//! 1. Row identities stay unique and no row is both new and removed
//! 2. Dirty flags match a recomputation over every registered column
//! 3. Rejected operations neither publish nor change the table
//! 4. Accepted operations have the effect their contract describes

use honggfuzz::fuzz;
use table_editor_rs::testing::{Step, run_script};

fn main() {
    loop {
        fuzz!(|steps: Vec<Step>| {
            let _editor = run_script(&steps);
        });
    }
}
