//! Proptest strategies for generating valid test inputs.

use axaudit_types::{AbbreviationEntry, Severity};
use proptest::prelude::*;

pub fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Error),
        Just(Severity::Warning),
        Just(Severity::NotRun),
    ]
}

pub fn arb_abbreviation_entry() -> impl Strategy<Value = AbbreviationEntry> {
    ("[a-z]{1,6}", "[a-z]{2,20}")
        .prop_map(|(abbreviation, meaning)| AbbreviationEntry::new(abbreviation, meaning))
}
