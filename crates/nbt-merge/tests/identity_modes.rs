mod common;

use nbt_merge::{IdentityListMode, MergeOptions, Merger};

use common::{entries, load_cases};

fn run(mode: IdentityListMode) {
    let merger = Merger::new(MergeOptions { identity_lists: mode });
    let cases = load_cases("identity_lists.json");
    assert!(!cases.is_empty());
    for case in cases {
        let ancestor = entries(case.ancestor.clone());
        let left = entries(case.left.clone());
        let right = entries(case.right.clone());
        let expected = match mode {
            IdentityListMode::Precise => entries(case.expected.precise.clone()),
            IdentityListMode::Legacy => entries(case.expected.legacy.clone()),
        };
        let merged = merger
            .merge(&ancestor, &left, &right)
            .unwrap_or_else(|e| panic!("{} ({mode}): {e}", case.name));
        assert_eq!(merged, expected, "{} ({mode})", case.name);
    }
}

#[test]
fn precise_fixtures() {
    run(IdentityListMode::Precise);
}

#[test]
fn legacy_fixtures() {
    run(IdentityListMode::Legacy);
}
