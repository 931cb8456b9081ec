//! Property-based tests for diff, merge and apply.

use nbt::{Tag, TagCompound, TagList, TagType};
use nbt_merge::{diff, merge};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn leaf() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<i8>().prop_map(Tag::Byte),
        any::<i16>().prop_map(Tag::Short),
        any::<i32>().prop_map(Tag::Int),
        any::<i64>().prop_map(Tag::Long),
        (-1.0e6f32..1.0e6).prop_map(Tag::Float),
        (-1.0e9f64..1.0e9).prop_map(Tag::Double),
        "[a-z]{0,6}".prop_map(Tag::String),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(Tag::ByteArray),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(Tag::IntArray),
    ]
}

/// Keys drawn from `a`..`h` never look like identifiers.
fn compound_of<S: Strategy<Value = Tag>>(inner: S) -> impl Strategy<Value = TagCompound> {
    prop::collection::vec(("[a-h]{1,3}", inner), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}

fn list_of(kind: TagType, items: Vec<Tag>) -> Tag {
    Tag::List(TagList::with_items(kind, items).unwrap())
}

/// Trees whose lists are all matched by position.
fn positional_tag() -> impl Strategy<Value = Tag> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(any::<i32>().prop_map(Tag::Int), 0..5)
                .prop_map(|items| list_of(TagType::Int, items)),
            prop::collection::vec(compound_of(inner.clone()), 1..4).prop_map(|items| {
                list_of(TagType::Compound, items.into_iter().map(Tag::Compound).collect())
            }),
            compound_of(inner).prop_map(Tag::Compound),
        ]
    })
}

/// Trees that also contain identity-matched lists. Identities are unique
/// within a list.
fn any_tag() -> impl Strategy<Value = Tag> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        let strings = prop::collection::btree_set("[a-z]{1,3}", 0..5)
            .prop_map(|set| list_of(TagType::String, set.into_iter().map(Tag::String).collect()));
        let by_id = prop::collection::btree_map(0..20i32, inner.clone(), 0..4).prop_map(|elements| {
            let items = elements
                .into_iter()
                .map(|(id, v)| {
                    Tag::Compound([("id", Tag::Int(id)), ("v", v)].into_iter().collect())
                })
                .collect();
            list_of(TagType::Compound, items)
        });
        prop_oneof![
            prop::collection::vec(any::<i32>().prop_map(Tag::Int), 0..5)
                .prop_map(|items| list_of(TagType::Int, items)),
            strings,
            by_id,
            compound_of(inner).prop_map(Tag::Compound),
        ]
    })
}

fn positional_tree() -> impl Strategy<Value = TagCompound> {
    compound_of(positional_tag())
}

fn any_tree() -> impl Strategy<Value = TagCompound> {
    compound_of(any_tag())
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn diff_with_itself_is_empty(t in any_tree()) {
        let d = diff(&t, &t);
        prop_assert!(d.is_empty(), "unexpected diff:\n{}", d);
        let mut copy = t.clone();
        d.apply(&mut copy).unwrap();
        prop_assert_eq!(copy, t);
    }

    #[test]
    fn merging_three_copies_is_identity(t in any_tree()) {
        prop_assert_eq!(merge(&t, &t, &t).unwrap(), t);
    }

    #[test]
    fn single_side_change_is_applied_verbatim(a in any_tree(), r in any_tree()) {
        let mut expected = a.clone();
        let applied = diff(&a, &r).apply(&mut expected).map_err(|e| e.to_string());
        let merged = merge(&a, &a, &r).map_err(|e| e.to_string());
        match (merged, applied) {
            (Ok(merged), Ok(())) => prop_assert_eq!(merged, expected),
            (merged, applied) => prop_assert_eq!(merged.err(), applied.err()),
        }
    }

    #[test]
    fn applying_a_positional_diff_yields_the_target(
        a in positional_tree(),
        b in positional_tree(),
    ) {
        let d = diff(&a, &b);
        let mut target = a.clone();
        d.apply(&mut target).unwrap();
        prop_assert_eq!(target, b);
    }

    #[test]
    fn merge_with_one_side_unchanged_on_the_other_side(
        a in positional_tree(),
        l in positional_tree(),
    ) {
        prop_assert_eq!(merge(&a, &l, &a).unwrap(), l);
    }
}
