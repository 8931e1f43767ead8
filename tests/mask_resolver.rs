use inotify::WatchMask;
use proptest::prelude::*;

use watcherd::watch::mask;

const PRIMITIVES: &[(&str, WatchMask)] = &[
    ("access", WatchMask::ACCESS),
    ("attribute_change", WatchMask::ATTRIB),
    ("write_close", WatchMask::CLOSE_WRITE),
    ("nowrite_close", WatchMask::CLOSE_NOWRITE),
    ("create", WatchMask::CREATE),
    ("delete", WatchMask::DELETE),
    ("self_delete", WatchMask::DELETE_SELF),
    ("modify", WatchMask::MODIFY),
    ("self_move", WatchMask::MOVE_SELF),
    ("move_from", WatchMask::MOVED_FROM),
    ("move_to", WatchMask::MOVED_TO),
    ("open", WatchMask::OPEN),
];

#[test]
fn each_primitive_token_maps_to_its_mask_bit() {
    for (token, expected) in PRIMITIVES {
        assert_eq!(mask::resolve([*token]), *expected, "token {token}");
    }
}

#[test]
fn compound_tokens_expand_to_unions() {
    assert_eq!(
        mask::resolve(["move"]),
        WatchMask::MOVED_FROM | WatchMask::MOVED_TO
    );
    assert_eq!(
        mask::resolve(["close"]),
        WatchMask::CLOSE_WRITE | WatchMask::CLOSE_NOWRITE
    );

    let all = PRIMITIVES
        .iter()
        .fold(WatchMask::empty(), |acc, (_, m)| acc | *m);
    assert_eq!(mask::resolve(["all"]), all);
}

#[test]
fn unrecognized_tokens_are_ignored() {
    assert_eq!(
        mask::resolve(["create", "bogus", "delete"]),
        WatchMask::CREATE | WatchMask::DELETE
    );
    assert_eq!(mask::resolve(["bogus", "nonsense"]), WatchMask::empty());
    assert_eq!(mask::resolve(Vec::<String>::new()), WatchMask::empty());
}

#[test]
fn tokens_are_case_sensitive() {
    assert_eq!(mask::resolve(["CREATE", "Create"]), WatchMask::empty());
}

#[test]
fn composition_is_idempotent() {
    assert_eq!(
        mask::resolve(["create", "create", "create"]),
        WatchMask::CREATE
    );
}

#[test]
fn comma_separated_list_is_trimmed_and_resolved() {
    assert_eq!(
        mask::resolve_list("create, delete , modify"),
        WatchMask::CREATE | WatchMask::DELETE | WatchMask::MODIFY
    );
    assert_eq!(mask::resolve_list(""), WatchMask::empty());
}

proptest! {
    /// The composed mask equals the OR of each token's table value and does
    /// not depend on input order.
    #[test]
    fn resolution_is_an_order_independent_union(
        indices in proptest::collection::vec(0..PRIMITIVES.len(), 0..24)
    ) {
        let tokens: Vec<&str> = indices.iter().map(|&i| PRIMITIVES[i].0).collect();
        let expected = indices
            .iter()
            .fold(WatchMask::empty(), |acc, &i| acc | PRIMITIVES[i].1);

        prop_assert_eq!(mask::resolve(&tokens), expected);

        let reversed: Vec<&str> = tokens.iter().rev().copied().collect();
        prop_assert_eq!(mask::resolve(&reversed), expected);
    }
}
