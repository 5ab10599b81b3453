//! Property tests for selector parsing.

use proptest::prelude::*;

use partials_transform::{Segment, Selector, SelectorTree, split_list};

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        identifier().prop_map(Segment::Field),
        Just(Segment::Wildcard),
        prop::collection::btree_set(identifier(), 1..4)
            .prop_map(|names| Segment::Group(names.into_iter().collect())),
    ]
}

proptest! {
    #[test]
    fn display_round_trips(segments in prop::collection::vec(segment(), 1..5)) {
        let rendered = segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");

        let selector = Selector::parse(&rendered).unwrap();
        prop_assert_eq!(selector.segments(), segments.as_slice());
        prop_assert_eq!(selector.to_string(), rendered);
    }

    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,24}") {
        let _ = Selector::parse(&input);
        let _ = split_list(&input);
    }

    #[test]
    fn dotted_paths_scope_one_level_at_a_time(names in prop::collection::vec(identifier(), 1..5)) {
        let selector = Selector::parse(&names.join(".")).unwrap();
        let mut tree: SelectorTree = [&selector].into_iter().collect();

        let (last, parents) = names.split_last().unwrap();
        for name in parents {
            prop_assert!(tree.contains(name));
            tree = tree.scope(name);
        }
        prop_assert!(tree.is_terminal(last));
    }

    #[test]
    fn split_list_keeps_groups_whole(
        groups in prop::collection::vec(prop::collection::btree_set(identifier(), 1..4), 1..4)
    ) {
        let items: Vec<String> = groups
            .iter()
            .map(|names| format!("songs.{{{}}}", names.iter().cloned().collect::<Vec<_>>().join(",")))
            .collect();
        let joined = items.join(",");

        let split = split_list(&joined);
        prop_assert_eq!(split, items.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn parse_is_whitespace_tolerant() {
    let selector: Selector = " songs.{ name , artist } ".parse().unwrap();
    assert_eq!(selector.to_string(), "songs.{name,artist}");
    assert_eq!(selector.depth(), 2);
}
