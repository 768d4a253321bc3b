//! Tests for TreeBuilder

use rstest::rstest;
use seqtree::domain::{DomainError, TreeBuilder};
use seqtree::util::testing;

fn depth_names(definition: &str) -> Vec<Vec<String>> {
    let mut builder = TreeBuilder::new();
    builder
        .build_from_str(definition)
        .unwrap()
        .iter()
        .map(|tree| tree.iter_depth_first().cloned().collect())
        .collect()
}

#[test]
fn given_single_hierarchy_when_building_then_creates_one_tree() {
    testing::init_test_setup();
    let definition = "\
root: left right
left: leaf1 leaf2
";

    let trees = depth_names(definition);

    assert_eq!(trees, vec![vec!["root", "left", "leaf1", "leaf2", "right"]]);
}

#[test]
fn given_two_roots_when_building_then_creates_trees_in_order_of_appearance() {
    let definition = "\
b: b1
a: a1 a2
";

    let trees = depth_names(definition);

    assert_eq!(trees, vec![vec!["b", "b1"], vec!["a", "a1", "a2"]]);
}

#[test]
fn given_parent_listed_on_several_lines_when_building_then_children_are_appended() {
    let definition = "\
root: a
root: b
";

    let trees = depth_names(definition);

    assert_eq!(trees, vec![vec!["root", "a", "b"]]);
}

#[test]
fn given_parent_without_children_when_building_then_creates_single_node_tree() {
    let mut builder = TreeBuilder::new();

    let trees = builder.build_from_str("lonely:\n").unwrap();

    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].len(), 1);
    assert_eq!(trees[0].depth(), 1);
}

#[test]
fn given_line_without_colon_when_building_then_invalid_tree_spec_with_line_number() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_str("# header\nroot: a\nnot a definition\n");

    assert!(matches!(
        result,
        Err(DomainError::InvalidTreeSpec { line: 3, .. })
    ));
}

#[test]
fn given_child_containing_colon_when_building_then_invalid_tree_spec() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_str("root: a:b\n");

    assert!(matches!(
        result,
        Err(DomainError::InvalidTreeSpec { line: 1, .. })
    ));
}

#[test]
fn given_pure_cycle_when_building_then_cycle_detected() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_str("a: b\nb: a\n");

    assert_eq!(result.err(), Some(DomainError::CycleDetected("a".into())));
}

#[test]
fn given_cycle_below_root_when_building_then_cycle_detected() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_str("root: a\na: b\nb: a\n");

    assert!(matches!(result, Err(DomainError::CycleDetected(_))));
}

#[rstest]
#[case("a: b\nc: d\nd: c\n", "c")]
#[case("c: d\nd: c\na: b\n", "c")]
#[case("root: a\nx: y\ny: z\nz: x\n", "x")]
fn given_cycle_apart_from_rooted_tree_when_building_then_cycle_detected(
    #[case] definition: &str,
    #[case] first_unreached: &str,
) {
    // Arrange
    let mut builder = TreeBuilder::new();

    // Act
    let result = builder.build_from_str(definition);

    // Assert
    assert_eq!(
        result.err(),
        Some(DomainError::CycleDetected(first_unreached.into()))
    );
}

#[test]
fn given_cycle_apart_from_rooted_tree_when_reusing_builder_then_valid_definition_still_builds() {
    let mut builder = TreeBuilder::new();
    assert!(builder.build_from_str("a: b\nc: d\nd: c\n").is_err());

    let trees = builder.build_from_str("a: b\nc: d\n").unwrap();

    assert_eq!(trees.len(), 2);
}

#[test]
fn given_shared_child_when_building_then_cycle_detected() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_str("root: a b\na: shared\nb: shared\n");

    assert_eq!(
        result.err(),
        Some(DomainError::CycleDetected("shared".into()))
    );
}

#[test]
fn given_builder_when_reused_then_previous_definition_is_forgotten() {
    let mut builder = TreeBuilder::new();
    builder.build_from_str("old: x\n").unwrap();

    let trees = builder.build_from_str("new: y\n").unwrap();

    assert_eq!(trees.len(), 1);
    let names: Vec<&String> = trees[0].iter_depth_first().collect();
    assert_eq!(names, vec!["new", "y"]);
}

#[test]
fn given_built_tree_when_rendering_then_shows_every_node() {
    let mut builder = TreeBuilder::new();
    let trees = builder.build_from_str("root: a b\na: c\n").unwrap();

    let rendered = trees[0].to_display_tree().to_string();

    assert!(rendered.starts_with("root"));
    for name in ["a", "b", "c"] {
        assert!(rendered.contains(name), "missing {name} in {rendered}");
    }
    assert_eq!(trees[0].leaf_nodes(), vec!["c", "b"]);
}
