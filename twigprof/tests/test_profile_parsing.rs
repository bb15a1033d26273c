use twigprof::domain::ProfileError;
use twigprof::profile::{ProfileTree, SpanKind};

#[test]
fn test_parse_profile_from_file_succeeds() {
    let result = ProfileTree::from_file("tests/fixtures/simple_profile.json");

    assert!(result.is_ok(), "Failed to parse profile: {:?}", result.err());

    let tree = result.unwrap();
    assert_eq!(tree.node_count(), 5, "Should have 5 spans");
    assert_eq!(tree.depth(), 3);
}

#[test]
fn test_parse_profile_extracts_all_fields() {
    let tree = ProfileTree::from_file("tests/fixtures/simple_profile.json").unwrap();
    let root = tree.root();

    assert_eq!(root.name, "main");
    assert_eq!(root.template, "layout.html.twig");
    assert!(root.is_root());
    assert_eq!(root.memory_usage, 2_097_152);
    assert_eq!(root.peak_memory_usage, 6_291_456);

    let block = &root.children[0].children[0];
    assert_eq!(
        block.kind,
        SpanKind::Call {
            call_type: "block".to_string(),
            call_name: "content".to_string()
        }
    );
    assert_eq!(block.wall_time(), Some((1_700_000_000.01, 1_700_000_000.06)));
}

#[test]
fn test_parse_profile_handles_missing_optional_fields() {
    let tree = ProfileTree::from_file("tests/fixtures/simple_profile.json").unwrap();

    // Footer has no memory or timing telemetry
    let footer = &tree.root().children[1];
    assert_eq!(footer.memory_usage, 0);
    assert_eq!(footer.start, None);
    assert_eq!(footer.end, None);
    assert!(footer.children.is_empty());
}

#[test]
fn test_parse_profile_rejects_nested_root() {
    let err = ProfileTree::from_file("tests/fixtures/nested_root.json").unwrap_err();
    assert!(matches!(err, ProfileError::NestedRoot { ref name } if name == "inner"));
}

#[test]
fn test_parse_profile_missing_file() {
    let err = ProfileTree::from_file("tests/fixtures/does_not_exist.json").unwrap_err();
    assert!(matches!(err, ProfileError::Io(_)));
}
