//! Integration tests for match group truncation on serialized results.

use serde_json::json;
use sift_results::{limit_group, MatchGroup};

fn groups_fixture() -> Vec<MatchGroup> {
    serde_json::from_value(json!([
        {
            "blobLines": ["fn a() {", "    todo!()", "}", "", "fn b() {}"],
            "matches": [
                {"line": 20, "character": 3, "highlightLength": 1, "isInContext": false},
                {"line": 21, "character": 4, "highlightLength": 4, "isInContext": false},
                {"line": 24, "character": 3, "highlightLength": 1, "isInContext": false}
            ],
            "position": {"line": 20, "character": 3},
            "startLine": 20,
            "endLine": 25
        },
        {
            "blobLines": ["use std::fmt;"],
            "matches": [
                {"line": 0, "character": 4, "highlightLength": 3, "isInContext": false}
            ],
            "position": {"line": 0, "character": 4},
            "startLine": 0,
            "endLine": 1
        }
    ]))
    .unwrap()
}

#[test]
fn test_limit_each_group_of_a_file() {
    let limited: Vec<MatchGroup> = groups_fixture()
        .into_iter()
        .map(|group| limit_group(group, 2))
        .collect();

    assert_eq!(limited[0].end_line, 23);
    assert_eq!(limited[0].blob_lines, vec!["fn a() {", "    todo!()", "}"]);
    assert_eq!(limited[0].matches.len(), 2);

    // Within the limit: untouched.
    assert_eq!(limited[1], groups_fixture()[1]);
}

#[test]
fn test_limited_group_serializes_back() {
    let limited = limit_group(groups_fixture().remove(0), 1);
    let value = serde_json::to_value(&limited).unwrap();

    assert_eq!(value["endLine"], 22);
    assert_eq!(value["blobLines"], json!(["fn a() {", "    todo!()"]));
    assert_eq!(value["matches"].as_array().unwrap().len(), 2);
}
