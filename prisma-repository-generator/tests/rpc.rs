//! Driving the generator protocol over in-memory streams

use prisma_repository_generator::rpc::{self, GENERATE_FAILED, METHOD_NOT_FOUND};
use serde_json::{Value, json};
use std::io::Cursor;

fn exchange(requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let mut output = Vec::new();
    rpc::serve(Cursor::new(input), &mut output).unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_get_manifest() {
    let responses = exchange(&[json!({ "jsonrpc": "2.0", "method": "getManifest", "params": {}, "id": 1 })]);

    assert_eq!(
        responses,
        vec![json!({
            "jsonrpc": "2.0",
            "result": {
                "manifest": {
                    "defaultOutput": "./generated",
                    "prettyName": "Prisma Repository Generator",
                    "requiresGenerators": ["prisma-client-js"]
                }
            },
            "id": 1
        })]
    );
}

#[test]
fn test_generate_round() {
    let out = tempfile::tempdir().unwrap();
    let params = json!({
        "generator": {
            "name": "repository",
            "provider": { "value": "prisma-repository-generator", "fromEnvVar": null },
            "output": { "value": out.path().to_str().unwrap(), "fromEnvVar": null }
        },
        "otherGenerators": [],
        "datamodel": "",
        "dmmf": {
            "datamodel": {
                "models": [{
                    "name": "Tag",
                    "fields": [{ "name": "label", "kind": "scalar", "type": "String" }]
                }]
            }
        }
    });

    let responses = exchange(&[
        json!({ "jsonrpc": "2.0", "method": "getManifest", "params": {}, "id": 1 }),
        json!({ "jsonrpc": "2.0", "method": "generate", "params": params, "id": 2 }),
    ]);

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1], json!({ "jsonrpc": "2.0", "result": null, "id": 2 }));
    assert!(out.path().join("tag/tag.repository.ts").is_file());
}

#[test]
fn test_generate_failure_is_reported() {
    let params = json!({
        "generator": { "name": "repository", "provider": "prisma-repository-generator" },
        "datamodel": ""
    });

    let responses = exchange(&[json!({ "jsonrpc": "2.0", "method": "generate", "params": params, "id": 7 })]);

    let error = &responses[0]["error"];
    assert_eq!(error["code"], json!(GENERATE_FAILED));
    assert!(error["message"].as_str().unwrap().contains("no output directory"));
    assert!(error["data"]["stack"].is_string());
    assert_eq!(responses[0]["id"], json!(7));
    assert!(responses[0].get("result").is_none());
}

#[test]
fn test_unknown_method_and_blank_lines() {
    let mut output = Vec::new();
    let input = "\n{\"jsonrpc\":\"2.0\",\"method\":\"shutdown\",\"id\":3}\n\n";
    rpc::serve(Cursor::new(input), &mut output).unwrap();

    let response: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(response["error"]["code"], json!(METHOD_NOT_FOUND));
    assert_eq!(response["id"], json!(3));
}

#[test]
fn test_malformed_request_stops_the_loop() {
    let mut output = Vec::new();
    assert!(rpc::serve(Cursor::new("not json\n"), &mut output).is_err());
    assert!(output.is_empty());
}
