//! Tests for the JSON front end used by the wasm build.

use minion_calc::wasm::{calculate, decode_id, encode_id, get_options, get_version};
use serde_json::Value;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("Result should be valid JSON")
}

#[test]
fn test_calculate_defaults() {
    let result = parse(&calculate("{}"));

    assert_eq!(result["success"], true);
    assert!(result["error"].is_null());
    assert_eq!(result["config"]["node"], "Cobblestone");
    assert!(result["outcome"]["total_profit"].as_f64().unwrap_or_default() > 0.0);
    assert!(!result["total_profit_formatted"].as_str().unwrap_or_default().is_empty());
}

#[test]
fn test_calculate_with_template_and_addons() {
    let input = r#"{
        "config": { "node": "Inferno", "tier": 10 },
        "template": "Maxed Inferno Minion",
        "addons": ["Days to Repay Setup"]
    }"#;
    let result = parse(&calculate(input));

    assert_eq!(result["success"], true, "Failed: {}", result["error"]);
    assert_eq!(result["config"]["amount"], 31);
    assert_eq!(result["addon_outputs"][0]["name"], "Setup Repay Time");
}

#[test]
fn test_calculate_errors() {
    let result = parse(&calculate("not json"));
    assert_eq!(result["success"], false);
    assert!(result["error"].as_str().unwrap_or_default().starts_with("Invalid input"));

    let result = parse(&calculate(r#"{ "template": "Turbo" }"#));
    assert_eq!(result["success"], false);

    let result = parse(&calculate(r#"{ "setup_id": "0.9!abc" }"#));
    assert_eq!(result["success"], false);
}

#[test]
fn test_id_round_trip() {
    let encoded = parse(&encode_id(r#"{ "node": "Ice", "amount": 12 }"#));
    assert_eq!(encoded["success"], true);
    let id = encoded["id"].as_str().unwrap_or_default().to_string();

    let decoded = parse(&decode_id(&id));
    assert_eq!(decoded["success"], true);
    assert_eq!(decoded["fields"]["node"], "Ice");
    assert_eq!(decoded["fields"]["amount"], "12");

    let bad = parse(&decode_id("nonsense"));
    assert_eq!(bad["success"], false);
}

#[test]
fn test_version_and_options() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));

    let options = parse(&get_options());
    assert!(options["nodes"]["Cobblestone"].as_array().is_some_and(|t| !t.is_empty()));
    assert_eq!(options["fuels"][0], "NONE");
    assert!(options["templates"]
        .as_array()
        .is_some_and(|t| t.iter().any(|name| name == "Clean")));
    assert_eq!(options["addons"].as_array().map(Vec::len), Some(5));
}
