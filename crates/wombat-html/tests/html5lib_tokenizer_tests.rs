//! Runs the html5lib-format tokenizer cases in `fixtures/tokenizer.json`.
//!
//! Each case gives an input, optional initial states and an expected token
//! list with adjacent characters coalesced. Errors are compared by code,
//! ignoring order.

use serde_json::{Map, Value, json};
use wombat_html::{HTMLTokenizer, LexMode, Token};

const FIXTURE: &str = include_str!("fixtures/tokenizer.json");

fn lex_mode(state: &str) -> LexMode {
    match state {
        "Data state" => LexMode::Data,
        "RCDATA state" => LexMode::Rcdata,
        "RAWTEXT state" => LexMode::Rawtext,
        "Script data state" => LexMode::ScriptData,
        "PLAINTEXT state" => LexMode::Plaintext,
        other => panic!("unsupported initial state {other}"),
    }
}

/// Run one case in one initial state, returning (output, error codes).
fn run_case(input: &str, state: &str, last_start_tag: Option<&str>) -> (Vec<Value>, Vec<String>) {
    let mut tokenizer = HTMLTokenizer::new(input);
    if let Some(name) = last_start_tag {
        tokenizer.set_last_start_tag(name);
    }
    tokenizer.switch_to(lex_mode(state));

    let mut output = Vec::new();
    let mut errors = Vec::new();
    let mut text = String::new();
    for token in tokenizer {
        if let Token::Character { data } = token {
            text.push(data);
            continue;
        }
        if let Token::ParseError(code) = token {
            errors.push(code.to_string());
            continue;
        }
        if !text.is_empty() {
            output.push(json!(["Character", std::mem::take(&mut text)]));
        }
        match token {
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => output.push(json!([
                "DOCTYPE",
                name,
                public_identifier,
                system_identifier,
                !force_quirks
            ])),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let attrs: Map<String, Value> = attributes
                    .into_iter()
                    .map(|attr| (attr.name, Value::String(attr.value)))
                    .collect();
                if self_closing {
                    output.push(json!(["StartTag", name, attrs, true]));
                } else {
                    output.push(json!(["StartTag", name, attrs]));
                }
            }
            Token::EndTag { name, .. } => output.push(json!(["EndTag", name])),
            Token::Comment { data } => output.push(json!(["Comment", data])),
            Token::Character { .. } | Token::ParseError(_) | Token::EndOfFile => {}
        }
    }
    errors.sort();
    (output, errors)
}

#[test]
fn test_html5lib_tokenizer_fixture() {
    let fixture: Value = serde_json::from_str(FIXTURE).expect("fixture is valid JSON");
    let tests = fixture["tests"].as_array().expect("tests array");
    assert!(!tests.is_empty());

    let mut failures = Vec::new();
    for case in tests {
        let description = case["description"].as_str().unwrap_or("<unnamed>");
        let input = case["input"].as_str().expect("input");
        let expected_output = case["output"].as_array().expect("output").clone();
        let mut expected_errors: Vec<String> = case["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["code"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        expected_errors.sort();

        let states: Vec<&str> = case["initialStates"]
            .as_array()
            .map(|states| states.iter().filter_map(Value::as_str).collect())
            .unwrap_or_else(|| vec!["Data state"]);
        let last_start_tag = case["lastStartTag"].as_str();

        for state in states {
            let (output, errors) = run_case(input, state, last_start_tag);
            if output != expected_output {
                failures.push(format!(
                    "{description} ({state}): output {output:?}, expected {expected_output:?}"
                ));
            }
            if errors != expected_errors {
                failures.push(format!(
                    "{description} ({state}): errors {errors:?}, expected {expected_errors:?}"
                ));
            }
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
