//! Runs the html5lib-format tree-construction cases in
//! `fixtures/tree_construction.dat`.
//!
//! Only the presence of parse errors is checked, not their exact count or
//! wording, since the messages are this parser's own.

use wombat_html::{ParserOptions, dump_tree, parse_document_with_options};

const FIXTURE: &str = include_str!("fixtures/tree_construction.dat");

#[derive(Default)]
struct TreeCase {
    data: Vec<String>,
    errors: usize,
    document: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Data,
    Errors,
    Document,
}

fn parse_fixture(text: &str) -> Vec<TreeCase> {
    let mut cases: Vec<TreeCase> = Vec::new();
    let mut section = Section::Data;
    for line in text.lines() {
        match line {
            "#data" => {
                cases.push(TreeCase::default());
                section = Section::Data;
                continue;
            }
            "#errors" => {
                section = Section::Errors;
                continue;
            }
            "#document" => {
                section = Section::Document;
                continue;
            }
            _ => {}
        }
        let Some(case) = cases.last_mut() else {
            continue;
        };
        match section {
            Section::Data => case.data.push(line.to_string()),
            Section::Errors if !line.is_empty() => case.errors += 1,
            Section::Document if !line.is_empty() => {
                case.document.push_str(line);
                case.document.push('\n');
            }
            _ => {}
        }
    }
    cases
}

#[test]
fn test_html5lib_tree_construction_fixture() {
    let cases = parse_fixture(FIXTURE);
    assert!(cases.len() > 10);

    let mut failures = Vec::new();
    for case in &cases {
        let input = case.data.join("\n");
        let (tree, issues) = parse_document_with_options(&input, ParserOptions::default());
        let actual = dump_tree(&tree);
        if actual != case.document {
            failures.push(format!(
                "{input:?}\n--- got ---\n{actual}--- expected ---\n{}",
                case.document
            ));
        }
        if issues.is_empty() != (case.errors == 0) {
            failures.push(format!(
                "{input:?}: {} issues, fixture lists {}: {issues:?}",
                issues.len(),
                case.errors
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
