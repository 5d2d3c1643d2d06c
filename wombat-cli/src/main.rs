//! Wombat CLI - HTML parsing and debugging tool
//!
//! Usage:
//!   wombat <file>              Parse and display the DOM tree
//!   wombat <file> --dump       Print the tree in html5lib test format
//!   wombat <file> --tokens     Show HTML tokens
//!   wombat <file> --errors     Show parse errors
//!   wombat <file> --json       Output the DOM as JSON
//!
//! Examples:
//!   wombat page.html
//!   wombat page.html --json
//!   wombat --html '<h1>Hello</h1>'

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use wombat_common::warning::clear_warnings;
use wombat_dom::{DomTree, NodeId, NodeType};
use wombat_html::{
    HTMLTokenizer, ParseIssue, ParserOptions, Token, dump_tree, parse_document_with_options,
    print_tree,
};

/// Wombat - parse HTML the way browsers do and show the result
#[derive(Parser, Debug)]
#[command(name = "wombat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the DOM tree of a file
    wombat ./index.html

    # html5lib-style dump, handy for writing test fixtures
    wombat --dump --html '<p>One<p>Two'

    # Token stream and parse errors
    wombat --tokens --errors ./broken.html

    # Parse with scripting enabled, options from a JSON file
    wombat --scripting --config options.json ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the tree in html5lib test format
    #[arg(short, long)]
    dump: bool,

    /// Print the token stream before the tree
    #[arg(short, long)]
    tokens: bool,

    /// Print parse errors after the tree
    #[arg(short, long)]
    errors: bool,

    /// Print the DOM as JSON
    #[arg(short, long)]
    json: bool,

    /// Parse with the scripting flag enabled
    #[arg(long)]
    scripting: bool,

    /// Log every parse error to stderr as it happens
    #[arg(short, long)]
    verbose: bool,

    /// Read parser options from a JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let html = load_input(&cli)?;
    let options = load_options(&cli)?;
    clear_warnings();

    if cli.tokens {
        print_tokens(&html);
    }

    let (tree, issues) = parse_document_with_options(&html, options);

    if cli.json {
        let value = json!({
            "quirksMode": tree.quirks_mode().to_string(),
            "document": node_to_json(&tree, tree.root()),
            "errors": issues.iter().map(issue_to_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if cli.dump {
        print!("{}", dump_tree(&tree));
    } else {
        println!("{}", "=== DOM Tree ===".bold());
        print_tree(&tree, tree.root(), 0);
    }

    if cli.errors || cli.verbose {
        print_issues(&issues);
    }

    Ok(())
}

/// Load the document from the command line.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))
    } else {
        anyhow::bail!("no input: pass a file path or --html")
    }
}

/// Start from the config file, if any, then apply flags on top.
fn load_options(cli: &Cli) -> Result<ParserOptions> {
    let mut options = match cli.config {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config '{}'", path.display()))?
        }
        None => ParserOptions::default(),
    };
    if cli.scripting {
        options = options.with_scripting(true);
    }
    if cli.verbose {
        options = options.with_error_logging(true);
    }
    Ok(options)
}

/// Tokenize on its own, with the tokenizer in its initial data state.
///
/// Without a tree constructor driving it, the tokenizer does not switch into
/// RAWTEXT or script data, so `<script>` contents show up as markup here.
fn print_tokens(html: &str) {
    let tokens = HTMLTokenizer::new(html).into_tokens();
    println!("{}", format!("=== HTML Tokens ({}) ===", tokens.len()).bold());
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::ParseError(code) => println!("  {i:3}: {}", code.red()),
            _ => println!("  {i:3}: {token:?}"),
        }
    }
    println!();
}

fn print_issues(issues: &[ParseIssue]) {
    println!();
    if issues.is_empty() {
        println!("{}", "=== No Parse Errors ===".green());
        return;
    }
    println!("{}", format!("=== Parse Errors ({}) ===", issues.len()).bold());
    for issue in issues {
        println!("  - {}", issue.yellow());
    }
}

fn issue_to_json(issue: &ParseIssue) -> Value {
    json!({
        "message": issue.message,
        "code": issue.code.map(|code| code.to_string()),
        "tokenIndex": issue.token_index,
    })
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_to_json(tree, child))
        .collect();

    match &node.node_type {
        NodeType::Document => json!({ "type": "document", "children": children }),
        NodeType::DocumentType(doctype) => json!({
            "type": "doctype",
            "name": doctype.name,
            "publicId": doctype.public_id,
            "systemId": doctype.system_id,
        }),
        NodeType::Element(data) => {
            let attributes: Map<String, Value> = data
                .attrs
                .iter()
                .map(|(name, value)| (name.to_string(), Value::from(value)))
                .collect();
            json!({
                "type": "element",
                "tagName": data.tag_name,
                "attributes": attributes,
                "children": children,
            })
        }
        NodeType::Text(text) => json!({ "type": "text", "data": text }),
        NodeType::Comment(text) => json!({ "type": "comment", "data": text }),
    }
}
