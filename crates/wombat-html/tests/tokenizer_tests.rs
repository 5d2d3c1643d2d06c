//! Integration tests for the HTML tokenizer.

use wombat_html::{HTMLTokenizer, LexMode, ParseError, Token};

/// Helper to tokenize a string and return the tokens, parse errors included
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).into_tokens()
}

/// Helper to tokenize a string and drop the parse error tokens
fn tokenize_clean(input: &str) -> Vec<Token> {
    tokenize(input)
        .into_iter()
        .filter(|t| !matches!(t, Token::ParseError(_)))
        .collect()
}

/// Helper to collect the parse errors raised while tokenizing
fn errors(input: &str) -> Vec<ParseError> {
    tokenize(input)
        .into_iter()
        .filter_map(|t| match t {
            Token::ParseError(code) => Some(code),
            _ => None,
        })
        .collect()
}

/// Helper to concatenate every character token
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

/// Read the first token, then switch the content model the way the tree
/// constructor does after an element like `<style>` or `<title>`.
fn tokenize_after_first_tag(input: &str, mode: LexMode) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let first = tokenizer.next_token();
    tokenizer.switch_to(mode);
    let mut tokens = vec![first];
    tokens.extend(tokenizer);
    tokens
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_missing_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    assert!(tokens.contains(&Token::ParseError(ParseError::MissingDoctypeName)));
    assert!(tokens.iter().any(|t| matches!(
        t,
        Token::Doctype {
            name: None,
            force_quirks: true,
            ..
        }
    )));
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV ID=x></DIV>");
    assert!(matches!(&tokens[0], Token::StartTag { name, attributes, .. }
        if name == "div" && attributes[0].name == "id" && attributes[0].value == "x"));
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "div"));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    assert_eq!(errors("</p class=x>"), vec![ParseError::EndTagWithAttributes]);
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_abruptly_closed_comment() {
    let tokens = tokenize("<!-->");
    assert!(tokens.contains(&Token::ParseError(ParseError::AbruptClosingOfEmptyComment)));
    assert!(tokens.iter().any(|t| matches!(t, Token::Comment { data } if data.is_empty())));
}

#[test]
fn test_question_mark_starts_bogus_comment() {
    let tokens = tokenize("<?xml version?>");
    assert!(
        tokens.contains(&Token::ParseError(
            ParseError::UnexpectedQuestionMarkInsteadOfTagName
        ))
    );
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::Comment { data } if data == "?xml version?"))
    );
}

#[test]
fn test_cdata_outside_foreign_content_is_a_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert!(tokens.contains(&Token::ParseError(ParseError::CdataInHtmlContent)));
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::Comment { data } if data == "[CDATA[x]]"))
    );
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "baz");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "disabled");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].name, "id");
            assert_eq!(attributes[1].value, "name");
            assert_eq!(attributes[2].name, "disabled");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize("<p a=1 a=2 b=3>");
    assert!(tokens.contains(&Token::ParseError(ParseError::DuplicateAttribute)));
    let tag = tokens
        .iter()
        .find(|t| matches!(t, Token::StartTag { .. }))
        .expect("start tag");
    let attrs: Vec<(&str, &str)> = tag
        .attributes()
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(attrs, vec![("a", "1"), ("b", "3")]);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("<div class=");
    assert_eq!(
        tokens,
        vec![Token::ParseError(ParseError::EofInTag), Token::EndOfFile]
    );
}

#[test]
fn test_null_in_data_is_an_error() {
    let tokens = tokenize("a\0b");
    assert!(tokens.contains(&Token::ParseError(ParseError::UnexpectedNullCharacter)));
    assert_eq!(text_of(&tokens), "a\0b");
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_nested_formatting_sequence() {
    let tokens = tokenize("<p>Hello <b>world</b>.</p>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert_eq!(text_of(&tokens[1..7]), "Hello ");
    assert!(matches!(&tokens[7], Token::StartTag { name, .. } if name == "b"));
    assert_eq!(text_of(&tokens[8..13]), "world");
    assert!(matches!(&tokens[13], Token::EndTag { name, .. } if name == "b"));
    assert!(matches!(tokens[14], Token::Character { data: '.' }));
    assert!(matches!(&tokens[15], Token::EndTag { name, .. } if name == "p"));
    assert!(tokens[16].is_eof());
}

#[test]
fn test_simple_html_document() {
    let html = r"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>";
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    // Count tag tokens
    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();

    assert_eq!(start_tags, 4); // html, head, title, body
    assert_eq!(end_tags, 4); // /title, /head, /body, /html
}

#[test]
fn test_crlf_is_normalized() {
    assert_eq!(text_of(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

// ========== Pull interface ==========

#[test]
fn test_next_token_repeats_eof() {
    let mut tokenizer = HTMLTokenizer::new("x");
    assert_eq!(tokenizer.next_token(), Token::Character { data: 'x' });
    assert!(tokenizer.next_token().is_eof());
    assert!(tokenizer.next_token().is_eof());
}

#[test]
fn test_peek_does_not_consume() {
    let mut tokenizer = HTMLTokenizer::new("<a>");
    assert!(tokenizer.peek_token().is_start_tag_named(&["a"]));
    assert!(tokenizer.next_token().is_start_tag_named(&["a"]));
    assert!(tokenizer.peek_token().is_eof());
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut tokenizer = HTMLTokenizer::new("");
    assert_eq!(tokenizer.next(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next(), None);
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize_after_first_tag("<style>body { color: red; }</style>", LexMode::Rawtext);

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert_eq!(text_of(&tokens[1..tokens.len() - 2]), "body { color: red; }");

    // Last tokens should be </style> and EOF
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize_after_first_tag("<title>My Page</title>", LexMode::Rcdata);

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));
    assert_eq!(text_of(&tokens[1..tokens.len() - 2]), "My Page");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize_after_first_tag("<style><div>not a tag</div></style>", LexMode::Rawtext);

    assert_eq!(text_of(&tokens), "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_title_with_less_than_and_references() {
    let tokens = tokenize_after_first_tag("<title>a < b &amp; c</title>", LexMode::Rcdata);
    assert_eq!(text_of(&tokens), "a < b & c");
}

#[test]
fn test_rawtext_ignores_references() {
    let tokens = tokenize_after_first_tag("<xmp>&amp;</xmp>", LexMode::Rawtext);
    assert_eq!(text_of(&tokens), "&amp;");
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize_after_first_tag("<style>a</notastyle>b</style>", LexMode::Rawtext);
    assert_eq!(text_of(&tokens), "a</notastyle>b");
}

#[test]
fn test_appropriate_end_tag_can_be_set() {
    let mut tokenizer = HTMLTokenizer::new("x</textarea>");
    tokenizer.set_last_start_tag("textarea");
    tokenizer.switch_to(LexMode::Rcdata);
    let tokens: Vec<Token> = tokenizer.collect();
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_restore_previous_returns_to_data() {
    let mut tokenizer = HTMLTokenizer::new("<title>t</title><b>");
    let _ = tokenizer.next_token();
    tokenizer.switch_to(LexMode::Rcdata);
    assert_eq!(tokenizer.next_token(), Token::Character { data: 't' });
    assert!(matches!(tokenizer.next_token(), Token::EndTag { name, .. } if name == "title"));
    tokenizer.restore_previous();
    assert!(tokenizer.next_token().is_start_tag_named(&["b"]));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_after_first_tag("<plaintext></plaintext><b>", LexMode::Plaintext);
    assert_eq!(text_of(&tokens), "</plaintext><b>");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

// ========== Script data ==========

#[test]
fn test_script_data_ends_at_script_end_tag() {
    let tokens = tokenize_after_first_tag("<script>if (a < b) {}</script>", LexMode::ScriptData);
    assert_eq!(text_of(&tokens), "if (a < b) {}");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_double_escape_hides_end_tag() {
    // Inside <!-- <script> ... the first </script> only leaves the double
    // escape; the second one ends the element.
    let input = "<script><!--<script></script>--></script>";
    let tokens = tokenize_after_first_tag(input, LexMode::ScriptData);
    assert_eq!(text_of(&tokens), "<!--<script></script>-->");
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();
    assert_eq!(end_tags, 1);
}

#[test]
fn test_eof_in_script_comment_like_text() {
    let tokens = tokenize_after_first_tag("<script><!--", LexMode::ScriptData);
    assert!(
        tokens.contains(&Token::ParseError(
            ParseError::EofInScriptHtmlCommentLikeText
        ))
    );
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    // Should be: 'a', ' ', '&', ' ', 'b', EOF
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[0], Token::Character { data: 'a' }));
    assert!(matches!(tokens[1], Token::Character { data: ' ' }));
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(matches!(tokens[3], Token::Character { data: ' ' }));
    assert!(matches!(tokens[4], Token::Character { data: 'b' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_named_character_reference_amp() {
    // [§ 13.2.5.73 Named character reference state]
    assert_eq!(text_of(&tokenize("a &amp; b")), "a & b");
}

#[test]
fn test_named_character_reference_lt_gt() {
    assert_eq!(text_of(&tokenize("&lt;div&gt;")), "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon still resolve, with an error
    let tokens = tokenize("&amp is ok");
    assert_eq!(text_of(&tokens), "& is ok");
    assert!(
        tokens.contains(&Token::ParseError(
            ParseError::MissingSemicolonAfterCharacterReference
        ))
    );
}

#[test]
fn test_longest_legacy_prefix_wins_in_text() {
    // "&notit;" is not an entity, but "&not" is a legacy one.
    assert_eq!(text_of(&tokenize("&notit;")), "\u{AC}it;");
}

#[test]
fn test_named_character_reference_unknown() {
    // Unknown entities pass through as-is
    let tokens = tokenize("&zzzz;");
    assert_eq!(text_of(&tokens), "&zzzz;");
    assert!(
        tokens.contains(&Token::ParseError(
            ParseError::UnknownNamedCharacterReference
        ))
    );
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?a=1&b=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alnum_is_literal() {
    let tokens = tokenize_clean(r#"<a href="?x=1&notit=2">"#);
    assert_eq!(tokens[0].attributes()[0].value, "?x=1&notit=2");
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X63;")), "ABc");
}

#[test]
fn test_numeric_reference_replacements() {
    let tokens = tokenize("&#0;&#x80;&#xD800;&#x110000;");
    assert_eq!(text_of(&tokens), "\u{FFFD}\u{20AC}\u{FFFD}\u{FFFD}");
    let codes = errors("&#0;&#x80;&#xD800;&#x110000;");
    assert_eq!(
        codes,
        vec![
            ParseError::NullCharacterReference,
            ParseError::ControlCharacterReference,
            ParseError::SurrogateCharacterReference,
            ParseError::CharacterReferenceOutsideUnicodeRange,
        ]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    let tokens = tokenize("&#;");
    assert_eq!(text_of(&tokens), "&#;");
    assert!(
        tokens.contains(&Token::ParseError(
            ParseError::AbsenceOfDigitsInNumericCharacterReference
        ))
    );
}

/// Write tokens back out as markup, escaping only what would change meaning.
fn serialize(tokens: &[Token]) -> String {
    let escape = |text: &str| {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('"', "&quot;")
    };
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Doctype { name, .. } => {
                out.push_str(&format!("<!DOCTYPE {}>", name.as_deref().unwrap_or("")));
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                out.push('<');
                out.push_str(name);
                for attr in attributes {
                    out.push_str(&format!(" {}=\"{}\"", attr.name, escape(&attr.value)));
                }
                out.push_str(if *self_closing { "/>" } else { ">" });
            }
            Token::EndTag { name, .. } => out.push_str(&format!("</{name}>")),
            Token::Comment { data } => out.push_str(&format!("<!--{data}-->")),
            Token::Character { data } => out.push_str(&escape(&data.to_string())),
            Token::ParseError(_) | Token::EndOfFile => {}
        }
    }
    out
}

#[test]
fn test_retokenizing_serialized_tokens_is_stable() {
    let input = "<!DOCTYPE html><p class=\"a &amp; b\" id=x>Hello &lt;<b>world</b>.</p>\
                 <br/><!-- note -->&copy; 2024";
    let first = tokenize_clean(input);
    let second = tokenize_clean(&serialize(&first));
    assert_eq!(first, second);
    assert!(errors(&serialize(&first)).is_empty());
}
