//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use wombat_dom::QuirksMode;

use super::core::{HTMLParser, InsertionMode, is_parser_whitespace};
use super::insertion::implied_start_tag;
use super::sink::TreeSink;
use super::stack::{Scope, is_special_element};
use crate::input::CharSource;
use crate::tokenizer::{LexMode, Token};

/// Elements that may still be open at `</body>` or end of file without a
/// parse error.
const MAY_REMAIN_OPEN: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    #[allow(clippy::too_many_lines)]
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            //  token."
            Token::Character { data: '\0' } => self.unexpected(token),

            // Whitespace: "Reconstruct the active formatting elements, if any.
            // Insert the token's character."
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
            }

            // "Any other character token: Reconstruct the active formatting
            //  elements, if any. Insert the token's character. Set the
            //  frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
                self.frameset_ok = false;
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } => self.in_body_start_tag(name, token),

            Token::EndTag { name, .. } => self.in_body_end_tag(name, token),

            // "An end-of-file token: If the stack of template insertion modes
            //  is not empty, then process the token using the rules for the
            //  "in template" insertion mode. Otherwise, follow these steps: If
            //  there is a node in the stack of open elements that is not
            //  either a dd element, ... or the html element, then this is a
            //  parse error. Stop parsing."
            Token::EndOfFile => {
                if self.stack_has_element_not_in(MAY_REMAIN_OPEN) {
                    self.parse_error("end of file with elements still open");
                }
                self.stop_parsing();
            }

            Token::ParseError(_) => {}
        }
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_start_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "A start tag whose tag name is "html": Parse error. If there is a
            //  template element on the stack of open elements, then ignore the
            //  token. Otherwise, for each attribute on the token, check to see
            //  if the attribute is already present on the top element of the
            //  stack of open elements. If it is not, add the attribute and its
            //  corresponding value to that element."
            "html" => {
                self.unexpected(token);
                if self.stack_contains(&["template"]) {
                    return;
                }
                if let Some(&html) = self.stack_of_open_elements.first() {
                    self.sink.add_attributes_if_missing(html, token.attributes());
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title": Process the token using the rules for the
            //  "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body": Parse error. If the
            //  second element on the stack of open elements is not a body
            //  element, if the stack of open elements has only one node on it,
            //  or if there is a template element on the stack of open
            //  elements, then ignore the token. Otherwise, set the frameset-ok
            //  flag to "not ok"; then, for each attribute on the token, check
            //  to see if the attribute is already present on the body element
            //  (the second element) on the stack of open elements, and if it is
            //  not, add the attribute and its corresponding value to that
            //  element."
            "body" => {
                self.unexpected(token);
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if self.stack_contains(&["template"]) {
                    return;
                }
                self.frameset_ok = false;
                self.sink.add_attributes_if_missing(body, token.attributes());
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements has only one node on it, or if
                //  the second element on the stack of open elements is not a
                //  body element, then ignore the token."
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if !self.frameset_ok {
                    return;
                }
                // "Otherwise, run the following steps:"
                // STEP 1: "Remove the second element on the stack of open
                //          elements from its parent node, if it has one."
                if let Some(parent) = self.sink.parent(body) {
                    self.sink.remove_child(parent, body);
                }
                // STEP 2: "Pop all the nodes from the bottom of the stack of
                //          open elements, from the current node up to, but not
                //          including, the root html element."
                self.stack_of_open_elements.truncate(1);
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 4: "Switch the insertion mode to "in frameset"."
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "center", "details", "dialog", "dir",
            //  "div", "dl", "fieldset", "figcaption", "figure", "footer",
            //  "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            //  "section", "summary", "ul": If the stack of open elements has a p
            //  element in button scope, then close a p element. Insert an HTML
            //  element for the token."
            "address" | "article" | "aside" | "blockquote" | "center" | "details" | "dialog"
            | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure" | "footer" | "header"
            | "hgroup" | "main" | "menu" | "nav" | "ol" | "p" | "search" | "section"
            | "summary" | "ul" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6""
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                //  of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                //  parse error; pop the current node off the stack of open
                //  elements."
                if self.current_node_is(HEADINGS) {
                    self.unexpected(token);
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character
                //  token, then ignore that token and move on to the next one.
                //  (Newlines at the start of pre blocks are ignored as an
                //  authoring convenience.)"
                self.ignore_next_line_feed = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                //  template element on the stack of open elements, then this is
                //  a parse error; ignore the token."
                let has_template = self.stack_contains(&["template"]);
                if self.form_element_pointer.is_some() && !has_template {
                    self.unexpected(token);
                    return;
                }
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                // "If there is no template element on the stack of open
                //  elements, set the form element pointer to point to the
                //  element created."
                if !has_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li"" and "A start tag whose tag
            // name is one of: "dd", "dt""
            "li" => self.start_list_item(token, &["li"]),
            "dd" | "dt" => self.start_list_item(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext": If the stack of open
            //  elements has a p element in button scope, then close a p
            //  element. Insert an HTML element for the token. Switch the
            //  tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.switch_tokenizer_to_plaintext();
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in
                //  scope, then run these substeps: Parse error. Generate
                //  implied end tags. Pop elements from the stack of open
                //  elements until a button element has been popped from the
                //  stack."
                if self.has_element_in_scope("button", Scope::Default) {
                    self.unexpected(token);
                    self.generate_implied_end_tags(None);
                    self.pop_until("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                //  element between the end of the list and the last marker on
                //  the list (or the start of the list if there is no marker on
                //  the list), then this is a parse error; run the adoption
                //  agency algorithm for the token, then remove that element
                //  from the list of active formatting elements and the stack of
                //  open elements if the adoption agency algorithm didn't
                //  already remove it (it might not have if the element is not
                //  in table scope)."
                if let Some((_, existing)) = self.formatting_element_after_last_marker("a") {
                    self.unexpected(token);
                    self.run_adoption_agency("a");
                    if let Some(index) = self.formatting_entry_index(existing) {
                        let _ = self.active_formatting_elements.remove(index);
                    }
                    self.remove_from_stack(existing);
                }
                // "Reconstruct the active formatting elements, if any. Insert
                //  an HTML element for the token. Push onto the list of active
                //  formatting elements that element."
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            //  "font", "i", "s", "small", "strike", "strong", "tt", "u""
            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
            | "tt" | "u" => {
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                //  then this is a parse error; run the adoption agency
                //  algorithm for the token, then once again reconstruct the
                //  active formatting elements, if any."
                if self.has_element_in_scope("nobr", Scope::Default) {
                    self.unexpected(token);
                    self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                let element = self.insert_html_element(token);
                self.push_active_formatting_element(element, token);
            }

            // "A start tag whose tag name is one of: "applet", "marquee",
            //  "object": Reconstruct the active formatting elements, if any.
            //  Insert an HTML element for the token. Insert a marker at the end
            //  of the list of active formatting elements. Set the frameset-ok
            //  flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table": If the Document is not
            //  set to quirks mode, and the stack of open elements has a p
            //  element in button scope, then close a p element. Insert an HTML
            //  element for the token. Set the frameset-ok flag to "not ok".
            //  Switch the insertion mode to "in table"."
            "table" => {
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            //  "img", "keygen", "wbr": Reconstruct the active formatting
            //  elements, if any. Insert an HTML element for the token.
            //  Immediately pop the current node off the stack of open
            //  elements. Acknowledge the token's self-closing flag, if it is
            //  set. Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.insert_void_element(token);
                // "If the token does not have an attribute with the name
                //  "type", or if it does, but that attribute's value is not an
                //  ASCII case-insensitive match for the string "hidden", then:
                //  set the frameset-ok flag to "not ok"."
                if !is_hidden_input(token) {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source",
            //  "track": Insert an HTML element for the token. Immediately pop
            //  the current node off the stack of open elements."
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image": Parse error. Change the
            //  token's tag name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.unexpected(token);
                let Token::StartTag {
                    self_closing,
                    attributes,
                    ..
                } = token
                else {
                    return;
                };
                let img = Token::StartTag {
                    name: "img".to_string(),
                    self_closing: *self_closing,
                    attributes: attributes.clone(),
                };
                self.process_token(&img);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // STEP 1-4: insert the element, "If the next token is a U+000A
                //           LINE FEED (LF) character token, then ignore that
                //           token", "Switch the tokenizer to the RCDATA
                //           state", remember the original insertion mode.
                self.parse_text_only_element(token, LexMode::Rcdata);
                self.ignore_next_line_feed = true;
                // STEP 5: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "xmp": If the stack of open
            //  elements has a p element in button scope, then close a p
            //  element. Reconstruct the active formatting elements, if any.
            //  Set the frameset-ok flag to "not ok". Follow the generic raw
            //  text element parsing algorithm."
            "xmp" => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_only_element(token, LexMode::Rawtext);
            }

            // "A start tag whose tag name is "iframe": Set the frameset-ok flag
            //  to "not ok". Follow the generic raw text element parsing
            //  algorithm."
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_only_element(token, LexMode::Rawtext);
            }

            // "A start tag whose tag name is "noembed"; A start tag whose tag
            //  name is "noscript", if the scripting flag is enabled: Follow the
            //  generic raw text element parsing algorithm."
            "noembed" => self.parse_text_only_element(token, LexMode::Rawtext),
            "noscript" if self.options.scripting_enabled => {
                self.parse_text_only_element(token, LexMode::Rawtext);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                //  "in table body", "in row", or "in cell", then switch the
                //  insertion mode to "in select in table". Otherwise, switch
                //  the insertion mode to "in select"."
                self.insertion_mode = if matches!(
                    self.insertion_mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                ) {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option": If
            //  the current node is an option element, then pop the current
            //  node off the stack of open elements. Reconstruct the active
            //  formatting elements, if any. Insert an HTML element for the
            //  token."
            "optgroup" | "option" => {
                if self.current_node_is(&["option"]) {
                    let _ = self.stack_of_open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc": If the stack
            //  of open elements has a ruby element in scope, then generate
            //  implied end tags. If the current node is not now a ruby
            //  element, this is a parse error. Insert an HTML element for the
            //  token."
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is(&["ruby"]) {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt": If the stack
            //  of open elements has a ruby element in scope, then generate
            //  implied end tags, except for rtc elements. If the current node
            //  is not now a rtc element or a ruby element, this is a parse
            //  error. Insert an HTML element for the token."
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !self.current_node_is(&["rtc", "ruby"]) {
                        self.unexpected(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            //  "thead", "tr": Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.unexpected(token),

            // "Any other start tag: Reconstruct the active formatting
            //  elements, if any. Insert an HTML element for the token."
            //
            // `math` and `svg` land here too: without foreign content they
            // are ordinary elements, and a self-closing one is popped at once.
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                if matches!(name, "math" | "svg")
                    && matches!(token, Token::StartTag { self_closing: true, .. })
                {
                    let _ = self.stack_of_open_elements.pop();
                }
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_end_tag(&mut self, name: &str, token: &Token) {
        match name {
            "template" => self.handle_in_head_mode(token),

            // "An end tag whose tag name is "body""
            "body" => {
                // "If the stack of open elements does not have a body element
                //  in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body", Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                // "Otherwise, if there is a node in the stack of open elements
                //  that is not either a dd element, ... or the html element,
                //  then this is a parse error."
                if self.stack_has_element_not_in(MAY_REMAIN_OPEN) {
                    self.parse_error("</body> with elements still open");
                }
                // "Switch the insertion mode to "after body"."
                self.insertion_mode = InsertionMode::AfterBody;
            }

            // "An end tag whose tag name is "html""
            "html" => {
                if !self.has_element_in_scope("body", Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                if self.stack_has_element_not_in(MAY_REMAIN_OPEN) {
                    self.parse_error("</html> with elements still open");
                }
                // "Switch the insertion mode to "after body". Reprocess the
                //  token."
                self.reprocess_in(InsertionMode::AfterBody, token);
            }

            // "An end tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "button", "center", "details", "dialog",
            //  "dir", "div", "dl", "fieldset", "figcaption", "figure",
            //  "footer", "header", "hgroup", "listing", "main", "menu", "nav",
            //  "ol", "pre", "search", "section", "summary", "ul""
            "address" | "article" | "aside" | "blockquote" | "button" | "center" | "details"
            | "dialog" | "dir" | "div" | "dl" | "fieldset" | "figcaption" | "figure"
            | "footer" | "header" | "hgroup" | "listing" | "main" | "menu" | "nav" | "ol"
            | "pre" | "search" | "section" | "summary" | "ul" => {
                self.close_element_in_scope(name, Scope::Default, token);
            }

            // "An end tag whose tag name is "form""
            "form" => self.end_form(token),

            // "An end tag whose tag name is "p": If the stack of open elements
            //  does not have a p element in button scope, then this is a parse
            //  error; insert an HTML element for a "p" start tag token with no
            //  attributes. Close a p element."
            "p" => {
                if !self.has_element_in_scope("p", Scope::Button) {
                    self.unexpected(token);
                    let _ = self.insert_html_element(&implied_start_tag("p"));
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => self.close_element_in_scope(name, Scope::ListItem, token),

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.close_element_in_scope(name, Scope::Default, token),

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6""
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element and whose tag name is one of
                //  "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                //  error; ignore the token."
                if !self.has_any_in_scope(HEADINGS, Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(&[name]) {
                    self.unexpected(token);
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            //  "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            //  "tt", "u": Run the adoption agency algorithm for the token."
            "a" | "b" | "big" | "code" | "em" | "font" | "i" | "nobr" | "s" | "small"
            | "strike" | "strong" | "tt" | "u" => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            //  "object""
            "applet" | "marquee" | "object" => {
                if !self.has_element_in_scope(name, Scope::Default) {
                    self.unexpected(token);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(&[name]) {
                    self.unexpected(token);
                }
                self.pop_until(name);
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br": Parse error. Drop the
            //  attributes from the token, and act as described in the next
            //  entry; i.e. act as if this was a "br" start tag token with no
            //  attributes, rather than the end tag token that it actually is."
            "br" => {
                self.unexpected(token);
                self.insert_void_element(&implied_start_tag("br"));
                self.frameset_ok = false;
            }

            // "Any other end tag"
            _ => self.any_other_end_tag_in_body(name),
        }
    }

    /// The second element on the stack, when it is a `body` element.
    fn second_element_if_body(&self) -> Option<S::Handle> {
        self.stack_of_open_elements
            .get(1)
            .copied()
            .filter(|&node| self.name_of(node) == "body")
    }

    /// Reconstruct, insert, and immediately pop an element with no content.
    fn insert_void_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let _ = self.insert_html_element(token);
        let _ = self.stack_of_open_elements.pop();
    }

    /// The shared shape of most block end tags: "If the stack of open
    /// elements does not have an element in scope that is an HTML element
    /// with the same tag name as that of the token, then this is a parse
    /// error; ignore the token. Otherwise, run these steps: Generate implied
    /// end tags [except for the token's own name]. If the current node is not
    /// an HTML element with the same tag name as that of the token, then this
    /// is a parse error. Pop elements from the stack of open elements until
    /// an HTML element with the same tag name as the token has been popped
    /// from the stack."
    fn close_element_in_scope(&mut self, name: &str, scope: Scope, token: &Token) {
        if !self.has_element_in_scope(name, scope) {
            self.unexpected(token);
            return;
        }
        self.generate_implied_end_tags(Some(name));
        if !self.current_node_is(&[name]) {
            self.unexpected(token);
        }
        self.pop_until(name);
    }

    /// "A start tag whose tag name is "li"" and "A start tag whose tag name
    /// is one of: "dd", "dt"". `closes` lists the names that end an open item.
    fn start_list_item(&mut self, token: &Token, closes: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        // STEP 3: "Loop: If node is an li element [or a dd or dt element],
        //          then run these substeps: Generate implied end tags, except
        //          for [that] element. If the current node is not an li element,
        //          then this is a parse error. Pop elements from the stack of
        //          open elements until an li element has been popped from the
        //          stack. Jump to the step labeled done below."
        // STEP 4: "If node is in the special category, but is not an address,
        //          div, or p element, then jump to the step labeled done below."
        // STEP 5: "Otherwise, set node to the previous entry in the stack of
        //          open elements and return to the step labeled loop."
        let mut open_item = None;
        for &node in self.stack_of_open_elements.iter().rev() {
            let node_name = self.name_of(node);
            if closes.contains(&node_name) {
                open_item = Some(node_name.to_string());
                break;
            }
            if is_special_element(node_name) && !matches!(node_name, "address" | "div" | "p") {
                break;
            }
        }
        if let Some(item) = open_item {
            self.generate_implied_end_tags(Some(item.as_str()));
            if !self.current_node_is(&[item.as_str()]) {
                self.parse_error("list item closed with other elements open");
            }
            self.pop_until(&item);
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_element_in_button_scope();
        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(token);
    }

    /// "An end tag whose tag name is "form""
    fn end_form(&mut self, token: &Token) {
        // "If there is no template element on the stack of open elements, then
        //  run these substeps:"
        if !self.stack_contains(&["template"]) {
            // STEP 1: "Let node be the element that the form element pointer
            //          is set to, or null if it is not set to an element."
            // STEP 2: "Set the form element pointer to null."
            let node = self.form_element_pointer.take();
            // STEP 3: "If node is null or if the stack of open elements does
            //          not have node in scope, then this is a parse error;
            //          return and ignore the token."
            let Some(node) = node.filter(|&node| self.has_node_in_scope(node, Scope::Default))
            else {
                self.unexpected(token);
                return;
            };
            // STEP 4: "Generate implied end tags."
            self.generate_implied_end_tags(None);
            // STEP 5: "If the current node is not node, then this is a parse
            //          error."
            if self.current_node() != Some(node) {
                self.unexpected(token);
            }
            // STEP 6: "Remove node from the stack of open elements."
            self.remove_from_stack(node);
            return;
        }

        // "If there is a template element on the stack of open elements, then
        //  run these substeps instead:"
        if !self.has_element_in_scope("form", Scope::Default) {
            self.unexpected(token);
            return;
        }
        self.generate_implied_end_tags(None);
        if !self.current_node_is(&["form"]) {
            self.unexpected(token);
        }
        self.pop_until("form");
    }

    /// "Any other end tag"
    pub(super) fn any_other_end_tag_in_body(&mut self, subject: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let node_name = self.name_of(node);

            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then: Generate implied end tags, except
            //          for HTML elements with the same tag name as the token.
            //          If node is not the current node, then this is a parse
            //          error. Pop all the nodes from the current node up to
            //          node, including node, then stop these steps."
            if node_name == subject {
                self.generate_implied_end_tags(Some(subject));
                if self.current_node() != Some(node) {
                    self.parse_error(&format!("end tag </{subject}> with elements still open"));
                }
                self.pop_until_node(node);
                return;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if is_special_element(node_name) {
                self.parse_error(&format!("stray end tag </{subject}>"));
                return;
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            //          elements."
        }
    }
}

/// `<input type=hidden>`, compared ASCII case-insensitively.
pub(super) fn is_hidden_input(token: &Token) -> bool {
    token
        .attributes()
        .iter()
        .find(|attr| attr.name == "type")
        .is_some_and(|attr| attr.value.eq_ignore_ascii_case("hidden"))
}

