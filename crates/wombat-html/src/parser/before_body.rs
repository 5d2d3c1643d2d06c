//! The insertion modes that run before the body: "initial" through
//! "after head", plus "text".

use wombat_dom::QuirksMode;

use super::core::{HTMLParser, InsertionMode, is_parser_whitespace};
use super::insertion::implied_start_tag;
use super::quirks::{doctype_is_conforming, quirks_mode_for_doctype};
use super::sink::TreeSink;
use crate::input::CharSource;
use crate::tokenizer::{LexMode, Token};

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    pub(super) fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
        self.sink.set_quirks_mode(mode);
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE: Ignore the token."
            Token::Character { data } if is_parser_whitespace(*data) => {}

            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(document, data);
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let name = name.as_deref();
                let public_id = public_identifier.as_deref();
                let system_id = system_identifier.as_deref();

                // "If the DOCTYPE token's name is not "html", or the token's
                //  public identifier is not missing, or the token's system
                //  identifier is neither missing nor "about:legacy-compat",
                //  then there is a parse error."
                if !doctype_is_conforming(name, public_id, system_id) {
                    self.parse_error("non-conforming DOCTYPE");
                }

                // "Append a DocumentType node to the Document node, with its
                //  name set to the name given in the DOCTYPE token, or the
                //  empty string if the name was missing; its public ID set to
                //  the public identifier given in the DOCTYPE token, or the
                //  empty string if the public identifier was missing; and its
                //  system ID set to the system identifier given in the DOCTYPE
                //  token, or the empty string if the system identifier was
                //  missing."
                let doctype = self.sink.create_document_type(
                    name.unwrap_or_default(),
                    public_id.unwrap_or_default(),
                    system_id.unwrap_or_default(),
                );
                let document = self.sink.document();
                self.sink.append_child(document, doctype);

                // "Then, if the document is not an iframe srcdoc document ...
                //  set the Document to quirks mode / limited-quirks mode"
                if !self.options.iframe_srcdoc {
                    let mode = quirks_mode_for_doctype(name, public_id, system_id, *force_quirks);
                    self.set_quirks_mode(mode);
                }

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else: If the document is not an iframe srcdoc
            //  document, then this is a parse error; if the parser cannot
            //  change the mode flag is false, set the Document to quirks mode.
            //  In any case, switch the insertion mode to "before html", then
            //  reprocess the token."
            _ => {
                if !self.options.iframe_srcdoc {
                    self.parse_error("missing DOCTYPE");
                    self.set_quirks_mode(QuirksMode::Quirks);
                }
                self.reprocess_in(InsertionMode::BeforeHtml, token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token: Parse error. Ignore the token."
            Token::Doctype { .. } => self.unexpected(token),

            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(document, data);
            }

            // Whitespace: "Ignore the token."
            Token::Character { data } if is_parser_whitespace(*data) => {}

            // "A start tag whose tag name is "html": Create an element for the
            //  token in the HTML namespace, with the Document as the intended
            //  parent. Append it to the Document object. Put this element in
            //  the stack of open elements. Switch the insertion mode to
            //  "before head"."
            Token::StartTag { name, .. } if name == "html" => {
                self.insert_document_element(token);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html",
            //  "br": Act as described in the "anything else" entry below."
            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag { name, .. } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else: Create an html element whose node document is
            //  the Document object. Append it to the Document object. Put this
            //  element in the stack of open elements. Switch the insertion
            //  mode to "before head", then reprocess the token."
            _ => {
                self.insert_document_element(&implied_start_tag("html"));
                self.reprocess_in(InsertionMode::BeforeHead, token);
            }
        }
    }

    fn insert_document_element(&mut self, token: &Token) {
        let html = self.create_element_for_token(token);
        let document = self.sink.document();
        self.sink.append_child(document, html);
        self.stack_of_open_elements.push(html);
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_parser_whitespace(*data) => {}

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head": Insert an HTML element
            //  for the token. Set the head element pointer to the newly created
            //  head element. Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
            }

            Token::EndTag { name, .. } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else: Insert an HTML element for a "head" start tag
            //  token with no attributes. Set the head element pointer to the
            //  newly created head element. Switch the insertion mode to "in
            //  head". Reprocess the current token."
            _ => {
                let head = self.insert_implied_element("head");
                self.head_element_pointer = Some(head);
                self.reprocess_in(InsertionMode::InHead, token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link": Insert an HTML element for the token.
            //  Immediately pop the current node off the stack of open
            //  elements. Acknowledge the token's self-closing flag, if it is
            //  set."
            //
            // "A start tag whose tag name is "meta"" does the same; character
            // encoding changes are not applied to already decoded input.
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "base" | "basefont" | "bgsound" | "link" | "meta") =>
            {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "title": Follow the generic
            //  RCDATA element parsing algorithm."
            Token::StartTag { name, .. } if name == "title" => {
                self.parse_text_only_element(token, LexMode::Rcdata);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is enabled; A start tag whose tag name is one of: "noframes",
            //  "style": Follow the generic raw text element parsing algorithm."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "noframes" | "style")
                    || (name == "noscript" && self.options.scripting_enabled) =>
            {
                self.parse_text_only_element(token, LexMode::Rawtext);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is disabled: Insert an HTML element for the token. Switch the
            //  insertion mode to "in head noscript"."
            Token::StartTag { name, .. } if name == "noscript" => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InHeadNoscript;
            }

            // "A start tag whose tag name is "script"": insert the element,
            // "Switch the tokenizer to the script data state", remember the
            // original insertion mode and switch to "text".
            Token::StartTag { name, .. } if name == "script" => {
                self.parse_text_only_element(token, LexMode::ScriptData);
            }

            // "An end tag whose tag name is "head": Pop the current node
            //  (which will be the head element) off the stack of open
            //  elements. Switch the insertion mode to "after head"."
            Token::EndTag { name, .. } if name == "head" => {
                self.pop_until("head");
                self.insertion_mode = InsertionMode::AfterHead;
            }

            // `<template>` has no template contents here: it is an ordinary
            // element that also scopes the list of active formatting elements.
            Token::StartTag { name, .. } if name == "template" => {
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
            }

            Token::EndTag { name, .. } if name == "template" => self.close_template(),

            // "A start tag whose tag name is "head"; Any other end tag: Parse
            //  error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => self.unexpected(token),
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else: Pop the current node (which will be the head
            //  element) off the stack of open elements. Switch the insertion
            //  mode to "after head". Reprocess the token."
            _ => {
                self.pop_until("head");
                self.reprocess_in(InsertionMode::AfterHead, token);
            }
        }
    }

    /// An end tag named `template`.
    ///
    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements, then
        //  this is a parse error; ignore the token."
        if !self.stack_contains(&["template"]) {
            self.parse_error("end tag </template> without open template");
            return;
        }
        // "Generate all implied end tags thoroughly."
        self.generate_implied_end_tags(None);
        // "If the current node is not a template element, then this is a parse
        //  error."
        if !self.current_node_is(&["template"]) {
            self.parse_error("template closed with other elements open");
        }
        // "Pop elements from the stack of open elements until a template
        //  element has been popped from the stack."
        self.pop_until("template");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "noscript": Pop the current node
            //  (which will be a noscript element) from the stack of open
            //  elements; the new current node will be a head element. Switch
            //  the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InHead;
            }

            // Whitespace, comments, and "A start tag whose tag name is one of:
            // "basefont", "bgsound", "link", "meta", "noframes", "style":
            // Process the token using the rules for the "in head" insertion
            // mode."
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.handle_in_head_mode(token);
            }
            Token::Comment { .. } => self.handle_in_head_mode(token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.handle_in_head_mode(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript"; Any
            //  other end tag: Parse error. Ignore the token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "head" | "noscript") => {
                self.unexpected(token);
            }
            Token::EndTag { name, .. } if name != "br" => self.unexpected(token),

            // "Anything else: Parse error. Pop the current node (which will be
            //  a noscript element) from the stack of open elements; the new
            //  current node will be a head element. Switch the insertion mode
            //  to "in head". Reprocess the token."
            _ => {
                self.unexpected(token);
                let _ = self.stack_of_open_elements.pop();
                self.reprocess_in(InsertionMode::InHead, token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "body": Insert an HTML element
            //  for the token. Set the frameset-ok flag to "not ok". Switch the
            //  insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InBody;
            }

            // "A start tag whose tag name is "frameset": Insert an HTML element
            //  for the token. Switch the insertion mode to "in frameset"."
            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title": Parse error. Push the node pointed to by
            //  the head element pointer onto the stack of open elements.
            //  Process the token using the rules for the "in head" insertion
            //  mode. Remove the node pointed to by the head element pointer
            //  from the stack of open elements. (It might not be the current
            //  node at this point.)"
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.unexpected(token);
                let Some(head) = self.head_element_pointer else {
                    return;
                };
                self.stack_of_open_elements.push(head);
                self.handle_in_head_mode(token);
                self.remove_from_stack(head);
            }

            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            Token::StartTag { name, .. } if name == "head" => self.unexpected(token),
            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.unexpected(token);
            }

            // "Anything else: Insert an HTML element for a "body" start tag
            //  token with no attributes. Switch the insertion mode to "in
            //  body". Reprocess the current token."
            _ => {
                let _ = self.insert_implied_element("body");
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token: Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            // "An end-of-file token: Parse error. If the current node is a
            //  script element, then set its already started to true. Pop the
            //  current node off the stack of open elements. Switch the
            //  insertion mode to the original insertion mode and reprocess the
            //  token."
            Token::EndOfFile => {
                self.unexpected(token);
                let _ = self.stack_of_open_elements.pop();
                self.leave_text_mode();
                self.process_token(token);
            }

            // "An end tag whose tag name is "script"" and "Any other end tag":
            // "Pop the current node off the stack of open elements. Switch the
            //  insertion mode to the original insertion mode."
            //
            // Scripts are never run, so both cases are the same.
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.leave_text_mode();
            }

            // The tokenizer produces nothing else while in a text-only state.
            _ => {}
        }
    }
}
