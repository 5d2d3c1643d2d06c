//! The insertion modes after the body and for framesets.
//!
//! [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
//! through
//! [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)

use super::core::{HTMLParser, InsertionMode, is_parser_whitespace};
use super::sink::TreeSink;
use crate::input::CharSource;
use crate::tokenizer::Token;

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Process the token using the rules for the "in body"
            // insertion mode."
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }

            // "A comment token: Insert a comment as the last child of the first
            //  element in the stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or_else(|| self.sink.document());
                self.insert_comment_in(html, data);
            }

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html": ... Otherwise, switch the
            //  insertion mode to "after after body"."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }

            Token::EndOfFile => self.stop_parsing(),

            // "Anything else: Parse error. Switch the insertion mode to "in
            //  body" and reprocess the token."
            _ => {
                self.unexpected(token);
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
            }

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                //  parse error; ignore the token."
                if self.stack_of_open_elements.len() <= 1 {
                    self.unexpected(token);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                //  elements."
                let _ = self.stack_of_open_elements.pop();
                // "If the parser was not created as part of the HTML fragment
                //  parsing algorithm (fragment case), and the current node is
                //  no longer a frameset element, then switch the insertion mode
                //  to "after frameset"."
                if !self.current_node_is(&["frameset"]) {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "A start tag whose tag name is "frame": Insert an HTML element
            //  for the token. Immediately pop the current node off the stack of
            //  open elements."
            Token::StartTag { name, .. } if name == "frame" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),

            // "An end-of-file token: If the current node is not the root html
            //  element, then this is a parse error. Stop parsing."
            Token::EndOfFile => {
                if self.stack_of_open_elements.len() > 1 {
                    self.unexpected(token);
                }
                self.stop_parsing();
            }

            _ => self.unexpected(token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }

            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),

            Token::EndOfFile => self.stop_parsing(),

            _ => self.unexpected(token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(document, data);
            }

            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => self.stop_parsing(),

            _ => {
                self.unexpected(token);
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.insert_comment_in(document, data);
            }

            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => self.stop_parsing(),

            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),

            _ => self.unexpected(token),
        }
    }
}
