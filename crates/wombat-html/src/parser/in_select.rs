//! [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)

use super::core::HTMLParser;
use super::sink::TreeSink;
use super::stack::Scope;
use crate::input::CharSource;
use crate::tokenizer::Token;

const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    pub(super) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data: '\0' } => self.unexpected(token),

            // "Any other character token: Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "option": If the current node is
            //  an option element, pop that node from the stack of open
            //  elements. Insert an HTML element for the token."
            Token::StartTag { name, .. } if name == "option" => {
                if self.current_node_is(&["option"]) {
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "optgroup"" and "A start tag whose
            // tag name is "hr"": close any open option and optgroup first.
            Token::StartTag { name, .. } if matches!(name.as_str(), "optgroup" | "hr") => {
                if self.current_node_is(&["option"]) {
                    let _ = self.stack_of_open_elements.pop();
                }
                if self.current_node_is(&["optgroup"]) {
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
                if name == "hr" {
                    let _ = self.stack_of_open_elements.pop();
                }
            }

            // "An end tag whose tag name is "optgroup""
            Token::EndTag { name, .. } if name == "optgroup" => {
                // "First, if the current node is an option element, and the
                //  node immediately before it in the stack of open elements is
                //  an optgroup element, then pop the current node from the
                //  stack of open elements."
                let len = self.stack_of_open_elements.len();
                if len >= 2
                    && self.current_node_is(&["option"])
                    && self.name_of(self.stack_of_open_elements[len - 2]) == "optgroup"
                {
                    let _ = self.stack_of_open_elements.pop();
                }
                // "If the current node is an optgroup element, then pop that
                //  node from the stack of open elements. Otherwise, this is a
                //  parse error; ignore the token."
                if self.current_node_is(&["optgroup"]) {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "option""
            Token::EndTag { name, .. } if name == "option" => {
                if self.current_node_is(&["option"]) {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "select": If the stack of open
            //  elements does not have a select element in select scope, this
            //  is a parse error; ignore the token. Otherwise: Pop elements from
            //  the stack of open elements until a select element has been
            //  popped from the stack. Reset the insertion mode appropriately."
            Token::EndTag { name, .. } if name == "select" => {
                if !self.has_element_in_scope("select", Scope::Select) {
                    self.unexpected(token);
                    return;
                }
                self.close_select();
            }

            // "A start tag whose tag name is "select": Parse error. If the
            //  stack of open elements does not have a select element in select
            //  scope, ignore the token. Otherwise: [close the select]."
            Token::StartTag { name, .. } if name == "select" => {
                self.unexpected(token);
                if self.has_element_in_scope("select", Scope::Select) {
                    self.close_select();
                }
            }

            // "A start tag whose tag name is one of: "input", "keygen",
            //  "textarea": Parse error. If the stack of open elements does not
            //  have a select element in select scope, ignore the token.
            //  Otherwise: [close the select]. Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "input" | "keygen" | "textarea") =>
            {
                self.unexpected(token);
                if self.has_element_in_scope("select", Scope::Select) {
                    self.close_select();
                    self.process_token(token);
                }
            }

            Token::StartTag { name, .. } if matches!(name.as_str(), "script" | "template") => {
                self.handle_in_head_mode(token);
            }
            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: Parse error. Ignore the token."
            _ => self.unexpected(token),
        }
    }

    fn close_select(&mut self) {
        self.pop_until("select");
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            //  "tbody", "tfoot", "thead", "tr", "td", "th": Parse error. Pop
            //  elements from the stack of open elements until a select element
            //  has been popped from the stack. Reset the insertion mode
            //  appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.close_select();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "caption", "table",
            //  "tbody", "tfoot", "thead", "tr", "td", "th": Parse error. If the
            //  stack of open elements does not have an element in table scope
            //  that is an HTML element with the same tag name as that of the
            //  token, then ignore the token. Otherwise: [close the select].
            //  Reprocess the token."
            Token::EndTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                if self.has_element_in_scope(name, Scope::Table) {
                    self.close_select();
                    self.process_token(token);
                }
            }

            _ => self.handle_in_select_mode(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{HTMLParser, InsertionMode};

    #[test]
    fn select_inside_table_uses_table_variant() {
        let mut parser = HTMLParser::new("<table><tr><td><select><option>");
        while parser.insertion_mode() != InsertionMode::InSelectInTable {
            assert!(parser.step(), "parser stopped before reaching the select");
        }
        assert_eq!(parser.insertion_mode(), InsertionMode::InSelectInTable);
    }

    #[test]
    fn template_between_select_and_table_hides_the_table() {
        let mut parser =
            HTMLParser::new("<table><tr><td><template><select><template></template>");
        while parser.step() {}
        assert_eq!(parser.insertion_mode(), InsertionMode::InSelect);
    }
}
