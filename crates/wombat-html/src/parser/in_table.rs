//! The table insertion modes.
//!
//! [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! through
//! [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)

use super::core::{HTMLParser, InsertionMode, is_parser_whitespace};
use super::in_body::is_hidden_input;
use super::sink::TreeSink;
use super::stack::Scope;
use crate::input::CharSource;
use crate::tokenizer::Token;

/// End tags that every table mode below "in table" treats as a parse error.
const TABLE_STRUCTURE_END_TAGS: &[&str] = &[
    "body", "caption", "col", "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr",
];

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    #[allow(clippy::too_many_lines)]
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            //  template, tfoot, thead, or tr element: Let the pending table
            //  character tokens be an empty list of tokens. Set the original
            //  insertion mode to the current insertion mode. Switch the
            //  insertion mode to "in table text" and reprocess the token."
            Token::Character { .. }
                if self.current_node_is(&["table", "tbody", "template", "tfoot", "thead", "tr"]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.reprocess_in(InsertionMode::InTableText, token);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            // "A start tag whose tag name is "caption": Clear the stack back to
            //  a table context. Insert a marker at the end of the list of
            //  active formatting elements. Insert an HTML element for the
            //  token, then switch the insertion mode to "in caption"."
            Token::StartTag { name, .. } if name == "caption" => {
                self.clear_stack_back_to_table_context();
                self.insert_marker();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCaption;
            }

            // "A start tag whose tag name is "colgroup""
            Token::StartTag { name, .. } if name == "colgroup" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InColumnGroup;
            }

            // "A start tag whose tag name is "col": Clear the stack back to a
            //  table context. Insert an HTML element for a "colgroup" start tag
            //  token with no attributes, then switch the insertion mode to "in
            //  column group". Reprocess the current token."
            Token::StartTag { name, .. } if name == "col" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_implied_element("colgroup");
                self.reprocess_in(InsertionMode::InColumnGroup, token);
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::StartTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InTableBody;
            }

            // "A start tag whose tag name is one of: "td", "th", "tr": Clear
            //  the stack back to a table context. Insert an HTML element for a
            //  "tbody" start tag token with no attributes, then switch the
            //  insertion mode to "in table body". Reprocess the current token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "td" | "th" | "tr") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_implied_element("tbody");
                self.reprocess_in(InsertionMode::InTableBody, token);
            }

            // "A start tag whose tag name is "table""
            Token::StartTag { name, .. } if name == "table" => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements does not have a table element
                //  in table scope, ignore the token."
                if !self.has_element_in_scope("table", Scope::Table) {
                    return;
                }
                // "Otherwise: Pop elements from this stack until a table
                //  element has been popped from the stack. Reset the insertion
                //  mode appropriately. Reprocess the token."
                self.pop_until("table");
                self.reset_insertion_mode_appropriately();
                self.process_token(token);
            }

            // "An end tag whose tag name is "table""
            Token::EndTag { name, .. } if name == "table" => {
                if !self.has_element_in_scope("table", Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.pop_until("table");
                self.reset_insertion_mode_appropriately();
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr":
            //  Parse error. Ignore the token."
            Token::EndTag { name, .. } if TABLE_STRUCTURE_END_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
            }

            // "A start tag whose tag name is one of: "style", "script",
            //  "template"; An end tag whose tag name is "template": Process the
            //  token using the rules for the "in head" insertion mode."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "style" | "script" | "template") =>
            {
                self.handle_in_head_mode(token);
            }
            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "input": If the token does not
            //  have an attribute with the name "type", or if it does, but that
            //  attribute's value is not an ASCII case-insensitive match for the
            //  string "hidden", then: act as described in the "anything else"
            //  entry below. Otherwise: Parse error. Insert an HTML element for
            //  the token. Pop that input element off the stack of open
            //  elements. Acknowledge the token's self-closing flag, if it is
            //  set."
            Token::StartTag { name, .. } if name == "input" && is_hidden_input(token) => {
                self.unexpected(token);
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "form": Parse error. If there is a
            //  template element on the stack of open elements, or if the form
            //  element pointer is not null, ignore the token. Otherwise: Insert
            //  an HTML element for the token, and set the form element pointer
            //  to point to the element created. Pop that form element off the
            //  stack of open elements."
            Token::StartTag { name, .. } if name == "form" => {
                self.unexpected(token);
                if self.stack_contains(&["template"]) || self.form_element_pointer.is_some() {
                    return;
                }
                let form = self.insert_html_element(token);
                self.form_element_pointer = Some(form);
                let _ = self.stack_of_open_elements.pop();
            }

            // "An end-of-file token: Process the token using the rules for the
            //  "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: Parse error. Enable foster parenting, process the
            //  token using the rules for the "in body" insertion mode, and
            //  then disable foster parenting."
            _ => {
                self.unexpected(token);
                self.process_with_foster_parenting(token);
            }
        }
    }

    fn process_with_foster_parenting(&mut self, token: &Token) {
        self.foster_parenting = true;
        self.handle_in_body_mode(token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            //  token."
            Token::Character { data: '\0' } => self.unexpected(token),

            // "Any other character token: Append the character token to the
            //  pending table character tokens list."
            Token::Character { data } => self.pending_table_character_tokens.push(*data),

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);
                // "If any of the tokens in the pending table character tokens
                //  list are character tokens that are not ASCII whitespace,
                //  then this is a parse error: reprocess the character tokens
                //  in the pending table character tokens list using the rules
                //  given in the "anything else" entry in the "in table"
                //  insertion mode."
                if pending.chars().any(|c| !is_parser_whitespace(c)) {
                    self.parse_error("non-whitespace text in table");
                    for c in pending.chars() {
                        self.process_with_foster_parenting(&Token::Character { data: c });
                    }
                } else {
                    // "Otherwise, insert the characters given by the pending
                    //  table character tokens list."
                    self.insert_text(&pending);
                }
                // "Switch the insertion mode to the original insertion mode and
                //  reprocess the token."
                let mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InTable);
                self.reprocess_in(mode, token);
            }
        }
    }

    /// "An end tag whose tag name is "caption"" steps. Returns whether a
    /// caption was closed.
    fn close_caption(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a caption element in
        //  table scope, this is a parse error; ignore the token."
        if !self.has_element_in_scope("caption", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        // "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // "Now, if the current node is not a caption element, then this is a
        //  parse error."
        if !self.current_node_is(&["caption"]) {
            self.parse_error("caption closed with other elements open");
        }
        // "Pop elements from this stack until a caption element has been
        //  popped from the stack."
        self.pop_until("caption");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Switch the insertion mode to "in table"."
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption(token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"; An end
            //  tag whose tag name is "table": [close the caption as above];
            //  reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if self.close_caption(token) {
                    self.process_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption(token) {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            //  "html", "tbody", "td", "tfoot", "th", "thead", "tr": Parse
            //  error. Ignore the token."
            Token::EndTag { name, .. }
                if name != "caption" && TABLE_STRUCTURE_END_TAGS.contains(&name.as_str()) =>
            {
                self.unexpected(token);
            }

            // "Anything else: Process the token using the rules for the "in
            //  body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_parser_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.unexpected(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "col": Insert an HTML element for
            //  the token. Immediately pop the current node off the stack of
            //  open elements."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "An end tag whose tag name is "colgroup": If the current node is
            //  not a colgroup element, then this is a parse error; ignore the
            //  token. Otherwise, pop the current node from the stack of open
            //  elements. Switch the insertion mode to "in table"."
            Token::EndTag { name, .. } if name == "colgroup" => {
                if !self.current_node_is(&["colgroup"]) {
                    self.unexpected(token);
                    return;
                }
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InTable;
            }

            Token::EndTag { name, .. } if name == "col" => self.unexpected(token),

            Token::StartTag { name, .. } if name == "template" => self.handle_in_head_mode(token),
            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: If the current node is not a colgroup element,
            //  then this is a parse error; ignore the token. Otherwise, pop
            //  the current node from the stack of open elements. Switch the
            //  insertion mode to "in table". Reprocess the token."
            _ => {
                if !self.current_node_is(&["colgroup"]) {
                    self.unexpected(token);
                    return;
                }
                let _ = self.stack_of_open_elements.pop();
                self.reprocess_in(InsertionMode::InTable, token);
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is "tr": Clear the stack back to a
            //  table body context. Insert an HTML element for the token, then
            //  switch the insertion mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "th", "td": Parse error.
            //  Clear the stack back to a table body context. Insert an HTML
            //  element for a "tr" start tag token with no attributes, then
            //  switch the insertion mode to "in row". Reprocess the current
            //  token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.unexpected(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_implied_element("tr");
                self.reprocess_in(InsertionMode::InRow, token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead"; An end tag whose tag name
            //  is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.leave_table_body(token);
            }
            Token::EndTag { name, .. } if name == "table" => self.leave_table_body(token),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th", "tr": Parse error. Ignore the
            //  token."
            Token::EndTag { name, .. } if TABLE_STRUCTURE_END_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    fn leave_table_body(&mut self, token: &Token) {
        // "If the stack of open elements does not have a tbody, thead, or
        //  tfoot element in table scope, this is a parse error; ignore the
        //  token."
        if !self.has_any_in_scope(TABLE_SECTIONS, Scope::Table) {
            self.unexpected(token);
            return;
        }
        // "Otherwise: Clear the stack back to a table body context. Pop the
        //  current node from the stack of open elements. Switch the insertion
        //  mode to "in table". Reprocess the token."
        self.clear_stack_back_to_table_body_context();
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::InTable, token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "th", "td": Clear the
            //  stack back to a table row context. Insert an HTML element for
            //  the token, then switch the insertion mode to "in cell". Insert a
            //  marker at the end of the list of active formatting elements."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCell;
                self.insert_marker();
            }

            // "An end tag whose tag name is "tr""
            Token::EndTag { name, .. } if name == "tr" => {
                let _ = self.close_row(token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead", "tr"; An end tag whose
            //  tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_row(token) {
                    self.process_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_row(token) {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead":
            //  If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token. If the stack of
            //  open elements does not have a tr element in table scope, ignore
            //  the token. Otherwise: [close the row]. Reprocess the token."
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                if self.close_row(token) {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th": Parse error. Ignore the token."
            Token::EndTag { name, .. } if TABLE_STRUCTURE_END_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    /// The "end tag whose tag name is "tr"" steps. Returns whether a row was
    /// closed.
    fn close_row(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a tr element in table
        //  scope, this is a parse error; ignore the token."
        if !self.has_element_in_scope("tr", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        // "Otherwise: Clear the stack back to a table row context. Pop the
        //  current node (which will be a tr element) from the stack of open
        //  elements. Switch the insertion mode to "in table body"."
        self.clear_stack_back_to_table_row_context();
        let _ = self.stack_of_open_elements.pop();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name, .. } if matches!(name.as_str(), "td" | "th") => {
                // "If the stack of open elements does not have an element in
                //  table scope that is an HTML element with the same tag name
                //  as that of the token, then this is a parse error; ignore the
                //  token."
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                // "Generate implied end tags."
                self.generate_implied_end_tags(None);
                // "Now, if the current node is not an HTML element with the
                //  same tag name as the token, then this is a parse error."
                if !self.current_node_is(&[name.as_str()]) {
                    self.unexpected(token);
                }
                // "Pop elements from the stack of open elements stack until an
                //  HTML element with the same tag name as the token has been
                //  popped from the stack."
                self.pop_until(name);
                // "Clear the list of active formatting elements up to the last
                //  marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Switch the insertion mode to "in row"."
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr": Assert:
            //  The stack of open elements has a td or th element in table
            //  scope. Close the cell and reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if !self.has_any_in_scope(&["td", "th"], Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html": Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(token);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            //  "thead", "tr": If the stack of open elements does not have an
            //  element in table scope that is an HTML element with the same tag
            //  name as that of the token, then this is a parse error; ignore
            //  the token. Otherwise, close the cell and reprocess the token."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected(token);
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            _ => self.handle_in_body_mode(token),
        }
    }
}
