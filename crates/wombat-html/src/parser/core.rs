//! The tree constructor: its state, the token pump, and mode dispatch.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The algorithms shared by several insertion modes (node insertion, the
//! stack of open elements, active formatting elements) live in sibling
//! modules; the insertion modes themselves are grouped by the part of the
//! document they handle.

use strum_macros::Display;

use wombat_common::warning::warn_once;
use wombat_dom::{DomTree, QuirksMode};

use super::options::ParserOptions;
use super::sink::TreeSink;
use crate::error::{ParseError, ParseIssue};
use crate::input::{CharSource, StringSource};
use crate::tokenizer::{HTMLTokenizer, LexMode, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// There is no "in template" mode: `<template>` is parsed as an ordinary
/// element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list of active formatting elements... is used to handle mis-nested
/// formatting element tags."
#[derive(Debug, Clone)]
pub(super) enum ActiveFormattingElement<H> {
    /// A formatting element, with the token that created it so that it can be
    /// recreated by reconstruction or the adoption agency algorithm.
    Element {
        /// The element's handle in the sink.
        node: H,
        /// The start tag the element was created for.
        token: Token,
    },
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element."
    ///
    /// Pushed when entering applet, object, marquee, template, td, th and
    /// caption.
    Marker,
}

impl<H: Copy + Eq> ActiveFormattingElement<H> {
    pub(super) fn is_node(&self, handle: H) -> bool {
        matches!(self, Self::Element { node, .. } if *node == handle)
    }
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Pulls tokens from an [`HTMLTokenizer`] and builds a tree in a
/// [`TreeSink`]. By default the input is a string and the sink a
/// [`DomTree`].
pub struct HTMLParser<S: TreeSink = DomTree, C: CharSource = StringSource> {
    tokenizer: HTMLTokenizer<C>,
    pub(super) sink: S,
    pub(super) options: ParserOptions,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// Where the "text" and "in table text" modes return to.
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Index 0 is the `html` element; the last entry is the current node.
    pub(super) stack_of_open_elements: Vec<S::Handle>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement<S::Handle>>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<S::Handle>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<S::Handle>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created. It is
    /// set to "not ok" after certain tokens are seen."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "the pending table character tokens list"
    pub(super) pending_table_character_tokens: String,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: "If the next token is
    /// a U+000A LINE FEED (LF) character token, then ignore that token".
    pub(super) ignore_next_line_feed: bool,

    pub(super) quirks_mode: QuirksMode,

    /// Number of tokens handed to the insertion modes so far.
    token_index: usize,

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    stopped: bool,

    issues: Vec<ParseIssue>,
}

impl HTMLParser<DomTree, StringSource> {
    /// Create a parser over an in-memory document, building a [`DomTree`].
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Like [`HTMLParser::new`] with explicit options.
    #[must_use]
    pub fn with_options(input: &str, options: ParserOptions) -> Self {
        Self::from_parts(HTMLTokenizer::new(input), DomTree::new(), options)
    }
}

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// Create a parser from an existing tokenizer and sink.
    ///
    /// The tokenizer should be fresh; the parser takes over switching its
    /// content model.
    #[must_use]
    pub fn from_parts(tokenizer: HTMLTokenizer<C>, sink: S, options: ParserOptions) -> Self {
        Self {
            tokenizer,
            sink,
            options,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_character_tokens: String::new(),
            ignore_next_line_feed: false,
            quirks_mode: QuirksMode::NoQuirks,
            token_index: 0,
            stopped: false,
            issues: Vec::new(),
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The document's mode as decided by the DOCTYPE (or its absence).
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The sink being built.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Parse the whole input and return the sink.
    #[must_use]
    pub fn run(self) -> S {
        self.run_with_issues().0
    }

    /// Parse the whole input and return the sink together with every issue
    /// recorded along the way (empty when issue collection is off).
    #[must_use]
    pub fn run_with_issues(mut self) -> (S, Vec<ParseIssue>) {
        while self.step() {}
        (self.sink, self.issues)
    }

    /// Pull one token from the tokenizer and hand it to the tree constructor.
    ///
    /// Returns `false` once parsing has stopped.
    pub fn step(&mut self) -> bool {
        if self.stopped {
            return false;
        }

        let token = self.tokenizer.next_token();
        if let Token::ParseError(code) = token {
            self.lexical_error(code);
            return true;
        }

        if std::mem::take(&mut self.ignore_next_line_feed)
            && matches!(token, Token::Character { data: '\n' })
        {
            self.token_index += 1;
            return true;
        }

        self.process_token(&token);
        self.token_index += 1;

        // Every mode ends up stopping on EOF; this only guards the loop.
        if token.is_eof() {
            self.stopped = true;
        }
        !self.stopped
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Every node is an HTML element, so the "adjusted current node" is always
    /// in the HTML namespace and every token goes to the current insertion
    /// mode.
    pub(super) fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// "Reprocess the token": switch modes and hand the same token to the new
    /// mode.
    pub(super) fn reprocess_in(&mut self, mode: InsertionMode, token: &Token) {
        self.insertion_mode = mode;
        self.process_token(token);
    }

    fn record(&mut self, issue: ParseIssue) {
        if self.options.log_errors {
            let component = if issue.code.is_some() {
                "HTML Tokenizer"
            } else {
                "HTML Parser"
            };
            warn_once(component, &issue.message);
        }
        self.sink.parse_error(&issue);
        if self.options.collect_issues {
            self.issues.push(issue);
        }
    }

    fn lexical_error(&mut self, code: ParseError) {
        self.record(ParseIssue::lexical(code, self.token_index));
    }

    /// Record a tree-construction parse error.
    pub(super) fn parse_error(&mut self, message: &str) {
        self.record(ParseIssue::structural(message, self.token_index));
    }

    /// The common "Parse error. Ignore the token." message, naming the token
    /// and the mode it arrived in.
    pub(super) fn unexpected(&mut self, token: &Token) {
        let message = match token {
            Token::StartTag { name, .. } => {
                format!("unexpected start tag <{name}> in {}", self.insertion_mode)
            }
            Token::EndTag { name, .. } => {
                format!("unexpected end tag </{name}> in {}", self.insertion_mode)
            }
            Token::Doctype { .. } => format!("unexpected DOCTYPE in {}", self.insertion_mode),
            Token::Character { data } => {
                format!("unexpected character {data:?} in {}", self.insertion_mode)
            }
            Token::Comment { .. } => format!("unexpected comment in {}", self.insertion_mode),
            Token::ParseError(code) => code.to_string(),
            Token::EndOfFile => format!("unexpected end of file in {}", self.insertion_mode),
        };
        self.parse_error(&message);
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// The generic raw text and generic RCDATA element parsing algorithms, and
    /// the script data variant used for `<script>`.
    pub(super) fn parse_text_only_element(&mut self, token: &Token, mode: LexMode) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //          element parsing algorithm, switch the tokenizer to the
        //          RAWTEXT state; otherwise the algorithm invoked was the
        //          generic RCDATA element parsing algorithm, switch the
        //          tokenizer to the RCDATA state."
        self.tokenizer.switch_to(mode);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
    }

    /// Switch the tokenizer into PLAINTEXT. There is no way back.
    pub(super) fn switch_tokenizer_to_plaintext(&mut self) {
        self.tokenizer.switch_to(LexMode::Plaintext);
    }

    /// Leave the "text" insertion mode for the original insertion mode,
    /// returning the tokenizer to the state it was in before.
    pub(super) fn leave_text_mode(&mut self) {
        self.tokenizer.restore_previous();
        self.insertion_mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) {
        self.stack_of_open_elements.clear();
        self.stopped = true;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for (index, &node) in self.stack_of_open_elements.iter().enumerate().rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true."
            let last = index == 0;
            let tag = self.sink.local_name(node).unwrap_or_default();

            let mode = match tag {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => {
                    // "If last is true, jump to the step below labeled done."
                    // "Let ancestor be node."
                    // "Loop: If ancestor is the first node in the stack of open
                    //  elements, jump to the step below labeled done."
                    // "If ancestor is a template node, jump to the step below
                    //  labeled done."
                    // "If ancestor is a table node, switch the insertion mode to
                    //  "in select in table" and return."
                    // "Done: Switch the insertion mode to "in select" and return."
                    let in_table = !last
                        && self.stack_of_open_elements[..index]
                            .iter()
                            .rev()
                            .map(|&ancestor| self.sink.local_name(ancestor))
                            .find(|&name| matches!(name, Some("table" | "template")))
                            .flatten()
                            == Some("table");
                    Some(if in_table {
                        InsertionMode::InSelectInTable
                    } else {
                        InsertionMode::InSelect
                    })
                }
                // STEP 5: "If node is a td or th element and last is false, then
                //          switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => Some(InsertionMode::InCell),
                // STEP 6: "If node is a tr element, then switch the insertion
                //          mode to "in row" and return."
                "tr" => Some(InsertionMode::InRow),
                // STEP 7
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                // STEP 8
                "caption" => Some(InsertionMode::InCaption),
                // STEP 9
                "colgroup" => Some(InsertionMode::InColumnGroup),
                // STEP 10
                "table" => Some(InsertionMode::InTable),
                // STEP 12: "If node is a head element and last is false, then
                //           switch the insertion mode to "in head" and return."
                "head" if !last => Some(InsertionMode::InHead),
                // STEP 13
                "body" => Some(InsertionMode::InBody),
                // STEP 14
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 15: "If node is an html element, run these substeps: If
                //           the head element pointer is null, switch the
                //           insertion mode to "before head" and return.
                //           Otherwise, switch to "after head" and return."
                "html" => Some(if self.head_element_pointer.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                // STEP 16: "If last is true, then switch the insertion mode to
                //           "in body" and return."
                _ if last => Some(InsertionMode::InBody),
                _ => None,
            };

            if let Some(mode) = mode {
                self.insertion_mode = mode;
                return;
            }
            // STEP 17: "Let node now be the node before node in the stack of
            //           open elements."
        }
        self.insertion_mode = InsertionMode::InBody;
    }
}

/// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
/// U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
pub(super) const fn is_parser_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}
