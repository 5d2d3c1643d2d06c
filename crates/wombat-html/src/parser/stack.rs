//! Queries and pops on the stack of open elements.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use super::core::{HTMLParser, InsertionMode};
use super::sink::TreeSink;
use crate::input::CharSource;

/// The element types that bound each kind of scope.
///
/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything but `optgroup` and
    /// `option`.
    Select,
}

impl Scope {
    /// Whether an element named `name` stops the scope search.
    #[must_use]
    pub fn is_boundary(self, name: &str) -> bool {
        // "The stack of open elements is said to have a particular element in
        //  scope when it has that element in the specific scope consisting of
        //  the following element types: applet, caption, html, table, td, th,
        //  marquee, object, template"
        let default = || {
            matches!(
                name,
                "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                    | "template"
            )
        };
        match self {
            Self::Default => default(),
            Self::ListItem => default() || matches!(name, "ol" | "ul"),
            Self::Button => default() || name == "button",
            Self::Table => matches!(name, "html" | "table" | "template"),
            Self::Select => !matches!(name, "optgroup" | "option"),
        }
    }
}

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules"
#[must_use]
pub fn is_special_element(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "keygen"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "param"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "source"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}

/// [§ 13.2.4.2 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The following HTML elements are those that end up in the list of active
/// formatting elements: a, b, big, code, em, font, i, nobr, s, small, strike,
/// strong, tt, and u."
#[must_use]
pub fn is_formatting_element(name: &str) -> bool {
    matches!(
        name,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// The local name of `node`, or the empty string for non-elements.
    pub(super) fn name_of(&self, node: S::Handle) -> &str {
        self.sink.local_name(node).unwrap_or_default()
    }

    /// Whether the current node is an element with one of `names`.
    pub(super) fn current_node_is(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|node| names.contains(&self.name_of(node)))
    }

    /// Whether an element with one of `names` is anywhere on the stack.
    pub(super) fn stack_contains(&self, names: &[&str]) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&node| names.contains(&self.name_of(node)))
    }

    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// STEP 1: "Initialize node to be the current node (the bottommost node
    ///          of the stack)."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    fn scope_search(&self, scope: Scope, is_target: impl Fn(S::Handle, &str) -> bool) -> bool {
        for &node in self.stack_of_open_elements.iter().rev() {
            let name = self.name_of(node);
            if is_target(node, name) {
                return true;
            }
            if scope.is_boundary(name) {
                return false;
            }
        }
        false
    }

    /// Whether an element named `name` is in the given scope.
    pub(super) fn has_element_in_scope(&self, name: &str, scope: Scope) -> bool {
        self.scope_search(scope, |_, candidate| candidate == name)
    }

    /// Whether any element with one of `names` is in the given scope.
    pub(super) fn has_any_in_scope(&self, names: &[&str], scope: Scope) -> bool {
        self.scope_search(scope, |_, candidate| names.contains(&candidate))
    }

    /// Whether the specific node `target` is in the given scope.
    pub(super) fn has_node_in_scope(&self, target: S::Handle, scope: Scope) -> bool {
        self.scope_search(scope, |node, _| node == target)
    }

    /// Pop elements until one named `name` has been popped.
    pub(super) fn pop_until(&mut self, name: &str) {
        self.pop_until_one_of(&[name]);
    }

    /// Pop elements until one with any of `names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if names.contains(&self.name_of(node)) {
                break;
            }
        }
    }

    /// Pop elements until `target` itself has been popped.
    pub(super) fn pop_until_node(&mut self, target: S::Handle) {
        while let Some(node) = self.stack_of_open_elements.pop() {
            if node == target {
                break;
            }
        }
    }

    /// Remove `target` from wherever it sits in the stack.
    pub(super) fn remove_from_stack(&mut self, target: S::Handle) {
        self.stack_of_open_elements.retain(|&node| node != target);
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    ///
    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent must
    /// perform the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags(&mut self, exclude: Option<&str>) {
        while let Some(node) = self.current_node() {
            let name = self.name_of(node);
            if !IMPLIED_END_TAG_ELEMENTS.contains(&name) || exclude == Some(name) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.7 Close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    pub(super) fn close_p_element(&mut self) {
        // "Generate implied end tags, except for p elements."
        self.generate_implied_end_tags(Some("p"));
        // "If the current node is not a p element, then this is a parse error."
        if !self.current_node_is(&["p"]) {
            self.parse_error("p element closed with other elements open");
        }
        // "Pop elements from the stack of open elements until a p element has
        //  been popped from the stack."
        self.pop_until("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.has_element_in_scope("p", Scope::Button) {
            self.close_p_element();
        }
    }

    /// Pop until the current node is one of `names`. Used by the "clear the
    /// stack back to a ... context" steps.
    fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(node) = self.current_node() {
            if names.contains(&self.name_of(node)) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "while the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self.current_node_is(&["td", "th"]) {
            self.parse_error("table cell closed with other elements open");
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a
        //          td element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.insertion_mode = InsertionMode::InRow;
    }

    /// Whether anything other than the listed elements is still open. Used by
    /// the EOF and `</body>` checks in "in body".
    pub(super) fn stack_has_element_not_in(&self, allowed: &[&str]) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&node| !allowed.contains(&self.name_of(node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_scope_adds_button_to_default() {
        assert!(Scope::Button.is_boundary("button"));
        assert!(Scope::Button.is_boundary("table"));
        assert!(!Scope::Default.is_boundary("button"));
    }

    #[test]
    fn select_scope_only_passes_options() {
        assert!(!Scope::Select.is_boundary("option"));
        assert!(!Scope::Select.is_boundary("optgroup"));
        assert!(Scope::Select.is_boundary("div"));
    }

    #[test]
    fn table_scope_ignores_cells() {
        assert!(!Scope::Table.is_boundary("td"));
        assert!(Scope::Table.is_boundary("table"));
    }

    #[test]
    fn formatting_elements_are_not_special() {
        for name in ["a", "b", "nobr", "u"] {
            assert!(is_formatting_element(name));
            assert!(!is_special_element(name));
        }
        assert!(is_special_element("address"));
    }

    #[test]
    fn paragraph_behind_button_is_only_hidden_in_button_scope() {
        let mut parser = HTMLParser::new("<p><button>");
        while parser.step() {
            if parser.current_node_is(&["button"]) {
                break;
            }
        }
        assert!(parser.current_node_is(&["button"]));
        assert!(parser.has_element_in_scope("p", Scope::Default));
        assert!(!parser.has_element_in_scope("p", Scope::Button));
    }

    #[test]
    fn stray_html_and_body_end_tags_keep_the_stack_non_empty() {
        let mut parser = HTMLParser::new("<html><body></html></body>x");
        while parser.current_node().is_none() {
            assert!(parser.step());
        }
        while parser.step() {
            assert!(parser.current_node().is_some());
        }
        assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
    }
}
