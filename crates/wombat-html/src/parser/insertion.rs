//! Creating and inserting nodes, including foster parenting.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use super::core::HTMLParser;
use super::sink::TreeSink;
use crate::input::CharSource;
use crate::tokenizer::Token;

/// Where a node goes: inside `parent`, before `before` if given, otherwise
/// as its last child.
pub(super) type InsertionLocation<H> = (H, Option<H>);

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<S::Handle> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<S::Handle>,
    ) -> InsertionLocation<S::Handle> {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or_else(|| self.sink.document());

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        // "If foster parenting is enabled and target is a table, tbody, tfoot,
        //  thead, or tr element"
        if self.foster_parenting
            && matches!(
                self.sink.local_name(target),
                Some("table" | "tbody" | "tfoot" | "thead" | "tr")
            )
        {
            return self.foster_parent_location();
        }

        // "Otherwise: Let adjusted insertion location be inside target, after
        //  its last child (if any)."
        (target, None)
    }

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    fn foster_parent_location(&self) -> InsertionLocation<S::Handle> {
        // STEP 2.1: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_table = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.sink.local_name(id) == Some("table"));

        // STEP 2.3: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element), after its last child (if
        //            any), and abort these steps."
        let Some(table_pos) = last_table else {
            let html = self
                .stack_of_open_elements
                .first()
                .copied()
                .unwrap_or_else(|| self.sink.document());
            return (html, None);
        };
        let table = self.stack_of_open_elements[table_pos];

        // STEP 2.4: "If last table has a parent node, then let adjusted
        //            insertion location be inside last table's parent node,
        //            immediately before last table, and abort these steps."
        if let Some(parent) = self.sink.parent(table) {
            return (parent, Some(table));
        }

        // STEP 2.5: "Let previous element be the element immediately above
        //            last table in the stack of open elements."
        // STEP 2.6: "Let adjusted insertion location be inside previous
        //            element, after its last child (if any)."
        let previous = table_pos
            .checked_sub(1)
            .map_or_else(|| self.sink.document(), |i| self.stack_of_open_elements[i]);
        (previous, None)
    }

    pub(super) fn insert_at(&mut self, location: InsertionLocation<S::Handle>, node: S::Handle) {
        match location {
            (parent, Some(before)) => self.sink.insert_before(parent, node, before),
            (parent, None) => self.sink.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    pub(super) fn create_element_for_token(&mut self, token: &Token) -> S::Handle {
        let name = token.tag_name().unwrap_or_default();
        self.sink.create_element(name, token.attributes())
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the token,
    /// in the HTML namespace."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> S::Handle {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let element be the result of creating an element for the
        //          token in the given namespace, with the intended parent
        //          being the element in which the adjusted insertion location
        //          finds itself."
        let element = self.create_element_for_token(token);

        // STEP 3: "If it is possible to insert element at the adjusted
        //          insertion location, then insert element at the adjusted
        //          insertion location."
        self.insert_at(location, element);

        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.stack_of_open_elements.push(element);
        element
    }

    /// Insert an element for a start tag the markup left out, such as the
    /// implied `head` or `tbody`.
    pub(super) fn insert_implied_element(&mut self, name: &str) -> S::Handle {
        self.insert_html_element(&implied_start_tag(name))
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        let mut buf = [0; 4];
        self.insert_text(c.encode_utf8(&mut buf));
    }

    /// Insert a run of characters as if each were inserted by
    /// [`HTMLParser::insert_character`].
    pub(super) fn insert_text(&mut self, data: &str) {
        // STEP 2: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);
        let (parent, before) = location;

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //          then return."
        if parent == self.sink.document() {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's
        //          data."
        let previous = match before {
            Some(reference) => self.sink.previous_sibling(reference),
            None => self.sink.last_child(parent),
        };
        if let Some(previous) = previous
            && self.sink.append_text(previous, data)
        {
            return;
        }

        // "Otherwise, create a new Text node whose data is data and whose node
        //  document is the same as that of the element in which the adjusted
        //  insertion location finds itself, and insert the newly created node
        //  at the adjusted insertion location."
        let text = self.sink.create_text_node(data);
        self.insert_at(location, text);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        // STEP 2: "If position was specified, then let the adjusted insertion
        //          location be position. Otherwise, let adjusted insertion
        //          location be the appropriate place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);
        // STEP 3: "Create a Comment node whose data attribute is set to data"
        let comment = self.sink.create_comment(data);
        // STEP 4: "Insert the newly created node at the adjusted insertion
        //          location."
        self.insert_at(location, comment);
    }

    /// Insert a comment as the last child of `parent`, for the modes that say
    /// "as the last child of the Document object" or "of the first element in
    /// the stack of open elements".
    pub(super) fn insert_comment_in(&mut self, parent: S::Handle, data: &str) {
        let comment = self.sink.create_comment(data);
        self.sink.append_child(parent, comment);
    }
}

/// A start tag token with no attributes.
pub(super) fn implied_start_tag(name: &str) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing: false,
        attributes: Vec::new(),
    }
}
