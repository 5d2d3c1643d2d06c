//! The list of active formatting elements and the adoption agency algorithm.
//!
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//! and [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)

use super::core::{ActiveFormattingElement, HTMLParser};
use super::sink::TreeSink;
use super::stack::{Scope, is_special_element};
use crate::input::CharSource;
use crate::tokenizer::{Attribute, Token};

/// "Let outer loop counter be 0 ... If outer loop counter is greater than or
/// equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of active
/// formatting elements, then remove node from the list."
const INNER_LOOP_LIMIT: usize = 3;

/// Noah's Ark: at most this many identical entries after the last marker.
const NOAHS_ARK_LIMIT: usize = 3;

/// Same attributes regardless of order.
fn same_attributes(a: &[Attribute], b: &[Attribute]) -> bool {
    a.len() == b.len() && a.iter().all(|attr| b.contains(attr))
}

impl<S: TreeSink, C: CharSource> HTMLParser<S, C> {
    /// Index of `node`'s entry in the list, if it has one.
    pub(super) fn formatting_entry_index(&self, node: S::Handle) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .position(|entry| entry.is_node(node))
    }

    /// The last element named `name` between the end of the list and the
    /// last marker.
    pub(super) fn formatting_element_after_last_marker(
        &self,
        name: &str,
    ) -> Option<(usize, S::Handle)> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { node, token } => {
                    if token.tag_name() == Some(name) {
                        return Some((index, *node));
                    }
                }
            }
        }
        None
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_active_formatting_element(&mut self, node: S::Handle, token: &Token) {
        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list of active
        //          formatting elements."
        let mut matches = Vec::new();
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element { token: existing, .. } => {
                    if existing.tag_name() == token.tag_name()
                        && same_attributes(existing.attributes(), token.attributes())
                    {
                        matches.push(index);
                    }
                }
            }
        }
        if matches.len() >= NOAHS_ARK_LIMIT
            && let Some(&earliest) = matches.last()
        {
            let _ = self.active_formatting_elements.remove(earliest);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node,
                token: token.clone(),
            });
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// 1. "Let entry be the last (most recently added) entry in the list."
    /// 2. "Remove entry from the list."
    /// 3. "If entry was a marker, then stop the algorithm at this point."
    ///    Otherwise, go to step 1.
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// Two phases: rewind to the last entry that is a marker or still open,
    /// then recreate every later entry.
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        let is_open_or_marker = |parser: &Self, index: usize| match &parser
            .active_formatting_elements[index]
        {
            ActiveFormattingElement::Marker => true,
            ActiveFormattingElement::Element { node, .. } => {
                parser.stack_of_open_elements.contains(node)
            }
        };

        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        let Some(last) = self.active_formatting_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there
        //          is nothing to reconstruct; stop this algorithm."
        if is_open_or_marker(self, last) {
            return;
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        //          list of active formatting elements."
        let mut entry = last;

        // STEP 4: "Rewind: If there are no entries before entry in the list of
        //          active formatting elements, then jump to the step labeled
        //          create."
        // STEP 5: "Let entry be the entry one earlier than entry in the list
        //          of active formatting elements."
        // STEP 6: "If entry is neither a marker nor an element that is also in
        //          the stack of open elements, go to the step labeled rewind."
        // STEP 7: "Advance: Let entry be the element one later than entry in
        //          the list of active formatting elements."
        while entry > 0 {
            if is_open_or_marker(self, entry - 1) {
                break;
            }
            entry -= 1;
        }

        // STEP 8-10: "Create: Insert an HTML element for the token for which
        //             the element entry was created, to obtain new element.
        //             Replace the entry for entry in the list with an entry for
        //             new element. If the entry for new element in the list of
        //             active formatting elements is not the last entry in the
        //             list, return to the step labeled advance."
        for index in entry..self.active_formatting_elements.len() {
            let ActiveFormattingElement::Element { token, .. } =
                &self.active_formatting_elements[index]
            else {
                continue;
            };
            let token = token.clone();
            let node = self.insert_html_element(&token);
            self.active_formatting_elements[index] = ActiveFormattingElement::Element { node, token };
        }
    }

    /// The token a list entry was created for.
    fn formatting_token(&self, index: usize) -> Option<Token> {
        match self.active_formatting_elements.get(index) {
            Some(ActiveFormattingElement::Element { token, .. }) => Some(token.clone()),
            _ => None,
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Run for the end tag of a formatting element, and for `<a>` and `<nobr>`
    /// start tags that find an earlier one still open.
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 1: "Let subject be token's tag name."
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the
        //          stack of open elements and return."
        if let Some(current) = self.current_node()
            && self.name_of(current) == subject
            && self.formatting_entry_index(current).is_none()
        {
            let _ = self.stack_of_open_elements.pop();
            return;
        }

        // STEP 3: "Let outer loop counter be 0."
        // STEP 4: "While true:"
        for _ in 0..OUTER_LOOP_LIMIT {
            // STEP 4.3: "Let formatting element be the last element in the
            //            list of active formatting elements that: is between
            //            the end of the list and the last marker in the list,
            //            if any, or the start of the list otherwise, and has
            //            the tag name subject."
            // "If there is no such element, then return and instead act as
            //  described in the "any other end tag" entry above."
            let Some((formatting_index, formatting_element)) =
                self.formatting_element_after_last_marker(subject)
            else {
                self.any_other_end_tag_in_body(subject);
                return;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the
            //            element from the list, and return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&node| node == formatting_element)
            else {
                self.parse_error("formatting element is not open");
                let _ = self.active_formatting_elements.remove(formatting_index);
                return;
            };

            // STEP 4.5: "If formatting element is in the stack of open
            //            elements, but the element is not in scope, then this
            //            is a parse error; return."
            if !self.has_node_in_scope(formatting_element, Scope::Default) {
                self.parse_error("formatting element is not in scope");
                return;
            }

            // STEP 4.6: "If formatting element is not the current node, this
            //            is a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error("misnested formatting element end tag");
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack
            //            of open elements that is lower in the stack than
            //            formatting element, and is an element in the special
            //            category. There might not be one."
            let furthest_block_index = (formatting_stack_index + 1
                ..self.stack_of_open_elements.len())
                .find(|&i| is_special_element(self.name_of(self.stack_of_open_elements[i])));

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element
            //            from the list of active formatting elements, and
            //            finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.stack_of_open_elements.truncate(formatting_stack_index);
                let _ = self.active_formatting_elements.remove(formatting_index);
                return;
            };
            let furthest_block = self.stack_of_open_elements[furthest_block_index];

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let Some(&common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .and_then(|i| self.stack_of_open_elements.get(i))
            else {
                return;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting
            //             element in the list of active formatting elements
            //             relative to the elements on either side of it in the
            //             list."
            let mut bookmark = formatting_index;

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // STEP 4.12: "Let inner loop counter be 0."
            let mut inner_loop_counter = 0;

            // STEP 4.13: "While true:"
            loop {
                // STEP 4.13.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //               in the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                // A removal below leaves node_index pointing at the entry that
                // was under the removed node, so the decrement always lands on
                // the entry above it.
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // STEP 4.13.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and
                //               node is in the list of active formatting
                //               elements, then remove node from the list of
                //               active formatting elements."
                let mut entry_index = self.formatting_entry_index(node);
                if inner_loop_counter > INNER_LOOP_LIMIT
                    && let Some(index) = entry_index.take()
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of
                //               open elements and continue."
                let Some(entry_index) = entry_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML
                //               namespace, with common ancestor as the intended
                //               parent; replace the entry for node in the list
                //               of active formatting elements with an entry for
                //               the new element, replace the entry for node in
                //               the stack of open elements with an entry for the
                //               new element, and let node be the new element."
                let Some(token) = self.formatting_token(entry_index) else {
                    return;
                };
                let new_node = self.create_element_for_token(&token);
                self.active_formatting_elements[entry_index] = ActiveFormattingElement::Element {
                    node: new_node,
                    token,
                };
                self.stack_of_open_elements[node_index] = new_node;

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block {
                    bookmark = entry_index + 1;
                }

                // STEP 4.13.8: "Append last node to node."
                self.sink.append_child(new_node, last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = new_node;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //             previous step at the appropriate place for inserting
            //             a node, but using common ancestor as the override
            //             target."
            let location = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_at(location, last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with
            //             furthest block as the intended parent."
            let Some(formatting_index) = self.formatting_entry_index(formatting_element) else {
                return;
            };
            let Some(token) = self.formatting_token(formatting_index) else {
                return;
            };
            let new_element = self.create_element_for_token(&token);

            // STEP 4.16: "Take all of the child nodes of furthest block and
            //             append them to the element created in the last step."
            self.sink.reparent_children(furthest_block, new_element);

            // STEP 4.17: "Append that new element to furthest block."
            self.sink.append_child(furthest_block, new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into
            //             the list of active formatting elements at the
            //             position of the aforementioned bookmark."
            let _ = self.active_formatting_elements.remove(formatting_index);
            if formatting_index < bookmark {
                bookmark -= 1;
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node: new_element,
                    token,
                },
            );

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack
            //             of open elements immediately below the position of
            //             furthest block in that stack."
            self.remove_from_stack(formatting_element);
            if let Some(position) = self
                .stack_of_open_elements
                .iter()
                .position(|&node| node == furthest_block)
            {
                self.stack_of_open_elements.insert(position + 1, new_element);
            }
        }
    }
}
