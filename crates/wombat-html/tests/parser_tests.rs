//! Integration tests for the tree constructor.

use wombat_dom::{DomTree, NodeId, NodeType, QuirksMode};
use wombat_html::{
    Attribute, HTMLParser, HTMLTokenizer, ParseIssue, ParserOptions, TreeSink, dump_tree,
    parse_document, parse_document_with_options,
};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html)
}

/// Helper to parse HTML and return the html5lib-style dump
fn dump(html: &str) -> String {
    dump_tree(&parse_document(html))
}

/// Helper to parse HTML and return only the issue messages
fn issues(html: &str) -> Vec<String> {
    let (_, issues) = parse_document_with_options(html, ParserOptions::default());
    issues.into_iter().map(|issue| issue.message).collect()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if tree.as_element(from).is_some_and(|data| data.tag_name == tag) {
        return Some(from);
    }
    tree.children(from)
        .iter()
        .find_map(|&child| find_element(tree, child, tag))
}

/// Helper to find all elements with a given tag name under a subtree
fn find_all_elements(tree: &DomTree, from: NodeId, tag: &str) -> Vec<NodeId> {
    let mut result = Vec::new();
    if tree.as_element(from).is_some_and(|data| data.tag_name == tag) {
        result.push(from);
    }
    for &child in tree.children(from) {
        result.extend(find_all_elements(tree, child, tag));
    }
    result
}

/// Helper to collect all direct element children with a given tag name.
fn element_children(tree: &DomTree, parent: NodeId, tag: &str) -> Vec<NodeId> {
    tree.children(parent)
        .iter()
        .copied()
        .filter(|&id| tree.as_element(id).is_some_and(|d| d.tag_name == tag))
        .collect()
}

/// Helper to read one attribute of the first element with the given tag.
fn attribute<'a>(tree: &'a DomTree, tag: &str, name: &str) -> Option<&'a str> {
    let id = find_element(tree, tree.root(), tag)?;
    tree.as_element(id)?.attrs.get(name)
}

// ========== Document skeleton ==========

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    let root = tree.get(NodeId::ROOT).expect("document node");
    assert!(matches!(root.node_type, NodeType::Document));

    let html = tree.document_element().expect("html element");
    assert_eq!(tree.as_element(html).unwrap().tag_name, "html");
    assert!(tree.head().is_some());
    assert!(tree.body().is_some());
    assert_eq!(tree.doctype().map(|d| d.name.as_str()), Some("html"));
}

#[test]
fn test_empty_input_still_builds_skeleton() {
    assert_eq!(dump(""), "| <html>\n|   <head>\n|   <body>\n");
}

#[test]
fn test_leading_whitespace_and_comment_before_html() {
    assert_eq!(
        dump("  <!--c-->  <html><p>x"),
        "| <!-- c -->\n| <html>\n|   <head>\n|   <body>\n|     <p>\n|       \"x\"\n"
    );
}

#[test]
fn test_text_node() {
    let tree = parse("<html><body>Hello World</body></html>");
    let body = tree.body().unwrap();
    assert_eq!(tree.text_content(body), "Hello World");
}

#[test]
fn test_comment_node() {
    let tree = parse("<html><body><!-- test comment --></body></html>");
    let body = tree.body().unwrap();

    let has_comment = tree.children(body).iter().any(|&child| {
        tree.get(child).is_some_and(
            |node| matches!(&node.node_type, NodeType::Comment(data) if data == " test comment "),
        )
    });
    assert!(has_comment);
}

#[test]
fn test_element_attributes() {
    let tree = parse(r#"<div id="main" class="container"></div>"#);
    assert_eq!(attribute(&tree, "div", "id"), Some("main"));
    assert_eq!(attribute(&tree, "div", "class"), Some("container"));
}

#[test]
fn test_void_elements_do_not_nest() {
    let tree = parse(r#"<input type="text"><br><img src=a.png>after"#);
    let body = tree.body().unwrap();
    let names: Vec<_> = tree
        .children(body)
        .iter()
        .filter_map(|&child| tree.as_element(child).map(|data| data.tag_name.as_str()))
        .collect();
    assert_eq!(names, ["input", "br", "img"]);
    assert_eq!(tree.text_content(body), "after");
}

#[test]
fn test_head_elements() {
    let tree = parse(r#"<meta charset="UTF-8"><title>My Page</title><link rel=icon>"#);
    let head = tree.head().unwrap();
    let names: Vec<_> = tree
        .children(head)
        .iter()
        .filter_map(|&child| tree.as_element(child).map(|data| data.tag_name.as_str()))
        .collect();
    assert_eq!(names, ["meta", "title", "link"]);
    assert_eq!(attribute(&tree, "meta", "charset"), Some("UTF-8"));
}

#[test]
fn test_whitespace_preserved_in_text() {
    let tree = parse("<body>  hello  world  </body>");
    assert_eq!(tree.text_content(tree.body().unwrap()), "  hello  world  ");
}

#[test]
fn test_adjacent_characters_merge_into_one_text_node() {
    let tree = parse("<body>a&amp;b<!---->c");
    let body = tree.body().unwrap();
    let texts: Vec<_> = tree
        .children(body)
        .iter()
        .filter_map(|&child| tree.as_text(child))
        .collect();
    // The comment splits the run.
    assert_eq!(texts, ["a&b", "c"]);
}

#[test]
fn test_simple_html_file() {
    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <!-- This is a comment -->
    <title>Test</title>
</head>
<body class="main" id="content">
    <div data-value='single quoted'>Hello</div>
    <input type="text" disabled />
</body>
</html>"#;

    let tree = parse(html);
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(attribute(&tree, "html", "lang"), Some("en"));
    assert_eq!(attribute(&tree, "meta", "charset"), Some("UTF-8"));
    assert_eq!(attribute(&tree, "body", "class"), Some("main"));
    assert_eq!(attribute(&tree, "body", "id"), Some("content"));
    assert_eq!(attribute(&tree, "div", "data-value"), Some("single quoted"));
    assert_eq!(attribute(&tree, "input", "disabled"), Some(""));

    let title = find_element(&tree, tree.root(), "title").unwrap();
    assert_eq!(tree.text_content(title), "Test");
    let div = find_element(&tree, tree.root(), "div").unwrap();
    assert_eq!(tree.text_content(div), "Hello");

    // Whitespace after </body> and </html> ends up inside body.
    let body = tree.body().unwrap();
    let last = tree.last_child(body).unwrap();
    assert_eq!(tree.as_text(last), Some("\n\n"));
}

#[test]
fn test_stray_html_and_body_tags_merge_attributes() {
    let tree = parse("<body a=1><html lang=en><body b=2 a=3>");
    assert_eq!(attribute(&tree, "body", "a"), Some("1"));
    assert_eq!(attribute(&tree, "body", "b"), Some("2"));
    assert_eq!(attribute(&tree, "html", "lang"), Some("en"));
}

// ========== Raw text and RCDATA ==========

#[test]
fn test_style_element_content_preserved() {
    let tree = parse("<style><div>not a tag</div></style><p>x");
    let style = find_element(&tree, tree.root(), "style").unwrap();
    assert_eq!(tree.text_content(style), "<div>not a tag</div>");
    assert_eq!(tree.parent(style), tree.head());
    assert!(find_element(&tree, tree.root(), "div").is_none());
}

#[test]
fn test_title_decodes_references_but_not_tags() {
    let tree = parse("<title>My <test> &amp; Title</title>");
    let title = find_element(&tree, tree.root(), "title").unwrap();
    assert_eq!(tree.text_content(title), "My <test> & Title");
}

#[test]
fn test_script_content_is_raw() {
    assert_eq!(
        dump("<script>if (a<b) x = '</p>';</script>"),
        "| <html>\n|   <head>\n|     <script>\n|       \"if (a<b) x = '</p>';\"\n|   <body>\n"
    );
}

#[test]
fn test_unterminated_script_keeps_its_text() {
    let (tree, issues) = parse_document_with_options("<script>alert(1)", ParserOptions::default());
    let script = find_element(&tree, tree.root(), "script").unwrap();
    assert_eq!(tree.text_content(script), "alert(1)");
    assert!(tree.body().is_some());
    assert!(
        issues
            .iter()
            .any(|issue| issue.message.contains("end of file")),
        "{issues:?}"
    );
}

#[test]
fn test_textarea_drops_leading_newline() {
    let tree = parse("<textarea>\nfoo\n</textarea>");
    let textarea = find_element(&tree, tree.root(), "textarea").unwrap();
    assert_eq!(tree.text_content(textarea), "foo\n");
}

#[test]
fn test_pre_drops_only_first_newline() {
    let tree = parse("<pre>\n\nx</pre>");
    let pre = find_element(&tree, tree.root(), "pre").unwrap();
    assert_eq!(tree.text_content(pre), "\nx");
}

#[test]
fn test_plaintext_swallows_the_rest() {
    let tree = parse("<plaintext></plaintext><b>");
    let plaintext = find_element(&tree, tree.root(), "plaintext").unwrap();
    assert_eq!(tree.text_content(plaintext), "</plaintext><b>");
}

// ========== Adoption agency ==========

#[test]
fn test_adoption_agency_simple_misnesting() {
    // <p><b>X<i>Y</b>Z</i></p> splits the <i> at the </b>.
    assert_eq!(
        dump("<p><b>X<i>Y</b>Z</i></p>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <p>\n\
         |       <b>\n\
         |         \"X\"\n\
         |         <i>\n\
         |           \"Y\"\n\
         |       <i>\n\
         |         \"Z\"\n"
    );
}

#[test]
fn test_adoption_agency_moves_block_out_of_formatting() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <b>\n\
         |       \"1\"\n\
         |     <p>\n\
         |       <b>\n\
         |         \"2\"\n\
         |       \"3\"\n"
    );
}

#[test]
fn test_adoption_agency_clones_intermediate_formatting() {
    assert_eq!(
        dump("<b>1<i>2<p>3</b>4</p>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <b>\n\
         |       \"1\"\n\
         |       <i>\n\
         |         \"2\"\n\
         |     <i>\n\
         |       <p>\n\
         |         <b>\n\
         |           \"3\"\n\
         |         \"4\"\n"
    );
}

#[test]
fn test_adoption_agency_no_furthest_block() {
    let tree = parse("<p><b><i>text</b></p>");
    let p = find_element(&tree, tree.root(), "p").unwrap();
    let b = find_element(&tree, p, "b").unwrap();
    let i = find_element(&tree, b, "i").unwrap();
    assert_eq!(tree.text_content(i), "text");
}

#[test]
fn test_adoption_agency_drops_formatting_beyond_third_inner_step() {
    // The inner loop reaches <b> on its fourth step, so it is removed from
    // the list instead of being cloned.
    assert_eq!(
        dump("<a><b><big><em><strong><div>X</a>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <a>\n\
         |       <b>\n\
         |         <big>\n\
         |           <em>\n\
         |             <strong>\n\
         |     <big>\n\
         |       <em>\n\
         |         <strong>\n\
         |           <div>\n\
         |             <a>\n\
         |               \"X\"\n"
    );
}

#[test]
fn test_button_hides_outer_paragraph_from_p_start_tag() {
    assert_eq!(
        dump("<p><button><p>x"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <p>\n\
         |       <button>\n\
         |         <p>\n\
         |           \"x\"\n"
    );
}

#[test]
fn test_adoption_agency_gives_up_after_eight_outer_steps() {
    let tree = parse("<a>1<div>2<div>3<div>4<div>5<div>6<div>7<div>8<div>9<div>10</a>");
    let body = tree.body().unwrap();

    // The original anchor plus one clone per outer step.
    assert_eq!(find_all_elements(&tree, body, "a").len(), 9);
    assert_eq!(tree.text_content(body), "12345678910");

    // The ninth div never becomes a furthest block, so it stays inside the
    // last clone.
    let divs = find_all_elements(&tree, body, "div");
    assert_eq!(divs.len(), 9);
    let innermost = divs[8];
    assert_eq!(tree.text_content(innermost), "10");
    let parent = tree.parent(innermost).unwrap();
    assert_eq!(tree.as_element(parent).unwrap().tag_name, "a");
}

#[test]
fn test_formatting_reconstruction_across_blocks() {
    let tree = parse("<p><b>bold</p><p>still bold</p></b>");
    let body = tree.body().unwrap();
    let ps = element_children(&tree, body, "p");
    assert_eq!(ps.len(), 2);
    assert!(find_element(&tree, ps[0], "b").is_some());
    let reconstructed = find_element(&tree, ps[1], "b").expect("reconstructed <b>");
    assert_eq!(tree.text_content(reconstructed), "still bold");
}

#[test]
fn test_noahs_ark_keeps_three_copies() {
    let tree = parse("<p><b><b><b><b><p>x");
    let body = tree.body().unwrap();
    let ps = element_children(&tree, body, "p");
    assert_eq!(ps.len(), 2);
    assert_eq!(find_all_elements(&tree, ps[0], "b").len(), 4);
    assert_eq!(find_all_elements(&tree, ps[1], "b").len(), 3);
    assert_eq!(tree.text_content(ps[1]), "x");
}

#[test]
fn test_properly_nested_formatting() {
    let tree = parse("<p><b>bold <i>bold-italic</i> bold</b></p>");
    let b = find_element(&tree, tree.root(), "b").unwrap();
    let i = find_element(&tree, b, "i").unwrap();
    assert_eq!(tree.text_content(i), "bold-italic");
    assert_eq!(tree.text_content(b), "bold bold-italic bold");
}

#[test]
fn test_any_other_end_tag_stops_at_special() {
    // The </span> is ignored because <div> is special and sits above it.
    let tree = parse("<span><div>text</span>more</div>");
    let span = find_element(&tree, tree.root(), "span").unwrap();
    let div = find_element(&tree, span, "div").unwrap();
    assert_eq!(tree.text_content(div), "textmore");
}

#[test]
fn test_nested_anchor_tags() {
    let tree = parse(r#"<a href="1">first<a href="2">second</a>"#);
    let body = tree.body().unwrap();
    let anchors = element_children(&tree, body, "a");
    assert_eq!(anchors.len(), 2);
    assert_eq!(tree.text_content(anchors[0]), "first");
    assert_eq!(tree.text_content(anchors[1]), "second");
    assert!(
        issues(r#"<a href="1">first<a href="2">"#)
            .iter()
            .any(|m| m.contains("<a>"))
    );
}

#[test]
fn test_anchor_inside_paragraph_is_split() {
    assert_eq!(
        dump("<a><p></a></p>"),
        "| <html>\n|   <head>\n|   <body>\n|     <a>\n|     <p>\n|       <a>\n"
    );
}

// ========== Implied end tags and scope ==========

#[test]
fn test_generate_implied_end_tags() {
    let tree = parse("<p>first<p>second");
    let ps = element_children(&tree, tree.body().unwrap(), "p");
    assert_eq!(ps.len(), 2);
    assert_eq!(tree.text_content(ps[0]), "first");
    assert_eq!(tree.text_content(ps[1]), "second");
}

#[test]
fn test_stray_p_end_tag_creates_empty_paragraph() {
    assert_eq!(
        dump("<body></p>text"),
        "| <html>\n|   <head>\n|   <body>\n|     <p>\n|     \"text\"\n"
    );
}

#[test]
fn test_stray_br_end_tag_becomes_br_element() {
    let tree = parse("a</br>b");
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "br").len(), 1);
}

#[test]
fn test_image_is_renamed_to_img() {
    let tree = parse("<image src=x>");
    assert!(find_element(&tree, tree.root(), "image").is_none());
    assert_eq!(attribute(&tree, "img", "src"), Some("x"));
}

#[test]
fn test_heading_closes_open_heading() {
    let tree = parse("<h1>one<h2>two");
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "h1").len(), 1);
    assert_eq!(element_children(&tree, body, "h2").len(), 1);
}

#[test]
fn test_button_closes_open_button() {
    let tree = parse("<button>a<button>b");
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "button").len(), 2);
}

// ========== Lists ==========

#[test]
fn test_li_implicit_close() {
    let tree = parse("<ul><li>A<li>B</ul>");
    let ul = find_element(&tree, tree.root(), "ul").unwrap();
    let lis = element_children(&tree, ul, "li");
    assert_eq!(lis.len(), 2, "ul should have 2 <li> children");
    assert_eq!(tree.text_content(lis[0]), "A");
    assert_eq!(tree.text_content(lis[1]), "B");
}

#[test]
fn test_dd_dt_implicit_close() {
    let tree = parse("<dl><dt>T<dd>D<dt>T2</dl>");
    let dl = find_element(&tree, tree.root(), "dl").unwrap();
    let dts = element_children(&tree, dl, "dt");
    let dds = element_children(&tree, dl, "dd");
    assert_eq!(dts.len(), 2);
    assert_eq!(dds.len(), 1);
    assert_eq!(tree.text_content(dts[1]), "T2");
}

#[test]
fn test_li_end_tag_without_li_in_scope_is_ignored() {
    let tree = parse("<body></li>text");
    assert_eq!(tree.text_content(tree.body().unwrap()), "text");
    assert!(issues("<!DOCTYPE html></li>").iter().any(|m| m.contains("</li>")));
}

#[test]
fn test_nested_lists() {
    let tree = parse("<ul><li>A<ul><li>B</li></ul></li></ul>");
    let outer = find_element(&tree, tree.root(), "ul").unwrap();
    let outer_items = element_children(&tree, outer, "li");
    assert_eq!(outer_items.len(), 1);

    let inner = find_element(&tree, outer_items[0], "ul").unwrap();
    let inner_items = element_children(&tree, inner, "li");
    assert_eq!(inner_items.len(), 1);
    assert_eq!(tree.text_content(inner_items[0]), "B");
}

// ========== Tables ==========

#[test]
fn test_table_gets_implied_tbody() {
    assert_eq!(
        dump("<table><tr><td>1<td>2</table>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <table>\n\
         |       <tbody>\n\
         |         <tr>\n\
         |           <td>\n\
         |             \"1\"\n\
         |           <td>\n\
         |             \"2\"\n"
    );
}

#[test]
fn test_foster_parenting_of_formatting_element() {
    assert_eq!(
        dump("<table><b>bold</b><tr><td>cell</table>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <b>\n\
         |       \"bold\"\n\
         |     <table>\n\
         |       <tbody>\n\
         |         <tr>\n\
         |           <td>\n\
         |             \"cell\"\n"
    );
}

#[test]
fn test_foster_parenting_of_text() {
    assert_eq!(
        dump("<table>x</table>"),
        "| <html>\n|   <head>\n|   <body>\n|     \"x\"\n|     <table>\n"
    );
    assert!(
        issues("<!DOCTYPE html><table>x</table>")
            .iter()
            .any(|m| m == "non-whitespace text in table")
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    let tree = parse("<table> <tr> </tr> </table>");
    let table = find_element(&tree, tree.root(), "table").unwrap();
    assert_eq!(tree.as_text(tree.children(table)[0]), Some(" "));
}

#[test]
fn test_caption_and_colgroup() {
    assert_eq!(
        dump("<table><caption>c<col><tr><td>x</table>"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <table>\n\
         |       <caption>\n\
         |         \"c\"\n\
         |       <colgroup>\n\
         |         <col>\n\
         |       <tbody>\n\
         |         <tr>\n\
         |           <td>\n\
         |             \"x\"\n"
    );
}

#[test]
fn test_nested_table_closes_outer() {
    let tree = parse("<table><tr><td><table></table></td></tr></table>");
    let td = find_element(&tree, tree.root(), "td").unwrap();
    assert!(find_element(&tree, td, "table").is_some());

    let tree = parse("<table><table>");
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "table").len(), 2);
}

#[test]
fn test_hidden_input_stays_in_table() {
    let tree = parse("<table><input type=hidden><input type=text></table>");
    let table = find_element(&tree, tree.root(), "table").unwrap();
    assert_eq!(element_children(&tree, table, "input").len(), 1);
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "input").len(), 1);
}

// ========== Select ==========

#[test]
fn test_options_close_each_other() {
    let tree = parse("<select><option>a<option>b<optgroup><option>c</select>");
    let select = find_element(&tree, tree.root(), "select").unwrap();
    assert_eq!(element_children(&tree, select, "option").len(), 2);
    let optgroup = find_element(&tree, select, "optgroup").unwrap();
    assert_eq!(element_children(&tree, optgroup, "option").len(), 1);
}

#[test]
fn test_select_in_table_closed_by_cell() {
    let tree = parse("<table><tr><td><select><option>x<td>y</table>");
    let tr = find_element(&tree, tree.root(), "tr").unwrap();
    let cells = element_children(&tree, tr, "td");
    assert_eq!(cells.len(), 2);
    assert!(find_element(&tree, cells[0], "select").is_some());
    assert_eq!(tree.text_content(cells[1]), "y");
}

#[test]
fn test_nested_select_start_tag_closes_select() {
    let tree = parse("<select><select>after");
    let body = tree.body().unwrap();
    assert_eq!(element_children(&tree, body, "select").len(), 1);
    assert_eq!(tree.as_text(tree.last_child(body).unwrap()), Some("after"));
}

// ========== Frameset, after body ==========

#[test]
fn test_frameset_document() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        "| <html>\n|   <head>\n|   <frameset>\n|     <frame>\n"
    );
    let tree = parse("<frameset></frameset>");
    let body = tree.body().unwrap();
    assert_eq!(tree.as_element(body).unwrap().tag_name, "frameset");
}

#[test]
fn test_frameset_ignored_after_content() {
    let tree = parse("<p>text<frameset>");
    assert!(find_element(&tree, tree.root(), "frameset").is_none());
}

#[test]
fn test_comments_after_body_and_html() {
    assert_eq!(
        dump("<p>x</p></body><!--a--></html><!--b-->"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <p>\n\
         |       \"x\"\n\
         |   <!-- a -->\n\
         | <!-- b -->\n"
    );
}

#[test]
fn test_text_after_html_reopens_body() {
    let tree = parse("<body></body></html>late");
    assert_eq!(tree.text_content(tree.body().unwrap()), "late");
}

// ========== Quirks ==========

#[test]
fn test_missing_doctype_is_quirks() {
    let (tree, issues) = parse_document_with_options("<p>", ParserOptions::default());
    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);
    assert_eq!(issues[0].message, "missing DOCTYPE");
}

#[test]
fn test_srcdoc_without_doctype_is_no_quirks() {
    let options = ParserOptions::default().with_iframe_srcdoc(true);
    let (tree, issues) = parse_document_with_options("<p>", options);
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_legacy_doctypes_pick_modes() {
    let transitional = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#;
    assert_eq!(parse(transitional).quirks_mode(), QuirksMode::Quirks);

    let with_system = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#;
    assert_eq!(parse(with_system).quirks_mode(), QuirksMode::LimitedQuirks);

    let xhtml = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "x">"#;
    assert_eq!(parse(xhtml).quirks_mode(), QuirksMode::LimitedQuirks);

    assert_eq!(parse("<!doctype html>").quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(parse("<!DOCTYPE foo>").quirks_mode(), QuirksMode::Quirks);
}

#[test]
fn test_table_in_paragraph_depends_on_quirks() {
    assert_eq!(
        dump("<p><table>"),
        "| <html>\n|   <head>\n|   <body>\n|     <p>\n|       <table>\n"
    );
    assert_eq!(
        dump("<!DOCTYPE html><p><table>"),
        "| <!DOCTYPE html>\n| <html>\n|   <head>\n|   <body>\n|     <p>\n|     <table>\n"
    );
}

// ========== Scripting flag ==========

#[test]
fn test_noscript_in_head_with_scripting_disabled() {
    let tree = parse("<head><noscript><p>x</p></noscript>");
    let noscript = find_element(&tree, tree.root(), "noscript").unwrap();
    assert_eq!(tree.parent(noscript), tree.head());
    assert!(tree.children(noscript).is_empty());
    let p = find_element(&tree, tree.body().unwrap(), "p").unwrap();
    assert_eq!(tree.text_content(p), "x");
}

#[test]
fn test_noscript_in_head_with_scripting_enabled() {
    let options = ParserOptions::default().with_scripting(true);
    let (tree, _) = parse_document_with_options("<head><noscript><p>x</p></noscript>", options);
    let noscript = find_element(&tree, tree.root(), "noscript").unwrap();
    assert_eq!(tree.text_content(noscript), "<p>x</p>");
    assert!(find_element(&tree, tree.root(), "p").is_none());
}

// ========== Template ==========

#[test]
fn test_template_is_a_formatting_boundary() {
    assert_eq!(
        dump("<body><template><b>x</template>y"),
        "| <html>\n\
         |   <head>\n\
         |   <body>\n\
         |     <template>\n\
         |       <b>\n\
         |         \"x\"\n\
         |     \"y\"\n"
    );
}

// ========== Issues ==========

#[test]
fn test_issues_name_token_and_mode() {
    let messages = issues("<!DOCTYPE html><p></div>");
    assert_eq!(messages, ["unexpected end tag </div> in InBody"]);
}

#[test]
fn test_lexical_issues_carry_codes() {
    let (_, issues) = parse_document_with_options(
        "<!DOCTYPE html><p a=1 a=2>",
        ParserOptions::default(),
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code.map(|c| c.to_string()).as_deref(), Some("duplicate-attribute"));
    assert!(issues[0].is_error);
}

#[test]
fn test_issue_collection_can_be_disabled() {
    let options = ParserOptions::default().with_issue_collection(false);
    let (tree, issues) = parse_document_with_options("<p></div><a><a>", options);
    assert!(issues.is_empty());
    assert_eq!(find_all_elements(&tree, tree.root(), "a").len(), 2);
}

// ========== Driving the parser ==========

#[test]
fn test_step_stops_after_end_of_file() {
    let mut parser = HTMLParser::new("<p>hi");
    let mut steps = 0;
    while parser.step() {
        steps += 1;
        assert!(steps < 100, "parser never stopped");
    }
    assert!(!parser.step());
    assert_eq!(parser.sink().text_content(parser.sink().body().unwrap()), "hi");
}

/// A sink that keeps a DomTree and remembers every reported issue.
#[derive(Default)]
struct RecordingSink {
    tree: DomTree,
    reported: Vec<String>,
}

impl TreeSink for RecordingSink {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        self.tree.document()
    }
    fn create_element(&mut self, name: &str, attributes: &[Attribute]) -> NodeId {
        self.tree.create_element(name, attributes)
    }
    fn create_comment(&mut self, data: &str) -> NodeId {
        self.tree.create_comment(data)
    }
    fn create_text_node(&mut self, data: &str) -> NodeId {
        self.tree.create_text_node(data)
    }
    fn create_document_type(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.tree.create_document_type(name, public_id, system_id)
    }
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        TreeSink::append_child(&mut self.tree, parent, child);
    }
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        TreeSink::insert_before(&mut self.tree, parent, child, reference);
    }
    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        TreeSink::remove_child(&mut self.tree, parent, child);
    }
    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.tree.local_name(node)
    }
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        TreeSink::parent(&self.tree, node)
    }
    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        TreeSink::first_child(&self.tree, node)
    }
    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        TreeSink::last_child(&self.tree, node)
    }
    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        TreeSink::next_sibling(&self.tree, node)
    }
    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        TreeSink::previous_sibling(&self.tree, node)
    }
    fn append_text(&mut self, node: NodeId, data: &str) -> bool {
        TreeSink::append_text(&mut self.tree, node, data)
    }
    fn add_attributes_if_missing(&mut self, element: NodeId, attributes: &[Attribute]) {
        self.tree.add_attributes_if_missing(element, attributes);
    }
    fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        self.tree.reparent_children(from, to);
    }
    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        TreeSink::set_quirks_mode(&mut self.tree, mode);
    }
    fn parse_error(&mut self, issue: &ParseIssue) {
        self.reported.push(issue.message.clone());
    }
}

#[test]
fn test_custom_sink_sees_every_issue() {
    let options = ParserOptions::default().with_issue_collection(false);
    let parser = HTMLParser::from_parts(
        HTMLTokenizer::new("<p a=1 a=2></div>"),
        RecordingSink::default(),
        options,
    );
    let sink = parser.run();
    assert_eq!(
        sink.reported,
        [
            "duplicate-attribute",
            "missing DOCTYPE",
            "unexpected end tag </div> in InBody",
        ]
    );
    assert_eq!(sink.tree.quirks_mode(), QuirksMode::Quirks);
    assert!(find_element(&sink.tree, sink.tree.root(), "p").is_some());
}
