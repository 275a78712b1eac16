use super::*;

fn canvas() -> Canvas {
    Canvas::new(10, 10).unwrap()
}

#[test]
fn append_flattens_fragments_in_order() {
    let mut tree = SvgTree::new(canvas());
    let defs = tree
        .append(
            None,
            Element::new("defs").child(Element::new("path").attr("id", "p").attr("d", "M0 0 Z")),
        )
        .unwrap();
    let g = tree.append(None, Element::new("g")).unwrap();
    let t = tree
        .append(Some(g), Element::new("text").text("hi").text(" there"))
        .unwrap();

    assert_eq!(tree.top_level(), &[defs, g]);
    assert_eq!(tree.element_children(defs).len(), 1);
    let p = tree.find_by_id("p").unwrap();
    assert_eq!(tree.node(p).parent, Some(defs));
    assert_eq!(tree.node(p).attr("d"), Some("M0 0 Z"));
    assert_eq!(tree.text_content(t), "hi there");
    assert_eq!(tree.count("path"), 1);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut tree = SvgTree::new(canvas());
    tree.append(None, Element::new("mask").attr("id", "m"))
        .unwrap();
    let err = tree
        .append(None, Element::new("mask").attr("id", "m"))
        .unwrap_err();
    assert!(matches!(err, LayerSvgError::Internal(_)), "{err}");
}

#[test]
fn text_nodes_cannot_take_children() {
    let mut tree = SvgTree::new(canvas());
    let t = tree
        .append(None, Element::new("text").text("x"))
        .unwrap();
    let text_node = tree.children(t)[0];
    assert!(tree.append(Some(text_node), Element::new("g")).is_err());
}

#[test]
fn attr_replaces_existing_value() {
    let el = Element::new("use").attr("fill", "red").attr("fill", "blue");
    assert_eq!(el.attrs.len(), 1);
    assert_eq!(el.get("fill"), Some("blue"));
    assert_eq!(url("a"), "url(#a)");
    assert_eq!(href("a"), "#a");
}
