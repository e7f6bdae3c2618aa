#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use ztree::{Category, ErrorKind, Node, Result};

fn names(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| node.name().map(|n| n.to_string()).unwrap_or_default())
        .collect()
}

#[test]
fn test_flattened_view_document_order() -> Result<()> {
    let root = Node::document();
    let a = Node::element("A");
    let b = Node::element("B");
    let c = Node::element("C");
    root.add_child(a.clone())?;
    a.add_child(b.clone())?;
    root.add_child(c.clone())?;

    assert_eq!(root.flattened_children(), Some(vec![a, b, c]));
    Ok(())
}

#[test]
fn test_flattened_view_distinguishes_no_sequence() -> Result<()> {
    let node = Node::element("leaf");
    assert_eq!(node.flattened_children(), None);

    node.add_child(Node::element("tmp"))?;
    node.remove_child(0)?;
    assert_eq!(node.flattened_children(), Some(Vec::new()));
    Ok(())
}

#[test]
fn test_write_then_read_append() -> Result<()> {
    let root = Node::document();
    root.add_child(Node::element("a"))?;

    let value = Node::element("v");
    let path = [0, 0];
    root.write_at(&path, Some(value.clone()))?;
    assert_eq!(root.node_at(&path), Some(value.clone()));

    let path = [1];
    let second = Node::element("second");
    root.write_at(&path, Some(second.clone()))?;
    assert_eq!(root.node_at(&path), Some(second));
    Ok(())
}

#[test]
fn test_write_then_read_insert_in_middle() -> Result<()> {
    let root = Node::document();
    root.set_children(vec![
        Node::element("a"),
        Node::element("b"),
        Node::element("c"),
    ])?;

    let value = Node::element("new");
    root.write_at(&[1], Some(value.clone()))?;
    assert_eq!(root.node_at(&[1]), Some(value));
    assert_eq!(names(&root.children().unwrap()), ["a", "new", "b", "c"]);
    Ok(())
}

#[test]
fn test_write_existing_sibling_at_end_agrees_with_insert_child() -> Result<()> {
    let root = Node::document();
    let a = Node::element("a");
    root.set_children(vec![a.clone(), Node::element("b"), Node::element("c")])?;

    let expected = ErrorKind::IndexOutOfRange { index: 3, len: 2 };
    let err = root.insert_child(3, a.clone()).unwrap_err();
    assert_eq!(err.kind(), &expected);
    let err = root.write_at(&[3], Some(a.clone())).unwrap_err();
    assert_eq!(err.kind(), &expected);
    assert_eq!(names(&root.children().unwrap()), ["a", "b", "c"]);

    root.write_at(&[2], Some(a.clone()))?;
    assert_eq!(root.node_at(&[2]), Some(a));
    assert_eq!(names(&root.children().unwrap()), ["b", "c", "a"]);
    Ok(())
}

#[test]
fn test_write_errors_are_addressing_errors() -> Result<()> {
    let root = Node::document();
    root.add_child(Node::element("a"))?;

    let cases: [(&[usize], Option<Node>); 5] = [
        (&[], Some(Node::element("x"))),
        (&[], None),
        (&[2], Some(Node::element("x"))),
        (&[1], None),
        (&[0, 0, 0], Some(Node::element("x"))),
    ];
    for (path, value) in cases {
        let err = root.write_at(path, value).unwrap_err();
        assert_eq!(err.category(), Category::Addressing, "{path:?}");
    }
    assert_eq!(root.child_count(), 1);
    Ok(())
}

#[test]
fn test_empty_path_write_reports_error() {
    let node = Node::element("a");
    let err = node.insert_at(&[], Node::element("b")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyIndexPath);
    let err = node.remove_at(&[]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyIndexPath);
}

#[test]
fn test_write_cycle_is_rejected() -> Result<()> {
    let root = Node::document();
    let a = Node::element("a");
    root.add_child(a.clone())?;
    let err = root.write_at(&[0, 0], Some(root.clone())).unwrap_err();
    assert!(err.is_hierarchy());
    assert_eq!(a.children(), None);
    Ok(())
}

#[test]
fn test_index_path_round_trip() -> Result<()> {
    let root = Node::document();
    root.set_children(vec![Node::element("a"), Node::element("b")])?;
    let b = root.child(1).unwrap();
    b.set_children(vec![Node::element("c"), Node::element("d")])?;

    for node in root.descendants() {
        assert_eq!(root.node_at(&node.index_path()), Some(node.clone()));
    }
    Ok(())
}
