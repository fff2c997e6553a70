//! Nested objects, absent values and cyclic graphs.

use wirestruct_integration_test::{
    ListNode, Material, Mesh, Ouroboros, TreeNode,
};
use wirestruct_serialize::{
    AccessError, Configuration, ErrorKind, StructWriter, to_vec,
};

#[test]
fn depth_first_order() {
    let tree = TreeNode::with_children(1, vec![
        TreeNode::with_children(2, vec![TreeNode::leaf(3)]),
        TreeNode::leaf(4),
    ]);

    let bytes = to_vec(&tree, Configuration::default()).unwrap();

    let values: Vec<i32> = bytes
        .chunks_exact(4)
        .map(|chunk| i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    assert_eq!(values, [1, 2, 3, 4]);
}

#[test]
fn absent_nested_object_contributes_nothing() {
    let mut with_material = Mesh::new(Vec::new());
    with_material.material = Some(Box::new(Material { id: 1, shininess: 2 }));
    let without_material = Mesh::new(Vec::new());

    let with_bytes = to_vec(&with_material, Configuration::default()).unwrap();
    let without_bytes =
        to_vec(&without_material, Configuration::default()).unwrap();

    assert_eq!(without_bytes, [0, 0, 0, 0]);
    assert_eq!(with_bytes, [0, 0, 0, 0, 0x00, 0x01, 0x02]);
}

#[test]
fn absent_array_element_fails_with_its_path() {
    let mut tree = TreeNode::with_children(1, vec![TreeNode::leaf(2)]);
    tree.children[0].as_mut().unwrap().children.push(None);

    let mut writer = StructWriter::new(Vec::new());
    let error = writer.serialize(&tree).unwrap_err();

    assert!(matches!(
        error.kind(),
        ErrorKind::Access(AccessError::AbsentElement)
    ));
    assert_eq!(error.path().to_string(), "children[0].children[0]");
    // bytes before the failure stay in the sink
    assert_eq!(writer.into_inner(), [0, 0, 0, 1, 0, 0, 0, 2]);
}

#[test]
fn cycles_are_detected() {
    let node = Ouroboros { id: 5, parent: None };

    let error = to_vec(&node, Configuration::default()).unwrap_err();

    assert!(matches!(
        error.kind(),
        ErrorKind::CyclicGraph { type_name } if type_name == "Ouroboros"
    ));
    assert_eq!(error.path().to_string(), "parent");
    assert_eq!(
        error.to_string(),
        "failed to serialize `parent`"
    );
}

#[test]
fn long_chains_within_the_limit() {
    let list = ListNode::chain(100);

    let bytes = to_vec(&list, Configuration::default()).unwrap();

    assert_eq!(bytes.len(), 200);
    assert_eq!(&bytes[..4], [0, 0, 0, 1]);
    assert_eq!(&bytes[bytes.len() - 2..], [0, 99]);
}

#[test]
fn depth_limit() {
    let list = ListNode::chain(10);
    let configuration = Configuration::builder().max_depth(9).build();

    let error = to_vec(&list, configuration).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::DepthExceeded { limit: 9 }));
    assert_eq!(error.path().segments().count(), 9);

    let configuration = Configuration::builder().max_depth(10).build();
    assert_eq!(to_vec(&list, configuration).unwrap().len(), 20);
}
