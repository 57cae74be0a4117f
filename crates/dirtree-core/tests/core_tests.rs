use dirtree_core::{
    DEFAULT_PROFILE, DirTree, EXPORT_INDENT, NodeId, NodeKind, PatternSet, ProfileError,
    ProfileStore, render_export, strip_icon,
};
use tempfile::TempDir;

/// Build a small tree:
///
/// ```text
/// root
///     docs
///         guide.md
///         api
///             index.html
///     src
///         main.rs
///     Cargo.toml
/// ```
fn build_tree() -> (DirTree, Vec<NodeId>) {
    let mut tree = DirTree::new();
    let root = tree.add_root("root", NodeKind::Directory, "/root");
    let docs = tree
        .add_child(root, "docs", NodeKind::Directory, "/root/docs")
        .unwrap();
    let guide = tree
        .add_child(docs, "guide.md", NodeKind::File, "/root/docs/guide.md")
        .unwrap();
    let api = tree
        .add_child(docs, "api", NodeKind::Directory, "/root/docs/api")
        .unwrap();
    let index = tree
        .add_child(api, "index.html", NodeKind::File, "/root/docs/api/index.html")
        .unwrap();
    let src = tree
        .add_child(root, "src", NodeKind::Directory, "/root/src")
        .unwrap();
    let main = tree
        .add_child(src, "main.rs", NodeKind::File, "/root/src/main.rs")
        .unwrap();
    let cargo = tree
        .add_child(root, "Cargo.toml", NodeKind::File, "/root/Cargo.toml")
        .unwrap();
    (tree, vec![root, docs, guide, api, index, src, main, cargo])
}

#[test]
fn test_export_one_line_per_node_with_depth_indent() {
    let (tree, ids) = build_tree();
    let text = render_export(&tree);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), tree.len());
    for (line, id) in lines.iter().zip(tree.preorder()) {
        let depth = tree.depth(id);
        let indent = EXPORT_INDENT.repeat(depth);
        assert!(line.starts_with(&indent), "line {line:?} at depth {depth}");
        assert_eq!(&line[indent.len()..], tree.node(id).unwrap().name.as_str());
    }
    assert_eq!(tree.preorder(), ids);
}

#[test]
fn test_excluding_prunes_descendants_but_keeps_structure() {
    let (mut tree, ids) = build_tree();
    let docs = ids[1];
    let child_count = tree.children(docs).len();

    tree.exclude([docs]);

    let text = render_export(&tree);
    assert_eq!(text, "root\n    src\n        main.rs\n    Cargo.toml");
    assert_eq!(tree.children(docs).len(), child_count);
    assert_eq!(tree.len(), ids.len());
    for id in &ids {
        assert!(tree.node(*id).is_some());
    }
}

#[test]
fn test_include_restores_export() {
    let (mut tree, ids) = build_tree();
    let full = render_export(&tree);

    tree.exclude([ids[3], ids[6]]);
    assert_ne!(render_export(&tree), full);

    tree.include([ids[3], ids[6]]);
    assert_eq!(render_export(&tree), full);
}

#[test]
fn test_display_text_strips_to_name() {
    let (tree, ids) = build_tree();
    for id in ids {
        let node = tree.node(id).unwrap();
        assert_eq!(strip_icon(&node.display_text()), node.name.as_str());
    }
}

#[test]
fn test_profile_round_trip_for_many_names() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profiles.json");
    let mut store = ProfileStore::load(&path);

    let cases: Vec<(&str, PatternSet)> = vec![
        ("web", ["node_modules", "dist"].into_iter().collect()),
        ("empty", PatternSet::new()),
        ("Стандартный", [".cache"].into_iter().collect()),
        ("default", ["lowercase is not reserved"].into_iter().collect()),
    ];
    for (name, patterns) in &cases {
        store.save(name, patterns).unwrap();
    }

    let reloaded = ProfileStore::load(&path);
    for (name, patterns) in &cases {
        assert_eq!(&reloaded.get(name), patterns, "profile {name}");
    }
}

#[test]
fn test_default_profile_never_changes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profiles.json");
    let mut store = ProfileStore::load(&path);
    store.save("keep", &["x"].into_iter().collect()).unwrap();
    let snapshot = std::fs::read_to_string(&path).unwrap();

    for _ in 0..3 {
        assert!(matches!(
            store.save(DEFAULT_PROFILE, &PatternSet::builtin()),
            Err(ProfileError::ReadOnly { .. })
        ));
        assert!(matches!(
            store.delete(DEFAULT_PROFILE),
            Err(ProfileError::ReadOnly { .. })
        ));
    }

    assert_eq!(std::fs::read_to_string(&path).unwrap(), snapshot);
    assert!(ProfileStore::load(&path).get(DEFAULT_PROFILE).is_empty());
}
