use std::fs;
use std::path::{Path, PathBuf};

use dirtree_core::profile::{DEFAULT_PROFILE, PROFILES_FILE};
use dirtree_core::{ProfileError, ProfileStore};
use dirtree_tui::session::SessionState;
use dirtree_tui::{Session, SessionError};
use tempfile::TempDir;

/// `/proj` with `src/a.py`, `build/out.bin` and a `.git` directory.
fn create_proj(base: &Path) -> PathBuf {
    let proj = base.join("proj");
    fs::create_dir_all(proj.join("src")).unwrap();
    fs::create_dir_all(proj.join("build")).unwrap();
    fs::create_dir_all(proj.join(".git/objects")).unwrap();
    fs::write(proj.join("src/a.py"), "print('hi')").unwrap();
    fs::write(proj.join("build/out.bin"), "").unwrap();
    fs::write(proj.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    proj
}

fn store_path(base: &Path) -> PathBuf {
    base.join("config").join(PROFILES_FILE)
}

fn open_session(base: &Path, profile: &str) -> Session {
    let proj = create_proj(base);
    let mut session = Session::new(ProfileStore::load(store_path(base)), profile);
    session.open_directory(&proj).unwrap();
    session
}

fn find_path(session: &Session, path: &Path) -> dirtree_core::NodeId {
    let tree = session.tree();
    tree.preorder()
        .into_iter()
        .find(|&id| tree.node(id).is_some_and(|n| n.path() == path))
        .unwrap()
}

fn find(session: &Session, name: &str) -> dirtree_core::NodeId {
    let tree = session.tree();
    tree.preorder()
        .into_iter()
        .find(|&id| tree.node(id).is_some_and(|n| n.name == name))
        .unwrap()
}

#[test]
fn test_open_applies_builtin_excludes() {
    let temp = TempDir::new().unwrap();
    let session = open_session(temp.path(), DEFAULT_PROFILE);

    assert_eq!(session.state(), SessionState::Loaded);
    let names: Vec<_> = session
        .tree()
        .preorder()
        .into_iter()
        .filter_map(|id| session.tree().node(id).map(|n| n.name.to_string()))
        .collect();
    assert_eq!(names, ["proj", "build", "out.bin", "src", "a.py"]);
}

#[test]
fn test_exclude_then_export() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);

    let build = find(&session, "build");
    session.tree_mut().set_selection([build]);
    let outcome = session.exclude_selected().unwrap();
    assert_eq!(outcome.message, "Excluded 1 item(s)");
    assert!(!outcome.rescanned);

    let out = temp.path().join("structure.txt");
    session.export(&out).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "proj\n    src\n        a.py");

    session.include_selected().unwrap();
    session.export(&out).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "proj\n    build\n        out.bin\n    src\n        a.py");
}

#[test]
fn test_export_to_missing_directory_is_error() {
    let temp = TempDir::new().unwrap();
    let session = open_session(temp.path(), DEFAULT_PROFILE);

    let err = session
        .export(temp.path().join("missing/structure.txt"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Export(_)));
    assert!(!err.is_warning());
}

#[test]
fn test_add_to_patterns_on_default_is_not_saved() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);

    let build = find(&session, "build");
    session.tree_mut().set_selection([build]);
    let outcome = session.add_selected_to_patterns().unwrap();

    assert!(outcome.message.contains("not saved"));
    assert!(session.patterns().matches("build"));
    assert!(session.tree().is_excluded(build));

    let reloaded = ProfileStore::load(store_path(temp.path()));
    assert!(reloaded.get(DEFAULT_PROFILE).is_empty());
}

#[test]
fn test_add_to_patterns_on_named_profile_is_saved() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.save_profile_as("Python").unwrap();

    let build = find(&session, "build");
    session.tree_mut().set_selection([build]);
    session.add_selected_to_patterns().unwrap();

    let reloaded = ProfileStore::load(store_path(temp.path()));
    let saved = reloaded.get("Python");
    assert!(saved.matches("build"));
    // Built-ins are implied, never stored
    assert!(!saved.matches(".git"));
}

#[test]
fn test_save_profile_as_rejections() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.save_profile_as("Web").unwrap();
    session.switch_profile(DEFAULT_PROFILE).unwrap();

    let err = session.save_profile_as("Web").unwrap_err();
    assert!(matches!(err, SessionError::DuplicateProfile(ref name) if name == "Web"));
    assert!(err.is_warning());

    let err = session.save_profile_as("   ").unwrap_err();
    assert!(matches!(err, SessionError::Profile(ProfileError::EmptyName)));

    let err = session.save_profile_as(DEFAULT_PROFILE).unwrap_err();
    assert!(matches!(err, SessionError::Profile(ProfileError::ReadOnly { .. })));
    assert_eq!(session.active_profile(), DEFAULT_PROFILE);
}

#[test]
fn test_switch_profile_rescans_with_new_patterns() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.add_pattern("build").unwrap();
    session.save_profile_as("NoBuild").unwrap();
    session.switch_profile(DEFAULT_PROFILE).unwrap();
    assert_eq!(session.tree().len(), 5);

    let outcome = session.switch_profile("NoBuild").unwrap();
    assert!(outcome.rescanned);
    assert!(outcome.message.starts_with("Loaded profile: NoBuild"));
    assert_eq!(session.tree().len(), 3);

    let err = session.switch_profile("Nope").unwrap_err();
    assert!(matches!(err, SessionError::Profile(ProfileError::Unknown { .. })));
}

#[test]
fn test_delete_active_profile_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.add_pattern("src").unwrap();
    session.save_profile_as("NoSrc").unwrap();
    session.rescan().unwrap();
    assert_eq!(session.tree().len(), 3);

    let outcome = session.delete_active_profile().unwrap();
    assert!(outcome.rescanned);
    assert_eq!(session.active_profile(), DEFAULT_PROFILE);
    assert!(!session.store().contains("NoSrc"));
    assert_eq!(session.tree().len(), 5);

    let err = session.delete_active_profile().unwrap_err();
    assert!(err.is_warning());
}

#[test]
fn test_remove_patterns_keeps_builtins() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.add_pattern("dist").unwrap();

    let outcome = session.remove_patterns(&["dist", ".git"]).unwrap();
    assert_eq!(outcome.message, "Removed 1 pattern(s), 1 built-in kept");
    assert!(!session.patterns().matches("dist"));
    assert!(session.patterns().matches(".git"));
}

#[test]
fn test_add_pattern_waits_for_rescan() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);

    let outcome = session.add_pattern("build").unwrap();
    assert!(!outcome.rescanned);
    assert_eq!(session.tree().len(), 5);

    let again = session.add_pattern("build").unwrap();
    assert!(again.message.contains("already"));

    session.rescan().unwrap();
    assert_eq!(session.tree().len(), 3);
}

#[test]
fn test_clear_exclusions() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);

    let ids = [find(&session, "build"), find(&session, "a.py")];
    session.tree_mut().set_selection(ids);
    session.exclude_selected().unwrap();
    assert_eq!(session.tree().excluded_count(), 2);

    let outcome = session.clear_exclusions().unwrap();
    assert!(outcome.message.contains("2 items"));
    assert_eq!(session.tree().excluded_count(), 0);

    let outcome = session.clear_exclusions().unwrap();
    assert_eq!(outcome.message, "No excluded items");
}

#[test]
fn test_session_starts_on_stored_profile() {
    let temp = TempDir::new().unwrap();
    let mut store = ProfileStore::load(store_path(temp.path()));
    store
        .save("Rust", &["target"].into_iter().collect())
        .unwrap();

    let session = Session::new(ProfileStore::load(store_path(temp.path())), "Rust");
    assert_eq!(session.active_profile(), "Rust");
    assert!(session.patterns().matches("target"));
    assert!(session.patterns().matches(".git"));
}

#[test]
fn test_add_to_patterns_marks_every_same_named_node() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("twins");
    for dir in ["a/build", "b/build"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("a/build/x.o"), "").unwrap();
    fs::write(root.join("b/build/y.o"), "").unwrap();
    fs::write(root.join("keep.txt"), "").unwrap();

    let mut session = Session::new(ProfileStore::load(store_path(temp.path())), DEFAULT_PROFILE);
    session.open_directory(&root).unwrap();
    let root = root.canonicalize().unwrap();
    let first = find_path(&session, &root.join("a/build"));
    let second = find_path(&session, &root.join("b/build"));
    session.tree_mut().set_selection([first, second]);

    let outcome = session.add_selected_to_patterns().unwrap();
    assert!(outcome.message.starts_with("Added 1 exclusion pattern(s)"));
    assert!(session.tree().is_excluded(first));
    assert!(session.tree().is_excluded(second));

    let out = temp.path().join("structure.txt");
    session.export(&out).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "twins\n    a\n    b\n    keep.txt"
    );
}

#[test]
fn test_add_to_patterns_marks_names_already_in_patterns() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.add_pattern("build").unwrap();

    let build = find(&session, "build");
    session.tree_mut().set_selection([build]);
    let outcome = session.add_selected_to_patterns().unwrap();

    assert!(outcome.message.contains("already patterns"));
    assert!(session.tree().is_excluded(build));
}

#[test]
fn test_failed_profile_save_leaves_session_unchanged() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.save_profile_as("Web").unwrap();

    // A directory in place of the store file makes every write fail
    let path = store_path(temp.path());
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let build = find(&session, "build");
    session.tree_mut().set_selection([build]);
    let err = session.add_selected_to_patterns().unwrap_err();

    assert!(matches!(err, SessionError::Profile(ProfileError::Io { .. })));
    assert!(!err.is_warning());
    assert!(!session.patterns().matches("build"));
    assert!(!session.tree().is_excluded(build));
    assert_eq!(session.tree().excluded_count(), 0);
    assert!(!session.store().get("Web").matches("build"));
}

#[test]
fn test_failed_rescan_keeps_previous_profile() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.add_pattern("build").unwrap();
    session.save_profile_as("NoBuild").unwrap();
    session.switch_profile(DEFAULT_PROFILE).unwrap();
    assert_eq!(session.tree().len(), 5);

    fs::remove_dir_all(temp.path().join("proj")).unwrap();

    let err = session.switch_profile("NoBuild").unwrap_err();
    assert!(matches!(err, SessionError::Scan(_)));
    assert_eq!(session.active_profile(), DEFAULT_PROFILE);
    assert!(!session.patterns().matches("build"));
    assert_eq!(session.tree().len(), 5);

    let err = session.open_directory(temp.path().join("proj")).unwrap_err();
    assert!(matches!(err, SessionError::Scan(_)));
    assert_eq!(session.tree().len(), 5);
}

#[test]
fn test_failed_delete_keeps_profile() {
    let temp = TempDir::new().unwrap();
    let mut session = open_session(temp.path(), DEFAULT_PROFILE);
    session.save_profile_as("Web").unwrap();

    fs::remove_dir_all(temp.path().join("proj")).unwrap();

    let err = session.delete_active_profile().unwrap_err();
    assert!(matches!(err, SessionError::Scan(_)));
    assert_eq!(session.active_profile(), "Web");
    assert!(session.store().contains("Web"));
}

#[test]
fn test_default_profile_ignores_stored_patterns() {
    let temp = TempDir::new().unwrap();
    let path = store_path(temp.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"Default": ["src"]}"#).unwrap();

    let session = open_session(temp.path(), DEFAULT_PROFILE);
    assert!(!session.patterns().matches("src"));
    assert_eq!(session.tree().len(), 5);
}
