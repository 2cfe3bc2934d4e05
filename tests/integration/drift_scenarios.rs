use std::fs;
use std::path::{Path, PathBuf};

use driftcheck::{collect, find_additions, load, persist, verify, DiffEntry, Snapshot};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    root: PathBuf,
    snapshot: Snapshot,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("index.html"), "<html></html>").unwrap();
    fs::write(root.join("assets/app.js"), "console.log(1)").unwrap();
    fs::write(root.join("assets/style.css"), "body {}").unwrap();

    let snap_path = temp.path().join("snapshot_site.json");
    persist(&collect(&root).unwrap(), &snap_path).unwrap();
    let snapshot = load(&snap_path).unwrap();
    Fixture {
        _temp: temp,
        root,
        snapshot,
    }
}

fn verdict_for(snapshot: &Snapshot, path: &Path) -> DiffEntry {
    let key = path.to_string_lossy().into_owned();
    verify(snapshot)
        .find(|(p, _)| *p == key)
        .map(|(_, r)| r.unwrap())
        .unwrap()
}

#[test]
fn modification_is_isolated_to_the_changed_file() {
    let fx = fixture();
    fs::write(fx.root.join("assets/app.js"), "console.log(2)").unwrap();

    assert_eq!(
        verdict_for(&fx.snapshot, &fx.root.join("assets/app.js")),
        DiffEntry::Modified
    );
    assert_eq!(
        verdict_for(&fx.snapshot, &fx.root.join("assets/style.css")),
        DiffEntry::Unchanged
    );
    assert_eq!(
        verdict_for(&fx.snapshot, &fx.root.join("index.html")),
        DiffEntry::Unchanged
    );
}

#[test]
fn deletion_is_reported_missing() {
    let fx = fixture();
    fs::remove_file(fx.root.join("index.html")).unwrap();

    assert_eq!(
        verdict_for(&fx.snapshot, &fx.root.join("index.html")),
        DiffEntry::Missing
    );
    assert_eq!(
        verdict_for(&fx.snapshot, &fx.root.join("assets/app.js")),
        DiffEntry::Unchanged
    );
}

#[test]
fn whole_directory_removed() {
    let fx = fixture();
    fs::remove_dir_all(fx.root.join("assets")).unwrap();

    let missing = verify(&fx.snapshot)
        .filter(|(_, r)| matches!(r, Ok(DiffEntry::Missing)))
        .count();
    assert_eq!(missing, 2);
}

#[test]
fn replaced_by_directory_is_missing() {
    let fx = fixture();
    let target = fx.root.join("index.html");
    fs::remove_file(&target).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(target.join("inner"), "x").unwrap();

    assert_eq!(verdict_for(&fx.snapshot, &target), DiffEntry::Missing);
}

#[test]
fn touching_without_content_change_is_unchanged() {
    let fx = fixture();
    let target = fx.root.join("index.html");
    let content = fs::read(&target).unwrap();
    fs::write(&target, content).unwrap();

    assert_eq!(verdict_for(&fx.snapshot, &target), DiffEntry::Unchanged);
}

#[test]
fn one_verdict_per_snapshot_entry() {
    let fx = fixture();
    fs::write(fx.root.join("assets/app.js"), "changed").unwrap();
    fs::remove_file(fx.root.join("index.html")).unwrap();
    fs::write(fx.root.join("new-page.html"), "new").unwrap();

    let results: Vec<_> = verify(&fx.snapshot).collect();
    assert_eq!(results.len(), fx.snapshot.len());
    let paths: Vec<&str> = results.iter().map(|(p, _)| *p).collect();
    assert_eq!(paths, fx.snapshot.paths().collect::<Vec<_>>());
}

#[test]
fn additions_are_reported_separately() {
    let fx = fixture();
    fs::write(fx.root.join("new-page.html"), "new").unwrap();

    let added = find_additions(&fx.snapshot, &fx.root).unwrap();
    assert_eq!(
        added,
        vec![fx.root.join("new-page.html").to_string_lossy().into_owned()]
    );
    assert!(verify(&fx.snapshot).all(|(_, r)| matches!(r, Ok(DiffEntry::Unchanged))));
}
