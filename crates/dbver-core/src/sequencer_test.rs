use super::*;
use std::path::PathBuf;

fn unit(path: &str) -> VersionUnit {
    VersionUnit::from_path(PathBuf::from(path))
}

fn versions(pending: &[PendingVersion]) -> Vec<u64> {
    pending.iter().map(|p| p.version.get()).collect()
}

#[test]
fn test_select_pending_orders_numerically() {
    let units = vec![unit("sql/ver3"), unit("sql/ver1"), unit("sql/ver2")];
    let pending = select_pending(units, SchemaVersion::ZERO);
    assert_eq!(versions(&pending), vec![1, 2, 3]);
}

#[test]
fn test_select_pending_numeric_not_lexicographic() {
    let units = vec![unit("sql/ver10"), unit("sql/ver9"), unit("sql/ver100")];
    let pending = select_pending(units, SchemaVersion::ZERO);
    assert_eq!(versions(&pending), vec![9, 10, 100]);
}

#[test]
fn test_select_pending_filters_applied_versions() {
    let units = vec![unit("sql/ver1"), unit("sql/ver2"), unit("sql/ver3")];
    let pending = select_pending(units, SchemaVersion::new(2));
    assert_eq!(versions(&pending), vec![3]);
    assert_eq!(pending[0].path, PathBuf::from("sql/ver3"));
}

#[test]
fn test_select_pending_empty_when_up_to_date() {
    let units = vec![unit("sql/ver1"), unit("sql/ver5")];
    let pending = select_pending(units, SchemaVersion::new(5));
    assert!(pending.is_empty());
}

#[test]
fn test_select_pending_excludes_invalid_names() {
    let units = vec![unit("sql/verABC"), unit("sql/ver1")];
    let pending = select_pending(units.clone(), SchemaVersion::ZERO);
    assert_eq!(versions(&pending), vec![1]);

    // Even with no current version floor, invalid units never appear.
    let pending = select_pending(vec![unit("sql/verABC")], SchemaVersion::ZERO);
    assert!(pending.is_empty());
}

#[test]
fn test_select_pending_stable_for_duplicates() {
    let units = vec![unit("b/ver2"), unit("a/ver1"), unit("a/ver2")];
    let pending = select_pending(units, SchemaVersion::ZERO);
    let paths: Vec<PathBuf> = pending.into_iter().map(|p| p.path).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("a/ver1"),
            PathBuf::from("b/ver2"),
            PathBuf::from("a/ver2"),
        ]
    );
}

#[test]
fn test_check_invalid_skip_returns_invalid_units() {
    let units = vec![unit("sql/ver1"), unit("sql/verABC"), unit("sql/vers2")];
    let skipped = check_invalid(&units, InvalidDirPolicy::Skip).unwrap();
    let names: Vec<&str> = skipped.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["verABC", "vers2"]);
}

#[test]
fn test_check_invalid_fail_policy_errors() {
    let units = vec![unit("sql/ver1"), unit("sql/verABC")];
    let err = check_invalid(&units, InvalidDirPolicy::Fail).unwrap_err();
    match err {
        CoreError::InvalidVersionDir { path } => assert_eq!(path, PathBuf::from("sql/verABC")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_check_invalid_fail_policy_passes_clean_list() {
    let units = vec![unit("sql/ver1"), unit("sql/ver2")];
    assert!(check_invalid(&units, InvalidDirPolicy::Fail)
        .unwrap()
        .is_empty());
}
