use std::path::Path;

use watcherd::watch::ExcludeFilter;

#[test]
fn empty_pattern_list_excludes_nothing() {
    let filter = ExcludeFilter::compile(&[]).unwrap();
    assert!(filter.is_empty());
    assert!(!filter.matches(Path::new("/tmp/x/a.txt")));
}

#[test]
fn matching_paths_are_excluded() {
    let filter = ExcludeFilter::compile(&[r".*\.tmp$".to_string()]).unwrap();
    assert!(filter.matches(Path::new("/tmp/x/b.tmp")));
    assert!(!filter.matches(Path::new("/tmp/x/b.txt")));
    assert!(!filter.matches(Path::new("/tmp/x/b.tmp.bak")));
}

#[test]
fn any_pattern_in_the_set_excludes() {
    let filter = ExcludeFilter::compile(&[
        r".*\.tmp$".to_string(),
        r"/\.git/".to_string(),
    ])
    .unwrap();

    assert!(filter.matches(Path::new("/srv/repo/.git/index")));
    assert!(filter.matches(Path::new("/srv/repo/scratch.tmp")));
    assert!(!filter.matches(Path::new("/srv/repo/src/main.rs")));
}

#[test]
fn invalid_pattern_is_rejected() {
    assert!(ExcludeFilter::compile(&["[unclosed".to_string()]).is_err());
}
