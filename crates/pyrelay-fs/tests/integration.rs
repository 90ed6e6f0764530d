use pyrelay_fs::{chmod_plus_x, is_executable};
use tempfile::tempdir;

#[cfg(unix)]
fn set_mode(path: &std::path::Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o7777
}

#[cfg(unix)]
#[test]
fn test_chmod_plus_x_makes_readable_file_executable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("script");
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    set_mode(&path, 0o640);

    assert!(!is_executable(&path).unwrap());

    chmod_plus_x(&path).unwrap();

    assert_eq!(mode_of(&path), 0o750);
    assert!(is_executable(&path).unwrap());
}

#[cfg(unix)]
#[test]
fn test_plain_file_is_not_executable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::write(&path, "data").unwrap();
    set_mode(&path, 0o644);

    assert!(!is_executable(&path).unwrap());
}

#[cfg(unix)]
#[test]
fn test_symlink_to_executable_is_executable() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let link = dir.path().join("link");
    std::fs::write(&target, "#!/bin/sh\n").unwrap();
    set_mode(&target, 0o755);
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert!(is_executable(&link).unwrap());
}

#[test]
fn test_chmod_plus_x_missing_path_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing");

    let err = chmod_plus_x(&path).unwrap_err();
    assert_eq!(err.path(), path.as_path());
    assert_eq!(err.io().kind(), std::io::ErrorKind::NotFound);
}
