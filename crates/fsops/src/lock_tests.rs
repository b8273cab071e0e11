use super::*;
use tempfile::tempdir;

#[test]
fn acquire_creates_dir_and_owner_file() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    let lock = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1")).unwrap();
    assert!(lock_path.is_dir());
    assert!(lock_path.join("owner.json").is_file());
}

#[test]
fn second_acquire_on_same_dir_fails() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    let _first = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1")).unwrap();
    let second = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1"));
    assert!(matches!(second, Err(FsError::AlreadyLocked { .. })));
}

#[test]
fn release_then_reacquire_succeeds() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    let mut lock = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1")).unwrap();
    lock.release().unwrap();
    assert!(!lock_path.exists());

    let second = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1"));
    assert!(second.is_ok());
}

#[test]
fn release_is_idempotent() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    let mut lock = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1")).unwrap();
    lock.release().unwrap();
    lock.release().unwrap();
}

#[test]
fn drop_releases_the_lock() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    {
        let _lock = InstanceLock::acquire(&lock_path, OwnerInfo::current("watcher-1")).unwrap();
    }
    assert!(!lock_path.exists());
}

#[test]
fn read_owner_reports_who_holds_the_lock() {
    let dir = tempdir().unwrap();
    let lock_path = dir.path().join("watcher-1.lock");
    let owner = OwnerInfo::current("watcher-1");
    let _lock = InstanceLock::acquire(&lock_path, owner.clone()).unwrap();

    let read_back = InstanceLock::read_owner(&lock_path).unwrap();
    assert_eq!(read_back, owner);
}
