use std::path::{Path, PathBuf};

use super::*;
use crate::fs::{FsCall, MemoryFilesystem};
use crate::paths::MapEnvironment;
use crate::report::{Outcome, SkipReason};

const HOME: &str = "/Users/tester";

fn mac_env() -> MapEnvironment {
    MapEnvironment::new().home(HOME)
}

fn chrome_base() -> PathBuf {
    Path::new(HOME).join("Library/Application Support/Google/Chrome")
}

fn firefox_base() -> PathBuf {
    Path::new(HOME).join("Library/Application Support/Firefox/Profiles")
}

fn safari_base() -> PathBuf {
    Path::new(HOME).join("Library/Safari/Favicon Cache")
}

fn populated_mac_fs() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.add_file(chrome_base().join("Default/Favicons"))
        .add_file(chrome_base().join("Default/Favicons-journal"))
        .add_file(chrome_base().join("Default/Bookmarks"))
        .add_file(firefox_base().join("abc.default/favicons.sqlite"))
        .add_file(firefox_base().join("abc.default/places.sqlite"))
        .add_file(safari_base().join("favicons.db"));
    fs
}

fn sweep<'a>(fs: &'a MemoryFilesystem, env: &'a MapEnvironment, platform: Platform) -> Sweep<'a> {
    Sweep::builder()
        .platform(platform)
        .environment(env)
        .filesystem(fs)
        .build()
}

/// Index of the first call touching anything under `base`.
fn first_touch(calls: &[FsCall], base: &Path) -> usize {
    calls
        .iter()
        .position(|call| call.path().starts_with(base))
        .unwrap_or_else(|| panic!("{} was never touched", base.display()))
}

#[test]
fn test_browsers_run_in_fixed_order() {
    let env = mac_env();
    let fs = populated_mac_fs();

    let report = sweep(&fs, &env, Platform::MacOs).run();

    let order: Vec<_> = report.browsers().iter().map(|r| r.browser).collect();
    assert_eq!(order, [Browser::Chrome, Browser::Firefox, Browser::Safari]);

    let calls = fs.calls();
    let chrome = first_touch(&calls, &chrome_base());
    let firefox = first_touch(&calls, &firefox_base());
    let safari = first_touch(&calls, &safari_base());
    assert!(chrome < firefox && firefox < safari);

    // Nothing of an earlier browser is touched after a later one starts
    assert!(
        calls[firefox..]
            .iter()
            .all(|call| !call.path().starts_with(chrome_base()))
    );
    assert!(
        calls[safari..]
            .iter()
            .all(|call| !call.path().starts_with(firefox_base()))
    );
}

#[test]
fn test_full_sweep_on_macos() {
    let env = mac_env();
    let fs = populated_mac_fs();

    let report = sweep(&fs, &env, Platform::MacOs).run();

    assert_eq!(report.platform(), Platform::MacOs);
    assert_eq!(report.removed_count(), 4);
    assert_eq!(report.failures().count(), 0);
    assert!(fs.contains(chrome_base().join("Default/Bookmarks")));
    assert!(fs.contains(firefox_base().join("abc.default/places.sqlite")));
    assert!(!fs.contains(safari_base()));
}

#[test]
fn test_failures_do_not_stop_later_browsers() {
    let env = mac_env();
    let fs = populated_mac_fs();
    fs.lock(chrome_base().join("Default/Favicons"))
        .lock(firefox_base().join("abc.default/favicons.sqlite"));

    let report = sweep(&fs, &env, Platform::MacOs).run();

    assert_eq!(report.failures().count(), 2);
    let safari = report.browser(Browser::Safari).unwrap();
    assert_eq!(
        safari.removals()[0].outcome,
        Outcome::RemovedDirectory { leftovers: 0 }
    );
    assert!(!fs.contains(safari_base()));
    assert!(!fs.contains(chrome_base().join("Default/Favicons-journal")));
}

#[test]
fn test_skips_do_not_stop_later_browsers() {
    let env = mac_env();
    let fs = MemoryFilesystem::new();
    fs.add_file(safari_base().join("favicons.db"));

    let report = sweep(&fs, &env, Platform::MacOs).run();

    assert_eq!(report.skipped().count(), 2);
    assert!(matches!(
        report.browser(Browser::Chrome).unwrap().skip_reason(),
        Some(SkipReason::MissingBase(_))
    ));
    assert_eq!(report.removed_count(), 1);
    assert!(!fs.contains(safari_base()));
}

#[test]
fn test_second_sweep_is_a_no_op() {
    let env = mac_env();
    let fs = populated_mac_fs();

    let first = sweep(&fs, &env, Platform::MacOs).run();
    assert_eq!(first.removed_count(), 4);

    fs.clear_calls();
    let second = sweep(&fs, &env, Platform::MacOs).run();

    assert_eq!(second.removed_count(), 0);
    assert_eq!(second.failures().count(), 0);
    assert!(fs.calls().iter().all(|call| !call.is_mutation()));
    assert!(matches!(
        second.browser(Browser::Safari).unwrap().skip_reason(),
        Some(SkipReason::MissingBase(_))
    ));
}

#[test]
fn test_other_platform_skips_everything_without_access() {
    let env = mac_env();
    let fs = populated_mac_fs();

    let report = sweep(&fs, &env, Platform::Other).run();

    assert_eq!(report.browsers().len(), 3);
    assert_eq!(report.skipped().count(), 3);
    assert!(fs.calls().is_empty());
}

#[test]
fn test_windows_sweep_uses_environment_roots() {
    let env = MapEnvironment::new()
        .home("C:/Users/tester")
        .var("LOCALAPPDATA", "/win/Local")
        .var("APPDATA", "/win/Roaming");
    let fs = MemoryFilesystem::new();
    fs.add_file("/win/Local/Google/Chrome/User Data/Default/Favicons")
        .add_file("/win/Roaming/Mozilla/Firefox/Profiles/p.default/favicons.sqlite-wal");

    let report = sweep(&fs, &env, Platform::Windows).run();

    assert_eq!(report.removed_count(), 2);
    assert_eq!(
        report.browser(Browser::Safari).unwrap().skip_reason(),
        Some(&SkipReason::UnsupportedPlatform(Platform::Windows))
    );
}
