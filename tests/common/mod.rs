use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::TempDir;
use favicon_sweep::paths::MapEnvironment;

/// A throwaway directory standing in for a user's home and app-data roots.
///
/// Nothing outside the sandbox is touched: the in-process environment is a
/// [`MapEnvironment`] and spawned binaries get their home variables
/// redirected.
pub struct Sandbox {
    root: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create sandbox directory");
        let sandbox = Self { root };
        fs::create_dir_all(sandbox.home()).expect("failed to create sandbox home");
        fs::create_dir_all(sandbox.local_app_data()).expect("failed to create LOCALAPPDATA");
        fs::create_dir_all(sandbox.app_data()).expect("failed to create APPDATA");
        sandbox
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn local_app_data(&self) -> PathBuf {
        self.root.path().join("AppData/Local")
    }

    pub fn app_data(&self) -> PathBuf {
        self.root.path().join("AppData/Roaming")
    }

    /// Environment for running a sweep in-process against the sandbox.
    pub fn environment(&self) -> MapEnvironment {
        MapEnvironment::new()
            .home(self.home())
            .var("HOME", self.home())
            .var("LOCALAPPDATA", self.local_app_data())
            .var("APPDATA", self.app_data())
    }

    /// Create a file, and any missing parents, with some content.
    pub fn touch(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        fs::write(path, b"favicon data").expect("failed to write fixture file");
        path.to_path_buf()
    }

    /// Build a command running the compiled binary against the sandbox.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("favicon-sweep").expect("failed to locate binary");
        cmd.env("HOME", self.home())
            .env("USERPROFILE", self.home())
            .env("LOCALAPPDATA", self.local_app_data())
            .env("APPDATA", self.app_data())
            .env_remove("FAVICON_SWEEP_VERBOSE")
            .env_remove("FAVICON_SWEEP_QUIET")
            .env_remove("FAVICON_SWEEP_PAUSE");
        cmd
    }
}
