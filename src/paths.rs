//! Expansion of symbolic path templates into concrete paths.
//!
//! Browser base directories are written as templates such as
//! `~/Library/Safari/Favicon Cache` or `%APPDATA%\Mozilla\Firefox\Profiles`.
//! [`PathResolver`] expands the home marker and environment variable
//! references against an [`Environment`], which is passed in explicitly so the
//! same table can be resolved for a simulated platform in tests.
//!
//! Resolution never fails. A variable that is not set stays in the path
//! literally, which yields a path that does not exist and is reported
//! downstream as a missing base directory.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use favicon_sweep::paths::{MapEnvironment, PathResolver, PathTemplate};
//! use favicon_sweep::platform::Platform;
//!
//! let env = MapEnvironment::new().var("APPDATA", "/sandbox/roaming");
//! let resolver = PathResolver::new(&env);
//! let template = PathTemplate::new(Platform::Windows, r"%APPDATA%\Mozilla\Firefox\Profiles");
//!
//! assert_eq!(
//!     resolver.resolve(&template),
//!     PathBuf::from("/sandbox/roaming/Mozilla/Firefox/Profiles")
//! );
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::platform::Platform;

/// A platform-tagged path pattern with home and environment placeholders.
///
/// The platform tag selects the variable syntax: `$NAME` and `${NAME}` are
/// expanded everywhere, `%NAME%` only for Windows templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    platform: Platform,
    pattern: &'static str,
}

impl PathTemplate {
    pub const fn new(platform: Platform, pattern: &'static str) -> Self {
        Self { platform, pattern }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }
}

/// Source of environment variables and the user's home directory.
pub trait Environment {
    /// Look up an environment variable.
    fn var(&self, key: &str) -> Option<OsString>;

    /// The current user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The environment of the running process.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }
}

/// An environment with explicitly provided values.
///
/// Used to resolve templates for a simulated user or platform without
/// touching the process environment.
#[derive(Clone, Debug, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, OsString>,
    home: Option<PathBuf>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the home directory.
    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Set an environment variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

/// Expands [`PathTemplate`]s against an [`Environment`].
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    env: &'a dyn Environment,
}

impl<'a> PathResolver<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    /// Resolve a template into a concrete path.
    ///
    /// Segments are split on both `/` and `\` and joined with the host
    /// separator. Existence is not checked.
    pub fn resolve(&self, template: &PathTemplate) -> PathBuf {
        let pattern = template.pattern();
        let mut path = PathBuf::new();

        if pattern.starts_with(['/', '\\']) {
            path.push(MAIN_SEPARATOR_STR);
        }

        for (index, segment) in pattern.split(['/', '\\']).enumerate() {
            if segment.is_empty() {
                continue;
            }

            if index == 0
                && segment == "~"
                && let Some(home) = self.env.home_dir()
            {
                path.push(home);
                continue;
            }

            let expanded = self.expand_segment(segment, template.platform());
            if path.as_os_str().is_empty() {
                path.push(expanded);
            } else {
                // An absolute value inside the path extends it, never replaces it
                path.extend(
                    Path::new(&expanded)
                        .components()
                        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir)),
                );
            }
        }

        path
    }

    fn expand_segment(&self, segment: &str, platform: Platform) -> OsString {
        let mut expanded = OsString::new();
        let mut rest = segment;

        while let Some(start) =
            rest.find(|c: char| c == '$' || (c == '%' && platform == Platform::Windows))
        {
            expanded.push(&rest[..start]);
            let tail = &rest[start..];

            match parse_reference(tail, platform) {
                Some((name, len)) => {
                    match self.env.var(name) {
                        Some(value) => expanded.push(value),
                        // Unset variables are kept as written
                        None => expanded.push(&tail[..len]),
                    }
                    rest = &tail[len..];
                }
                None => {
                    // `$` and `%` are single byte
                    expanded.push(&tail[..1]);
                    rest = &tail[1..];
                }
            }
        }

        expanded.push(rest);
        expanded
    }
}

/// Parse a variable reference at the start of `text`.
///
/// Returns the variable name and the length of the whole reference.
fn parse_reference(text: &str, platform: Platform) -> Option<(&str, usize)> {
    if let Some(body) = text.strip_prefix("${") {
        let end = body.find('}')?;
        let name = &body[..end];
        return (!name.is_empty()).then_some((name, end + 3));
    }

    if let Some(body) = text.strip_prefix('$') {
        let len = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(body.len());
        return (len > 0).then(|| (&body[..len], len + 1));
    }

    if platform == Platform::Windows
        && let Some(body) = text.strip_prefix('%')
    {
        let end = body.find('%')?;
        let name = &body[..end];
        return (!name.is_empty()).then_some((name, end + 2));
    }

    None
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use proptest::prelude::*;

    use super::*;

    fn sandbox_env() -> MapEnvironment {
        MapEnvironment::new()
            .home("/home/tester")
            .var("LOCALAPPDATA", "/sandbox/local")
            .var("APPDATA", "/sandbox/roaming")
    }

    #[test]
    fn test_resolve_home_marker() {
        let env = sandbox_env();
        let template = PathTemplate::new(Platform::MacOs, "~/Library/Safari/Favicon Cache");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/home/tester/Library/Safari/Favicon Cache")
        );
    }

    #[test]
    fn test_resolve_windows_percent_variable() {
        let env = sandbox_env();
        let template =
            PathTemplate::new(Platform::Windows, r"%LOCALAPPDATA%\Google\Chrome\User Data");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/sandbox/local/Google/Chrome/User Data")
        );
    }

    #[test]
    fn test_percent_is_literal_outside_windows() {
        let env = sandbox_env();
        let template = PathTemplate::new(Platform::MacOs, "~/%APPDATA%");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/home/tester/%APPDATA%")
        );
    }

    #[test]
    fn test_resolve_dollar_variables() {
        let env = sandbox_env();
        let template = PathTemplate::new(Platform::MacOs, "$APPDATA/Firefox");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/sandbox/roaming/Firefox")
        );

        let template = PathTemplate::new(Platform::MacOs, "/base/${APPDATA}x");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/base/sandbox/roamingx")
        );
    }

    #[test]
    fn test_embedded_absolute_variable_keeps_leading_segments() {
        let env = MapEnvironment::new().var("PROFILE", "/data/me");
        let template = PathTemplate::new(Platform::Windows, r"C:\Users\%PROFILE%\cache");
        let resolved = PathResolver::new(&env).resolve(&template);
        let segments: Vec<_> = resolved
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        assert_eq!(segments, ["C:", "Users", "data", "me", "cache"]);

        let template = PathTemplate::new(Platform::MacOs, "/base/$PROFILE/cache");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/base/data/me/cache")
        );
    }

    #[test]
    fn test_unset_variable_stays_literal() {
        let env = MapEnvironment::new();
        let template =
            PathTemplate::new(Platform::Windows, r"%LOCALAPPDATA%\Google\Chrome\User Data");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("%LOCALAPPDATA%/Google/Chrome/User Data")
        );

        let template = PathTemplate::new(Platform::MacOs, "/x/$MISSING/${ALSO_MISSING}");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/x/$MISSING/${ALSO_MISSING}")
        );
    }

    #[test]
    fn test_missing_home_keeps_marker() {
        let env = MapEnvironment::new();
        let template = PathTemplate::new(Platform::MacOs, "~/Library/Safari/Favicon Cache");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("~/Library/Safari/Favicon Cache")
        );
    }

    #[test]
    fn test_malformed_references_are_literal() {
        let env = sandbox_env();
        let template = PathTemplate::new(Platform::Windows, r"C:\100%\$\${}\%%\${APPDATA");
        let resolved = PathResolver::new(&env).resolve(&template);
        let segments: Vec<_> = resolved
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        assert_eq!(segments, ["C:", "100%", "$", "${}", "%%", "${APPDATA"]);
    }

    #[test]
    fn test_tilde_only_expands_leading_segment() {
        let env = sandbox_env();
        let template = PathTemplate::new(Platform::MacOs, "/srv/~/cache");
        assert_eq!(
            PathResolver::new(&env).resolve(&template),
            Path::new("/srv/~/cache")
        );
    }

    proptest! {
        #[test]
        fn test_literal_segments_survive_resolution(
            segments in prop::collection::vec("[A-Za-z0-9 ._-]{1,12}", 1..6),
            windows in any::<bool>(),
        ) {
            prop_assume!(segments.iter().all(|s| s != "." && s != ".." && s != "~"));
            let separator = if windows { "\\" } else { "/" };
            let pattern: &'static str = Box::leak(segments.join(separator).into_boxed_str());
            let platform = if windows { Platform::Windows } else { Platform::MacOs };

            let env = sandbox_env();
            let resolved = PathResolver::new(&env).resolve(&PathTemplate::new(platform, pattern));
            let expected: PathBuf = segments.iter().collect();
            prop_assert_eq!(resolved, expected);
        }

        #[test]
        fn test_set_variable_is_substituted(value in "[a-z]{1,16}") {
            let env = MapEnvironment::new().var("PROFILE_ROOT", value.clone());
            let template = PathTemplate::new(Platform::Windows, r"%PROFILE_ROOT%\Profiles");
            let resolved = PathResolver::new(&env).resolve(&template);
            prop_assert_eq!(resolved, Path::new(&value).join("Profiles"));
        }
    }
}
