use std::fmt;

use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Version details baked in at build time by `build.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: String,
    pub commit: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        let latest = option_env!("LATEST_TAG").unwrap_or("");
        let ahead = option_env!("COMMITS_AHEAD").unwrap_or("");
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: describe_version(option_env!("RELEASE_VERSION"), latest, ahead),
            commit: COMMIT,
            profile: if cfg!(debug_assertions) { "Dev" } else { "Release" },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}\nCommit: {}\n{} build",
            self.name, self.version, self.commit, self.profile
        )
    }
}

fn describe_version(release: Option<&str>, latest: &str, ahead: &str) -> String {
    match release {
        Some(tag) if !tag.is_empty() => format!("release {tag}"),
        _ if !latest.is_empty() && !ahead.is_empty() => {
            format!("development branch {ahead} commits ahead of {latest}")
        }
        _ if !latest.is_empty() => format!("development branch ahead of {latest}"),
        _ => format!("development {}", env!("CARGO_PKG_VERSION")),
    }
}

pub fn get_system_info() -> String {
    BuildInfo::current().to_string()
}
