use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Where this build sits relative to the last release tag, as exported by
/// `build.rs`. Empty values count as unknown.
fn describe_version(release: Option<&str>, latest: &str, ahead: &str) -> String {
    match (release.filter(|tag| !tag.is_empty()), latest, ahead) {
        (Some(tag), _, _) => format!("release {tag}"),
        (None, "", _) => format!("development {}", env!("CARGO_PKG_VERSION")),
        (None, latest, "") => format!("development branch ahead of {latest}"),
        (None, latest, ahead) => format!("development branch {ahead} commits ahead of {latest}"),
    }
}

/// Name, version, commit and build profile, one item per line.
pub fn get_system_info() -> String {
    let version = describe_version(
        option_env!("RELEASE_VERSION"),
        option_env!("LATEST_TAG").unwrap_or_default(),
        option_env!("COMMITS_AHEAD").unwrap_or_default(),
    );
    let profile = if cfg!(debug_assertions) { "Dev" } else { "Release" };

    format!(
        "{name} - {version}\nCommit: {COMMIT}\n{profile} build",
        name = env!("CARGO_PKG_NAME"),
    )
}
