//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Common CI environment variables
const CI_VARS: [&str; 11] = [
    "CI",
    "CONTINUOUS_INTEGRATION",
    "JENKINS_URL",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "TRAVIS",
    "CIRCLECI",
    "BUILDKITE",
    "DRONE",
    "TEAMCITY_VERSION",
    "TF_BUILD", // Azure DevOps
];

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY that nobody reads
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Check if the terminal supports ANSI escape codes for colors and cursor movement
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    term_supports_ansi(&env::var("TERM").unwrap_or_default())
}

/// Decide from `TERM` alone
fn term_supports_ansi(term: &str) -> bool {
    // Windows consoles leave TERM unset but handle ANSI since Windows 10
    #[cfg(windows)]
    {
        term != "dumb"
    }

    #[cfg(not(windows))]
    {
        !(term == "dumb" || term.is_empty())
    }
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    ci_marker_present(|var| env::var(var).is_ok())
}

fn ci_marker_present(is_set: impl Fn(&str) -> bool) -> bool {
    CI_VARS.iter().any(|var| is_set(var))
}

/// Determine if the progress bar can be drawn on stdout
///
/// Drawing needs an interactive stdout that understands cursor movement and
/// answers cursor position queries.
pub fn should_draw_progress() -> bool {
    is_interactive() && supports_ansi()
}
