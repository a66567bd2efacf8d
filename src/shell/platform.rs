//! Platform detection helpers.

/// Variables whose presence marks a CI runner.
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// True on a CI runner, where nobody can answer a prompt.
pub fn is_ci() -> bool {
    CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Interpreter name used when none is configured.
pub fn default_python() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_python_is_not_empty() {
        assert!(!default_python().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn default_python_is_python3_on_unix() {
        assert_eq!(default_python(), "python3");
    }
}
