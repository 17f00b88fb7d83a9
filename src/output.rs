//! Quiet mode for human-readable output.
//!
//! Quiet suppresses headers, tree lines and summaries. Errors, warnings and
//! `--json` envelopes are always printed.

use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Turn quiet mode on from the command line. `BINDGRAPH_QUIET` still applies
/// when `quiet` is false. Has no effect once output has started.
pub fn set_quiet(quiet: bool) {
    let _ = QUIET.set(quiet || quiet_from_env());
}

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(quiet_from_env)
}

fn quiet_from_env() -> bool {
    is_truthy(std::env::var("BINDGRAPH_QUIET").ok().as_deref())
}

fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_env_values() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("TRUE")));
        assert!(is_truthy(Some(" yes ")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }
}
