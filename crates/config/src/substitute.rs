// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `${VAR}` / `${VAR:default}` substitution over raw config text.

use crate::error::ConfigError;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // constant regex pattern is valid
static REFERENCE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:([^}]*))?\}").expect("constant regex pattern is valid")
});

/// Replace every `${VAR}` or `${VAR:default}` reference in `input` with
/// the value of the named environment variable, falling back to
/// `default` when given. A reference with no default whose variable is
/// unset is a fail-fast [`ConfigError::MissingEnvVar`] — configs are
/// never silently loaded with a blank credential.
pub fn substitute_env_vars(input: &str) -> Result<String, ConfigError> {
    substitute_with(input, |name| std::env::var(name).ok())
}

/// Same as [`substitute_env_vars`] but sourcing values from a caller-
/// supplied lookup rather than the real environment, for deterministic
/// tests.
pub fn substitute_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut last_end = 0;
    let mut first_error: Option<ConfigError> = None;

    for caps in REFERENCE.captures_iter(input) {
        #[allow(clippy::expect_used)] // group 0 of a match always captures
        let whole = caps.get(0).expect("group 0 always matches");
        out.push_str(&input[last_end..whole.start()]);
        last_end = whole.end();

        let name = &caps[1];
        let default = caps.get(3).map(|m| m.as_str());

        match lookup(name).or_else(|| default.map(str::to_string)) {
            Some(value) => out.push_str(&value),
            None => {
                if first_error.is_none() {
                    first_error = Some(ConfigError::MissingEnvVar(name.to_string()));
                }
            }
        }
    }
    out.push_str(&input[last_end..]);

    if let Some(err) = first_error {
        return Err(err);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
