//! Glob-style selection of hosts and projects.
//!
//! A selection is a comma-separated list of glob patterns, with `all` as a
//! shorthand for `*`. Every partial pattern must match at least one item;
//! the expansion is returned sorted and deduplicated.

use std::collections::BTreeSet;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid {kind} list '{pattern}'")]
    NoMatch { kind: String, pattern: String },
}

/// Expand a comma-separated glob pattern over `source`.
///
/// `kind` names what is being selected ("host", "project") and only feeds
/// error messages.
pub fn expand<'a, I>(pattern: &str, source: I, kind: &str) -> Result<Vec<String>, PatternError>
where
    I: IntoIterator<Item = &'a str>,
{
    let items: Vec<&str> = source.into_iter().collect();
    let pattern = if pattern == "all" { "*" } else { pattern };

    // This works correctly for single items as well as explicit lists, glob
    // patterns and any combination of the above.
    let mut matches = BTreeSet::new();
    for partial in pattern.split(',') {
        let re = glob_to_regex(partial);

        let partial_matches: Vec<&str> = items
            .iter()
            .copied()
            .filter(|item| re.is_match(item))
            .collect();

        if partial_matches.is_empty() {
            return Err(PatternError::NoMatch {
                kind: kind.to_string(),
                pattern: pattern.to_string(),
            });
        }

        matches.extend(partial_matches.into_iter().map(str::to_string));
    }

    Ok(matches.into_iter().collect())
}

fn glob_to_regex(glob: &str) -> Regex {
    let mut re = String::with_capacity(glob.len() + 8);
    re.push('^');
    for ch in glob.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');

    // The pattern is fully escaped apart from the anchors and wildcards, so
    // compilation cannot fail.
    Regex::new(&re).unwrap_or_else(|_| unreachable!("escaped glob always compiles"))
}
