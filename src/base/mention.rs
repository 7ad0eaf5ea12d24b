//! Resolve assignees into Feishu `<at>` mention tokens.
//!
//! Mention data is best-effort: malformed user maps or assignee JSON never fail
//! the notification, they just produce fewer (or no) mentions.

use std::{collections::HashSet, fmt::Write};

use serde::Deserialize;

/// A single `username:external_id` pair from the user map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMapEntry<'a> {
    /// Login of the user on the code host.
    pub username: &'a str,
    /// Feishu user ID the login maps to.
    pub external_id: &'a str,
}

/// An assignee record; any fields besides `login` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Assignee {
    /// Login of the assigned user.
    #[serde(default)]
    pub login: Option<String>,
}

/// Assignees arrive either as a list or as one bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Assignees {
    Many(Vec<Assignee>),
    One(Assignee),
}

/// Build the mention prefix for every mapped user that is also assigned.
///
/// Tokens come out in user map order, each followed by one space. Returns an
/// empty string when either input is empty or nothing matches.
pub fn resolve_mentions(user_maps: &str, assignees: &str) -> String {
    if user_maps.is_empty() || assignees.is_empty() {
        return String::new();
    }

    let Some(assignees) = parse_assignees(assignees) else {
        return String::new();
    };

    let logins = login_set(&assignees);

    // Duplicate usernames in the map each produce their own token.
    let mut result = String::new();
    for entry in parse_user_maps(user_maps) {
        if logins.contains(entry.username) {
            let _ = write!(result, r#"<at user_id="{}">{}</at> "#, entry.external_id, entry.username);
        }
    }

    result
}

/// Parse assignee JSON as a list, falling back to a single object.
pub fn parse_assignees(raw: &str) -> Option<Vec<Assignee>> {
    match serde_json::from_str::<Assignees>(raw).ok()? {
        Assignees::Many(assignees) => Some(assignees),
        Assignees::One(assignee) => Some(vec![assignee]),
    }
}

/// Split a `user:id,user:id` map into trimmed pairs, skipping blank and colon-less pieces.
///
/// Only the first colon separates, so the ID keeps any further colons.
pub fn parse_user_maps(raw: &str) -> impl Iterator<Item = UserMapEntry<'_>> {
    raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()).filter_map(|pair| {
        let (username, external_id) = pair.split_once(':')?;

        Some(UserMapEntry {
            username: username.trim(),
            external_id: external_id.trim(),
        })
    })
}

fn login_set(assignees: &[Assignee]) -> HashSet<&str> {
    assignees.iter().filter_map(|a| a.login.as_deref()).filter(|login| !login.is_empty()).collect()
}

// Tests.
