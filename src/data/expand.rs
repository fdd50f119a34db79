//! Textual expansion of `~` and environment variables in local paths.
//!
//! Both functions work on the string form of the path, so expansion happens
//! before any file is touched. Unknown variables and `~user` forms are left
//! as they are.

use std::env;

/// Replace a leading `~` (alone or followed by a separator) with the home directory.
pub fn expand_user(path: &str) -> String {
    expand_user_with(path, home_dir())
}

fn expand_user_with(path: &str, home: Option<String>) -> String {
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR)) {
        return path.to_string();
    }
    match home {
        Some(home) => {
            let home = home.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
            format!("{home}{rest}")
        }
        None => path.to_string(),
    }
}

fn home_dir() -> Option<String> {
    dirs::home_dir().map(|p| p.to_string_lossy().into_owned())
}

/// Substitute `$NAME` and `${NAME}` with the environment's values.
pub fn expand_vars(path: &str) -> String {
    expand_vars_with(path, |name| env::var(name).ok())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn expand_vars_with<F>(path: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
            (&after[..end], end)
        };

        let token = &rest[pos..pos + 1 + consumed];
        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(token),
        }
        rest = &rest[pos + 1 + consumed..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "DATA" => Some("/srv/data".to_string()),
            "V" => Some("v1".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_user_home_prefix() {
        let home = Some("/home/me".to_string());
        assert_eq!(expand_user_with("~/bench/wut", home.clone()), "/home/me/bench/wut");
        assert_eq!(expand_user_with("~", home.clone()), "/home/me");
        assert_eq!(expand_user_with("./~/x", home.clone()), "./~/x");
        assert_eq!(expand_user_with("~other/x", home), "~other/x");
    }

    #[test]
    fn test_expand_user_without_home() {
        assert_eq!(expand_user_with("~/x", None), "~/x");
    }

    #[test]
    fn test_expand_vars_plain_and_braced() {
        assert_eq!(expand_vars_with("$DATA/wut", lookup), "/srv/data/wut");
        assert_eq!(expand_vars_with("${DATA}/clustering-${V}", lookup), "/srv/data/clustering-v1");
    }

    #[test]
    fn test_expand_vars_unknown_left_alone() {
        assert_eq!(expand_vars_with("$NOPE/x", lookup), "$NOPE/x");
        assert_eq!(expand_vars_with("${NOPE}/x", lookup), "${NOPE}/x");
        assert_eq!(expand_vars_with("a$", lookup), "a$");
        assert_eq!(expand_vars_with("${DATA", lookup), "${DATA");
        assert_eq!(expand_vars_with("cost$-1", lookup), "cost$-1");
    }
}
