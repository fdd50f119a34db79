//! Home-directory expansion against the real environment.
//!
//! Kept in its own test binary, as a single test, because it edits `HOME`.

use clustbench::data::expand::expand_user;

#[test]
fn test_tilde_expands_without_home_variable() {
    let saved = std::env::var_os("HOME");
    std::env::remove_var("HOME");

    let expanded = expand_user("~/bench/wut/x2");
    let home = dirs::home_dir();

    if let Some(h) = saved {
        std::env::set_var("HOME", h);
    }

    let Some(home) = home else {
        // No account database entry either; nothing to expand to.
        assert_eq!(expanded, "~/bench/wut/x2");
        return;
    };
    assert!(!expanded.starts_with('~'), "tilde left literal: {expanded}");
    assert!(expanded.starts_with(home.to_string_lossy().trim_end_matches('/')));
    assert!(expanded.ends_with("/bench/wut/x2"));

    // With HOME restored, `~` resolves to the same directory the platform reports.
    if let Some(home) = dirs::home_dir() {
        let home = home.to_string_lossy().trim_end_matches('/').to_string();
        assert_eq!(expand_user("~/x"), format!("{home}/x"));
    }
    assert_eq!(expand_user("/abs/~/x"), "/abs/~/x");
}
