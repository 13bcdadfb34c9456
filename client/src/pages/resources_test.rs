use super::*;

#[test]
fn proxy_link_targets_versioned_api() {
    assert!(PROXY_LINK.starts_with("https://"));
    assert!(PROXY_LINK.ends_with("/api/v1"));
}

#[test]
fn copied_indicator_lasts_two_seconds() {
    assert_eq!(COPIED_INDICATOR, Duration::from_secs(2));
}
