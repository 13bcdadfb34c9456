use super::*;

#[test]
fn renders_basic_emphasis() {
    assert_eq!(render_markdown_html("**cheap** translator"), "<p><strong>cheap</strong> translator</p>\n");
}

#[test]
fn strips_raw_html() {
    let out = render_markdown_html("hi <script>alert(1)</script>");
    assert!(!out.contains("<script>"));
}

#[test]
fn renders_lists() {
    let out = render_markdown_html("- Weather API\n- Translator");
    assert!(out.contains("<li>Weather API</li>"));
    assert!(out.contains("<li>Translator</li>"));
}
