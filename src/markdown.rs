use pulldown_cmark::{html, Parser};

/// Render Markdown source to an HTML fragment safe to embed in a page.
///
/// The fragment is sanitized after rendering, so raw HTML in the source
/// does not survive into the output.
pub fn render(source: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(source));
    ammonia::clean(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_renders_to_strong() {
        let html = render("**bold**");
        assert!(html.contains("<strong>bold</strong>"), "got: {html}");
    }

    #[test]
    fn inline_html_is_sanitized() {
        let html = render("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"), "got: {html}");
        assert!(html.contains("hello"));
    }

    #[test]
    fn empty_source_renders_to_nothing() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn paragraphs_and_lists_survive() {
        let html = render("first\n\n- one\n- two");
        assert!(html.contains("<p>first</p>"), "got: {html}");
        assert!(html.contains("<li>one</li>"), "got: {html}");
    }
}
