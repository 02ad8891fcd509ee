use scraper::{ElementRef, Html};

const BLOCK: &[&str] = &[
    "p", "div", "li", "ul", "ol", "tr", "table", "blockquote", "pre",
    "h1", "h2", "h3", "h4", "h5", "h6",
];
const SKIP: &[&str] = &["script", "style", "head"];

/// Render a comment body (HTML markup) as plain text: one line per block,
/// `<br>` as a line break, whitespace collapsed, blank lines dropped.
pub fn markup_to_text(html: &str) -> String {
    let doc = Html::parse_fragment(html);
    let mut raw = String::new();
    walk(doc.root_element(), &mut raw);
    normalize(&raw)
}

fn walk(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child_el) = ElementRef::wrap(child) else { continue };
        let name = child_el.value().name();
        if SKIP.contains(&name) { continue; }
        if name == "br" { out.push('\n'); continue; }

        let block = BLOCK.contains(&name);
        if block { out.push('\n'); }
        if name == "li" { out.push_str("* "); }
        walk(child_el, out);
        if block { out.push('\n'); }
    }
}

fn normalize(s: &str) -> String {
    // collapse whitespace and trim lines
    let mut out = String::new();
    for line in s.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() { continue; }
        if !out.is_empty() { out.push('\n'); }
        out.push_str(&collapsed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let html = "<p>Looks good,   merging.</p><p>See <a href=\"https://jira.example.com/browse/PROJ-2\">PROJ-2</a></p>";
        assert_eq!(markup_to_text(html), "Looks good, merging.\nSee PROJ-2");
    }

    #[test]
    fn breaks_lists_and_entities() {
        let html = "first<br/>second &amp; third<ul><li>one</li><li>two</li></ul>";
        assert_eq!(markup_to_text(html), "first\nsecond & third\n* one\n* two");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(markup_to_text("  just text \n"), "just text");
        assert_eq!(markup_to_text(""), "");
    }

    #[test]
    fn scripts_are_dropped() {
        assert_eq!(markup_to_text("<p>hi</p><script>alert(1)</script>"), "hi");
    }
}
