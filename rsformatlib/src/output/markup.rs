//! Minimal table markup writer shared by the table renderers.
//!
//! Content passed in is expected to be escaped already.

pub(crate) const TABLE_CLASS: &str = "rsformat-table";

pub(crate) struct HtmlWriter {
    buf: String,
}

impl HtmlWriter {
    /// Start a `<table>` element.
    pub(crate) fn table() -> Self {
        let mut buf = String::from("<table class=\"");
        buf.push_str(TABLE_CLASS);
        buf.push_str("\">");
        Self { buf }
    }

    pub(crate) fn open_head(&mut self) {
        self.buf.push_str("<thead><tr>");
    }

    pub(crate) fn close_head(&mut self) {
        self.buf.push_str("</tr></thead><tbody>");
    }

    pub(crate) fn open_row(&mut self) {
        self.buf.push_str("<tr>");
    }

    pub(crate) fn close_row(&mut self) {
        self.buf.push_str("</tr>");
    }

    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push_str("</tbody></table>");
        self.buf
    }
}

/// Write `<tag attr="v">content</tag>`.
pub(crate) fn push_cell(html: &mut HtmlWriter, tag: &str, content: &str, attrs: &[(&str, String)]) {
    html.push("<");
    html.push(tag);
    for (name, value) in attrs {
        html.push(" ");
        html.push(name);
        html.push("=\"");
        html.push(value);
        html.push("\"");
    }
    html.push(">");
    html.push(content);
    html.push("</");
    html.push(tag);
    html.push(">");
}
