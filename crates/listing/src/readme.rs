use comrak::{Options, markdown_to_html};

/// README variants recognised in a listing, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadmeKind {
    /// `readme.txt`: escaped and shown preformatted.
    Text,
    /// `readme.html`: trusted and shown verbatim.
    Html,
    /// `readme.md`: rendered as GitHub-flavoured markdown.
    Markdown,
}

impl ReadmeKind {
    /// Every variant in priority order.
    pub const ALL: [Self; 3] = [Self::Text, Self::Html, Self::Markdown];

    /// Classifies a file name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.eq_ignore_ascii_case(kind.file_name()))
    }

    /// Canonical lower-case file name of the variant.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Text => "readme.txt",
            Self::Html => "readme.html",
            Self::Markdown => "readme.md",
        }
    }

    /// Converts raw file contents into an HTML fragment.
    #[must_use]
    pub fn render(self, contents: &str) -> String {
        match self {
            Self::Text => {
                let mut html = String::with_capacity(contents.len() + 11);
                html.push_str("<pre>");
                push_escaped(&mut html, contents);
                html.push_str("</pre>");
                html
            }
            Self::Html => contents.to_owned(),
            Self::Markdown => markdown_to_html(contents, &markdown_options()),
        }
    }
}

/// A README selected for display beneath a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readme {
    kind: ReadmeKind,
    name: String,
    html: String,
}

impl Readme {
    /// Renders `contents` of the file called `name`.
    #[must_use]
    pub fn new(kind: ReadmeKind, name: impl Into<String>, contents: &str) -> Self {
        Self {
            kind,
            name: name.into(),
            html: kind.render(contents),
        }
    }

    /// Variant that decided the rendering.
    #[must_use]
    pub const fn kind(&self) -> ReadmeKind {
        self.kind
    }

    /// File name as found on disk.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendered HTML fragment, safe to embed without further escaping.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}

fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.unsafe_ = true;
    options
}

/// Escapes text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_matched_case_insensitively() {
        assert_eq!(ReadmeKind::from_name("README.TXT"), Some(ReadmeKind::Text));
        assert_eq!(ReadmeKind::from_name("ReadMe.Html"), Some(ReadmeKind::Html));
        assert_eq!(ReadmeKind::from_name("readme.md"), Some(ReadmeKind::Markdown));
        assert_eq!(ReadmeKind::from_name("readme.markdown"), None);
        assert_eq!(ReadmeKind::from_name("readme"), None);
    }

    #[test]
    fn text_is_escaped_and_preformatted() {
        let html = ReadmeKind::Text.render("a < b && \"c\" > 'd'\n");
        assert_eq!(
            html,
            "<pre>a &lt; b &amp;&amp; &#34;c&#34; &gt; &#39;d&#39;\n</pre>"
        );
    }

    #[test]
    fn html_passes_through_unchanged() {
        let source = "<h1>Hi</h1><script>x()</script>";
        assert_eq!(ReadmeKind::Html.render(source), source);
    }

    #[test]
    fn markdown_enables_extensions_and_raw_html() {
        let source = "\
# Title

| a | b |
|---|---|
| 1 | 2 |

~~gone~~ https://example.com

- [x] done

<div class=\"raw\">kept</div>
";
        let html = ReadmeKind::Markdown.render(source);
        assert!(html.contains("<h1>Title</h1>"), "{html}");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<del>gone</del>"), "{html}");
        assert!(
            html.contains("<a href=\"https://example.com\">https://example.com</a>"),
            "{html}"
        );
        assert!(html.contains("type=\"checkbox\""), "{html}");
        assert!(html.contains("<div class=\"raw\">kept</div>"), "{html}");
    }

    #[test]
    fn readme_records_source_name() {
        let readme = Readme::new(ReadmeKind::Text, "README.TXT", "x");
        assert_eq!(readme.name(), "README.TXT");
        assert_eq!(readme.kind(), ReadmeKind::Text);
        assert_eq!(readme.html(), "<pre>x</pre>");
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }
}
