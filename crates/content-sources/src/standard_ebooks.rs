//! Standard Ebooks: direct book-page references

use crate::{SourceError, SourceMetadata, SourceResult};
use bookfetch_core::{last_segment, safe_filename, DocumentFormat, FetchedArtifact};
use bookfetch_network::SharedTransport;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const DOWNLOAD_CLASS: &str = "ebook-download";

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("anchor pattern is valid")
});
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| attr_re("href"));
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| attr_re("class"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

fn attr_re(name: &str) -> Regex {
    let pattern = format!(
        r#"(?is)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
        name
    );
    Regex::new(&pattern).expect("attribute pattern is valid")
}

/// One `<a>` element as seen by the link scan
#[derive(Debug, Clone, PartialEq, Eq)]
struct Anchor {
    href: Option<String>,
    classes: Vec<String>,
    text: String,
}

fn attribute(re: &Regex, attrs: &str) -> Option<String> {
    re.captures(attrs).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .or_else(|| c.get(3))
            .map(|m| m.as_str().replace("&amp;", "&"))
    })
}

fn anchors(html: &str) -> Vec<Anchor> {
    ANCHOR_RE
        .captures_iter(html)
        .map(|c| {
            let attrs = c.get(1).map_or("", |m| m.as_str());
            let inner = c.get(2).map_or("", |m| m.as_str());
            Anchor {
                href: attribute(&HREF_RE, attrs).filter(|h| !h.is_empty()),
                classes: attribute(&CLASS_RE, attrs)
                    .map(|c| c.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
                text: TAG_RE.replace_all(inner, "").into_owned(),
            }
        })
        .collect()
}

/// Picks the download href from a book page
///
/// Precedence: per anchor in document order, an href ending in `.epub` or
/// link text mentioning "epub"; then the first `ebook-download` anchor.
fn find_candidate(html: &str) -> Option<String> {
    let anchors = anchors(html);

    let plain = anchors.iter().find_map(|a| {
        let href = a.href.as_deref()?;
        let by_suffix = href.to_lowercase().ends_with(".epub");
        let by_text = a.text.to_lowercase().contains("epub");
        (by_suffix || by_text).then(|| href.to_string())
    });

    plain.or_else(|| {
        anchors
            .iter()
            .filter(|a| a.classes.iter().any(|c| c == DOWNLOAD_CLASS))
            .find_map(|a| a.href.clone())
    })
}

/// A download link resolved from a book page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
    pub file_name: String,
    pub format: DocumentFormat,
}

/// Direct-reference source: scrapes one book page for its download link
pub struct StandardEbooksSource {
    transport: SharedTransport,
}

impl StandardEbooksSource {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    pub fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Standard Ebooks".to_string(),
            description: "Typeset public domain ebooks, by book page URL".to_string(),
            base_url: "https://standardebooks.org".to_string(),
        }
    }

    /// Retrieves `page_url` and resolves its download link
    pub fn resolve_link(&self, page_url: &str) -> SourceResult<ResolvedLink> {
        let base = url::Url::parse(page_url)
            .map_err(|e| SourceError::InvalidQuery(format!("{}: {}", page_url, e)))?;
        let html = self.transport.get_text(page_url)?;

        let candidate =
            find_candidate(&html).ok_or_else(|| SourceError::LinkNotFound(page_url.to_string()))?;
        let resolved = base
            .join(&candidate)
            .map_err(|e| SourceError::ParseError(format!("bad link {}: {}", candidate, e)))?;

        let url = String::from(resolved);
        let file_name = safe_filename(last_segment(&url));
        let format = DocumentFormat::from_path(Path::new(&file_name)).unwrap_or(DocumentFormat::Epub);

        log::debug!("Resolved {} to {}", page_url, url);
        Ok(ResolvedLink {
            url,
            file_name,
            format,
        })
    }

    /// Resolves the page link and downloads it into `out_dir`
    pub fn fetch(&self, page_url: &str, out_dir: &Path) -> SourceResult<FetchedArtifact> {
        let link = self.resolve_link(page_url)?;
        if link.file_name.is_empty() {
            return Err(SourceError::LinkNotFound(page_url.to_string()));
        }

        let destination = out_dir.join(&link.file_name);
        self.transport.download_to(&link.url, &destination)?;
        Ok(FetchedArtifact::new(destination, link.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfetch_network::StubTransport;
    use std::sync::Arc;

    const PAGE_URL: &str = "https://standardebooks.org/ebooks/jane-austen/emma";

    fn source(stub: StubTransport) -> StandardEbooksSource {
        StandardEbooksSource::new(Arc::new(stub))
    }

    #[test]
    fn test_suffix_match() {
        let html = r#"<p><a href="/about">About</a>
            <a href="/ebooks/jane-austen/emma/downloads/jane-austen_emma.epub">Compatible</a></p>"#;
        assert_eq!(
            find_candidate(html).as_deref(),
            Some("/ebooks/jane-austen/emma/downloads/jane-austen_emma.epub")
        );
    }

    #[test]
    fn test_href_entities_decoded() {
        let html = r#"<a href="/x.epub?a=1&amp;b=2">get</a>"#;
        assert_eq!(find_candidate(html).as_deref(), Some("/x.epub?a=1&b=2"));
    }

    #[test]
    fn test_text_match_in_document_order() {
        let html = r#"<a href="/promo.png"><img alt=""> Get the <b>EPUB</b> edition</a>
            <a href="/real/book.epub">Download</a>"#;
        assert_eq!(find_candidate(html).as_deref(), Some("/promo.png"));
    }

    #[test]
    fn test_class_fallback() {
        let html = r#"<a href="/">Home</a>
            <a class="button ebook-download" href='/ebooks/x/downloads/x.azw3'>Kindle</a>"#;
        assert_eq!(
            find_candidate(html).as_deref(),
            Some("/ebooks/x/downloads/x.azw3")
        );
    }

    #[test]
    fn test_no_link() {
        assert_eq!(find_candidate(r#"<a href="/">Home</a><a>epub</a>"#), None);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/ebooks/jane-austen/emma/downloads/jane-austen_emma.epub?source=download">EPUB</a>"#;
        let source = source(StubTransport::new().with_text(PAGE_URL, html));

        let link = source.resolve_link(PAGE_URL).unwrap();
        assert_eq!(
            link.url,
            "https://standardebooks.org/ebooks/jane-austen/emma/downloads/jane-austen_emma.epub?source=download"
        );
        assert_eq!(link.file_name, "jane-austen_emma.epub");
        assert_eq!(link.format, DocumentFormat::Epub);
    }

    #[test]
    fn test_link_not_found() {
        let source = source(StubTransport::new().with_text(PAGE_URL, "<html></html>"));
        assert_eq!(
            source.resolve_link(PAGE_URL),
            Err(SourceError::LinkNotFound(PAGE_URL.to_string()))
        );
    }

    #[test]
    fn test_page_fetch_failure() {
        let source = source(StubTransport::new());
        assert!(matches!(
            source.resolve_link(PAGE_URL),
            Err(SourceError::NetworkError(_))
        ));
    }

    #[test]
    fn test_fetch_writes_epub() {
        let dir = tempfile::TempDir::new().unwrap();
        let download = "https://standardebooks.org/ebooks/jane-austen/emma/downloads/jane-austen_emma.epub";
        let source = source(
            StubTransport::new()
                .with_text(PAGE_URL, format!(r#"<a href="{}">Download</a>"#, download))
                .with_bytes(download, b"PK\x03\x04".to_vec()),
        );

        let artifact = source.fetch(PAGE_URL, dir.path()).unwrap();
        assert!(artifact.path.to_string_lossy().ends_with(".epub"));
        assert_eq!(artifact.format, DocumentFormat::Epub);
        assert!(artifact.path.exists());
    }
}
