//! Parse one sitemap XML document into entries or child-sitemap references.
//!
//! Classification is made from the document's root element (`<urlset>` vs
//! `<sitemapindex>`), never from the URL shape. Namespace prefixes are
//! stripped, so `<ns0:urlset>` parses the same as `<urlset>`.

use super::types::{
    parse_lastmod, ChangeFrequency, SitemapDocument, SitemapEntry, SitemapIndexRef,
};
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use url::Url;

#[derive(Clone, Copy, PartialEq)]
enum RootKind {
    UrlSet,
    Index,
}

impl RootKind {
    /// Element name wrapping one entry under this root.
    fn entry_tag(self) -> &'static str {
        match self {
            RootKind::UrlSet => "url",
            RootKind::Index => "sitemap",
        }
    }
}

/// Accumulated child text of the entry currently being read.
#[derive(Default)]
struct EntryFields {
    loc: String,
    loc_seen: u32,
    priority: Option<String>,
    changefreq: Option<String>,
    lastmod: Option<String>,
}

impl EntryFields {
    fn push_text(&mut self, tag: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        match tag {
            "loc" => self.loc.push_str(text),
            "priority" => self.priority = Some(text.to_string()),
            "changefreq" => self.changefreq = Some(text.to_string()),
            "lastmod" => self.lastmod = Some(text.to_string()),
            _ => {}
        }
    }
}

/// Parse one sitemap document.
///
/// Returns [`Error::Parse`] for malformed XML or an unrecognized root
/// element. Entries with invalid data (missing/repeated `<loc>`, relative
/// URL, non-numeric priority) are skipped with a warning; they never fail
/// the document. Unknown child elements and attributes are ignored.
pub fn parse_document(xml: &str, source: &Url) -> Result<SitemapDocument> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut root: Option<RootKind> = None;
    let mut entries: Vec<SitemapEntry> = Vec::new();
    let mut refs: Vec<SitemapIndexRef> = Vec::new();

    let mut in_entry = false;
    // Nesting depth below the entry element; only direct children (depth 1)
    // contribute text, so <image:image><image:loc> does not collide with
    // the entry's own <loc>.
    let mut child_depth = 0usize;
    let mut current_tag = String::new();
    let mut fields = EntryFields::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match root {
                    None => {
                        root = Some(match name.as_str() {
                            "urlset" => RootKind::UrlSet,
                            "sitemapindex" => RootKind::Index,
                            other => {
                                return Err(Error::parse(
                                    source.as_str(),
                                    format!("unrecognized root element <{other}>"),
                                ))
                            }
                        });
                    }
                    Some(kind) => {
                        if !in_entry {
                            if name == kind.entry_tag() {
                                in_entry = true;
                                child_depth = 0;
                                current_tag.clear();
                                fields = EntryFields::default();
                            }
                        } else {
                            child_depth += 1;
                            if child_depth == 1 {
                                if name == "loc" {
                                    fields.loc_seen += 1;
                                }
                                current_tag = name;
                            } else {
                                current_tag.clear();
                            }
                        }
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_entry && child_depth == 1 {
                    let text = e.unescape().unwrap_or_default();
                    fields.push_text(&current_tag, text.trim());
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_entry && child_depth == 1 {
                    let text = String::from_utf8_lossy(e.as_ref()).to_string();
                    fields.push_text(&current_tag, text.trim());
                }
            }
            Ok(Event::End(_)) => {
                if in_entry {
                    if child_depth > 0 {
                        child_depth -= 1;
                        current_tag.clear();
                    } else {
                        // Closing the entry element itself.
                        in_entry = false;
                        let done = std::mem::take(&mut fields);
                        match root {
                            Some(RootKind::UrlSet) => match build_entry(done) {
                                Ok(entry) => entries.push(entry),
                                Err(err) => warn!(document = %source, "skipping entry: {err}"),
                            },
                            Some(RootKind::Index) => match build_index_ref(done) {
                                Ok(r) => refs.push(r),
                                Err(err) => {
                                    warn!(document = %source, "skipping sitemap reference: {err}")
                                }
                            },
                            None => {}
                        }
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                // A self-closed root is a valid, empty document.
                if root.is_none() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    root = Some(match name.as_str() {
                        "urlset" => RootKind::UrlSet,
                        "sitemapindex" => RootKind::Index,
                        other => {
                            return Err(Error::parse(
                                source.as_str(),
                                format!("unrecognized root element <{other}>"),
                            ))
                        }
                    });
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::parse(source.as_str(), format!("malformed XML: {e}"))),
        }
        buf.clear();
    }

    match root {
        Some(RootKind::UrlSet) => Ok(SitemapDocument::UrlSet(entries)),
        Some(RootKind::Index) => Ok(SitemapDocument::Index(refs)),
        None => Err(Error::parse(source.as_str(), "no root element")),
    }
}

fn build_entry(fields: EntryFields) -> Result<SitemapEntry> {
    let url = take_loc(&fields)?;

    let priority = match fields.priority {
        None => None,
        Some(raw) => {
            let value: f64 = raw.trim().parse().map_err(|_| {
                Error::Validation(format!("non-numeric <priority> \"{raw}\""))
            })?;
            if (0.0..=1.0).contains(&value) {
                Some(value)
            } else {
                warn!(url = %url, priority = value, "out-of-range <priority>, using default");
                None
            }
        }
    };

    Ok(SitemapEntry {
        url,
        priority,
        change_frequency: fields.changefreq.as_deref().and_then(ChangeFrequency::parse),
        last_modified: fields.lastmod.as_deref().and_then(parse_lastmod),
    })
}

fn build_index_ref(fields: EntryFields) -> Result<SitemapIndexRef> {
    Ok(SitemapIndexRef {
        url: take_loc(&fields)?,
        last_modified: fields.lastmod.as_deref().and_then(parse_lastmod),
    })
}

fn take_loc(fields: &EntryFields) -> Result<Url> {
    if fields.loc_seen > 1 {
        return Err(Error::Validation("multiple <loc> elements".into()));
    }
    let loc = fields.loc.trim();
    if loc.is_empty() {
        return Err(Error::Validation("missing or empty <loc>".into()));
    }
    let url = Url::parse(loc)
        .map_err(|e| Error::Validation(format!("malformed <loc> \"{loc}\": {e}")))?;
    if !url.has_host() {
        return Err(Error::Validation(format!("<loc> \"{loc}\" has no host")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Url {
        Url::parse("https://example.com/sitemap.xml").unwrap()
    }

    #[test]
    fn parse_urlset_with_metadata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <priority>1.0</priority>
    <changefreq>daily</changefreq>
    <lastmod>2026-01-15</lastmod>
  </url>
  <url>
    <loc>https://example.com/about</loc>
  </url>
</urlset>"#;

        let doc = parse_document(xml, &source()).unwrap();
        let SitemapDocument::UrlSet(entries) = doc else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url.as_str(), "https://example.com/");
        assert_eq!(entries[0].priority, Some(1.0));
        assert_eq!(entries[0].change_frequency, Some(ChangeFrequency::Daily));
        assert!(entries[0].last_modified.is_some());
        assert_eq!(entries[1].priority, None);
        assert_eq!(entries[1].change_frequency, None);
    }

    #[test]
    fn parse_sitemapindex() {
        let xml = r#"<?xml version="1.0"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap>
    <loc>https://example.com/sitemap-pages.xml</loc>
    <lastmod>2026-01-01T00:00:00Z</lastmod>
  </sitemap>
  <sitemap>
    <loc>https://example.com/sitemap-posts.xml</loc>
  </sitemap>
</sitemapindex>"#;

        let doc = parse_document(xml, &source()).unwrap();
        let SitemapDocument::Index(refs) = doc else {
            panic!("expected index");
        };
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].url.as_str(), "https://example.com/sitemap-pages.xml");
        assert!(refs[0].last_modified.is_some());
        assert!(refs[1].last_modified.is_none());
    }

    #[test]
    fn namespace_prefix_is_ignored() {
        let xml = r#"<?xml version="1.0"?>
<ns0:urlset xmlns:ns0="http://www.sitemaps.org/schemas/sitemap/0.9">
  <ns0:url><ns0:loc>https://example.com/page</ns0:loc></ns0:url>
</ns0:urlset>"#;

        let doc = parse_document(xml, &source()).unwrap();
        let SitemapDocument::UrlSet(entries) = doc else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_str(), "https://example.com/page");
    }

    #[test]
    fn html_document_is_parse_error() {
        let xml = "<html><body><h1>404 Not Found</h1></body></html>";
        let err = parse_document(xml, &source()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn empty_input_is_parse_error() {
        let err = parse_document("", &source()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn self_closed_root_is_empty_urlset() {
        let doc = parse_document(r#"<?xml version="1.0"?><urlset/>"#, &source()).unwrap();
        let SitemapDocument::UrlSet(entries) = doc else {
            panic!("expected urlset");
        };
        assert!(entries.is_empty());
    }

    #[test]
    fn entry_without_loc_is_skipped() {
        let xml = r#"<urlset>
  <url><priority>0.9</priority></url>
  <url><loc>   </loc></url>
  <url><loc>https://example.com/kept</loc></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_str(), "https://example.com/kept");
    }

    #[test]
    fn relative_loc_is_skipped() {
        let xml = r#"<urlset>
  <url><loc>/relative/path</loc></url>
  <url><loc>https://example.com/absolute</loc></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn multiple_loc_elements_skip_entry() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/a</loc><loc>https://example.com/b</loc></url>
  <url><loc>https://example.com/c</loc></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_str(), "https://example.com/c");
    }

    #[test]
    fn non_numeric_priority_skips_entry() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/bad</loc><priority>high</priority></url>
  <url><loc>https://example.com/good</loc><priority>0.3</priority></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, Some(0.3));
    }

    #[test]
    fn out_of_range_priority_becomes_default() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/page</loc><priority>3.5</priority></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, None);
    }

    #[test]
    fn unrecognized_changefreq_is_absent() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/page</loc><changefreq>sometimes</changefreq></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries[0].change_frequency, None);
    }

    #[test]
    fn nested_extension_loc_does_not_collide() {
        let xml = r#"<urlset xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
  <url>
    <loc>https://example.com/gallery</loc>
    <image:image><image:loc>https://cdn.example.com/pic.jpg</image:loc></image:image>
  </url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_str(), "https://example.com/gallery");
    }

    #[test]
    fn cdata_loc_is_parsed() {
        let xml = r#"<urlset>
  <url><loc><![CDATA[https://example.com/cdata]]></loc></url>
</urlset>"#;

        let SitemapDocument::UrlSet(entries) = parse_document(xml, &source()).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_str(), "https://example.com/cdata");
    }

    #[test]
    fn truncated_xml_is_parse_error() {
        let xml = r#"<urlset><url><loc>https://example.com/a</loc>"#;
        // Either a parse error or a document that simply lost the dangling
        // entry is acceptable for truncation; quick-xml reports EOF inside
        // an open element as an error.
        match parse_document(xml, &source()) {
            Err(Error::Parse { .. }) => {}
            Ok(SitemapDocument::UrlSet(entries)) => assert!(entries.len() <= 1),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
