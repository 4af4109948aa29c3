//! Inspection of a post body: embedded code snippets, image references and excerpt

use lazy_static::lazy_static;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

lazy_static! {
    static ref IMG_TAG: Regex =
        Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["'][^>]*>"#).unwrap();
    static ref IMG_ALT: Regex = Regex::new(r#"(?i)\balt\s*=\s*["']([^"']*)["']"#).unwrap();
    static ref LIQUID_TAG: Regex = Regex::new(r"\{\{[^{}\n]*\}\}").unwrap();
}

/// Stands in for blanks inside `{{ ... }}` so the parser accepts
/// `![alt]({{ site.baseurl }}/img/a.png)` as a link destination
const MASK: char = 'x';

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSnippet {
    /// Info string of a fenced block (`jsx`, `javascript`, ...)
    pub lang: Option<String>,
    pub code: String,
}

/// An image referenced from the body, with its path as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub alt: String,
    pub src: String,
}

/// What a body contains, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostBody {
    pub snippets: Vec<CodeSnippet>,
    pub images: Vec<ImageRef>,
    pub excerpt: Option<String>,
}

impl PostBody {
    /// Inspect a markdown body; the excerpt ends at the first `separator`
    pub fn inspect(markdown: &str, separator: &str) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let source = MaskedSource::new(markdown);
        let parser = Parser::new_ext(&source.masked, options);

        let mut body = PostBody {
            excerpt: excerpt(markdown, separator),
            ..Default::default()
        };
        let mut code: Option<CodeSnippet> = None;
        let mut image: Option<ImageRef> = None;

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some(CodeSnippet {
                        lang,
                        code: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(snippet) = code.take() {
                        body.snippets.push(snippet);
                    }
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    image = Some(ImageRef {
                        alt: String::new(),
                        src: source.destination(range, &dest_url),
                    });
                }
                Event::End(TagEnd::Image) => {
                    if let Some(img) = image.take() {
                        body.images.push(img);
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(snippet) = code.as_mut() {
                        snippet.code.push_str(source.original(range, &text));
                    } else if let Some(img) = image.as_mut() {
                        img.alt.push_str(&text);
                    }
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    body.images.extend(html_images(source.original(range, &html)));
                }
                _ => {}
            }
        }

        body
    }
}

/// The body as written, next to a copy the markdown parser can digest
///
/// Masking only swaps single-byte blanks for a single-byte letter, so byte
/// offsets into `masked` are valid offsets into `original`.
struct MaskedSource<'a> {
    original: &'a str,
    masked: String,
}

impl<'a> MaskedSource<'a> {
    fn new(original: &'a str) -> Self {
        let mut masked = String::with_capacity(original.len());
        let mut last = 0;
        for tag in LIQUID_TAG.find_iter(original) {
            masked.push_str(&original[last..tag.start()]);
            masked.extend(tag.as_str().chars().map(|c| match c {
                ' ' | '\t' => MASK,
                other => other,
            }));
            last = tag.end();
        }
        masked.push_str(&original[last..]);
        Self { original, masked }
    }

    /// Original text behind an event the parser passed through verbatim
    fn original<'t>(&'t self, range: Range<usize>, parsed: &'t str) -> &'t str {
        match (self.masked.get(range.clone()), self.original.get(range)) {
            (Some(masked), Some(original)) if masked == parsed => original,
            _ => parsed,
        }
    }

    /// Image destination as written, located after the `](` of the image span
    fn destination(&self, span: Range<usize>, dest: &str) -> String {
        if dest.is_empty() {
            return String::new();
        }
        let from = self
            .masked
            .get(span.clone())
            .and_then(|text| text.find("]("))
            .map(|pos| span.start + pos + 2)
            .unwrap_or(span.start);
        // reference-style images keep their destination in the definition
        let found = self.masked[from..]
            .find(dest)
            .map(|pos| from + pos)
            .or_else(|| self.masked.find(dest));
        match found.and_then(|pos| self.original.get(pos..pos + dest.len())) {
            Some(original) => original.to_string(),
            None => dest.to_string(),
        }
    }
}

/// Images written as raw `<img>` tags
fn html_images(html: &str) -> Vec<ImageRef> {
    IMG_TAG
        .captures_iter(html)
        .map(|caps| {
            let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let alt = IMG_ALT
                .captures(tag)
                .map(|alt| alt[1].to_string())
                .unwrap_or_default();
            ImageRef {
                alt,
                src: caps[1].to_string(),
            }
        })
        .collect()
}

/// Text before the first separator, trimmed; `None` for a blank body
fn excerpt(markdown: &str, separator: &str) -> Option<String> {
    let markdown = markdown.replace("\r\n", "\n");
    let separator = separator.replace("\r\n", "\n");
    let markdown = markdown.trim_start();
    let head = if separator.is_empty() {
        markdown
    } else {
        markdown.split(separator.as_str()).next().unwrap_or(markdown)
    };
    let head = head.trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}
