//! Regex-based HTML sanitizer.
//!
//! Works on fragments, not documents: there is no parser, so the policies
//! are allowlists applied tag by tag. Under `Ugc` and `Strict` every `<`
//! that does not open a kept tag is escaped, so removing a tag can never
//! join the text around it into new markup.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::traits::Transform;

/// How much markup survives sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtmlPolicy {
    /// User-generated content: allow-listed formatting tags and attributes,
    /// safe URLs only, `rel="nofollow"` on links.
    #[default]
    Ugc,
    /// Strip every tag and keep the text.
    Strict,
    /// Entity-escape the text so it renders literally.
    Escape,
    /// Leave the text untouched.
    Passthrough,
}

impl FromStr for HtmlPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ugc" => Ok(Self::Ugc),
            "strict" => Ok(Self::Strict),
            "escape" => Ok(Self::Escape),
            "none" | "passthrough" => Ok(Self::Passthrough),
            other => Err(format!(
                "unknown sanitize policy '{other}', expected one of: ugc, strict, escape, none"
            )),
        }
    }
}

impl fmt::Display for HtmlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ugc => f.write_str("ugc"),
            Self::Strict => f.write_str("strict"),
            Self::Escape => f.write_str("escape"),
            Self::Passthrough => f.write_str("none"),
        }
    }
}

/// Elements removed together with everything inside them.
const CONTENT_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "applet", "noscript", "noembed", "template",
    "textarea", "select", "svg", "math", "frameset", "xmp", "title",
];

/// Elements kept by [`HtmlPolicy::Ugc`]. Anything else is unwrapped.
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "caption", "cite", "code", "dd", "del", "details",
    "dfn", "div", "dl", "dt", "em", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "i", "img", "ins", "kbd", "li", "mark", "ol", "p", "pre", "q", "s", "samp", "small",
    "span", "strong", "sub", "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead",
    "tr", "u", "ul", "var", "wbr",
];

const GLOBAL_ATTRS: &[&str] = &["title", "lang", "dir"];

const TAG_ATTRS: &[(&str, &str)] = &[
    ("a", "href"),
    ("a", "hreflang"),
    ("a", "name"),
    ("img", "src"),
    ("img", "alt"),
    ("img", "width"),
    ("img", "height"),
    ("td", "colspan"),
    ("td", "rowspan"),
    ("td", "align"),
    ("th", "colspan"),
    ("th", "rowspan"),
    ("th", "align"),
    ("ol", "start"),
    ("ol", "type"),
    ("blockquote", "cite"),
    ("q", "cite"),
    ("del", "cite"),
    ("ins", "cite"),
];

const URL_ATTRS: &[&str] = &["href", "src", "cite"];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)<!--.*?(?:-->|\z)"));

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*?)(/?)>"));

static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
});

// One pattern per element: the regex crate has no backreferences.
static RE_CONTENT_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CONTENT_TAGS
        .iter()
        .map(|tag| compile(&format!(r"(?si)<{tag}\b[^>]*>.*?</{tag}\s*>")))
        .collect()
});

// An opening tag whose closing tag never comes swallows the rest of the text.
static RE_UNCLOSED_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?si)<(?:{})\b[^>]*>.*\z",
        CONTENT_TAGS.join("|")
    ))
});

/// Cleans HTML fragments according to an [`HtmlPolicy`].
///
/// # Example
///
/// ```
/// use struct_sanitizer::sanitizer::{HtmlPolicy, HtmlSanitizer};
///
/// let ugc = HtmlSanitizer::new(HtmlPolicy::Ugc);
/// assert_eq!(
///     ugc.sanitize(r#"<b onclick="x()">hi</b><script>alert(1)</script>"#),
///     "<b>hi</b>"
/// );
///
/// let strict = HtmlSanitizer::new(HtmlPolicy::Strict);
/// assert_eq!(strict.sanitize("<p>a <em>b</em></p>"), "a b");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlSanitizer {
    policy: HtmlPolicy,
}

impl HtmlSanitizer {
    /// Create a sanitizer for `policy`.
    #[must_use]
    pub const fn new(policy: HtmlPolicy) -> Self {
        Self { policy }
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> HtmlPolicy {
        self.policy
    }

    /// Sanitize one fragment.
    #[must_use]
    pub fn sanitize(&self, input: &str) -> String {
        match self.policy {
            HtmlPolicy::Passthrough => input.to_string(),
            HtmlPolicy::Escape => escape(input),
            HtmlPolicy::Strict | HtmlPolicy::Ugc if !input.contains('<') => input.to_string(),
            HtmlPolicy::Strict => filter_tags(&strip_content_blocks(input), |_| None),
            HtmlPolicy::Ugc => filter_tags(&strip_content_blocks(input), rebuild_tag),
        }
    }
}

impl Transform for HtmlSanitizer {
    fn transform(&self, text: &str) -> String {
        self.sanitize(text)
    }
}

/// Entity-escape `& < > " '`.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Removing one block can join its neighbours into another, so repeat until
// nothing changes. Every pass shrinks the text.
fn strip_content_blocks(input: &str) -> String {
    let mut out = input.to_string();
    loop {
        let mut next = RE_COMMENT.replace_all(&out, "").into_owned();
        for re in RE_CONTENT_BLOCKS.iter() {
            if re.is_match(&next) {
                next = re.replace_all(&next, "").into_owned();
            }
        }
        next = RE_UNCLOSED_CONTENT.replace(&next, "").into_owned();
        if next == out {
            return out;
        }
        out = next;
    }
}

/// Replaces every tag with what `keep` returns for it and escapes the `<`
/// of everything else.
fn filter_tags(input: &str, keep: impl Fn(&Captures<'_>) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in RE_TAG.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut out, &input[last..whole.start()]);
        if let Some(tag) = keep(&caps) {
            out.push_str(&tag);
        }
        last = whole.end();
    }
    push_text(&mut out, &input[last..]);
    out
}

fn push_text(out: &mut String, text: &str) {
    for (i, part) in text.split('<').enumerate() {
        if i > 0 {
            out.push_str("&lt;");
        }
        out.push_str(part);
    }
}

fn rebuild_tag(caps: &Captures<'_>) -> Option<String> {
    let closing = !caps[1].is_empty();
    let tag = caps[2].to_ascii_lowercase();
    let self_closing = !caps[4].is_empty();

    if !ALLOWED_TAGS.contains(&tag.as_str()) {
        return None;
    }
    if closing {
        return Some(format!("</{tag}>"));
    }

    let mut attrs = filter_attributes(&tag, &caps[3]);
    if tag == "a" && attrs.iter().any(|(name, _)| name == "href") {
        attrs.push(("rel".to_string(), "nofollow".to_string()));
    }

    let mut out = format!("<{tag}");
    for (name, value) in &attrs {
        out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    Some(out)
}

fn filter_attributes(tag: &str, raw: &str) -> Vec<(String, String)> {
    let mut kept: Vec<(String, String)> = Vec::new();
    for caps in RE_ATTR.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());

        let allowed = GLOBAL_ATTRS.contains(&name.as_str())
            || TAG_ATTRS.iter().any(|&(t, a)| t == tag && a == name);
        if !allowed || kept.iter().any(|(seen, _)| *seen == name) {
            continue;
        }
        if URL_ATTRS.contains(&name.as_str()) && !is_safe_url(value) {
            tracing::trace!(tag, attribute = %name, "dropped unsafe url");
            continue;
        }
        kept.push((name, value.to_string()));
    }
    kept
}

/// Relative URLs and `http`, `https` and `mailto` are safe. Browsers ignore
/// whitespace and control characters inside a scheme, so those are removed
/// before looking at it.
fn is_safe_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    // Entity-encoded colons hide the scheme.
    if normalized.contains("&#") || normalized.contains("&colon") {
        return false;
    }

    match normalized.find(':') {
        None => true,
        Some(colon) => {
            let scheme = &normalized[..colon];
            scheme.contains(['/', '?', '#']) || SAFE_SCHEMES.contains(&scheme)
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('"', "&#34;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
