//! Client-side redirect driven by an alternate-link hint.
//!
//! A metadata fragment may carry `<link rel="alternate" href="...">`. When it
//! does, the page gets a small inline script that sends the browser to that
//! URL unless it is already there (trailing slashes ignored on both sides).
//! That comparison runs in the browser; only the script text is produced here.

/// Redirect target extracted from a metadata fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDirective {
    target: String,
}

const SCRIPT_OPEN: &str = r#"<script>(function(){ var alt=""#;
const SCRIPT_CLOSE: &str = r#""; var cur=window.location.href.replace(/\/+$/,""); var tgt=alt.replace(/\/+$/,""); if(alt && cur!==tgt) window.location.href=tgt; })();</script>"#;

impl RedirectDirective {
    /// Look for the first alternate link with a usable href.
    ///
    /// The href is trimmed; an empty result yields no directive.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        crate::seo::markup::start_tags(fragment, "link")
            .filter(|tag| tag.attr_eq("rel", "alternate"))
            .filter_map(|tag| tag.attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(|href| Self {
                target: href.to_string(),
            })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Mirror of the emitted script's comparison; the script text itself is
    /// pinned by the exact-template test.
    #[cfg(test)]
    fn should_redirect(&self, current_url: &str) -> bool {
        !self.target.is_empty()
            && current_url.trim_end_matches('/') != self.target.trim_end_matches('/')
    }

    /// Inline `<script>` element performing the redirect.
    pub fn script(&self) -> String {
        let escaped = escape_js_string(&self.target);
        let mut out = String::with_capacity(SCRIPT_OPEN.len() + escaped.len() + SCRIPT_CLOSE.len());
        out.push_str(SCRIPT_OPEN);
        out.push_str(&escaped);
        out.push_str(SCRIPT_CLOSE);
        out
    }
}

/// Escape text for a double-quoted JavaScript string inside an HTML `<script>`.
///
/// `<`, `>` and `&` are escaped too so the value can never close the element.
pub fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
