//! Lightweight tag scanning over raw HTML text.
//!
//! Not a parser: it locates start tags and closing tags by name and reads
//! attributes out of a start tag's literal text. Tag and attribute names are
//! compared ASCII case-insensitively. Everything outside the located spans is
//! never touched, so callers can splice the document by byte range.

/// A start tag found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTag<'a> {
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset one past the closing `>`.
    pub end: usize,
    attrs: &'a str,
}

impl<'a> StartTag<'a> {
    /// Value of the first attribute called `name`. Valueless attributes yield `""`.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        Attributes::new(self.attrs)
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// True when attribute `name` exists and equals `value`, ignoring ASCII case.
    pub fn attr_eq(&self, name: &str, value: &str) -> bool {
        self.attr(name).is_some_and(|v| v.eq_ignore_ascii_case(value))
    }

    /// True when attribute `name` starts with `prefix` and has more after it.
    pub fn attr_has_prefix(&self, name: &str, prefix: &str) -> bool {
        self.attr(name).is_some_and(|v| {
            v.len() > prefix.len()
                && v.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
    }
}

/// Iterate over start tags named `name`, in document order.
pub fn start_tags<'a>(html: &'a str, name: &'a str) -> StartTags<'a> {
    StartTags { html, name, pos: 0 }
}

/// Iterator returned by [`start_tags`].
#[derive(Debug, Clone)]
pub struct StartTags<'a> {
    html: &'a str,
    name: &'a str,
    pos: usize,
}

impl<'a> Iterator for StartTags<'a> {
    type Item = StartTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let html = self.html;
        let bytes = html.as_bytes();
        loop {
            let lt = self.pos + html.get(self.pos..)?.find('<')?;
            self.pos = lt + 1;

            let name_end = lt + 1 + self.name.len();
            if !name_matches(bytes, lt + 1, self.name) {
                continue;
            }
            match bytes.get(name_end) {
                Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
                _ => continue,
            }

            let gt = tag_end(bytes, name_end)?;
            self.pos = gt + 1;
            return Some(StartTag {
                start: lt,
                end: gt + 1,
                attrs: &html[name_end..gt],
            });
        }
    }
}

/// Locate the closing tag `</name>` at or after `from`.
///
/// Returns the byte range of the whole closing tag.
pub fn find_close_tag(html: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = html.as_bytes();
    let mut pos = from;
    loop {
        let lt = pos + html.get(pos..)?.find("</")?;
        pos = lt + 2;

        let name_end = lt + 2 + name.len();
        if !name_matches(bytes, lt + 2, name) {
            continue;
        }
        match bytes.get(name_end) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => {}
            _ => continue,
        }
        let gt = name_end + html[name_end..].find('>')?;
        return Some((lt, gt + 1));
    }
}

fn name_matches(bytes: &[u8], at: usize, name: &str) -> bool {
    bytes
        .get(at..at + name.len())
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()))
}

/// Index of the `>` ending a start tag, skipping quoted attribute values.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;
    for (offset, &b) in bytes[from..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return Some(from + offset),
                b'"' | b'\'' if after_equals => quote = Some(b),
                b'=' => {
                    after_equals = true;
                    continue;
                }
                b if b.is_ascii_whitespace() && after_equals => continue,
                _ => {}
            },
        }
        after_equals = false;
    }
    // Unbalanced quote: settle for the first raw '>'.
    bytes[from..].iter().position(|&b| b == b'>').map(|i| from + i)
}

/// Iterator over `(name, value)` pairs of a start tag's attribute text.
struct Attributes<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Attributes<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let bytes = src.as_bytes();
        loop {
            self.skip_while(|b| b.is_ascii_whitespace() || b == b'/');
            if self.pos >= bytes.len() {
                return None;
            }

            let name_start = self.pos;
            self.skip_while(|b| !(b.is_ascii_whitespace() || b == b'=' || b == b'/' || b == b'>'));
            let name = &src[name_start..self.pos];
            if name.is_empty() {
                // stray '=' or '>'
                self.pos += 1;
                continue;
            }

            self.skip_while(|b| b.is_ascii_whitespace());
            if bytes.get(self.pos) != Some(&b'=') {
                return Some((name, ""));
            }
            self.pos += 1;
            self.skip_while(|b| b.is_ascii_whitespace());

            let value = match bytes.get(self.pos) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let value_start = self.pos + 1;
                    let value_end = src[value_start..]
                        .find(q as char)
                        .map_or(src.len(), |i| value_start + i);
                    self.pos = (value_end + 1).min(src.len());
                    &src[value_start..value_end]
                }
                _ => {
                    let value_start = self.pos;
                    self.skip_while(|b| !(b.is_ascii_whitespace() || b == b'>'));
                    &src[value_start..self.pos]
                }
            };
            return Some((name, value));
        }
    }
}
