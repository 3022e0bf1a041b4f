// src/core/html.rs
// Tolerant tag scanning over raw HTML. No DOM: everything is byte offsets into
// the source string, so callers can slice without copying.

/// ASCII-only lowercase. Multi-byte chars pass through untouched, so byte
/// offsets found in the result are valid in the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// An opening tag found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTag<'a> {
    /// Lowercased tag name.
    pub name: String,
    /// Raw text between the name and the closing `>`.
    pub attrs: &'a str,
    /// Offset of the `<`.
    pub start: usize,
    /// Offset just past the `>`.
    pub end: usize,
}

impl<'a> OpenTag<'a> {
    /// Attribute value by case-insensitive name. Quoted and bare values are accepted.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let s = self.attrs;
        let b = s.as_bytes();
        let n = b.len();
        let mut i = 0usize;

        while i < n {
            while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
            let key_start = i;
            while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' { i += 1; }
            let key = &s[key_start..i];
            if key.is_empty() { break; }

            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            let value = if i < n && b[i] == b'=' {
                i += 1;
                while i < n && b[i].is_ascii_whitespace() { i += 1; }
                if i < n && (b[i] == b'"' || b[i] == b'\'') {
                    let quote = b[i];
                    let v_start = i + 1;
                    let v_end = b[v_start..].iter().position(|&c| c == quote).map_or(n, |p| v_start + p);
                    i = (v_end + 1).min(n);
                    &s[v_start..v_end]
                } else {
                    let v_start = i;
                    while i < n && !b[i].is_ascii_whitespace() { i += 1; }
                    &s[v_start..i]
                }
            } else {
                ""
            };

            if key.eq_ignore_ascii_case(name) {
                return Some(value);
            }
        }
        None
    }

    /// True when the `class` attribute contains `class` as a whole token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }
}

/// Next opening tag at or after `from`. Closing tags, comments and
/// declarations are skipped. Quoted `>` inside attributes does not end the tag.
pub fn next_open_tag(s: &str, from: usize) -> Option<OpenTag<'_>> {
    let b = s.as_bytes();
    let n = b.len();
    let mut i = from;

    while i < n {
        let lt = i + b.get(i..)?.iter().position(|&c| c == b'<')?;

        if s[lt..].starts_with("<!--") {
            i = s[lt..].find("-->").map_or(n, |p| lt + p + 3);
            continue;
        }
        let first = *b.get(lt + 1)?;
        if !first.is_ascii_alphabetic() {
            // `</x>`, `<!doctype>`, stray '<' in text
            i = lt + 1;
            continue;
        }

        let name_end = b[lt + 1..]
            .iter()
            .position(|&c| c.is_ascii_whitespace() || c == b'>' || c == b'/')
            .map_or(n, |p| lt + 1 + p);
        let gt = tag_end(b, name_end)?;

        return Some(OpenTag {
            name: to_lower(&s[lt + 1..name_end]),
            attrs: &s[name_end..gt],
            start: lt,
            end: gt + 1,
        });
    }
    None
}

// Offset of the `>` closing a tag, honouring quotes.
fn tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = from;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset of the `</name` closing tag at or after `from` (case-insensitive).
pub fn find_close_ci(s: &str, name: &str, from: usize) -> Option<usize> {
    let needle = join!("</", to_lower(name));
    to_lower(s.get(from..)?).find(&needle).map(|p| from + p)
}

/// Visible text of the element opened by `tag`: everything up to its closing
/// tag, tags stripped, entities and whitespace normalized.
pub fn inner_text(s: &str, tag: &OpenTag<'_>) -> String {
    match find_close_ci(s, &tag.name, tag.end) {
        Some(close) => strip_tags(super::sanitize::normalize_entities(&s[tag.end..close])),
        None => s!(),
    }
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}
