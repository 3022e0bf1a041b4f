// src/core/sanitize.rs

/// Decode the handful of named entities the site emits plus numeric
/// references (`&#29421;`, `&#x72ED;`). Unknown entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(normalize_entities("a&nbsp;b &amp; c"), "a b & c");
        assert_eq!(normalize_entities("&#29421;&#x7A84;"), "狭窄");
        assert_eq!(normalize_entities("&lt;i&gt;"), "<i>");
    }

    #[test]
    fn leaves_unknown_entities_alone() {
        assert_eq!(normalize_entities("R&D; a & b"), "R&D; a & b");
        assert_eq!(normalize_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(normalize_entities("trailing &"), "trailing &");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_ws("  你 \n\t 好  "), "你 好");
        assert_eq!(normalize_ws(""), "");
    }
}
