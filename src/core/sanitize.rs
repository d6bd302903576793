// src/core/sanitize.rs

/// Collapse every whitespace run (including `&nbsp;` once decoded) to one space and trim.
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

/// Keep printable ASCII only (0x20..0x7E exclusive), turning whitespace into
/// single spaces first so words split by newlines don't fuse.
pub fn printable_ascii(s: &str) -> String {
    let kept: String = s
        .chars()
        .map(|ch| if ch.is_whitespace() { ' ' } else { ch })
        .filter(|&ch| (' '..'~').contains(&ch))
        .collect();
    normalize_ws(&kept)
}

/// Inline style in comparable form: lowercase, no whitespace, no trailing `;`.
pub fn normalize_style(style: &str) -> String {
    let mut out: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    while out.ends_with(';') { out.pop(); }
    out
}

/// Last non-empty path segment of a link, ignoring query and fragment.
/// `http://tursib.ro/traseu/14/` → `14`
pub fn last_path_segment(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|seg| !seg.is_empty() && !seg.contains(':'))
        .map(str::to_string)
}
