pub mod census;
pub mod review;
pub mod summary;

/// Escape literal pipes so a filename cannot break a Markdown table row.
pub fn escape_pipes(name: &str) -> String {
    name.replace('|', "\\|")
}

/// Shorten a filename for table display, keeping the extension when it
/// fits: `a-very-long-name.pdf` becomes `a-very-long...pdf`. Without a
/// usable extension the tail is simply cut. Lengths are counted in
/// characters, not bytes, so multi-byte names never split mid-char.
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        return name.to_string();
    }

    if let Some(dot) = name.rfind('.') {
        let ext_chars = name[dot + 1..].chars().count();
        if ext_chars + 3 < max_len {
            let available = max_len - ext_chars - 4;
            if available > 0 {
                let prefix: String = chars[..available].iter().collect();
                return format!("{prefix}...{}", &name[dot + 1..]);
            }
        }
    }

    let prefix: String = chars[..max_len.saturating_sub(3)].iter().collect();
    format!("{prefix}...")
}
