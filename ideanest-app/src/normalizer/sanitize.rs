const JSON_ESCAPES: [char; 9] = ['"', '\\', '/', 'b', 'f', 'n', 'r', 't', 'u'];

/// Escape clean-up applied after the first parse attempt fails.
pub fn sanitize(candidate: &str) -> String {
    let unquoted = candidate.replace("\\'", "'");
    let collapsed = unquoted.replace(r"\\\\", r"\\");
    let visible: String = collapsed.chars().filter(|c| !is_stray_control(*c)).collect();
    escape_lone_backslashes(&visible)
}

// Tab, line feed and carriage return are kept.
fn is_stray_control(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}'
    )
}

fn escape_lone_backslashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' && !chars.peek().is_some_and(|next| JSON_ESCAPES.contains(next)) {
            out.push('\\');
        }
    }

    out
}
