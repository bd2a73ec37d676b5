/// Result of closing a possibly truncated candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    pub text: String,
    /// Byte offset the candidate was cut back to, if an incomplete tail was dropped.
    pub cut_at: Option<usize>,
    pub brackets_added: usize,
    pub braces_added: usize,
}

/// Drops an incomplete trailing value and appends the missing closers.
///
/// Brackets are counted without regard to string literals or nesting, and
/// all missing `]` are appended before all missing `}`. Deep truncations can
/// therefore close in the wrong order and still fail to parse.
pub fn close_truncated(candidate: &str) -> Repaired {
    let mut text = candidate.trim();
    let mut cut_at = None;

    if !text.ends_with(|c: char| matches!(c, '}' | ']' | '"')) {
        let cut = [text.rfind(','), text.rfind('['), text.rfind('{')]
            .into_iter()
            .flatten()
            .max();

        if let Some(cut) = cut.filter(|&cut| cut > 0) {
            text = &text[..cut];
            text = text.strip_suffix(',').unwrap_or(text);
            cut_at = Some(cut);
        }
    }

    let brackets_added = unmatched(text, '[', ']');
    let braces_added = unmatched(text, '{', '}');

    let mut repaired = String::with_capacity(text.len() + brackets_added + braces_added);
    repaired.push_str(text);
    repaired.extend(std::iter::repeat(']').take(brackets_added));
    repaired.extend(std::iter::repeat('}').take(braces_added));

    Repaired {
        text: repaired,
        cut_at,
        brackets_added,
        braces_added,
    }
}

fn unmatched(text: &str, open: char, close: char) -> usize {
    let opened = text.matches(open).count();
    let closed = text.matches(close).count();
    opened.saturating_sub(closed)
}
