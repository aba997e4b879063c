/// Count positional `?` placeholders in SQL text.
///
/// Question marks inside string literals and quoted identifiers (`'..'`,
/// `".."`, `` `..` ``, `[..]`) are ignored. Every other `?` counts,
/// including one inside a comment, since it is still substituted when the
/// text is spliced into a statement.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => i = skip_quoted(bytes, i + 1, quote),
            b'[' => i = skip_quoted(bytes, i + 1, b']'),
            b'?' => {
                count += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }

    count
}

// Doubled quotes inside a quoted run are escapes, not terminators.
fn skip_quoted(bytes: &[u8], mut i: usize, close: u8) -> usize {
    while i < bytes.len() {
        if bytes[i] == close {
            if bytes.get(i + 1) == Some(&close) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }

    i
}
