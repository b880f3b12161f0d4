//! Log sanitizing for narrator output and user task text, which routinely
//! contain newlines. Keeps every log record on a single line.

/// Escape a string for single-line logging. `\n`, `\r`, `\t`, and backslash
/// are escaped, other control characters become `\xNN`, and anything past the
/// preview cap is truncated with an ellipsis so multi-paragraph narratives do
/// not flood the log.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 240;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn narrative_text_stays_on_one_line() {
        let narrative = "The gates open.\nBeyond them, the trial awaits.\r\tGo.";
        assert_eq!(
            escape_log(narrative),
            "The gates open.\\nBeyond them, the trial awaits.\\r\\tGo."
        );
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "a".repeat(500);
        let escaped = escape_log(&long);
        assert!(escaped.chars().count() <= 241);
        assert!(escaped.ends_with('…'));
    }
}
