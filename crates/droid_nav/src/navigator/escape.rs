//! Escaping for `input text`

use std::borrow::Cow;

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c)
}

/// Single-quote `s` for a POSIX shell unless it is made only of safe characters
pub fn shell_quote(s: &str) -> Cow<'_, str> {
    if s.is_empty() {
        return Cow::Borrowed("''");
    }
    if s.chars().all(is_shell_safe) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(format!("'{}'", s.replace('\'', r#"'"'"'"#)))
}

/// Quote for the device shell, then encode spaces as `%s`, which
/// `input text` turns back into spaces.
pub fn escape_input_text(text: &str) -> String {
    shell_quote(text).replace(' ', "%s")
}
