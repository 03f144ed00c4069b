//! Dotenv parsing.
//!
//! Turns decrypted plaintext into an [`EnvSnapshot`]: one `KEY=VALUE` per
//! line, `#` comments, optional `export` prefix, optional matching quotes.

use std::collections::BTreeMap;

use tracing::debug;
use zeroize::Zeroizing;

/// Variables recovered from a decrypted env file.
///
/// Values are wiped on drop and never appear in `Debug` output.
#[derive(Default)]
pub struct EnvSnapshot {
    entries: BTreeMap<String, Zeroizing<String>>,
}

impl EnvSnapshot {
    /// Parse dotenv text.
    ///
    /// Blank lines, comments and lines without `=` are skipped, as are
    /// entries with an empty key or a NUL anywhere in them (including one
    /// produced by an escape). A repeated key keeps its last value. Values
    /// wrapped in matching quotes lose the quotes and have their backslash
    /// escapes decoded, including `\xhh`, `\uhhhh` and octal forms.
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = strip_export(line);

            let Some((key, value)) = line.split_once('=') else {
                debug!(line = lineno + 1, "skipping line without '='");
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                debug!(line = lineno + 1, "skipping entry with empty key");
                continue;
            }

            let value = parse_value(value.trim());
            if key.contains('\0') || value.contains('\0') {
                debug!(line = lineno + 1, "skipping entry containing NUL");
                continue;
            }

            entries.insert(key.to_string(), value);
        }

        Self { entries }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    /// Key names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key-value pairs in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn strip_export(line: &str) -> &str {
    match line.strip_prefix("export") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

fn parse_value(raw: &str) -> Zeroizing<String> {
    let bytes = raw.as_bytes();
    let quoted = raw.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[0] == bytes[raw.len() - 1];

    if quoted {
        Zeroizing::new(unescape(&raw[1..raw.len() - 1]))
    } else {
        Zeroizing::new(raw.to_string())
    }
}

/// Decode backslash escapes inside a quoted value.
///
/// Handles the single-character escapes (`\n`, `\t`, `\\`, quotes, ...),
/// octal `\o` to `\ooo`, `\xhh`, `\uhhhh` and `\Uhhhhhhhh`. Anything else,
/// including a malformed numeric escape, is kept as written.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };

        let width = match esc {
            'n' => {
                out.push('\n');
                continue;
            }
            'r' => {
                out.push('\r');
                continue;
            }
            't' => {
                out.push('\t');
                continue;
            }
            'a' => {
                out.push('\u{07}');
                continue;
            }
            'b' => {
                out.push('\u{08}');
                continue;
            }
            'f' => {
                out.push('\u{0c}');
                continue;
            }
            'v' => {
                out.push('\u{0b}');
                continue;
            }
            '"' | '\'' | '\\' => {
                out.push(esc);
                continue;
            }
            '0'..='7' => {
                let mut code = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.next_if(|c| c.is_digit(8)).and_then(|d| d.to_digit(8)) {
                        Some(d) => code = code * 8 + d,
                        None => break,
                    }
                }
                // At most 0o777, always a valid char.
                out.extend(char::from_u32(code));
                continue;
            }
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => {
                out.push('\\');
                out.push(esc);
                continue;
            }
        };

        let (digits, decoded) = hex_escape(&mut chars, width);
        match decoded {
            Some(c) => out.push(c),
            None => {
                out.push('\\');
                out.push(esc);
                out.push_str(&digits);
            }
        }
    }

    out
}

/// Take up to `count` hex digits; the char is `None` unless all were present
/// and form a valid scalar value.
fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    count: usize,
) -> (String, Option<char>) {
    let mut digits = String::with_capacity(count);
    while digits.len() < count {
        match chars.next_if(char::is_ascii_hexdigit) {
            Some(d) => digits.push(d),
            None => break,
        }
    }
    let c = if digits.len() == count {
        u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
    } else {
        None
    };
    (digits, c)
}
