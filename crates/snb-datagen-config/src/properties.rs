// Property-file parsing
//
// Accepts the java.util.Properties line format:
// - lines end at `\n`, `\r\n` or a bare `\r`
// - `#` and `!` start comment lines, blank lines are skipped
// - key and value separated by `=`, `:` or whitespace
// - a trailing odd run of backslashes continues the entry on the next line
// - escapes: \t \n \r \f \uXXXX, any other escaped char stands for itself

use crate::error::{ConfigError, Result};

/// Parse property-file content into key/value pairs in file order.
///
/// Repeated keys are all returned; callers merging the pairs get
/// last-write-wins.
pub fn parse_properties(content: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let line = raw.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        entries.push((unescape(key, line_no)?, unescape(value, line_no)?));
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                out.push(decode_code_unit(unit, &mut chars, line)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 {
        return Err(malformed_escape(line, &hex));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| malformed_escape(line, &hex))
}

// UTF-16 surrogate pairs arrive as two consecutive \u escapes.
fn decode_code_unit(unit: u32, chars: &mut std::str::Chars<'_>, line: usize) -> Result<char> {
    if (0xD800..0xDC00).contains(&unit) {
        let low = match (chars.next(), chars.next()) {
            (Some('\\'), Some('u')) => read_code_unit(chars, line)?,
            _ => {
                return Err(ConfigError::Parse {
                    line,
                    message: format!("unpaired surrogate \\u{:04X}", unit),
                })
            }
        };
        if !(0xDC00..0xE000).contains(&low) {
            return Err(ConfigError::Parse {
                line,
                message: format!("invalid low surrogate \\u{:04X}", low),
            });
        }
        let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined).ok_or_else(|| ConfigError::Parse {
            line,
            message: format!("invalid code point U+{:X}", combined),
        });
    }

    char::from_u32(unit).ok_or_else(|| ConfigError::Parse {
        line,
        message: format!("unpaired surrogate \\u{:04X}", unit),
    })
}

fn malformed_escape(line: usize, hex: &str) -> ConfigError {
    ConfigError::Parse {
        line,
        message: format!("malformed \\uxxxx escape '\\u{}'", hex),
    }
}
