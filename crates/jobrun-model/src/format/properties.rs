//! Reader for the line-oriented `key=value` property file handed to the launcher.
use std::{path::Path, str::Chars};

use crate::{ModelError, ModelResult, Props};

/// Read and parse a property file.
pub fn load(path: impl AsRef<Path>) -> ModelResult<Props> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse property text.
///
/// Rules:
/// - `#` or `!` as the first non-blank character starts a comment line;
/// - the key ends at the first unescaped `=`, `:` or whitespace;
/// - a trailing odd run of backslashes joins the next line;
/// - `\uXXXX` and the usual single-character escapes are decoded.
pub fn parse(input: &str) -> ModelResult<Props> {
    let mut props = Props::new();
    let mut lines = input.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let first = raw.trim_start();
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let start_line = idx + 1;
        let mut logical = String::new();
        let mut current = first;
        loop {
            if ends_with_continuation(current) {
                logical.push_str(&current[..current.len() - 1]);
                match lines.next() {
                    Some((_, next)) => current = next.trim_start(),
                    None => break,
                }
            } else {
                logical.push_str(current);
                break;
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key, start_line)?;
        let value = unescape(value, start_line)?;
        props.insert(key, value);
    }
    Ok(props)
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut chars = line.char_indices();
    let mut key_end = line.len();
    let mut sep: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = i;
                sep = Some(c);
                break;
            }
            c if c.is_whitespace() => {
                key_end = i;
                sep = Some(c);
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let Some(sep) = sep else {
        return (key, "");
    };

    let mut rest = line[key_end + sep.len_utf8()..].trim_start();
    if sep.is_whitespace() {
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start();
        }
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> ModelResult<String> {
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
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let unit = hex_unit(&mut chars, line)?;
                let code = if HIGH_SURROGATES.contains(&unit) {
                    if !chars.as_str().starts_with("\\u") {
                        return Err(unpaired(unit, line));
                    }
                    chars.nth(1);
                    let low = hex_unit(&mut chars, line)?;
                    if !LOW_SURROGATES.contains(&low) {
                        return Err(unpaired(unit, line));
                    }
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    unit
                };
                out.push(char::from_u32(code).ok_or_else(|| unpaired(unit, line))?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

const HIGH_SURROGATES: std::ops::Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: std::ops::Range<u32> = 0xDC00..0xE000;

/// Read the four hex digits of a `\uXXXX` escape.
fn hex_unit(chars: &mut Chars<'_>, line: usize) -> ModelResult<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    (hex.len() == 4)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
        .ok_or_else(|| ModelError::Malformed {
            line,
            reason: format!("invalid \\u escape '\\u{hex}'"),
        })
}

fn unpaired(unit: u32, line: usize) -> ModelError {
    ModelError::Malformed {
        line,
        reason: format!("unpaired surrogate '\\u{unit:04X}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_common_separators_and_comments() {
        let text = "\
# launcher input
! also a comment

job.class=EchoJob
method.run : execute
plain value with spaces
empty=
";
        let props = parse(text).unwrap();
        assert_eq!(
            props.keys().collect::<Vec<_>>(),
            vec!["job.class", "method.run", "plain", "empty"]
        );
        assert_eq!(props.get("job.class"), Some("EchoJob"));
        assert_eq!(props.get("method.run"), Some("execute"));
        assert_eq!(props.get("plain"), Some("value with spaces"));
        assert_eq!(props.get("empty"), Some(""));
    }

    #[test]
    fn whitespace_separator_may_be_followed_by_equals() {
        let props = parse("key   =   value").unwrap();
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "list=a,\\\n    b,\\\n    c\nnext=1\n";
        let props = parse(text).unwrap();
        assert_eq!(props.get("list"), Some("a,b,c"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let props = parse("path=C:\\\\\nnext=1").unwrap();
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn decodes_escapes_in_keys_and_values() {
        let props = parse("a\\=b=x\\ty\nsnow=\\u2603").unwrap();
        assert_eq!(props.get("a=b"), Some("x\ty"));
        assert_eq!(props.get("snow"), Some("\u{2603}"));
    }

    #[test]
    fn bad_unicode_escape_is_malformed() {
        let err = parse("ok=1\nbad=\\u12g4").unwrap_err();
        match err {
            ModelError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn surrogate_pair_decodes_to_one_char() {
        let props = parse("emoji=\\uD83D\\uDE00!\nupper=\\ud83d\\ude00").unwrap();
        assert_eq!(props.get("emoji"), Some("\u{1F600}!"));
        assert_eq!(props.get("upper"), Some("\u{1F600}"));
    }

    #[test]
    fn lone_surrogates_are_malformed() {
        for text in [
            "a=\\uD83D",
            "a=\\uD83Dx",
            "a=\\uD83D\\u0041",
            "a=\\uDE00",
        ] {
            match parse(text) {
                Err(ModelError::Malformed { line, reason }) => {
                    assert_eq!(line, 1);
                    assert!(reason.contains("surrogate"), "{text}: {reason}");
                }
                other => panic!("expected Malformed for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_key_keeps_position_last_value_wins() {
        let props = parse("a=1\nb=2\na=3").unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(props.get("a"), Some("3"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "job.class=EchoJob").unwrap();

        let props = load(file.path()).unwrap();
        assert_eq!(props.get("job.class"), Some("EchoJob"));
    }

    #[test]
    fn load_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.properties")).unwrap_err();
        assert!(matches!(err, ModelError::Unreadable { .. }));
    }
}
