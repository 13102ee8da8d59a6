//! Command implementations for the ledit front end
//!
//! This module contains all commands organized into logical sub-modules:
//!
//! - **editing**: Position-addressed edits and `show` (insert, delete, replace, append)
//! - **undo**: Undo/redo on the active buffer
//! - **file**: Opening, saving, closing and switching buffers, plus `dir-tree`
//! - **log**: The per-file edit log (log-on, log-off, log-show)
//! - **control**: Application control (help, exit)
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait,
//! which defines a uniform interface for command execution. The helpers below
//! parse the argument shapes the commands share.

/// Application control
pub mod control;
/// Position-addressed editing
pub mod editing;
/// File and buffer operations
pub mod file;
/// Edit log sidecar
pub mod log;
/// Undo/redo operations
pub mod undo;

use crate::core::edit::Position;

/// Register all commands in the application
pub fn register_all(app: &mut crate::core::app::EditorApp) {
    use crate::core::command::Command;
    use std::collections::HashMap;

    use self::control::*;
    use self::editing::*;
    use self::file::*;
    use self::log::*;
    use self::undo::*;

    let mut registry: HashMap<String, Box<dyn Command>> = HashMap::new();

    // File and buffer commands
    registry.insert("load".to_string(), Box::new(Load));
    registry.insert("save".to_string(), Box::new(Save));
    registry.insert("close".to_string(), Box::new(Close));
    registry.insert("init".to_string(), Box::new(Init));
    registry.insert("edit".to_string(), Box::new(Edit));
    registry.insert("editor-list".to_string(), Box::new(EditorList));
    registry.insert("dir-tree".to_string(), Box::new(DirTree));

    // Editing commands
    registry.insert("insert".to_string(), Box::new(Insert));
    registry.insert("delete".to_string(), Box::new(Delete));
    registry.insert("replace".to_string(), Box::new(Replace));
    registry.insert("append".to_string(), Box::new(Append));
    registry.insert("show".to_string(), Box::new(Show));

    // Undo/redo
    registry.insert("undo".to_string(), Box::new(Undo));
    registry.insert("redo".to_string(), Box::new(Redo));

    // Edit log
    registry.insert("log-on".to_string(), Box::new(LogOn));
    registry.insert("log-off".to_string(), Box::new(LogOff));
    registry.insert("log-show".to_string(), Box::new(LogShow));

    // Control
    registry.insert("help".to_string(), Box::new(Help));
    registry.insert("exit".to_string(), Box::new(Exit));

    app.command_registry = registry;
}

// ==================== Argument parsing ====================

/// First whitespace-separated token and the rest of the line.
pub fn next_token(args: &str) -> (&str, &str) {
    let args = args.trim_start();
    match args.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (args, ""),
    }
}

/// A strictly positive integer.
pub fn parse_positive(token: &str, what: &str) -> Result<usize, String> {
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("{what} must be a positive integer, got '{token}'")),
    }
}

/// `line:col`, both 1-based.
pub fn parse_position(token: &str) -> Result<Position, String> {
    let (line, col) = token
        .split_once(':')
        .ok_or_else(|| format!("expected <line:col>, got '{token}'"))?;
    Ok(Position::new(
        parse_positive(line, "line")?,
        parse_positive(col, "column")?,
    ))
}

/// `start:end`, both 1-based.
pub fn parse_range(token: &str) -> Result<(usize, usize), String> {
    let (start, end) = token
        .split_once(':')
        .ok_or_else(|| format!("expected <start:end>, got '{token}'"))?;
    Ok((
        parse_positive(start, "start line")?,
        parse_positive(end, "end line")?,
    ))
}

/// A double-quoted payload with `\n`, `\t`, `\"` and `\\` escapes. Returns the
/// unescaped text and whatever follows the closing quote.
pub fn parse_quoted(args: &str) -> Result<(String, &str), String> {
    let args = args.trim_start();
    let Some(body) = args.strip_prefix('"') else {
        return Err("text must be enclosed in double quotes".to_string());
    };

    let mut text = String::new();
    let mut chars = body.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((text, body[i + 1..].trim_start())),
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, other)) => {
                    text.push('\\');
                    text.push(other);
                }
                None => break,
            },
            _ => text.push(ch),
        }
    }
    Err("missing closing quote".to_string())
}

/// Quoted payload that must be the last thing on the line.
pub fn parse_payload(args: &str) -> Result<String, String> {
    let (text, rest) = parse_quoted(args)?;
    if !rest.is_empty() {
        return Err(format!("unexpected text after closing quote: '{rest}'"));
    }
    Ok(text)
}

/// Optional single path argument.
pub fn optional_path(args: &str) -> Option<std::path::PathBuf> {
    let (token, _) = next_token(args);
    (!token.is_empty()).then(|| std::path::PathBuf::from(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_token() {
        assert_eq!(next_token("  1:2   \"x y\""), ("1:2", "\"x y\""));
        assert_eq!(next_token("all"), ("all", ""));
        assert_eq!(next_token(""), ("", ""));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3:14"), Ok(Position::new(3, 14)));
        assert!(parse_position("0:1").is_err());
        assert!(parse_position("1:0").is_err());
        assert!(parse_position("1").is_err());
        assert!(parse_position("a:b").is_err());
        assert!(parse_position("-1:2").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("2:5"), Ok((2, 5)));
        assert!(parse_range("2-5").is_err());
    }

    #[test]
    fn test_parse_quoted_escapes() {
        assert_eq!(
            parse_quoted(r#""a\nb\t\"c\"\\" rest"#),
            Ok(("a\nb\t\"c\"\\".to_string(), "rest"))
        );
        assert_eq!(parse_quoted(r#""""#), Ok((String::new(), "")));
        assert_eq!(parse_quoted(r#""\q""#), Ok(("\\q".to_string(), "")));
        assert!(parse_quoted("unquoted").is_err());
        assert!(parse_quoted(r#""open"#).is_err());
        assert!(parse_quoted(r#""dangling\"#).is_err());
    }

    #[test]
    fn test_parse_payload_rejects_trailing_text() {
        assert_eq!(parse_payload(r#""hello world""#), Ok("hello world".to_string()));
        assert!(parse_payload(r#""a" b"#).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("5", "len"), Ok(5));
        assert!(parse_positive("0", "len").is_err());
    }
}
