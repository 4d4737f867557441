use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input given: pass a value, --stdin or --file")]
    Missing,
    #[error("pass only one of a value, --stdin or --file")]
    Ambiguous,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a value given inline, on stdin, or in a file.
///
/// Exactly one source must be used. One trailing line ending is removed
/// from stdin and file input.
pub fn read_input(
    value: Option<&str>,
    stdin: bool,
    file: Option<&Path>,
) -> Result<String, InputError> {
    match (value, stdin, file) {
        (Some(value), false, None) => Ok(value.to_string()),
        (None, true, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(strip_line_ending(buf))
        }
        (None, false, Some(path)) => Ok(strip_line_ending(std::fs::read_to_string(path)?)),
        (None, false, None) => Err(InputError::Missing),
        _ => Err(InputError::Ambiguous),
    }
}

fn strip_line_ending(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("secret\n".into()), "secret");
        assert_eq!(strip_line_ending("secret\r\n".into()), "secret");
        assert_eq!(strip_line_ending("two\n\n".into()), "two\n");
        assert_eq!(strip_line_ending("none".into()), "none");
    }

    #[test]
    fn test_inline_value() {
        assert_eq!(read_input(Some("v"), false, None).unwrap(), "v");
    }

    #[test]
    fn test_file_value() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "ssh-ed25519 AAAA me\n").unwrap();
        assert_eq!(
            read_input(None, false, Some(tmp.path())).unwrap(),
            "ssh-ed25519 AAAA me"
        );
    }

    #[test]
    fn test_source_count() {
        assert!(matches!(
            read_input(None, false, None),
            Err(InputError::Missing)
        ));
        assert!(matches!(
            read_input(Some("v"), true, None),
            Err(InputError::Ambiguous)
        ));
        assert!(matches!(
            read_input(Some("v"), false, Some(Path::new("/tmp/x"))),
            Err(InputError::Ambiguous)
        ));
    }
}
