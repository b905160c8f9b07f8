//! Caption source loading.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::SubtitleError;

/// Read caption text from a file, or from stdin when `path` is `-`.
///
/// Bytes that aren't valid UTF-8 (Latin-1 and CP1252 files are common)
/// become U+FFFD instead of failing the load.
pub fn load_source(path: &Path) -> Result<String, SubtitleError> {
    let read = |source| SubtitleError::Read {
        path: path.to_path_buf(),
        source,
    };

    let bytes = if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer).map_err(read)?;
        buffer
    } else {
        fs::read(path).map_err(read)?
    };

    Ok(decode(path, bytes))
}

fn decode(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8, replacing undecodable bytes",
                path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\n00:00:01,000 --> 00:00:02,000\nhi\n").unwrap();

        let text = load_source(file.path()).unwrap();
        assert!(text.contains("hi"));
    }

    #[test]
    fn latin1_bytes_are_replaced_not_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1\n00:00:01,000 --> 00:00:02,000\ncaf\xe9\n").unwrap();

        let text = load_source(file.path()).unwrap();
        let outcome = crate::subtitle::parse(&text);
        assert_eq!(outcome.cues.len(), 1);
        assert_eq!(outcome.cues[0].text, "caf\u{fffd}");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_source(Path::new("/nonexistent/lyrics.srt")).unwrap_err();
        assert!(matches!(err, SubtitleError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/lyrics.srt"));
    }
}
