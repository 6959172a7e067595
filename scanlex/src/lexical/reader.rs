//! Line-oriented input for the tokenizer
//!
//! The tokenizer only ever asks for "the next physical line and how it was
//! terminated". Any `BufRead` provides that through the blanket impl below.

use super::definitions::Eol;
use super::error::TokenizerError;
use crate::config::compile_time::lexical::MAX_LINE_LENGTH;
use std::io::{self, BufRead};

/// One physical line, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// `None` for a final line that ends at end of input
    pub eol: Option<Eol>,
}

pub trait LineSource {
    /// Read the next line, recognizing only the terminators in `eols`.
    ///
    /// Returns `Ok(None)` once the input is exhausted. `line` is the 0-based
    /// number of the line being read, used for error reporting.
    fn next_line(&mut self, eols: &[Eol], line: usize)
        -> Result<Option<SourceLine>, TokenizerError>;
}

fn io_error(line: usize, error: io::Error) -> TokenizerError {
    TokenizerError::Io {
        line,
        message: error.to_string(),
    }
}

fn fill<R: BufRead + ?Sized>(reader: &mut R, line: usize) -> Result<&[u8], TokenizerError> {
    loop {
        match reader.fill_buf() {
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_error(line, e)),
        }
    }
    reader.fill_buf().map_err(|e| io_error(line, e))
}

fn finish(bytes: Vec<u8>, eol: Option<Eol>, line: usize) -> Result<Option<SourceLine>, TokenizerError> {
    let text = String::from_utf8(bytes).map_err(|_| TokenizerError::InvalidEncoding { line })?;
    if text.chars().count() > MAX_LINE_LENGTH {
        return Err(TokenizerError::LineTooLong { line });
    }
    Ok(Some(SourceLine { text, eol }))
}

impl<R: BufRead + ?Sized> LineSource for R {
    fn next_line(
        &mut self,
        eols: &[Eol],
        line: usize,
    ) -> Result<Option<SourceLine>, TokenizerError> {
        let mut bytes = Vec::new();
        let mut read_any = false;

        loop {
            let buf = fill(&mut *self, line)?;
            if buf.is_empty() {
                return if read_any {
                    finish(bytes, None, line)
                } else {
                    Ok(None)
                };
            }
            read_any = true;

            let Some(index) = buf.iter().position(|b| *b == b'\r' || *b == b'\n') else {
                let len = buf.len();
                bytes.extend_from_slice(buf);
                self.consume(len);
                // UTF-8 needs at most four bytes per character
                if bytes.len() > MAX_LINE_LENGTH.saturating_mul(4) {
                    return Err(TokenizerError::LineTooLong { line });
                }
                continue;
            };

            let terminator = buf[index];
            bytes.extend_from_slice(&buf[..index]);
            self.consume(index + 1);

            if terminator == b'\n' {
                if eols.contains(&Eol::Lf) {
                    return finish(bytes, Some(Eol::Lf), line);
                }
                return Err(TokenizerError::UnsupportedEol { eol: Eol::Lf, line });
            }

            let lf_follows = fill(&mut *self, line)?.first() == Some(&b'\n');
            if lf_follows && eols.contains(&Eol::CrLf) {
                self.consume(1);
                return finish(bytes, Some(Eol::CrLf), line);
            }
            if eols.contains(&Eol::Cr) {
                return finish(bytes, Some(Eol::Cr), line);
            }

            // CR is not a terminator in this configuration: keep it as text
            bytes.push(b'\r');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::{BufReader, Read, Write};

    fn lines(input: &str, eols: &[Eol]) -> Result<Vec<SourceLine>, TokenizerError> {
        let mut reader = input.as_bytes();
        let mut out = Vec::new();
        let mut n = 0;
        while let Some(line) = reader.next_line(eols, n)? {
            out.push(line);
            n += 1;
        }
        Ok(out)
    }

    fn line(text: &str, eol: Option<Eol>) -> SourceLine {
        SourceLine {
            text: text.to_string(),
            eol,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(lines("", &[Eol::Lf]).unwrap().is_empty());
    }

    #[test]
    fn test_lf_lines() {
        let result = lines("a\nbc\n\nd", &[Eol::Lf]).unwrap();
        assert_eq!(
            result,
            vec![
                line("a", Some(Eol::Lf)),
                line("bc", Some(Eol::Lf)),
                line("", Some(Eol::Lf)),
                line("d", None),
            ]
        );
    }

    #[test]
    fn test_mixed_conventions() {
        let result = lines("a\r\nb\nc\rd", &[Eol::CrLf, Eol::Lf, Eol::Cr]).unwrap();
        assert_eq!(
            result,
            vec![
                line("a", Some(Eol::CrLf)),
                line("b", Some(Eol::Lf)),
                line("c", Some(Eol::Cr)),
                line("d", None),
            ]
        );
    }

    #[test]
    fn test_cr_is_text_when_not_a_terminator() {
        let result = lines("{\r\n}\r", &[Eol::Lf]).unwrap();
        assert_eq!(result, vec![line("{\r", Some(Eol::Lf)), line("}\r", None)]);
    }

    #[test]
    fn test_cr_only_splits_crlf_input() {
        let result = lines("a\r\n", &[Eol::Cr]);
        assert_matches!(
            result,
            Err(TokenizerError::UnsupportedEol { eol: Eol::Lf, line: 1 })
        );
    }

    #[test]
    fn test_bare_lf_rejected_when_only_crlf_enabled() {
        let result = lines("a\r\nb\n", &[Eol::CrLf]);
        assert_matches!(
            result,
            Err(TokenizerError::UnsupportedEol { eol: Eol::Lf, line: 1 })
        );
    }

    #[test]
    fn test_line_too_long() {
        let input = format!("{}\nnext\n", "x".repeat(MAX_LINE_LENGTH + 1));
        assert_matches!(lines(&input, &[Eol::Lf]), Err(TokenizerError::LineTooLong { line: 0 }));

        let input = format!("{}\n", "x".repeat(MAX_LINE_LENGTH));
        assert_eq!(lines(&input, &[Eol::Lf]).unwrap()[0].text.len(), MAX_LINE_LENGTH);
    }

    #[test]
    fn test_unterminated_line_too_long() {
        let input = "x".repeat(MAX_LINE_LENGTH * 4 + 1);
        let mut reader = input.as_bytes();
        assert_matches!(
            reader.next_line(&[Eol::Lf], 7),
            Err(TokenizerError::LineTooLong { line: 7 })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut reader: &[u8] = &[b'a', 0xFF, b'\n'];
        assert_matches!(
            reader.next_line(&[Eol::Lf], 3),
            Err(TokenizerError::InvalidEncoding { line: 3 })
        );
    }

    #[test]
    fn test_crlf_split_across_buffer_boundary() {
        // A one-byte buffer forces the CR and LF into separate fills
        let mut reader = BufReader::with_capacity(1, "ab\r\ncd".as_bytes());
        let first = reader.next_line(&[Eol::CrLf], 0).unwrap();
        assert_eq!(first, Some(line("ab", Some(Eol::CrLf))));
        let second = reader.next_line(&[Eol::CrLf], 1).unwrap();
        assert_eq!(second, Some(line("cd", None)));
        assert_eq!(reader.next_line(&[Eol::CrLf], 2).unwrap(), None);
    }

    #[test]
    fn test_multibyte_characters_survive_small_buffers() {
        let mut reader = BufReader::with_capacity(2, "héllo→\n".as_bytes());
        let result = reader.next_line(&[Eol::Lf], 0).unwrap();
        assert_eq!(result, Some(line("héllo→", Some(Eol::Lf))));
    }

    #[test]
    fn test_reads_from_file() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"one\ntwo\n").unwrap();
        std::io::Seek::rewind(&mut file).unwrap();

        let mut reader = BufReader::new(file);
        let first = reader.next_line(&[Eol::Lf], 0).unwrap();
        assert_eq!(first, Some(line("one", Some(Eol::Lf))));

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "two\n");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_io_errors_are_reported() {
        let mut reader = BufReader::new(FailingReader);
        assert_matches!(
            reader.next_line(&[Eol::Lf], 0),
            Err(TokenizerError::Io { line: 0, message }) if message.contains("unplugged")
        );
    }
}
