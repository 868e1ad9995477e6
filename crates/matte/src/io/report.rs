use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const BASE64_START: &str = "BASE64_START";
pub const BASE64_END: &str = "BASE64_END";

/// Writes image bytes as a single base64 line between sentinel lines
pub struct Base64Reporter<W: Write> {
    writer: W,
}

impl<W: Write> Base64Reporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Standard alphabet with padding, no line wrapping
    pub fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    pub fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        writeln!(self.writer, "{BASE64_START}")?;
        writeln!(self.writer, "{}", Self::encode(bytes))?;
        writeln!(self.writer, "{BASE64_END}")?;
        self.writer.flush()
    }

    /// Read a file back from disk and emit its bytes
    pub fn emit_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let bytes = fs::read(path)?;
        self.emit(&bytes)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl Base64Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_layout() {
        let mut reporter = Base64Reporter::new(Vec::new());
        reporter.emit(b"hello, matte").expect("Should write to vec");
        let text = String::from_utf8(reporter.into_inner()).expect("Should be utf-8");

        assert_eq!(text, "BASE64_START\naGVsbG8sIG1hdHRl\nBASE64_END\n");
    }

    #[test]
    fn test_long_input_not_wrapped() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let mut reporter = Base64Reporter::new(Vec::new());
        reporter.emit(&bytes).expect("Should write to vec");
        let text = String::from_utf8(reporter.into_inner()).expect("Should be utf-8");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], BASE64_START);
        assert_eq!(lines[2], BASE64_END);
        assert_eq!(STANDARD.decode(lines[1]).expect("Should decode"), bytes);
    }

    #[test]
    fn test_empty_input() {
        let mut reporter = Base64Reporter::new(Vec::new());
        reporter.emit(&[]).expect("Should write to vec");
        assert_eq!(reporter.into_inner(), b"BASE64_START\n\nBASE64_END\n");
    }

    #[test]
    fn test_emit_missing_file() {
        let mut reporter = Base64Reporter::new(Vec::new());
        let path = std::env::temp_dir().join("matte-report-missing.bin");
        assert!(reporter.emit_file(path).is_err());
        assert!(reporter.into_inner().is_empty());
    }
}
