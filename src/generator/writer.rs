/// Indentation-aware line buffer owned by a single emission rule.
///
/// Rules never share a buffer: each builds its own and returns the finished
/// text, and the unit assembler concatenates the results in order.
#[derive(Debug, Default)]
pub struct CodeBuf {
    out: String,
    depth: usize,
}

const INDENT: &str = "    ";

/// Rust string literal for `s`, quotes and escapes included.
pub fn str_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Like [`str_literal`], for use as a `format!`/`panic!` format string:
/// braces are doubled so they print literally.
pub fn fmt_literal(s: &str) -> String {
    str_literal(&s.replace('{', "{{").replace('}', "}}"))
}

impl CodeBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Append a line and indent the following ones (`fn f() {`).
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and append the closing line (`}`).
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Append already-rendered text, re-indented to the current depth.
    pub fn block(&mut self, text: &str) -> &mut Self {
        for l in text.lines() {
            self.line(l);
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}
