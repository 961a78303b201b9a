//! Source files and position lookup.
//!
//! Every file added to a [`SourceMap`] is assigned a disjoint range of global
//! byte offsets. Tokens and AST nodes only store [`Span`]s; the map turns them
//! back into file names, line numbers, columns and line text when a diagnostic
//! or stack trace is rendered.

use std::fmt;

use crate::Span;

/// Index of a file in a [`SourceMap`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FileId(u32);

/// One source file with precomputed line starts.
#[derive(Debug)]
pub struct SourceFile {
    name: String,
    text: String,
    start_pos: u32,
    /// Offsets of line starts relative to `start_pos`.
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(name: String, text: String, start_pos: u32) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(clamp_u32(i + 1));
            }
        }
        SourceFile {
            name,
            text,
            start_pos,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Global offset of the first byte of this file.
    pub fn start_pos(&self) -> u32 {
        self.start_pos
    }

    /// Global offset one past the last byte of this file.
    pub fn end_pos(&self) -> u32 {
        self.start_pos + clamp_u32(self.text.len())
    }

    /// Span covering the whole file.
    pub fn span(&self) -> Span {
        Span::new(self.start_pos, self.end_pos())
    }

    /// Text of the 1-based line `line`, without its trailing newline.
    pub fn line(&self, line: u32) -> &str {
        let Some(idx) = (line as usize).checked_sub(1) else {
            return "";
        };
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |&next| next as usize - 1);
        let text = &self.text[start as usize..end];
        text.strip_suffix('\r').unwrap_or(text)
    }

    /// Number of lines in the file.
    pub fn line_count(&self) -> u32 {
        clamp_u32(self.line_starts.len())
    }

    /// Source text covered by `span`, clamped to this file.
    pub fn slice(&self, span: Span) -> &str {
        let len = self.text.len();
        let start = (span.start.saturating_sub(self.start_pos) as usize).min(len);
        let end = (span.end.saturating_sub(self.start_pos) as usize).clamp(start, len);
        self.text.get(start..end).unwrap_or("")
    }

    /// 1-based line and column of a global offset.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, pos: u32) -> (u32, u32) {
        let rel = pos.saturating_sub(self.start_pos).min(clamp_u32(self.text.len()));
        let idx = match self.line_starts.binary_search(&rel) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[idx] as usize;
        let prefix = self.text.get(line_start..rel as usize).unwrap_or("");
        (clamp_u32(idx + 1), clamp_u32(prefix.chars().count() + 1))
    }
}

/// A resolved source position.
#[derive(Copy, Clone, Debug)]
pub struct Loc<'a> {
    pub file: &'a SourceFile,
    pub line: u32,
    pub column: u32,
}

impl<'a> Loc<'a> {
    /// Text of the line this location is on.
    pub fn line_text(&self) -> &'a str {
        self.file.line(self.line)
    }
}

impl fmt::Display for Loc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.name.is_empty() {
            write!(f, "{}:", self.file.name)?;
        }
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Owner of all source text seen by one interpreter session.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and return its id.
    ///
    /// Files are separated by one unused offset so that an end-of-file span
    /// never overlaps the start of the next file.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let start_pos = self.files.last().map_or(0, |f| f.end_pos() + 1);
        let id = FileId(clamp_u32(self.files.len()));
        self.files
            .push(SourceFile::new(name.into(), text.into(), start_pos));
        id
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    /// File containing a global offset. End-of-file offsets belong to their file.
    pub fn lookup_file(&self, pos: u32) -> Option<&SourceFile> {
        let idx = self.files.partition_point(|f| f.start_pos <= pos);
        let file = self.files.get(idx.checked_sub(1)?)?;
        (pos <= file.end_pos()).then_some(file)
    }

    /// Resolve a global offset to file, line and column.
    pub fn lookup(&self, pos: u32) -> Option<Loc<'_>> {
        let file = self.lookup_file(pos)?;
        let (line, column) = file.line_col(pos);
        Some(Loc { file, line, column })
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.lookup_file(span.start)
            .map_or("", |file| file.slice(span))
    }
}

fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
