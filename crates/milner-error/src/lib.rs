//! Rendering of errors for humans. The checker never prints anything, it hands out errors that
//! know where they came from and this crate turns them into reports, either with an excerpt of
//! the source code or, when the tree was built without source, with the offending node.

use core::fmt;
use std::fmt::Display;

use milner_location::{Origin, Point, Range};

pub enum Message {
    Static(String),
    Dynamic(Box<dyn Fn() -> String>),
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(s) => write!(f, "{}", s),
            Self::Dynamic(d) => write!(f, "{}", d()),
        }
    }
}

pub struct Error {
    message: Message,
    origin: Origin,
    notes: Vec<String>,
}

impl Error {
    pub fn new(message: impl Into<String>, origin: Origin) -> Self {
        Self {
            message: Message::Static(message.into()),
            origin,
            notes: Vec::new(),
        }
    }

    pub fn new_dyn(message: impl Display + 'static, origin: Origin) -> Self {
        Self {
            message: Message::Dynamic(Box::new(move || message.to_string())),
            origin,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub const fn origin(&self) -> Origin {
        self.origin
    }

    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Attaches the source code so the report can show the lines where the error happened.
    pub fn with_code<'a>(self, code: &'a str, file_name: &'a str) -> ErrorWithCode<'a> {
        ErrorWithCode {
            err: self,
            code,
            file_name,
        }
    }

    /// Attaches the node that caused the error, used when there is no source text.
    pub fn with_node<'a>(self, node: &'a dyn Display) -> ErrorWithNode<'a> {
        ErrorWithNode { err: self, node }
    }

    fn write_notes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in &self.notes {
            writeln!(f, "{:>PAD$} = note: {note}", "")?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[error]: {} ({})", self.message, self.origin)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.message.to_string())
            .field("origin", &self.origin)
            .field("notes", &self.notes)
            .finish()
    }
}

const PAD: usize = 3;

pub struct ErrorWithCode<'a> {
    err: Error,
    code: &'a str,
    file_name: &'a str,
}

impl<'a> Display for ErrorWithCode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            err,
            code,
            file_name,
        } = self;

        let Range(start @ Point { line, column }, end) = err.origin.location.locate(code);

        writeln!(f, "\n[error]: {}\n", err.message)?;
        writeln!(f, "{:>PAD$} ┌─> {file_name}:{start}", "")?;
        writeln!(f, "{:>PAD$} │", "")?;

        for (line, line_number) in code.lines().skip(line).zip(line..=end.line) {
            writeln!(f, "{:>PAD$} │ {}", line_number + 1, line)?;
        }

        if line == end.line && end.column > column {
            let size = end.column - column;
            writeln!(f, "{:>PAD$} │ {:>column$}{:^>size$}", "", "", "")?;
        }

        writeln!(f, "{:>PAD$} │", "")?;
        err.write_notes(f)
    }
}

pub struct ErrorWithNode<'a> {
    err: Error,
    node: &'a dyn Display,
}

impl<'a> Display for ErrorWithNode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { err, node } = self;

        writeln!(f, "\n[error]: {}\n", err.message)?;
        writeln!(f, "{:>PAD$} ┌─> {}", "", err.origin)?;
        writeln!(f, "{:>PAD$} │", "")?;
        writeln!(f, "{:>PAD$} │ {node}", "")?;
        writeln!(f, "{:>PAD$} │", "")?;
        err.write_notes(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milner_location::{ByteRange, NodeId};

    fn origin(start: usize, end: usize) -> Origin {
        Origin {
            id: NodeId(7),
            location: ByteRange::new(start, end),
        }
    }

    #[test]
    fn underlines_the_offending_span() {
        let code = "let x = 1;\nif x then 1 else 2";
        let report = Error::new("type mismatch between 'Int' and 'Bool'", origin(14, 15))
            .with_code(code, "main.ml")
            .to_string();

        assert!(report.contains("[error]: type mismatch between 'Int' and 'Bool'"));
        assert!(report.contains("┌─> main.ml:2:4"));
        assert!(report.contains("  2 │ if x then 1 else 2"));
        assert!(report.contains("    │    ^"));
    }

    #[test]
    fn falls_back_to_the_node_without_source() {
        let report = Error::new("unbound variable 'y'", origin(0, 0))
            .with_note("names are looked up in the enclosing scopes")
            .with_node(&"(|x| y)")
            .to_string();

        assert!(report.contains("┌─> node #7"));
        assert!(report.contains("    │ (|x| y)"));
        assert!(report.contains("= note: names are looked up in the enclosing scopes"));
    }

    #[test]
    fn dynamic_messages_are_rendered_lazily() {
        let err = Error::new_dyn(42, origin(0, 0));
        assert_eq!(err.message(), "42");
    }
}
