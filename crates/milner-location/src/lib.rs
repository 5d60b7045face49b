//! This module describes where things come from. There are two types of absolute positions using
//! indexes in the raw string that are [Byte] and [ByteRange], and two types of positions that are
//! [Point] and [Range] that have line and column numbers instead, as a better way to generate
//! error messages. Every node of a tree also gets a [NodeId] so that errors can point back to the
//! node that produced them even when there is no source text at all.

use core::fmt;
use std::fmt::Display;

/// Byte position in a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Byte(pub usize);

impl Byte {
    /// Discovers a [Point] that is a line and column structure using the index inside the source
    /// code.
    pub fn locate(&self, code: &str) -> Point {
        let mut acc = 0;
        for (line, code_line) in code.lines().enumerate() {
            if acc + code_line.len() + 1 > self.0 {
                return Point {
                    line,
                    column: self.0 - acc,
                };
            }
            acc += code_line.len() + 1;
        }
        Point::default()
    }
}

/// Two byte positions inside a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteRange(pub Byte, pub Byte);

impl ByteRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self(Byte(start), Byte(end))
    }

    pub fn locate(&self, code: &str) -> Range {
        Range(self.0.locate(code), self.1.locate(code))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == self.1
    }
}

impl Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.0 .0, self.1 .0)
    }
}

/// Line and column position inside a source file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// Two line and column positions ([Point]s) inside a source file.
#[derive(Debug, PartialEq, Eq)]
pub struct Range(pub Point, pub Point);

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 != self.1 {
            write!(f, "{}~{}", self.0, self.1)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Identifier of a single node inside a tree. Identifiers are handed out by whoever builds the
/// tree and are only meaningful inside that tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node came from: its identifier and the span of source it covers (empty when the tree
/// was built without source text).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Origin {
    pub id: NodeId,
    pub location: ByteRange,
}

impl Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "node {}", self.id)
        } else {
            write!(f, "node {} at {}", self.id, self.location)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub origin: Origin,
    pub data: T,
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl<T> Located<T> {
    pub const fn new(origin: Origin, data: T) -> Self {
        Self { origin, data }
    }

    pub const fn id(&self) -> NodeId {
        self.origin.id
    }

    pub const fn location(&self) -> ByteRange {
        self.origin.location
    }
}
