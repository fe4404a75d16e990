//! Path expression tokenizer.
//!
//! ```text
//! path         = [ "/" ] [ segment-list ] [ ":" attr-name ]
//! segment-list = segment ( "/" segment )*
//! segment      = ".." | name
//! name         = 1*(any-char except "/" and ":")
//! attr-name    = *(any-char except "/")
//! ```
//!
//! Tokens are produced lazily, left to right, each with the byte offset of
//! the text it came from so a failed lookup can report what was left.
//! Malformed input (an empty name between delimiters, a `/` inside the
//! attribute name) trips a debug assertion; release builds hand the odd name
//! to the lookup, which then misses.

const NODE_DELIMITER: char = '/';
const ATTR_DELIMITER: char = ':';
const PARENT: &str = "..";

/// One token of a path expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    /// The leading `/` of an absolute path.
    Root,
    /// Descend to the first child with this name.
    Child(&'p str),
    /// `..`: move to the parent.
    Parent,
    /// The terminal `:name` clause.
    Attribute(&'p str),
}

/// A segment and the offset of its text in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'p> {
    pub segment: Segment<'p>,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Nodes,
    Attribute,
    Done,
}

/// Iterator over the [`Step`]s of a path.
#[derive(Debug, Clone)]
pub struct Segments<'p> {
    path: &'p str,
    pos: usize,
    state: State,
}

impl<'p> Segments<'p> {
    pub fn new(path: &'p str) -> Self {
        Self {
            path,
            pos: 0,
            state: State::Start,
        }
    }

    /// The text not consumed yet.
    pub fn remaining(&self) -> &'p str {
        &self.path[self.pos..]
    }

    fn attribute(&mut self) -> Step<'p> {
        let offset = self.pos;
        let name = self.remaining();
        debug_assert!(
            !name.contains(NODE_DELIMITER),
            "attribute clause must end the path: `{}`",
            self.path
        );
        self.pos = self.path.len();
        self.state = State::Done;
        Step {
            segment: Segment::Attribute(name),
            offset,
        }
    }
}

impl<'p> Iterator for Segments<'p> {
    type Item = Step<'p>;

    fn next(&mut self) -> Option<Step<'p>> {
        loop {
            match self.state {
                State::Done => return None,
                State::Attribute => return Some(self.attribute()),
                State::Start => {
                    self.state = State::Nodes;
                    if self.path.starts_with(NODE_DELIMITER) {
                        self.pos = NODE_DELIMITER.len_utf8();
                        return Some(Step {
                            segment: Segment::Root,
                            offset: 0,
                        });
                    }
                }
                State::Nodes => {
                    if self.pos >= self.path.len() {
                        self.state = State::Done;
                        return None;
                    }

                    let offset = self.pos;
                    let rest = self.remaining();
                    let end = rest
                        .find([NODE_DELIMITER, ATTR_DELIMITER])
                        .unwrap_or(rest.len());
                    let token = &rest[..end];
                    let delimiter = rest[end..].chars().next();

                    self.pos += end + delimiter.map_or(0, char::len_utf8);

                    if delimiter == Some(ATTR_DELIMITER) {
                        self.state = State::Attribute;
                        // `:name` right after the start or a `/`: no descent
                        if token.is_empty() {
                            continue;
                        }
                    }

                    debug_assert!(
                        !token.is_empty(),
                        "empty path segment in `{}`",
                        self.path
                    );

                    let segment = if token == PARENT {
                        Segment::Parent
                    } else {
                        Segment::Child(token)
                    };
                    return Some(Step { segment, offset });
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}
