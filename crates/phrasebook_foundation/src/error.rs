//! Error types for the Phrasebook system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Compile errors carry the 0-based character index of the offending position
//! in the grammar text.

use std::fmt;

use thiserror::Error;

/// The main error type for Phrasebook operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

/// Result alias used throughout Phrasebook.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unclosed group error.
    #[must_use]
    pub fn unclosed_group(group: GroupKind, position: usize) -> Self {
        Self::new(ErrorKind::UnclosedGroup { group, position })
    }

    /// Creates an unclosed regex error.
    #[must_use]
    pub fn unclosed_regex(position: usize) -> Self {
        Self::new(ErrorKind::UnclosedRegex { position })
    }

    /// Creates an unclosed placeholder error.
    #[must_use]
    pub fn unclosed_placeholder(position: usize) -> Self {
        Self::new(ErrorKind::UnclosedPlaceholder { position })
    }

    /// Creates an empty type name error.
    #[must_use]
    pub fn empty_type_name(position: usize) -> Self {
        Self::new(ErrorKind::EmptyTypeName { position })
    }

    /// Creates an invalid parse mark error.
    #[must_use]
    pub fn invalid_parse_mark(text: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::InvalidParseMark {
            text: text.into(),
            position,
        })
    }

    /// Creates an invalid regex error.
    #[must_use]
    pub fn invalid_regex(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::InvalidRegex {
            message: message.into(),
            position,
        })
    }

    /// Creates a dangling escape error.
    #[must_use]
    pub fn dangling_escape(position: usize) -> Self {
        Self::new(ErrorKind::DanglingEscape { position })
    }

    /// Returns the grammar position this error refers to, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.kind.position()
    }

    /// Returns true if this error was raised while compiling grammar text.
    #[must_use]
    pub fn is_compile_error(&self) -> bool {
        self.kind.position().is_some()
    }
}

/// The two bracketed group forms of the grammar notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `( ... )`
    Choice,
    /// `[ ... ]`
    Optional,
}

impl GroupKind {
    /// The character that opens this group.
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            Self::Choice => '(',
            Self::Optional => '[',
        }
    }

    /// The character that closes this group.
    #[must_use]
    pub const fn close(self) -> char {
        match self {
            Self::Choice => ')',
            Self::Optional => ']',
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice => write!(f, "choice group '('"),
            Self::Optional => write!(f, "optional group '['"),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A `(` or `[` without its closing bracket.
    #[error("unclosed {group} at index {position}")]
    UnclosedGroup {
        /// Which group was left open.
        group: GroupKind,
        /// Index of the opening bracket.
        position: usize,
    },

    /// A `<` without its closing `>`.
    #[error("unclosed regex '<' at index {position}")]
    UnclosedRegex {
        /// Index of the opening `<`.
        position: usize,
    },

    /// A `%` without its closing `%`.
    #[error("unclosed placeholder '%' at index {position}")]
    UnclosedPlaceholder {
        /// Index of the opening `%`.
        position: usize,
    },

    /// A placeholder with no type name, such as `%%` or `%*%`.
    #[error("placeholder at index {position} has no type name")]
    EmptyTypeName {
        /// Index of the opening `%`.
        position: usize,
    },

    /// A parse mark before `¦` that is not an integer.
    #[error("invalid parse mark '{text}' at index {position}: expected an integer")]
    InvalidParseMark {
        /// The text found before the separator.
        text: String,
        /// Index of the first character of the mark.
        position: usize,
    },

    /// The body of a `<...>` node is not a valid regular expression.
    #[error("invalid regex at index {position}: {message}")]
    InvalidRegex {
        /// Message from the regex compiler.
        message: String,
        /// Index of the opening `<`.
        position: usize,
    },

    /// A backslash at the very end of the grammar text.
    #[error("dangling escape at index {position}")]
    DanglingEscape {
        /// Index of the backslash.
        position: usize,
    },

    /// I/O failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Bad command-line or REPL argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns the grammar position for compile-time kinds.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnclosedGroup { position, .. }
            | Self::UnclosedRegex { position }
            | Self::UnclosedPlaceholder { position }
            | Self::EmptyTypeName { position }
            | Self::InvalidParseMark { position, .. }
            | Self::InvalidRegex { position, .. }
            | Self::DanglingEscape { position } => Some(*position),
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::InvalidArgument(_)
            | Self::Internal(_) => None,
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the grammar (registry key, file name).
    pub name: Option<String>,
    /// The grammar source text.
    pub source: Option<String>,
    /// Character index into `source`.
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grammar name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the grammar source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the character index.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "in {name}")?;
        }
        if let Some(source) = &self.source {
            writeln!(f, "  {source}")?;
            if let Some(position) = self.position {
                // Caret under the offending character.
                let pad: String = source
                    .chars()
                    .take(position)
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                writeln!(f, "  {pad}^")?;
            }
        }
        Ok(())
    }
}
