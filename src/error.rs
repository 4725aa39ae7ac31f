use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// A resolved source position: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

/// A structured parse failure: where it happened, which labels would have
/// permitted progress, what was actually found, and any user reasons.
///
/// Merging follows progress: of two errors the one further into the input
/// wins outright; at equal positions the expected sets are unioned and the
/// reasons concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub pos: Pos,
    pub expected: BTreeSet<Cow<'static, str>>,
    pub unexpected: Option<String>,
    pub reasons: Vec<String>,
}

impl SyntaxError {
    /// An error at `pos` with no information attached.
    pub fn bare(pos: Pos) -> Self {
        SyntaxError {
            pos,
            expected: BTreeSet::new(),
            unexpected: None,
            reasons: Vec::new(),
        }
    }

    /// An error expecting a single labelled item.
    pub fn expecting(pos: Pos, label: impl Into<Cow<'static, str>>) -> Self {
        let mut expected = BTreeSet::new();
        expected.insert(label.into());
        SyntaxError {
            pos,
            expected,
            unexpected: None,
            reasons: Vec::new(),
        }
    }

    /// An error carrying only a user reason.
    pub fn because(pos: Pos, reason: impl Into<String>) -> Self {
        SyntaxError {
            pos,
            expected: BTreeSet::new(),
            unexpected: None,
            reasons: vec![reason.into()],
        }
    }

    /// Record the token actually found.
    pub fn with_unexpected(mut self, found: impl Into<String>) -> Self {
        self.unexpected = Some(found.into());
        self
    }

    /// Merge two failures at possibly different positions.
    pub fn merge(self, other: SyntaxError) -> SyntaxError {
        if self.pos.offset > other.pos.offset {
            return self;
        }
        if other.pos.offset > self.pos.offset {
            return other;
        }
        let mut merged = self;
        merged.expected.extend(other.expected);
        merged.reasons.extend(other.reasons);
        if merged.unexpected.is_none() {
            merged.unexpected = other.unexpected;
        }
        merged
    }

    /// Replace the expected set with a single label.
    pub fn relabel(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.expected.clear();
        self.expected.insert(label.into());
        self
    }

    /// Drop the expected set entirely.
    pub fn hide_expected(mut self) -> Self {
        self.expected.clear();
        self
    }

    /// Append a user reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Move the error to a different position, keeping its content.
    pub fn relocate(mut self, pos: Pos) -> Self {
        self.pos = pos;
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}", self.pos)?;
        if let Some(found) = &self.unexpected {
            write!(f, ": unexpected {}", found)?;
        }
        if !self.expected.is_empty() {
            let labels: Vec<&str> = self.expected.iter().map(|l| l.as_ref()).collect();
            write!(f, "; expected {}", labels.join(" or "))?;
        }
        for reason in &self.reasons {
            write!(f, "; {}", reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Programmer errors that abort a run immediately.
///
/// These are never recovered by ordered choice: a grammar that trips one is
/// wrong regardless of which alternative it happened inside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A register was read before anything was written to it in this run.
    #[error("register read before first write at {pos}")]
    UnfilledRegister { pos: Pos },
    /// A repeated parser succeeded without consuming input, which would
    /// loop forever.
    #[error("non-consumptive iteration at {pos}: repeated parser must consume input")]
    NonConsumptiveIteration { pos: Pos },
    /// The same register was bound by two simultaneously active runs.
    #[error("register is already bound to another active run")]
    RegisterReuse,
}

/// What went wrong: a recoverable parse failure or an aborting fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Syntax(SyntaxError),
    Fault(Fault),
}

/// Internal failure value threaded through every combinator.
///
/// `consumed` is the backtracking contract: ordered choice only tries its
/// right alternative when the left failed with `consumed == false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub consumed: bool,
    pub kind: FailureKind,
}

impl Failure {
    pub fn syntax(error: SyntaxError, consumed: bool) -> Self {
        Failure {
            consumed,
            kind: FailureKind::Syntax(error),
        }
    }

    pub fn fault(fault: Fault) -> Self {
        Failure {
            consumed: false,
            kind: FailureKind::Fault(fault),
        }
    }

    /// Whether this failure aborts the run outright.
    pub fn is_fault(&self) -> bool {
        matches!(self.kind, FailureKind::Fault(_))
    }

    /// Force the consumed bit on, used when a failure happens to the right
    /// of input already consumed by the same compound parser.
    pub fn after_consuming(mut self, earlier_consumed: bool) -> Self {
        self.consumed |= earlier_consumed;
        self
    }

    /// Rewrite the syntax error inside, leaving faults untouched.
    pub fn map_syntax(mut self, f: impl FnOnce(SyntaxError) -> SyntaxError) -> Self {
        if let FailureKind::Syntax(error) = self.kind {
            self.kind = FailureKind::Syntax(f(error));
        }
        self
    }
}

/// The error returned from a top-level run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(SyntaxError),
    #[error("{0}")]
    Fault(Fault),
}

impl From<Failure> for ParseError {
    fn from(failure: Failure) -> Self {
        match failure.kind {
            FailureKind::Syntax(error) => ParseError::Syntax(error),
            FailureKind::Fault(fault) => ParseError::Fault(fault),
        }
    }
}
