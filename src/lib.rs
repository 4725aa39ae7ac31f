//! # CharComb - Parser Combinator Library
//!
//! A character-level parser combinator library with LL(1) ordered choice,
//! explicit opt-in backtracking, and per-run mutable registers.
//!
//! CharComb provides composable, type-safe parsers that combine into
//! complex parsing logic from simple building blocks. The library
//! emphasizes:
//!
//! - **Zero panics**: All parsing errors are handled through `Result` types
//! - **Predictable backtracking**: a failing parser reports whether it
//!   consumed input; ordered choice only falls through on non-consuming
//!   failures, and [`atomic`](atomic::atomic) opts into full backtracking
//! - **Rich error reporting**: structured errors with line, column,
//!   expected sets, unexpected tokens, and user reasons, merged by progress
//! - **Context-sensitive parsing**: typed registers scoped to a single run
//!   support counting grammars, indentation rules, and similar state
//!
//! ```
//! use charcomb::many::many;
//! use charcomb::run::parse;
//! use charcomb::satisfy::satisfy_as;
//!
//! let digits = many(satisfy_as(|c| c.is_ascii_digit(), "digit"));
//! assert_eq!(parse(&digits, "123").unwrap(), vec!['1', '2', '3']);
//! ```

pub mod and;
pub mod atomic;
pub mod choice;
pub mod cursor;
pub mod end_by;
pub mod eof;
pub mod error;
pub mod exactly;
pub mod explain;
pub mod fail;
pub mod filter;
pub mod flow;
pub mod item;
pub mod label;
pub mod lazy;
pub mod lift;
pub mod look_ahead;
pub mod many;
pub mod many_until;
pub mod map;
pub mod not_followed_by;
pub mod or;
pub mod parser;
pub mod pure;
pub mod register;
pub mod run;
pub mod satisfy;
pub mod select;
pub mod sep_by;
pub mod sep_end_by;
pub mod some;
pub mod state;
pub mod string;
pub mod then;

pub use atomic::{atomic, Atomic, AtomicExt};
pub use cursor::Cursor;
pub use error::{Failure, FailureKind, Fault, ParseError, Pos, SyntaxError};
pub use parser::{Parser, Step};
pub use register::Reg;
pub use run::{parse, parse_fully};
pub use state::RunState;
