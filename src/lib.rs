//! `lexis` - a reusable lexical analysis core.
//!
//! This crate is the scanning half of a parser stack: you give it a
//! declarative set of token rules and an input text, and it gives back a
//! stream of tokens with byte-accurate source spans, together with
//! structured diagnostics for everything that went wrong along the way.
//!
//! The goals, in order:
//!
//! - **Predictably greedy.** At every position the longest match wins;
//!   equal-length conflicts (keyword vs. identifier, classically) are broken
//!   by explicit rule priorities, deterministically.
//!
//! - **Never give up.** Lexical errors are not exceptions. Unrecognized
//!   input produces a diagnostic and scanning resumes one character later;
//!   rules can also be declared as *error patterns*, which recognize known
//!   mistakes (an unterminated string, say) and report them with a useful
//!   message instead of dissolving into character soup.
//!
//! - **Bring your own kinds.** The engine is parametric over the token-kind
//!   type: any type with equality, a name, and a designated end-of-file
//!   value works. There is also a dynamic flavor that mints kinds from
//!   symbolic names at build time, for when defining an enum is more
//!   ceremony than the job deserves.
//!
//! Internally, matching is anchored searches with [`regex_automata`], so
//! rule patterns have the full usual syntax (`\d`, `\p{L}`, non-greedy
//! repetition, and so on).
//!
//! # Quick start
//!
//! ```
//! use lexis::dsl::DynamicLexerBuilder;
//! use lexis::SourceMap;
//! use lexis::TokenKind;
//!
//! let lexer = DynamicLexerBuilder::new()
//!   .token_with_priority("kw_if", "if", 10)?
//!   .token("ident", "[a-zA-Z_][a-zA-Z0-9_]*")?
//!   .token("number", r"\d+")?
//!   .skip("ws", r"\s+")?
//!   .error("bad_str", r#""[^"\n]*$"#, "unterminated_string")?
//!   .build();
//!
//! let mut map = SourceMap::new();
//! let id = map.add("demo.src", "if counter 42");
//!
//! let (tokens, diagnostics) = lexer.scan(id, &map);
//! assert!(diagnostics.is_empty());
//!
//! let names: Vec<_> =
//!   tokens.iter().map(|t| t.kind().name().to_string()).collect();
//! assert_eq!(names, ["kw_if", "ident", "number", "EOF"]);
//! # Ok::<(), lexis::dsl::BuildError>(())
//! ```
//!
//! The token vector always ends with a zero-length `EOF` sentinel, so
//! downstream parsers never special-case the end of the stream. Feed the
//! tokens to a [`TokenStream`] for peeking, push-back, and `expect`-style
//! consumption, or to a [`NestingTracker`] to validate paired delimiters.
//!
//! For a fixed grammar, the typed flavor trades the string names for an
//! enum: implement [`TokenKind`] and [`NamedKind`] for your kind type and
//! build with [`LexerBuilder`]. The scanning engine is identical.

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

macro_rules! bug {
  ($fmt:literal $($arg:tt)*) => {{
    panic!(concat!("lexis: ", $fmt, "; this is a bug") $($arg)*)
  }};
}

pub(crate) use format_args as f;

pub mod dsl;
pub mod file;
pub mod nesting;
pub mod report;
pub mod rule;
pub mod scanner;
pub mod token;

pub use crate::{
  dsl::{DynamicKind, DynamicLexer, DynamicLexerBuilder, Lexer, LexerBuilder},
  file::{Position, SourceId, SourceMap, Span},
  nesting::NestingTracker,
  report::{Diagnostic, Severity},
  rule::{NamedKind, Rule, RuleSet, TokenKind},
  scanner::Scanner,
  token::{Token, TokenStream},
};
