// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A Plan 9-style regular expression engine.
//!
//! This crate compiles a small, classic regular expression language into
//! a nondeterministic finite automaton and runs it with a Thompson-style
//! simulation that tracks submatch boundaries. Matching never backtracks,
//! so the worst case is linear in the text for a fixed expression, and a
//! compiled [`Regexp`] can be shared and used from several threads.
//!
//! The engine reads *runes* (Unicode scalar values) through the [`Input`]
//! trait: any randomly indexable rune sequence with a known size will do.
//! [`Runes`] adapts a `&[char]` and [`ByteInput`] adapts a `&[u8]`.
//!
//! # Syntax
//!
//! ```text
//! abc     literals
//! .       any rune except newline
//! [a-z0]  class: singletons and ascending ranges; [^...] negates
//! ^  $    beginning and end of line (or text)
//! e*      zero or more, preferring more
//! e+      one or more
//! e?      zero or one
//! e|f     alternation, preferring the left side on equal-length matches
//! (e)     grouping; groups are numbered from 1 in order of their '('
//! \x      the literal rune x; \n is a newline
//! \d \s \w   digit, whitespace, word rune; \D \S \W negate
//! \A \z   beginning and end of text
//! \b \B   word boundary and its negation
//! ```
//!
//! Matches are leftmost-longest: among all matches the one starting
//! earliest wins, and among those the longest.
//!
//! # Searching
//!
//! [`Regexp::match_at`] takes a start offset and wraps around: the text
//! is searched from the offset to the end, then from the beginning up to
//! the offset. This makes repeated searches behave like "find next".
//! The result is one `[start, end)` span per subexpression (span 0 is
//! the whole match), in rune offsets.
//!
//! ```
//! use regexp9::Regexp;
//!
//! let re = Regexp::new("(a+)(b+)").unwrap();
//! let spans = re.match_str("xxaabbcc", 0).unwrap();
//! assert_eq!(spans, vec![(2, 6), (2, 4), (4, 6)]);
//! ```
//!
//! # Modes
//!
//! [`Options`] selects up to three compilation modes. `delimited` treats
//! the first rune of the source as a delimiter bounding the expression,
//! as an editor command line would; [`add_delimiter`] and
//! [`remove_delimiter`] convert between the delimited and bare forms.
//! `literal` disables all metacharacters and escapes. `reverse` compiles
//! concatenation right-to-left (swapping the anchors), producing an
//! automaton that finds matches in reversed text, which is how a
//! backwards scan reuses the forward engine.
//!
//! ```
//! use regexp9::{Options, Regexp};
//!
//! let opts = Options { delimited: true, ..Options::default() };
//! let re = Regexp::with_options("/ab*/ trailing junk", opts).unwrap();
//! assert_eq!(re.expression(), "/ab*/");
//! assert!(re.match_str("xabb", 0).is_some());
//! ```

#![deny(missing_docs)]

extern crate memchr;

pub use char::Char;
pub use delim::{add_delimiter, remove_delimiter};
pub use input::{ByteInput, Input, Runes};
pub use label::{Class, Label, PerlKind};
pub use program::Regexp;

use std::error;
use std::fmt;

mod char;
mod delim;
mod input;
mod label;
mod nfa;
mod node;
mod parse;
mod pool;
mod program;

/// Compilation options. The three modes are independent and may be
/// combined; see the crate documentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// The first rune of the source is a delimiter; parsing stops at its
    /// next unescaped occurrence, and `expression()` includes both
    /// delimiters when the closing one is present.
    pub delimited: bool,
    /// Every rune is a literal: metacharacters and escapes are disabled.
    /// Combined with `delimited`, scanning still stops at the bare
    /// delimiter.
    pub literal: bool,
    /// Concatenation is compiled right-to-left and the anchors swapped,
    /// so the automaton matches against reversed input. The input itself
    /// is never reversed; that is the caller's side of the bargain.
    pub reverse: bool,
}

/// An error produced while parsing a regular expression.
///
/// `pos` is the rune offset into the original source where the offending
/// construct begins (delimiters count). Parsing has no recovery: the
/// first error wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Error {
    /// Rune offset of the offending construct.
    pub pos: usize,
    /// What went wrong.
    pub kind: ErrorKind,
}

/// The kinds of parse error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `)` with no matching `(`.
    UnmatchedParen,
    /// A `]` outside any class.
    UnmatchedBracket,
    /// The input ended inside a group.
    UnclosedParen,
    /// The input ended inside a class.
    UnclosedClass,
    /// A repetition operator, group, class or alternation with nothing
    /// to operate on.
    MissingOperand,
    /// A `|` whose right-hand side is empty.
    NoAlternative,
    /// A class range cut short by `]` or the end of input.
    IncompleteRange,
    /// A class range whose end does not exceed its start.
    RangeNotAscending,
    /// A delimited expression with no delimiter rune, or `\` as one.
    BadDelimiter,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            ErrorKind::UnmatchedParen => "unmatched ')'",
            ErrorKind::UnmatchedBracket => "unmatched ']'",
            ErrorKind::UnclosedParen => "unclosed ')'",
            ErrorKind::UnclosedClass => "unclosed ]",
            ErrorKind::MissingOperand => "missing operand",
            ErrorKind::NoAlternative => "'|' has no right hand side",
            ErrorKind::IncompleteRange => "range incomplete",
            ErrorKind::RangeNotAscending => "range not ascending",
            ErrorKind::BadDelimiter => "bad delimiter",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at rune {}", self.kind, self.pos)
    }
}

impl error::Error for Error {}
