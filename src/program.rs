// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use input::{Input, Runes};
use label::Label;
use nfa::{Nfa, NfaCache};
use node::Nodes;
use parse;
use pool::Pool;
use {Error, Options};

/// A compiled regular expression.
///
/// A `Regexp` is immutable once compiled and may be shared and matched
/// from several threads at once. (Well, almost immutable: matching
/// engines cache their allocations in a small internal pool, but that is
/// interior mutability the caller cannot observe.)
#[derive(Debug)]
pub struct Regexp {
    /// The source text the parser consumed, delimiters included.
    expr: String,
    /// The automaton. Node indices are dense, in breadth-first order
    /// from the start node, which is index 0.
    pub(crate) nodes: Nodes,
    /// The accept node.
    pub(crate) end: usize,
    /// The number of subexpressions, counting subexpression 0 (the whole
    /// match).
    nsub: usize,
    /// The label of the one consuming edge every match must begin with,
    /// when the expression has one; used to skip ahead in the input.
    pub(crate) lit: Option<Label>,
    /// Cached matching-engine allocations.
    cache: Pool<NfaCache>,
}

impl Regexp {
    /// Compiles a regular expression with the default options.
    pub fn new(pattern: &str) -> Result<Regexp, Error> {
        Regexp::with_options(pattern, Options::default())
    }

    /// Compiles a regular expression under the given options.
    pub fn with_options(pattern: &str, opts: Options) -> Result<Regexp, Error> {
        let runes: Vec<char> = pattern.chars().collect();
        Regexp::from_runes(&runes, opts)
    }

    /// Compiles a regular expression from an explicit rune sequence.
    pub fn from_runes(runes: &[char], opts: Options) -> Result<Regexp, Error> {
        let parsed = parse::parse(runes, opts)?;
        let (nodes, end) = parsed.nodes.renumber(parsed.start, parsed.end);
        let lit = nodes.literal_prefix(0);
        let (nnode, nsub) = (nodes.len(), parsed.nsub);
        let create = move || NfaCache::new(nnode, nsub);
        Ok(Regexp {
            expr: runes[..parsed.consumed].iter().cloned().collect(),
            nodes: nodes,
            end: end,
            nsub: nsub,
            lit: lit,
            cache: Pool::new(Box::new(create)),
        })
    }

    /// Returns the portion of the source the compiler consumed.
    ///
    /// Without the delimited option this is the whole source. With it,
    /// the text runs through the closing delimiter when one was present,
    /// and to the end of the source otherwise.
    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// Returns the number of subexpressions, counting subexpression 0,
    /// the whole match. `match_at` results have exactly this many spans.
    pub fn nsub(&self) -> usize {
        self.nsub
    }

    /// Searches `input` for a match beginning at or after `from`,
    /// wrapping around: if nothing matches in `[from, size]`, the search
    /// resumes with start offsets in `[0, from)`. Returns one `[start,
    /// end)` rune-offset span per subexpression, the whole match first.
    /// A subexpression that took no part in the match reports `(0, 0)`.
    pub fn match_at<I: Input>(&self, input: &I, from: i64) -> Option<Vec<(i64, i64)>> {
        let from = if from < 0 { 0 } else { from };
        let mut cache = self.cache.get();
        let m = Nfa::exec(self, &mut *cache, input, from, input.size());
        if m.is_some() || from == 0 {
            return m;
        }
        Nfa::exec(self, &mut *cache, input, 0, from)
    }

    /// Returns true iff the expression matches somewhere in `input`,
    /// searching from `from` with wrap-around.
    pub fn is_match<I: Input>(&self, input: &I, from: i64) -> bool {
        self.match_at(input, from).is_some()
    }

    /// Convenience for matching against a `&str`: collects the text into
    /// runes first. All reported spans are rune offsets, not byte
    /// offsets.
    pub fn match_str(&self, text: &str, from: i64) -> Option<Vec<(i64, i64)>> {
        let runes: Vec<char> = text.chars().collect();
        self.match_at(&Runes::new(&runes), from)
    }
}

impl Clone for Regexp {
    fn clone(&self) -> Regexp {
        let (nnode, nsub) = (self.nodes.len(), self.nsub);
        let create = move || NfaCache::new(nnode, nsub);
        Regexp {
            expr: self.expr.clone(),
            nodes: self.nodes.clone(),
            end: self.end,
            nsub: self.nsub,
            lit: self.lit.clone(),
            cache: Pool::new(Box::new(create)),
        }
    }
}
