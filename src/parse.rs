// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Recursive descent over the grammar
//
//     alternate := concat ('|' concat)*
//     concat    := repeat+
//     repeat    := atom ('*' | '+' | '?')*
//     atom      := LITERAL | CLASS | '.' | '^' | '$' | '(' alternate ')'
//
// emitting automaton fragments bottom-up. The lexer layers the delimiter,
// literal and escape rules underneath so the grammar itself stays
// oblivious to them.

use label::{Class, Label, PerlKind};
use node::{Frag, NodeIdx, Nodes};
use {Error, ErrorKind, Options};

/// The outcome of parsing: a node arena plus the facts the compiled
/// expression needs to remember.
#[derive(Debug)]
pub struct Parsed {
    /// The builder arena, not yet renumbered.
    pub nodes: Nodes,
    /// The root start node (entry marker of subexpression 0).
    pub start: NodeIdx,
    /// The root accept node (exit marker of subexpression 0).
    pub end: NodeIdx,
    /// Number of subexpressions, counting the whole match.
    pub nsub: usize,
    /// Number of source runes consumed, including delimiters.
    pub consumed: usize,
}

/// Parses `runes` under `opts` into an automaton fragment wrapped as
/// subexpression 0.
pub fn parse(runes: &[char], opts: Options) -> Result<Parsed, Error> {
    let mut delim = None;
    let mut at = 0;
    if opts.delimited {
        match runes.first() {
            None => return err(0, ErrorKind::BadDelimiter),
            Some(&'\\') => return err(0, ErrorKind::BadDelimiter),
            Some(&d) => {
                delim = Some(d);
                at = 1;
            }
        }
    }
    let mut p = Parser {
        lex: Lexer {
            runes: runes,
            pos: at,
            prev: at,
            delim: delim,
            literal: opts.literal,
            closing: None,
        },
        nodes: Nodes::new(),
        nsub: 1,
        reverse: opts.reverse,
    };
    let frag = p.alternate()?;
    let t = p.lex.next();
    match t.tok {
        Tok::Eof => {}
        Tok::Meta(')') => return err(t.pos, ErrorKind::UnmatchedParen),
        _ => unreachable!("BUG: parse stopped at {:?}", t.tok),
    }
    let frag = match frag {
        Some(f) => f,
        None => p.nodes.empty(),
    };
    let root = p.nodes.group(frag, 0);
    let consumed = if opts.delimited {
        match p.lex.closing {
            Some(q) => q + 1,
            None => runes.len(),
        }
    } else {
        runes.len()
    };
    Ok(Parsed {
        nodes: p.nodes,
        start: root.start,
        end: root.end,
        nsub: p.nsub,
        consumed: consumed,
    })
}

/// Returns true iff `c` is one of the metacharacters.
pub fn is_meta(c: char) -> bool {
    match c {
        '|' | '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' => true,
        _ => false,
    }
}

fn err<T>(pos: usize, kind: ErrorKind) -> Result<T, Error> {
    Err(Error { pos: pos, kind: kind })
}

#[derive(Clone, Debug, PartialEq)]
enum Tok {
    /// End of input, or the closing delimiter.
    Eof,
    /// A literal rune.
    Rune(char),
    /// An unescaped metacharacter (or an escaped one, when the delimiter
    /// is that metacharacter).
    Meta(char),
    /// A `\d`-family escape.
    Perl(PerlKind, bool),
    /// A `\A`, `\z`, `\b` or `\B` escape, already shaped as a label.
    Look(Label),
}

#[derive(Clone, Debug)]
struct Token {
    tok: Tok,
    pos: usize,
}

/// Reads tokens one at a time with a one-token pushback.
struct Lexer<'a> {
    runes: &'a [char],
    pos: usize,
    prev: usize,
    delim: Option<char>,
    literal: bool,
    /// Offset of the closing delimiter, once one is seen.
    closing: Option<usize>,
}

impl<'a> Lexer<'a> {
    fn next(&mut self) -> Token {
        self.prev = self.pos;
        let start = self.pos;
        if self.pos >= self.runes.len() {
            return Token { tok: Tok::Eof, pos: start };
        }
        let c = self.runes[self.pos];
        if self.literal {
            if self.delim == Some(c) {
                if self.closing.is_none() {
                    self.closing = Some(self.pos);
                }
                return Token { tok: Tok::Eof, pos: start };
            }
            self.pos += 1;
            return Token { tok: Tok::Rune(c), pos: start };
        }
        if self.delim == Some(c) {
            // an unescaped delimiter ends the expression, metacharacter
            // or not
            if self.closing.is_none() {
                self.closing = Some(self.pos);
            }
            return Token { tok: Tok::Eof, pos: start };
        }
        if c == '\\' {
            if self.pos + 1 >= self.runes.len() {
                // a trailing backslash is itself a literal
                self.pos += 1;
                return Token { tok: Tok::Rune('\\'), pos: start };
            }
            let e = self.runes[self.pos + 1];
            self.pos += 2;
            let tok = if Some(e) == self.delim {
                // escaping the delimiter makes it a plain rune again,
                // unless the delimiter is a metacharacter: then the
                // normal rule inverts and the escape selects the meta
                // reading
                if is_meta(e) {
                    Tok::Meta(e)
                } else {
                    Tok::Rune(e)
                }
            } else {
                match e {
                    'n' => Tok::Rune('\n'),
                    'd' => Tok::Perl(PerlKind::Digit, false),
                    'D' => Tok::Perl(PerlKind::Digit, true),
                    's' => Tok::Perl(PerlKind::Space, false),
                    'S' => Tok::Perl(PerlKind::Space, true),
                    'w' => Tok::Perl(PerlKind::Word, false),
                    'W' => Tok::Perl(PerlKind::Word, true),
                    'A' => Tok::Look(Label::BeginText),
                    'z' => Tok::Look(Label::EndText),
                    'b' => Tok::Look(Label::WordBoundary),
                    'B' => Tok::Look(Label::NotWordBoundary),
                    _ => Tok::Rune(e),
                }
            };
            return Token { tok: tok, pos: start };
        }
        self.pos += 1;
        if is_meta(c) {
            Token { tok: Tok::Meta(c), pos: start }
        } else {
            Token { tok: Tok::Rune(c), pos: start }
        }
    }

    /// Restores the position saved by the last `next`.
    fn back(&mut self) {
        self.pos = self.prev;
    }

    /// Reads one raw rune for the class parser, which ignores the
    /// delimiter convention entirely. Escapes reduce to literal runes
    /// (`\n` to a newline); the second element reports whether an escape
    /// was used. Returns `None` at end of input.
    fn class_rune(&mut self) -> Option<(char, bool)> {
        if self.pos >= self.runes.len() {
            return None;
        }
        let c = self.runes[self.pos];
        self.pos += 1;
        if c != '\\' || self.pos >= self.runes.len() {
            return Some((c, false));
        }
        let e = self.runes[self.pos];
        self.pos += 1;
        Some((if e == 'n' { '\n' } else { e }, true))
    }
}

struct Parser<'a> {
    lex: Lexer<'a>,
    nodes: Nodes,
    nsub: usize,
    reverse: bool,
}

impl<'a> Parser<'a> {
    fn alternate(&mut self) -> Result<Option<Frag>, Error> {
        let mut f = self.concat()?;
        loop {
            let t = self.lex.next();
            match t.tok {
                Tok::Meta('|') => {
                    let lhs = match f {
                        Some(l) => l,
                        None => return err(t.pos, ErrorKind::MissingOperand),
                    };
                    let rhs = match self.concat()? {
                        Some(r) => r,
                        None => return err(t.pos, ErrorKind::NoAlternative),
                    };
                    f = Some(self.nodes.alt(lhs, rhs));
                }
                _ => {
                    self.lex.back();
                    return Ok(f);
                }
            }
        }
    }

    fn concat(&mut self) -> Result<Option<Frag>, Error> {
        let mut f: Option<Frag> = None;
        while let Some(g) = self.repeat()? {
            f = Some(match f {
                None => g,
                // in reverse mode concatenation links right-to-left, so
                // the automaton matches against reversed input
                Some(l) if self.reverse => self.nodes.cat(g, l),
                Some(l) => self.nodes.cat(l, g),
            });
        }
        Ok(f)
    }

    fn repeat(&mut self) -> Result<Option<Frag>, Error> {
        let mut f = match self.atom()? {
            Some(f) => f,
            None => return Ok(None),
        };
        loop {
            let t = self.lex.next();
            match t.tok {
                Tok::Meta('*') => f = self.nodes.star(f),
                Tok::Meta('+') => f = self.nodes.plus(f),
                Tok::Meta('?') => f = self.nodes.quest(f),
                _ => {
                    self.lex.back();
                    return Ok(Some(f));
                }
            }
        }
    }

    fn atom(&mut self) -> Result<Option<Frag>, Error> {
        let t = self.lex.next();
        let f = match t.tok {
            Tok::Eof => {
                self.lex.back();
                return Ok(None);
            }
            Tok::Rune(c) => self.nodes.lit(Label::Rune(c)),
            Tok::Perl(kind, negated) => {
                self.nodes.lit(Label::Perl { kind: kind, negated: negated })
            }
            Tok::Look(lab) => {
                let lab = if self.reverse { swap_anchor(lab) } else { lab };
                self.nodes.lit(lab)
            }
            Tok::Meta('.') => self.nodes.lit(Label::Dot),
            Tok::Meta('^') => {
                let lab = if self.reverse { Label::EndLine } else { Label::BeginLine };
                self.nodes.lit(lab)
            }
            Tok::Meta('$') => {
                let lab = if self.reverse { Label::BeginLine } else { Label::EndLine };
                self.nodes.lit(lab)
            }
            Tok::Meta('(') => {
                let idx = self.nsub;
                self.nsub += 1;
                let inner = self.alternate()?;
                let close = self.lex.next();
                match close.tok {
                    Tok::Meta(')') => {}
                    Tok::Eof => return err(t.pos, ErrorKind::UnclosedParen),
                    _ => unreachable!("BUG: group stopped at {:?}", close.tok),
                }
                let inner = match inner {
                    Some(f) => f,
                    None => return err(t.pos, ErrorKind::MissingOperand),
                };
                self.nodes.group(inner, idx)
            }
            Tok::Meta('[') => self.class(t.pos)?,
            Tok::Meta('|') | Tok::Meta(')') => {
                self.lex.back();
                return Ok(None);
            }
            Tok::Meta(']') => return err(t.pos, ErrorKind::UnmatchedBracket),
            Tok::Meta('*') | Tok::Meta('+') | Tok::Meta('?') => {
                return err(t.pos, ErrorKind::MissingOperand)
            }
            Tok::Meta(c) => unreachable!("BUG: unknown metacharacter {:?}", c),
        };
        Ok(Some(f))
    }

    /// Parses the body of a class; the `[` at `open` has been consumed.
    fn class(&mut self, open: usize) -> Result<Frag, Error> {
        let mut runes = Vec::new();
        let mut ranges = Vec::new();
        let mut negated = false;
        if self.lex.pos < self.lex.runes.len() && self.lex.runes[self.lex.pos] == '^' {
            self.lex.pos += 1;
            negated = true;
        }
        // the last unescaped single rune, eligible as a range start
        let mut pending: Option<char> = None;
        let mut first = true;
        loop {
            let (c, escaped) = match self.lex.class_rune() {
                None => return err(open, ErrorKind::UnclosedClass),
                Some(r) => r,
            };
            if !escaped && c == ']' && !first {
                if runes.is_empty() && ranges.is_empty() {
                    return err(open, ErrorKind::MissingOperand);
                }
                break;
            }
            if !escaped && c == '-' && pending.is_some() {
                let a = pending.take().unwrap();
                runes.pop();
                let bpos = self.lex.pos;
                let (b, besc) = match self.lex.class_rune() {
                    None => return err(bpos, ErrorKind::IncompleteRange),
                    Some(r) => r,
                };
                if !besc && b == ']' {
                    return err(bpos, ErrorKind::IncompleteRange);
                }
                if b <= a {
                    return err(bpos, ErrorKind::RangeNotAscending);
                }
                ranges.push((a, b));
                first = false;
                continue;
            }
            // a single rune item; `-` and `]` get here only when escaped
            // or at the very start of the body
            runes.push(c);
            pending = if escaped { None } else { Some(c) };
            first = false;
        }
        if negated {
            // a negated class still never matches a newline
            runes.push('\n');
        }
        let cls = Class { runes: runes, ranges: ranges, negated: negated };
        Ok(self.nodes.lit(Label::Class(cls)))
    }
}

fn swap_anchor(lab: Label) -> Label {
    match lab {
        Label::BeginText => Label::EndText,
        Label::EndText => Label::BeginText,
        lab => lab,
    }
}
