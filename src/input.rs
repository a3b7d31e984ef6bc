// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use memchr::memchr;

use char::Char;
use label::Label;

/// A randomly indexable source of runes with a known size.
///
/// The matching engine addresses the text exclusively through this trait.
/// Indices outside `[0, size())` must yield the sentinel `Char::none()`;
/// the anchor labels rely on that to detect the boundaries of the text.
/// Callers must not mutate the underlying sequence during a match.
pub trait Input {
    /// Returns the rune at offset `i`, or the sentinel when `i` is out of
    /// range.
    fn rune(&self, i: i64) -> Char;

    /// Returns the number of runes in the input.
    fn size(&self) -> i64;

    /// Returns the smallest offset `q >= p` whose rune satisfies `lab`,
    /// or an offset past the last rune when there is none.
    ///
    /// `lab` is always a consuming label (it ignores the previous rune).
    /// The engine calls this to skip ahead when the whole expression must
    /// begin with that one label; implementations may override it with
    /// something faster than the rune-at-a-time walk.
    fn skip(&self, lab: &Label, p: i64) -> i64 {
        skip_runes(self, lab, p)
    }
}

/// The generic rune-at-a-time implementation of `Input::skip`.
pub fn skip_runes<I: Input + ?Sized>(input: &I, lab: &Label, p: i64) -> i64 {
    let mut q = p;
    while q < input.size() && !lab.ok(Char::none(), input.rune(q)) {
        q += 1;
    }
    q
}

impl<'a, T: Input + ?Sized> Input for &'a T {
    fn rune(&self, i: i64) -> Char {
        (**self).rune(i)
    }

    fn size(&self) -> i64 {
        (**self).size()
    }

    fn skip(&self, lab: &Label, p: i64) -> i64 {
        (**self).skip(lab, p)
    }
}

/// An input reader over a slice of runes.
#[derive(Clone, Copy, Debug)]
pub struct Runes<'t>(&'t [char]);

impl<'t> Runes<'t> {
    /// Returns a new rune input reader for the given slice.
    pub fn new(runes: &'t [char]) -> Runes<'t> {
        Runes(runes)
    }
}

impl<'t> Input for Runes<'t> {
    #[inline]
    fn rune(&self, i: i64) -> Char {
        if i < 0 || i >= self.0.len() as i64 {
            Char::none()
        } else {
            Char::from(self.0[i as usize])
        }
    }

    fn size(&self) -> i64 {
        self.0.len() as i64
    }
}

/// An input reader that treats each byte as one rune.
///
/// Bytes are read as the first 256 code points, which is exact for ASCII
/// and Latin-1 data. Byte indexing keeps `memchr` available for the
/// literal-prefix skip.
#[derive(Clone, Copy, Debug)]
pub struct ByteInput<'t>(&'t [u8]);

impl<'t> ByteInput<'t> {
    /// Returns a new byte input reader for the given slice.
    pub fn new(bytes: &'t [u8]) -> ByteInput<'t> {
        ByteInput(bytes)
    }
}

impl<'t> Input for ByteInput<'t> {
    #[inline]
    fn rune(&self, i: i64) -> Char {
        if i < 0 || i >= self.0.len() as i64 {
            Char::none()
        } else {
            Char::from(self.0[i as usize] as char)
        }
    }

    fn size(&self) -> i64 {
        self.0.len() as i64
    }

    fn skip(&self, lab: &Label, p: i64) -> i64 {
        if let Label::Rune(c) = *lab {
            if c as u32 <= 0x7F && p >= 0 && p <= self.size() {
                return match memchr(c as u8, &self.0[p as usize..]) {
                    None => self.size(),
                    Some(i) => p + i as i64,
                };
            }
        }
        skip_runes(self, lab, p)
    }
}
