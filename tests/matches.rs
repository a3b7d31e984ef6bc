// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate regexp9;

use std::sync::Arc;
use std::thread;

use regexp9::{ByteInput, ErrorKind, Options, Regexp, Runes};

type Spans = Option<Vec<(i64, i64)>>;

macro_rules! mat {
    ($name:ident, $re:expr, $text:expr, $from:expr, $expect:expr) => {
        #[test]
        fn $name() {
            let re = Regexp::new($re).unwrap();
            let got = re.match_str($text, $from);
            let expect: Spans = $expect;
            assert_eq!(expect, got, "pattern {:?} on text {:?}", $re, $text);
        }
    };
}

macro_rules! parse_err {
    ($name:ident, $re:expr, $pos:expr, $kind:expr) => {
        #[test]
        fn $name() {
            let err = Regexp::new($re).unwrap_err();
            assert_eq!(($pos, $kind), (err.pos, err.kind), "pattern {:?}", $re);
        }
    };
}

// Leftmost-longest discipline.
mat!(literal, "abc", "xxabcx", 0, Some(vec![(2, 5)]));
mat!(star_is_greedy, "a*", "aab", 0, Some(vec![(0, 2)]));
mat!(empty_before_later, "a*", "xyzabc", 0, Some(vec![(0, 0)]));
mat!(longest_of_alternates, "ab|a", "ab", 0, Some(vec![(0, 2)]));
mat!(longest_of_alternates_swapped, "a|ab", "ab", 0, Some(vec![(0, 2)]));
mat!(plus_needs_one, "a+", "bbb", 0, None);
mat!(plus_takes_all, "a+", "baaa", 0, Some(vec![(1, 4)]));
mat!(quest_prefers_presence, "a?", "a", 0, Some(vec![(0, 1)]));
mat!(quest_on_empty, "a?", "b", 0, Some(vec![(0, 0)]));

// Capture groups.
mat!(
    star_of_group,
    "((a*)b)*",
    "abb",
    0,
    Some(vec![(0, 3), (2, 3), (2, 2)])
);
mat!(
    alt_left_caps,
    "(abc)|(def)",
    "abc",
    0,
    Some(vec![(0, 3), (0, 3), (0, 0)])
);
mat!(
    alt_right_caps,
    "(abc)|(def)",
    "def",
    0,
    Some(vec![(0, 3), (0, 0), (0, 3)])
);
mat!(tie_prefers_left, "(a)|(a)", "a", 0, Some(vec![(0, 1), (0, 1), (0, 0)]));
mat!(
    skipped_group_is_empty,
    "(a)?b",
    "b",
    0,
    Some(vec![(0, 1), (0, 0)])
);
mat!(
    unentered_star_group,
    "x(a)*",
    "x",
    0,
    Some(vec![(0, 1), (0, 0)])
);
mat!(
    group_of_empty_star,
    "(a*)",
    "b",
    0,
    Some(vec![(0, 0), (0, 0)])
);
mat!(
    nested_groups,
    "((a)b)c",
    "abc",
    0,
    Some(vec![(0, 3), (0, 2), (0, 1)])
);

#[test]
fn reuse_clears_stale_captures() {
    let re = Regexp::new("(a)(b)(c)|(x)(y)(z)").unwrap();
    assert_eq!(
        re.match_str("abc", 0),
        Some(vec![(0, 3), (0, 1), (1, 2), (2, 3), (0, 0), (0, 0), (0, 0)])
    );
    assert_eq!(
        re.match_str("xyz", 0),
        Some(vec![(0, 3), (0, 0), (0, 0), (0, 0), (0, 1), (1, 2), (2, 3)])
    );
    // and back again, more times than the cache holds
    for _ in 0..5 {
        assert!(re.match_str("abc", 0).is_some());
    }
}

// Anchors and zero-width labels.
mat!(begin_line, "^abc", "abc", 0, Some(vec![(0, 3)]));
mat!(begin_line_after_newline, "^b", "a\nb", 0, Some(vec![(2, 3)]));
mat!(begin_line_rejects_middle, "^bc", "abc", 0, None);
mat!(end_line_at_newline, "b$", "ab\ncd", 0, Some(vec![(1, 2)]));
mat!(empty_line, "^$", "", 0, Some(vec![(0, 0)]));
mat!(begin_text, "\\Aab", "ab", 0, Some(vec![(0, 2)]));
mat!(begin_text_not_line, "\\Ab", "a\nb", 0, None);
mat!(end_text, "ab\\z", "abab", 0, Some(vec![(2, 4)]));
mat!(word_boundary, "\\bcat\\b", "the cat sat", 0, Some(vec![(4, 7)]));
mat!(word_boundary_rejects_inner, "\\bcat\\b", "concatenate", 0, None);
mat!(not_word_boundary, "\\Bcat", "concat", 0, Some(vec![(3, 6)]));

// Dot and classes.
mat!(dot_matches_most, "a.c", "abc", 0, Some(vec![(0, 3)]));
mat!(dot_rejects_newline, "a.c", "a\nc", 0, None);
mat!(class_range, "[a-c]+", "zabcz", 0, Some(vec![(1, 4)]));
mat!(class_multi, "[a-c0x-z]+", "0axzb", 0, Some(vec![(0, 5)]));
mat!(class_negated, "[^a]+", "aXYa", 0, Some(vec![(1, 3)]));
mat!(class_negated_newline, "[^a]+", "b\nc", 0, Some(vec![(0, 1)]));
mat!(class_leading_bracket, "[]a]+", "]a]", 0, Some(vec![(0, 3)]));
mat!(class_leading_dash, "[-x]+", "x-x", 0, Some(vec![(0, 3)]));
mat!(class_escaped_dash, "[a\\-c]+", "a-c", 0, Some(vec![(0, 3)]));
mat!(class_punct_range, "[!-/]+", "!#%", 0, Some(vec![(0, 3)]));

// Perl classes.
mat!(digits, "\\d+", "ab123x", 0, Some(vec![(2, 5)]));
mat!(non_digits, "\\D+", "12ab3", 0, Some(vec![(2, 4)]));
mat!(word_runes, "\\w+", " foo_bar ", 0, Some(vec![(1, 8)]));
mat!(space, "a\\sb", "a b", 0, Some(vec![(0, 3)]));
mat!(escaped_literal, "a\\*b", "xa*b", 0, Some(vec![(1, 4)]));
mat!(escaped_newline, "a\\nb", "a\nb", 0, Some(vec![(0, 3)]));

// Wrap-around search.
mat!(wrap_not_needed, "ab", "abab", 1, Some(vec![(2, 4)]));
mat!(wrap_to_start, "ab", "abxx", 1, Some(vec![(0, 2)]));
mat!(wrap_extends_past_origin, "abc", "abcxx", 1, Some(vec![(0, 3)]));
mat!(wrap_nothing_anywhere, "ab", "xxxx", 1, None);
mat!(
    wrap_with_anchors,
    "^abc|def$",
    "☺abc\ndef",
    1,
    Some(vec![(5, 8)])
);

// The empty expression matches the empty string anywhere.
mat!(empty_expression, "", "abc", 0, Some(vec![(0, 0)]));

#[test]
fn empty_expression_shape() {
    let re = Regexp::new("").unwrap();
    assert_eq!(re.nsub(), 1);
    assert_eq!(re.expression(), "");
}

// Parse errors surface position and kind.
parse_err!(err_unclosed_group, "(", 0, ErrorKind::UnclosedParen);
parse_err!(err_bar_no_rhs, "a|", 1, ErrorKind::NoAlternative);
parse_err!(err_range_backwards, "[b-a]", 3, ErrorKind::RangeNotAscending);
parse_err!(err_unclosed_class, "[^", 0, ErrorKind::UnclosedClass);
parse_err!(err_leading_star, "*", 0, ErrorKind::MissingOperand);
parse_err!(err_unmatched_close, "a)", 1, ErrorKind::UnmatchedParen);
parse_err!(err_stray_bracket, "ab]", 2, ErrorKind::UnmatchedBracket);

// Options: delimited.
#[test]
fn delimited_basics() {
    let opts = Options { delimited: true, ..Options::default() };
    let re = Regexp::with_options("/ab*/ trailing junk", opts).unwrap();
    assert_eq!(re.expression(), "/ab*/");
    assert_eq!(re.match_str("xabb", 0), Some(vec![(1, 4)]));

    // no closing delimiter: everything is consumed
    let re = Regexp::with_options("/ab", opts).unwrap();
    assert_eq!(re.expression(), "/ab");
    assert!(re.match_str("zab", 0).is_some());
}

#[test]
fn delimited_group_scenario() {
    let opts = Options { delimited: true, ..Options::default() };
    let re = Regexp::with_options("/(.*),\\n/", opts).unwrap();
    assert_eq!(re.expression(), "/(.*),\\n/");
    assert_eq!(re.match_str("hi,\n", 0), Some(vec![(0, 4), (0, 2)]));
}

#[test]
fn delimited_escaped_delimiter() {
    let opts = Options { delimited: true, ..Options::default() };
    let re = Regexp::with_options("/a\\/b/", opts).unwrap();
    assert_eq!(re.expression(), "/a\\/b/");
    assert_eq!(re.match_str("xa/b", 0), Some(vec![(1, 4)]));
}

#[test]
fn delimited_meta_delimiter_inverts_escapes() {
    let opts = Options { delimited: true, ..Options::default() };
    // with '*' as the delimiter, '\*' is the repetition operator
    let re = Regexp::with_options("*a\\*b*", opts).unwrap();
    assert_eq!(re.expression(), "*a\\*b*");
    assert_eq!(re.match_str("aaab", 0), Some(vec![(0, 4)]));
    assert_eq!(re.match_str("b", 0), Some(vec![(0, 1)]));
}

#[test]
fn delimiter_inside_class_does_not_close() {
    let opts = Options { delimited: true, ..Options::default() };
    let re = Regexp::with_options("/[a/]+/", opts).unwrap();
    assert_eq!(re.expression(), "/[a/]+/");
    assert_eq!(re.match_str("za/a", 0), Some(vec![(1, 4)]));
}

// Options: literal.
#[test]
fn literal_mode() {
    let opts = Options { literal: true, ..Options::default() };
    let re = Regexp::with_options("a*b", opts).unwrap();
    assert_eq!(re.match_str("xa*by", 0), Some(vec![(1, 4)]));
    assert_eq!(re.match_str("aab", 0), None);

    // escapes are not processed either
    let re = Regexp::with_options("a\\nb", opts).unwrap();
    assert_eq!(re.match_str("a\\nb", 0), Some(vec![(0, 4)]));
    assert_eq!(re.match_str("a\nb", 0), None);
}

#[test]
fn literal_delimited_mode() {
    let opts = Options { delimited: true, literal: true, ..Options::default() };
    let re = Regexp::with_options("/a*b/x", opts).unwrap();
    assert_eq!(re.expression(), "/a*b/");
    assert_eq!(re.match_str("xa*b", 0), Some(vec![(1, 4)]));
}

// Options: reverse.
#[test]
fn reverse_concatenation() {
    let opts = Options { reverse: true, ..Options::default() };
    let re = Regexp::with_options("abc", opts).unwrap();
    assert_eq!(re.match_str("cba", 0), Some(vec![(0, 3)]));
    assert_eq!(re.match_str("abc", 0), None);
}

#[test]
fn reverse_duality_positions() {
    // forward: "ab" in "xxaby" at (2, 4); backwards, the same match sits
    // at (1, 3) of the reversed text
    let fwd = Regexp::new("ab").unwrap();
    assert_eq!(fwd.match_str("xxaby", 0), Some(vec![(2, 4)]));
    let opts = Options { reverse: true, ..Options::default() };
    let rev = Regexp::with_options("ab", opts).unwrap();
    assert_eq!(rev.match_str("ybaxx", 0), Some(vec![(1, 3)]));
}

#[test]
fn reverse_swaps_anchors() {
    let opts = Options { reverse: true, ..Options::default() };
    let re = Regexp::with_options("^ab", opts).unwrap();
    // "^ab" matching the reversal of "xba" corresponds to a forward
    // match of "abx" at its beginning
    assert_eq!(re.match_str("ba", 0), Some(vec![(0, 2)]));
    assert_eq!(re.match_str("xba", 0), Some(vec![(1, 3)]));
    // reversed "bax" is "xab", whose 'ab' is not at the beginning
    assert_eq!(re.match_str("bax", 0), None);
}

#[test]
fn reverse_keeps_group_identity() {
    let opts = Options { reverse: true, ..Options::default() };
    let re = Regexp::with_options("(a)(b)", opts).unwrap();
    assert_eq!(re.match_str("ba", 0), Some(vec![(0, 2), (1, 2), (0, 1)]));
}

// Rune sources.
#[test]
fn byte_input_agrees_with_runes() {
    let re = Regexp::new("(ab|b)+").unwrap();
    let text = "zabab";
    let runes: Vec<char> = text.chars().collect();
    let from_runes = re.match_at(&Runes::new(&runes), 0);
    let from_bytes = re.match_at(&ByteInput::new(text.as_bytes()), 0);
    assert_eq!(from_runes, from_bytes);
    assert_eq!(from_runes, Some(vec![(1, 5), (3, 5)]));
}

#[test]
fn byte_input_prefix_skip() {
    // a literal-prefix pattern on a byte source goes through memchr
    let re = Regexp::new("needle").unwrap();
    let mut hay = vec![b'x'; 1000];
    hay.extend_from_slice(b"needle");
    hay.extend_from_slice(&[b'y'; 100]);
    assert_eq!(
        re.match_at(&ByteInput::new(&hay), 0),
        Some(vec![(1000, 1006)])
    );
}

// Round trips and accessors.
#[test]
fn expression_round_trip() {
    for src in &["a(b)*c", "x|y", "[a-z]+", ""] {
        let re = Regexp::new(src).unwrap();
        assert_eq!(&re.expression(), src);
    }
}

#[test]
fn nsub_counts_groups() {
    assert_eq!(Regexp::new("abc").unwrap().nsub(), 1);
    assert_eq!(Regexp::new("(a)(b)").unwrap().nsub(), 3);
    assert_eq!(Regexp::new("((a)b)(c)").unwrap().nsub(), 4);
}

#[test]
fn compile_is_idempotent() {
    let a = Regexp::new("(a|ab)(c|bcd)").unwrap();
    let b = Regexp::new("(a|ab)(c|bcd)").unwrap();
    for text in &["abcd", "ac", "abc", "zzabcdzz"] {
        assert_eq!(a.match_str(text, 0), b.match_str(text, 0));
    }
}

#[test]
fn clone_matches_alike() {
    let a = Regexp::new("(ab)+").unwrap();
    let b = a.clone();
    assert_eq!(a.match_str("xabab", 0), b.match_str("xabab", 0));
    assert_eq!(b.expression(), "(ab)+");
}

// Shared use across threads.
#[test]
fn concurrent_matching() {
    let re = Arc::new(Regexp::new("(a+)b").unwrap());
    let mut handles = vec![];
    for _ in 0..8 {
        let re = re.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                assert_eq!(re.match_str("xaab", 0), Some(vec![(1, 4), (1, 3)]));
                assert_eq!(re.match_str("b", 0), None);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
}
