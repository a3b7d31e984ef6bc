// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use parse::is_meta;

/// Strips the delimiters from a delimited expression.
///
/// The first rune is taken as the delimiter; a trailing unescaped
/// occurrence is removed, and the escape is dropped from any escaped
/// delimiter in the body. Returns the delimiter and the bare body, or
/// `None` when `text` is empty. No regex syntax is validated.
pub fn remove_delimiter(text: &str) -> Option<(char, String)> {
    let runes: Vec<char> = text.chars().collect();
    let delim = match runes.first() {
        None => return None,
        Some(&d) => d,
    };
    let mut body = String::new();
    let mut i = 1;
    while i < runes.len() {
        let c = runes[i];
        if c == '\\' && i + 1 < runes.len() {
            let e = runes[i + 1];
            if e != delim {
                body.push('\\');
            }
            body.push(e);
            i += 2;
            continue;
        }
        if c == delim && i == runes.len() - 1 {
            break;
        }
        body.push(c);
        i += 1;
    }
    Some((delim, body))
}

/// Wraps `body` in the given delimiter.
///
/// Occurrences of the delimiter in the body are escaped. When the
/// delimiter is a metacharacter, escaping inverts inside the delimited
/// text: a bare occurrence (the meta reading) becomes `\<delim>`, and a
/// previously escaped occurrence (the literal reading) is rewritten to
/// the class form `[<delim>]`, which keeps its meaning. No regex syntax
/// is validated.
pub fn add_delimiter(delim: char, body: &str) -> String {
    let runes: Vec<char> = body.chars().collect();
    let meta = is_meta(delim);
    let mut out = String::new();
    out.push(delim);
    let mut i = 0;
    while i < runes.len() {
        let c = runes[i];
        if c == '\\' && i + 1 < runes.len() {
            let e = runes[i + 1];
            if e == delim && meta {
                out.push('[');
                out.push(e);
                out.push(']');
            } else {
                out.push('\\');
                out.push(e);
            }
            i += 2;
            continue;
        }
        if c == delim {
            out.push('\\');
        }
        out.push(c);
        i += 1;
    }
    out.push(delim);
    out
}
