// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// A Thompson NFA simulation with submatch tracking. The machine keeps two
// frontiers of threads, one for the current input position and one for the
// next; a thread is a node plus a capture vector. At each position every
// thread's zero-width closure is walked depth-first, recording capture
// markers with save/restore so sibling branches see their own values, and
// consuming edges that fire enqueue their target into the next frontier
// with a snapshot of the captures. A per-step `seen` set keeps the closure
// from revisiting a node, which also means the first thread to reach a
// node at a given position owns it.
//
// Leftmost-longest falls out of two rules: a fresh thread is started at
// the current position only while no match has been recorded, and a
// thread reaching the accept node overwrites the recorded match only when
// its start offset is no later than the recorded one. At equal starts the
// most recent thread wins, which is what makes a longer match found on a
// later step supersede a shorter one.
//
// The machine never backtracks: each position does work bounded by the
// automaton size, so matching is O(text * automaton) in the worst case.

use std::mem;

use char::Char;
use input::Input;
use program::Regexp;

/// An NFA simulation matching engine.
#[derive(Debug)]
pub struct Nfa<'r, I> {
    prog: &'r Regexp,
    input: I,
}

/// A cached allocation that can be reused on each execution: the two
/// frontiers and the per-step `seen` set, sized for one program.
#[derive(Debug)]
pub struct NfaCache {
    clist: Threads,
    nlist: Threads,
    seen: SparseSet,
}

impl NfaCache {
    /// Creates an allocation for a program with `nnode` nodes and `nsub`
    /// subexpressions.
    pub fn new(nnode: usize, nsub: usize) -> NfaCache {
        NfaCache {
            clist: Threads::new(nnode, nsub),
            nlist: Threads::new(nnode, nsub),
            seen: SparseSet::new(nnode),
        }
    }
}

impl<'r, I: Input> Nfa<'r, I> {
    /// Runs the machine over `input`, injecting start threads at offsets
    /// in `[from, to]`, and returns the winning submatch spans.
    pub fn exec(
        prog: &'r Regexp,
        cache: &mut NfaCache,
        input: I,
        from: i64,
        to: i64,
    ) -> Option<Vec<(i64, i64)>> {
        Nfa { prog: prog, input: input }.exec_(cache, from, to)
    }

    fn exec_(&mut self, cache: &mut NfaCache, from: i64, to: i64) -> Option<Vec<(i64, i64)>> {
        let NfaCache { ref mut clist, ref mut nlist, ref mut seen } = *cache;
        clist.clear();
        nlist.clear();
        let mut best: Option<Vec<i64>> = None;
        let mut p = from;
        loop {
            if clist.is_empty() {
                // no live thread can extend an earlier start, so a
                // recorded match is final
                if best.is_some() {
                    break;
                }
                // jump to the next offset that could begin a match
                if let Some(ref lab) = self.prog.lit {
                    p = self.input.skip(lab, p);
                }
            }
            // start a new thread at this position while no match has
            // been recorded; the start node is index 0
            if best.is_none() && p <= to && !clist.contains(0) {
                let t = clist.add(0);
                clist.zero_caps(t);
            }
            if clist.is_empty() {
                break;
            }
            let prev = self.input.rune(p - 1);
            let cur = self.input.rune(p);
            seen.clear();
            for i in 0..clist.len() {
                let n = clist.node(i);
                let caps = clist.caps(i);
                self.follow(nlist, seen, &mut best, caps, n, p, prev, cur);
            }
            p += 1;
            mem::swap(clist, nlist);
            nlist.clear();
        }
        best.map(|caps| caps.chunks(2).map(|s| (s[0], s[1])).collect())
    }

    /// Walks the zero-width closure of `n` at position `p`, enqueueing
    /// consuming successors into `nlist`.
    fn follow(
        &self,
        nlist: &mut Threads,
        seen: &mut SparseSet,
        best: &mut Option<Vec<i64>>,
        caps: &mut [i64],
        n: usize,
        p: i64,
        prev: Char,
        cur: Char,
    ) {
        if seen.contains(n) {
            return;
        }
        seen.insert(n);

        let node = &self.prog.nodes[n];
        // record the capture marker for the duration of the walk below
        // this node; siblings must see the previous value again
        let saved = if node.sub == 0 {
            None
        } else {
            let slot = if node.sub > 0 {
                2 * (node.sub as usize - 1)
            } else {
                2 * ((-node.sub) as usize - 1) + 1
            };
            let old = caps[slot];
            caps[slot] = p;
            Some((slot, old))
        };
        if n == self.prog.end {
            let better = match *best {
                None => true,
                Some(ref b) => b[0] >= caps[0],
            };
            if better {
                *best = Some(caps.to_vec());
            }
        }
        for s in 0..2 {
            let (label, to) = match node.out[s] {
                None => continue,
                Some(ref e) => (&e.label, e.to),
            };
            match *label {
                None => self.follow(nlist, seen, best, caps, to, p, prev, cur),
                Some(ref lab) => {
                    if lab.consumes() {
                        if lab.ok(prev, cur) && !nlist.contains(to) {
                            let t = nlist.add(to);
                            nlist.caps(t).copy_from_slice(caps);
                        }
                    } else if lab.ok(prev, cur) {
                        self.follow(nlist, seen, best, caps, to, p, prev, cur);
                    }
                }
            }
        }
        if let Some((slot, old)) = saved {
            caps[slot] = old;
        }
    }
}

/// A frontier of threads with constant-time membership, add and clear.
/// Thread records and their capture vectors are allocated once and
/// recycled across positions and across matches.
#[derive(Debug)]
struct Threads {
    dense: Vec<Thread>,
    sparse: Vec<usize>,
    size: usize,
}

#[derive(Clone, Debug)]
struct Thread {
    n: usize,
    caps: Vec<i64>,
}

impl Threads {
    fn new(nnode: usize, nsub: usize) -> Threads {
        let t = Thread { n: 0, caps: vec![0; 2 * nsub] };
        Threads {
            dense: vec![t; nnode],
            sparse: vec![0; nnode],
            size: 0,
        }
    }

    fn add(&mut self, n: usize) -> usize {
        let i = self.size;
        self.dense[i].n = n;
        self.sparse[n] = i;
        self.size += 1;
        i
    }

    fn contains(&self, n: usize) -> bool {
        let s = self.sparse[n];
        s < self.size && self.dense[s].n == n
    }

    fn node(&self, i: usize) -> usize {
        self.dense[i].n
    }

    fn caps(&mut self, i: usize) -> &mut [i64] {
        &mut self.dense[i].caps
    }

    fn zero_caps(&mut self, i: usize) {
        for slot in self.dense[i].caps.iter_mut() {
            *slot = 0;
        }
    }

    fn len(&self) -> usize {
        self.size
    }

    fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn clear(&mut self) {
        self.size = 0;
    }
}

/// Constant-time set of node indices, cleared once per step.
#[derive(Debug)]
struct SparseSet {
    dense: Vec<usize>,
    sparse: Vec<usize>,
    size: usize,
}

impl SparseSet {
    fn new(n: usize) -> SparseSet {
        SparseSet { dense: vec![0; n], sparse: vec![0; n], size: 0 }
    }

    fn contains(&self, n: usize) -> bool {
        let s = self.sparse[n];
        s < self.size && self.dense[s] == n
    }

    fn insert(&mut self, n: usize) {
        self.dense[self.size] = n;
        self.sparse[n] = self.size;
        self.size += 1;
    }

    fn clear(&mut self) {
        self.size = 0;
    }
}
