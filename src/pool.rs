// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

/// Maximum number of values retained by a pool.
const POOL_LIMIT: usize = 2;

/// A bounded pool of reusable values, shared across threads.
///
/// `get` hands out a cached value or creates a fresh one; dropping the
/// guard returns the value to the pool unless it already holds
/// `POOL_LIMIT` values, in which case the value is discarded. The lock is
/// held only for the push and pop.
pub struct Pool<T: Send> {
    stack: Mutex<Vec<T>>,
    create: Box<dyn Fn() -> T + Send + Sync>,
}

/// A smart pointer to a pooled value; returns the value on drop.
pub struct PoolGuard<'a, T: Send> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<T: Send> Pool<T> {
    /// Creates a pool whose values are built by `create`.
    pub fn new(create: Box<dyn Fn() -> T + Send + Sync>) -> Pool<T> {
        Pool { stack: Mutex::new(vec![]), create: create }
    }

    /// Takes a value from the pool, creating one if none is cached.
    pub fn get(&self) -> PoolGuard<T> {
        let cached = self.stack.lock().unwrap().pop();
        let value = match cached {
            None => (self.create)(),
            Some(v) => v,
        };
        PoolGuard { pool: self, value: Some(value) }
    }

    fn put(&self, value: T) {
        let mut stack = self.stack.lock().unwrap();
        if stack.len() < POOL_LIMIT {
            stack.push(value);
        }
    }
}

impl<'a, T: Send> Drop for PoolGuard<'a, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}

impl<'a, T: Send> Deref for PoolGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_ref().unwrap()
    }
}

impl<'a, T: Send> DerefMut for PoolGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().unwrap()
    }
}

impl<T: Send> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pool({} cached)", self.stack.lock().unwrap().len())
    }
}
