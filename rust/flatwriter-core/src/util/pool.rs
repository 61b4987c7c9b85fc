// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Spinlock;

/// Independent free lists; threads are spread across them round-robin.
const NUM_SEGMENTS: usize = 8;

static NEXT_SEGMENT: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static SEGMENT: Cell<usize> =
        Cell::new(NEXT_SEGMENT.fetch_add(1, Ordering::Relaxed) % NUM_SEGMENTS);
}

/// A segmented pool of reusable values.
///
/// Each thread sticks to one segment, so concurrent encoders mostly take
/// different locks. Values are reset by the caller, not by the pool.
pub struct Pool<T> {
    segments: [Spinlock<Vec<T>>; NUM_SEGMENTS],
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T> Pool<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Pool {
            segments: std::array::from_fn(|_| Spinlock::new(Vec::new())),
            factory: Box::new(factory),
        }
    }

    /// Takes a value out of the pool (or makes one), runs `handler` on it and
    /// puts it back, whatever the handler returned.
    #[inline(always)]
    pub fn borrow_mut<R>(&self, handler: impl FnOnce(&mut T) -> R) -> R {
        let segment = &self.segments[SEGMENT.with(Cell::get)];
        let mut item = segment.lock().pop().unwrap_or_else(|| (self.factory)());
        let result = handler(&mut item);
        segment.lock().push(item);
        result
    }

    /// Number of idle values across all segments.
    pub fn idle(&self) -> usize {
        self.segments.iter().map(|segment| segment.lock().len()).sum()
    }
}
