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

//! The dual-ended buffer every flatbuffer is written into.
//!
//! A flatbuffer is built bottom-up: children are finished before their
//! parents, so the encoded bytes grow from the end of the buffer towards the
//! start. The [`InwardBuffer`] keeps that *finished* extent at the high end of
//! one allocation, and uses the low end as a *pending* stack for transient
//! bookkeeping (field records of tables that are still open):
//!
//! ```text
//! 0                front_size                capacity - back_size    capacity
//! | pending ------> |        free space        | <------ finished |
//! ```
//!
//! Positions in the finished extent are distances from the end of the buffer
//! and positions in the pending extent are distances from the start. Growth
//! copies each extent to its own end of the new allocation, so both kinds of
//! position stay valid across reallocation. Views returned by the `*_at`
//! methods borrow the buffer and therefore cannot outlive the next write.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::error::Error;

const MIN_CAPACITY: usize = 64;

#[derive(Default)]
pub struct InwardBuffer {
    bf: Vec<u8>,
    front: usize,
    back: usize,
}

impl InwardBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InwardBuffer {
            bf: vec![0; capacity],
            front: 0,
            back: 0,
        }
    }

    /// Total size of the allocation shared by both extents.
    pub fn capacity(&self) -> usize {
        self.bf.len()
    }

    /// Size of the pending extent, growing forward from the start.
    #[inline(always)]
    pub fn front_size(&self) -> usize {
        self.front
    }

    /// Size of the finished extent, growing backward from the end.
    #[inline(always)]
    pub fn back_size(&self) -> usize {
        self.back
    }

    /// Empties both extents but keeps the allocation.
    pub fn reset(&mut self) {
        self.front = 0;
        self.back = 0;
    }

    /// Makes sure `additional` more bytes fit between the two extents.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.front + self.back + additional;
        let old_capacity = self.bf.len();
        if needed <= old_capacity {
            return;
        }
        let capacity = needed.max(old_capacity * 2).max(MIN_CAPACITY);
        trace!(
            from = old_capacity,
            to = capacity,
            pending = self.front,
            finished = self.back,
            "growing inward buffer"
        );
        let mut grown = vec![0u8; capacity];
        grown[..self.front].copy_from_slice(&self.bf[..self.front]);
        grown[capacity - self.back..].copy_from_slice(&self.bf[old_capacity - self.back..]);
        self.bf = grown;
    }

    /// Reserves `len` bytes at the top of the pending extent.
    pub fn alloc_front(&mut self, len: usize) -> &mut [u8] {
        self.reserve(len);
        let start = self.front;
        self.front += len;
        &mut self.bf[start..self.front]
    }

    /// Reserves `len` bytes at the bottom of the finished extent.
    ///
    /// The contents of the returned range are unspecified; the caller is
    /// expected to overwrite all of it.
    pub fn alloc_back(&mut self, len: usize) -> &mut [u8] {
        self.reserve(len);
        let end = self.bf.len() - self.back;
        self.back += len;
        &mut self.bf[end - len..end]
    }

    pub fn write_front(&mut self, data: &[u8]) {
        self.alloc_front(data.len()).copy_from_slice(data);
    }

    pub fn write_back(&mut self, data: &[u8]) {
        self.alloc_back(data.len()).copy_from_slice(data);
    }

    pub fn write_front_u32(&mut self, value: u32) {
        LittleEndian::write_u32(self.alloc_front(4), value);
    }

    pub fn write_back_u8(&mut self, value: u8) {
        self.alloc_back(1)[0] = value;
    }

    pub fn write_back_u16(&mut self, value: u16) {
        LittleEndian::write_u16(self.alloc_back(2), value);
    }

    pub fn write_back_u32(&mut self, value: u32) {
        LittleEndian::write_u32(self.alloc_back(4), value);
    }

    pub fn write_back_i32(&mut self, value: i32) {
        LittleEndian::write_i32(self.alloc_back(4), value);
    }

    /// Appends `len` zero bytes to the finished extent.
    pub fn pad_back(&mut self, len: usize) {
        self.alloc_back(len).fill(0);
    }

    /// Pending bytes from `offset` (distance from the start) to the top of the
    /// pending extent.
    pub fn front_at(&self, offset: usize) -> Result<&[u8], Error> {
        if offset > self.front {
            return Err(Error::buffer_out_of_bound(offset, 0, self.front));
        }
        Ok(&self.bf[offset..self.front])
    }

    pub fn front_at_mut(&mut self, offset: usize) -> Result<&mut [u8], Error> {
        if offset > self.front {
            return Err(Error::buffer_out_of_bound(offset, 0, self.front));
        }
        Ok(&mut self.bf[offset..self.front])
    }

    /// Finished bytes starting `offset` bytes before the end of the buffer.
    pub fn back_at(&self, offset: usize) -> Result<&[u8], Error> {
        if offset > self.back {
            return Err(Error::buffer_out_of_bound(offset, 0, self.back));
        }
        let capacity = self.bf.len();
        Ok(&self.bf[capacity - offset..])
    }

    pub fn back_at_mut(&mut self, offset: usize) -> Result<&mut [u8], Error> {
        if offset > self.back {
            return Err(Error::buffer_out_of_bound(offset, 0, self.back));
        }
        let capacity = self.bf.len();
        Ok(&mut self.bf[capacity - offset..])
    }

    /// Pops the `len` most recently written pending bytes.
    pub fn erase_front(&mut self, len: usize) -> Result<(), Error> {
        if len > self.front {
            return Err(Error::buffer_out_of_bound(0, len, self.front));
        }
        self.front -= len;
        Ok(())
    }

    /// Pops the `len` most recently written finished bytes.
    pub fn erase_back(&mut self, len: usize) -> Result<(), Error> {
        if len > self.back {
            return Err(Error::buffer_out_of_bound(0, len, self.back));
        }
        self.back -= len;
        Ok(())
    }

    /// The whole finished extent, in forward (reading) order.
    pub fn finished_data(&self) -> &[u8] {
        &self.bf[self.bf.len() - self.back..]
    }

    pub fn dump(&self) -> Vec<u8> {
        self.finished_data().to_vec()
    }
}
