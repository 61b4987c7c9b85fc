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

//! Reading side of the integration tests.
//!
//! Buffers are decoded with the `flatbuffers` crate: [`root`] runs its
//! verifier and hands back one of the table views in [`schema`], which are
//! written the way `flatc` generates Rust readers. [`Layout`] exposes the raw
//! vtable and field positions for the alignment and sharing checks.

use byteorder::{ByteOrder, LittleEndian};
use flatbuffers::{Follow, Table, VOffsetT, Verifiable};

pub mod schema;

/// Verifies `bytes` and returns the root table as `T`.
pub fn root<'a, T>(bytes: &'a [u8]) -> T::Inner
where
    T: 'a + Follow<'a> + Verifiable,
{
    flatbuffers::root::<T>(bytes)
        .unwrap_or_else(|err| panic!("flatbuffer failed verification: {err}"))
}

/// Converts a writer slot into the vtable byte offset `flatbuffers` uses.
pub const fn voffset(slot: u16) -> VOffsetT {
    slot * 2
}

/// A table located in a buffer.
#[derive(Clone, Copy)]
pub struct Layout<'a> {
    table: Table<'a>,
    buf: &'a [u8],
    loc: usize,
}

impl<'a> Layout<'a> {
    /// # Safety
    ///
    /// `loc` must be the position of a table header in `buf`.
    pub unsafe fn new(buf: &'a [u8], loc: usize) -> Self {
        Layout {
            table: Table::new(buf, loc),
            buf,
            loc,
        }
    }

    /// Reads the field at `voffset`, `None` if the vtable leaves it absent.
    pub fn get<T: Follow<'a> + 'a>(&self, voffset: VOffsetT) -> Option<T::Inner> {
        // Safety: views are only followed from buffers that passed `root`.
        unsafe { self.table.get::<T>(voffset, None) }
    }

    /// Absolute position of the table header.
    pub fn pos(&self) -> usize {
        self.loc
    }

    pub fn vtable_pos(&self) -> usize {
        let soffset = LittleEndian::read_i32(&self.buf[self.loc..self.loc + 4]);
        (self.loc as i64 - soffset as i64) as usize
    }

    /// The raw vtable bytes.
    pub fn vtable(&self) -> &'a [u8] {
        let start = self.vtable_pos();
        &self.buf[start..start + self.vtable_size() as usize]
    }

    pub fn vtable_size(&self) -> u16 {
        self.table.vtable().num_bytes() as u16
    }

    pub fn object_size(&self) -> u16 {
        self.table.vtable().object_inline_num_bytes() as u16
    }

    /// The vtable entry at `voffset`; `0` means absent.
    pub fn field_offset(&self, voffset: VOffsetT) -> u16 {
        self.table.vtable().get(voffset)
    }

    /// Absolute position of the field at `voffset`.
    pub fn field_pos(&self, voffset: VOffsetT) -> Option<usize> {
        match self.field_offset(voffset) {
            0 => None,
            offset => Some(self.loc + offset as usize),
        }
    }

    /// Absolute position of the object referenced from `voffset`.
    pub fn target_pos(&self, voffset: VOffsetT) -> Option<usize> {
        self.field_pos(voffset)
            .map(|pos| pos + LittleEndian::read_u32(&self.buf[pos..pos + 4]) as usize)
    }
}

/// A schema struct read as its raw little-endian bytes.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raw<const N: usize>(pub [u8; N]);

impl<const N: usize> flatbuffers::SimpleToVerifyInSlice for Raw<N> {}

impl<'a, const N: usize> Follow<'a> for Raw<N> {
    type Inner = &'a Raw<N>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        <&'a Raw<N>>::follow(buf, loc)
    }
}

impl<'a, const N: usize> Follow<'a> for &'a Raw<N> {
    type Inner = &'a Raw<N>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        flatbuffers::follow_cast_ref::<Raw<N>>(buf, loc)
    }
}

impl<const N: usize> Verifiable for Raw<N> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.in_buffer::<Self>(pos)
    }
}
