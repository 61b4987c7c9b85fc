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

//! Layout constants of the table/vtable format.

/// Vtable slot index. Slots `0` and `1` hold the vtable and object sizes, so
/// the first schema field lives in slot [`FIRST_FIELD_SLOT`].
pub type Slot = u16;

/// Slot of the first schema-defined field.
pub const FIRST_FIELD_SLOT: Slot = 2;

/// Largest slot whose vtable size still fits a `u16`.
pub const MAX_SLOT: Slot = (u16::MAX / 2) - 1;

/// Width of every stored reference (`uoffset`).
pub const SIZE_OF_UOFFSET: usize = 4;

/// Width of the table header (`soffset` to the vtable).
pub const SIZE_OF_SOFFSET: usize = 4;

/// Width of one vtable entry (`voffset`).
pub const SIZE_OF_VOFFSET: usize = 2;

/// Length of the optional file identifier that follows the root offset.
pub const FILE_IDENTIFIER_LENGTH: usize = 4;

/// Discriminant of an unset union.
pub const UNION_NONE: u8 = 0;

/// Finished-extent position used for "no object". Real objects always sit at
/// a position greater than zero.
pub const NULL_REFERENCE: usize = 0;

/// Converts a schema vtable byte offset (`4`, `6`, `8`, ...) into a slot index.
#[inline(always)]
pub const fn slot_from_voffset(voffset: u16) -> Slot {
    voffset / SIZE_OF_VOFFSET as u16
}

/// Converts a zero-based schema field id into its slot index.
#[inline(always)]
pub const fn slot_from_field_id(id: u16) -> Slot {
    id + FIRST_FIELD_SLOT
}
