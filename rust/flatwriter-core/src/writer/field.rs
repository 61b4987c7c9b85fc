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

use byteorder::{ByteOrder, LittleEndian};

use crate::types::Slot;

/// Size of one [`PendingField`] record in the pending extent.
pub const FIELD_RECORD_SIZE: usize = 8;

/// Bookkeeping for one field of an open table, kept in the pending extent
/// until the table is closed.
///
/// `size == 0` marks a reference field whose `payload` is the finished
/// position of the target (`0` for null). Otherwise the value bytes are
/// already finished and `payload` is their finished position. After the
/// table's references are resolved, reference records are rewritten to carry
/// the position of the stored offset instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingField {
    pub slot: Slot,
    pub size: u8,
    pub align: u8,
    pub payload: u32,
}

impl PendingField {
    pub fn value(slot: Slot, size: u8, align: u8, position: u32) -> Self {
        PendingField {
            slot,
            size,
            align,
            payload: position,
        }
    }

    pub fn reference(slot: Slot, target: u32) -> Self {
        PendingField {
            slot,
            size: 0,
            align: 0,
            payload: target,
        }
    }

    #[inline(always)]
    pub fn is_reference(&self) -> bool {
        self.size == 0
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.size == 0 && self.payload == 0
    }

    pub fn read(bytes: &[u8]) -> Self {
        PendingField {
            slot: LittleEndian::read_u16(&bytes[0..2]),
            size: bytes[2],
            align: bytes[3],
            payload: LittleEndian::read_u32(&bytes[4..8]),
        }
    }

    pub fn write_to(&self, dst: &mut [u8]) {
        LittleEndian::write_u16(&mut dst[0..2], self.slot);
        dst[2] = self.size;
        dst[3] = self.align;
        LittleEndian::write_u32(&mut dst[4..8], self.payload);
    }

    pub fn to_bytes(&self) -> [u8; FIELD_RECORD_SIZE] {
        let mut bytes = [0; FIELD_RECORD_SIZE];
        self.write_to(&mut bytes);
        bytes
    }
}
