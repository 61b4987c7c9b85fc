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

//! The bottom-up table writer.
//!
//! Tables are written in two phases. While a table scope is open, every field
//! call pushes a [`PendingField`] record onto the pending extent of the
//! [`InwardBuffer`]: value fields (scalars, structs) are copied to the
//! finished extent immediately and remember where they landed, reference
//! fields (strings, tables, unions, vectors) only remember the finished
//! position of their target, since that target was completed before the
//! field call. Closing the scope resolves the reference fields into real
//! offsets, writes the table header and synthesizes the vtable from the
//! records, then pops the records off the pending extent.
//!
//! Every position is kept as a distance from the end of the buffer, which
//! does not change when the buffer grows, so nothing is ever addressed by
//! pointer across a write.
//!
//! ```text
//!  low addresses                                              high addresses
//!  | root offset | vtable | table header | fields ... | strings, children |
//!                  ^ u16 entries  ^ i32 = vtable size  (written first)
//! ```

use std::mem::{align_of, size_of};

use byteorder::{ByteOrder, LittleEndian};
use bytemuck::Pod;
use tracing::{instrument, trace};

use crate::buffer::InwardBuffer;
use crate::config::Config;
use crate::error::Error;
use crate::serializer::{NativeStruct, Scalar, TableSerializer, UnionSerializer};
use crate::types::{
    Slot, FILE_IDENTIFIER_LENGTH, FIRST_FIELD_SLOT, MAX_SLOT, NULL_REFERENCE, SIZE_OF_SOFFSET,
    SIZE_OF_UOFFSET, SIZE_OF_VOFFSET, UNION_NONE,
};

mod field;
mod vector;

pub use field::{PendingField, FIELD_RECORD_SIZE};
pub use vector::VectorMark;

/// Handle of an open table scope, returned by [`FlatbufferWriter::start_table`].
///
/// Marks are not `Clone`: each one closes exactly one scope, and scopes close
/// in reverse order of opening.
#[must_use = "a table scope must be closed with `end_table`"]
#[derive(Debug)]
pub struct TableMark {
    start: usize,
    depth: u32,
}

/// An open scope. The writer keeps one per `start_*` call, innermost last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    /// `has_values` is set once a value field of the table was written.
    Table { has_values: bool },
    /// `start` is the pending position of the first staged reference,
    /// `align` the element alignment requested by `prealign_vector` and
    /// `values` the number of value elements written so far.
    Vector {
        start: usize,
        align: usize,
        values: usize,
    },
}

/// Serializes objects into an [`InwardBuffer`] as flatbuffer tables.
///
/// One writer drives one buffer for one object graph. Positions returned by
/// the writer (`usize`) are finished-extent positions: distances from the end
/// of the buffer, stable while the buffer grows.
pub struct FlatbufferWriter<'a> {
    buffer: &'a mut InwardBuffer,
    config: Config,
    scopes: Vec<Scope>,
    min_align: usize,
    vtables: Vec<usize>,
}

impl<'a> FlatbufferWriter<'a> {
    pub fn new(buffer: &'a mut InwardBuffer) -> Self {
        Self::with_config(buffer, Config::default())
    }

    pub fn with_config(buffer: &'a mut InwardBuffer, config: Config) -> Self {
        FlatbufferWriter {
            buffer,
            config,
            scopes: Vec::new(),
            min_align: 1,
            vtables: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &InwardBuffer {
        &*self.buffer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of table and vector scopes currently open.
    pub fn depth(&self) -> u32 {
        self.scopes.len() as u32
    }

    /// Largest alignment any written value required so far.
    pub fn min_align(&self) -> usize {
        self.min_align
    }

    /// Writes `obj` as the root table of a complete flatbuffer and returns the
    /// finished position of the root offset, i.e. the size of the finished
    /// extent.
    #[instrument(name = "flatwriter::writer::serialize_object", level = "trace", skip_all)]
    pub fn serialize_object<T: TableSerializer + ?Sized>(&mut self, obj: &T) -> Result<usize, Error> {
        self.serialize_root(obj, None)
    }

    /// Like [`serialize_object`](Self::serialize_object), with a file
    /// identifier after the root offset.
    #[instrument(
        name = "flatwriter::writer::serialize_object_with_identifier",
        level = "trace",
        skip_all
    )]
    pub fn serialize_object_with_identifier<T: TableSerializer + ?Sized>(
        &mut self,
        obj: &T,
        identifier: &[u8; FILE_IDENTIFIER_LENGTH],
    ) -> Result<usize, Error> {
        self.serialize_root(obj, Some(identifier))
    }

    fn serialize_root<T: TableSerializer + ?Sized>(
        &mut self,
        obj: &T,
        identifier: Option<&[u8; FILE_IDENTIFIER_LENGTH]>,
    ) -> Result<usize, Error> {
        if obj.is_none() {
            return Err(Error::invalid_data("root table is absent"));
        }
        let start = self.buffer.front_size();

        let mark = self.start_table()?;
        obj.serialize_flatbuffer(self)?;
        let root = self.end_table(mark)?;
        let finished = self.finish_with(root, identifier)?;

        let end = self.buffer.front_size();
        if start != end {
            return Err(Error::pending_leak(end - start));
        }
        Ok(finished)
    }

    /// Writes a scalar field. With `force_defaults` disabled, a value equal to
    /// the schema `default` is omitted and its slot reads as absent.
    pub fn scalar<T: Scalar>(&mut self, value: T, slot: Slot, default: T) -> Result<(), Error> {
        if !self.config.is_force_defaults() && value == default {
            return Ok(());
        }
        self.add_value_field(slot, T::SIZE, T::ALIGN, |dst| value.write_le(dst))
    }

    pub fn optional_scalar<T: Scalar>(&mut self, value: Option<T>, slot: Slot) -> Result<(), Error> {
        match value {
            Some(value) => self.add_value_field(slot, T::SIZE, T::ALIGN, |dst| value.write_le(dst)),
            None => Ok(()),
        }
    }

    /// Writes a schema struct by copying its bytes.
    pub fn struct_<T: Pod>(&mut self, value: &T, slot: Slot) -> Result<(), Error> {
        let bytes = bytemuck::bytes_of(value);
        self.add_value_field(slot, size_of::<T>(), align_of::<T>(), |dst| {
            dst.copy_from_slice(bytes)
        })
    }

    pub fn optional_struct<T: Pod>(&mut self, value: &Option<T>, slot: Slot) -> Result<(), Error> {
        match value {
            Some(value) => self.struct_(value, slot),
            None => Ok(()),
        }
    }

    /// Writes a struct through its [`NativeStruct`] layout.
    pub fn native_struct<T: NativeStruct>(&mut self, value: &T, slot: Slot) -> Result<(), Error> {
        check_native_layout::<T>()?;
        self.add_value_field(slot, T::STRUCT_SIZE, T::STRUCT_ALIGNMENT, |dst| {
            value.write_struct(dst)
        })
    }

    pub fn optional_native_struct<T: NativeStruct>(
        &mut self,
        value: &Option<T>,
        slot: Slot,
    ) -> Result<(), Error> {
        match value {
            Some(value) => self.native_struct(value, slot),
            None => Ok(()),
        }
    }

    /// References an object that is already finished, e.g. one returned by
    /// [`create_string`](Self::create_string) or [`end_table`](Self::end_table).
    /// [`NULL_REFERENCE`] leaves the slot absent.
    pub fn reference(&mut self, target: usize, slot: Slot) -> Result<(), Error> {
        self.add_reference_field(slot, target)
    }

    /// Writes a string field. Empty strings leave the slot absent.
    pub fn string(&mut self, value: &str, slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_string(value)?;
        self.add_reference_field(slot, target)
    }

    /// Writes a nested table field. Absent values leave the slot absent.
    pub fn table<T: TableSerializer + ?Sized>(&mut self, value: &T, slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        if value.is_none() {
            return Ok(());
        }
        let target = self.write_nested_table(|writer| value.serialize_flatbuffer(writer))?;
        self.add_reference_field(slot, target)
    }

    /// Writes a union: the variant table in `slot` and the `u8` discriminant
    /// in `slot - 1`. A [`UNION_NONE`] union leaves both slots absent, which
    /// reads back as discriminant 0 with a null reference.
    ///
    /// The `slot - 1` value is placed in the finished extent after the
    /// variant table, i.e. at a lower address than it.
    ///
    /// The discriminant does not end the reference phase of the enclosing
    /// table, so further reference fields may follow a union.
    pub fn union<U: UnionSerializer + ?Sized>(&mut self, value: &U, slot: Slot) -> Result<(), Error> {
        if slot <= FIRST_FIELD_SLOT {
            return Err(Error::invalid_slot(slot));
        }
        check_slot(slot)?;
        self.check_in_table()?;
        let union_type = value.union_type();
        if union_type == UNION_NONE {
            return Ok(());
        }
        let target = self.write_nested_table(|writer| value.serialize_flatbuffer(writer))?;
        self.add_reference_field(slot, target)?;

        let has_values = self.has_values();
        self.add_value_field(slot - 1, 1, 1, |dst| dst[0] = union_type)?;
        self.set_has_values(has_values);
        Ok(())
    }

    /// Opens a table scope. Fields written until the matching
    /// [`end_table`](Self::end_table) belong to the new table.
    pub fn start_table(&mut self) -> Result<TableMark, Error> {
        self.enter_scope(Scope::Table { has_values: false }, "table")?;
        Ok(TableMark {
            start: self.buffer.front_size(),
            depth: self.depth(),
        })
    }

    /// Closes the table opened by `mark` and returns the finished position of
    /// its root (the table header), ready to be referenced by a parent.
    pub fn end_table(&mut self, mark: TableMark) -> Result<usize, Error> {
        let TableMark { start, depth } = mark;
        let end = self.buffer.front_size();
        let innermost_table = matches!(self.scopes.last(), Some(Scope::Table { .. }));
        if !innermost_table
            || depth != self.depth()
            || start > end
            || (end - start) % FIELD_RECORD_SIZE != 0
        {
            return Err(Error::scope_mismatch(format!(
                "table mark (pending {start}, depth {depth}) does not match the open scope \
                 ({:?}, pending {end}, depth {})",
                self.scopes.last(),
                self.depth()
            )));
        }

        let (object_size, max_slot) = self.write_table_fields(start, end)?;

        // The vtable is written right below the header, so the header holds
        // the vtable size as its (positive) distance to the vtable.
        let vtable_size = (max_slot as usize + 1) * SIZE_OF_VOFFSET;
        self.prealign(SIZE_OF_SOFFSET);
        self.buffer.write_back_i32(vtable_size as i32);
        let root = self.buffer.back_size();

        let offsets = self.create_vtable(vtable_size, object_size)?;
        self.update_vtable(start, end, root, offsets)?;
        if self.config.is_share_vtables() {
            self.share_vtable(root, vtable_size)?;
        }

        self.buffer.erase_front(end - start)?;
        self.scopes.pop();
        trace!(
            root,
            vtable_size,
            object_size,
            fields = (end - start) / FIELD_RECORD_SIZE,
            "closed table"
        );
        Ok(root)
    }

    /// Writes the root offset in front of everything else and returns the
    /// finished position of the complete flatbuffer.
    pub fn finish(&mut self, root: usize) -> Result<usize, Error> {
        self.finish_with(root, None)
    }

    /// Like [`finish`](Self::finish), with a 4-byte file identifier right after
    /// the root offset.
    pub fn finish_with_identifier(
        &mut self,
        root: usize,
        identifier: &[u8; FILE_IDENTIFIER_LENGTH],
    ) -> Result<usize, Error> {
        self.finish_with(root, Some(identifier))
    }

    fn finish_with(
        &mut self,
        root: usize,
        identifier: Option<&[u8; FILE_IDENTIFIER_LENGTH]>,
    ) -> Result<usize, Error> {
        if !self.scopes.is_empty() {
            return Err(Error::scope_mismatch(format!(
                "finish called with {} scopes still open",
                self.depth()
            )));
        }
        let prefix = SIZE_OF_UOFFSET + identifier.map_or(0, |id| id.len());
        let min_align = self.min_align.max(SIZE_OF_UOFFSET);
        self.prealign_for(prefix, min_align);
        if let Some(identifier) = identifier {
            self.buffer.write_back(identifier);
        }
        self.write_reference(root)?;
        let finished = self.buffer.back_size();
        trace!(root, finished, min_align, "finished flatbuffer");
        Ok(finished)
    }

    /// Writes a string block (`[len: u32][bytes][0]`) and returns its finished
    /// position. Empty strings are not written and yield [`NULL_REFERENCE`].
    pub fn create_string(&mut self, value: &str) -> Result<usize, Error> {
        if value.is_empty() {
            return Ok(NULL_REFERENCE);
        }
        self.create_string_block(value)
    }

    /// Writes a string block even for an empty string.
    pub fn create_string_block(&mut self, value: &str) -> Result<usize, Error> {
        self.check_field_order("string")?;
        let bytes = value.as_bytes();
        let len = to_u32(bytes.len(), "string length")?;
        self.prealign_for(bytes.len() + 1, SIZE_OF_UOFFSET);
        self.buffer.write_back_u8(0);
        self.buffer.write_back(bytes);
        self.buffer.write_back_u32(len);
        Ok(self.buffer.back_size())
    }

    fn write_nested_table<F>(&mut self, body: F) -> Result<usize, Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        let mark = self.start_table()?;
        body(self)?;
        self.end_table(mark)
    }

    /// Pads, reserves `size` bytes for `produce` and records a value field.
    fn add_value_field<F>(
        &mut self,
        slot: Slot,
        size: usize,
        align: usize,
        produce: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut [u8]),
    {
        check_slot(slot)?;
        self.check_in_table()?;
        let (field_size, field_align) = match (u8::try_from(size), u8::try_from(align)) {
            (Ok(size), Ok(align)) if size > 0 && align > 0 => (size, align),
            _ => {
                return Err(Error::unsupported(format!(
                    "value field of {size} bytes aligned to {align} cannot be stored inline"
                )))
            }
        };

        self.prealign(align);
        produce(self.buffer.alloc_back(size));
        let position = to_u32(self.buffer.back_size(), "value position")?;
        self.buffer
            .write_front(&PendingField::value(slot, field_size, field_align, position).to_bytes());
        self.set_has_values(true);
        Ok(())
    }

    fn add_reference_field(&mut self, slot: Slot, target: usize) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        if target > self.buffer.back_size() {
            return Err(Error::invalid_reference(target, self.buffer.back_size()));
        }
        let target = to_u32(target, "reference target")?;
        self.buffer
            .write_front(&PendingField::reference(slot, target).to_bytes());
        Ok(())
    }

    /// Stores a `u32` offset from the next finished position to `target` and
    /// returns the finished position of the stored offset.
    fn write_reference(&mut self, target: usize) -> Result<usize, Error> {
        if target == NULL_REFERENCE || target > self.buffer.back_size() {
            return Err(Error::invalid_reference(target, self.buffer.back_size()));
        }
        self.prealign(SIZE_OF_UOFFSET);
        let end = self.buffer.back_size() + SIZE_OF_UOFFSET;
        let offset = to_u32(end - target, "reference offset")?;
        self.buffer.write_back_u32(offset);
        Ok(self.buffer.back_size())
    }

    /// Resolves the reference records between `start` and `end`; returns the
    /// object size and the highest slot in use.
    fn write_table_fields(&mut self, start: usize, end: usize) -> Result<(usize, Slot), Error> {
        let mut max_slot = FIRST_FIELD_SLOT;
        let mut object_size = 0;
        for pos in (start..end).step_by(FIELD_RECORD_SIZE) {
            let mut field = PendingField::read(self.buffer.front_at(pos)?);
            max_slot = max_slot.max(field.slot);
            if field.is_null() {
                continue;
            }
            if field.is_reference() {
                let location = self.write_reference(field.payload as usize)?;
                field.payload = to_u32(location, "reference position")?;
                field.write_to(self.buffer.front_at_mut(pos)?);
                object_size += SIZE_OF_UOFFSET;
            } else {
                object_size += field.size as usize;
            }
        }
        Ok((object_size, max_slot))
    }

    /// Writes a zeroed vtable plus its two size entries and returns the
    /// finished position of the slot offsets.
    fn create_vtable(&mut self, vtable_size: usize, object_size: usize) -> Result<usize, Error> {
        let object_size = u16::try_from(object_size).map_err(|_| {
            Error::offset_overflow(format!("table object of {object_size} bytes exceeds u16"))
        })?;
        self.buffer.pad_back(vtable_size - 2 * SIZE_OF_VOFFSET);
        let offsets = self.buffer.back_size();
        self.buffer.write_back_u16(object_size);
        self.buffer.write_back_u16(vtable_size as u16);
        Ok(offsets)
    }

    fn update_vtable(
        &mut self,
        start: usize,
        end: usize,
        root: usize,
        offsets: usize,
    ) -> Result<(), Error> {
        for pos in (start..end).step_by(FIELD_RECORD_SIZE) {
            let field = PendingField::read(self.buffer.front_at(pos)?);
            if field.payload == 0 {
                continue;
            }
            let distance = root - field.payload as usize;
            let voffset = u16::try_from(distance).map_err(|_| {
                Error::offset_overflow(format!(
                    "field in slot {} is {distance} bytes from its table root",
                    field.slot
                ))
            })?;
            let index = (field.slot - FIRST_FIELD_SLOT) as usize * SIZE_OF_VOFFSET;
            let slots = self.buffer.back_at_mut(offsets)?;
            LittleEndian::write_u16(&mut slots[index..index + SIZE_OF_VOFFSET], voffset);
        }
        Ok(())
    }

    /// Replaces the vtable just written below `root` with an identical one
    /// written earlier, if there is one.
    fn share_vtable(&mut self, root: usize, vtable_size: usize) -> Result<(), Error> {
        let vtable = self.buffer.back_size();
        let candidate = &self.buffer.back_at(vtable)?[..vtable_size];
        let mut existing = None;
        for &pos in &self.vtables {
            let other = self.buffer.back_at(pos)?;
            if other.len() >= vtable_size && &other[..vtable_size] == candidate {
                existing = Some(pos);
                break;
            }
        }

        match existing {
            Some(pos) => {
                self.buffer.erase_back(vtable_size)?;
                // vtable = table - soffset; an older vtable sits above the table.
                let soffset = i32::try_from(pos as i64 - root as i64).map_err(|_| {
                    Error::offset_overflow(format!("shared vtable at {pos} out of i32 range"))
                })?;
                LittleEndian::write_i32(&mut self.buffer.back_at_mut(root)?[..SIZE_OF_SOFFSET], soffset);
                trace!(root, vtable = pos, "shared vtable");
            }
            None => self.vtables.push(vtable),
        }
        Ok(())
    }

    fn prealign(&mut self, alignment: usize) {
        self.prealign_for(0, alignment);
    }

    /// Pads the finished extent so that writing `len` more bytes ends on a
    /// multiple of `alignment`.
    fn prealign_for(&mut self, len: usize, alignment: usize) {
        self.min_align = self.min_align.max(alignment);
        let padding = (alignment - (self.buffer.back_size() + len) % alignment) % alignment;
        if padding > 0 {
            self.buffer.pad_back(padding);
        }
    }

    fn enter_scope(&mut self, scope: Scope, what: &'static str) -> Result<(), Error> {
        self.check_field_order(what)?;
        if self.depth() >= self.config.max_depth() {
            return Err(Error::depth_exceed(format!(
                "Maximum nesting depth ({}) exceeded while starting a {what}",
                self.config.max_depth()
            )));
        }
        self.scopes.push(scope);
        Ok(())
    }

    /// Nested objects land in the finished extent right away; once a value
    /// field of the enclosing table is written, they would split that table.
    /// Value elements of a vector must stay contiguous, so nothing may be
    /// started between them regardless of the configuration.
    fn check_field_order(&self, what: &'static str) -> Result<(), Error> {
        match self.scopes.last() {
            Some(Scope::Table { has_values: true }) if self.config.is_strict_field_order() => {
                Err(Error::field_order(format!(
                    "{what} started after a value field of the enclosing table; \
                     reference fields must be written before value fields"
                )))
            }
            Some(Scope::Vector { values, .. }) if *values > 0 => Err(Error::field_order(format!(
                "{what} started between the value elements of a vector"
            ))),
            _ => Ok(()),
        }
    }

    /// Field writes need a table as the innermost open scope.
    fn check_in_table(&self) -> Result<(), Error> {
        match self.scopes.last() {
            Some(Scope::Table { .. }) => Ok(()),
            Some(Scope::Vector { .. }) => Err(Error::scope_mismatch(
                "table field written while a vector scope is innermost",
            )),
            None => Err(Error::scope_mismatch("field written outside of a table scope")),
        }
    }

    fn has_values(&self) -> bool {
        matches!(self.scopes.last(), Some(Scope::Table { has_values: true }))
    }

    fn set_has_values(&mut self, value: bool) {
        if let Some(Scope::Table { has_values }) = self.scopes.last_mut() {
            *has_values = value;
        }
    }
}

#[inline(always)]
fn check_slot(slot: Slot) -> Result<(), Error> {
    if !(FIRST_FIELD_SLOT..=MAX_SLOT).contains(&slot) {
        return Err(Error::invalid_slot(slot));
    }
    Ok(())
}

fn check_native_layout<T: NativeStruct>() -> Result<(), Error> {
    if T::STRUCT_ALIGNMENT == 0 || T::STRUCT_SIZE == 0 || T::STRUCT_SIZE % T::STRUCT_ALIGNMENT != 0
    {
        return Err(Error::unsupported(format!(
            "native struct of {} bytes cannot be aligned to {}",
            T::STRUCT_SIZE,
            T::STRUCT_ALIGNMENT
        )));
    }
    Ok(())
}

fn to_u32(value: usize, what: &'static str) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| Error::offset_overflow(format!("{what} {value} exceeds u32")))
}
