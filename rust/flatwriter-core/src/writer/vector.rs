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

//! Vector scopes.
//!
//! Vectors of values are written straight into the finished extent, last
//! element first, so that the bytes read front to back in logical order.
//! Vectors of references (strings, tables) cannot do that: each element is a
//! complete object that has to be finished before the vector itself. Their
//! targets are staged as raw `u32` positions on the pending extent and turned
//! into offsets by [`FlatbufferWriter::end_vector`].

use std::mem::{align_of, size_of};

use byteorder::{ByteOrder, LittleEndian};
use bytemuck::Pod;
use tracing::trace;

use super::{check_native_layout, check_slot, to_u32, FlatbufferWriter, Scope};
use crate::bail;
use crate::error::Error;
use crate::serializer::{NativeStruct, Scalar, TableSerializer};
use crate::types::{Slot, NULL_REFERENCE, SIZE_OF_UOFFSET};

/// Handle of an open vector scope, returned by [`FlatbufferWriter::start_vector`].
#[must_use = "a vector scope must be closed with `end_vector`"]
#[derive(Debug)]
pub struct VectorMark {
    start: usize,
    depth: u32,
}

impl<'a> FlatbufferWriter<'a> {
    /// Opens a vector scope. Elements are added with the `add_vector_*`
    /// methods until the matching [`end_vector`](Self::end_vector).
    pub fn start_vector(&mut self) -> Result<VectorMark, Error> {
        let start = self.buffer.front_size();
        let scope = Scope::Vector {
            start,
            align: 1,
            values: 0,
        };
        self.enter_scope(scope, "vector")?;
        Ok(VectorMark {
            start,
            depth: self.depth(),
        })
    }

    /// Pads the finished extent so that `len` elements of `elem_size` bytes
    /// end up aligned to `alignment` and followed by an aligned length prefix.
    /// Must be called before adding value elements aligned to more than one
    /// byte; `end_vector` checks the elements against `alignment`.
    pub fn prealign_vector(
        &mut self,
        len: usize,
        elem_size: usize,
        alignment: usize,
    ) -> Result<(), Error> {
        if alignment == 0 {
            return Err(Error::unsupported("vector elements cannot be aligned to 0 bytes"));
        }
        let bytes = len.checked_mul(elem_size).ok_or_else(|| {
            Error::offset_overflow(format!(
                "vector of {len} elements of {elem_size} bytes overflows usize"
            ))
        })?;
        match self.scopes.last_mut() {
            Some(Scope::Vector { align, values: 0, .. }) => *align = (*align).max(alignment),
            Some(Scope::Vector { .. }) => {
                return Err(Error::invalid_data(
                    "prealign_vector called after value elements were added",
                ))
            }
            _ => return Err(vector_scope_error()),
        }
        if len == 0 {
            return Ok(());
        }
        self.prealign_for(bytes, SIZE_OF_UOFFSET);
        self.prealign_for(bytes, alignment);
        Ok(())
    }

    /// Adds a scalar element. Elements are added in reverse order.
    pub fn add_vector_value<T: Scalar>(&mut self, value: T) -> Result<(), Error> {
        self.add_vector_element(T::SIZE, T::ALIGN, |dst| value.write_le(dst))
    }

    /// Adds a struct element by copying its bytes. Elements are added in
    /// reverse order.
    pub fn add_vector_struct<T: Pod>(&mut self, value: &T) -> Result<(), Error> {
        let bytes = bytemuck::bytes_of(value);
        self.add_vector_element(size_of::<T>(), align_of::<T>(), |dst| {
            dst.copy_from_slice(bytes)
        })
    }

    /// Adds a struct element through its [`NativeStruct`] layout. Elements are
    /// added in reverse order.
    pub fn add_vector_native_struct<T: NativeStruct>(&mut self, value: &T) -> Result<(), Error> {
        check_native_layout::<T>()?;
        self.add_vector_element(T::STRUCT_SIZE, T::STRUCT_ALIGNMENT, |dst| {
            value.write_struct(dst)
        })
    }

    /// Stages a reference element. Unlike values, references are added in
    /// logical order.
    pub fn add_vector_reference(&mut self, target: usize) -> Result<(), Error> {
        match self.scopes.last() {
            Some(Scope::Vector { values: 0, .. }) => {}
            Some(Scope::Vector { .. }) => {
                return Err(Error::invalid_data(
                    "reference element added to a vector of values",
                ))
            }
            _ => return Err(vector_scope_error()),
        }
        if target == NULL_REFERENCE || target > self.buffer.back_size() {
            return Err(Error::invalid_reference(target, self.buffer.back_size()));
        }
        let target = to_u32(target, "vector element")?;
        self.buffer.write_front_u32(target);
        Ok(())
    }

    /// Closes the vector opened by `mark`, resolving staged references, and
    /// writes the `len` prefix. Returns the finished position of the vector,
    /// or [`NULL_REFERENCE`] for an empty one.
    pub fn end_vector(&mut self, mark: VectorMark, len: usize) -> Result<usize, Error> {
        let VectorMark { start, depth } = mark;
        let end = self.buffer.front_size();
        let (align, values) = match self.scopes.last() {
            Some(&Scope::Vector {
                start: scope_start,
                align,
                values,
            }) if scope_start == start
                && depth == self.depth()
                && start <= end
                && (end - start) % SIZE_OF_UOFFSET == 0 =>
            {
                (align, values)
            }
            innermost => {
                return Err(Error::scope_mismatch(format!(
                    "vector mark (pending {start}, depth {depth}) does not match the open scope \
                     ({innermost:?}, pending {end}, depth {})",
                    self.depth()
                )))
            }
        };

        let references = (end - start) / SIZE_OF_UOFFSET;
        let elements = references + values;
        if elements != len {
            return Err(Error::invalid_data(format!(
                "vector of {len} elements was given {elements} elements"
            )));
        }
        if references != 0 {
            // Last element first, so the offsets read in staging order.
            for index in (0..references).rev() {
                let pos = start + index * SIZE_OF_UOFFSET;
                let target = LittleEndian::read_u32(self.buffer.front_at(pos)?) as usize;
                self.write_reference(target)?;
            }
            self.buffer.erase_front(end - start)?;
        }
        self.scopes.pop();

        if len == 0 {
            return Ok(NULL_REFERENCE);
        }
        let required = if values > 0 {
            align.max(SIZE_OF_UOFFSET)
        } else {
            SIZE_OF_UOFFSET
        };
        if self.buffer.back_size() % required != 0 {
            return Err(Error::invalid_data(format!(
                "vector elements end unaligned to {required} bytes; \
                 call prealign_vector before adding values"
            )));
        }
        self.buffer.write_back_u32(to_u32(len, "vector length")?);
        let vector = self.buffer.back_size();
        trace!(vector, len, references, "closed vector");
        Ok(vector)
    }

    /// Writes one value element into the innermost vector scope.
    fn add_vector_element<F>(&mut self, size: usize, align: usize, produce: F) -> Result<(), Error>
    where
        F: FnOnce(&mut [u8]),
    {
        let front = self.buffer.front_size();
        match self.scopes.last_mut() {
            Some(Scope::Vector { start, .. }) if *start != front => {
                return Err(Error::invalid_data(
                    "value element added to a vector of references",
                ))
            }
            Some(Scope::Vector {
                align: required, ..
            }) if align > *required => {
                return Err(Error::invalid_data(format!(
                    "vector element aligned to {align} bytes added to a vector prealigned \
                     to {required}; call prealign_vector with the element alignment"
                )))
            }
            Some(Scope::Vector { values, .. }) => *values += 1,
            _ => return Err(vector_scope_error()),
        }
        produce(self.buffer.alloc_back(size));
        Ok(())
    }

    pub fn create_vector_of_scalars<T: Scalar>(&mut self, values: &[T]) -> Result<usize, Error> {
        let mark = self.start_vector()?;
        self.prealign_vector(values.len(), T::SIZE, T::ALIGN)?;
        for &value in values.iter().rev() {
            self.add_vector_value(value)?;
        }
        self.end_vector(mark, values.len())
    }

    pub fn create_vector_of_structs<T: Pod>(&mut self, values: &[T]) -> Result<usize, Error> {
        let mark = self.start_vector()?;
        self.prealign_vector(values.len(), size_of::<T>(), align_of::<T>())?;
        for value in values.iter().rev() {
            self.add_vector_struct(value)?;
        }
        self.end_vector(mark, values.len())
    }

    pub fn create_vector_of_native_structs<T: NativeStruct>(
        &mut self,
        values: &[T],
    ) -> Result<usize, Error> {
        check_native_layout::<T>()?;
        let mark = self.start_vector()?;
        self.prealign_vector(values.len(), T::STRUCT_SIZE, T::STRUCT_ALIGNMENT)?;
        for value in values.iter().rev() {
            self.add_vector_native_struct(value)?;
        }
        self.end_vector(mark, values.len())
    }

    /// Empty strings inside a vector are written as empty string blocks; a
    /// vector element cannot be null.
    pub fn create_vector_of_strings<S: AsRef<str>>(&mut self, values: &[S]) -> Result<usize, Error> {
        let mark = self.start_vector()?;
        for value in values {
            let target = self.create_string_block(value.as_ref())?;
            self.add_vector_reference(target)?;
        }
        self.end_vector(mark, values.len())
    }

    pub fn create_vector_of_tables<T: TableSerializer>(&mut self, values: &[T]) -> Result<usize, Error> {
        let mark = self.start_vector()?;
        for value in values {
            if value.is_none() {
                bail!("vector element table is absent");
            }
            let target = self.write_nested_table(|writer| value.serialize_flatbuffer(writer))?;
            self.add_vector_reference(target)?;
        }
        self.end_vector(mark, values.len())
    }

    pub fn vector_of_scalars<T: Scalar>(&mut self, values: &[T], slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_vector_of_scalars(values)?;
        self.add_reference_field(slot, target)
    }

    pub fn vector_of_structs<T: Pod>(&mut self, values: &[T], slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_vector_of_structs(values)?;
        self.add_reference_field(slot, target)
    }

    pub fn vector_of_native_structs<T: NativeStruct>(
        &mut self,
        values: &[T],
        slot: Slot,
    ) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_vector_of_native_structs(values)?;
        self.add_reference_field(slot, target)
    }

    pub fn vector_of_strings<S: AsRef<str>>(&mut self, values: &[S], slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_vector_of_strings(values)?;
        self.add_reference_field(slot, target)
    }

    pub fn vector_of_tables<T: TableSerializer>(&mut self, values: &[T], slot: Slot) -> Result<(), Error> {
        check_slot(slot)?;
        self.check_in_table()?;
        let target = self.create_vector_of_tables(values)?;
        self.add_reference_field(slot, target)
    }
}

#[cold]
fn vector_scope_error() -> Error {
    Error::scope_mismatch("vector element written while no vector scope is innermost")
}
