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

use tracing::{debug, instrument};

use crate::buffer::InwardBuffer;
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::serializer::TableSerializer;
use crate::types::FILE_IDENTIFIER_LENGTH;
use crate::util::Pool;
use crate::writer::FlatbufferWriter;

/// Entry point for encoding objects as flatbuffers.
///
/// A `Flatwriter` holds the encoding options and a pool of buffers. It is
/// `Send + Sync`: every call borrows its own buffer from the pool, so one
/// instance can serve any number of threads.
///
/// # Examples
///
/// ```rust
/// use flatwriter_core::error::Error;
/// use flatwriter_core::serializer::TableSerializer;
/// use flatwriter_core::writer::FlatbufferWriter;
/// use flatwriter_core::Flatwriter;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl TableSerializer for Point {
///     fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
///         writer.scalar(self.x, 2, 0)?;
///         writer.scalar(self.y, 3, 0)
///     }
/// }
///
/// let flatwriter = Flatwriter::default().force_defaults(false);
/// let bytes = flatwriter.serialize(&Point { x: 1, y: 0 }).unwrap();
/// assert_eq!(bytes.len() % 4, 0);
/// ```
pub struct Flatwriter {
    config: Config,
    buffer_pool: Pool<InwardBuffer>,
}

impl Default for Flatwriter {
    fn default() -> Self {
        Flatwriter::with_config(Config::default())
    }
}

impl Flatwriter {
    pub fn with_config(config: Config) -> Self {
        let capacity = config.initial_capacity();
        Flatwriter {
            config,
            buffer_pool: Pool::new(move || InwardBuffer::with_capacity(capacity)),
        }
    }

    /// Sets the capacity of newly allocated buffers. Buffers already pooled
    /// are dropped.
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        Flatwriter::with_config(self.config)
    }

    /// Sets the maximum number of nested table and vector scopes.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// When `false`, scalars equal to their schema default are left out and
    /// read back as the default.
    pub fn force_defaults(mut self, force_defaults: bool) -> Self {
        self.config.force_defaults = force_defaults;
        self
    }

    /// Lets tables with the same field layout point at one shared vtable.
    pub fn share_vtables(mut self, share_vtables: bool) -> Self {
        self.config.share_vtables = share_vtables;
        self
    }

    /// When `true` (the default), starting a string, vector or table after a
    /// value field of the same table fails with [`Error::FieldOrder`].
    pub fn strict_field_order(mut self, strict_field_order: bool) -> Self {
        self.config.strict_field_order = strict_field_order;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes `record` as the root table of a new flatbuffer.
    #[instrument(name = "flatwriter::serialize", level = "debug", skip_all)]
    pub fn serialize<T: TableSerializer + ?Sized>(&self, record: &T) -> Result<Vec<u8>, Error> {
        self.serialize_pooled(|writer| writer.serialize_object(record))
    }

    /// Encodes `record` with a file identifier after the root offset.
    #[instrument(name = "flatwriter::serialize_with_identifier", level = "debug", skip_all)]
    pub fn serialize_with_identifier<T: TableSerializer + ?Sized>(
        &self,
        record: &T,
        identifier: &[u8; FILE_IDENTIFIER_LENGTH],
    ) -> Result<Vec<u8>, Error> {
        self.serialize_pooled(|writer| writer.serialize_object_with_identifier(record, identifier))
    }

    /// Encodes `record` into a caller-owned buffer and returns the finished
    /// region. The buffer must be empty or freshly [`reset`](InwardBuffer::reset).
    pub fn serialize_into<'b, T: TableSerializer + ?Sized>(
        &self,
        record: &T,
        buffer: &'b mut InwardBuffer,
    ) -> Result<&'b [u8], Error> {
        ensure!(
            buffer.back_size() == 0 && buffer.front_size() == 0,
            "serialize_into needs an empty buffer"
        );
        FlatbufferWriter::with_config(buffer, self.config.clone()).serialize_object(record)?;
        Ok(buffer.finished_data())
    }

    fn serialize_pooled<F>(&self, encode: F) -> Result<Vec<u8>, Error>
    where
        F: FnOnce(&mut FlatbufferWriter<'_>) -> Result<usize, Error>,
    {
        self.buffer_pool.borrow_mut(|buffer| -> Result<Vec<u8>, Error> {
            // A failed encode leaves its buffer dirty.
            buffer.reset();
            encode(&mut FlatbufferWriter::with_config(buffer, self.config.clone()))?;
            let bytes = buffer.dump();
            debug!(bytes = bytes.len(), "serialized flatbuffer");
            Ok(bytes)
        })
    }
}

/// Encodes `obj` with the default options into `buffer` and returns the
/// finished region.
pub fn write_flatbuffer<'b, T: TableSerializer + ?Sized>(
    obj: &T,
    buffer: &'b mut InwardBuffer,
) -> Result<&'b [u8], Error> {
    FlatbufferWriter::new(buffer).serialize_object(obj)?;
    Ok(buffer.finished_data())
}
