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

//! Traits through which objects describe themselves to the writer.
//!
//! Generated code implements [`TableSerializer`] for every schema table and
//! [`UnionSerializer`] for every schema union. Field values are written with
//! one of three byte producers: [`Scalar`] for the fixed set of little-endian
//! primitives, any `bytemuck::Pod` type for schema structs (copied raw), and
//! [`NativeStruct`] for application types that map onto a schema struct but
//! need their own byte layout.

use crate::error::Error;
use crate::writer::FlatbufferWriter;

mod arc;
mod box_;
mod number;
mod option;
mod rc;
mod struct_;

pub use number::Scalar;
pub use struct_::NativeStruct;

/// An object stored as a flatbuffer table.
///
/// `serialize_flatbuffer` runs inside a table scope that the writer opened for
/// this object. It must write every reference field (strings, tables, unions,
/// vectors) before any value field (scalars, structs), because value bytes
/// are placed in the table as soon as they are written.
///
/// ```rust
/// use flatwriter_core::error::Error;
/// use flatwriter_core::serializer::TableSerializer;
/// use flatwriter_core::writer::FlatbufferWriter;
///
/// struct Monster {
///     name: String,
///     hp: u16,
/// }
///
/// impl TableSerializer for Monster {
///     fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
///         writer.string(&self.name, 3)?;
///         writer.scalar(self.hp, 2, 100)
///     }
/// }
/// ```
pub trait TableSerializer {
    fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error>;

    /// Absent tables are skipped and leave their slot empty.
    fn is_none(&self) -> bool {
        false
    }
}

/// A flatbuffer union: a `u8` discriminant plus one table per variant.
pub trait UnionSerializer {
    /// The discriminant of the active variant, [`UNION_NONE`](crate::types::UNION_NONE)
    /// when unset.
    fn union_type(&self) -> u8;

    /// Writes the fields of the active variant into an open table scope.
    /// Never called for [`UNION_NONE`](crate::types::UNION_NONE).
    fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error>;
}

impl<T: TableSerializer + ?Sized> TableSerializer for &T {
    fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
        (**self).serialize_flatbuffer(writer)
    }

    fn is_none(&self) -> bool {
        (**self).is_none()
    }
}
