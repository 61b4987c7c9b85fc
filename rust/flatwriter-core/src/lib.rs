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

//! # Flatwriter Core
//!
//! A bottom-up encoder for the flatbuffer table format: tables described by
//! vtables, length-prefixed vectors and strings, unions, and relative `u32`
//! references, all little-endian and naturally aligned.
//!
//! ## Architecture
//!
//! - **`buffer`**: [`InwardBuffer`](buffer::InwardBuffer), one allocation
//!   with a pending extent growing forward and a finished extent growing
//!   backward
//! - **`writer`**: [`FlatbufferWriter`](writer::FlatbufferWriter), the table
//!   and vector scopes, field records and vtable synthesis
//! - **`serializer`**: the traits objects implement to describe their fields
//! - **`flatwriter`**: the [`Flatwriter`] entry point with pooled buffers
//! - **`config`**, **`error`**, **`types`**, **`util`**
//!
//! ## Key Concepts
//!
//! Children are always finished before their parents. Every position the
//! writer hands out is a distance from the end of the buffer, so it stays
//! valid while the buffer grows and is resolved into a relative offset only
//! when the referencing table closes.
//!
//! Inside one table, reference fields (strings, vectors, nested tables,
//! unions) are written before value fields (scalars, structs). Value bytes
//! are part of the table as soon as they are written; a nested object started
//! after them would land in the middle of the table.
//!
//! ## Usage
//!
//! ```rust
//! use flatwriter_core::error::Error;
//! use flatwriter_core::serializer::TableSerializer;
//! use flatwriter_core::writer::FlatbufferWriter;
//! use flatwriter_core::Flatwriter;
//!
//! struct Weapon {
//!     name: String,
//!     damage: i16,
//! }
//!
//! struct Monster {
//!     name: String,
//!     inventory: Vec<u8>,
//!     weapons: Vec<Weapon>,
//!     hp: u16,
//! }
//!
//! impl TableSerializer for Weapon {
//!     fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
//!         writer.string(&self.name, 2)?;
//!         writer.scalar(self.damage, 3, 0)
//!     }
//! }
//!
//! impl TableSerializer for Monster {
//!     fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
//!         writer.string(&self.name, 3)?;
//!         writer.vector_of_scalars(&self.inventory, 4)?;
//!         writer.vector_of_tables(&self.weapons, 5)?;
//!         writer.scalar(self.hp, 2, 100)
//!     }
//! }
//!
//! let monster = Monster {
//!     name: "orc".to_string(),
//!     inventory: vec![1, 2, 3],
//!     weapons: vec![Weapon { name: "axe".to_string(), damage: 5 }],
//!     hp: 300,
//! };
//! let bytes = Flatwriter::default().serialize(&monster).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod flatwriter;
pub mod serializer;
pub mod types;
pub mod util;
pub mod writer;

pub use crate::buffer::InwardBuffer;
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::flatwriter::{write_flatbuffer, Flatwriter};
pub use crate::serializer::{NativeStruct, Scalar, TableSerializer, UnionSerializer};
pub use crate::writer::{FlatbufferWriter, TableMark, VectorMark};
pub use bytemuck;
