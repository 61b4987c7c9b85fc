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

//! # Flatwriter
//!
//! Encodes Rust objects as flatbuffers. Objects describe themselves through
//! [`TableSerializer`] (and [`UnionSerializer`] for unions); the writer takes
//! care of vtables, alignment and relative references.
//!
//! ```rust
//! use flatwriter::{Error, FlatbufferWriter, Flatwriter, TableSerializer};
//!
//! struct Entry {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl TableSerializer for Entry {
//!     fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
//!         writer.string(&self.name, 3)?;
//!         writer.scalar(self.id, 2, 0)
//!     }
//! }
//!
//! let flatwriter = Flatwriter::default();
//! let bytes = flatwriter
//!     .serialize(&Entry { id: 42, name: "hi".to_string() })
//!     .unwrap();
//! assert_eq!(bytes.len() % 4, 0);
//! ```

pub use flatwriter_core::{
    bytemuck, types, types::Slot, types::UNION_NONE, write_flatbuffer, Config, Error,
    FlatbufferWriter, Flatwriter, InwardBuffer, NativeStruct, Scalar, TableMark,
    TableSerializer, UnionSerializer, VectorMark,
};
