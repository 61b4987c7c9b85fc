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

/// An application type written in place of a schema struct.
///
/// The writer reserves `STRUCT_SIZE` bytes at `STRUCT_ALIGNMENT` and hands
/// them to [`NativeStruct::write_struct`]; padding and field bookkeeping stay
/// with the writer. `STRUCT_SIZE` must be a non-zero multiple of
/// `STRUCT_ALIGNMENT` so that consecutive vector elements stay aligned.
///
/// ```rust
/// use byteorder::{ByteOrder, LittleEndian};
/// use flatwriter_core::serializer::NativeStruct;
///
/// struct Vec2 {
///     x: f32,
///     y: f32,
/// }
///
/// impl NativeStruct for Vec2 {
///     const STRUCT_SIZE: usize = 8;
///     const STRUCT_ALIGNMENT: usize = 4;
///
///     fn write_struct(&self, dst: &mut [u8]) {
///         LittleEndian::write_f32(&mut dst[0..4], self.x);
///         LittleEndian::write_f32(&mut dst[4..8], self.y);
///     }
/// }
/// ```
pub trait NativeStruct {
    const STRUCT_SIZE: usize;
    const STRUCT_ALIGNMENT: usize;

    /// Fills `dst`, which is exactly `STRUCT_SIZE` bytes long.
    fn write_struct(&self, dst: &mut [u8]);
}

impl<T: NativeStruct> NativeStruct for &T {
    const STRUCT_SIZE: usize = T::STRUCT_SIZE;
    const STRUCT_ALIGNMENT: usize = T::STRUCT_ALIGNMENT;

    fn write_struct(&self, dst: &mut [u8]) {
        (**self).write_struct(dst)
    }
}
