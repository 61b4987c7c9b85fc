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

/// A primitive that is stored inline, little-endian, at its natural alignment.
pub trait Scalar: Copy + PartialEq + 'static {
    const SIZE: usize;
    const ALIGN: usize = Self::SIZE;

    /// Writes `self` into `dst`, which is exactly `SIZE` bytes long.
    fn write_le(self, dst: &mut [u8]);
}

macro_rules! impl_scalar {
    ($ty:ty, $size:expr, $write:expr) => {
        impl Scalar for $ty {
            const SIZE: usize = $size;

            #[inline(always)]
            fn write_le(self, dst: &mut [u8]) {
                ($write)(dst, self)
            }
        }
    };
}

impl_scalar!(bool, 1, |dst: &mut [u8], v: bool| dst[0] = v as u8);
impl_scalar!(u8, 1, |dst: &mut [u8], v: u8| dst[0] = v);
impl_scalar!(i8, 1, |dst: &mut [u8], v: i8| dst[0] = v as u8);
impl_scalar!(u16, 2, LittleEndian::write_u16);
impl_scalar!(i16, 2, LittleEndian::write_i16);
impl_scalar!(u32, 4, LittleEndian::write_u32);
impl_scalar!(i32, 4, LittleEndian::write_i32);
impl_scalar!(u64, 8, LittleEndian::write_u64);
impl_scalar!(i64, 8, LittleEndian::write_i64);
impl_scalar!(f32, 4, LittleEndian::write_f32);
impl_scalar!(f64, 8, LittleEndian::write_f64);
