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

use std::rc::Rc;

use crate::error::Error;
use crate::serializer::{TableSerializer, UnionSerializer};
use crate::writer::FlatbufferWriter;

impl<T: TableSerializer + ?Sized> TableSerializer for Rc<T> {
    fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
        T::serialize_flatbuffer(&**self, writer)
    }

    fn is_none(&self) -> bool {
        T::is_none(&**self)
    }
}

impl<U: UnionSerializer + ?Sized> UnionSerializer for Rc<U> {
    fn union_type(&self) -> u8 {
        U::union_type(&**self)
    }

    fn serialize_flatbuffer(&self, writer: &mut FlatbufferWriter<'_>) -> Result<(), Error> {
        U::serialize_flatbuffer(&**self, writer)
    }
}
