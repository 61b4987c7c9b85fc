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

/// Configuration for flatbuffer encoding.
///
/// Held by the [`Flatwriter`](crate::flatwriter::Flatwriter) facade and copied
/// into every [`FlatbufferWriter`](crate::writer::FlatbufferWriter) it creates,
/// so a single encode always sees a consistent set of options.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of freshly allocated buffers, in bytes.
    pub initial_capacity: usize,
    /// Maximum number of nested table/vector scopes.
    pub max_depth: u32,
    /// Whether scalar fields equal to their schema default are still written.
    pub force_defaults: bool,
    /// Whether tables with identical vtables point at a single shared copy.
    pub share_vtables: bool,
    /// Whether starting a nested object after a value field of the same table
    /// is rejected.
    pub strict_field_order: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_capacity: 1024,
            max_depth: 64,
            force_defaults: true,
            share_vtables: false,
            strict_field_order: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Check if default-valued scalars are always written.
    #[inline(always)]
    pub fn is_force_defaults(&self) -> bool {
        self.force_defaults
    }

    /// Check if vtable sharing is enabled.
    #[inline(always)]
    pub fn is_share_vtables(&self) -> bool {
        self.share_vtables
    }

    /// Check if the reference-before-value field order is enforced.
    #[inline(always)]
    pub fn is_strict_field_order(&self) -> bool {
        self.strict_field_order
    }
}
