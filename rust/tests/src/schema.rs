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

//! Readers for the tables the integration tests write.
//!
//! Slot `n` of the writer is vtable byte offset `2 * n`, so the first field
//! of every table sits at `VT_* = 4`.

use flatbuffers::{ForwardsUOffset, Follow, InvalidFlatbuffer, VOffsetT, Vector, Verifiable, Verifier};

use crate::{Layout, Raw};

pub const SHAPE_CIRCLE: u8 = 1;
pub const SHAPE_SQUARE: u8 = 2;

/// `{ x: f32, y: f32, z: f32 }`
pub type Vec3 = Raw<12>;
/// `{ r: u8, g: u8, b: u8 }`
pub type Color = Raw<3>;
/// `{ w: u16, h: u16 }`
pub type Extent = Raw<4>;

macro_rules! table_view {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            layout: Layout<'a>,
        }

        impl<'a> Follow<'a> for $name<'a> {
            type Inner = $name<'a>;

            #[inline]
            unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
                $name {
                    layout: Layout::new(buf, loc),
                }
            }
        }

        impl<'a> $name<'a> {
            pub fn layout(&self) -> Layout<'a> {
                self.layout
            }
        }
    )*};
}

table_view!(
    /// `{ id: u32, name: string }`
    Entry,
    /// `{ value: i32 }`
    Item,
    /// A table without fields.
    Empty,
    /// One field of every scalar width.
    Scalars,
    /// `{ name: string, child: Item, count: u16, position: Vec3, color: Color }`
    Record,
    /// `{ flag: u8, extent: Extent }`
    Screen,
    /// `{ title: string, inner: Inner, level: u64 }`
    Outer,
    /// `{ note: string, depth: u8 }`
    Inner,
    /// Four `Item` fields.
    Holder,
    /// `{ shape_type: u8, shape: Shape, tag: string }`
    Drawing,
    /// `{ radius: f32 }`
    Circle,
    /// `{ label: string, side: u16 }`
    Square,
    /// `{ a: Entry, b: Entry }`
    Pair,
    /// `{ items: [Item] }`
    Inventory,
    /// `{ bytes: [u8], longs: [u64], names: [string], points: [Vec3], colors: [Color], extents: [Extent] }`
    Sequences,
    /// `{ names: [string], numbers: [u16] }`
    Lists,
    /// `{ groups: [Group] }`
    Directory,
    /// `{ name: string, members: [Item] }`
    Group,
    /// `{ label: string, tiny: u8, wide: f64, half: i16, point: Vec3, flag: bool }`
    Mixed,
);

impl<'a> Entry<'a> {
    pub const VT_ID: VOffsetT = 4;
    pub const VT_NAME: VOffsetT = 6;

    pub fn id(&self) -> Option<u32> {
        self.layout.get::<u32>(Self::VT_ID)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_NAME)
    }
}

impl Verifiable for Entry<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u32>("id", Self::VT_ID, false)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Item<'a> {
    pub const VT_VALUE: VOffsetT = 4;

    pub fn value(&self) -> Option<i32> {
        self.layout.get::<i32>(Self::VT_VALUE)
    }
}

impl Verifiable for Item<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<i32>("value", Self::VT_VALUE, false)?
            .finish();
        Ok(())
    }
}

impl Verifiable for Empty<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?.finish();
        Ok(())
    }
}

impl<'a> Scalars<'a> {
    pub const VT_FLAG: VOffsetT = 4;
    pub const VT_TINY: VOffsetT = 6;
    pub const VT_BYTE: VOffsetT = 8;
    pub const VT_SHORT: VOffsetT = 10;
    pub const VT_USHORT: VOffsetT = 12;
    pub const VT_INT: VOffsetT = 14;
    pub const VT_UINT: VOffsetT = 16;
    pub const VT_LONG: VOffsetT = 18;
    pub const VT_ULONG: VOffsetT = 20;
    pub const VT_FLOAT: VOffsetT = 22;
    pub const VT_DOUBLE: VOffsetT = 24;

    pub fn flag(&self) -> Option<bool> {
        self.layout.get::<bool>(Self::VT_FLAG)
    }

    pub fn tiny(&self) -> Option<i8> {
        self.layout.get::<i8>(Self::VT_TINY)
    }

    pub fn byte(&self) -> Option<u8> {
        self.layout.get::<u8>(Self::VT_BYTE)
    }

    pub fn short(&self) -> Option<i16> {
        self.layout.get::<i16>(Self::VT_SHORT)
    }

    pub fn ushort(&self) -> Option<u16> {
        self.layout.get::<u16>(Self::VT_USHORT)
    }

    pub fn int(&self) -> Option<i32> {
        self.layout.get::<i32>(Self::VT_INT)
    }

    pub fn uint(&self) -> Option<u32> {
        self.layout.get::<u32>(Self::VT_UINT)
    }

    pub fn long(&self) -> Option<i64> {
        self.layout.get::<i64>(Self::VT_LONG)
    }

    pub fn ulong(&self) -> Option<u64> {
        self.layout.get::<u64>(Self::VT_ULONG)
    }

    pub fn float(&self) -> Option<f32> {
        self.layout.get::<f32>(Self::VT_FLOAT)
    }

    pub fn double(&self) -> Option<f64> {
        self.layout.get::<f64>(Self::VT_DOUBLE)
    }
}

impl Verifiable for Scalars<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<bool>("flag", Self::VT_FLAG, false)?
            .visit_field::<i8>("tiny", Self::VT_TINY, false)?
            .visit_field::<u8>("byte", Self::VT_BYTE, false)?
            .visit_field::<i16>("short", Self::VT_SHORT, false)?
            .visit_field::<u16>("ushort", Self::VT_USHORT, false)?
            .visit_field::<i32>("int", Self::VT_INT, false)?
            .visit_field::<u32>("uint", Self::VT_UINT, false)?
            .visit_field::<i64>("long", Self::VT_LONG, false)?
            .visit_field::<u64>("ulong", Self::VT_ULONG, false)?
            .visit_field::<f32>("float", Self::VT_FLOAT, false)?
            .visit_field::<f64>("double", Self::VT_DOUBLE, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Record<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_CHILD: VOffsetT = 6;
    pub const VT_COUNT: VOffsetT = 8;
    pub const VT_POSITION: VOffsetT = 10;
    pub const VT_COLOR: VOffsetT = 12;

    pub fn name(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_NAME)
    }

    pub fn child(&self) -> Option<Item<'a>> {
        self.layout.get::<ForwardsUOffset<Item<'a>>>(Self::VT_CHILD)
    }

    pub fn count(&self) -> Option<u16> {
        self.layout.get::<u16>(Self::VT_COUNT)
    }

    pub fn position(&self) -> Option<&'a Vec3> {
        self.layout.get::<Vec3>(Self::VT_POSITION)
    }

    pub fn color(&self) -> Option<&'a Color> {
        self.layout.get::<Color>(Self::VT_COLOR)
    }
}

impl Verifiable for Record<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<Item>>("child", Self::VT_CHILD, false)?
            .visit_field::<u16>("count", Self::VT_COUNT, false)?
            .visit_field::<Vec3>("position", Self::VT_POSITION, false)?
            .visit_field::<Color>("color", Self::VT_COLOR, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Screen<'a> {
    pub const VT_FLAG: VOffsetT = 4;
    pub const VT_EXTENT: VOffsetT = 6;

    pub fn flag(&self) -> Option<u8> {
        self.layout.get::<u8>(Self::VT_FLAG)
    }

    pub fn extent(&self) -> Option<&'a Extent> {
        self.layout.get::<Extent>(Self::VT_EXTENT)
    }
}

impl Verifiable for Screen<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u8>("flag", Self::VT_FLAG, false)?
            .visit_field::<Extent>("extent", Self::VT_EXTENT, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Outer<'a> {
    pub const VT_TITLE: VOffsetT = 4;
    pub const VT_INNER: VOffsetT = 6;
    pub const VT_LEVEL: VOffsetT = 8;

    pub fn title(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_TITLE)
    }

    pub fn inner(&self) -> Option<Inner<'a>> {
        self.layout.get::<ForwardsUOffset<Inner<'a>>>(Self::VT_INNER)
    }

    pub fn level(&self) -> Option<u64> {
        self.layout.get::<u64>(Self::VT_LEVEL)
    }
}

impl Verifiable for Outer<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("title", Self::VT_TITLE, false)?
            .visit_field::<ForwardsUOffset<Inner>>("inner", Self::VT_INNER, false)?
            .visit_field::<u64>("level", Self::VT_LEVEL, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Inner<'a> {
    pub const VT_NOTE: VOffsetT = 4;
    pub const VT_DEPTH: VOffsetT = 6;

    pub fn note(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_NOTE)
    }

    pub fn depth(&self) -> Option<u8> {
        self.layout.get::<u8>(Self::VT_DEPTH)
    }
}

impl Verifiable for Inner<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("note", Self::VT_NOTE, false)?
            .visit_field::<u8>("depth", Self::VT_DEPTH, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Holder<'a> {
    pub const VT_BOXED: VOffsetT = 4;
    pub const VT_SHARED: VOffsetT = 6;
    pub const VT_ATOMIC: VOffsetT = 8;
    pub const VT_BORROWED: VOffsetT = 10;

    /// The `Item` at `voffset`.
    pub fn item(&self, voffset: VOffsetT) -> Option<Item<'a>> {
        self.layout.get::<ForwardsUOffset<Item<'a>>>(voffset)
    }
}

impl Verifiable for Holder<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Item>>("boxed", Self::VT_BOXED, false)?
            .visit_field::<ForwardsUOffset<Item>>("shared", Self::VT_SHARED, false)?
            .visit_field::<ForwardsUOffset<Item>>("atomic", Self::VT_ATOMIC, false)?
            .visit_field::<ForwardsUOffset<Item>>("borrowed", Self::VT_BORROWED, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Drawing<'a> {
    pub const VT_SHAPE_TYPE: VOffsetT = 4;
    pub const VT_SHAPE: VOffsetT = 6;
    pub const VT_TAG: VOffsetT = 8;

    /// The union discriminant; an absent one reads as `NONE`.
    pub fn shape_type(&self) -> u8 {
        self.layout.get::<u8>(Self::VT_SHAPE_TYPE).unwrap_or(0)
    }

    pub fn shape_as_circle(&self) -> Option<Circle<'a>> {
        match self.shape_type() {
            SHAPE_CIRCLE => self.layout.get::<ForwardsUOffset<Circle<'a>>>(Self::VT_SHAPE),
            _ => None,
        }
    }

    pub fn shape_as_square(&self) -> Option<Square<'a>> {
        match self.shape_type() {
            SHAPE_SQUARE => self.layout.get::<ForwardsUOffset<Square<'a>>>(Self::VT_SHAPE),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_TAG)
    }
}

impl Verifiable for Drawing<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_union::<u8, _>(
                "shape_type",
                Self::VT_SHAPE_TYPE,
                "shape",
                Self::VT_SHAPE,
                false,
                |key, v, pos| match key {
                    SHAPE_CIRCLE => {
                        v.verify_union_variant::<ForwardsUOffset<Circle>>("Shape::Circle", pos)
                    }
                    SHAPE_SQUARE => {
                        v.verify_union_variant::<ForwardsUOffset<Square>>("Shape::Square", pos)
                    }
                    _ => Ok(()),
                },
            )?
            .visit_field::<ForwardsUOffset<&str>>("tag", Self::VT_TAG, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Circle<'a> {
    pub const VT_RADIUS: VOffsetT = 4;

    pub fn radius(&self) -> Option<f32> {
        self.layout.get::<f32>(Self::VT_RADIUS)
    }
}

impl Verifiable for Circle<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<f32>("radius", Self::VT_RADIUS, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Square<'a> {
    pub const VT_LABEL: VOffsetT = 4;
    pub const VT_SIDE: VOffsetT = 6;

    pub fn label(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_LABEL)
    }

    pub fn side(&self) -> Option<u16> {
        self.layout.get::<u16>(Self::VT_SIDE)
    }
}

impl Verifiable for Square<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("label", Self::VT_LABEL, false)?
            .visit_field::<u16>("side", Self::VT_SIDE, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Pair<'a> {
    pub const VT_A: VOffsetT = 4;
    pub const VT_B: VOffsetT = 6;

    pub fn a(&self) -> Option<Entry<'a>> {
        self.layout.get::<ForwardsUOffset<Entry<'a>>>(Self::VT_A)
    }

    pub fn b(&self) -> Option<Entry<'a>> {
        self.layout.get::<ForwardsUOffset<Entry<'a>>>(Self::VT_B)
    }
}

impl Verifiable for Pair<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Entry>>("a", Self::VT_A, false)?
            .visit_field::<ForwardsUOffset<Entry>>("b", Self::VT_B, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Inventory<'a> {
    pub const VT_ITEMS: VOffsetT = 4;

    pub fn items(&self) -> Option<Vector<'a, ForwardsUOffset<Item<'a>>>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Item<'a>>>>>(Self::VT_ITEMS)
    }
}

impl Verifiable for Inventory<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Item>>>>(
                "items",
                Self::VT_ITEMS,
                false,
            )?
            .finish();
        Ok(())
    }
}

impl<'a> Sequences<'a> {
    pub const VT_BYTES: VOffsetT = 4;
    pub const VT_LONGS: VOffsetT = 6;
    pub const VT_NAMES: VOffsetT = 8;
    pub const VT_POINTS: VOffsetT = 10;
    pub const VT_COLORS: VOffsetT = 12;
    pub const VT_EXTENTS: VOffsetT = 14;

    pub fn bytes(&self) -> Option<Vector<'a, u8>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, u8>>>(Self::VT_BYTES)
    }

    pub fn longs(&self) -> Option<Vector<'a, u64>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, u64>>>(Self::VT_LONGS)
    }

    pub fn names(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(Self::VT_NAMES)
    }

    pub fn points(&self) -> Option<Vector<'a, Vec3>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, Vec3>>>(Self::VT_POINTS)
    }

    pub fn colors(&self) -> Option<Vector<'a, Color>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, Color>>>(Self::VT_COLORS)
    }

    pub fn extents(&self) -> Option<Vector<'a, Extent>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, Extent>>>(Self::VT_EXTENTS)
    }
}

impl Verifiable for Sequences<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("bytes", Self::VT_BYTES, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u64>>>("longs", Self::VT_LONGS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&str>>>>(
                "names",
                Self::VT_NAMES,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, Vec3>>>("points", Self::VT_POINTS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, Color>>>("colors", Self::VT_COLORS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, Extent>>>("extents", Self::VT_EXTENTS, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Lists<'a> {
    pub const VT_NAMES: VOffsetT = 4;
    pub const VT_NUMBERS: VOffsetT = 6;

    pub fn names(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(Self::VT_NAMES)
    }

    pub fn numbers(&self) -> Option<Vector<'a, u16>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, u16>>>(Self::VT_NUMBERS)
    }
}

impl Verifiable for Lists<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&str>>>>(
                "names",
                Self::VT_NAMES,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, u16>>>("numbers", Self::VT_NUMBERS, false)?
            .finish();
        Ok(())
    }
}

impl<'a> Directory<'a> {
    pub const VT_GROUPS: VOffsetT = 4;

    pub fn groups(&self) -> Option<Vector<'a, ForwardsUOffset<Group<'a>>>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Group<'a>>>>>(Self::VT_GROUPS)
    }
}

impl Verifiable for Directory<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Group>>>>(
                "groups",
                Self::VT_GROUPS,
                false,
            )?
            .finish();
        Ok(())
    }
}

impl<'a> Group<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_MEMBERS: VOffsetT = 6;

    pub fn name(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_NAME)
    }

    pub fn members(&self) -> Option<Vector<'a, ForwardsUOffset<Item<'a>>>> {
        self.layout
            .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Item<'a>>>>>(Self::VT_MEMBERS)
    }
}

impl Verifiable for Group<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Item>>>>(
                "members",
                Self::VT_MEMBERS,
                false,
            )?
            .finish();
        Ok(())
    }
}

impl<'a> Mixed<'a> {
    pub const VT_LABEL: VOffsetT = 4;
    pub const VT_TINY: VOffsetT = 6;
    pub const VT_WIDE: VOffsetT = 8;
    pub const VT_HALF: VOffsetT = 10;
    pub const VT_POINT: VOffsetT = 12;
    pub const VT_FLAG: VOffsetT = 14;

    pub fn label(&self) -> Option<&'a str> {
        self.layout.get::<ForwardsUOffset<&'a str>>(Self::VT_LABEL)
    }

    pub fn tiny(&self) -> Option<u8> {
        self.layout.get::<u8>(Self::VT_TINY)
    }

    pub fn wide(&self) -> Option<f64> {
        self.layout.get::<f64>(Self::VT_WIDE)
    }

    pub fn half(&self) -> Option<i16> {
        self.layout.get::<i16>(Self::VT_HALF)
    }

    pub fn point(&self) -> Option<&'a Vec3> {
        self.layout.get::<Vec3>(Self::VT_POINT)
    }

    pub fn flag(&self) -> Option<bool> {
        self.layout.get::<bool>(Self::VT_FLAG)
    }
}

impl Verifiable for Mixed<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("label", Self::VT_LABEL, false)?
            .visit_field::<u8>("tiny", Self::VT_TINY, false)?
            .visit_field::<f64>("wide", Self::VT_WIDE, false)?
            .visit_field::<i16>("half", Self::VT_HALF, false)?
            .visit_field::<Vec3>("point", Self::VT_POINT, false)?
            .visit_field::<bool>("flag", Self::VT_FLAG, false)?
            .finish();
        Ok(())
    }
}
