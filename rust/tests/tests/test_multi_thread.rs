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


use std::sync::Arc;
use std::thread;

use flatwriter::Flatwriter;
use flatwriter_tests::{root, schema};
use test_helpers::*;

#[test]
fn test_multi_thread_serialize() {
    let flatwriter = Arc::new(Flatwriter::default());
    let handles: Vec<_> = (0..16u32)
        .map(|id| {
            let flatwriter = Arc::clone(&flatwriter);
            thread::spawn(move || {
                let entry = Entry {
                    id,
                    name: format!("entry-{id}"),
                };
                (entry.clone(), flatwriter.serialize(&entry).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (entry, bytes) = handle.join().unwrap();
        let table = root::<schema::Entry>(&bytes);
        assert_eq!(table.id(), Some(entry.id));
        assert_eq!(table.name(), Some(entry.name.as_str()));
    }
}

#[test]
fn test_repeated_serialize_on_one_thread_is_stable() {
    let flatwriter = Flatwriter::default();
    let entry = Entry {
        id: 99,
        name: "stable".to_string(),
    };
    let first = flatwriter.serialize(&entry).unwrap();
    for _ in 0..8 {
        assert_eq!(flatwriter.serialize(&entry).unwrap(), first);
    }
}
