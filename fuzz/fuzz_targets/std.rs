#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use dhtable::HashMap as DoubleHashMap;
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation {
    Insert(String, String),
    Remove(String),
    Get(String),
    Contains(String),
    Clear,
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    min_capacity: u8,
    operations: Vec<Operation>,
}

fn fuzz_hashmap(input: FuzzInput) {
    let mut std_map = StdHashMap::new();
    let mut map = DoubleHashMap::builder()
        .min_capacity(usize::from(input.min_capacity).max(1))
        .build();

    for op in input.operations {
        match op {
            Operation::Insert(k, v) => {
                let result = map.insert(k.as_str(), v.as_str());
                let std_result = std_map.insert(k, v);
                assert_eq!(std_result, result);
            }
            Operation::Remove(k) => {
                let std_result = std_map.remove(&k);
                let result = map.remove(&k);
                assert_eq!(std_result, result);
            }
            Operation::Get(k) => {
                let std_result = std_map.get(&k).map(String::as_str);
                let result = map.get(&k);
                assert_eq!(std_result, result);
            }
            Operation::Contains(k) => {
                assert_eq!(std_map.contains_key(&k), map.contains_key(&k));
            }
            Operation::Clear => {
                std_map.clear();
                map.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), map.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), map.is_empty());
            }
        }
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v.as_str()), map.get(k));
    }
    assert_eq!(std_map.len(), map.len());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_hashmap(data);
});
