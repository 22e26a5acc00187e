use std::mem;

use super::utils::next_prime;

// A live key-value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

// A slot in the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    // The slot has not been written since the table was allocated.
    #[default]
    Empty,
    // The slot holds a live entry.
    Occupied(Entry),
    // The slot held an entry that was since removed.
    //
    // Tombstones do not end a probe sequence, but can be reused by an insert.
    Tombstone,
}

// A slot array sized to the prime at or above its base capacity.
#[derive(Clone, Debug)]
pub struct Table {
    // The logical size of the table, doubled or halved on resize.
    pub base_capacity: usize,
    // The slots, `next_prime(base_capacity)` of them.
    pub slots: Box<[Slot]>,
}

impl Table {
    // Allocate an empty table for the provided base capacity.
    pub fn alloc(base_capacity: usize) -> Table {
        let capacity = next_prime(base_capacity);
        let slots = (0..capacity).map(|_| Slot::Empty).collect();

        Table {
            base_capacity,
            slots,
        }
    }

    // The true length of the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // Move every live entry out of the table, leaving it empty.
    pub fn drain(&mut self) -> impl Iterator<Item = Entry> + '_ {
        self.slots
            .iter_mut()
            .filter_map(|slot| match mem::take(slot) {
                Slot::Occupied(entry) => Some(entry),
                Slot::Empty | Slot::Tombstone => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_rounds_to_prime() {
        let table = Table::alloc(50);
        assert_eq!(table.base_capacity, 50);
        assert_eq!(table.capacity(), 53);
        assert!(table.slots.iter().all(|slot| *slot == Slot::Empty));
    }

    #[test]
    fn drain_skips_tombstones() {
        let mut table = Table::alloc(5);
        table.slots[0] = Slot::Occupied(Entry {
            key: "a".to_owned(),
            value: "1".to_owned(),
        });
        table.slots[2] = Slot::Tombstone;
        table.slots[4] = Slot::Occupied(Entry {
            key: "b".to_owned(),
            value: "2".to_owned(),
        });

        let keys: Vec<String> = table.drain().map(|entry| entry.key).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(table.slots.iter().all(|slot| *slot == Slot::Empty));
    }
}
