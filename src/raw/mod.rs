mod alloc;
mod probe;
mod utils;

use std::mem;

use log::{debug, trace};

use self::alloc::{Entry, Slot, Table};
use self::probe::Probe;
use self::utils::next_prime;

pub use self::probe::{DoubleHash, ALPHABET};
pub use self::utils::is_prime;

// Sizing and resize parameters for a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    // The base capacity of a new or cleared table.
    pub capacity: usize,
    // The table never shrinks below this base capacity.
    pub min_capacity: usize,
    // Grow before an insert once the load percentage exceeds this.
    pub grow_threshold: usize,
    // Shrink before a remove once the load percentage drops below this.
    pub shrink_threshold: usize,
    // The probe sequence hash functions.
    pub hasher: DoubleHash,
}

// An open-addressing hash table using double hashing.
#[derive(Clone)]
pub struct HashMap {
    table: Table,
    // The number of occupied slots.
    count: usize,
    config: Config,
}

// The result of a probe for an insertion point.
enum Position {
    // The key is stored at this index.
    Occupied(usize),
    // The key is absent and can be written to this index.
    Vacant(usize),
}

impl HashMap {
    pub fn new(config: Config) -> HashMap {
        HashMap {
            table: Table::alloc(config.capacity),
            count: 0,
            config,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn base_capacity(&self) -> usize {
        self.table.base_capacity
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // The load factor as an integer percentage.
    #[inline]
    pub fn load(&self) -> usize {
        self.count * 100 / self.table.capacity()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let i = self.table.find(&self.config.hasher, key)?;

        match &self.table.slots[i] {
            Slot::Occupied(entry) => Some(entry.value.as_str()),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        // Resize first, the probe depends on the capacity.
        if self.load() > self.config.grow_threshold {
            self.grow();
        }

        let hasher = self.config.hasher;
        match self.table.position(&hasher, &key) {
            Position::Occupied(i) => match &mut self.table.slots[i] {
                Slot::Occupied(entry) => Some(mem::replace(&mut entry.value, value)),
                _ => unreachable!("probe returned an unoccupied slot"),
            },
            Position::Vacant(i) => {
                self.table.slots[i] = Slot::Occupied(Entry { key, value });
                self.count += 1;
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        if self.load() < self.config.shrink_threshold {
            self.shrink();
        }

        let i = self.table.find(&self.config.hasher, key)?;

        match mem::replace(&mut self.table.slots[i], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count -= 1;
                Some(entry.value)
            }
            _ => unreachable!("probe returned an unoccupied slot"),
        }
    }

    pub fn clear(&mut self) {
        self.table = Table::alloc(self.config.capacity);
        self.count = 0;
    }

    fn grow(&mut self) {
        // Small base capacities can round up to the same prime, 1 and 2 both
        // give 2 slots, so keep doubling until the table actually gets larger.
        let mut base_capacity = self.table.base_capacity;
        loop {
            base_capacity = base_capacity.checked_mul(2).expect("capacity overflow");

            if next_prime(base_capacity) > self.table.capacity() {
                break;
            }
        }

        self.resize(base_capacity);
    }

    fn shrink(&mut self) {
        self.resize(self.table.base_capacity / 2);
    }

    // Rehash every live entry into a table of the given base capacity.
    fn resize(&mut self, base_capacity: usize) {
        if base_capacity < self.config.min_capacity {
            trace!(
                "skipping resize to base capacity {} below minimum {}",
                base_capacity,
                self.config.min_capacity
            );
            return;
        }

        let hasher = self.config.hasher;
        let mut table = Table::alloc(base_capacity);
        debug_assert!(self.count <= table.capacity());

        for entry in self.table.drain() {
            match table.position(&hasher, &entry.key) {
                Position::Vacant(i) => table.slots[i] = Slot::Occupied(entry),
                Position::Occupied(_) => unreachable!("duplicate key in table"),
            }
        }

        let old = mem::replace(&mut self.table, table);

        debug!(
            "resized table from {} to {} slots (base capacity {} -> {}, {} entries)",
            old.capacity(),
            self.table.capacity(),
            old.base_capacity,
            self.table.base_capacity,
            self.count
        );
    }
}

impl Table {
    // Returns the index of the slot holding `key`.
    fn find(&self, hasher: &DoubleHash, key: &str) -> Option<usize> {
        let mut probe = Probe::start(key, hasher, self.capacity());

        while !probe.exhausted() {
            match &self.slots[probe.i] {
                // an empty slot ends every chain passing through it
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(probe.i),
                Slot::Occupied(_) | Slot::Tombstone => probe.next(),
            }
        }

        None
    }

    // Returns the slot holding `key`, or the slot a new entry for `key` should be written to.
    //
    // The first tombstone in the probe sequence is reused, but only once the
    // rest of the chain is known not to contain the key.
    fn position(&self, hasher: &DoubleHash, key: &str) -> Position {
        let mut tombstone = None;
        let mut probe = Probe::start(key, hasher, self.capacity());

        while !probe.exhausted() {
            match &self.slots[probe.i] {
                Slot::Empty => return Position::Vacant(tombstone.unwrap_or(probe.i)),
                Slot::Occupied(entry) if entry.key == key => return Position::Occupied(probe.i),
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    tombstone.get_or_insert(probe.i);
                }
            }

            probe.next();
        }

        match tombstone {
            Some(i) => Position::Vacant(i),
            None => unreachable!("insert into a full table"),
        }
    }
}
