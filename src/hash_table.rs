//! Robin Hood open-addressing table over a prime-sized ring.
//!
//! The table is split in two: a ring of slots that carry the hash, the
//! home position and an index, and a dense payload store of values that the
//! slots point into. Probing and displacement only ever move slots; values
//! stay put until they are removed.
//!
//! Lookups scan `[home + min, home + max]` where `min`/`max` are the shortest
//! and longest probe lengths currently present, as tracked by
//! [`ProbeHistogram`].

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::capacity::Capacity;
use crate::config::Config;
use crate::error::invariant_violation;
use crate::probe_histogram::ProbeHistogram;

/// Forward distance from `from` to `to` around a ring of `slots` positions.
#[inline(always)]
fn ring_distance(from: usize, to: usize, slots: usize) -> usize {
    if to >= from {
        to - from
    } else {
        to + slots - from
    }
}

#[inline(always)]
fn ring_next(pos: usize, slots: usize) -> usize {
    if pos + 1 == slots { 0 } else { pos + 1 }
}

/// An occupied ring position. Empty positions are `None` in the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    hash: u64,
    /// `hash % slots` for the ring this slot lives in.
    home: usize,
    /// Position of the value in the payload store.
    index: usize,
}

#[derive(Clone)]
struct Bucket<V> {
    hash: u64,
    value: V,
}

/// Debug statistics for hash table analysis.
///
/// Available under `cfg(test)` or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Maximum load before the next grow
    pub capacity: usize,
    /// Ring size
    pub total_slots: usize,
    /// Index of the ring size in the prime sequence
    pub size_scale: usize,
    /// Load factor (populated / total_slots)
    pub load_factor: f64,
    /// Shortest probe length present
    pub min_probe: usize,
    /// Longest probe length present
    pub max_probe: usize,
    /// Average probe length over occupied slots
    pub mean_probe: f64,
    /// Bytes held by the ring and the payload store
    pub total_bytes: usize,
    /// Bytes held by empty ring slots and unused payload capacity
    pub wasted_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% load factor, grows past {})",
            self.populated,
            self.total_slots,
            self.load_factor * 100.0,
            self.capacity
        );
        println!("Size scale: {}", self.size_scale);
        println!(
            "Probe lengths: {}..={} (mean {:.3})",
            self.min_probe, self.max_probe, self.mean_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// A hash table using Robin Hood open addressing.
///
/// `HashTable<V>` stores values of type `V`. Like the tables in `hashbrown`,
/// it does not hash anything itself: every operation takes the hash of the
/// value's key and an equality predicate.
///
/// ## Performance Characteristics
///
/// - **Lookup**: expected O(1), worst case proportional to the spread between
///   the shortest and longest probe length present.
/// - **Resize and erase**: erase is O(1) expected; a resize rebuilds the ring
///   in O(n) but never moves values.
/// - **Memory**: one `Option<Slot>` (hash, home, index) per ring slot, plus the
///   value and its u64 hash in the payload store.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use robin_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     robin_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     robin_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    ring: Vec<Option<Slot>>,
    entries: Vec<Bucket<V>>,
    probes: ProbeHistogram,
    capacity: Capacity,
    config: Config,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;

        let slots = self.ring.len();
        f.debug_struct("HashTable")
            .field("populated", &self.entries.len())
            .field("slots", &slots)
            .field("probe_window", &self.probes.window())
            .field(
                "ring",
                &self
                    .ring
                    .iter()
                    .enumerate()
                    .map(|(pos, slot)| match slot {
                        Some(slot) => format!(
                            "{pos:>4}: {:016x} home {:>4} probe {:>3} -> #{}",
                            slot.hash,
                            slot.home,
                            ring_distance(slot.home, pos, slots),
                            slot.index
                        ),
                        None => format!("{pos:>4}: ....."),
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with the smallest ring size.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new hash table with the specified capacity.
    ///
    /// The ring is sized to the smallest prime that holds `capacity` elements
    /// below the grow threshold, so the actual capacity may be larger.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config {
            initial_capacity: capacity,
            ..Config::default()
        })
    }

    /// Creates an empty table tuned by `config`.
    ///
    /// An invalid config is logged and replaced by [`Config::default`].
    pub fn with_config(config: Config) -> Self {
        let config = config.or_default_if_invalid();
        Self::allocate(config.initial(), config)
    }

    /// Creates an empty table whose ring size is entry `scale` of
    /// [`PRIME_SIZES`](crate::PRIME_SIZES), or `None` if there is no
    /// such entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<u64> = HashTable::with_size_scale(2).unwrap();
    /// assert_eq!(table.slot_count(), 29);
    /// assert!(HashTable::<u64>::with_size_scale(64).is_none());
    /// ```
    pub fn with_size_scale(scale: usize) -> Option<Self> {
        Capacity::from_scale(scale).map(|capacity| Self::allocate(capacity, Config::default()))
    }

    fn allocate(capacity: Capacity, config: Config) -> Self {
        Self {
            ring: vec![None; capacity.slots()],
            entries: Vec::new(),
            probes: ProbeHistogram::new(),
            capacity,
            config,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of elements the table holds before it grows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::new();
    /// assert_eq!(table.slot_count(), 7);
    /// assert_eq!(table.capacity(), 4);
    /// ```
    pub fn capacity(&self) -> usize {
        self.capacity.max_load(self.config.grow_percent)
    }

    /// Returns the ring size.
    pub fn slot_count(&self) -> usize {
        self.ring.len()
    }

    /// Returns the index of the current ring size in the prime sequence.
    pub fn size_scale(&self) -> usize {
        self.capacity.scale()
    }

    /// Returns occupied slots divided by ring size.
    pub fn load_factor(&self) -> f64 {
        self.entries.len() as f64 / self.ring.len() as f64
    }

    /// Returns the probe-length tracker that bounds lookups.
    pub fn probe_histogram(&self) -> &ProbeHistogram {
        &self.probes
    }

    /// Returns the config this table resizes by.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns an iterator over all values in the table.
    ///
    /// The iteration order is not specified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// let mut values: Vec<u64> = table.iter().copied().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The ring keeps its size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    ///
    /// let values: Vec<u64> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, [7]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        self.ring.fill(None);
        self.probes.clear();
        Drain {
            inner: self.entries.drain(..),
        }
    }

    /// Removes all elements from the table, keeping the ring size.
    pub fn clear(&mut self) {
        self.ring.fill(None);
        self.probes.clear();
        self.entries.clear();
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the required ring is larger than the largest prime size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::new();
    /// table.reserve(50);
    /// assert!(table.capacity() >= 50);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len().saturating_add(additional);
        if required <= self.capacity() {
            return;
        }

        let Some(target) = Capacity::for_elements(required, self.config.grow_percent) else {
            panic!("capacity overflow");
        };
        self.rehash(target);
    }

    /// Shrinks the ring to the smallest prime size that holds the current
    /// elements below the grow threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table: HashTable<i32> = HashTable::with_capacity(1000);
    /// table.entry(42, |&v| v == 5).or_insert(5);
    /// table.entry(123, |&v| v == 10).or_insert(10);
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.slot_count(), 7);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let target = Capacity::for_elements(self.len(), self.config.grow_percent)
            .unwrap_or(self.capacity);
        if target < self.capacity {
            self.rehash(target);
        }
    }

    /// Finds a value by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let (_, index) = self.search(hash, eq)?;
        Some(&self.entries[index].value)
    }

    /// Finds a value by hash and equality predicate, returning a mutable
    /// reference.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let (_, index) = self.search(hash, eq)?;
        Some(&mut self.entries[index].value)
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// Looking up an entry never resizes the table. Inserting into a
    /// [`VacantEntry`] grows the ring first if the new element would push the
    /// load past the grow threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use robin_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     robin_hash::hash_table::Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     robin_hash::hash_table::Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.search(hash, eq) {
            Some((pos, index)) => Entry::Occupied(OccupiedEntry {
                table: self,
                pos,
                index,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Removes and returns a value from the table.
    ///
    /// Removal backward-shifts the probe run that followed the value, and may
    /// shrink the ring afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let (pos, _) = self.search(hash, eq)?;
        Some(self.remove_at(pos))
    }

    /// Keeps only the values for which `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for n in 0..10u64 {
    ///     table.entry(n, |&v| v == n).or_insert(n);
    /// }
    /// table.retain(|v| *v % 2 == 0);
    /// assert_eq!(table.len(), 5);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        // Walking the payload store backwards means swap_remove only ever
        // pulls in entries that were already kept.
        for index in (0..self.entries.len()).rev() {
            if f(&mut self.entries[index].value) {
                continue;
            }
            let hash = self.entries[index].hash;
            let Some((pos, _)) = self.probe(hash, |slot| slot.index == index) else {
                invariant_violation("payload entry has no owning slot");
            };
            self.remove_at(pos);
        }
    }

    #[inline(always)]
    fn home(&self, hash: u64) -> usize {
        (hash % self.ring.len() as u64) as usize
    }

    /// Scans the probe window of `hash` for an occupied slot with the same
    /// hash that satisfies `pred`, returning its ring position and payload
    /// index.
    #[inline]
    fn probe(&self, hash: u64, pred: impl Fn(&Slot) -> bool) -> Option<(usize, usize)> {
        let (min, max) = self.probes.window()?;
        let slots = self.ring.len();
        let home = self.home(hash);

        (min..=max).find_map(|distance| {
            let pos = (home + distance) % slots;
            match &self.ring[pos] {
                Some(slot) if slot.hash == hash && pred(slot) => Some((pos, slot.index)),
                _ => None,
            }
        })
    }

    #[inline]
    fn search(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<(usize, usize)> {
        self.probe(hash, |slot| eq(&self.entries[slot.index].value))
    }

    /// Appends `value` to the payload store and links it into the ring.
    /// The caller guarantees no equal value is present.
    fn insert_new(&mut self, hash: u64, value: V) -> usize {
        self.grow_for_insert();

        let index = self.entries.len();
        self.entries.push(Bucket { hash, value });
        let home = self.home(hash);
        self.place(Slot { hash, home, index });
        index
    }

    fn grow_for_insert(&mut self) {
        let incoming = self.len() + 1;
        let mut target = self.capacity;
        while target.is_above(incoming, self.config.grow_percent) {
            target = match target.next() {
                Some(next) => next,
                None => invariant_violation("prime size sequence exhausted"),
            };
        }

        if target != self.capacity {
            log::trace!(
                "growing: {} elements would exceed {}% of {} slots",
                incoming,
                self.config.grow_percent,
                self.ring.len()
            );
            self.rehash(target);
        }
    }

    fn shrink_after_erase(&mut self) {
        if !self.config.shrink_on_erase {
            return;
        }

        let len = self.len();
        let mut target = self.capacity;
        while target.is_below(len, self.config.shrink_percent) {
            match target.prev() {
                Some(prev) if !prev.is_above(len, self.config.grow_percent) => target = prev,
                _ => break,
            }
        }

        if target != self.capacity {
            log::trace!(
                "shrinking: {} elements below {}% of {} slots",
                len,
                self.config.shrink_percent,
                self.ring.len()
            );
            self.rehash(target);
        }
    }

    /// Robin Hood insertion of `slot` starting at its home. A candidate that
    /// has traveled farther than the occupant takes the position, and the
    /// occupant continues probing in its place.
    fn place(&mut self, slot: Slot) {
        let slots = self.ring.len();
        let mut candidate = slot;
        let mut pos = candidate.home;

        for _ in 0..slots {
            let traveled = ring_distance(candidate.home, pos, slots);
            match &mut self.ring[pos] {
                None => {
                    self.ring[pos] = Some(candidate);
                    self.probes.increment(traveled);
                    return;
                }
                Some(occupant) => {
                    let occupant_len = ring_distance(occupant.home, pos, slots);
                    if occupant_len < traveled {
                        core::mem::swap(occupant, &mut candidate);
                        self.probes.shift(occupant_len, traveled);
                    }
                }
            }
            pos = ring_next(pos, slots);
        }

        invariant_violation("insert scanned the full ring without finding an empty slot");
    }

    /// Removes the value linked from ring position `pos`.
    fn remove_at(&mut self, pos: usize) -> V {
        let slots = self.ring.len();
        let Some(slot) = self.ring[pos].take() else {
            invariant_violation("remove from an empty slot");
        };
        self.probes.decrement(ring_distance(slot.home, pos, slots));
        self.backward_shift(pos);

        // The last payload entry moves into the freed index; exactly one slot
        // points at it and must follow.
        let removed = self.entries.swap_remove(slot.index);
        if slot.index < self.entries.len() {
            let moved_from = self.entries.len();
            let moved_hash = self.entries[slot.index].hash;
            let Some((owner, _)) = self.probe(moved_hash, |s| s.index == moved_from) else {
                invariant_violation("moved payload entry has no owning slot");
            };
            if let Some(owner) = self.ring[owner].as_mut() {
                owner.index = slot.index;
            }
        }

        self.shrink_after_erase();
        removed.value
    }

    /// Pulls each displaced slot after `hole` one position back until an
    /// empty slot or a slot at its home is reached.
    fn backward_shift(&mut self, hole: usize) {
        let slots = self.ring.len();
        let mut hole = hole;

        for _ in 0..slots {
            let next = ring_next(hole, slots);
            let Some(slot) = self.ring[next] else {
                return;
            };
            if slot.home == next {
                return;
            }

            let len = ring_distance(slot.home, next, slots);
            self.probes.shift(len, len - 1);
            self.ring[hole] = self.ring[next].take();
            hole = next;
        }

        invariant_violation("backward shift did not terminate");
    }

    /// Rebuilds the ring at `capacity`. Payload entries are not touched; only
    /// the slot linkage and the probe histogram are recomputed.
    fn rehash(&mut self, capacity: Capacity) {
        let old = core::mem::replace(&mut self.ring, vec![None; capacity.slots()]);
        log::debug!(
            "rehashing {} elements from {} to {} slots",
            self.entries.len(),
            old.len(),
            capacity.slots()
        );

        self.capacity = capacity;
        self.probes.clear();
        for slot in old.into_iter().flatten() {
            let home = self.home(slot.hash);
            self.place(Slot { home, ..slot });
        }
    }

    /// Returns detailed performance and utilization statistics for debugging.
    ///
    /// Available under `cfg(test)` or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let slots = self.ring.len();
        let occupied = self.entries.len();
        let probe_sum: usize = self
            .probes
            .counts()
            .iter()
            .enumerate()
            .map(|(len, count)| len * count)
            .sum();

        let slot_bytes = core::mem::size_of::<Option<Slot>>();
        let bucket_bytes = core::mem::size_of::<Bucket<V>>();
        let total_bytes = slots * slot_bytes + self.entries.capacity() * bucket_bytes;
        let wasted_bytes =
            (slots - occupied) * slot_bytes + (self.entries.capacity() - occupied) * bucket_bytes;

        DebugStats {
            populated: occupied,
            capacity: self.capacity(),
            total_slots: slots,
            size_scale: self.capacity.scale(),
            load_factor: self.load_factor(),
            min_probe: self.probes.min().unwrap_or(0),
            max_probe: self.probes.max().unwrap_or(0),
            mean_probe: if occupied == 0 {
                0.0
            } else {
                probe_sum as f64 / occupied as f64
            },
            total_bytes,
            wasted_bytes,
        }
    }

    /// Exhaustively checks the ring, payload store and histogram against each
    /// other. `rehash` recomputes a value's hash from its key.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self, rehash: impl Fn(&V) -> u64) {
        let slots = self.ring.len();
        assert_eq!(slots, self.capacity.slots());

        let mut owners = vec![0usize; self.entries.len()];
        let mut expected = ProbeHistogram::new();
        for (pos, slot) in self.ring.iter().enumerate() {
            let Some(slot) = slot else { continue };
            assert_eq!(slot.home, (slot.hash % slots as u64) as usize, "home @ {pos}");
            assert!(slot.index < self.entries.len(), "dangling index @ {pos}");

            let bucket = &self.entries[slot.index];
            assert_eq!(bucket.hash, slot.hash, "payload hash @ {pos}");
            assert_eq!(rehash(&bucket.value), slot.hash, "payload key @ {pos}");
            owners[slot.index] += 1;

            expected.increment(ring_distance(slot.home, pos, slots));

            // Robin Hood ordering: a run never jumps by more than one.
            let next = ring_next(pos, slots);
            if let Some(after) = &self.ring[next] {
                assert!(
                    ring_distance(after.home, next, slots)
                        <= ring_distance(slot.home, pos, slots) + 1,
                    "probe run broken between {pos} and {next}"
                );
            }
        }

        assert!(owners.iter().all(|&n| n == 1), "payload owners: {owners:?}");
        assert_eq!(expected.total(), self.entries.len());
        assert_eq!(self.probes.counts(), expected.counts());
        assert_eq!(self.probes.window(), expected.window());
        assert!(
            !self.capacity.is_above(self.len(), self.config.grow_percent),
            "load {} over {}% of {slots}",
            self.len(),
            self.config.grow_percent
        );
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - the key is not present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - the key is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    ///
    /// let value = table.entry(3, |s: &String| s == "key").or_insert("key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// let existing = table.entry(3, |s: &String| s == "key").or_insert("other".to_string());
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant. The closure is
    /// not called for occupied entries.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Inserts `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// Holds only the hash; the ring position is chosen when a value is
/// inserted, after any grow.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference to
    /// it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = table.insert_new(self.hash, value);
        &mut table.entries[index].value
    }

    /// The hash this entry was looked up with.
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// A view into an occupied entry in the hash table.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    pos: usize,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.entries[self.index].value
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.entries[self.index].value
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the entry.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.entries[self.index].value
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use robin_hash::hash_table::Entry;
    /// # use robin_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(5, |s: &String| s == "key").or_insert("key".to_string());
    ///
    /// let removed = match table.entry(5, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => entry.remove(),
    ///     Entry::Vacant(_) => unreachable!(),
    /// };
    /// assert_eq!(removed, "key");
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(self) -> V {
        self.table.remove_at(self.pos)
    }
}

/// An iterator over the values in a [`HashTable`].
pub struct Iter<'a, V> {
    inner: core::slice::Iter<'a, Bucket<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| &bucket.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
pub struct IterMut<'a, V> {
    inner: core::slice::IterMut<'a, Bucket<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| &mut bucket.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// The table is already empty when this is created; dropping it early drops
/// the remaining values.
pub struct Drain<'a, V> {
    inner: vec::Drain<'a, Bucket<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| bucket.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: vec::IntoIter<Bucket<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| bucket.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
