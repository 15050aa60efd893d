//! Ring sizes and the load-factor arithmetic behind grow/shrink decisions.

/// Ring sizes, roughly doubling. Primes keep `hash % slots` from picking up
/// patterns in the low bits of the hash.
pub const PRIME_SIZES: [usize; 28] = [
    7, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319,
    201326611, 402653189, 805306457,
];

/// An index into [`PRIME_SIZES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Capacity {
    scale: usize,
}

impl Capacity {
    pub(crate) const MIN: Capacity = Capacity { scale: 0 };

    #[inline(always)]
    pub(crate) fn from_scale(scale: usize) -> Option<Self> {
        (scale < PRIME_SIZES.len()).then_some(Capacity { scale })
    }

    /// Smallest capacity holding `elements` without exceeding `grow_percent`.
    pub(crate) fn for_elements(elements: usize, grow_percent: u32) -> Option<Self> {
        (0..PRIME_SIZES.len())
            .map(|scale| Capacity { scale })
            .find(|c| elements <= c.max_load(grow_percent))
    }

    #[inline(always)]
    pub(crate) fn scale(self) -> usize {
        self.scale
    }

    #[inline(always)]
    pub(crate) fn slots(self) -> usize {
        PRIME_SIZES[self.scale]
    }

    #[inline(always)]
    pub(crate) fn next(self) -> Option<Self> {
        Self::from_scale(self.scale + 1)
    }

    #[inline(always)]
    pub(crate) fn prev(self) -> Option<Self> {
        self.scale.checked_sub(1).map(|scale| Capacity { scale })
    }

    /// Largest element count the ring holds at or below `percent` load.
    #[inline(always)]
    pub(crate) fn max_load(self, percent: u32) -> usize {
        ((self.slots() as u128 * percent as u128) / 100) as usize
    }

    /// `elements / slots < percent / 100`, computed without floats.
    #[inline(always)]
    pub(crate) fn is_below(self, elements: usize, percent: u32) -> bool {
        (elements as u128) * 100 < self.slots() as u128 * percent as u128
    }

    /// `elements / slots > percent / 100`, computed without floats.
    #[inline(always)]
    pub(crate) fn is_above(self, elements: usize, percent: u32) -> bool {
        (elements as u128) * 100 > self.slots() as u128 * percent as u128
    }
}
