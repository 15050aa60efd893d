use crate::capacity::Capacity;
use crate::error::Error;
use crate::error::Result;

/// Tuning knobs for a [`HashTable`](crate::HashTable).
///
/// Load percentages are expressed as whole percent of ring slots. The table
/// grows before an insert of a new key would push the load above
/// `grow_percent`, and (if `shrink_on_erase` is set) shrinks after an erase
/// leaves the load below `shrink_percent`.
///
/// # Examples
///
/// ```rust
/// use robin_hash::Config;
/// use robin_hash::HashTable;
///
/// let config = Config {
///     initial_capacity: 100,
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let table: HashTable<u64> = HashTable::with_config(config);
/// assert!(table.capacity() >= 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of elements the table holds before its first resize.
    pub initial_capacity: usize,
    /// Load (percent of slots) that an insert may not exceed.
    pub grow_percent: u32,
    /// Load (percent of slots) below which an erase shrinks the ring.
    pub shrink_percent: u32,
    /// Whether erase may shrink the ring at all.
    pub shrink_on_erase: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            grow_percent: 66,
            shrink_percent: 33,
            shrink_on_erase: true,
        }
    }
}

impl Config {
    /// Config for tables expected to hold many entries from the start.
    pub fn large() -> Self {
        Self {
            initial_capacity: 1 << 16,
            ..Self::default()
        }
    }

    /// Config for tables that should keep their ring size after erases, such
    /// as tables that are repeatedly filled and emptied.
    pub fn no_shrink() -> Self {
        Self {
            shrink_on_erase: false,
            ..Self::default()
        }
    }

    /// Checks the constraints the resize policy depends on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::Config;
    /// use robin_hash::Error;
    ///
    /// let bad = Config {
    ///     grow_percent: 95,
    ///     ..Config::default()
    /// };
    /// assert!(matches!(bad.validate(), Err(Error::InvalidConfig { .. })));
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.grow_percent == 0 || self.grow_percent > 90 {
            return Err(Error::InvalidConfig {
                reason: "grow_percent must be in 1..=90",
            });
        }

        if self.shrink_percent.saturating_mul(2) > self.grow_percent {
            return Err(Error::InvalidConfig {
                reason: "shrink_percent must be at most half of grow_percent",
            });
        }

        if Capacity::for_elements(self.initial_capacity, self.grow_percent).is_none() {
            return Err(Error::InvalidConfig {
                reason: "initial_capacity exceeds the largest ring size",
            });
        }

        Ok(())
    }

    /// Returns `self` if valid, otherwise logs a warning and falls back to the
    /// defaults.
    pub(crate) fn or_default_if_invalid(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::warn!("{err}; using default hash table config");
                Self::default()
            }
        }
    }

    pub(crate) fn initial(&self) -> Capacity {
        Capacity::for_elements(self.initial_capacity, self.grow_percent).unwrap_or(Capacity::MIN)
    }
}
