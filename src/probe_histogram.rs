use alloc::vec::Vec;

/// Counts of occupied slots by probe length, with the running minimum and
/// maximum.
///
/// Lookups only scan the window `[home + min, home + max]`, so these bounds
/// must match the occupied slots exactly: a stale minimum or maximum makes
/// lookups miss keys that are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
    total: usize,
    min: usize,
    max: usize,
}

impl ProbeHistogram {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots recorded.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of occupied slots sitting `probe_length` slots past their home.
    pub fn count(&self, probe_length: usize) -> usize {
        self.counts.get(probe_length).copied().unwrap_or(0)
    }

    /// Shortest probe length over occupied slots, or `None` when empty.
    pub fn min(&self) -> Option<usize> {
        (self.total > 0).then_some(self.min)
    }

    /// Longest probe length over occupied slots, or `None` when empty.
    pub fn max(&self) -> Option<usize> {
        (self.total > 0).then_some(self.max)
    }

    /// Per-length counts, indexed by probe length, up to [`max`](Self::max).
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Inclusive `(min, max)` scan window, or `None` when empty.
    #[inline(always)]
    pub(crate) fn window(&self) -> Option<(usize, usize)> {
        (self.total > 0).then_some((self.min, self.max))
    }

    pub(crate) fn increment(&mut self, probe_length: usize) {
        if probe_length >= self.counts.len() {
            self.counts.resize(probe_length + 1, 0);
        }
        self.counts[probe_length] += 1;

        if self.total == 0 {
            self.min = probe_length;
            self.max = probe_length;
        } else {
            self.min = self.min.min(probe_length);
            self.max = self.max.max(probe_length);
        }
        self.total += 1;
    }

    pub(crate) fn decrement(&mut self, probe_length: usize) {
        debug_assert!(self.count(probe_length) > 0, "no slot at {probe_length}");
        self.counts[probe_length] -= 1;
        self.total -= 1;

        if self.total == 0 {
            self.clear();
            return;
        }

        if self.counts[probe_length] != 0 {
            return;
        }

        if probe_length == self.min {
            self.min = (probe_length..=self.max)
                .find(|&len| self.counts[len] != 0)
                .unwrap_or(self.max);
        }

        if probe_length == self.max {
            self.max = (self.min..=probe_length)
                .rev()
                .find(|&len| self.counts[len] != 0)
                .unwrap_or(self.min);
            self.counts.truncate(self.max + 1);
        }
    }

    /// Moves one occupied slot from `from` to `to`.
    #[inline]
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        if from != to {
            self.increment(to);
            self.decrement(from);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
        self.min = 0;
        self.max = 0;
    }

    /// Pretty-prints the histogram as a horizontal bar chart on stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        if peak == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!(
            "probe histogram ({} entries, window {}..={}):",
            self.total, self.min, self.max
        );

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(peak as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (len, &count) in self.counts.iter().enumerate() {
            println!("{:>3} | {} ({})", len, make_bar(count), count);
        }
    }
}
