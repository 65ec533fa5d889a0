//! Per-record hit accumulation over posting lists.

use ahash::AHashMap;

/// Tally of matched probe values per candidate record for one query.
///
/// The accumulation stage feeds every posting list the query probes into
/// the accumulator; each posting occurrence bumps the owning record's match
/// count. Only records appearing in at least one probed posting list become
/// candidates, which is what makes the inverted layout pay off: records
/// sharing nothing with the query are never touched.
#[derive(Debug)]
pub struct HitAccumulator {
    /// Record id -> number of matched probe occurrences.
    tallies: AHashMap<u32, u32>,

    /// Number of dimension values probed for this query.
    probed_dims: u32,
}

impl HitAccumulator {
    /// Create an accumulator for a query probing `probed_dims` values.
    pub fn new(probed_dims: u32) -> Self {
        HitAccumulator {
            tallies: AHashMap::new(),
            probed_dims,
        }
    }

    /// Fold one posting list into the tally.
    pub fn add_posting_list(&mut self, record_ids: &[u32]) {
        for &record_id in record_ids {
            *self.tallies.entry(record_id).or_insert(0) += 1;
        }
    }

    /// Number of dimension values probed.
    pub fn probed_dims(&self) -> u32 {
        self.probed_dims
    }

    /// Number of distinct records touched by the probes.
    pub fn candidate_count(&self) -> usize {
        self.tallies.len()
    }

    /// Distance for a tallied match count.
    ///
    /// Distance is the number of probed values the record did not match.
    /// A record can out-count the probes when the corpus repeats a value,
    /// so the subtraction saturates at zero.
    pub fn distance(&self, match_count: u32) -> u32 {
        self.probed_dims.saturating_sub(match_count)
    }

    /// Iterate over `(record_id, match_count)` tallies.
    ///
    /// Iteration order is arbitrary; the selection stage imposes the final
    /// ordering.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.tallies.iter().map(|(&id, &count)| (id, count))
    }
}
