//! Fork-join splitting helpers.
//!
//! The remaining worker budget (the *allotment*) is passed down the
//! recursion as plain data. At each split the allotment is halved between
//! the two branches and the range is cut in the same proportion, so a
//! branch carrying more workers also carries more of the range. Once an
//! allotment reaches one worker the cut falls back to the true midpoint.

use std::ops::Range;

/// Where to cut a range and how many workers each side keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Split {
    /// Length of the left part; the right part starts here.
    pub mid: usize,
    /// Allotment carried by the left part.
    pub left: usize,
    /// Allotment carried by the right part.
    pub right: usize,
}

/// Largest range handled directly, without splitting.
pub(crate) fn leaf_len(total: usize, workers: usize) -> usize {
    total / workers.max(1) + 1
}

/// Cuts a range of `len >= 2` elements carrying `allotment` workers.
pub(crate) fn bisect(len: usize, allotment: usize) -> Split {
    debug_assert!(len >= 2);
    if allotment <= 1 {
        return Split {
            mid: len / 2,
            left: 1,
            right: 1,
        };
    }
    let left = allotment / 2;
    let right = allotment - left;
    let mid = (len as u128 * left as u128 / allotment as u128) as usize;
    Split {
        mid: mid.clamp(1, len - 1),
        left,
        right,
    }
}

/// Partitions `0..len` into at most `shards` contiguous, non-empty ranges
/// whose lengths differ by at most one.
pub(crate) fn shard_ranges(len: usize, shards: usize) -> Vec<Range<usize>> {
    let shards = shards.max(1).min(len);
    if shards == 0 {
        return Vec::new();
    }
    let base = len / shards;
    let extra = len % shards;
    let mut start = 0;
    (0..shards)
        .map(|i| {
            let end = start + base + usize::from(i < extra);
            let range = start..end;
            start = end;
            range
        })
        .collect()
}
