//! SNR schedule: one balanced, shuffled multiset of SNR levels for the
//! whole corpus.
//!
//! Built once up front and consumed sequentially. Assigning levels per
//! clean file instead would bias corpus-wide statistics whenever the
//! per-file fan-out does not divide evenly into the number of levels.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Build the SNR schedule for `total_samples` mix jobs.
///
/// Every integer level in `snr_lower..=snr_upper` is repeated
/// `total_samples / num_levels` times. The remainder slots are filled with
/// levels drawn uniformly at random, so the schedule length is exactly
/// `total_samples` and a cursor indexing it can never run out of bounds.
/// The whole multiset is shuffled once with the seeded generator.
pub fn build_schedule(
    snr_lower: i32,
    snr_upper: i32,
    total_samples: usize,
    rng: &mut StdRng,
) -> Vec<i32> {
    debug_assert!(snr_lower <= snr_upper);
    let num_levels = (snr_upper - snr_lower + 1) as usize;
    let per_level = total_samples / num_levels;

    let mut schedule = Vec::with_capacity(total_samples);
    for level in snr_lower..=snr_upper {
        schedule.extend(std::iter::repeat(level).take(per_level));
    }
    while schedule.len() < total_samples {
        schedule.push(rng.gen_range(snr_lower..=snr_upper));
    }

    schedule.shuffle(rng);
    schedule
}
