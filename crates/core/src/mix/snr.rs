//! Segmental SNR mixing.
//!
//! Levels are matched on active-speech segments rather than whole-file
//! energy, so long silences in either signal do not skew the ratio. The
//! mix is normalized to a randomized output level and pulled back under
//! full scale if it clips.

use rand::rngs::StdRng;
use rand::Rng;

use crate::audio::analysis::{active_rms, is_clipped, peak, rms};

const EPS: f64 = 1e-16;
const CLIPPING_THRESHOLD: f64 = 0.99;
const ACTIVE_ENERGY_THRESH_DB: f64 = -50.0;
const SEGMENTAL_TARGET_LEVEL_DB: f64 = -25.0;

/// Output of one mix operation: the three signals to persist plus the
/// level the mix was normalized to.
#[derive(Debug, Clone)]
pub struct MixResult {
    pub clean: Vec<f64>,
    pub noise: Vec<f64>,
    pub noisy: Vec<f64>,
    /// Achieved output level in dBFS (integer, as encoded in filenames).
    pub target_level: i32,
}

/// Mix `clean` and `noise` at `snr_db`, both already aligned to equal length.
///
/// Both inputs are peak-normalized, leveled to a common segmental RMS, the
/// noise attenuated by `snr_db`, and the sum rescaled to a level drawn
/// uniformly from `level_range` (half-open, dBFS). All three returned
/// signals carry the same final scaling so the triple stays consistent.
pub fn segmental_snr_mixer(
    clean: &[f64],
    noise: &[f64],
    snr_db: i32,
    fs: u32,
    level_range: (i32, i32),
    rng: &mut StdRng,
) -> MixResult {
    let mut clean = clean.to_vec();
    let mut noise = noise.to_vec();

    // Tolerate a ragged pair by zero-padding the shorter signal
    if clean.len() > noise.len() {
        noise.resize(clean.len(), 0.0);
    } else if noise.len() > clean.len() {
        clean.resize(noise.len(), 0.0);
    }

    let clean_peak = peak(&clean);
    scale(&mut clean, 1.0 / (clean_peak + EPS));
    let noise_peak = peak(&noise);
    scale(&mut noise, 1.0 / (noise_peak + EPS));

    let (clean_rms, noise_rms) = active_rms(&clean, &noise, fs, ACTIVE_ENERGY_THRESH_DB);
    scale(&mut clean, db_to_gain(SEGMENTAL_TARGET_LEVEL_DB) / (clean_rms + EPS));
    scale(&mut noise, db_to_gain(SEGMENTAL_TARGET_LEVEL_DB) / (noise_rms + EPS));

    // Both signals now sit at the same active RMS; attenuating the noise
    // by snr_db realizes the requested ratio
    scale(&mut noise, db_to_gain(-f64::from(snr_db)));

    let mut noisy: Vec<f64> = clean.iter().zip(noise.iter()).map(|(c, n)| c + n).collect();

    let mut target_level = rng.gen_range(level_range.0..level_range.1);
    let noisy_rms = rms(&noisy);
    let scalar = db_to_gain(f64::from(target_level)) / (noisy_rms + EPS);
    scale(&mut noisy, scalar);
    scale(&mut clean, scalar);
    scale(&mut noise, scalar);

    if is_clipped(&noisy, CLIPPING_THRESHOLD) {
        let over = peak(&noisy) / (CLIPPING_THRESHOLD - EPS);
        scale(&mut noisy, 1.0 / over);
        scale(&mut clean, 1.0 / over);
        scale(&mut noise, 1.0 / over);
        target_level = (20.0 * (scalar / over * (noisy_rms + EPS)).log10()) as i32;
    }

    MixResult {
        clean,
        noise,
        noisy,
        target_level,
    }
}

fn db_to_gain(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

fn scale(samples: &mut [f64], gain: f64) {
    for s in samples.iter_mut() {
        *s *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sine(n: usize, freq: f64, amp: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (i as f64 * freq / 16000.0 * std::f64::consts::TAU).sin() * amp)
            .collect()
    }

    #[test]
    fn test_output_lengths_match_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let clean = sine(16000, 440.0, 0.5);
        let noise = sine(16000, 90.0, 0.3);
        let result = segmental_snr_mixer(&clean, &noise, 10, 16000, (-35, -15), &mut rng);
        assert_eq!(result.clean.len(), 16000);
        assert_eq!(result.noise.len(), 16000);
        assert_eq!(result.noisy.len(), 16000);
    }

    #[test]
    fn test_achieved_snr_matches_request() {
        let mut rng = StdRng::seed_from_u64(2);
        let clean = sine(32000, 440.0, 0.8);
        let noise = sine(32000, 90.0, 0.8);
        for &snr in &[0i32, 5, 20] {
            let result = segmental_snr_mixer(&clean, &noise, snr, 16000, (-35, -15), &mut rng);
            let measured = 20.0 * (rms(&result.clean) / rms(&result.noise)).log10();
            assert!(
                (measured - f64::from(snr)).abs() < 1.0,
                "requested {} dB, measured {:.2} dB",
                snr,
                measured
            );
        }
    }

    #[test]
    fn test_noisy_is_sum_of_parts() {
        let mut rng = StdRng::seed_from_u64(3);
        let clean = sine(16000, 440.0, 0.5);
        let noise = sine(16000, 90.0, 0.3);
        let result = segmental_snr_mixer(&clean, &noise, 10, 16000, (-35, -15), &mut rng);
        for i in 0..result.noisy.len() {
            let sum = result.clean[i] + result.noise[i];
            assert!((result.noisy[i] - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_target_level_within_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let clean = sine(16000, 440.0, 0.5);
        let noise = sine(16000, 90.0, 0.3);
        for _ in 0..20 {
            let result = segmental_snr_mixer(&clean, &noise, 10, 16000, (-35, -15), &mut rng);
            assert!(result.target_level >= -35 && result.target_level < -15);
            let level_db = 20.0 * rms(&result.noisy).log10();
            assert!(
                (level_db - f64::from(result.target_level)).abs() < 1.5,
                "achieved {:.2} dB, reported {}",
                level_db,
                result.target_level
            );
        }
    }

    #[test]
    fn test_no_clipping_in_output() {
        let mut rng = StdRng::seed_from_u64(5);
        let clean = sine(16000, 440.0, 1.0);
        let noise = sine(16000, 441.0, 1.0); // near-identical, constructive
        for _ in 0..20 {
            let result = segmental_snr_mixer(&clean, &noise, 0, 16000, (-10, -1), &mut rng);
            assert!(!is_clipped(&result.noisy, 1.0));
        }
    }

    #[test]
    fn test_ragged_pair_is_padded() {
        let mut rng = StdRng::seed_from_u64(6);
        let clean = sine(16000, 440.0, 0.5);
        let noise = sine(12000, 90.0, 0.3);
        let result = segmental_snr_mixer(&clean, &noise, 10, 16000, (-35, -15), &mut rng);
        assert_eq!(result.noisy.len(), 16000);
        assert_eq!(result.noise.len(), 16000);
    }
}
