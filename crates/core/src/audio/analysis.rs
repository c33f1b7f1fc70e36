//! Signal measurements feeding the SNR mixer: RMS energy, active-segment
//! RMS via frame energy gating, clipping detection.

const EPS: f64 = 1e-16;

/// Compute RMS energy of the entire signal.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// RMS over the active segments of a clean/noise pair.
///
/// Walks both signals in 100 ms windows and keeps only windows whose noise
/// energy exceeds `energy_thresh_db`. Returns `(clean_rms, noise_rms)`
/// computed over the kept windows; falls back to a tiny epsilon when no
/// window is active so downstream division stays finite.
pub fn active_rms(clean: &[f64], noise: &[f64], fs: u32, energy_thresh_db: f64) -> (f64, f64) {
    let window_samples = (fs as usize / 10).max(1); // 100 ms

    let mut clean_sum_sq = 0.0;
    let mut noise_sum_sq = 0.0;
    let mut active_len = 0usize;

    let len = clean.len().min(noise.len());
    let mut start = 0;
    while start < len {
        let end = (start + window_samples).min(len);
        let noise_win = &noise[start..end];
        let win_power: f64 = noise_win.iter().map(|s| s * s).sum::<f64>() / noise_win.len() as f64;
        let win_db = 20.0 * (win_power + EPS).log10();
        if win_db > energy_thresh_db {
            noise_sum_sq += noise_win.iter().map(|s| s * s).sum::<f64>();
            clean_sum_sq += clean[start..end].iter().map(|s| s * s).sum::<f64>();
            active_len += end - start;
        }
        start = end;
    }

    if active_len == 0 {
        return (EPS, EPS);
    }
    (
        (clean_sum_sq / active_len as f64).sqrt(),
        (noise_sum_sq / active_len as f64).sqrt(),
    )
}

/// True when any sample magnitude reaches the clipping threshold.
pub fn is_clipped(samples: &[f64], threshold: f64) -> bool {
    samples.iter().any(|s| s.abs() >= threshold)
}

/// Peak absolute amplitude of a signal.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()))
}
