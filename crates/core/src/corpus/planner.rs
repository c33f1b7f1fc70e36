//! Per-clean-file mix planning: category sampling without repetition,
//! noise file selection, and length alignment of the noise signal.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::corpus::catalog::NoiseCatalog;
use crate::error::CorpusError;

/// One planned pairing of a clean file with noise material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoisePick {
    pub category: String,
    pub noise_file: String,
}

/// Select `samples_size` distinct categories and one noise file from each.
///
/// Categories are sampled without replacement, so a clean file is never
/// mixed with the same category twice. An empty category costs its sample:
/// it is skipped with a warning and the returned plan is shorter, matching
/// the run's skip-and-continue policy. Startup validation should make
/// `InsufficientCategories` unreachable, but it is checked here anyway.
pub fn plan_noise_picks(
    catalog: &NoiseCatalog,
    samples_size: usize,
    rng: &mut StdRng,
) -> Result<Vec<NoisePick>, CorpusError> {
    let categories = catalog.categories();
    if categories.len() < samples_size {
        return Err(CorpusError::InsufficientCategories {
            needed: samples_size,
            available: categories.len(),
        });
    }

    let indices = rand::seq::index::sample(rng, categories.len(), samples_size);

    let mut picks = Vec::with_capacity(samples_size);
    for idx in indices.iter() {
        let category = categories[idx];
        match catalog.files(category).choose(rng) {
            Some(noise_file) => picks.push(NoisePick {
                category: category.to_string(),
                noise_file: noise_file.clone(),
            }),
            None => {
                let skip = CorpusError::EmptyCategory {
                    category: category.to_string(),
                };
                log::warn!("{}, skipping sample", skip);
            }
        }
    }

    Ok(picks)
}

/// Align the noise signal to exactly `clean_len` samples.
///
/// Shorter noise is tiled until it covers the clean length, then truncated;
/// longer noise is truncated; equal length passes through. SignalMixer
/// requires equal-length inputs, so this must run before mixing.
pub fn align_noise_length(noise: &[f64], clean_len: usize) -> Vec<f64> {
    if noise.is_empty() || clean_len == 0 {
        return vec![0.0; clean_len];
    }
    if noise.len() >= clean_len {
        return noise[..clean_len].to_vec();
    }
    let mut tiled = Vec::with_capacity(clean_len + noise.len());
    while tiled.len() < clean_len {
        tiled.extend_from_slice(noise);
    }
    tiled.truncate(clean_len);
    tiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn make_catalog(tree: &[(&str, &[&str])]) -> NoiseCatalog {
        let root = std::env::temp_dir().join(format!(
            "noisemix_planner_{}_{}",
            tree.iter().map(|(c, _)| *c).collect::<String>(),
            std::process::id()
        ));
        std::fs::remove_dir_all(&root).ok();
        let mut categories = Vec::new();
        for (cat, files) in tree {
            let dir = root.join(cat);
            std::fs::create_dir_all(&dir).unwrap();
            for f in *files {
                std::fs::write(dir.join(f), b"x").unwrap();
            }
            categories.push(cat.to_string());
        }
        let catalog = NoiseCatalog::build(&root, &categories).unwrap();
        std::fs::remove_dir_all(&root).ok();
        catalog
    }

    #[test]
    fn test_categories_are_distinct() {
        let catalog = make_catalog(&[
            ("babble", &["b1.wav"][..]),
            ("traffic", &["t1.wav", "t2.wav"][..]),
            ("wind", &["w1.wav"][..]),
            ("office", &["o1.wav"][..]),
        ]);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let picks = plan_noise_picks(&catalog, 3, &mut rng).unwrap();
            assert_eq!(picks.len(), 3);
            let distinct: HashSet<_> = picks.iter().map(|p| p.category.as_str()).collect();
            assert_eq!(distinct.len(), 3);
        }
    }

    #[test]
    fn test_picked_file_belongs_to_category() {
        let catalog = make_catalog(&[
            ("babble", &["b1.wav", "b2.wav"][..]),
            ("traffic", &["t1.wav"][..]),
        ]);
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..20 {
            for pick in plan_noise_picks(&catalog, 2, &mut rng).unwrap() {
                assert!(catalog.files(&pick.category).contains(&pick.noise_file));
            }
        }
    }

    #[test]
    fn test_insufficient_categories() {
        let catalog = make_catalog(&[("babble", &["b1.wav"][..])]);
        let mut rng = StdRng::seed_from_u64(11);
        match plan_noise_picks(&catalog, 2, &mut rng) {
            Err(CorpusError::InsufficientCategories { needed, available }) => {
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientCategories, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_category_shortens_plan() {
        let catalog = make_catalog(&[("babble", &["b1.wav"][..]), ("vacant", &[][..])]);
        let mut rng = StdRng::seed_from_u64(12);
        // Both categories are always selected; the empty one is dropped
        let picks = plan_noise_picks(&catalog, 2, &mut rng).unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].category, "babble");
    }

    #[test]
    fn test_empty_category_error_names_category() {
        let err = CorpusError::EmptyCategory {
            category: "vacant".into(),
        };
        assert_eq!(err.to_string(), "noise category 'vacant' contains no files");
    }

    #[test]
    fn test_deterministic_given_seed() {
        let catalog = make_catalog(&[
            ("babble", &["b1.wav", "b2.wav"][..]),
            ("traffic", &["t1.wav", "t2.wav"][..]),
            ("wind", &["w1.wav"][..]),
        ]);
        let a = plan_noise_picks(&catalog, 2, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = plan_noise_picks(&catalog, 2, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_align_shorter_noise_tiles() {
        let noise = vec![1.0, 2.0, 3.0];
        let aligned = align_noise_length(&noise, 8);
        assert_eq!(aligned, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_align_longer_noise_truncates() {
        let noise = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let aligned = align_noise_length(&noise, 3);
        assert_eq!(aligned, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_align_equal_passes_through() {
        let noise = vec![1.0, 2.0, 3.0];
        let aligned = align_noise_length(&noise, 3);
        assert_eq!(aligned, noise);
    }

    #[test]
    fn test_align_empty_noise_gives_silence() {
        let aligned = align_noise_length(&[], 4);
        assert_eq!(aligned, vec![0.0; 4]);
    }
}
