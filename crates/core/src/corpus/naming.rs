//! Output filenames encoding mix provenance.
//!
//! The mixed filename carries the clean stem, noise stem, SNR, achieved
//! level, category, and the sequential file id. Noise stem and category
//! are bounded by `*` sentinels, not underscore splitting, so stems that
//! themselves contain underscores survive a round trip. The clean and
//! noise copies carry only the file id; the id is the join key across the
//! three outputs.

/// The three filenames produced for one mix job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub noisy: String,
    pub clean: String,
    pub noise: String,
}

/// Derive the output filename triple for one mix job.
pub fn output_names(
    clean_stem: &str,
    noise_stem: &str,
    category: &str,
    snr: i32,
    level: i32,
    file_id: usize,
) -> OutputNames {
    OutputNames {
        noisy: format!(
            "{}_*{}*_snr{}_tl{}_cat*{}*_fileid_{}.wav",
            clean_stem, noise_stem, snr, level, category, file_id
        ),
        clean: format!("clean_fileid_{}.wav", file_id),
        noise: format!("noise_fileid_{}.wav", file_id),
    }
}

/// Strip a trailing `.wav` (if present) to get the stem used in names.
pub fn file_stem(name: &str) -> &str {
    name.strip_suffix(".wav").unwrap_or(name)
}

/// Fields recovered from a mixed filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNoisyName {
    pub clean_stem: String,
    pub noise_stem: String,
    pub snr: i32,
    pub level: i32,
    pub category: String,
    pub file_id: usize,
}

/// Parse a mixed filename back into its fields.
///
/// Returns `None` for names not produced by [`output_names`]. Stems
/// containing `*` are not representable and will not parse.
pub fn parse_noisy_name(name: &str) -> Option<ParsedNoisyName> {
    let parts: Vec<&str> = name.split('*').collect();
    if parts.len() != 5 {
        return None;
    }

    let clean_stem = parts[0].strip_suffix('_')?;
    let noise_stem = parts[1];
    let category = parts[3];

    // parts[2] is "_snr{snr}_tl{level}_cat"
    let middle = parts[2].strip_prefix("_snr")?.strip_suffix("_cat")?;
    let (snr_str, level_str) = middle.split_once("_tl")?;
    let snr = snr_str.parse().ok()?;
    let level = level_str.parse().ok()?;

    // parts[4] is "_fileid_{id}.wav"
    let file_id = parts[4]
        .strip_prefix("_fileid_")?
        .strip_suffix(".wav")?
        .parse()
        .ok()?;

    Some(ParsedNoisyName {
        clean_stem: clean_stem.to_string(),
        noise_stem: noise_stem.to_string(),
        snr,
        level,
        category: category.to_string(),
        file_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_format() {
        let names = output_names("p232_007", "AirConditioner_1", "hvac", 10, -23, 42);
        assert_eq!(
            names.noisy,
            "p232_007_*AirConditioner_1*_snr10_tl-23_cat*hvac*_fileid_42.wav"
        );
        assert_eq!(names.clean, "clean_fileid_42.wav");
        assert_eq!(names.noise, "noise_fileid_42.wav");
    }

    #[test]
    fn test_round_trip_with_underscores() {
        let names = output_names("my_clean_take_2", "street_noise_03", "city_traffic", -5, -30, 7);
        let parsed = parse_noisy_name(&names.noisy).unwrap();
        assert_eq!(parsed.clean_stem, "my_clean_take_2");
        assert_eq!(parsed.noise_stem, "street_noise_03");
        assert_eq!(parsed.snr, -5);
        assert_eq!(parsed.level, -30);
        assert_eq!(parsed.category, "city_traffic");
        assert_eq!(parsed.file_id, 7);
    }

    #[test]
    fn test_round_trip_plain_stems() {
        let names = output_names("speech", "hum", "appliance", 0, -15, 0);
        let parsed = parse_noisy_name(&names.noisy).unwrap();
        assert_eq!(parsed.clean_stem, "speech");
        assert_eq!(parsed.noise_stem, "hum");
        assert_eq!(parsed.snr, 0);
        assert_eq!(parsed.level, -15);
        assert_eq!(parsed.category, "appliance");
        assert_eq!(parsed.file_id, 0);
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        assert!(parse_noisy_name("clean_fileid_3.wav").is_none());
        assert!(parse_noisy_name("whatever.wav").is_none());
        assert!(parse_noisy_name("a_*b*_snrX_tl-1_cat*c*_fileid_1.wav").is_none());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("p232_007.wav"), "p232_007");
        assert_eq!(file_stem("noext"), "noext");
    }
}
