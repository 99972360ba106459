//! Integration tests for the spectra crates.
//!
//! End-to-end coverage of the pipeline: CSV table on disk -> observer ->
//! stimulus -> RGB through a derived transform. Single-crate behavior lives
//! in each crate's own unit tests.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;
    use spectra_observer::{CmfRecord, CmfTable, Observer, Spectrum};
    use spectra_primaries::{ColorTransform, SRGB, SRGB_10DEG};
    use std::fs;
    use tempfile::tempdir;

    /// Synthetic long-wavelength table: x-bar heavy, no z-bar response.
    fn red_heavy_table() -> CmfTable {
        CmfTable::from_records(
            (600u32..=650)
                .map(|wavelength| CmfRecord {
                    wavelength,
                    x: 1.0,
                    y: 0.3,
                    z: 0.0,
                })
                .collect(),
        )
        .unwrap()
    }

    /// Full pipeline from files on disk: parse both CSVs, integrate, convert.
    #[test]
    fn test_csv_to_rgb_pipeline() {
        let dir = tempdir().unwrap();

        let cmf_path = dir.path().join("cmf.csv");
        let mut cmf = String::from("# toy table\n");
        for wavelength in 500u32..=510 {
            cmf.push_str(&format!("{wavelength},0.2,0.8,0.1\n"));
        }
        fs::write(&cmf_path, cmf).unwrap();

        let spectrum_path = dir.path().join("spectrum.csv");
        fs::write(&spectrum_path, "505,1.0\n506,0.5\n").unwrap();

        let table = CmfTable::from_csv_path(&cmf_path).expect("CMF table should load");
        let observer = Observer::with_scale(table, 1.0);
        let spectrum = Spectrum::from_csv_path(&spectrum_path).expect("spectrum should load");

        let stimulus = observer.stimulus(&spectrum);
        // 1.5 total intensity against constant weights
        assert_relative_eq!(stimulus.tristimulus.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(stimulus.tristimulus.y, 1.2, epsilon = 1e-12);
        assert_relative_eq!(stimulus.tristimulus.z, 0.15, epsilon = 1e-12);

        let transform = ColorTransform::derive(&SRGB_10DEG).unwrap();
        let rgb = transform.xyz_to_rgb(stimulus.tristimulus);
        let back = transform.rgb_to_xyz(rgb);
        assert_relative_eq!(back.x, stimulus.tristimulus.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, stimulus.tristimulus.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, stimulus.tristimulus.z, epsilon = 1e-12);
    }

    /// A narrowband long-wavelength spectrum must come out red-dominant,
    /// and may legitimately leave the sRGB gamut (negative components).
    #[test]
    fn test_narrowband_red_is_red_dominant() {
        let observer = Observer::with_scale(red_heavy_table(), 1.0);
        let mut spectrum = Spectrum::new();
        spectrum.set_segment(615, 625, 1.0, 1.0);

        let stimulus = observer.stimulus(&spectrum);
        let chroma = stimulus.chromaticity.unwrap();
        assert_relative_eq!(chroma.x + chroma.y + chroma.z, 1.0, epsilon = 1e-12);
        assert!(chroma.x > chroma.y, "x-heavy weights must dominate");

        let transform = ColorTransform::derive(&SRGB).unwrap();
        let rgb = transform.xyz_to_rgb(stimulus.tristimulus);
        assert!(rgb.x > rgb.y && rgb.x > rgb.z, "expected red-dominant, got {rgb}");
    }

    /// A dark spectrum flows through the pipeline without NaN anywhere.
    #[test]
    fn test_dark_spectrum_stays_defined() {
        let observer = Observer::new(red_heavy_table());
        let stimulus = observer.stimulus(&Spectrum::new());
        assert_eq!(stimulus.tristimulus, DVec3::ZERO);
        assert!(stimulus.chromaticity.is_none());

        let transform = ColorTransform::derive(&SRGB_10DEG).unwrap();
        let rgb = transform.xyz_to_rgb(stimulus.tristimulus);
        assert_eq!(rgb, DVec3::ZERO);
        assert!(rgb.is_finite());
    }

    /// The painted-segment editing path feeds integration like any other
    /// spectrum source.
    #[test]
    fn test_painted_segment_matches_manual_samples() {
        let observer = Observer::with_scale(red_heavy_table(), 1.0);

        let mut painted = Spectrum::new();
        painted.set_segment(610, 614, 0.0, 1.0);

        let manual: Spectrum = [
            (610, 0.0),
            (611, 0.25),
            (612, 0.5),
            (613, 0.75),
            (614, 1.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            observer.stimulus(&painted).tristimulus,
            observer.stimulus(&manual).tristimulus
        );
    }

    /// Intensity at the table's last wavelength is excluded end to end.
    #[test]
    fn test_upper_bound_exclusive_through_pipeline() {
        let observer = Observer::with_scale(red_heavy_table(), 1.0);
        let spectrum: Spectrum = [(650, 5.0)].into_iter().collect();
        let stimulus = observer.stimulus(&spectrum);
        assert_eq!(stimulus.tristimulus, DVec3::ZERO);
        assert!(stimulus.chromaticity.is_none());
    }
}
