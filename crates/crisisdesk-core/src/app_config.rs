use std::path::PathBuf;

/// Default factor over the mean daily volume that flags a spike day.
pub const DEFAULT_SPIKE_MULTIPLIER: f64 = 2.0;

/// Default number of media sources listed in a report.
pub const DEFAULT_TOP_SOURCES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub spike_multiplier: f64,
    pub top_sources: usize,
    pub csv_delimiter: u8,
    pub crises_path: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spike_multiplier: DEFAULT_SPIKE_MULTIPLIER,
            top_sources: DEFAULT_TOP_SOURCES,
            csv_delimiter: b',',
            crises_path: PathBuf::from("./config/crises.yaml"),
        }
    }
}
