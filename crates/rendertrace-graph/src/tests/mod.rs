//! Crate-level tests exercising the whole pipeline.

mod scenario_tests;

use chrono::{TimeZone, Utc};

use crate::{AnalysisReport, Analyzer, AnalyzerConfig, FixedClock, RunMetadata, SourceFile};

pub(crate) fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

pub(crate) fn run() -> RunMetadata {
    RunMetadata::new("fixture", "https://github.com/acme/fixture", "0123abcd")
}

pub(crate) fn analyze_with(config: AnalyzerConfig, files: &[(&str, &str)]) -> AnalysisReport {
    let files: Vec<SourceFile> = files
        .iter()
        .map(|(path, text)| SourceFile::new(*path, *text))
        .collect();
    Analyzer::new(config)
        .with_clock(fixed_clock())
        .analyze(&files, &run())
        .expect("analysis should succeed")
}

pub(crate) fn analyze_files(files: &[(&str, &str)]) -> AnalysisReport {
    analyze_with(AnalyzerConfig::default(), files)
}
