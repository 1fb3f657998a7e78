//! Progress report export
//!
//! Writes an analytics report to disk as pretty-printed JSON or as a
//! sectioned CSV file (one block per series).

use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::analytics::ProgressReport;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }

    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::parse(extension)
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Writes progress reports to files
pub struct ReportExporter;

impl ReportExporter {
    pub fn export<P: AsRef<Path>>(
        report: &ProgressReport,
        path: P,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        match format {
            ExportFormat::Json => Self::export_json(report, path.as_ref()),
            ExportFormat::Csv => Self::export_csv(report, path.as_ref()),
        }?;
        info!(path = %path.as_ref().display(), ?format, "Report exported");
        Ok(())
    }

    fn export_json(report: &ProgressReport, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, report)?;
        Ok(())
    }

    fn export_csv(report: &ProgressReport, path: &Path) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        writer.write_record(["section", "key", "value"])?;
        let summary_rows = [
            ("total_workouts", report.summary.total_workouts.to_string()),
            ("total_sets", report.summary.total_sets.to_string()),
            ("total_volume", report.summary.total_volume.to_string()),
            (
                "avg_duration_minutes",
                report.summary.avg_duration_minutes.to_string(),
            ),
            (
                "avg_workouts_per_week",
                report.summary.avg_workouts_per_week.to_string(),
            ),
        ];
        for (key, value) in summary_rows {
            writer.write_record(["summary", key, value.as_str()])?;
        }

        for point in &report.volume_progression {
            let date = point.date.to_string();
            let volume = point.total_volume.to_string();
            writer.write_record([
                "volume_progression",
                date.as_str(),
                volume.as_str(),
                point.label.as_deref().unwrap_or(""),
            ])?;
        }
        for week in &report.frequency {
            let week_start = week.week_start.to_string();
            let count = week.workout_count.to_string();
            writer.write_record(["frequency", week_start.as_str(), count.as_str()])?;
        }
        for group in &report.muscle_group_distribution {
            let volume = group.volume.to_string();
            writer.write_record([
                "muscle_group_distribution",
                group.group.as_str(),
                volume.as_str(),
            ])?;
        }
        for (exercise, points) in &report.record_progression {
            for point in points {
                let date = point.date.to_string();
                let load = point.load_kg.to_string();
                writer.write_record([
                    "record_progression",
                    exercise.as_str(),
                    date.as_str(),
                    load.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{ProgressSummary, VolumePoint, WeeklyFrequency};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn sample_report() -> ProgressReport {
        ProgressReport {
            athlete_id: "a1".to_string(),
            window_days: 90,
            summary: ProgressSummary {
                total_workouts: 2,
                total_sets: 5,
                total_volume: dec!(1250),
                avg_duration_minutes: dec!(55.0),
                avg_workouts_per_week: dec!(0.16),
            },
            volume_progression: vec![VolumePoint {
                date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                total_volume: dec!(900),
                label: Some("Push day".to_string()),
            }],
            frequency: vec![WeeklyFrequency {
                week_start: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
                workout_count: 2,
            }],
            muscle_group_distribution: vec![],
            record_progression: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_inference() {
        assert_eq!(
            ExportFormat::from_path(Path::new("report.json")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("report.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert!(ExportFormat::from_path(Path::new("report.pdf")).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = sample_report();

        ReportExporter::export(&report, &path, ExportFormat::Json).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: ProgressReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_csv_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        ReportExporter::export(&sample_report(), &path, ExportFormat::Csv).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("summary,total_volume,1250"));
        assert!(raw.contains("volume_progression,2024-09-02,900,Push day"));
        assert!(raw.contains("frequency,2024-09-01,2"));
    }
}
