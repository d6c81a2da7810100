//! JSON export of the applied filter and the active visualization.

use crate::error::Result;
use crate::filter::FilterSnapshot;
use crate::registry::VisualizationMode;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilters {
    pub date_range: String,
    pub day_type: String,
    pub time_range: String,
    pub stay_duration: String,
    pub building: String,
    pub floor: String,
    pub area: String,
    pub selected_guids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub filters: ExportFilters,
    pub visualization_type: VisualizationMode,
    pub export_time: String,
    pub total_records: u32,
}

impl ExportFilters {
    pub fn from_snapshot(snapshot: &FilterSnapshot) -> Self {
        Self {
            date_range: format!(
                "{} to {}",
                snapshot.date_range.start, snapshot.date_range.end
            ),
            day_type: snapshot.day_type.as_str().to_string(),
            time_range: format!(
                "{} to {}",
                snapshot.time_range.start, snapshot.time_range.end
            ),
            stay_duration: format!(
                "{}-{}分",
                snapshot.stay_duration.min, snapshot.stay_duration.max
            ),
            building: snapshot.building_id.clone(),
            floor: snapshot.floor_id.clone(),
            area: snapshot.area_id.clone(),
            selected_guids: snapshot.selected_identifiers.clone(),
        }
    }
}

pub fn build_export<R: Rng + ?Sized>(
    snapshot: &FilterSnapshot,
    mode: VisualizationMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ExportDocument {
    ExportDocument {
        filters: ExportFilters::from_snapshot(snapshot),
        visualization_type: mode,
        export_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_records: rng.gen_range(1000..11000),
    }
}

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("indoor_analytics_{}.json", now.timestamp_millis())
}

/// Writes the document pretty-printed into `dir`, creating it if needed, and
/// returns the file path.
pub fn write_export(dir: &Path, document: &ExportDocument, now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    let json = serde_json::to_string_pretty(document)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), records = document.total_records, "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterEditor;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap()
    }

    #[test]
    fn document_uses_camel_case_and_readable_ranges() {
        let mut editor = FilterEditor::new();
        editor.toggle_identifier("GUID-A1-002");
        let document = build_export(
            &editor.apply(),
            VisualizationMode::AreaCrossTabulation,
            fixed_now(),
            &mut StdRng::seed_from_u64(1),
        );
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["filters"]["dateRange"], "2024-01-01 to 2024-01-31");
        assert_eq!(value["filters"]["dayType"], "all");
        assert_eq!(value["filters"]["timeRange"], "09:00 to 18:00");
        assert_eq!(value["filters"]["stayDuration"], "5-120分");
        assert_eq!(value["filters"]["area"], "all-areas");
        assert_eq!(value["filters"]["selectedGuids"][0], "GUID-A1-002");
        assert_eq!(value["visualizationType"], "area-cross-tabulation");
        assert_eq!(value["exportTime"], "2024-03-05T12:30:00.000Z");
        let total = value["totalRecords"].as_u64().unwrap();
        assert!((1000..11000).contains(&total));
    }

    #[test]
    fn file_name_carries_unix_millis() {
        assert_eq!(
            export_file_name(fixed_now()),
            format!("indoor_analytics_{}.json", fixed_now().timestamp_millis())
        );
    }

    #[test]
    fn export_is_written_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let document = build_export(
            &FilterSnapshot::default(),
            VisualizationMode::DensityField,
            fixed_now(),
            &mut StdRng::seed_from_u64(2),
        );

        let path = write_export(&target, &document, fixed_now()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"filters\": {"));
        assert!(written.contains("\"visualizationType\": \"heatmap\""));
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let document = build_export(
            &FilterSnapshot::default(),
            VisualizationMode::DensityField,
            fixed_now(),
            &mut StdRng::seed_from_u64(3),
        );
        assert!(write_export(&blocker, &document, fixed_now()).is_err());
    }
}
