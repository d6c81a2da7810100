use clap::{CommandFactory, Parser};
use indoor_analytics::domain::DayType;

#[derive(Debug, Parser)]
#[command(
    name = "indoor-analytics",
    version,
    about = "Indoor positioning analytics dashboard"
)]
pub struct CliArgs {
    /// Print a summary of the selected visualization and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the export file for the selected filter and mode, then exit
    #[arg(long)]
    pub export: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Building to select at startup
    #[arg(long, value_name = "ID")]
    pub building: Option<String>,

    /// Floor to select at startup
    #[arg(long, value_name = "ID")]
    pub floor: Option<String>,

    /// Area to select at startup
    #[arg(long, value_name = "ID")]
    pub area: Option<String>,

    /// Tracked identifier to select (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Day type to filter on at startup: all, weekday or holiday
    #[arg(long = "day-type", value_name = "TYPE", value_parser = parse_day_type)]
    pub day_type: Option<DayType>,

    /// Visualization mode tag or label, fuzzy matched
    #[arg(long, value_name = "TAG")]
    pub mode: Option<String>,

    /// Override export output directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Override log directory
    #[arg(long = "log-dir", value_name = "PATH")]
    pub log_dir: Option<String>,
}

fn parse_day_type(value: &str) -> Result<DayType, String> {
    DayType::parse(value)
        .ok_or_else(|| format!("unknown day type '{value}', expected all, weekday or holiday"))
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dir) = &self.export_dir {
            std::env::set_var("EXPORT_DIR", dir);
        }
        if let Some(dir) = &self.log_dir {
            std::env::set_var("LOG_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_repeatable() {
        let args = CliArgs::parse_from([
            "indoor-analytics",
            "--select",
            "GUID-A1-001",
            "--select",
            "GUID-A1-003",
            "--mode",
            "cluster",
        ]);
        assert_eq!(args.select, ["GUID-A1-001", "GUID-A1-003"]);
        assert_eq!(args.mode.as_deref(), Some("cluster"));
        assert!(!args.headless);
    }

    #[test]
    fn day_type_accepts_any_case_and_rejects_unknown_values() {
        let args = CliArgs::parse_from(["indoor-analytics", "--day-type", "Holiday"]);
        assert_eq!(args.day_type, Some(DayType::Holiday));

        let error = CliArgs::try_parse_from(["indoor-analytics", "--day-type", "sometimes"]);
        assert!(error.is_err());
    }

    #[test]
    fn help_mentions_export_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--export-dir"));
        assert!(help.contains("--select"));
    }
}
