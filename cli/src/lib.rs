use matte::{
    io, ColorPolicy, MatteError, MatteSettings, OutputFormat, Predicate, StrategyKind,
};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;


#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Matte(#[from] MatteError),
    #[error("Unsupported settings file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Expected three comma-separated channel values (e.g. 240,240,240), got '{0}'")]
    InvalidChannels(String),
}


/// Auto-detect file format and load settings
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<MatteSettings, CliError> {
    let path_ref = path.as_ref();
    let settings = match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => MatteSettings::from_toml_file(path_ref)?,
        Some("json") => MatteSettings::from_json_file(path_ref)?,
        _ => return Err(CliError::UnsupportedFileFormat),
    };
    Ok(settings)
}

/// Parse `R,G,B` into three raw channel values. Range checks happen when the
/// filter is built.
pub fn parse_channels(value: &str) -> Result<[i64; 3], CliError> {
    let parts: Vec<i64> = value
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| CliError::InvalidChannels(value.to_string()))?;

    <[i64; 3]>::try_from(parts).map_err(|_| CliError::InvalidChannels(value.to_string()))
}


/// Settings given on the command line, applied on top of a settings file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub lower: Option<[i64; 3]>,
    pub upper: Option<[i64; 3]>,
    pub predicate: Option<Predicate>,
    pub background_color: Option<ColorPolicy>,
    pub strategy: Option<StrategyKind>,
}

impl SettingsOverrides {
    pub fn apply_to(&self, settings: &mut MatteSettings) {
        if let Some(lower) = self.lower {
            settings.lower = lower;
        }
        if let Some(upper) = self.upper {
            settings.upper = upper;
        }
        if let Some(predicate) = self.predicate {
            settings.predicate = predicate;
        }
        if let Some(background_color) = self.background_color {
            settings.background_color = background_color;
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
    }
}


/// One input file turned into one transparent output file
#[derive(Debug, Clone)]
pub struct MatteJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub settings: MatteSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub width: u32,
    pub height: u32,
    pub background_pixels: usize,
}

impl MatteJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        Self {
            format: OutputFormat::from_path(&output),
            input: input.into(),
            output,
            settings: MatteSettings::default(),
        }
    }

    /// Decode, filter and write the output file
    pub fn run(&self) -> Result<JobSummary, CliError> {
        // Settings are validated before the input is touched
        let filter = self.settings.build_filter()?;
        info!("{}", filter.info());

        let image = io::decode(&self.input)?;
        let report = filter.apply_with_report(image)?;
        info!(
            "Cleared {} of {} pixels ({:.1}%)",
            report.background_pixels,
            report.total_pixels(),
            report.background_ratio() * 100.0
        );

        io::encode(&report.image, &self.output, self.format)?;

        Ok(JobSummary {
            width: report.image.width(),
            height: report.image.height(),
            background_pixels: report.background_pixels,
        })
    }
}
