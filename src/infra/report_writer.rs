use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::scan_report::ScanReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl FromStr for OutputDestination {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "-" => OutputDestination::Stdout,
            path => OutputDestination::File(PathBuf::from(path)),
        })
    }
}

#[derive(Error, Debug)]
pub enum ReportWriterError {
    #[error("error serializing the report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("error writing the report: {0}")]
    IO(#[from] std::io::Error),
}

pub fn render_report(report: &ScanReport, pretty: bool) -> Result<String, ReportWriterError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    text.push('\n');
    Ok(text)
}

pub fn write_report(
    report: &ScanReport,
    destination: &OutputDestination,
    pretty: bool,
) -> Result<(), ReportWriterError> {
    let text = render_report(report, pretty)?;

    match destination {
        OutputDestination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        OutputDestination::File(path) => std::fs::write(path, text)?,
    }

    Ok(())
}
