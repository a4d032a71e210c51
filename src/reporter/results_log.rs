use crate::reporter::model::TestReport;
use crate::reporter::serialize::text;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Plain text log with one line per reported test.
///
/// The file is opened and closed for every line, so concurrent writers
/// may interleave.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, report: &TestReport) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(Self::line(report).as_bytes())?;
        file.flush()
    }

    fn line(report: &TestReport) -> String {
        format!(
            "{}   {}   {}\n",
            report.node_id,
            report.outcome,
            text::float(report.duration)
        )
    }
}
