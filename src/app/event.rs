use crate::reporter::model::{CollectedItem, Outcome, Phase, TestReport};
use clap::arg_enum;
use serde_derive::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read events: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Something the test runner announced.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    Collected(CollectedItem),
    Report(TestReport),
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum EventFormat {
        Session,
        Libtest,
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LibtestLine {
    Test(LibtestTest),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct LibtestTest {
    event: String,
    name: String,
    #[serde(default)]
    exec_time: Option<f64>,
}

impl EventFormat {
    fn parse_line(self, line: &str) -> Result<Option<Event>, serde_json::Error> {
        match self {
            EventFormat::Session => serde_json::from_str(line).map(Some),
            EventFormat::Libtest => serde_json::from_str::<LibtestLine>(line).map(|line| match line {
                LibtestLine::Test(test) => test.into_event(),
                LibtestLine::Other => None,
            }),
        }
    }
}

impl LibtestTest {
    fn into_event(self) -> Option<Event> {
        let outcome = match self.event.as_str() {
            "started" => return Some(Event::Collected(CollectedItem::new(self.name))),
            "ok" => Outcome::Passed,
            "failed" => Outcome::Failed,
            "ignored" => Outcome::Skipped,
            _ => return None,
        };
        Some(Event::Report(TestReport {
            node_id: self.name,
            phase: Phase::Call,
            outcome,
            duration: self.exec_time.unwrap_or_default(),
            xfail: false,
        }))
    }
}

pub fn read_events<R: BufRead>(reader: R, format: EventFormat) -> Result<Vec<Event>, InputError> {
    let mut events = vec![];
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = format
            .parse_line(&line)
            .map_err(|source| InputError::Malformed {
                line: index + 1,
                source,
            })?;
        events.extend(event);
    }
    Ok(events)
}

pub fn read_events_file(path: &Path, format: EventFormat) -> Result<Vec<Event>, InputError> {
    read_events(BufReader::new(File::open(path)?), format)
}
