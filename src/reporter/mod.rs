pub mod error;
pub mod jira;
pub mod model;
pub mod results_log;
pub mod serialize;

use crate::app::context::RunContext;
use crate::app::ticket::{TicketExtractor, TicketId};
use crate::configuration::settings::{Settings, SkipPolicy};
use crate::connection::Transport;
use crate::reporter::error::ReportError;
use crate::reporter::jira::JiraClient;
use crate::reporter::model::{Outcome, TestReport};
use crate::reporter::results_log::ResultLog;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Progress of a single report, in the order the steps happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    LogWritten,
    TicketResolved,
    CommentPosted,
    TransitionPosted,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub ticket_id: TicketId,
    pub comment_status: u16,
    pub transition_status: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reported {
    /// Setup and teardown phases are never reported.
    Ignored,
    /// Line written to the results log, tracker left alone.
    Logged,
    Delivered(Delivery),
}

/// A report that stopped part way. `stage` is the last step completed.
#[derive(Debug, Error)]
#[error("stopped after {stage}: {error}")]
pub struct ReportFailure {
    pub stage: Stage,
    #[source]
    pub error: ReportError,
}

pub struct Reporter<S> {
    log: ResultLog,
    extractor: TicketExtractor,
    jira: JiraClient<S>,
    skip_policy: SkipPolicy,
}

impl<S: Transport> Reporter<S> {
    pub fn new(settings: &Settings, sender: Arc<S>) -> Result<Self, ReportError> {
        Ok(Self {
            log: ResultLog::new(settings.results_log.clone()),
            extractor: TicketExtractor::new(
                &settings.prefix_ticket_value,
                settings.ticket_pattern.clone(),
            )?,
            jira: JiraClient::new(settings, sender)?,
            skip_policy: settings.skip_policy,
        })
    }

    /// Runs one report through log, ticket resolution, comment and transition.
    ///
    /// Steps run strictly in order and the first failure ends the report.
    /// Nothing is rolled back.
    pub fn report(
        &self,
        context: &mut RunContext,
        report: &TestReport,
    ) -> Result<Reported, ReportFailure> {
        if !report.is_call() {
            return Ok(Reported::Ignored);
        }
        let mut stage = Stage::Idle;
        let fail = |stage, error| ReportFailure { stage, error };

        self.record_to_log(report).map_err(|e| fail(stage, e))?;
        stage = self.advance(report, stage);

        let expected = context.next_expected();
        if !self.is_reportable(report) {
            debug!("Skip of {} is not an expected failure, not reported", report.node_id);
            return Ok(Reported::Logged);
        }
        let ticket_id = self
            .extractor
            .resolve(&report.node_id, expected.as_deref())
            .map_err(|e| fail(stage, e.into()))?;
        stage = self.advance(report, stage);

        let comment_status = self
            .jira
            .post_comment(&ticket_id, report)
            .map_err(|e| fail(stage, e))?;
        stage = self.advance(report, stage);

        let transition_status = self
            .jira
            .post_transition(&ticket_id, report.outcome)
            .map_err(|e| fail(stage, e))?;
        stage = self.advance(report, stage);
        self.advance(report, stage);

        Ok(Reported::Delivered(Delivery {
            ticket_id,
            comment_status,
            transition_status,
        }))
    }

    pub fn record_to_log(&self, report: &TestReport) -> Result<(), ReportError> {
        self.log.append(report).map_err(|source| ReportError::Log {
            path: self.log.path().to_path_buf(),
            source,
        })
    }

    fn is_reportable(&self, report: &TestReport) -> bool {
        match (report.outcome, self.skip_policy) {
            (Outcome::Skipped, SkipPolicy::XfailOnly) => report.xfail,
            _ => true,
        }
    }

    fn advance(&self, report: &TestReport, stage: Stage) -> Stage {
        let next = stage.next();
        trace!("{}: {} -> {}", report.node_id, stage, next);
        next
    }
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Idle => Stage::LogWritten,
            Stage::LogWritten => Stage::TicketResolved,
            Stage::TicketResolved => Stage::CommentPosted,
            Stage::CommentPosted => Stage::TransitionPosted,
            Stage::TransitionPosted | Stage::Done => Stage::Done,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::Idle => "idle",
            Stage::LogWritten => "log written",
            Stage::TicketResolved => "ticket resolved",
            Stage::CommentPosted => "comment posted",
            Stage::TransitionPosted => "transition posted",
            Stage::Done => "done",
        })
    }
}
