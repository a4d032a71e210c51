pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod event;
pub(crate) mod ticket;

use crate::app::context::RunContext;
use crate::app::error::Error;
use crate::app::event::Event;
use crate::connection::Transport;
use crate::reporter::model::{CollectedItem, Outcome, TestReport};
use crate::reporter::{Reported, Reporter};

/// Counters for one replayed run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub collected: usize,
    pub declared_tickets: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub delivered: usize,
    pub logged_only: usize,
    pub report_failures: usize,
}

/// Process exit code for a finished run. Only fatal errors fail the
/// process; tracker delivery problems are counted in the summary.
pub fn exit_code(result: &Result<Summary, Error>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

pub struct App<S> {
    reporter: Reporter<S>,
}

impl<S: Transport> App<S> {
    pub fn new(reporter: Reporter<S>) -> Self {
        App { reporter }
    }

    /// Replays runner events. Collection events are gathered first, then
    /// every report is handed to the reporter in order.
    pub fn run(&self, events: Vec<Event>) -> Summary {
        let mut items: Vec<CollectedItem> = vec![];
        let mut reports: Vec<TestReport> = vec![];
        for event in events {
            match event {
                Event::Collected(item) => items.push(item),
                Event::Report(report) => reports.push(report),
            }
        }
        let mut context = RunContext::from_items(&items);
        let mut summary = Summary {
            collected: items.len(),
            declared_tickets: context.declared(),
            ..Summary::default()
        };
        info!(
            "Collected {} tests, {} with a declared ticket",
            summary.collected, summary.declared_tickets
        );

        for report in &reports {
            self.handle(&mut context, report, &mut summary);
        }
        if context.remaining() > 0 {
            warn!("{} declared tickets were never reported", context.remaining());
        }
        info!(
            "Tests: {} passed, {} failed, {} skipped. Tracker: {} delivered, {} logged only, {} failed",
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.delivered,
            summary.logged_only,
            summary.report_failures
        );
        summary
    }

    fn handle(&self, context: &mut RunContext, report: &TestReport, summary: &mut Summary) {
        if report.is_call() {
            match report.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        match self.reporter.report(context, report) {
            Ok(Reported::Ignored) => {}
            Ok(Reported::Logged) => summary.logged_only += 1,
            Ok(Reported::Delivered(delivery)) => {
                summary.delivered += 1;
                info!(
                    "{} {} -> {} (comment {}, transition {})",
                    report.node_id,
                    report.outcome,
                    delivery.ticket_id,
                    delivery.comment_status,
                    delivery.transition_status
                );
            }
            Err(failure) => {
                summary.report_failures += 1;
                error!("Reporting {} {}", report.node_id, failure);
            }
        }
    }
}
