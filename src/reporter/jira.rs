use crate::app::ticket::TicketId;
use crate::configuration::constants::jira::ISSUE_API_PATH;
use crate::configuration::settings::Settings;
use crate::connection::{Request, Transport};
use crate::reporter::error::ReportError;
use crate::reporter::model::{Outcome, TestReport};
use crate::reporter::serialize::json;
use derivative::*;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request as HttpRequest};
use liquid::model::Value;
use liquid::{Object, Template};
use serde_derive::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct TransitionPayload<'a> {
    transition: TransitionRef<'a>,
}

#[derive(Debug, Serialize)]
struct TransitionRef<'a> {
    id: &'a str,
}

/// Writes comments and applies workflow transitions on tracker issues.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct JiraClient<S> {
    host: String,
    #[derivative(Debug = "ignore")]
    token: String,
    pass_transition: String,
    fail_transition: String,
    #[derivative(Debug = "ignore")]
    template: Template,
    #[derivative(Debug = "ignore")]
    sender: Arc<S>,
}

impl<S: Transport> JiraClient<S> {
    pub fn new(settings: &Settings, sender: Arc<S>) -> Result<Self, ReportError> {
        let token = settings
            .basic_token()
            .ok_or(ReportError::MissingCredentials)?;
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(&settings.comment_template)?;
        Ok(Self {
            host: settings.jira_host(),
            token,
            pass_transition: settings.pass_status_transition.clone(),
            fail_transition: settings.fail_status_transition.clone(),
            template,
            sender,
        })
    }

    pub fn comment_uri(&self, ticket: &TicketId) -> String {
        format!("https://{}/{}/{}/comment", self.host, ISSUE_API_PATH, ticket)
    }

    pub fn transitions_uri(&self, ticket: &TicketId) -> String {
        format!(
            "https://{}/{}/{}/transitions",
            self.host, ISSUE_API_PATH, ticket
        )
    }

    /// Transition applied for an outcome. Skips count as failures.
    pub fn transition_for(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Passed => &self.pass_transition,
            Outcome::Failed | Outcome::Skipped => &self.fail_transition,
        }
    }

    pub fn comment_body(&self, ticket: &TicketId, report: &TestReport) -> Result<String, ReportError> {
        let mut globals = Object::new();
        globals.insert("ticket_id".into(), Value::scalar(ticket.as_str().to_owned()));
        globals.insert(
            "label".into(),
            Value::scalar(report.outcome.label().to_string()),
        );
        globals.insert("node_id".into(), Value::scalar(report.node_id.clone()));
        globals.insert("outcome".into(), Value::scalar(report.outcome.as_str()));
        globals.insert("duration".into(), Value::scalar(report.duration));
        Ok(self.template.render(&globals)?)
    }

    /// Adds the result comment to the ticket and returns the response status.
    pub fn post_comment(&self, ticket: &TicketId, report: &TestReport) -> Result<u16, ReportError> {
        let body = self.comment_body(ticket, report)?;
        let payload = json::to_vec(&CommentPayload { body: &body })?;
        self.post(self.comment_uri(ticket), payload)
    }

    /// Moves the ticket through the workflow and returns the response status.
    pub fn post_transition(&self, ticket: &TicketId, outcome: Outcome) -> Result<u16, ReportError> {
        let payload = json::to_vec(&TransitionPayload {
            transition: TransitionRef {
                id: self.transition_for(outcome),
            },
        })?;
        self.post(self.transitions_uri(ticket), payload)
    }

    fn post(&self, uri: String, payload: Vec<u8>) -> Result<u16, ReportError> {
        debug!("POST {} {}", uri, String::from_utf8_lossy(&payload));
        let request: Request = HttpRequest::builder()
            .method(Method::POST)
            .uri(uri.as_str())
            .header(AUTHORIZATION, format!("Basic {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)?;
        let response = self.sender.send(request)?;
        let status = response.status();
        if !status.is_success() {
            warn!("Tracker answered {} for {}", status, uri);
        }
        Ok(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::settings::tests::settings;
    use crate::connection::recording::Recording;
    use serde_json::json;

    fn report(node_id: &str, outcome: Outcome) -> TestReport {
        TestReport::builder()
            .node_id(node_id)
            .outcome(outcome)
            .duration(1.5)
            .build()
            .unwrap()
    }

    fn client(settings: &Settings) -> (JiraClient<Recording>, Arc<Recording>) {
        let sender = Arc::new(Recording::new());
        (JiraClient::new(settings, sender.clone()).unwrap(), sender)
    }

    #[test]
    fn test_comment_body_labels() {
        let (client, _) = client(&settings());
        let ticket = TicketId::from("TP-1");

        let body = client
            .comment_body(&ticket, &report("test_TP_1", Outcome::Passed))
            .unwrap();
        assert_eq!(body, "TP-1 - Testcase is Passed");
        let body = client
            .comment_body(&ticket, &report("test_TP_1", Outcome::Failed))
            .unwrap();
        assert_eq!(body, "TP-1 - Testcase is Failed");
        let body = client
            .comment_body(&ticket, &report("test_TP_1", Outcome::Skipped))
            .unwrap();
        assert_eq!(body, "TP-1 - Testcase is Xfailed");
    }

    #[test]
    fn test_custom_comment_template() {
        let mut settings = settings();
        settings.comment_template = "{{ label }}: {{ node_id }} ({{ outcome }})".to_owned();
        let (client, _) = client(&settings);

        let body = client
            .comment_body(&TicketId::from("TP-2"), &report("ui::test_TP_2", Outcome::Failed))
            .unwrap();
        assert_eq!(body, "Failed: ui::test_TP_2 (failed)");
    }

    #[test]
    fn test_broken_template_rejected() {
        let mut settings = settings();
        settings.comment_template = "{{ ticket_id ".to_owned();
        let sender = Arc::new(Recording::new());
        assert!(JiraClient::new(&settings, sender).is_err());
    }

    #[test]
    fn test_comment_request() {
        let (client, sender) = client(&settings());
        let ticket = TicketId::from("TP-1");

        let status = client
            .post_comment(&ticket, &report("test_TP_1", Outcome::Passed))
            .unwrap();

        assert_eq!(status, 201);
        let requests = sender.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(
            requests[0].uri,
            "https://example.atlassian.net/rest/api/2/issue/TP-1/comment"
        );
        assert_eq!(requests[0].authorization, "Basic c2VjcmV0");
        assert_eq!(requests[0].content_type, "application/json");
        assert_eq!(requests[0].body, json!({"body": "TP-1 - Testcase is Passed"}));
        assert_eq!(requests[0].raw_body, r#"{"body": "TP-1 - Testcase is Passed"}"#);
    }

    #[test]
    fn test_comment_body_escapes_non_ascii() {
        let mut settings = settings();
        settings.comment_template = "{{ ticket_id }} – geprüft".to_owned();
        let (client, sender) = client(&settings);

        client
            .post_comment(&TicketId::from("TP-9"), &report("test_TP_9", Outcome::Passed))
            .unwrap();
        assert_eq!(
            sender.requests()[0].raw_body,
            r#"{"body": "TP-9 \u2013 gepr\u00fcft"}"#
        );
    }

    #[test]
    fn test_local_tracker_uri_kept() {
        let mut settings = settings();
        settings.jira_domain = "localhost:8080".to_owned();
        let (client, _) = client(&settings);

        assert_eq!(
            client.comment_uri(&TicketId::from("TP-1")),
            "https://localhost:8080/rest/api/2/issue/TP-1/comment"
        );
    }

    #[test]
    fn test_transition_requests() {
        let (client, sender) = client(&settings());
        let ticket = TicketId::from("TP-1");

        client.post_transition(&ticket, Outcome::Passed).unwrap();
        client.post_transition(&ticket, Outcome::Failed).unwrap();
        client.post_transition(&ticket, Outcome::Skipped).unwrap();

        let requests = sender.requests();
        assert_eq!(
            requests[0].uri,
            "https://example.atlassian.net/rest/api/2/issue/TP-1/transitions"
        );
        assert_eq!(requests[0].body, json!({"transition": {"id": "31"}}));
        assert_eq!(requests[0].raw_body, r#"{"transition": {"id": "31"}}"#);
        assert_eq!(requests[1].body, json!({"transition": {"id": "41"}}));
        assert_eq!(requests[2].body, json!({"transition": {"id": "41"}}));
    }

    #[test]
    fn test_rejected_request_is_not_an_error() {
        let sender = Arc::new(Recording::answering(404));
        let client = JiraClient::new(&settings(), sender).unwrap();

        let status = client
            .post_transition(&TicketId::from("TP-404"), Outcome::Passed)
            .unwrap();
        assert_eq!(status, 404);
    }

    #[test]
    fn test_connection_failure_propagated() {
        let sender = Arc::new(Recording::failing_after(0));
        let client = JiraClient::new(&settings(), sender).unwrap();

        match client.post_transition(&TicketId::from("TP-1"), Outcome::Passed) {
            Err(ReportError::Connection(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
