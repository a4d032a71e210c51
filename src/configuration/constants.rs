pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod common {
    pub const DEFAULT_RESULTS_LOG: &str = "test_results.log";
    pub const TICKET_PARAM: &str = "ticket_id";
    pub const DEFAULT_COMMENT_TEMPLATE: &str = "{{ ticket_id }} - Testcase is {{ label }}";
}

pub mod jira {
    pub const ISSUE_API_PATH: &str = "rest/api/2/issue";
    pub const CLOUD_DOMAIN_SUFFIX: &str = "atlassian.net";
}
