use crate::configuration::constants::common::TICKET_PARAM;
use crate::reporter::model::CollectedItem;
use std::vec::IntoIter;

/// State shared by all reports of one run.
///
/// Holds the ticket ids declared through the `ticket_id` parameter, in
/// collection order. Each call-phase report consumes exactly one of them,
/// and once exhausted the cursor stays exhausted.
#[derive(Debug)]
pub struct RunContext {
    expected: IntoIter<String>,
    declared: usize,
}

impl RunContext {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a CollectedItem>,
    {
        let expected: Vec<String> = items
            .into_iter()
            .filter_map(|item| item.param(TICKET_PARAM))
            .collect();
        Self {
            declared: expected.len(),
            expected: expected.into_iter(),
        }
    }

    pub fn next_expected(&mut self) -> Option<String> {
        self.expected.next()
    }

    pub fn declared(&self) -> usize {
        self.declared
    }

    pub fn remaining(&self) -> usize {
        self.expected.len()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::from_items(std::iter::empty())
    }
}
