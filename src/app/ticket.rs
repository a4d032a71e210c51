use regex::Regex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("no ticket id found in '{node_id}'")]
    NotFound { node_id: String },
    #[error("cannot build ticket grammar: {0}")]
    Grammar(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Finds the tracker ticket a test belongs to.
///
/// Node ids are matched after replacing `_` with `-`, so a test named
/// `test_search_TP_5` matches prefix `TP-` and yields `TP-5`.
#[derive(Debug, Clone)]
pub struct TicketExtractor {
    prefix: String,
    grammar: Grammar,
}

#[derive(Debug, Clone)]
enum Grammar {
    /// `<prefix><digits>`, digits captured in group `digits`.
    Prefixed(Regex),
    /// User supplied, ticket taken from group `ticket` or the whole match.
    Custom(Regex),
}

impl TicketExtractor {
    pub fn new(prefix: &str, pattern: Option<Regex>) -> Result<Self, TicketError> {
        let grammar = match pattern {
            Some(regex) => Grammar::Custom(regex),
            None => Grammar::Prefixed(Regex::new(&format!(
                r"{}(?P<digits>\d+)",
                regex::escape(&normalize(prefix))
            ))?),
        };
        Ok(Self {
            prefix: prefix.to_owned(),
            grammar,
        })
    }

    /// Picks the expected ticket when the node id spells it out, otherwise
    /// derives one from the node id.
    pub fn resolve(&self, node_id: &str, expected: Option<&str>) -> Result<TicketId, TicketError> {
        match expected {
            Some(ticket) if !ticket.is_empty() && node_id.contains(ticket) => Ok(ticket.into()),
            Some(ticket) => {
                debug!(
                    "Expected ticket {} is not part of '{}', deriving from node id",
                    ticket, node_id
                );
                self.derive(node_id)
            }
            None => self.derive(node_id),
        }
    }

    pub fn derive(&self, node_id: &str) -> Result<TicketId, TicketError> {
        let normalized = normalize(node_id);
        let not_found = || TicketError::NotFound {
            node_id: node_id.to_owned(),
        };
        match &self.grammar {
            Grammar::Prefixed(regex) => {
                let caps = regex.captures(&normalized).ok_or_else(not_found)?;
                Ok(TicketId(format!("{}{}", self.prefix, &caps["digits"])))
            }
            Grammar::Custom(regex) => {
                let caps = regex.captures(&normalized).ok_or_else(not_found)?;
                let ticket = caps
                    .name("ticket")
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str())
                    .filter(|ticket| !ticket.is_empty())
                    .ok_or_else(not_found)?;
                Ok(TicketId(ticket.to_owned()))
            }
        }
    }
}

fn normalize(value: &str) -> String {
    value.replace('_', "-")
}
