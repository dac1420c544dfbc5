//! EventBridge scheduled rule handling.
//!
//! A rule is recognised when any resource ARN on the event ends with its name. Scheduled
//! invocations are always acknowledged with `200`, known or not.

use http::StatusCode;
use serde::Serialize;

use crate::event::ScheduledTrigger;
use crate::response::Response;

const EXECUTED: &str = "Evento programado ejecutado con éxito";
const UNKNOWN_DETAILS: &str = "Este evento es desconocido";

/// A known schedule and the description reported back for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRule {
    pub name: String,
    pub details: String,
}

impl ScheduleRule {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }

    fn matches(&self, trigger: &ScheduledTrigger) -> bool {
        trigger
            .resources
            .iter()
            .any(|resource| resource.ends_with(&self.name))
    }
}

#[derive(Serialize)]
struct ScheduleOutcome<'a> {
    message: &'a str,
    details: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ScheduleHandler {
    rules: Vec<ScheduleRule>,
}

impl Default for ScheduleHandler {
    fn default() -> Self {
        Self::new(vec![
            ScheduleRule::new(
                "daily-user-check-every-day",
                "Este evento se ejecuta diariamente a las 5 AM",
            ),
            ScheduleRule::new(
                "daily-user-check-every-minute",
                "Este evento se ejecuta cada minuto",
            ),
        ])
    }
}

impl ScheduleHandler {
    /// Rules are tried in order; the first match wins.
    pub fn new(rules: Vec<ScheduleRule>) -> Self {
        Self { rules }
    }

    pub fn handle(&self, trigger: &ScheduledTrigger) -> Response {
        tracing::info!(resources = ?trigger.resources, "running scheduled event");

        let outcome = match self.rules.iter().find(|rule| rule.matches(trigger)) {
            Some(rule) => ScheduleOutcome {
                message: EXECUTED,
                details: &rule.details,
                name: Some(rule.name.as_str()),
            },
            None => {
                tracing::warn!(resources = ?trigger.resources, "no schedule rule matched");
                ScheduleOutcome {
                    message: EXECUTED,
                    details: UNKNOWN_DETAILS,
                    name: None,
                }
            }
        };

        Response::json(StatusCode::OK, &outcome)
    }
}
