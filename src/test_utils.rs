//! Test utilities for the assistant relay
//!
//! Provides `ScriptedAssistant`, an in-memory `AssistantApi` that replays
//! a scripted sequence of run statuses and records every call made to it.

use crate::assistant::{AssistantApi, Role, RunStatus, ThreadMessage};
use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tokio::time::Instant;

/// A call recorded by `ScriptedAssistant`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateThread,
    PostMessage {
        thread_id: String,
        role: Role,
        text: String,
    },
    CreateRun {
        thread_id: String,
        assistant_id: String,
    },
    GetRunStatus {
        thread_id: String,
        run_id: String,
    },
    ListMessages {
        thread_id: String,
    },
}

/// Scripted in-memory assistant API
///
/// Run statuses are consumed in order; the last one repeats forever, so
/// `with_statuses([RunStatus::InProgress])` models a stuck run.
#[derive(Default)]
pub struct ScriptedAssistant {
    statuses: Mutex<VecDeque<RunStatus>>,
    messages: Vec<ThreadMessage>,
    fail_thread_creation: bool,
    fail_post_message: bool,
    fail_run_creation: bool,
    fail_status_checks: bool,
    fail_message_listing: bool,
    calls: Mutex<Vec<Call>>,
    status_check_times: Mutex<Vec<Instant>>,
    threads_created: AtomicU32,
    runs_created: AtomicU32,
}

impl ScriptedAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn with_messages(mut self, messages: Vec<ThreadMessage>) -> Self {
        self.messages = messages;
        self
    }

    pub fn failing_thread_creation(mut self) -> Self {
        self.fail_thread_creation = true;
        self
    }

    pub fn failing_post_message(mut self) -> Self {
        self.fail_post_message = true;
        self
    }

    pub fn failing_run_creation(mut self) -> Self {
        self.fail_run_creation = true;
        self
    }

    pub fn failing_status_checks(mut self) -> Self {
        self.fail_status_checks = true;
        self
    }

    pub fn failing_message_listing(mut self) -> Self {
        self.fail_message_listing = true;
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_checks(&self) -> usize {
        self.status_check_times.lock().unwrap().len()
    }

    /// Instants at which each status check was issued
    pub fn status_check_times(&self) -> Vec<Instant> {
        self.status_check_times.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(counter: &AtomicU32, prefix: &str) -> String {
        let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}

#[async_trait]
impl AssistantApi for ScriptedAssistant {
    async fn create_thread(&self) -> RelayResult<String> {
        self.record(Call::CreateThread);
        if self.fail_thread_creation {
            return Err(RelayError::RemoteUnavailable(
                "create thread request failed: connection refused".to_string(),
            ));
        }
        Ok(Self::next_id(&self.threads_created, "thread"))
    }

    async fn post_message(&self, thread_id: &str, role: Role, text: &str) -> RelayResult<()> {
        self.record(Call::PostMessage {
            thread_id: thread_id.to_string(),
            role,
            text: text.to_string(),
        });
        if self.fail_post_message {
            return Err(RelayError::RemoteUnavailable(
                "create message returned 500 Internal Server Error".to_string(),
            ));
        }
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<String> {
        self.record(Call::CreateRun {
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
        });
        if self.fail_run_creation {
            return Err(RelayError::RemoteUnavailable(
                "create run returned 429 Too Many Requests".to_string(),
            ));
        }
        Ok(Self::next_id(&self.runs_created, "run"))
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> RelayResult<RunStatus> {
        self.record(Call::GetRunStatus {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        });
        self.status_check_times.lock().unwrap().push(Instant::now());

        if self.fail_status_checks {
            return Err(RelayError::RemoteUnavailable(
                "retrieve run returned 503 Service Unavailable".to_string(),
            ));
        }

        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().copied()
        };
        Ok(status.unwrap_or(RunStatus::Completed))
    }

    async fn list_messages(&self, thread_id: &str) -> RelayResult<Vec<ThreadMessage>> {
        self.record(Call::ListMessages {
            thread_id: thread_id.to_string(),
        });
        if self.fail_message_listing {
            return Err(RelayError::RemoteUnavailable(
                "list messages request failed: connection reset".to_string(),
            ));
        }
        Ok(self.messages.clone())
    }
}
