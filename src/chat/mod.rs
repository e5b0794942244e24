//! Counselor chat: the transcript state machine and the requester that talks to the model.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CompassError;
use crate::log::Recorder;
use crate::prompt;
use crate::provider::{exchange, Provider};
use crate::wire::{Flow, OutputField, Tx};

pub const GREETING: &str =
    "Hello! I'm your AI career counselor. Ask me anything about your career path, skills, or roadmap.";
pub const ANSWER: &str = "answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: Option<i64>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage { id: 1, text: GREETING.into(), sender: Sender::Ai }],
            pending: None,
        }
    }
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn next_id(&self, now_ms: i64) -> i64 {
        match self.messages.last() {
            Some(last) if last.id >= now_ms => last.id + 1,
            _ => now_ms,
        }
    }

    /// Optimistically append the user's message and mark a send as pending.
    ///
    /// Returns the new transcript and the id of the appended message.
    pub fn begin(&self, text: &str, now_ms: i64) -> Result<(Self, i64), CompassError> {
        if self.pending.is_some() {
            return Err(CompassError::Busy);
        }
        if text.trim().is_empty() {
            return Err(CompassError::EmptyMessage);
        }
        let id = self.next_id(now_ms);
        let mut messages = self.messages.clone();
        messages.push(ChatMessage { id, text: text.to_string(), sender: Sender::User });
        Ok((Self { messages, pending: Some(id) }, id))
    }

    pub fn resolve(&self, answer: &str, now_ms: i64) -> Self {
        let mut messages = self.messages.clone();
        let id = self.next_id(now_ms);
        messages.push(ChatMessage { id, text: answer.to_string(), sender: Sender::Ai });
        Self { messages, pending: None }
    }

    /// Drop the optimistic message `id` after a failed send.
    pub fn rollback(&self, id: i64) -> Self {
        Self {
            messages: self.messages.iter().filter(|m| m.id != id).cloned().collect(),
            pending: None,
        }
    }
}

/// Whether a chat may be dispatched at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatGate {
    Open { assessment: String },
    /// No assessment on record: show the call-to-action instead.
    Blocked,
}

impl ChatGate {
    pub fn from_assessment(narrative: Option<String>) -> Self {
        match narrative {
            Some(a) if !a.trim().is_empty() => ChatGate::Open { assessment: a },
            _ => ChatGate::Blocked,
        }
    }
}

pub struct ChatRequester<'a> {
    provider: &'a dyn Provider,
    schema_version: String,
    recorder: Option<&'a Recorder>,
}

impl<'a> ChatRequester<'a> {
    pub fn new(provider: &'a dyn Provider) -> Self {
        Self { provider, schema_version: "v1".into(), recorder: None }
    }

    pub fn with_recorder(mut self, recorder: Option<&'a Recorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_schema_version(mut self, version: &str) -> Self {
        self.schema_version = version.to_string();
        self
    }

    pub async fn ask(&self, gate: &ChatGate, question: &str, user_name: Option<&str>) -> Result<String> {
        let ChatGate::Open { assessment } = gate else {
            return Err(CompassError::MissingAssessment.into());
        };
        let name = user_name.filter(|n| !n.trim().is_empty());

        let mut inputs = BTreeMap::from([
            ("question".to_string(), question.to_string()),
            ("assessmentData".to_string(), assessment.clone()),
        ]);
        if let Some(n) = name {
            inputs.insert("userName".to_string(), n.to_string());
        }

        let req = prompt::build_request(
            Flow::Chat,
            &prompt::chat_template(name.is_some())?,
            inputs,
            vec![OutputField::new(
                ANSWER,
                "The answer to the user's question, providing personalized career guidance.",
            )],
            Tx::new(),
            &self.schema_version,
        )?;
        let mut resp = exchange(self.provider, self.recorder, &req).await?;
        Ok(resp.take(ANSWER)?)
    }

    /// One full turn against `transcript`: append, ask, then resolve or roll back.
    ///
    /// A blocked gate or an invalid message leaves the transcript untouched.
    pub async fn turn(
        &self,
        transcript: &Transcript,
        gate: &ChatGate,
        question: &str,
        user_name: Option<&str>,
        now_ms: i64,
    ) -> (Transcript, Result<()>) {
        if *gate == ChatGate::Blocked {
            return (transcript.clone(), Err(CompassError::MissingAssessment.into()));
        }
        let (sent, id) = match transcript.begin(question, now_ms) {
            Ok(v) => v,
            Err(e) => return (transcript.clone(), Err(e.into())),
        };
        match self.ask(gate, question, user_name).await {
            Ok(answer) => (sent.resolve(&answer, now_ms + 1), Ok(())),
            Err(e) => (sent.rollback(id), Err(e)),
        }
    }
}
