use std::collections::{BTreeMap, BTreeSet};

use crate::errors::CompassError;
use crate::wire::{Flow, GenerationRequest, Instruction, OutputField, Tx};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(String),
}

/// A prompt made of fixed text and named `{{slot}}` placeholders.
///
/// Rendering refuses to produce a prompt with a missing or blank slot, or with an input
/// that no slot consumes, so a misspelled field never reaches the model as empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(name: &'static str, source: &str) -> Result<Self, CompassError> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_string()));
            }
            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or_else(|| {
                CompassError::Template(format!("{name}: unclosed placeholder"))
            })?;
            let slot = after[..close].trim();
            if slot.is_empty() || !slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(CompassError::Template(format!(
                    "{name}: invalid placeholder `{}`",
                    &after[..close]
                )));
            }
            segments.push(Segment::Slot(slot.to_string()));
            rest = &after[close + 2..];
        }
        if rest.contains("}}") {
            return Err(CompassError::Template(format!("{name}: stray `}}}}`")));
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(Self { name, segments })
    }

    pub fn slots(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(n) => Some(n.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn render(&self, inputs: &BTreeMap<String, String>) -> Result<String, CompassError> {
        let slots = self.slots();
        if let Some(extra) = inputs.keys().find(|k| !slots.contains(k.as_str())) {
            return Err(CompassError::Template(format!(
                "{}: input `{extra}` has no placeholder",
                self.name
            )));
        }
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Text(t) => out.push_str(t),
                Segment::Slot(n) => match inputs.get(n) {
                    Some(v) if !v.trim().is_empty() => out.push_str(v),
                    _ => {
                        return Err(CompassError::Template(format!(
                            "{}: slot `{n}` is not filled",
                            self.name
                        )))
                    }
                },
            }
        }
        Ok(out)
    }
}

const UNIQUE_PATH: &str = r#"You are a career counselor's assistant. Formulate the user's unique path: a short narrative (3-5 sentences) that ties together what the user is good at, what they want from work, and their Ikigai components.

Skills: {{skills}}
Preferences: {{preferences}}
Ikigai Components: {{ikigaiComponents}}"#;

const RECOMMENDATION: &str = r#"You are a career counselor. Based on the user's skills, preferences, Ikigai components, and unique path, generate personalized career recommendations and explain your reasoning.

Skills: {{skills}}
Preferences: {{preferences}}
Ikigai Components: {{ikigaiComponents}}
User Unique Path: {{userUniquePath}}

Career Recommendations:"#;

const COUNSELOR_CHAT: &str = r#"You are an AI career counselor providing personalized guidance to users.

Use the assessment data to understand the user's skills, preferences, and Ikigai components. Tailor your advice to their unique situation.

User Assessment Data: {{assessmentData}}

User Question: {{question}}

Provide a helpful and informative answer to the user's question."#;

const COUNSELOR_CHAT_NAMED: &str = r#"You are an AI career counselor providing personalized guidance to users.

Use the assessment data to understand the user's skills, preferences, and Ikigai components. Tailor your advice to their unique situation. Address the user by name.

User Name: {{userName}}
User Assessment Data: {{assessmentData}}

User Question: {{question}}

Provide a helpful and informative answer to the user's question."#;

pub fn unique_path_template() -> Result<PromptTemplate, CompassError> {
    PromptTemplate::parse("unique_path", UNIQUE_PATH)
}

pub fn recommendation_template() -> Result<PromptTemplate, CompassError> {
    PromptTemplate::parse("recommendation", RECOMMENDATION)
}

pub fn chat_template(named: bool) -> Result<PromptTemplate, CompassError> {
    if named {
        PromptTemplate::parse("chat_named", COUNSELOR_CHAT_NAMED)
    } else {
        PromptTemplate::parse("chat", COUNSELOR_CHAT)
    }
}

/// Locally formulated unique path, used when no auxiliary model call is made.
pub fn local_unique_path(skills: &str, preferences: &str, ikigai_components: &str) -> String {
    format!(
        "Based on the user's skills: {skills}, preferences: {preferences}, and Ikigai components: {ikigai_components}, the user's unique path is formulated"
    )
}

/// System instruction binding the model to a single JSON object with the given fields.
pub fn system_prompt(outputs: &[OutputField]) -> String {
    let mut fields = String::new();
    for f in outputs {
        fields.push_str(&format!("  \"{}\": string  // {}\n", f.name, f.description));
    }
    format!(
        r#"Return EXACTLY ONE JSON object (no markdown, no code fences, no prose around it) with these string fields:

{{
{fields}}}

Every field is required and must be non-empty plain text. Inside a field, use newlines for structure; when listing steps, put each on its own line prefixed with its number and a period (e.g. "1. ")."#
    )
}

/// Render `template` with `inputs` and package it for a provider.
pub fn build_request(
    flow: Flow,
    template: &PromptTemplate,
    inputs: BTreeMap<String, String>,
    outputs: Vec<OutputField>,
    tx: Tx,
    schema_version: &str,
) -> Result<GenerationRequest, CompassError> {
    let user = template.render(&inputs)?;
    Ok(GenerationRequest {
        schema_version: schema_version.to_string(),
        flow,
        transaction: tx,
        instruction: Instruction { system: system_prompt(&outputs), user },
        inputs,
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn renders_all_slots_in_place() {
        let t = PromptTemplate::parse("t", "Q: {{question}}\nA: {{ answer }}!").unwrap();
        assert_eq!(t.slots().into_iter().collect::<Vec<_>>(), vec!["answer", "question"]);
        let out = t.render(&inputs(&[("question", "why"), ("answer", "because")])).unwrap();
        assert_eq!(out, "Q: why\nA: because!");
    }

    #[test]
    fn missing_or_blank_slot_fails() {
        let t = recommendation_template().unwrap();
        let err = t
            .render(&inputs(&[
                ("skills", "s"),
                ("preferences", "p"),
                ("ikigaiComponents", "i"),
            ]))
            .unwrap_err();
        assert!(matches!(err, CompassError::Template(m) if m.contains("userUniquePath")));

        let err = t
            .render(&inputs(&[
                ("skills", "s"),
                ("preferences", " "),
                ("ikigaiComponents", "i"),
                ("userUniquePath", "u"),
            ]))
            .unwrap_err();
        assert!(matches!(err, CompassError::Template(m) if m.contains("preferences")));
    }

    #[test]
    fn unknown_input_fails() {
        let t = chat_template(false).unwrap();
        let err = t
            .render(&inputs(&[
                ("question", "q"),
                ("assessmentData", "a"),
                ("userName", "Sam"),
            ]))
            .unwrap_err();
        assert!(matches!(err, CompassError::Template(m) if m.contains("userName")));
    }

    #[test]
    fn malformed_placeholders_are_rejected() {
        assert!(PromptTemplate::parse("t", "hello {{name").is_err());
        assert!(PromptTemplate::parse("t", "hello {{}}").is_err());
        assert!(PromptTemplate::parse("t", "hello {{a b}}").is_err());
        assert!(PromptTemplate::parse("t", "hello name}}").is_err());
    }

    #[test]
    fn builtin_templates_declare_expected_slots() {
        let named = chat_template(true).unwrap();
        assert!(named.slots().contains("userName"));
        assert_eq!(unique_path_template().unwrap().slots().len(), 3);
        assert_eq!(recommendation_template().unwrap().slots().len(), 4);
    }

    #[test]
    fn build_request_keeps_inputs_and_outputs() {
        let req = build_request(
            Flow::Chat,
            &chat_template(false).unwrap(),
            inputs(&[("question", "Should I learn Rust?"), ("assessmentData", "likes systems")]),
            vec![OutputField::new("answer", "reply")],
            Tx::new(),
            "v1",
        )
        .unwrap();
        assert!(req.instruction.user.contains("User Question: Should I learn Rust?"));
        assert!(req.instruction.system.contains("\"answer\""));
        assert_eq!(req.inputs.len(), 2);
    }

    #[test]
    fn system_prompt_lists_fields() {
        let p = system_prompt(&[OutputField::new("answer", "the reply")]);
        assert!(p.contains("\"answer\": string  // the reply"));
    }
}
