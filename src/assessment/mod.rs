//! The four-question Ikigai assessment and the step-by-step collector that gathers it.

use serde::{Deserialize, Serialize};

use crate::errors::CompassError;

pub const MIN_FIELD_LEN: usize = 10;
pub const TOO_SHORT: &str = "Please describe in a bit more detail.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub love: String,
    pub good_at: String,
    pub world_needs: String,
    pub paid_for: String,
}

impl AssessmentResponse {
    pub fn get(&self, field: IkigaiField) -> &str {
        match field {
            IkigaiField::Love => &self.love,
            IkigaiField::GoodAt => &self.good_at,
            IkigaiField::WorldNeeds => &self.world_needs,
            IkigaiField::PaidFor => &self.paid_for,
        }
    }

    /// Check every field against the minimum length, reporting the first failure.
    pub fn validate(&self, min_len: usize) -> Result<(), CompassError> {
        IkigaiField::ALL
            .iter()
            .try_for_each(|f| validate_field(*f, self.get(*f), min_len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IkigaiField {
    Love,
    GoodAt,
    WorldNeeds,
    PaidFor,
}

impl IkigaiField {
    pub const ALL: [IkigaiField; 4] = [
        IkigaiField::Love,
        IkigaiField::GoodAt,
        IkigaiField::WorldNeeds,
        IkigaiField::PaidFor,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            IkigaiField::Love => "love",
            IkigaiField::GoodAt => "goodAt",
            IkigaiField::WorldNeeds => "worldNeeds",
            IkigaiField::PaidFor => "paidFor",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            IkigaiField::Love => "What You Love (Passion)",
            IkigaiField::GoodAt => "What You Are Good At (Vocation)",
            IkigaiField::WorldNeeds => "What the World Needs (Mission)",
            IkigaiField::PaidFor => "What You Can Be Paid For (Profession)",
        }
    }

    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            IkigaiField::Love => &[
                "What activities or topics make you lose all sense of time?",
                "What did you love to do as a child or a teenager?",
                "What subjects or books do you find yourself constantly reading or researching?",
                "If money were no object, how would you spend your time?",
            ],
            IkigaiField::GoodAt => &[
                "What skills or abilities come naturally to you?",
                "What do people consistently ask you for help with or advice on?",
                "What are you an expert at, even if it's a niche topic?",
                "Think about a time you solved a problem that others found difficult. What skills did you use?",
            ],
            IkigaiField::WorldNeeds => &[
                "What problems or injustices in the world frustrate you the most?",
                "If you had a superpower to change one thing about your community or the world, what would it be?",
                "What issues are you passionate about helping to solve?",
                "What kind of positive impact do you want to leave on the world?",
            ],
            IkigaiField::PaidFor => &[
                "What services or products could you offer that people would be willing to pay for?",
                "What is a desirable skill in your field or a field you're interested in?",
                "What jobs or careers align with your skills and offer a sustainable living?",
                "What kind of lifestyle do you want to have, and what kind of work can support that?",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IkigaiField::Love => "I love...",
            IkigaiField::GoodAt => "I am good at...",
            IkigaiField::WorldNeeds => "The world needs...",
            IkigaiField::PaidFor => "I can be paid for...",
        }
    }
}

pub fn validate_field(field: IkigaiField, value: &str, min_len: usize) -> Result<(), CompassError> {
    if value.chars().count() < min_len {
        return Err(CompassError::Validation {
            field: field.id().into(),
            message: TOO_SHORT.into(),
        });
    }
    Ok(())
}

/// Terminal input that steps the collector back instead of answering.
pub const BACK_COMMAND: &str = ":back";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorEvent {
    /// Replace the draft for the current step.
    Edit(String),
    Next,
    Back,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(Collector),
    Submitted(AssessmentResponse),
}

/// Multi-step form state. Each event yields the next state; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collector {
    step: usize,
    drafts: [String; 4],
    error: Option<CompassError>,
    min_len: usize,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(MIN_FIELD_LEN)
    }
}

impl Collector {
    pub fn new(min_len: usize) -> Self {
        Self { step: 0, drafts: Default::default(), error: None, min_len }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn field(&self) -> IkigaiField {
        IkigaiField::ALL[self.step]
    }

    pub fn is_last(&self) -> bool {
        self.step == IkigaiField::ALL.len() - 1
    }

    pub fn draft(&self) -> &str {
        &self.drafts[self.step]
    }

    pub fn error(&self) -> Option<&CompassError> {
        self.error.as_ref()
    }

    /// Progress through the form, in percent.
    pub fn progress(&self) -> u8 {
        (((self.step + 1) * 100) / IkigaiField::ALL.len()) as u8
    }

    pub fn apply(self, event: CollectorEvent) -> Transition {
        let mut next = self;
        match event {
            CollectorEvent::Edit(text) => {
                next.drafts[next.step] = text;
                next.error = None;
            }
            CollectorEvent::Back => {
                next.step = next.step.saturating_sub(1);
                next.error = None;
            }
            CollectorEvent::Next => {
                match validate_field(next.field(), next.draft(), next.min_len) {
                    Ok(()) => {
                        next.error = None;
                        if !next.is_last() {
                            next.step += 1;
                        }
                    }
                    Err(e) => next.error = Some(e),
                }
            }
            CollectorEvent::Submit => {
                if !next.is_last() {
                    return Transition::Continue(next);
                }
                let [love, good_at, world_needs, paid_for] = next.drafts.clone();
                let response = AssessmentResponse { love, good_at, world_needs, paid_for };
                match response.validate(next.min_len) {
                    Ok(()) => return Transition::Submitted(response),
                    Err(e) => {
                        // Jump back to the first offending step.
                        if let CompassError::Validation { field, .. } = &e {
                            if let Some(i) = IkigaiField::ALL.iter().position(|f| f.id() == field) {
                                next.step = i;
                            }
                        }
                        next.error = Some(e);
                    }
                }
            }
        }
        Transition::Continue(next)
    }

    /// One line of terminal input: `:back` returns to the previous step, anything else
    /// becomes the current step's answer and advances (or submits on the last step).
    pub fn answer(self, line: &str) -> Transition {
        if line.trim() == BACK_COMMAND {
            return self.apply(CollectorEvent::Back);
        }
        match self.apply(CollectorEvent::Edit(line.to_string())) {
            Transition::Continue(c) => {
                let event = if c.is_last() { CollectorEvent::Submit } else { CollectorEvent::Next };
                c.apply(event)
            }
            submitted => submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cont(t: Transition) -> Collector {
        match t {
            Transition::Continue(c) => c,
            Transition::Submitted(r) => panic!("unexpected submit {r:?}"),
        }
    }

    #[test]
    fn short_answer_blocks_next_step() {
        let c = cont(Collector::default().apply(CollectorEvent::Edit("short".into())));
        let c = cont(c.apply(CollectorEvent::Next));
        assert_eq!(c.step(), 0);
        assert!(matches!(
            c.error(),
            Some(CompassError::Validation { field, message }) if field == "love" && message == TOO_SHORT
        ));
        let c = cont(c.apply(CollectorEvent::Edit("long enough answer".into())));
        assert!(c.error().is_none());
        let c = cont(c.apply(CollectorEvent::Next));
        assert_eq!(c.step(), 1);
        assert_eq!(c.field(), IkigaiField::GoodAt);
    }

    #[test]
    fn back_keeps_drafts_and_stops_at_first_step() {
        let c = cont(Collector::default().apply(CollectorEvent::Edit("reading sci-fi".into())));
        let c = cont(c.apply(CollectorEvent::Next));
        let c = cont(c.apply(CollectorEvent::Back));
        assert_eq!(c.draft(), "reading sci-fi");
        let c = cont(c.apply(CollectorEvent::Back));
        assert_eq!(c.step(), 0);
    }

    #[test]
    fn full_walk_submits_response() {
        let answers = [
            "reading sci-fi novels daily",
            "writing clear documentation",
            "better technical education",
            "technical writing roles",
        ];
        let mut c = Collector::default();
        for (i, a) in answers.iter().enumerate() {
            c = cont(c.apply(CollectorEvent::Edit(a.to_string())));
            if i < answers.len() - 1 {
                c = cont(c.apply(CollectorEvent::Next));
            }
        }
        assert_eq!(c.progress(), 100);
        match c.apply(CollectorEvent::Submit) {
            Transition::Submitted(r) => {
                assert_eq!(r.good_at, "writing clear documentation");
                assert_eq!(r.paid_for, "technical writing roles");
            }
            Transition::Continue(c) => panic!("not submitted: {:?}", c.error()),
        }
    }

    #[test]
    fn back_then_resubmit_uses_revised_answer() {
        let lines = [
            "reading sci-fi novels daily",
            "writing clear documentation",
            ":back",
            "editing other people's docs",
            "better technical education",
            "short",
            "technical writing roles",
        ];
        let mut c = Collector::default();
        let mut submitted = None;
        for line in lines {
            match c.answer(line) {
                Transition::Continue(next) => c = next,
                Transition::Submitted(r) => {
                    submitted = Some(r);
                    break;
                }
            }
            if line == "short" {
                assert_eq!(c.step(), 3);
                assert!(c.error().is_some());
            }
        }
        let r = submitted.expect("walk should submit");
        assert_eq!(r.good_at, "editing other people's docs");
        assert_eq!(r.world_needs, "better technical education");
        assert_eq!(r.paid_for, "technical writing roles");
    }

    #[test]
    fn back_on_first_step_stays_put() {
        let c = cont(Collector::default().answer(" :back "));
        assert_eq!(c.step(), 0);
        assert!(c.error().is_none());
    }

    #[test]
    fn submit_before_last_step_is_ignored() {
        let c = cont(Collector::default().apply(CollectorEvent::Edit("long enough answer".into())));
        let c = cont(c.apply(CollectorEvent::Submit));
        assert_eq!(c.step(), 0);
        assert!(c.error().is_none());
    }

    #[test]
    fn stored_record_uses_camel_case_keys() {
        let r = AssessmentResponse {
            love: "a".into(),
            good_at: "b".into(),
            world_needs: "c".into(),
            paid_for: "d".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["goodAt"], "b");
        assert_eq!(v["worldNeeds"], "c");
        assert_eq!(v["paidFor"], "d");
    }
}
