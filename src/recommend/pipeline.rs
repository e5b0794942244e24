use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use super::formatter::RecommendationRequest;
use crate::cli::PipelineMode;
use crate::log::Recorder;
use crate::prompt;
use crate::provider::{exchange, Provider};
use crate::wire::{Flow, OutputField, Tx};

pub const CAREER_RECOMMENDATIONS: &str = "careerRecommendations";
pub const REASONING: &str = "reasoning";
pub const USER_UNIQUE_PATH: &str = "userUniquePath";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub career_recommendations: String,
    pub reasoning: String,
}

fn recommendation_outputs() -> Vec<OutputField> {
    vec![
        OutputField::new(
            CAREER_RECOMMENDATIONS,
            "The personalized career recommendations, including a roadmap as numbered steps, one per line.",
        ),
        OutputField::new(REASONING, "The reasoning behind the recommendations."),
    ]
}

fn base_inputs(req: &RecommendationRequest) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("skills".to_string(), req.skills.clone()),
        ("preferences".to_string(), req.preferences.clone()),
        ("ikigaiComponents".to_string(), req.ikigai_components.clone()),
    ])
}

/// Career recommendation generation with an optional unique-path pre-step.
///
/// The run is atomic: either both result fields come back or an error does.
pub struct RecommendationPipeline<'a> {
    provider: &'a dyn Provider,
    mode: PipelineMode,
    schema_version: String,
    recorder: Option<&'a Recorder>,
}

impl<'a> RecommendationPipeline<'a> {
    pub fn new(provider: &'a dyn Provider, mode: PipelineMode) -> Self {
        Self { provider, mode, schema_version: "v1".into(), recorder: None }
    }

    pub fn with_recorder(mut self, recorder: Option<&'a Recorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_schema_version(mut self, version: &str) -> Self {
        self.schema_version = version.to_string();
        self
    }

    async fn unique_path(&self, req: &RecommendationRequest, tx: &Tx) -> Result<String> {
        match self.mode {
            PipelineMode::Direct => Ok(prompt::local_unique_path(
                &req.skills,
                &req.preferences,
                &req.ikigai_components,
            )),
            PipelineMode::TwoStep => {
                let gen = prompt::build_request(
                    Flow::UniquePath,
                    &prompt::unique_path_template()?,
                    base_inputs(req),
                    vec![OutputField::new(
                        USER_UNIQUE_PATH,
                        "A short narrative describing the user's unique career path.",
                    )],
                    tx.clone(),
                    &self.schema_version,
                )?;
                let mut resp = exchange(self.provider, self.recorder, &gen).await?;
                Ok(resp.take(USER_UNIQUE_PATH)?)
            }
        }
    }

    pub async fn run(&self, req: RecommendationRequest) -> Result<RecommendationResult> {
        let tx = Tx::new();
        info!(tx = %tx.id, mode = ?self.mode, "generating career recommendations");

        let unique_path = match req.user_unique_path.as_deref() {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => self.unique_path(&req, &tx).await?,
        };

        let mut inputs = base_inputs(&req);
        inputs.insert(USER_UNIQUE_PATH.to_string(), unique_path);

        let gen = prompt::build_request(
            Flow::Recommendation,
            &prompt::recommendation_template()?,
            inputs,
            recommendation_outputs(),
            tx,
            &self.schema_version,
        )?;
        let mut resp = exchange(self.provider, self.recorder, &gen).await?;

        Ok(RecommendationResult {
            career_recommendations: resp.take(CAREER_RECOMMENDATIONS)?,
            reasoning: resp.take(REASONING)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::CompassError;
    use crate::wire::{GenerationRequest, GenerationResponse};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider double that replays scripted replies and records what it was sent.
    #[derive(Default)]
    pub(crate) struct Scripted {
        pub replies: Mutex<VecDeque<Result<BTreeMap<String, String>, CompassError>>>,
        pub seen: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        pub(crate) fn reply(self, pairs: &[(&str, &str)]) -> Self {
            let map = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            self.replies.lock().unwrap().push_back(Ok(map));
            self
        }

        pub(crate) fn fail(self, err: CompassError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        pub(crate) fn seen(&self) -> Vec<GenerationRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Provider for Scripted {
        async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse> {
            self.seen.lock().unwrap().push(req.clone());
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompassError::Provider("no scripted reply".into())));
            Ok(GenerationResponse { fields: next? })
        }
    }

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            skills: "writing clear documentation".into(),
            preferences: "technical writing roles".into(),
            ikigai_components: "What I love: reading".into(),
            user_unique_path: None,
        }
    }

    #[tokio::test]
    async fn two_step_chains_unique_path_into_main_call() {
        let p = Scripted::default()
            .reply(&[(USER_UNIQUE_PATH, "A writer who teaches.")])
            .reply(&[(CAREER_RECOMMENDATIONS, "1. Write docs"), (REASONING, "fits")]);
        let out = RecommendationPipeline::new(&p, PipelineMode::TwoStep).run(request()).await.unwrap();
        assert_eq!(out.career_recommendations, "1. Write docs");
        assert_eq!(out.reasoning, "fits");

        let seen = p.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].flow, Flow::UniquePath);
        assert_eq!(seen[1].flow, Flow::Recommendation);
        assert_eq!(seen[0].transaction.id, seen[1].transaction.id);
        assert!(seen[1].instruction.user.contains("User Unique Path: A writer who teaches."));
    }

    #[tokio::test]
    async fn direct_mode_makes_one_call_with_local_path() {
        let p = Scripted::default()
            .reply(&[(CAREER_RECOMMENDATIONS, "1. Write docs"), (REASONING, "fits")]);
        RecommendationPipeline::new(&p, PipelineMode::Direct).run(request()).await.unwrap();
        let seen = p.seen();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].inputs[USER_UNIQUE_PATH]
            .starts_with("Based on the user's skills: writing clear documentation, preferences: technical writing roles"));
    }

    #[tokio::test]
    async fn supplied_unique_path_skips_pre_step() {
        let p = Scripted::default()
            .reply(&[(CAREER_RECOMMENDATIONS, "1. Write docs"), (REASONING, "fits")]);
        let mut req = request();
        req.user_unique_path = Some("Given path".into());
        RecommendationPipeline::new(&p, PipelineMode::TwoStep).run(req).await.unwrap();
        let seen = p.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].inputs[USER_UNIQUE_PATH], "Given path");
    }

    #[tokio::test]
    async fn pre_step_failure_aborts_without_main_call() {
        let p = Scripted::default().fail(CompassError::Provider("503".into()));
        let err = RecommendationPipeline::new(&p, PipelineMode::TwoStep)
            .run(request())
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<CompassError>(), Some(CompassError::Provider(_))));
        assert_eq!(p.seen().len(), 1);
    }

    #[tokio::test]
    async fn missing_reasoning_is_a_failure_not_a_partial_result() {
        let p = Scripted::default().reply(&[(CAREER_RECOMMENDATIONS, "1. Write docs")]);
        let res = RecommendationPipeline::new(&p, PipelineMode::Direct).run(request()).await;
        assert!(res.is_err());
    }
}
