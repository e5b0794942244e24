//! Command handlers: each subcommand drives the pure state types and renders through `ux`.

use anyhow::Result;
use chrono::Utc;
use std::io::IsTerminal;
use tracing::{info, warn};

use crate::assessment::{AssessmentResponse, Collector, IkigaiField, Transition, BACK_COMMAND};
use crate::catalog::{contests, dashboard, forum, paths};
use crate::chat::{ChatGate, ChatRequester, Transcript};
use crate::cli::{Command, TaskAction};
use crate::config::Config;
use crate::errors::CompassError;
use crate::log::Recorder;
use crate::provider::{make_provider, DynProvider};
use crate::recommend::{ikigai_components, RecommendationPipeline, RecommendationRequest, RoadmapParams};
use crate::roadmap::{parse_steps, RoadmapBoard};
use crate::store::{Store, ASSESSMENT_KEY, TASKS_KEY};
use crate::tracker::TaskList;
use crate::ux;

const NO_ASSESSMENT: &str = "No assessment data found. Complete the Ikigai assessment first.";
const ASSESS_CMD: &str = "career-compass assess";

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn interactive() -> bool {
    std::io::stdin().is_terminal()
}

pub struct App {
    cfg: Config,
    store: Store,
    recorder: Option<Recorder>,
}

impl App {
    pub fn new(cfg: Config) -> Self {
        let store = Store::new(cfg.state_path());
        let recorder = Recorder::from_config(&cfg);
        Self { cfg, store, recorder }
    }

    fn provider(&self) -> Result<DynProvider> {
        make_provider(&self.cfg)
    }

    fn stored_assessment(&self) -> Option<AssessmentResponse> {
        self.store.get(ASSESSMENT_KEY)
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Assess { love, good_at, world_needs, paid_for } => {
                self.assess([love, good_at, world_needs, paid_for]).await
            }
            Command::Roadmap { query, skills, preferences, ikigai_components, no_reorder } => {
                let params = match query {
                    Some(q) => RoadmapParams::from_query(&q),
                    None => RoadmapParams { skills, preferences, ikigai_components },
                };
                self.roadmap(params, !no_reorder).await
            }
            Command::Chat { name, ask } => self.chat(name.as_deref(), ask).await,
            Command::Dashboard => {
                let has = self.stored_assessment().is_some();
                ux::show_dashboard(&dashboard::achievements(has));
                Ok(())
            }
            Command::Paths { select } => {
                self.paths(select.as_deref());
                Ok(())
            }
            Command::Contests { month } => self.contests(month.as_deref()),
            Command::Forum { search } => {
                ux::show_forum(&forum::search(search.as_deref().unwrap_or("")), forum::TAGS);
                Ok(())
            }
            Command::Tasks { action } => self.tasks(action.unwrap_or(TaskAction::List)),
        }
    }

    /// Walk the collector. Answers given as flags fill their step; the rest are prompted.
    async fn assess(&self, mut prefill: [Option<String>; 4]) -> Result<()> {
        let total = IkigaiField::ALL.len();
        let mut collector = Collector::new(self.cfg.min_field_len);
        let mut shown_step = None;

        let response = loop {
            let step = collector.step();
            let text = match prefill[step].take() {
                Some(t) => t,
                None => {
                    if shown_step != Some(step) {
                        ux::show_step_header(collector.field(), step, total, collector.progress());
                        shown_step = Some(step);
                    }
                    let prompt = format!("{} (or {BACK_COMMAND}) > ", collector.field().label());
                    match ux::read_line(&prompt) {
                        Some(t) => t,
                        None => {
                            println!("\nAssessment cancelled; nothing was saved.");
                            return Ok(());
                        }
                    }
                }
            };

            collector = match collector.answer(&text) {
                Transition::Submitted(r) => break r,
                Transition::Continue(c) => {
                    if let Some(e) = c.error() {
                        ux::notify_error("Invalid", &e.to_string());
                    }
                    c
                }
            };
        };

        if let Err(e) = self.store.set(ASSESSMENT_KEY, &response) {
            warn!(error = %e, "could not persist assessment");
            ux::notify_error("Warning", "Your answers could not be saved locally; chat will stay locked.");
        }
        info!("assessment submitted");

        let query = RecommendationRequest::from(&response).to_query();
        println!("\nRoadmap link: career-compass roadmap --query '{query}'");
        self.roadmap(RoadmapParams::from_query(&query), true).await
    }

    async fn roadmap(&self, params: RoadmapParams, reorder: bool) -> Result<()> {
        let params = if params.is_empty() {
            match self.stored_assessment() {
                Some(a) => {
                    let req = RecommendationRequest::from(&a);
                    RoadmapParams {
                        skills: Some(req.skills),
                        preferences: Some(req.preferences),
                        ikigai_components: Some(req.ikigai_components),
                    }
                }
                None => params,
            }
        } else {
            params
        };

        let Some(req) = params.into_request() else {
            ux::call_to_action(NO_ASSESSMENT, ASSESS_CMD);
            return Ok(());
        };

        let provider = self.provider()?;
        let pipeline = RecommendationPipeline::new(&*provider, self.cfg.pipeline)
            .with_recorder(self.recorder.as_ref())
            .with_schema_version(&self.cfg.schema_version);

        let pb = ux::pending("Generating your personalized roadmap...");
        let result = pipeline.run(req).await;
        pb.finish_and_clear();

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                ux::notify_error("Error", &format!("Could not generate your roadmap. Please try again. ({e:#})"));
                return Ok(());
            }
        };

        let mut board = RoadmapBoard::new(parse_steps(&result.career_recommendations));
        ux::show_roadmap(&board);
        ux::show_recommendation(&result);
        ux::show_readiness_checklist();

        if !reorder || board.is_empty() || !interactive() {
            return Ok(());
        }
        println!("Reorder with `move <from> <to>`; `done` to finish. The order is not saved.");
        while let Some(line) = ux::read_line("roadmap> ") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                ["done"] | ["q"] | ["quit"] => break,
                ["move", from, to] => match (from.parse::<usize>(), to.parse::<usize>()) {
                    (Ok(f), Ok(t)) if f >= 1 && t >= 1 => {
                        board = board.move_item(f - 1, t - 1);
                        ux::show_roadmap(&board);
                    }
                    _ => ux::notify_error("Invalid", "positions are 1-based step numbers"),
                },
                [] => {}
                _ => ux::notify_error("Invalid", "expected `move <from> <to>` or `done`"),
            }
        }
        Ok(())
    }

    async fn chat(&self, name: Option<&str>, ask: Option<String>) -> Result<()> {
        let gate = ChatGate::from_assessment(self.stored_assessment().map(|a| ikigai_components(&a)));
        if gate == ChatGate::Blocked {
            ux::call_to_action(
                "Complete your Ikigai assessment to unlock the AI counselor.",
                ASSESS_CMD,
            );
            return Ok(());
        }

        let provider = self.provider()?;
        let requester = ChatRequester::new(&*provider)
            .with_recorder(self.recorder.as_ref())
            .with_schema_version(&self.cfg.schema_version);

        let mut transcript = Transcript::default();
        for m in transcript.messages() {
            ux::show_message(m);
        }

        let single = ask.is_some();
        let mut next = ask;
        loop {
            let question = match next.take() {
                Some(q) => q,
                None if single => break,
                None => match ux::read_line("you> ") {
                    Some(q) if matches!(q.trim(), "/quit" | "/exit") => break,
                    Some(q) => q,
                    None => break,
                },
            };

            let pb = ux::pending("Counselor is thinking...");
            let (after, res) = requester.turn(&transcript, &gate, &question, name, now_ms()).await;
            pb.finish_and_clear();
            transcript = after;

            match res {
                Ok(()) => {
                    if let Some(m) = transcript.messages().last() {
                        ux::show_message(m);
                    }
                }
                Err(e) => match e.downcast_ref::<CompassError>() {
                    Some(CompassError::EmptyMessage) => ux::notify_error("Invalid", &e.to_string()),
                    _ => ux::notify_error(
                        "Error",
                        &format!("Could not get a response from the AI counselor. Please try again. ({e:#})"),
                    ),
                },
            }
        }
        Ok(())
    }

    fn paths(&self, select: Option<&str>) {
        match paths::select(select) {
            Some(p) => ux::show_paths(p, paths::CAREER_PATHS),
            None => ux::notify_error(
                "Not found",
                &format!("no career path matches `{}`", select.unwrap_or_default()),
            ),
        }
    }

    fn contests(&self, month: Option<&str>) -> Result<()> {
        let mut current = match contests::parse_month(month.unwrap_or(contests::DEFAULT_MONTH)) {
            Ok(m) => m,
            Err(e) => {
                ux::notify_error("Invalid", &e.to_string());
                return Ok(());
            }
        };
        loop {
            ux::show_contests(
                &current.format("%B %Y").to_string(),
                &contests::for_month(current),
                &contests::contest_days(current),
            );
            if !interactive() {
                return Ok(());
            }
            match ux::read_line("[p]rev / [n]ext / [q]uit > ").as_deref().map(str::trim) {
                Some("p") | Some("prev") => current = contests::prev_month(current),
                Some("n") | Some("next") => current = contests::next_month(current),
                _ => return Ok(()),
            }
        }
    }

    fn tasks(&self, action: TaskAction) -> Result<()> {
        let list: TaskList = self.store.get(TASKS_KEY).unwrap_or_default();
        let updated = match action {
            TaskAction::List => None,
            TaskAction::Add { text } => match list.add(&text.join(" "), now_ms()) {
                Ok(l) => Some(l),
                Err(e) => {
                    ux::notify_error("Invalid", &e.to_string());
                    None
                }
            },
            TaskAction::Toggle { id } | TaskAction::Delete { id } | TaskAction::Edit { id, .. }
                if !list.contains(id) =>
            {
                ux::notify_error("Not found", &format!("no task #{id}"));
                None
            }
            TaskAction::Toggle { id } => Some(list.toggle(id)),
            TaskAction::Delete { id } => Some(list.remove(id)),
            TaskAction::Edit { id, text } => Some(list.edit(id, &text.join(" "))),
        };

        let list = match updated {
            Some(l) if l != list => {
                self.store.set(TASKS_KEY, &l)?;
                l
            }
            _ => list,
        };
        ux::show_tasks(&list);
        Ok(())
    }
}
