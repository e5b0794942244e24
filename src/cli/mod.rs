use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
    #[value(alias = "anthropic")]
    Anthropic,
    #[value(alias = "ollama")]
    Ollama,
}

/// How the recommendation pipeline obtains the user's unique path.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineMode {
    /// Unique path built from a fixed local template, one model call.
    Direct,
    /// Unique path synthesized by an auxiliary model call first.
    TwoStep,
}

#[derive(Parser, Debug)]
#[command(name = "career-compass", version, about = "Ikigai assessment, AI career roadmaps and a counselor chat")]
pub struct Args {
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true, value_enum)]
    pub pipeline: Option<PipelineMode>,

    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer the four Ikigai questions, then generate a roadmap.
    Assess {
        #[arg(long)]
        love: Option<String>,
        #[arg(long)]
        good_at: Option<String>,
        #[arg(long)]
        world_needs: Option<String>,
        #[arg(long)]
        paid_for: Option<String>,
    },
    /// Generate a roadmap from query parameters or the stored assessment.
    Roadmap {
        #[arg(long, conflicts_with_all = ["skills", "preferences", "ikigai_components"])]
        query: Option<String>,
        #[arg(long)]
        skills: Option<String>,
        #[arg(long)]
        preferences: Option<String>,
        #[arg(long)]
        ikigai_components: Option<String>,
        #[arg(long, default_value_t = false)]
        no_reorder: bool,
    },
    /// Talk to the AI career counselor.
    Chat {
        #[arg(long)]
        name: Option<String>,
        /// Ask one question and exit instead of opening a session.
        #[arg(long)]
        ask: Option<String>,
    },
    Dashboard,
    /// Browse career paths; select one by number or title.
    Paths { select: Option<String> },
    Contests {
        /// Month to show, as YYYY-MM.
        #[arg(long)]
        month: Option<String>,
    },
    Forum {
        #[arg(long)]
        search: Option<String>,
    },
    Tasks {
        #[command(subcommand)]
        action: Option<TaskAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    List,
    Add { text: Vec<String> },
    Toggle { id: i64 },
    Delete { id: i64 },
    Edit { id: i64, text: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roadmap_query_with_global_flags() {
        let args = Args::try_parse_from([
            "career-compass",
            "roadmap",
            "--query",
            "skills=a&preferences=b&ikigaiComponents=c",
            "--pipeline",
            "direct",
        ])
        .unwrap();
        assert_eq!(args.pipeline, Some(PipelineMode::Direct));
        match args.command {
            Command::Roadmap { query, no_reorder, .. } => {
                assert_eq!(query.as_deref(), Some("skills=a&preferences=b&ikigaiComponents=c"));
                assert!(!no_reorder);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn query_conflicts_with_explicit_fields() {
        let res = Args::try_parse_from([
            "career-compass",
            "roadmap",
            "--query",
            "skills=a",
            "--skills",
            "b",
        ]);
        assert!(res.is_err());
    }
}
