use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::assessment::IkigaiField;
use crate::catalog::{contests::Contest, dashboard, forum::ForumPost, paths::CareerPath};
use crate::chat::{ChatMessage, Sender};
use crate::recommend::RecommendationResult;
use crate::roadmap::{RoadmapBoard, READINESS_CHECKLIST};
use crate::tracker::TaskList;

/// Spinner shown while a model call is in flight.
pub fn pending(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn notify_error(title: &str, detail: &str) {
    eprintln!("{} {}", format!("[{title}]").red().bold(), detail);
}

pub fn call_to_action(headline: &str, command: &str) {
    println!("\n{}", headline.bold());
    println!("  Run {} to get started.\n", command.cyan().bold());
}

/// Read one line from stdin; `None` on end of input.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().lock().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim_end_matches(['\r', '\n']).to_string()),
    }
}

pub fn show_step_header(field: IkigaiField, step: usize, total: usize, progress: u8) {
    println!("\n{} {}  {}", format!("Step {} of {}", step + 1, total).dimmed(), field.title().bold(), format!("{progress}%").dimmed());
    for q in field.questions() {
        println!("  {} {}", "?".cyan(), q);
    }
}

/// Steps in display order. With no steps, points the reader at the raw text that follows.
pub fn show_roadmap(board: &RoadmapBoard) {
    println!("\n{}", "=== YOUR ROADMAP ===".bold());
    if board.is_empty() {
        println!("{}\n", "The AI did not produce a valid list of roadmap steps. Check the full response below.".yellow());
        return;
    }
    for (i, s) in board.steps().iter().enumerate() {
        let marker = if board.dragging() == Some(i) { "≡".dimmed() } else { "≡".normal() };
        println!("{} {:>2}. {}", marker, i + 1, s);
    }
    println!();
}

pub fn show_recommendation(result: &RecommendationResult) {
    println!("{}", "Reasoning".bold().underline());
    println!("{}\n", result.reasoning);
    println!("{}", "Full recommendations".bold().underline());
    println!("{}\n", result.career_recommendations);
}

pub fn show_readiness_checklist() {
    println!("{}", "Readiness Checklist".bold().underline());
    println!("{}", "Essential steps to prepare for your new career path.".dimmed());
    for (category, items) in READINESS_CHECKLIST {
        println!("  {}", category.bold());
        for item in *items {
            println!("    [ ] {item}");
        }
    }
    println!();
}

pub fn show_message(m: &ChatMessage) {
    match m.sender {
        Sender::Ai => println!("{} {}", "counselor>".green().bold(), m.text),
        Sender::User => println!("{} {}", "you>".blue().bold(), m.text),
    }
}

pub fn show_dashboard(achievements: &[dashboard::Achievement]) {
    println!("\n{}", "Welcome to your Career Hub".bold());
    println!("{}\n", "This is your control center for navigating your professional journey.".dimmed());
    for f in dashboard::FEATURES {
        println!("{}  {}", f.title.bold(), f.description);
        println!("    {} {}", f.cta.cyan(), f.command.dimmed());
    }
    println!("\n{}", "Achievements".bold().underline());
    for a in achievements {
        let badge = if a.unlocked { "✔".green().bold() } else { "🔒".normal() };
        println!("  {badge} {}  {}", a.title.bold(), a.description.dimmed());
    }
    println!();
}

pub fn show_paths(selected: &CareerPath, all: &[CareerPath]) {
    println!("\n{}", "Career Paths".bold());
    for (i, p) in all.iter().enumerate() {
        let title = if p.title == selected.title { p.title.cyan().bold() } else { p.title.normal() };
        println!("  {}. {}  {}", i + 1, title, format!("{}%", p.progress).dimmed());
    }
    println!("\n{}", selected.title.bold().underline());
    println!("{}", selected.description);
    for (i, m) in selected.milestones.iter().enumerate() {
        let mark = if m.completed { "✔".green() } else { "○".dimmed() };
        println!("  {mark} {}. {}", i + 1, m.title);
        println!("       {}", m.skills.join(" · ").dimmed());
    }
    println!("\n  {}\n", selected.call_to_action().cyan().bold());
}

pub fn show_contests(month_label: &str, contests: &[&Contest], days: &[u32]) {
    println!("\n{}", format!("Upcoming Contests for {month_label}").bold());
    if contests.is_empty() {
        println!("  {}", "No contests scheduled for this month.".dimmed());
        return;
    }
    let days: Vec<String> = days.iter().map(|d| d.to_string()).collect();
    println!("  {} {}", "Contest days:".dimmed(), days.join(", "));
    for c in contests {
        let platform = match c.platform {
            "LeetCode" => c.platform.yellow(),
            "Codeforces" => c.platform.red(),
            "CodeChef" => c.platform.blue(),
            other => other.normal(),
        };
        println!("  {}  {}  [{}]  {}", c.date, c.name.bold(), platform, c.href.dimmed());
    }
    println!();
}

pub fn show_forum(posts: &[&ForumPost], tags: &[&str]) {
    println!("\n{}", "Community Forum".bold());
    if posts.is_empty() {
        println!("  {}", "No discussions found.".dimmed());
    }
    for p in posts {
        println!("  {}  {}", format!("#{}", p.tag).magenta(), p.title.bold());
        println!("     {} · {} · {} replies · {} likes", p.author, p.time, p.replies, p.likes);
    }
    println!("\n  {} {}\n", "Tags:".dimmed(), tags.join(", "));
}

pub fn show_tasks(list: &TaskList) {
    println!("\n{}", "Daily Tracker".bold());
    if list.tasks().is_empty() {
        println!("  {}", "No tasks for today. Add one to get started!".dimmed());
    }
    for t in list.tasks() {
        let check = if t.completed { "[x]".green() } else { "[ ]".normal() };
        let text = if t.completed { t.text.dimmed().strikethrough() } else { t.text.normal() };
        println!("  {check} {}  {}", text, format!("#{}", t.id).dimmed());
    }
    println!(
        "\n  {} {}/{} ({:.0}%)\n",
        "Progress:".bold(),
        list.completed(),
        list.tasks().len(),
        list.progress()
    );
}
