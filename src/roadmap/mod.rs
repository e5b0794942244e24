use regex::Regex;
use std::sync::OnceLock;

fn step_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[0-9]+\.\s*").expect("static regex"))
}

/// Lines of `text` starting with an ASCII number and a period, prefix and trailing
/// whitespace stripped, in their original order.
///
/// An empty result is valid: the model answered without a numbered list and the
/// caller falls back to the raw text.
pub fn parse_steps(text: &str) -> Vec<String> {
    let re = step_prefix();
    text.split('\n')
        .filter(|line| re.is_match(line))
        .map(|line| re.replace(line, "").trim_end().to_string())
        .collect()
}

/// Remove the item at `from` and insert it at `to`. Out-of-range indices leave the list
/// unchanged.
pub fn move_step(steps: &[String], from: usize, to: usize) -> Vec<String> {
    let mut out = steps.to_vec();
    if from >= out.len() || to >= out.len() {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    DragStart(usize),
    Drop(usize),
    DragEnd,
}

/// Display order of roadmap steps. Reordering is local to the board and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapBoard {
    steps: Vec<String>,
    dragging: Option<usize>,
}

impl RoadmapBoard {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps, dragging: None }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn apply(&self, event: DragEvent) -> Self {
        match event {
            DragEvent::DragStart(i) if i < self.steps.len() => {
                Self { steps: self.steps.clone(), dragging: Some(i) }
            }
            DragEvent::DragStart(_) => self.clone(),
            DragEvent::Drop(target) => match self.dragging {
                Some(from) => Self { steps: move_step(&self.steps, from, target), dragging: None },
                None => self.clone(),
            },
            DragEvent::DragEnd => Self { steps: self.steps.clone(), dragging: None },
        }
    }

    /// Convenience for a full drag from `from` onto `to`.
    pub fn move_item(&self, from: usize, to: usize) -> Self {
        self.apply(DragEvent::DragStart(from)).apply(DragEvent::Drop(to))
    }
}

/// Generic preparation tasks shown next to every roadmap.
pub const READINESS_CHECKLIST: &[(&str, &[&str])] = &[
    (
        "Technical Skills",
        &[
            "Learn a new programming language",
            "Complete a data science course",
            "Get a cloud certification (e.g., AWS, Azure)",
        ],
    ),
    (
        "Soft Skills",
        &["Practice public speaking", "Take a leadership workshop", "Improve negotiation skills"],
    ),
    (
        "Digital Identity",
        &[
            "Update LinkedIn profile",
            "Create a professional portfolio website",
            "Clean up social media presence",
            "Contribute to an open-source project on GitHub",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn clean_list_parses_to_items() {
        assert_eq!(parse_steps("1. A\n2. B\n3. C"), v(&["A", "B", "C"]));
    }

    #[test]
    fn prose_around_list_is_dropped() {
        let text = "Intro paragraph.\n1. Learn Python\n2. Build a portfolio\nSome trailing note.";
        assert_eq!(parse_steps(text), v(&["Learn Python", "Build a portfolio"]));
    }

    #[test]
    fn multi_digit_and_indented_numerals() {
        assert_eq!(parse_steps("10. Something"), v(&["Something"]));
        assert_eq!(parse_steps("   3.Indented\r\n"), v(&["Indented"]));
    }

    #[test]
    fn only_ascii_numerals_start_a_step() {
        let text = "١. Arabic-Indic numeral\n３. fullwidth\n1. ascii  ";
        assert_eq!(parse_steps(text), v(&["ascii"]));
    }

    #[test]
    fn only_leading_prefix_is_stripped() {
        assert_eq!(parse_steps("2. Learn 3. things"), v(&["Learn 3. things"]));
    }

    #[test]
    fn no_numbered_lines_yields_empty() {
        assert!(parse_steps("Become a technical writer.\n- bullet\n* star").is_empty());
        assert!(parse_steps("").is_empty());
    }

    #[test]
    fn move_is_a_permutation() {
        let steps = v(&["A", "B", "C", "D"]);
        assert_eq!(move_step(&steps, 0, 2), v(&["B", "C", "A", "D"]));
        assert_eq!(move_step(&steps, 3, 0), v(&["D", "A", "B", "C"]));
        for from in 0..steps.len() {
            for to in 0..steps.len() {
                let mut moved = move_step(&steps, from, to);
                moved.sort();
                assert_eq!(moved, steps);
            }
        }
        assert_eq!(move_step(&steps, 9, 0), steps);
    }

    #[test]
    fn drop_without_drag_is_ignored() {
        let board = RoadmapBoard::new(v(&["A", "B"]));
        assert_eq!(board.apply(DragEvent::Drop(1)), board);
    }

    #[test]
    fn drag_end_cancels_pending_drag() {
        let board = RoadmapBoard::new(v(&["A", "B", "C"]));
        let dragging = board.apply(DragEvent::DragStart(2));
        assert_eq!(dragging.dragging(), Some(2));
        let cancelled = dragging.apply(DragEvent::DragEnd);
        assert_eq!(cancelled.dragging(), None);
        assert_eq!(cancelled.apply(DragEvent::Drop(0)).steps(), board.steps());
    }

    #[test]
    fn full_drag_reorders_and_clears_drag_state() {
        let board = RoadmapBoard::new(v(&["A", "B", "C", "D"]));
        let moved = board.move_item(0, 2);
        assert_eq!(moved.steps(), v(&["B", "C", "A", "D"]).as_slice());
        assert_eq!(moved.dragging(), None);
        assert_eq!(board.steps(), v(&["A", "B", "C", "D"]).as_slice());
    }
}
