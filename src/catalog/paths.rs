#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub title: &'static str,
    pub completed: bool,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareerPath {
    pub title: &'static str,
    pub description: &'static str,
    pub progress: u8,
    pub milestones: &'static [Milestone],
}

impl CareerPath {
    pub fn call_to_action(&self) -> &'static str {
        if self.progress > 0 {
            "Continue Learning"
        } else {
            "Start This Path"
        }
    }
}

const fn m(title: &'static str, completed: bool, skills: &'static [&'static str]) -> Milestone {
    Milestone { title, completed, skills }
}

pub const CAREER_PATHS: &[CareerPath] = &[
    CareerPath {
        title: "Full Stack Developer",
        description: "Master both front-end and back-end technologies to build complete web applications.",
        progress: 30,
        milestones: &[
            m("HTML, CSS & JavaScript", true, &["Semantic HTML", "CSS Flexbox & Grid", "DOM Manipulation"]),
            m("Front-end Framework (React)", true, &["Components & Props", "State & Lifecycle", "React Hooks"]),
            m("Back-end Development (Node.js & Express)", false, &["REST APIs", "Authentication", "Database Integration"]),
            m("Databases (SQL & NoSQL)", false, &["Database Design", "Querying Data", "ORMs/ODMs"]),
            m("Deployment & DevOps", false, &["Git & GitHub", "CI/CD Pipelines", "Cloud Services (AWS/Firebase)"]),
        ],
    },
    CareerPath {
        title: "Data Scientist",
        description: "Learn to extract insights and build predictive models from complex datasets.",
        progress: 0,
        milestones: &[
            m("Python for Data Science", false, &["Pandas", "NumPy", "Matplotlib"]),
            m("Statistics & Probability", false, &["Descriptive Statistics", "Inferential Statistics", "Hypothesis Testing"]),
            m("Machine Learning Fundamentals", false, &["Supervised Learning", "Unsupervised Learning", "Model Evaluation"]),
            m("Deep Learning", false, &["Neural Networks", "TensorFlow/PyTorch", "Computer Vision/NLP"]),
            m("Big Data Technologies", false, &["Spark", "Hadoop", "Data Warehousing"]),
        ],
    },
    CareerPath {
        title: "Cybersecurity Analyst",
        description: "Protect digital assets by identifying and mitigating security threats.",
        progress: 10,
        milestones: &[
            m("Networking Fundamentals", true, &["TCP/IP", "OSI Model", "Common Protocols"]),
            m("Security Principles", false, &["CIA Triad", "Risk Assessment", "Access Control"]),
            m("Ethical Hacking", false, &["Penetration Testing", "Vulnerability Scanning", "Social Engineering"]),
            m("Cryptography", false, &["Symmetric/Asymmetric Encryption", "Hashing", "Digital Signatures"]),
            m("Incident Response & Forensics", false, &["SIEM Tools", "Malware Analysis", "Digital Evidence"]),
        ],
    },
];

/// Look a path up by 1-based number or case-insensitive title. No selector picks the first.
pub fn select(selector: Option<&str>) -> Option<&'static CareerPath> {
    let Some(sel) = selector.map(str::trim) else {
        return CAREER_PATHS.first();
    };
    if let Ok(n) = sel.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| CAREER_PATHS.get(i));
    }
    CAREER_PATHS.iter().find(|p| p.title.eq_ignore_ascii_case(sel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_number_title_or_default() {
        assert_eq!(select(None).unwrap().title, "Full Stack Developer");
        assert_eq!(select(Some("2")).unwrap().title, "Data Scientist");
        assert_eq!(select(Some("cybersecurity analyst")).unwrap().progress, 10);
        assert!(select(Some("0")).is_none());
        assert!(select(Some("4")).is_none());
        assert!(select(Some("Astronaut")).is_none());
    }

    #[test]
    fn call_to_action_follows_progress() {
        assert_eq!(CAREER_PATHS[0].call_to_action(), "Continue Learning");
        assert_eq!(CAREER_PATHS[1].call_to_action(), "Start This Path");
    }
}
