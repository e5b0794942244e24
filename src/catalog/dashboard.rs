#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub command: &'static str,
    pub cta: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Ikigai Assessment",
        description: "Discover your passions and skills to find the perfect career path for you.",
        command: "career-compass assess",
        cta: "Start Assessment",
    },
    Feature {
        title: "Career Paths",
        description: "Explore pre-defined roadmaps for various tech careers and track your progress.",
        command: "career-compass paths",
        cta: "Explore Paths",
    },
    Feature {
        title: "Contest Calendar",
        description: "Stay updated with upcoming coding contests from top competitive programming platforms.",
        command: "career-compass contests",
        cta: "View Calendar",
    },
    Feature {
        title: "Daily Tracker",
        description: "Manage your daily tasks, set goals, and monitor your progress efficiently.",
        command: "career-compass tasks",
        cta: "Track Today",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Achievements for the current user; the first two follow the stored assessment.
pub fn achievements(has_assessment: bool) -> Vec<Achievement> {
    vec![
        Achievement {
            title: "Assessment Complete",
            description: "You've taken the first step on your journey of self-discovery.",
            unlocked: has_assessment,
        },
        Achievement {
            title: "Roadmap Generated",
            description: "Your personalized career path has been created by the AI.",
            unlocked: has_assessment,
        },
        Achievement {
            title: "Creative Thinker",
            description: "Awarded for demonstrating strong creative skills.",
            unlocked: true,
        },
        Achievement {
            title: "Team Leader",
            description: "Demonstrate leadership potential in your assessments.",
            unlocked: false,
        },
        Achievement {
            title: "Problem Solver",
            description: "Excel at finding innovative solutions to challenges.",
            unlocked: false,
        },
        Achievement {
            title: "Digital Nomad",
            description: "Unlock a career path that allows for remote work and travel.",
            unlocked: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_unlocks_first_two() {
        let locked = achievements(false).iter().filter(|a| a.unlocked).count();
        let unlocked = achievements(true).iter().filter(|a| a.unlocked).count();
        assert_eq!(locked, 1);
        assert_eq!(unlocked, 3);
    }
}
