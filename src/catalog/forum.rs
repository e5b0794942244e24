#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForumPost {
    pub id: u32,
    pub title: &'static str,
    pub author: &'static str,
    pub replies: u32,
    pub likes: u32,
    pub tag: &'static str,
    pub time: &'static str,
}

pub const POSTS: &[ForumPost] = &[
    ForumPost { id: 1, title: "Is learning Go a good idea in 2024 for backend development?", author: "Alex Morgan", replies: 12, likes: 34, tag: "backend", time: "2 hours ago" },
    ForumPost { id: 2, title: "How do you center a div? (I'm serious)", author: "Jane Doe", replies: 25, likes: 5, tag: "frontend", time: "5 hours ago" },
    ForumPost { id: 3, title: "Best resources for mastering data structures and algorithms?", author: "Sam Wilson", replies: 8, likes: 52, tag: "algorithms", time: "1 day ago" },
    ForumPost { id: 4, title: "Struggling with React state management. Redux, Zustand, or Context API?", author: "Chris Evans", replies: 18, likes: 41, tag: "react", time: "2 days ago" },
    ForumPost { id: 5, title: "Showcase: I built a real-time chat app with Socket.io and Next.js", author: "Nina Petrova", replies: 5, likes: 67, tag: "showcase", time: "3 days ago" },
];

pub const TAGS: &[&str] = &["backend", "frontend", "algorithms", "react", "showcase"];

/// Posts whose title or tag contains `term`, ignoring case. An empty term matches all.
pub fn search(term: &str) -> Vec<&'static ForumPost> {
    let needle = term.trim().to_lowercase();
    POSTS
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle) || p.tag.contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_title_or_tag_case_insensitively() {
        assert_eq!(search("").len(), POSTS.len());
        let react: Vec<u32> = search("REACT").iter().map(|p| p.id).collect();
        assert_eq!(react, vec![4]);
        let backend: Vec<u32> = search("backend").iter().map(|p| p.id).collect();
        assert_eq!(backend, vec![1]);
        assert!(search("rustacean").is_empty());
    }
}
