//! Static content: career paths, contests, forum posts and the dashboard.

pub mod contests;
pub mod dashboard;
pub mod forum;
pub mod paths;
