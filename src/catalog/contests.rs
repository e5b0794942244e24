use anyhow::{anyhow, Result};
use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contest {
    pub date: &'static str,
    pub name: &'static str,
    pub platform: &'static str,
    pub href: &'static str,
}

impl Contest {
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date, "%Y-%m-%d").ok()
    }
}

pub const CONTESTS: &[Contest] = &[
    Contest { date: "2024-08-05", name: "LeetCode Weekly Contest 399", platform: "LeetCode", href: "#" },
    Contest { date: "2024-08-10", name: "Codeforces Round #952 (Div. 4)", platform: "Codeforces", href: "#" },
    Contest { date: "2024-08-12", name: "LeetCode Biweekly Contest 123", platform: "LeetCode", href: "#" },
    Contest { date: "2024-08-17", name: "CodeChef Starters 112", platform: "CodeChef", href: "#" },
    Contest { date: "2024-08-25", name: "Codeforces Educational Round 165", platform: "Codeforces", href: "#" },
    Contest { date: "2024-09-01", name: "LeetCode Weekly Contest 400", platform: "LeetCode", href: "#" },
];

/// The month the bundled contest list covers.
pub const DEFAULT_MONTH: &str = "2024-08";

/// First day of the month named by `YYYY-MM`.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid month `{s}`, expected YYYY-MM"))
}

pub fn for_month(month: NaiveDate) -> Vec<&'static Contest> {
    CONTESTS
        .iter()
        .filter(|c| {
            c.day()
                .map(|d| d.year() == month.year() && d.month() == month.month())
                .unwrap_or(false)
        })
        .collect()
}

/// Days in `month` that have at least one contest.
pub fn contest_days(month: NaiveDate) -> Vec<u32> {
    let mut days: Vec<u32> = for_month(month).iter().filter_map(|c| c.day()).map(|d| d.day()).collect();
    days.dedup();
    days
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    month.checked_add_months(Months::new(1)).unwrap_or(month)
}

pub fn prev_month(month: NaiveDate) -> NaiveDate {
    month.checked_sub_months(Months::new(1)).unwrap_or(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_month() {
        let aug = parse_month(DEFAULT_MONTH).unwrap();
        assert_eq!(for_month(aug).len(), 5);
        assert_eq!(contest_days(aug), vec![5, 10, 12, 17, 25]);
        let sep = next_month(aug);
        assert_eq!(for_month(sep)[0].name, "LeetCode Weekly Contest 400");
        assert!(for_month(prev_month(aug)).is_empty());
    }

    #[test]
    fn month_navigation_crosses_years() {
        let dec = parse_month("2024-12").unwrap();
        assert_eq!(next_month(dec), parse_month("2025-01").unwrap());
    }

    #[test]
    fn rejects_bad_month() {
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("August").is_err());
    }
}
