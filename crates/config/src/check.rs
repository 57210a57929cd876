//! Per-section checks collected into a flat problem list

use crate::error::Problem;
use std::fmt::Display;
use std::ops::RangeInclusive;

/// A config table that can report its invalid settings
pub trait Section {
    /// Table name in the TOML file
    const NAME: &'static str;

    fn check(&self, checker: &mut Checker<'_>);

    fn problems(&self) -> Vec<Problem> {
        let mut problems = Vec::new();
        self.check(&mut Checker::new(Self::NAME, &mut problems));
        problems
    }
}

/// Records problems for one section, prefixing each field with the section name
pub struct Checker<'a> {
    section: &'static str,
    problems: &'a mut Vec<Problem>,
}

impl<'a> Checker<'a> {
    pub fn new(section: &'static str, problems: &'a mut Vec<Problem>) -> Self {
        Self { section, problems }
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>, value: Option<&dyn Display>) {
        let mut problem = Problem::new(format!("{}.{}", self.section, field), message);
        if let Some(value) = value {
            problem = problem.with_value(value);
        }
        self.problems.push(problem);
    }

    pub fn range<T>(&mut self, field: &str, value: T, allowed: RangeInclusive<T>)
    where
        T: PartialOrd + Display,
    {
        if !allowed.contains(&value) {
            let message = format!("must be between {} and {}", allowed.start(), allowed.end());
            self.fail(field, message, Some(&value));
        }
    }

    /// Command names and free-text values must contain something
    pub fn filled(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fail(field, "must not be empty", None);
        }
    }

    /// Catalog endpoints must be absolute http(s) URLs with a host
    pub fn endpoint(&mut self, field: &str, value: &str) {
        let usable = url::Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false);
        if !usable {
            self.fail(field, "must be an http(s) URL", Some(&value));
        }
    }

    /// Ordered lists where each entry may appear once
    pub fn unique<T>(&mut self, field: &str, items: &[T])
    where
        T: PartialEq + Display,
    {
        for (i, item) in items.iter().enumerate() {
            if items[..i].contains(item) {
                self.fail(&format!("{}[{}]", field, i), "is listed twice", Some(item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl FnOnce(&mut Checker<'_>)) -> Vec<Problem> {
        let mut problems = Vec::new();
        f(&mut Checker::new("sources", &mut problems));
        problems
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(run(|c| c.range("archive_rows", 1u32, 1..=100)).is_empty());
        assert!(run(|c| c.range("archive_rows", 100u32, 1..=100)).is_empty());

        let problems = run(|c| c.range("archive_rows", 0u32, 1..=100));
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, "sources.archive_rows");
        assert_eq!(problems[0].value.as_deref(), Some("0"));
    }

    #[test]
    fn test_endpoint_requires_http_and_host() {
        assert!(run(|c| c.endpoint("gutendex_url", "https://gutendex.com/books/")).is_empty());
        assert!(run(|c| c.endpoint("gutendex_url", "http://localhost:8080")).is_empty());
        assert_eq!(run(|c| c.endpoint("gutendex_url", "ftp://gutendex.com")).len(), 1);
        assert_eq!(run(|c| c.endpoint("gutendex_url", "gutendex.com/books")).len(), 1);
        assert_eq!(run(|c| c.endpoint("gutendex_url", "file:///srv/books")).len(), 1);
    }

    #[test]
    fn test_unique_reports_each_repeat() {
        let problems = run(|c| c.unique("order", &["a", "b", "a", "a"]));
        let fields: Vec<&str> = problems.iter().map(|p| p.field.as_str()).collect();
        assert_eq!(fields, vec!["sources.order[2]", "sources.order[3]"]);
    }

    #[test]
    fn test_filled() {
        assert!(run(|c| c.filled("cmd", "pandoc")).is_empty());
        assert_eq!(run(|c| c.filled("cmd", "  ")).len(), 1);
    }
}
