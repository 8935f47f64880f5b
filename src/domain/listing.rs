//! Listings of courses and library resources.
//!
//! Resource folders are grouped into a fixed set of subject categories by
//! keyword; anything unmatched lands in [`Category::Other`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::foundation::Timestamp;

/// What a listing request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingTarget {
    Courses,
    Resources,
}

impl ListingTarget {
    /// Resources when the message mentions pdfs or resources, else courses.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("pdf") || lower.contains("resource") || lower.contains("book") {
            ListingTarget::Resources
        } else {
            ListingTarget::Courses
        }
    }
}

/// A course the user can act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub name: String,
    pub code: Option<String>,
    pub member_count: Option<u32>,
}

/// A folder of reference material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFolder {
    pub name: String,
    pub last_modified: Option<Timestamp>,
}

impl ResourceFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_modified: None,
        }
    }
}

/// Subject category of a resource folder, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    ArtificialIntelligence,
    DataScience,
    ComputerScience,
    Mathematics,
    Other,
}

impl Category {
    const RULES: [(Category, &'static [&'static str]); 4] = [
        (
            Category::ArtificialIntelligence,
            &["ai", "artificial intelligence", "machine learning"],
        ),
        (Category::DataScience, &["data", "analytics", "statistics"]),
        (Category::ComputerScience, &["computer", "programming", "software"]),
        (Category::Mathematics, &["math", "numerical", "calculation"]),
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::ArtificialIntelligence => "Artificial Intelligence",
            Category::DataScience => "Data Science",
            Category::ComputerScience => "Computer Science",
            Category::Mathematics => "Mathematics",
            Category::Other => "Other",
        }
    }

    /// First category whose keywords appear in `name`.
    ///
    /// Two-letter keywords must be whole words so "ai" does not match
    /// "domain".
    pub fn of(name: &str) -> Self {
        let lower = name.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        Self::RULES
            .iter()
            .find(|(_, keywords)| {
                keywords.iter().any(|kw| {
                    if kw.len() <= 2 {
                        words.contains(kw)
                    } else {
                        lower.contains(kw)
                    }
                })
            })
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

/// Groups folders by category, dropping empty categories.
pub fn group_by_category(folders: &[ResourceFolder]) -> Vec<(Category, Vec<&ResourceFolder>)> {
    let mut groups: Vec<(Category, Vec<&ResourceFolder>)> = Vec::new();
    for folder in folders {
        let category = Category::of(&folder.name);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(folder),
            None => groups.push((category, vec![folder])),
        }
    }
    groups.sort_by_key(|(c, _)| *c);
    groups
}

/// Renders the course list.
pub fn format_courses(courses: &[CourseSummary]) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let mut out = format!("Your courses ({}):\n", courses.len());
    for (i, course) in courses.iter().enumerate() {
        let _ = write!(out, "\n{}. {}", i + 1, course.name);
        if let Some(code) = &course.code {
            let _ = write!(out, " ({code})");
        }
        if let Some(count) = course.member_count {
            let _ = write!(out, " - {count} members");
        }
    }
    out
}

/// Renders resource folders grouped by category with running numbering.
pub fn format_resources(folders: &[ResourceFolder]) -> String {
    if folders.is_empty() {
        return "No resource folders found.".to_string();
    }

    let mut out = format!("Available resources ({} folders)\n", folders.len());
    let mut counter = 1;
    for (category, members) in group_by_category(folders) {
        let _ = write!(out, "\n{}:", category.title());
        for folder in members {
            let _ = write!(out, "\n{counter}. {}", folder.name);
            counter += 1;
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
