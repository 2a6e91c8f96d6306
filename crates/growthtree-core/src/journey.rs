//! Per-category growth journeys.
//!
//! Each category has four milestones at 25/50/75/100% of its score. A
//! milestone is reached once the score, as a percentage, is at or above it.

use serde::Serialize;

use crate::category::{Category, CategoryScores};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct JourneyMilestone {
    pub percent: u8,
    pub title: &'static str,
    pub description: &'static str,
}

const fn milestone(
    percent: u8,
    title: &'static str,
    description: &'static str,
) -> JourneyMilestone {
    JourneyMilestone {
        percent,
        title,
        description,
    }
}

const PHYSICAL: [JourneyMilestone; 4] = [
    milestone(25, "First Steps", "Start moving daily"),
    milestone(50, "Building Habits", "Consistent exercise routine"),
    milestone(75, "Strong Foundation", "Improved fitness level"),
    milestone(100, "Peak Vitality", "Optimal physical health"),
];

const FINANCE: [JourneyMilestone; 4] = [
    milestone(25, "Financial Awareness", "Track your spending"),
    milestone(50, "Smart Budgeting", "Create and follow budget"),
    milestone(75, "Growing Savings", "Build emergency fund"),
    milestone(100, "Financial Freedom", "Secure financial future"),
];

const MENTAL: [JourneyMilestone; 4] = [
    milestone(25, "Self Awareness", "Understand your emotions"),
    milestone(50, "Mindful Practices", "Regular meditation"),
    milestone(75, "Emotional Balance", "Manage stress effectively"),
    milestone(100, "Mental Clarity", "Peak cognitive wellness"),
];

const DIET: [JourneyMilestone; 4] = [
    milestone(25, "Mindful Eating", "Understand nutrition basics"),
    milestone(50, "Balanced Meals", "Regular healthy eating"),
    milestone(75, "Sustained Energy", "Optimal meal planning"),
    milestone(100, "Nutritional Mastery", "Perfect food relationship"),
];

/// Journey milestones for `category`, in ascending order.
pub fn milestones(category: Category) -> &'static [JourneyMilestone; 4] {
    match category {
        Category::Physical => &PHYSICAL,
        Category::Finance => &FINANCE,
        Category::Mental => &MENTAL,
        Category::Diet => &DIET,
    }
}

fn journey_title(category: Category) -> &'static str {
    match category {
        Category::Physical => "Physical Health Journey",
        Category::Finance => "Financial Wellness Journey",
        Category::Mental => "Mental Wellness Journey",
        Category::Diet => "Nutrition Journey",
    }
}

/// Where one category stands on its journey.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryJourney {
    pub category: Category,
    pub label: &'static str,
    pub title: &'static str,
    /// Score as a percentage, 0-100
    pub percent: f64,
    pub reached: Vec<JourneyMilestone>,
    /// First milestone not yet reached; `None` once the journey is complete
    pub next: Option<JourneyMilestone>,
}

impl CategoryJourney {
    pub fn for_score(category: Category, score: f64) -> Self {
        let percent = score * 100.0;
        let (reached, remaining): (Vec<_>, Vec<_>) = milestones(category)
            .iter()
            .copied()
            .partition(|m| percent >= f64::from(m.percent));
        Self {
            category,
            label: category.label(),
            title: journey_title(category),
            percent,
            reached,
            next: remaining.first().copied(),
        }
    }

    /// Journeys for all four categories in canonical order.
    pub fn all(scores: &CategoryScores) -> Vec<Self> {
        scores
            .iter()
            .map(|(category, score)| Self::for_score(category, score))
            .collect()
    }
}
