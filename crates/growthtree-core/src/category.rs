//! Life-domain categories and the per-category growth scores.
//!
//! Scores live in the closed range [0.0, 1.0]. Every write goes through
//! [`clamp_score`], so no sequence of boosts can push a score outside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the four tracked life domains.
///
/// `nutrition` is accepted as an alias for [`Category::Diet`] when parsing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Physical,
    Finance,
    Mental,
    #[serde(alias = "nutrition")]
    Diet,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 4] = [
        Category::Physical,
        Category::Finance,
        Category::Mental,
        Category::Diet,
    ];

    /// Canonical lowercase key.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Physical => "physical",
            Category::Finance => "finance",
            Category::Mental => "mental",
            Category::Diet => "diet",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Physical => "Physical",
            Category::Finance => "Finance",
            Category::Mental => "Mental",
            Category::Diet => "Diet",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(Category::Physical),
            "finance" => Ok(Category::Finance),
            "mental" => Ok(Category::Mental),
            "diet" | "nutrition" => Ok(Category::Diet),
            other => Err(ValidationError::InvalidValue {
                field: "category".to_string(),
                message: format!(
                    "unknown category '{other}' (expected physical, finance, mental or diet)"
                ),
            }),
        }
    }
}

/// Clamp a score into [0.0, 1.0]. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Growth score per category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryScores {
    physical: f64,
    finance: f64,
    mental: f64,
    diet: f64,
}

impl Default for CategoryScores {
    fn default() -> Self {
        Self {
            physical: 0.15,
            finance: 0.10,
            mental: 0.05,
            diet: 0.20,
        }
    }
}

impl CategoryScores {
    /// Build scores from raw values, clamping each one.
    pub fn new(physical: f64, finance: f64, mental: f64, diet: f64) -> Self {
        Self {
            physical: clamp_score(physical),
            finance: clamp_score(finance),
            mental: clamp_score(mental),
            diet: clamp_score(diet),
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Physical => self.physical,
            Category::Finance => self.finance,
            Category::Mental => self.mental,
            Category::Diet => self.diet,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        let value = clamp_score(value);
        match category {
            Category::Physical => self.physical = value,
            Category::Finance => self.finance = value,
            Category::Mental => self.mental = value,
            Category::Diet => self.diet = value,
        }
    }

    /// Add `delta` to a category and return the change actually applied
    /// after clamping.
    pub fn boost(&mut self, category: Category, delta: f64) -> f64 {
        let before = self.get(category);
        self.set(category, before + delta);
        self.get(category) - before
    }

    /// True when every score is a number in [0.0, 1.0]. Deserialized values
    /// bypass the setters, so loaders check this.
    pub(crate) fn in_range(&self) -> bool {
        self.iter().all(|(_, v)| (0.0..=1.0).contains(&v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Mean score over all four categories.
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum::<f64>() / Category::ALL.len() as f64
    }

    /// Highest-scoring category. Ties go to the later category.
    pub fn strongest(&self) -> (Category, f64) {
        self.iter()
            .fold((Category::Physical, f64::MIN), |best, (c, v)| {
                if v >= best.1 {
                    (c, v)
                } else {
                    best
                }
            })
    }

    /// Lowest-scoring category. Ties go to the later category.
    pub fn weakest(&self) -> (Category, f64) {
        self.iter()
            .fold((Category::Physical, f64::MAX), |worst, (c, v)| {
                if v <= worst.1 {
                    (c, v)
                } else {
                    worst
                }
            })
    }

    /// Tree stage derived from the mean score.
    pub fn tree_stage(&self) -> TreeStage {
        TreeStage::from_mean(self.mean())
    }
}

/// Growth stage of the tree, projected from the mean category score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TreeStage {
    /// Mean 0.3 and below
    Sprout,
    /// Mean in (0.3, 0.7]
    Growing,
    /// Mean above 0.7
    Flourishing,
}

impl TreeStage {
    pub const GROWING_AT: f64 = 0.3;
    pub const FLOURISHING_AT: f64 = 0.7;

    pub fn from_mean(mean: f64) -> Self {
        if mean > Self::FLOURISHING_AT {
            TreeStage::Flourishing
        } else if mean > Self::GROWING_AT {
            TreeStage::Growing
        } else {
            TreeStage::Sprout
        }
    }
}

impl fmt::Display for TreeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeStage::Sprout => write!(f, "sprout"),
            TreeStage::Growing => write!(f, "growing"),
            TreeStage::Flourishing => write!(f, "flourishing"),
        }
    }
}
