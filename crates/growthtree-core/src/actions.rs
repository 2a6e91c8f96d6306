//! "Take action" selection: which category a gamified action lands in, and
//! a concrete suggestion for it.
//!
//! All randomness comes from a caller-supplied [`Rng`], so a seeded
//! `Mcg128Xsl64` pins outcomes in tests.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::category::Category;

/// Seeded generator for reproducible action draws.
pub fn seeded_rng(seed: u64) -> Mcg128Xsl64 {
    Mcg128Xsl64::seed_from_u64(seed)
}

/// Generator seeded from the OS.
pub fn entropy_rng() -> Mcg128Xsl64 {
    Mcg128Xsl64::from_entropy()
}

/// Suggested micro-actions per category.
pub fn suggestions(category: Category) -> &'static [&'static str] {
    match category {
        Category::Finance => &[
            "Write down today's expenses",
            "Check your bank account balance",
            "Set aside $5 for savings",
            "Review a subscription you pay for",
            "Track one unnecessary purchase",
            "Calculate your weekly coffee budget",
        ],
        Category::Physical => &[
            "Do 10 jumping jacks",
            "Take a 5-minute walk",
            "Drink a glass of water",
            "Do 5 push-ups",
            "Stretch your neck and shoulders",
            "Take the stairs instead of elevator",
        ],
        Category::Mental => &[
            "Take 5 deep breaths",
            "Write down 3 things you're grateful for",
            "Meditate for 2 minutes",
            "Call a friend or family member",
            "Listen to a calming song",
            "Write down one positive affirmation",
        ],
        Category::Diet => &[
            "Eat a piece of fruit",
            "Drink a glass of water",
            "Plan tomorrow's breakfast",
            "Try a new healthy snack",
            "Read a nutrition label",
            "Add vegetables to your next meal",
        ],
    }
}

/// Pick the category an action boosts.
///
/// With probability `focus_probability` the focus category wins (when one is
/// given); otherwise the pick is uniform over all four.
pub fn choose_category<R: Rng + ?Sized>(
    focus: Option<Category>,
    focus_probability: f64,
    rng: &mut R,
) -> Category {
    let uses_focus = rng.gen_bool(focus_probability.clamp(0.0, 1.0));
    match focus {
        Some(category) if uses_focus => category,
        _ => Category::ALL[rng.gen_range(0..Category::ALL.len())],
    }
}

/// Pick a suggestion from the category's catalog.
pub fn suggest<R: Rng + ?Sized>(category: Category, rng: &mut R) -> String {
    suggestions(category)
        .choose(rng)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
