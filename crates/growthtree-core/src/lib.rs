//! # GrowthTree Core Library
//!
//! Core business logic for GrowthTree, a personal-growth tracker that turns
//! habits, goals and small daily actions into the growth of a tree. All
//! operations are available through the standalone `growthtree` CLI, which is
//! a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Progress engine**: [`ProgressStore`] owns category scores, habits,
//!   goals, the daily streak, XP and the weekly challenge. Every operation
//!   validates first and mutates second, and queues [`ProgressEvent`]s.
//! - **Storage**: JSON key-value snapshots behind [`PersistenceGateway`] and
//!   TOML-based configuration.
//! - **Session**: [`Session`] ties the store to a gateway and mirrors every
//!   change to storage.
//!
//! ## Key Components
//!
//! - [`ProgressStore`]: in-memory progress state
//! - [`Session`]: persisted user session
//! - [`Insights`]: read-only dashboard summary
//! - [`Config`]: application configuration management

pub mod actions;
pub mod category;
pub mod challenge;
pub mod checkin;
pub mod error;
pub mod events;
pub mod goal;
pub mod habit;
pub mod insights;
pub mod journey;
pub mod profile;
pub mod progress;
pub mod session;
pub mod storage;
pub mod store;

pub use actions::{entropy_rng, seeded_rng};
pub use category::{Category, CategoryScores, TreeStage};
pub use challenge::WeeklyChallenge;
pub use checkin::{CheckinRecord, Reflection};
pub use error::{ConfigError, CoreError, EntityKind, PersistenceError, ValidationError};
pub use events::ProgressEvent;
pub use goal::{Goal, GoalTracking, Milestone};
pub use habit::{Habit, HabitToggle};
pub use insights::{Insights, Trend};
pub use journey::{CategoryJourney, JourneyMilestone};
pub use profile::Profile;
pub use progress::{StreakCounter, StreakTier, XpState};
pub use session::{Applied, PersistenceWarning, Session};
pub use storage::{Config, FileGateway, MemoryGateway, PersistenceGateway, StorageKey};
pub use store::{ActionOutcome, ProgressSnapshot, ProgressStore, ProgressUpdate, XpAward};
