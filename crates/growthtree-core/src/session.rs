//! A user session: the progress store, the onboarding profile and the
//! gateway they are mirrored to.
//!
//! Writes happen after each successful operation. A failed write is logged
//! and reported back as a [`PersistenceWarning`]; memory stays the source of
//! truth and is never rolled back.

use chrono::NaiveDate;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::category::Category;
use crate::checkin::{CheckinRecord, Reflection};
use crate::error::{CoreError, PersistenceError, Result};
use crate::events::ProgressEvent;
use crate::goal::{Goal, Milestone};
use crate::habit::Habit;
use crate::profile::Profile;
use crate::storage::config::Config;
use crate::storage::gateway::{PersistenceGateway, StorageKey};
use crate::store::{
    ActionOutcome, ProgressRecord, ProgressSnapshot, ProgressStore, ProgressUpdate, XpAward,
};

/// A write that did not reach storage.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub key: String,
    pub message: String,
}

/// Result of a session operation plus any persistence warnings.
#[derive(Debug, Clone, Serialize)]
pub struct Applied<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PersistenceWarning>,
}

impl<T> Applied<T> {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> Applied<U> {
        Applied {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

pub struct Session<G: PersistenceGateway> {
    store: ProgressStore,
    profile: Option<Profile>,
    gateway: G,
}

impl<G: PersistenceGateway> Session<G> {
    /// Load every key from `gateway`. Missing keys start from defaults; a
    /// value of the wrong shape fails with `CorruptState`.
    pub fn open(gateway: G, config: &Config, today: NaiveDate) -> Result<Self> {
        config.engine.validate()?;
        let profile: Option<Profile> = load(&gateway, StorageKey::Profile)?;
        let habits: Vec<Habit> = load(&gateway, StorageKey::Habits)?.unwrap_or_default();
        let goals: Vec<Goal> = load(&gateway, StorageKey::Goals)?.unwrap_or_default();
        let record: Option<ProgressRecord> = load(&gateway, StorageKey::Progress)?;

        let fresh = ProgressStore::new(config.engine.clone(), config.challenge.clone(), today);
        let store = if record.is_none() && habits.is_empty() && goals.is_empty() {
            fresh
        } else {
            let record = match record {
                Some(record) => record,
                None => fresh.snapshot().into_parts().2,
            };
            ProgressStore::from_snapshot(
                ProgressSnapshot::from_parts(habits, goals, record),
                config.engine.clone(),
                config.challenge.clone(),
                today,
            )?
        };

        let mut session = Self {
            store,
            profile,
            gateway,
        };
        if session.store.start_day(today) > 0 {
            session.persist(&[StorageKey::Habits]);
        }
        tracing::debug!(
            habits = session.store.habits().len(),
            goals = session.store.goals().len(),
            level = session.store.xp().level,
            "Session opened"
        );
        Ok(session)
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn drain_events(&mut self) -> Vec<ProgressEvent> {
        self.store.drain_events()
    }

    pub fn set_profile(&mut self, profile: Profile) -> Applied<Profile> {
        self.profile = Some(profile.clone());
        self.applied(profile, &[StorageKey::Profile])
    }

    pub fn add_habit(&mut self, title: &str, category: Category) -> Result<Applied<Habit>> {
        let habit = self.store.add_habit(title, category)?;
        Ok(self.applied(habit, &[StorageKey::Habits]))
    }

    pub fn toggle_habit(&mut self, id: &str, today: NaiveDate) -> Result<Applied<Habit>> {
        let habit = self.store.toggle_habit(id, today)?;
        Ok(self.applied(habit, &[StorageKey::Habits, StorageKey::Progress]))
    }

    pub fn add_goal(
        &mut self,
        title: &str,
        category: Category,
        target_date: &str,
    ) -> Result<Applied<Goal>> {
        let goal = self.store.add_goal(title, category, target_date)?;
        Ok(self.applied(goal, &[StorageKey::Goals]))
    }

    pub fn add_tracked_goal(
        &mut self,
        title: &str,
        category: Category,
        target_date: &str,
        target: f64,
        unit: &str,
        milestones: Vec<Milestone>,
    ) -> Result<Applied<Goal>> {
        let goal = self
            .store
            .add_tracked_goal(title, category, target_date, target, unit, milestones)?;
        Ok(self.applied(goal, &[StorageKey::Goals]))
    }

    pub fn complete_goal(&mut self, id: &str) -> Result<Applied<Goal>> {
        let goal = self.store.complete_goal(id)?;
        Ok(self.applied(goal, &[StorageKey::Goals, StorageKey::Progress]))
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<Applied<Goal>> {
        let goal = self.store.delete_goal(id)?;
        Ok(self.applied(goal, &[StorageKey::Goals]))
    }

    pub fn update_goal_progress(
        &mut self,
        id: &str,
        progress: f64,
    ) -> Result<Applied<ProgressUpdate>> {
        let update = self.store.update_goal_progress(id, progress)?;
        Ok(self.applied(update, &[StorageKey::Goals]))
    }

    /// Take-action event. Without an explicit focus the profile's primary
    /// focus is used.
    pub fn record_action<R: Rng + ?Sized>(
        &mut self,
        focus: Option<Category>,
        rng: &mut R,
        today: NaiveDate,
    ) -> Applied<ActionOutcome> {
        let focus = focus.or_else(|| self.profile.as_ref().map(|p| p.primary_focus));
        let outcome = self.store.record_action(focus, rng, today);
        self.applied(outcome, &[StorageKey::Progress])
    }

    /// Validate a check-in and append it to the check-in log.
    pub fn record_checkin(
        &mut self,
        mood: i64,
        energy: i64,
        stress: i64,
    ) -> Result<Applied<CheckinRecord>> {
        let record = self.store.record_checkin(mood, energy, stress)?;
        let warnings = self.append_checkin(&record).into_iter().collect();
        Ok(Applied {
            value: record,
            warnings,
        })
    }

    pub fn submit_reflection(
        &mut self,
        reflection: &Reflection,
        today: NaiveDate,
    ) -> Result<Applied<XpAward>> {
        let award = self.store.submit_reflection(reflection, today)?;
        Ok(self.applied(award, &[StorageKey::Progress]))
    }

    /// Start over: default progress, no profile.
    pub fn reset_tree(&mut self, today: NaiveDate) -> Applied<()> {
        self.store.reset(today);
        self.profile = None;
        self.applied(
            (),
            &[
                StorageKey::Profile,
                StorageKey::Habits,
                StorageKey::Goals,
                StorageKey::Progress,
            ],
        )
    }

    fn applied<T>(&mut self, value: T, keys: &[StorageKey]) -> Applied<T> {
        let warnings = self.persist(keys);
        Applied { value, warnings }
    }

    fn persist(&mut self, keys: &[StorageKey]) -> Vec<PersistenceWarning> {
        let (habits, goals, record) = self.store.snapshot().into_parts();
        let mut warnings = Vec::new();
        for key in keys {
            let result = match key {
                StorageKey::Profile => match &self.profile {
                    Some(profile) => write(&mut self.gateway, *key, profile),
                    None => self.gateway.remove(key.as_str()).map_err(CoreError::from),
                },
                StorageKey::Habits => write(&mut self.gateway, *key, &habits),
                StorageKey::Goals => write(&mut self.gateway, *key, &goals),
                StorageKey::Progress => write(&mut self.gateway, *key, &record),
                StorageKey::Checkins => Ok(()),
            };
            if let Err(e) = result {
                warnings.push(warning(*key, &e));
            }
        }
        warnings
    }

    fn append_checkin(&mut self, record: &CheckinRecord) -> Option<PersistenceWarning> {
        let key = StorageKey::Checkins;
        let result = self
            .gateway
            .get(key.as_str())
            .map_err(CoreError::from)
            .and_then(|existing| {
                // A log of another shape is left untouched.
                let mut log = match existing {
                    Some(serde_json::Value::Array(items)) => items,
                    Some(_) => {
                        return Err(CoreError::corrupt(
                            key.as_str(),
                            "expected an array of check-in records",
                        ))
                    }
                    None => Vec::new(),
                };
                log.push(serde_json::to_value(record)?);
                self.gateway
                    .set(key.as_str(), &serde_json::Value::Array(log))
                    .map_err(CoreError::from)
            });
        result.err().map(|e| warning(key, &e))
    }
}

fn load<T: DeserializeOwned>(
    gateway: &impl PersistenceGateway,
    key: StorageKey,
) -> Result<Option<T>> {
    let value = match gateway.get(key.as_str()) {
        Ok(Some(serde_json::Value::Null)) | Ok(None) => return Ok(None),
        Ok(Some(value)) => value,
        Err(PersistenceError::Malformed { message, .. }) => {
            return Err(CoreError::corrupt(key.as_str(), message))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| CoreError::corrupt(key.as_str(), e.to_string()))
}

fn write<T: Serialize>(
    gateway: &mut impl PersistenceGateway,
    key: StorageKey,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_value(value)?;
    gateway.set(key.as_str(), &json)?;
    Ok(())
}

fn warning(key: StorageKey, error: &CoreError) -> PersistenceWarning {
    tracing::warn!(%key, %error, "Failed to persist state; keeping in-memory copy");
    PersistenceWarning {
        key: key.to_string(),
        message: error.to_string(),
    }
}
