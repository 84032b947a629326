use anyhow::{anyhow, Result};
use rand::Rng;

use crate::matching;
use crate::models::{Job, UserMode, UserProfile};

/// Owns the job list and the user profile. Scores and profile fields are
/// only written through the methods below.
pub struct AppState {
    jobs: Vec<Job>,
    user: UserProfile,
    saved_jobs: Vec<i64>,
}

impl AppState {
    pub fn new(user: UserProfile) -> Self {
        Self {
            jobs: Vec::new(),
            user,
            saved_jobs: Vec::new(),
        }
    }

    pub fn load_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    /// Restore persisted bookmarks, dropping ids that no longer exist.
    pub fn load_saved_jobs(&mut self, ids: Vec<i64>) {
        self.saved_jobs = ids
            .into_iter()
            .filter(|id| self.jobs.iter().any(|j| j.id == *id))
            .collect();
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn saved_jobs(&self) -> &[i64] {
        &self.saved_jobs
    }

    pub fn is_saved(&self, id: i64) -> bool {
        self.saved_jobs.contains(&id)
    }

    pub fn jobs_in_category(&self, category: &str) -> Vec<&Job> {
        self.jobs.iter().filter(|j| j.category == category).collect()
    }

    /// Jobs scoring above `threshold`, best first.
    pub fn top_matches(&self, threshold: i32) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.iter().filter(|j| j.match_score > threshold).collect();
        jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        jobs
    }

    /// Rescore every job against the current profile.
    pub fn rescore<R: Rng + ?Sized>(&mut self, jitter: f64, rng: &mut R) {
        matching::calculate_match_scores(
            &mut self.jobs,
            &self.user.location,
            &self.user.skills,
            jitter,
            rng,
        );
    }

    pub fn set_location(&mut self, location: &str) {
        self.user.location = location.trim().to_string();
    }

    pub fn set_mode(&mut self, mode: UserMode) {
        self.user.mode = mode;
    }

    /// Returns true when the job is saved after the toggle.
    pub fn toggle_saved_job(&mut self, id: i64) -> Result<bool> {
        if self.job(id).is_none() {
            return Err(anyhow!("Job #{} not found", id));
        }
        if let Some(pos) = self.saved_jobs.iter().position(|s| *s == id) {
            self.saved_jobs.remove(pos);
            Ok(false)
        } else {
            self.saved_jobs.push(id);
            Ok(true)
        }
    }
}
