use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::domain::memory_model::job::job::Job;
use crate::domain::memory_model::utils::id::JobId;
use crate::error::{Error, Result};

new_key_type! {
    pub struct JobKey;
}

/// Owns the jobs of one simulation run.
#[derive(Debug, Clone, Default)]
pub struct JobSet {
    /// Job storage.
    slots: SlotMap<JobKey, Job>,

    /// Index lookup of the internal key using the input id.
    id_index: HashMap<JobId, JobKey>,

    /// Keys in load order.
    order: Vec<JobKey>,
}

impl JobSet {
    pub fn new() -> Self {
        Self { slots: SlotMap::with_key(), id_index: HashMap::new(), order: Vec::new() }
    }

    /// Adds a job after validating its static attributes.
    ///
    /// # Returns
    /// The internal key of the job.
    pub fn add(&mut self, job: Job) -> Result<JobKey> {
        if job.size <= 0 || job.duration <= 0 || job.arrival_time < 0 {
            return Err(Error::ModelConstructionError(format!(
                "Job {} has invalid attributes: size = {}, duration = {}, arrival = {}.",
                job.id, job.size, job.duration, job.arrival_time
            )));
        }

        if job.arrival_time.checked_add(job.duration).is_none() {
            return Err(Error::ModelConstructionError(format!(
                "Job {} cannot finish: arrival {} + duration {} overflows the time range.",
                job.id, job.arrival_time, job.duration
            )));
        }

        if self.id_index.contains_key(&job.id) {
            return Err(Error::ModelConstructionError(format!("Duplicate job id {}.", job.id)));
        }

        let id = job.id;
        let key = self.slots.insert(job);
        self.id_index.insert(id, key);
        self.order.push(key);

        Ok(key)
    }

    pub fn get(&self, key: JobKey) -> Option<&Job> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: JobKey) -> Option<&mut Job> {
        self.slots.get_mut(key)
    }

    pub fn get_by_id(&self, id: JobId) -> Option<&Job> {
        let key = self.id_index.get(&id)?;
        self.slots.get(*key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in load order.
    pub fn keys(&self) -> impl Iterator<Item = JobKey> + '_ {
        self.order.iter().copied()
    }

    /// Jobs in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.order.iter().filter_map(|key| self.slots.get(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id_and_key() {
        let mut jobs = JobSet::new();
        let key = jobs.add(Job::new(JobId::new(5), 10, 2, 0)).unwrap();

        assert_eq!(jobs.get(key).map(|job| job.id), Some(JobId::new(5)));
        assert_eq!(jobs.get_by_id(JobId::new(5)).map(|job| job.size), Some(10));
        assert!(jobs.get_by_id(JobId::new(6)).is_none());
    }

    #[test]
    fn iteration_keeps_load_order() {
        let mut jobs = JobSet::new();
        for id in [3, 1, 2] {
            jobs.add(Job::new(JobId::new(id), 1, 1, 0)).unwrap();
        }

        let ids: Vec<u64> = jobs.iter().map(|job| job.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn rejects_duplicates_and_invalid_jobs() {
        let mut jobs = JobSet::new();
        jobs.add(Job::new(JobId::new(1), 10, 1, 0)).unwrap();

        assert!(jobs.add(Job::new(JobId::new(1), 10, 1, 0)).is_err());
        assert!(jobs.add(Job::new(JobId::new(2), 0, 1, 0)).is_err());
        assert!(jobs.add(Job::new(JobId::new(3), 10, 0, 0)).is_err());
        assert!(jobs.add(Job::new(JobId::new(4), 10, 1, -1)).is_err());
        assert!(matches!(jobs.add(Job::new(JobId::new(5), 5, 2, i64::MAX - 1)), Err(Error::ModelConstructionError(_))));
        assert_eq!(jobs.len(), 1);
    }
}
