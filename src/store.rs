use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{ApplicationRecord, NewApplication};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// In-memory application list for one session. Ids start at 1 and are never reused.
pub struct RecordStore {
    records: Vec<ApplicationRecord>,
    next_id: u64,
    clock: fn() -> NaiveDate,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_clock(today)
    }

    pub fn with_clock(clock: fn() -> NaiveDate) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn add(&mut self, fields: NewApplication) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let record = ApplicationRecord::new(id, fields, self.today());
        debug!(id, company = %record.company, status = %record.status, "stored application");
        self.records.push(record);
        id
    }

    /// Removes the record with `id`. Returns false and leaves the list alone if absent.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn all(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Imports a JSON array of applications into the session. Each entry gets
    /// a fresh id and today's `date_added`; the file is never written back.
    pub fn load_seed(&mut self, path: &Path) -> TrackerResult<usize> {
        let seed_err = |source: Box<dyn std::error::Error + Send + Sync>| TrackerError::Seed {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| seed_err(e.into()))?;
        let entries: Vec<NewApplication> =
            serde_json::from_str(&content).map_err(|e| seed_err(e.into()))?;

        for (i, entry) in entries.iter().enumerate() {
            if entry.company.trim().is_empty() {
                return Err(seed_err(format!("entry {} has no company", i + 1).into()));
            }
            if entry.position.trim().is_empty() {
                return Err(seed_err(format!("entry {} has no position", i + 1).into()));
            }
        }

        let count = entries.len();
        for entry in entries {
            self.add(entry);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn app(company: &str, status: Status) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            position: "Engineer".to_string(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut store = RecordStore::with_clock(fixed_day);
        let ids: Vec<u64> = (0..5)
            .map(|i| store.add(app(&format!("Company {}", i), Status::Applied)))
            .collect();

        assert_eq!(store.len(), 5);
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(store.all().iter().all(|r| r.date_added == fixed_day()));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = RecordStore::with_clock(fixed_day);
        store.add(app("A", Status::Applied));
        let second = store.add(app("B", Status::Applied));
        assert!(store.remove(second));

        let third = store.add(app("C", Status::Applied));
        assert_eq!(third, 3);
        let ids: Vec<u64> = store.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut store = RecordStore::with_clock(fixed_day);
        store.add(app("A", Status::Applied));
        store.add(app("B", Status::Offer));
        let before = store.all().to_vec();

        assert!(!store.remove(42));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_remove_existing_id() {
        let mut store = RecordStore::with_clock(fixed_day);
        store.add(app("A", Status::Applied));
        let id = store.add(app("B", Status::Offer));
        store.add(app("C", Status::Rejected));

        assert!(store.remove(id));
        assert_eq!(store.len(), 2);
        assert!(store.get(id).is_none());
        assert!(store.all().iter().all(|r| r.id != id));

        // second removal of the same id changes nothing
        assert!(!store.remove(id));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut store = RecordStore::with_clock(fixed_day);
        for name in ["Zeta", "Alpha", "Mid"] {
            store.add(app(name, Status::Applied));
        }
        let names: Vec<&str> = store.all().iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_load_seed() {
        let path = std::env::temp_dir().join(format!("apptrack-seed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                {"company": "Acme", "position": "SRE", "status": "interview"},
                {"company": "Globex", "position": "Platform Engineer", "salary": "$150k"}
            ]"#,
        )
        .unwrap();

        let mut store = RecordStore::with_clock(fixed_day);
        let loaded = store.load_seed(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, 2);
        assert_eq!(store.all()[0].status, Status::Interview);
        assert_eq!(store.all()[1].id, 2);
        assert_eq!(store.all()[1].salary, "$150k");
    }

    #[test]
    fn test_load_seed_rejects_missing_company() {
        let path =
            std::env::temp_dir().join(format!("apptrack-bad-seed-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"position": "SRE"}]"#).unwrap();

        let mut store = RecordStore::with_clock(fixed_day);
        let result = store.load_seed(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(TrackerError::Seed { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_seed_missing_file() {
        let mut store = RecordStore::new();
        let result = store.load_seed(Path::new("/nonexistent/apptrack/seed.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("seed.json"));
    }
}
