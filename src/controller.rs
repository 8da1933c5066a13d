use tracing::{debug, info};

use crate::error::TrackerResult;
use crate::form::Form;
use crate::models::Filter;
use crate::stats::{aggregate, Stats};
use crate::store::RecordStore;
use crate::view::{render, View};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this job application?";
pub const ADDED_MESSAGE: &str = "Job application added successfully!";

// --- Capabilities supplied by the front-end ---

/// Blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// One-way message to the user.
pub trait Notify {
    fn notify(&mut self, message: &str);
}

pub struct Controller<C: Confirm, N: Notify> {
    store: RecordStore,
    form: Form,
    filter: Filter,
    view: View,
    stats: Stats,
    confirm: C,
    notify: N,
}

impl<C: Confirm, N: Notify> Controller<C, N> {
    pub fn new(store: RecordStore, confirm: C, notify: N) -> Self {
        let form = Form::new(store.today());
        let view = render(store.all(), Filter::All);
        let stats = aggregate(store.all());
        Self {
            store,
            form,
            filter: Filter::All,
            view,
            stats,
            confirm,
            notify,
        }
    }

    /// Initial load: date field set to today, unfiltered projection.
    pub fn init(&mut self) {
        self.form.applied_date = self.store.today().format("%Y-%m-%d").to_string();
        self.filter = Filter::All;
        self.refresh();
        info!(records = self.store.len(), "tracker ready");
    }

    fn refresh(&mut self) {
        self.view = render(self.store.all(), self.filter);
        self.stats = aggregate(self.store.all());
    }

    /// Stores the form contents. Validation failures leave store and form untouched.
    pub fn submit(&mut self) -> TrackerResult<u64> {
        let fields = self.form.to_application()?;
        let id = self.store.add(fields);
        info!(id, "application added");

        self.form.reset(self.store.today());
        self.refresh();
        self.notify.notify(ADDED_MESSAGE);
        Ok(id)
    }

    /// Deletes `id` after the user confirms. Returns whether a record was removed.
    pub fn request_delete(&mut self, id: u64) -> bool {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete cancelled");
            return false;
        }
        let company = self.store.get(id).map(|r| r.company.clone());
        let removed = self.store.remove(id);
        info!(id, ?company, removed, "application deleted");
        self.refresh();
        removed
    }

    pub fn select_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter selected");
        self.filter = filter;
        self.view = render(self.store.all(), self.filter);
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notify
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notify
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::models::{NewApplication, Status};
    use crate::view::EmptyState;
    use chrono::NaiveDate;

    struct Answer {
        reply: bool,
        asked: Vec<String>,
    }

    impl Confirm for Answer {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.asked.push(prompt.to_string());
            self.reply
        }
    }

    #[derive(Default)]
    struct Inbox(Vec<String>);

    impl Notify for Inbox {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn controller(reply: bool) -> Controller<Answer, Inbox> {
        let mut c = Controller::new(
            RecordStore::with_clock(day),
            Answer {
                reply,
                asked: Vec::new(),
            },
            Inbox::default(),
        );
        c.init();
        c
    }

    fn fill(c: &mut Controller<Answer, Inbox>, company: &str, status: Status) {
        let form = c.form_mut();
        form.company = company.to_string();
        form.position = "Engineer".to_string();
        form.status = status;
    }

    #[test]
    fn test_init_shows_generic_empty_state() {
        let c = controller(true);
        assert_eq!(c.filter(), Filter::All);
        assert_eq!(c.form().applied_date, "2026-10-16");
        assert_eq!(c.view(), &View::Empty(EmptyState::for_filter(Filter::All)));
        assert_eq!(c.stats(), Stats::default());
    }

    #[test]
    fn test_submit_adds_resets_and_notifies() {
        let mut c = controller(true);
        fill(&mut c, "Acme", Status::Interview);
        c.form_mut().notes = "call back".to_string();
        c.form_mut().applied_date = "2026-09-30".to_string();

        let id = c.submit().unwrap();
        assert_eq!(id, 1);
        assert_eq!(c.store().len(), 1);
        assert_eq!(c.view().cards()[0].company, "Acme");
        assert_eq!(c.stats().interview, 1);
        assert_eq!(c.notifier().0, vec![ADDED_MESSAGE.to_string()]);

        // form back to defaults with today's date
        assert!(c.form().company.is_empty());
        assert!(c.form().notes.is_empty());
        assert_eq!(c.form().status, Status::Applied);
        assert_eq!(c.form().applied_date, "2026-10-16");
    }

    #[test]
    fn test_invalid_submit_leaves_state_alone() {
        let mut c = controller(true);
        c.form_mut().position = "Engineer".to_string();

        let result = c.submit();
        assert!(matches!(result, Err(TrackerError::MissingField("Company"))));
        assert!(c.store().is_empty());
        assert_eq!(c.form().position, "Engineer");
        assert!(c.notifier().0.is_empty());
    }

    #[test]
    fn test_submit_keeps_selected_filter() {
        let mut c = controller(true);
        c.select_filter(Filter::Only(Status::Offer));

        fill(&mut c, "Acme", Status::Applied);
        c.submit().unwrap();
        assert_eq!(c.filter(), Filter::Only(Status::Offer));
        assert!(matches!(c.view(), View::Empty(_)));

        fill(&mut c, "Globex", Status::Offer);
        c.submit().unwrap();
        assert_eq!(c.view().cards().len(), 1);
        assert_eq!(c.view().cards()[0].company, "Globex");
        assert_eq!(c.stats().total, 2);
    }

    #[test]
    fn test_confirmed_delete_removes() {
        let mut c = controller(true);
        fill(&mut c, "Acme", Status::Rejected);
        let id = c.submit().unwrap();

        assert!(c.request_delete(id));
        assert!(c.store().is_empty());
        assert_eq!(c.stats().rejected, 0);
        assert_eq!(c.view(), &View::Empty(EmptyState::for_filter(Filter::All)));
    }

    #[test]
    fn test_cancelled_delete_changes_nothing() {
        let mut c = controller(false);
        fill(&mut c, "Acme", Status::Applied);
        let id = c.submit().unwrap();
        let before = c.view().clone();

        assert!(!c.request_delete(id));
        assert_eq!(c.store().len(), 1);
        assert_eq!(c.view(), &before);
    }

    #[test]
    fn test_delete_always_asks_first() {
        let mut c = controller(true);
        assert!(!c.request_delete(99));
        assert_eq!(c.confirm.asked, vec![DELETE_PROMPT.to_string()]);
    }

    #[test]
    fn test_select_filter_reprojects() {
        let mut store = RecordStore::with_clock(day);
        for (company, status) in [
            ("A", Status::Applied),
            ("B", Status::Offer),
            ("C", Status::Applied),
        ] {
            store.add(NewApplication {
                company: company.to_string(),
                position: "Engineer".to_string(),
                status,
                ..Default::default()
            });
        }
        let mut c = Controller::new(
            store,
            Answer {
                reply: true,
                asked: Vec::new(),
            },
            Inbox::default(),
        );
        c.init();
        assert_eq!(c.view().cards().len(), 3);

        c.select_filter(Filter::Only(Status::Applied));
        let ids: Vec<u64> = c.view().cards().iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![1, 3]);

        c.select_filter(Filter::Only(Status::Rejected));
        assert_eq!(
            c.view(),
            &View::Empty(EmptyState::for_filter(Filter::Only(Status::Rejected)))
        );
        // counters ignore the filter
        assert_eq!(c.stats().total, 3);
    }
}
