use chrono::NaiveDate;

use crate::models::{ApplicationRecord, Filter, Status};

/// Records passing `filter`, in insertion order.
pub fn project(records: &[ApplicationRecord], filter: Filter) -> Vec<&ApplicationRecord> {
    records.iter().filter(|r| filter.matches(r.status)).collect()
}

/// Browser-style short date, e.g. `10/16/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub company: String,
    pub position: String,
    /// Only the detail rows that have a value, as (label, value).
    pub details: Vec<(&'static str, String)>,
    pub status: Status,
    pub notes: Option<String>,
}

impl Card {
    pub fn from_record(record: &ApplicationRecord) -> Self {
        let mut details = Vec::new();
        if !record.location.trim().is_empty() {
            details.push(("Location", record.location.clone()));
        }
        if !record.salary.trim().is_empty() {
            details.push(("Salary", record.salary.clone()));
        }
        if let Some(date) = record.applied_date {
            details.push(("Applied", format_date(date)));
        }

        let notes = Some(record.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Self {
            id: record.id,
            company: record.company.clone(),
            position: record.position.clone(),
            details,
            status: record.status,
            notes,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub hint: &'static str,
}

impl EmptyState {
    pub fn for_filter(filter: Filter) -> Self {
        match filter {
            Filter::All => Self {
                title: "No job applications yet!".to_string(),
                hint: "Add your first job application above to get started.",
            },
            Filter::Only(status) => Self {
                title: format!("No {} applications found!", status),
                hint: "Try a different filter or add more applications.",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Cards(Vec<Card>),
    Empty(EmptyState),
}

impl View {
    pub fn cards(&self) -> &[Card] {
        match self {
            View::Cards(cards) => cards,
            View::Empty(_) => &[],
        }
    }
}

pub fn render(records: &[ApplicationRecord], filter: Filter) -> View {
    let visible = project(records, filter);
    if visible.is_empty() {
        View::Empty(EmptyState::for_filter(filter))
    } else {
        View::Cards(visible.into_iter().map(Card::from_record).collect())
    }
}
