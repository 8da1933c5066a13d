use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{NewApplication, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Company,
    Position,
    Location,
    Salary,
    Status,
    AppliedDate,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Company,
        FormField::Position,
        FormField::Location,
        FormField::Salary,
        FormField::Status,
        FormField::AppliedDate,
        FormField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Company => "Company",
            FormField::Position => "Position",
            FormField::Location => "Location",
            FormField::Salary => "Salary",
            FormField::Status => "Status",
            FormField::AppliedDate => "Applied Date",
            FormField::Notes => "Notes",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, FormField::Company | FormField::Position)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or_default();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or_default();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw field values as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub status: Status,
    pub applied_date: String,
    pub notes: String,
}

impl Form {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            location: String::new(),
            salary: String::new(),
            status: Status::default(),
            applied_date: today.format("%Y-%m-%d").to_string(),
            notes: String::new(),
        }
    }

    /// Clears every field and puts the applied date back to `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Editable text behind `field`; `None` for the status selector.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Company => Some(&mut self.company),
            FormField::Position => Some(&mut self.position),
            FormField::Location => Some(&mut self.location),
            FormField::Salary => Some(&mut self.salary),
            FormField::Status => None,
            FormField::AppliedDate => Some(&mut self.applied_date),
            FormField::Notes => Some(&mut self.notes),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Company => &self.company,
            FormField::Position => &self.position,
            FormField::Location => &self.location,
            FormField::Salary => &self.salary,
            FormField::Status => self.status.label(),
            FormField::AppliedDate => &self.applied_date,
            FormField::Notes => &self.notes,
        }
    }

    pub fn to_application(&self) -> TrackerResult<NewApplication> {
        let company = self.company.trim();
        if company.is_empty() {
            return Err(TrackerError::MissingField("Company"));
        }
        let position = self.position.trim();
        if position.is_empty() {
            return Err(TrackerError::MissingField("Position"));
        }

        let date = self.applied_date.trim();
        let applied_date = if date.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| TrackerError::InvalidDate(date.to_string()))?,
            )
        };

        Ok(NewApplication {
            company: company.to_string(),
            position: position.to_string(),
            location: self.location.trim().to_string(),
            salary: self.salary.trim().to_string(),
            status: self.status,
            applied_date,
            notes: self.notes.trim().to_string(),
        })
    }
}
