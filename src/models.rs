use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl Status {
    /// Lowercase name, as used on the command line and in seed files.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Applied => "applied",
            Status::Interview => "interview",
            Status::Offer => "offer",
            Status::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Status::Applied => Status::Interview,
            Status::Interview => Status::Offer,
            Status::Offer => Status::Rejected,
            Status::Rejected => Status::Applied,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Status::Applied => Status::Rejected,
            Status::Interview => Status::Applied,
            Status::Offer => Status::Interview,
            Status::Rejected => Status::Offer,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(Status::Applied),
            "interview" => Ok(Status::Interview),
            "offer" => Ok(Status::Offer),
            "rejected" => Ok(Status::Rejected),
            _ => Err(TrackerError::UnknownStatus(s.to_string())),
        }
    }
}

/// Which records the card view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Status),
}

impl Filter {
    /// Filter bar order: All first, then every status.
    pub const CHOICES: [Filter; 5] = [
        Filter::All,
        Filter::Only(Status::Applied),
        Filter::Only(Status::Interview),
        Filter::Only(Status::Offer),
        Filter::Only(Status::Rejected),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Only(status) => status.label(),
        }
    }

    pub fn matches(self, status: Status) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == status,
        }
    }

    pub fn index(self) -> usize {
        Self::CHOICES
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for Filter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Form fields of an application before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub status: Status,
    pub applied_date: Option<NaiveDate>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: u64,
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub status: Status,
    pub applied_date: Option<NaiveDate>,
    pub notes: String,
    pub date_added: NaiveDate,
}

impl ApplicationRecord {
    pub fn new(id: u64, fields: NewApplication, date_added: NaiveDate) -> Self {
        let NewApplication {
            company,
            position,
            location,
            salary,
            status,
            applied_date,
            notes,
        } = fields;
        Self {
            id,
            company,
            position,
            location,
            salary,
            status,
            applied_date,
            notes,
            date_added,
        }
    }
}
