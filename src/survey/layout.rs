//! Survey column naming conventions
//!
//! Scalar answers have fixed column names. Repeated groups are numbered
//! `1..=N`, where N comes from `GroupCounts`.

use super::date::build_date;
use super::error::InputError;
use super::row::Row;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UFID: &str = "uf_id_number";
pub const LAST_NAME: &str = "last_name";
pub const ERA_COMMONS_ID: &str = "era_commons_id";
pub const RESEARCH_OVERVIEW: &str = "expert_1_overv";

/// How many instances of each repeated group the survey carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupCounts {
    pub awards: usize,
    pub degrees: usize,
    pub patents: usize,
    pub roles: usize,
    pub expertise: usize,
    pub focus: usize,
}

impl Default for GroupCounts {
    fn default() -> Self {
        Self {
            awards: 9,
            degrees: 4,
            patents: 9,
            roles: 9,
            expertise: 2,
            focus: 2,
        }
    }
}

/// `<prefix>_y`, `<prefix>_m`, `<prefix>_d`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumns {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateColumns {
    fn new(prefix: &str) -> Self {
        Self {
            year: format!("{prefix}_y"),
            month: format!("{prefix}_m"),
            day: format!("{prefix}_d"),
        }
    }

    pub fn read(&self, row: &Row) -> Option<NaiveDate> {
        build_date(row.field(&self.year), row.field(&self.month), row.field(&self.day))
    }

    fn names(&self) -> [&str; 3] {
        [&self.year, &self.month, &self.day]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardColumns {
    pub index: usize,
    /// Presence field
    pub sponsor: String,
    pub name: String,
    pub start: DateColumns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeColumns {
    pub index: usize,
    /// Presence field, a degree code
    pub choice: String,
    pub institution: String,
    pub field: String,
    pub date: DateColumns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatentColumns {
    pub index: usize,
    /// Presence field
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleColumns {
    pub index: usize,
    /// Presence field, a service role code
    pub code: String,
    pub journal: String,
    pub start: DateColumns,
    pub end: DateColumns,
}

/// Every column a survey file must carry
#[derive(Debug, Clone)]
pub struct SurveyLayout {
    awards: Vec<AwardColumns>,
    degrees: Vec<DegreeColumns>,
    patents: Vec<PatentColumns>,
    roles: Vec<RoleColumns>,
    expertise: Vec<String>,
    focus: Vec<String>,
}

impl SurveyLayout {
    pub fn new(counts: GroupCounts) -> Self {
        Self {
            awards: (1..=counts.awards)
                .map(|i| AwardColumns {
                    index: i,
                    sponsor: format!("award_{i}_sponsor"),
                    name: format!("award_{i}_name"),
                    start: DateColumns::new(&format!("award_{i}_start")),
                })
                .collect(),
            degrees: (1..=counts.degrees)
                .map(|i| DegreeColumns {
                    index: i,
                    choice: format!("degree_choice_{i}"),
                    institution: format!("deg_{i}_inst"),
                    field: format!("deg_{i}_field"),
                    date: DateColumns::new(&format!("deg_{i}_date")),
                })
                .collect(),
            patents: (1..=counts.patents)
                .map(|i| PatentColumns {
                    index: i,
                    number: format!("patent_{i}_number"),
                })
                .collect(),
            roles: (1..=counts.roles)
                .map(|i| RoleColumns {
                    index: i,
                    code: format!("roles_{i}_yn"),
                    journal: format!("roles_{i}_journal"),
                    start: DateColumns::new(&format!("roles_{i}_start")),
                    end: DateColumns::new(&format!("roles_{i}_end")),
                })
                .collect(),
            expertise: (1..=counts.expertise).map(|i| format!("expert_{i}")).collect(),
            focus: (1..=counts.focus).map(|i| format!("focus_{i}_country")).collect(),
        }
    }

    pub fn awards(&self) -> &[AwardColumns] {
        &self.awards
    }

    pub fn degrees(&self) -> &[DegreeColumns] {
        &self.degrees
    }

    pub fn patents(&self) -> &[PatentColumns] {
        &self.patents
    }

    pub fn roles(&self) -> &[RoleColumns] {
        &self.roles
    }

    pub fn expertise(&self) -> &[String] {
        &self.expertise
    }

    pub fn focus(&self) -> &[String] {
        &self.focus
    }

    /// All expected column names, in survey order
    pub fn expected_columns(&self) -> Vec<&str> {
        let mut cols = vec![UFID, LAST_NAME, ERA_COMMONS_ID];
        for award in &self.awards {
            cols.extend([award.sponsor.as_str(), award.name.as_str()]);
            cols.extend(award.start.names());
        }
        for degree in &self.degrees {
            cols.extend([
                degree.choice.as_str(),
                degree.institution.as_str(),
                degree.field.as_str(),
            ]);
            cols.extend(degree.date.names());
        }
        cols.push(RESEARCH_OVERVIEW);
        cols.extend(self.expertise.iter().map(String::as_str));
        cols.extend(self.focus.iter().map(String::as_str));
        cols.extend(self.patents.iter().map(|p| p.number.as_str()));
        for role in &self.roles {
            cols.extend([role.code.as_str(), role.journal.as_str()]);
            cols.extend(role.start.names());
            cols.extend(role.end.names());
        }
        cols
    }

    /// Fail if any expected column is missing from `present`
    pub fn validate<'a>(&self, present: impl IntoIterator<Item = &'a str>) -> Result<(), InputError> {
        let present: std::collections::HashSet<&str> = present.into_iter().collect();
        let missing: Vec<String> = self
            .expected_columns()
            .into_iter()
            .filter(|c| !present.contains(c))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(InputError::MissingColumns(missing))
        }
    }
}

impl Default for SurveyLayout {
    fn default() -> Self {
        Self::new(GroupCounts::default())
    }
}
