//! Source -> destination column renames for CSV ingestion.

/// Ordered `source column -> destination column` table.
///
/// When applied, only columns named in the destination set survive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMapping {
    pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new<I, S, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(s, d)| (s.into(), d.into()))
                .collect(),
        }
    }

    /// Mapping for the `clustered_projects` export.
    pub fn clustered_projects() -> Self {
        Self::new([
            ("SNo", "id"),
            ("State", "states"),
            ("Expenditure", "expenditure"),
            ("Progress", "progress"),
            ("Project_Name", "project_name"),
            ("Agency", "agency"),
            ("Dateof_Approval", "date_of_approval"),
            ("Start_Date", "start_date"),
            ("Org_DoC", "original_date_of_completion"),
            ("Rev_DoC", "revised_date_of_completion"),
            ("Org_Cost", "original_cost"),
            ("Rev_Cost", "revised_cost"),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Destination name for `source`, if mapped.
    pub fn rename(&self, source: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, d)| d.as_str())
    }

    /// Whether `column` is one of the destination names.
    pub fn is_destination(&self, column: &str) -> bool {
        self.pairs.iter().any(|(_, d)| d == column)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, d)| d.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_known_columns_only() {
        let m = ColumnMapping::clustered_projects();
        assert_eq!(m.rename("Org_DoC"), Some("original_date_of_completion"));
        assert_eq!(m.rename("org_doc"), None);
        assert!(m.is_destination("states"));
        assert!(!m.is_destination("State"));
        assert_eq!(m.destinations().count(), 12);
    }
}
