// Wide per-municipality results table.
//
// Municipalities list different parties, so the final column set is only
// known once every row is in. Rows are accumulated as-is and the party
// universe is computed when the table is rendered.

use std::collections::HashSet;

use crate::municipality::{MunicipalityRef, MunicipalityResult};

/// Leading columns present in every table, before the party columns.
pub const FIXED_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

/// One successfully processed municipality.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRow {
    code: String,
    location: String,
    result: MunicipalityResult,
}

/// Rows in municipality discovery order.
#[derive(Debug, Clone, Default)]
pub struct AggregatedTable {
    rows: Vec<TableRow>,
}

impl AggregatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, prefixed with the municipality's code and name.
    pub fn push(&mut self, municipality: &MunicipalityRef, result: MunicipalityResult) {
        self.rows.push(TableRow {
            code: municipality.code.clone(),
            location: municipality.name.clone(),
            result,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of all party names across rows, in first-seen order.
    pub fn party_columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &self.rows {
            for (party, _) in row.result.parties() {
                if seen.insert(party) {
                    columns.push(party);
                }
            }
        }
        columns
    }

    /// Full header: the fixed columns followed by every party column.
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.party_columns().into_iter().map(str::to_string))
            .collect()
    }

    /// Render every row against the full column set.
    ///
    /// Each record has exactly `header().len()` fields. A party the row does
    /// not list, or whose tally was unparsable, renders as an empty field.
    pub fn records(&self) -> Vec<Vec<String>> {
        let parties = self.party_columns();
        self.rows
            .iter()
            .map(|row| {
                let mut record = Vec::with_capacity(FIXED_COLUMNS.len() + parties.len());
                record.push(row.code.clone());
                record.push(row.location.clone());
                record.push(row.result.registered.to_string());
                record.push(row.result.envelopes.to_string());
                record.push(row.result.valid.to_string());
                for party in &parties {
                    record.push(
                        row.result
                            .votes_for(party)
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                    );
                }
                record
            })
            .collect()
    }
}
