use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A municipality listed on a region page.
///
/// Produced by the region page extractor and consumed once when its
/// detail page is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRef {
    /// Municipality code as printed in the region table (e.g., "529303").
    pub code: String,
    /// Municipality name (e.g., "Benešov").
    pub name: String,
    /// Absolute URL of the municipality's detail page.
    pub detail_url: String,
}

impl MunicipalityRef {
    pub fn new(code: impl Into<String>, name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            detail_url: detail_url.into(),
        }
    }
}

/// Vote counts extracted from one municipality detail page.
///
/// The three scalar counts are always present; a page missing any of them
/// never becomes a `MunicipalityResult`. Party tallies keep the order in
/// which the page lists them, and an unparsable tally is kept as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityResult {
    pub registered: i64,
    pub envelopes: i64,
    pub valid: i64,
    votes_by_party: Vec<(String, Option<i64>)>,
}

impl MunicipalityResult {
    /// Build a result from the three mandatory counts.
    ///
    /// Fails with [`ModelError::MissingField`] naming the first absent count.
    pub fn new(
        registered: Option<i64>,
        envelopes: Option<i64>,
        valid: Option<i64>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            registered: registered.ok_or(ModelError::MissingField("registered"))?,
            envelopes: envelopes.ok_or(ModelError::MissingField("envelopes"))?,
            valid: valid.ok_or(ModelError::MissingField("valid"))?,
            votes_by_party: Vec::new(),
        })
    }

    /// Record a party's vote count.
    ///
    /// A party seen twice keeps its original position; the later count wins.
    pub fn record_party(&mut self, name: impl Into<String>, votes: Option<i64>) {
        let name = name.into();
        match self.votes_by_party.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = votes,
            None => self.votes_by_party.push((name, votes)),
        }
    }

    /// Builder-style variant of [`record_party`](Self::record_party).
    pub fn with_party(mut self, name: impl Into<String>, votes: Option<i64>) -> Self {
        self.record_party(name, votes);
        self
    }

    /// Party tallies in page order.
    pub fn parties(&self) -> impl Iterator<Item = (&str, Option<i64>)> {
        self.votes_by_party.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Vote count for one party.
    ///
    /// Returns `None` both for unknown parties and for parties whose tally
    /// could not be parsed.
    pub fn votes_for(&self, party: &str) -> Option<i64> {
        self.votes_by_party
            .iter()
            .find(|(n, _)| n == party)
            .and_then(|(_, v)| *v)
    }

    pub fn party_count(&self) -> usize {
        self.votes_by_party.len()
    }
}
