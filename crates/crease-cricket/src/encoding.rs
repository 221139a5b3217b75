// Categorical label encoding shared by both models.
//
// Codes are positions in the sorted distinct vocabulary. Encoders are fit once
// on the chase dataset and then reused unchanged for the pre-match features,
// so both models share one team code space and one venue code space.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chase::ChaseRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("unseen {kind} label `{label}`")]
    UnseenLabel { kind: String, label: String },

    #[error("{kind} code {code} is outside the fitted vocabulary of {size} labels")]
    UnknownCode {
        kind: String,
        code: usize,
        size: usize,
    },
}

/// On-disk form: just the vocabulary. Re-sorted on load.
#[derive(Deserialize)]
struct EncoderFile {
    kind: String,
    classes: Vec<String>,
}

/// Bidirectional label ↔ code mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EncoderFile")]
pub struct LabelEncoder {
    kind: String,
    classes: Vec<String>,
}

impl From<EncoderFile> for LabelEncoder {
    fn from(file: EncoderFile) -> Self {
        LabelEncoder::fit(&file.kind, file.classes)
    }
}

impl LabelEncoder {
    /// Fit on `labels`: sorted, deduplicated. `kind` ("team", "venue") only
    /// labels error messages.
    pub fn fit<I, S>(kind: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        Self {
            kind: kind.to_string(),
            classes: classes.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Vocabulary in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    /// Code for `label`. Unseen labels are an error, never a default code.
    pub fn transform(&self, label: &str) -> Result<usize, EncodingError> {
        self.position(label).ok_or_else(|| EncodingError::UnseenLabel {
            kind: self.kind.clone(),
            label: label.to_string(),
        })
    }

    pub fn transform_all<'a, I>(&self, labels: I) -> Result<Vec<usize>, EncodingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().map(|l| self.transform(l)).collect()
    }

    pub fn inverse_transform(&self, code: usize) -> Result<&str, EncodingError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| EncodingError::UnknownCode {
                kind: self.kind.clone(),
                code,
                size: self.classes.len(),
            })
    }
}

/// The team and venue vocabularies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoders {
    pub teams: LabelEncoder,
    pub venues: LabelEncoder,
}

impl Encoders {
    /// Teams = chasing ∪ defending sides; venues = chase venues.
    pub fn fit_from_chase(records: &[ChaseRecord]) -> Self {
        let teams = records
            .iter()
            .flat_map(|r| [r.chasing_team.as_str(), r.defending_team.as_str()]);
        let venues = records.iter().map(|r| r.venue.as_str());
        Self {
            teams: LabelEncoder::fit("team", teams),
            venues: LabelEncoder::fit("venue", venues),
        }
    }
}
