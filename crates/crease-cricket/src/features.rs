// Feature rows for the two models, built from names through the shared encoders.

use crate::encoding::{EncodingError, Encoders};

/// Inputs to the pre-match model: (team1, team2, venue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreMatchFeatures {
    pub team1: usize,
    pub team2: usize,
    pub venue: usize,
}

impl PreMatchFeatures {
    pub fn encode(
        encoders: &Encoders,
        team1: &str,
        team2: &str,
        venue: &str,
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            team1: encoders.teams.transform(team1)?,
            team2: encoders.teams.transform(team2)?,
            venue: encoders.venues.transform(venue)?,
        })
    }

    pub fn to_row(self) -> Vec<f64> {
        vec![self.team1 as f64, self.team2 as f64, self.venue as f64]
    }
}

/// Inputs to the chase model: (chasing, defending, venue, target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseFeatures {
    pub chasing: usize,
    pub defending: usize,
    pub venue: usize,
    pub target: u32,
}

impl ChaseFeatures {
    pub fn encode(
        encoders: &Encoders,
        chasing: &str,
        defending: &str,
        venue: &str,
        target: u32,
    ) -> Result<Self, EncodingError> {
        Ok(Self {
            chasing: encoders.teams.transform(chasing)?,
            defending: encoders.teams.transform(defending)?,
            venue: encoders.venues.transform(venue)?,
            target,
        })
    }

    pub fn to_row(self) -> Vec<f64> {
        vec![
            self.chasing as f64,
            self.defending as f64,
            self.venue as f64,
            f64::from(self.target),
        ]
    }
}
