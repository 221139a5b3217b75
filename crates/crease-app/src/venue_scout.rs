// Venue scout: chase profile and top performers for one ground.

use crease_cricket::venue::VenueChaseStat;

use crate::context::{ServingContext, ViewError};

pub const TOP_PERFORMERS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct VenueReport {
    pub venue: String,
    /// `None` when no chase was recorded at the ground.
    pub chase: Option<VenueChaseStat>,
    /// Highest average runs first; empty when no per-venue data exists.
    pub top_performers: Vec<(String, f64)>,
}

/// Report for a venue from the encoder vocabulary.
pub fn scout_venue(ctx: &ServingContext, venue: &str) -> Result<VenueReport, ViewError> {
    let set = ctx.artifacts();
    set.encoders.venues.transform(venue)?;
    Ok(VenueReport {
        venue: venue.to_string(),
        chase: set.venue_chase_stats.get(venue).copied(),
        top_performers: set.venue_performance.top_performers(venue, TOP_PERFORMERS),
    })
}
