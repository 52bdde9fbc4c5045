//! Nearest-location selection for bulk assignment.

use super::{Location, LocationDomainError, LocationId};
use std::collections::HashSet;

/// Default number of neighbours added by an auto-assignment.
pub const DEFAULT_NEAREST_LIMIT: usize = 10;

/// Candidate location together with its distance from the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLocation {
    /// Candidate location.
    pub location: Location,
    /// Great-circle distance from the centre in kilometres.
    pub distance_km: f64,
}

/// Outcome of merging a centre and its nearest neighbours into a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAssignment {
    /// Full selection: previous ids, then the centre, then new neighbours.
    pub selection: Vec<LocationId>,
    /// Neighbours that were added, nearest first.
    pub added: Vec<RankedLocation>,
}

/// Ranks unselected candidates by distance from `center`.
///
/// The centre itself, already-selected ids, and candidates without
/// coordinates are skipped. Equal distances keep candidate order. At most
/// `limit` entries are returned.
///
/// # Errors
///
/// Returns [`LocationDomainError::MissingCoordinates`] when the centre has
/// no coordinates.
pub fn nearest_unselected(
    center: &Location,
    candidates: &[Location],
    selected: &HashSet<LocationId>,
    limit: usize,
) -> Result<Vec<RankedLocation>, LocationDomainError> {
    let origin = center
        .coordinates()
        .ok_or_else(|| LocationDomainError::MissingCoordinates(center.id().clone()))?;

    let mut ranked: Vec<RankedLocation> = candidates
        .iter()
        .filter(|candidate| candidate.id() != center.id() && !selected.contains(candidate.id()))
        .filter_map(|candidate| {
            candidate.coordinates().map(|point| RankedLocation {
                location: candidate.clone(),
                distance_km: origin.distance_km(point),
            })
        })
        .collect();

    // `sort_by` is stable, so ties keep source order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);
    Ok(ranked)
}

/// Selects `center` plus its `limit` nearest unselected neighbours and merges
/// them into `selected`.
///
/// # Errors
///
/// Returns [`LocationDomainError::MissingCoordinates`] when the centre has
/// no coordinates.
pub fn auto_assign(
    center: &Location,
    candidates: &[Location],
    selected: &[LocationId],
    limit: usize,
) -> Result<AutoAssignment, LocationDomainError> {
    let already: HashSet<LocationId> = selected.iter().cloned().collect();
    let added = nearest_unselected(center, candidates, &already, limit)?;

    let mut seen = HashSet::with_capacity(selected.len() + added.len() + 1);
    let selection = selected
        .iter()
        .chain(std::iter::once(center.id()))
        .chain(added.iter().map(|ranked| ranked.location.id()))
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect();

    Ok(AutoAssignment { selection, added })
}
