//! Sites, factions and the read-only world snapshot
//!
//! These are owned by the simulation that decides ownership. The engine only
//! reads them.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shapes::Rgb;

/// Identifier of a site (e.g. a star)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u32);

/// Identifier of a faction
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactionId(pub u32);

/// A point on the map with optional faction ownership
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub location: DVec2,
    /// Owning faction, `None` when unowned
    pub owner: Option<FactionId>,
}

impl Site {
    pub fn new(id: u32, x: f64, y: f64, owner: Option<FactionId>) -> Self {
        Self {
            id: SiteId(id),
            location: DVec2::new(x, y),
            owner,
        }
    }

    /// Create an unowned site
    pub fn unowned(id: u32, x: f64, y: f64) -> Self {
        Self::new(id, x, y, None)
    }

    /// Create a site owned by `owner`
    pub fn owned(id: u32, x: f64, y: f64, owner: FactionId) -> Self {
        Self::new(id, x, y, Some(owner))
    }
}

/// An ownership category with a display color
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Faction {
    pub id: FactionId,
    pub color: Rgb,
}

impl Faction {
    pub fn new(id: u32, color: Rgb) -> Self {
        Self {
            id: FactionId(id),
            color,
        }
    }
}

/// Position of `owner` in the faction list
///
/// Owners missing from the list count as unowned so a stale reference
/// cannot blank the whole map.
pub fn faction_index(factions: &[Faction], owner: Option<FactionId>) -> Option<usize> {
    let owner = owner?;
    let index = factions.iter().position(|f| f.id == owner);
    if index.is_none() {
        log::debug!("owner {:?} not in faction list, treating as unowned", owner);
    }
    index
}

/// Read-only source data bound to the territory layer
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    /// Sites in input order (order breaks nearest-site ties)
    pub sites: Vec<Site>,
    /// Factions in painter's order
    pub factions: Vec<Faction>,
}

impl WorldSnapshot {
    pub fn new(sites: Vec<Site>, factions: Vec<Faction>) -> Self {
        Self { sites, factions }
    }
}
