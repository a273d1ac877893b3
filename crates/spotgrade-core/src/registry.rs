//! Ordered collection of spots and the active-spot pointer.

use std::collections::HashSet;

use glam::IVec2;

use crate::error::SpotError;
use crate::spot::{Spot, SpotId};

/// Owns every spot of a document, in insertion order.
///
/// Invariants, checked after every mutation: ids are unique and the active
/// id, when set, names a spot in the registry. A violation is a bug and
/// panics.
#[derive(Debug, Clone, Default)]
pub struct SpotRegistry {
    spots: Vec<Spot>,
    active: Option<SpotId>,
    next_id: u32,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new spot centered on `initial_center` and return its id.
    /// The active spot is left unchanged.
    pub fn add(&mut self, initial_center: IVec2) -> SpotId {
        self.next_id += 1;
        let id = SpotId(self.next_id);
        self.spots.push(Spot::new(id, initial_center));
        tracing::debug!("added {id} at {initial_center}");
        self.check_invariants();
        id
    }

    /// Remove a spot. Clears the active id if it pointed at it.
    pub fn remove(&mut self, id: SpotId) -> Result<Spot, SpotError> {
        let index = self.index_of(id)?;
        let spot = self.spots.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!("removed {id}");
        self.check_invariants();
        Ok(spot)
    }

    pub fn set_active(&mut self, id: SpotId) -> Result<(), SpotError> {
        self.index_of(id)?;
        self.active = Some(id);
        self.check_invariants();
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<SpotId> {
        self.active
    }

    /// The active spot, if any.
    pub fn active(&self) -> Option<&Spot> {
        self.active.and_then(|id| self.get(id).ok())
    }

    pub fn get(&self, id: SpotId) -> Result<&Spot, SpotError> {
        self.spots
            .iter()
            .find(|s| s.id == id)
            .ok_or(SpotError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: SpotId) -> Result<&mut Spot, SpotError> {
        self.spots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SpotError::NotFound(id))
    }

    /// Every spot, in insertion order.
    pub fn all(&self) -> &[Spot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Spots the processing engine applies, in registry order. Later spots
    /// overlay earlier ones.
    pub fn processing_order(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter().filter(|s| s.is_processed())
    }

    fn index_of(&self, id: SpotId) -> Result<usize, SpotError> {
        self.spots
            .iter()
            .position(|s| s.id == id)
            .ok_or(SpotError::NotFound(id))
    }

    fn check_invariants(&self) {
        let mut seen = HashSet::with_capacity(self.spots.len());
        for spot in &self.spots {
            assert!(seen.insert(spot.id), "duplicate {} in registry", spot.id);
        }
        if let Some(active) = self.active {
            assert!(seen.contains(&active), "active {active} is not in the registry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order_and_active() {
        let mut reg = SpotRegistry::new();
        let a = reg.add(IVec2::new(1, 1));
        let b = reg.add(IVec2::new(2, 2));
        assert_ne!(a, b);
        assert_eq!(reg.all().iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(reg.active_id(), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut reg = SpotRegistry::new();
        let a = reg.add(IVec2::ZERO);
        reg.remove(a).expect("spot exists");
        let b = reg.add(IVec2::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_active_clears_it() {
        let mut reg = SpotRegistry::new();
        let a = reg.add(IVec2::ZERO);
        let b = reg.add(IVec2::ZERO);
        reg.set_active(a).expect("spot exists");

        reg.remove(b).expect("spot exists");
        assert_eq!(reg.active_id(), Some(a));
        reg.remove(a).expect("spot exists");
        assert_eq!(reg.active_id(), None);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut reg = SpotRegistry::new();
        let a = reg.add(IVec2::ZERO);
        let ghost = SpotId(99);
        assert_eq!(reg.remove(ghost), Err(SpotError::NotFound(ghost)));
        assert_eq!(reg.set_active(ghost), Err(SpotError::NotFound(ghost)));
        assert!(reg.get(ghost).is_err());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(a).map(|s| s.id), Ok(a));
    }

    #[test]
    fn test_processing_order_skips_hidden_and_excluded() {
        let mut reg = SpotRegistry::new();
        let a = reg.add(IVec2::ZERO);
        let b = reg.add(IVec2::ZERO);
        let c = reg.add(IVec2::ZERO);
        reg.get_mut(a).expect("spot exists").is_excluded = true;
        reg.get_mut(b).expect("spot exists").is_visible = false;

        let order: Vec<_> = reg.processing_order().map(|s| s.id).collect();
        assert_eq!(order, vec![c]);
    }
}
