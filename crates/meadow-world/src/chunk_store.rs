use crate::chunk::{Chunk, ChunkStats};
use meadow_core::math::chebyshev;
use meadow_core::ChunkCoord;
use std::collections::HashMap;

/// Resident chunks keyed by chunk coordinate.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    /// Insert a generated chunk. An existing chunk at the same coordinate is
    /// kept; chunks are never regenerated in place.
    pub fn insert(&mut self, chunk: Chunk) -> bool {
        match self.chunks.entry(chunk.coord()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(chunk);
                true
            }
        }
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn remove(&mut self, coord: &ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(coord)
    }

    /// Drop every chunk farther than `max_distance` (Chebyshev) from `center`.
    /// Returns how many were dropped.
    pub fn retain_within(&mut self, center: ChunkCoord, max_distance: u32) -> u32 {
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| chebyshev(*coord, center) <= max_distance);
        (before - self.chunks.len()) as u32
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Iterator over all resident chunks (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    /// Resident coordinates, sorted row-major for stable output.
    pub fn sorted_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    pub fn loaded_count(&self) -> u32 {
        self.chunks.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Object counts summed over every resident chunk.
    pub fn total_stats(&self) -> ChunkStats {
        let mut total = ChunkStats::default();
        for chunk in self.chunks.values() {
            total.accumulate(&chunk.stats());
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Occupancy;
    use glam::IVec2;

    fn empty_chunk(x: i32, y: i32) -> Chunk {
        Chunk::new(IVec2::new(x, y), Vec::new(), Occupancy::new())
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = ChunkStore::new();
        assert!(store.insert(empty_chunk(2, 3)));
        assert!(!store.insert(empty_chunk(2, 3)));
        assert_eq!(store.loaded_count(), 1);
        assert!(store.contains(&IVec2::new(2, 3)));
    }

    #[test]
    fn test_retain_within_drops_far_chunks() {
        let mut store = ChunkStore::new();
        for y in -4..=4 {
            for x in -4..=4 {
                store.insert(empty_chunk(x, y));
            }
        }
        assert_eq!(store.loaded_count(), 81);

        let dropped = store.retain_within(IVec2::new(1, 0), 3);
        // Keeps x in [-2, 4] (7 columns) and y in [-3, 3] (7 rows).
        assert_eq!(store.loaded_count(), 49);
        assert_eq!(dropped, 32);
        for (coord, _) in store.iter() {
            assert!(chebyshev(*coord, IVec2::new(1, 0)) <= 3);
        }
    }

    #[test]
    fn test_sorted_coords_row_major() {
        let mut store = ChunkStore::new();
        store.insert(empty_chunk(1, 1));
        store.insert(empty_chunk(0, 1));
        store.insert(empty_chunk(5, -1));
        assert_eq!(
            store.sorted_coords(),
            vec![IVec2::new(5, -1), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = ChunkStore::new();
        store.insert(empty_chunk(0, 0));
        store.insert(empty_chunk(1, 0));
        assert!(store.remove(&IVec2::new(0, 0)).is_some());
        assert!(store.get(&IVec2::new(0, 0)).is_none());
        store.clear();
        assert!(store.is_empty());
    }
}
