//! R-tree over shelf footprints.
//!
//! Answers "which shelves border this cell?" for spontaneous-purchase checks
//! without scanning the whole layout.  Footprints are stored as integer
//! bounding boxes; the squared distance from a cell to a box is `dx² + dz²`,
//! so a box at Manhattan distance exactly 1 is one at squared distance 1.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use sf_core::{Cell, ShelfId};

use crate::StoreLayout;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct ShelfEntry {
    id:  ShelfId,
    min: [i32; 2],
    max: [i32; 2],
}

impl RTreeObject for ShelfEntry {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for ShelfEntry {
    fn distance_2(&self, point: &[i32; 2]) -> i32 {
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0);
        let dz = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0);
        dx * dx + dz * dz
    }
}

// ── ShelfIndex ────────────────────────────────────────────────────────────────

pub struct ShelfIndex {
    tree: RTree<ShelfEntry>,
}

impl ShelfIndex {
    /// Index the footprints of the placed shelves.
    pub fn build(layout: &StoreLayout, placed: &[ShelfId]) -> Self {
        let entries = placed
            .iter()
            .map(|&id| {
                let shelf = layout.shelf(id);
                let far = shelf.far_corner();
                ShelfEntry { id, min: [shelf.x, shelf.z], max: [far.x, far.z] }
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Shelves whose footprint is exactly one orthogonal step from `cell`,
    /// in ascending id order.
    pub fn adjacent(&self, cell: Cell) -> Vec<ShelfId> {
        let mut ids: Vec<ShelfId> = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[cell.x, cell.z])
            .take_while(|(_, d2)| *d2 <= 1)
            .filter(|(_, d2)| *d2 == 1)
            .map(|(entry, _)| entry.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
