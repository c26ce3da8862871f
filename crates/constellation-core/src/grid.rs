use glam::Vec2;

/// Uniform 2D spatial hash grid for neighbor queries.
///
/// Uses counting sort for O(N) construction: count entries per cell -> prefix sum -> scatter.
/// Entries carry caller-chosen ids so a subset of a larger collection can be indexed.
pub struct SpatialHashGrid {
    inv_cell_size: f32,
    table_size: usize,
    /// cell_count[hash] = number of entries in bucket
    cell_count: Vec<u32>,
    /// cell_start[hash] = index where entries for this bucket begin in sorted_ids
    cell_start: Vec<u32>,
    /// Entry ids sorted by bucket
    sorted_ids: Vec<u32>,
    /// Bucket per entry (used during build)
    entry_hashes: Vec<u32>,
}

impl SpatialHashGrid {
    /// `cell_size` should be at least the largest query distance so that a
    /// 3x3 block of cells covers every candidate.
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        let table_size = table_size.max(1);
        Self {
            inv_cell_size: 1.0 / cell_size,
            table_size,
            cell_count: vec![0u32; table_size],
            cell_start: vec![0u32; table_size],
            sorted_ids: Vec::new(),
            entry_hashes: Vec::new(),
        }
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.inv_cell_size = 1.0 / cell_size;
    }

    /// Rebuild from `(id, position)` entries.
    pub fn build(&mut self, entries: &[(u32, Vec2)]) {
        let count = entries.len();
        self.sorted_ids.resize(count, 0);
        self.entry_hashes.resize(count, 0);

        self.cell_count.fill(0);

        for (i, &(_, pos)) in entries.iter().enumerate() {
            let (cx, cy) = self.cell_coords(pos);
            let h = self.hash_cell(cx, cy);
            self.entry_hashes[i] = h as u32;
            self.cell_count[h] += 1;
        }

        self.cell_start[0] = 0;
        for k in 1..self.table_size {
            self.cell_start[k] = self.cell_start[k - 1] + self.cell_count[k - 1];
        }

        // Reuse cell_count as scatter offsets
        self.cell_count.fill(0);

        for (i, &(id, _)) in entries.iter().enumerate() {
            let h = self.entry_hashes[i] as usize;
            let idx = self.cell_start[h] + self.cell_count[h];
            self.sorted_ids[idx as usize] = id;
            self.cell_count[h] += 1;
        }
    }

    /// Visit every entry in the 3x3 block of cells around `pos`.
    ///
    /// Each bucket is visited at most once even when neighboring cells hash to
    /// the same bucket, so no id is reported twice. The caller is responsible
    /// for distance checks.
    pub fn query_neighbors<F: FnMut(u32)>(&self, pos: Vec2, mut callback: F) {
        let (cx, cy) = self.cell_coords(pos);
        let mut seen = [usize::MAX; 9];
        let mut n = 0;
        for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                let h = self.hash_cell(cx.wrapping_add(dx), cy.wrapping_add(dy));
                if seen[..n].contains(&h) {
                    continue;
                }
                seen[n] = h;
                n += 1;

                let start = self.cell_start[h] as usize;
                let end = start + self.cell_count[h] as usize;
                for &id in &self.sorted_ids[start..end] {
                    callback(id);
                }
            }
        }
    }

    #[inline]
    fn hash_cell(&self, cx: i32, cy: i32) -> usize {
        let h = (cx as u32).wrapping_mul(73856093) ^ (cy as u32).wrapping_mul(19349663);
        (h as usize) % self.table_size
    }

    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
        )
    }
}
