//! Linear undo/redo history of palette snapshots.

use super::palette::Palette;

/// Default number of snapshots kept before the oldest is dropped.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Snapshot list plus cursor with standard undo/redo semantics.
///
/// Never empty, so `cursor` is always a valid index. Recording while the
/// cursor is behind the newest snapshot discards the redo tail first.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteHistory {
    snapshots: Vec<Palette>,
    cursor: usize,
    capacity: usize,
}

impl PaletteHistory {
    pub fn new(initial: Palette) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// `capacity` is raised to 1 if zero.
    pub fn with_capacity(initial: Palette, capacity: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> &Palette {
        &self.snapshots[self.cursor]
    }

    /// Record a new snapshot and make it current.
    pub fn record(&mut self, palette: Palette) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(palette);
        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back, returning the new current snapshot.
    pub fn undo(&mut self) -> Option<&Palette> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward, returning the new current snapshot.
    pub fn redo(&mut self) -> Option<&Palette> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; the initial snapshot is never dropped without a replacement.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
