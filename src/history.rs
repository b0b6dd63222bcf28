use crate::canvas::CanvasSurface;
use crate::compress::{BlockCompressor, CompressError};
use thiserror::Error;
use tracing::debug;

/// Default number of snapshot slots in a drawing session's ring.
pub const DEFAULT_CAPACITY: usize = 100;

const INITIAL_SCRATCH_LEN: usize = 4096;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// A stored snapshot failed to restore. The ring's invariant is
    /// broken; callers should treat this as fatal for the session.
    #[error("history slot corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Default)]
struct HistorySlot {
    /// Backing storage grows to the largest snapshot ever held, never
    /// shrinks.
    data: Vec<u8>,
    used: usize,
}

/// Fixed-capacity ring of compressed whole-canvas snapshots.
///
/// `snapshot` is called on pointer-down with the canvas state to preserve;
/// `undo`/`redo` swap the live canvas against stored states in O(1) slot
/// arithmetic plus O(canvas) compression work. `head` tracks the most
/// recently written slot; pushes pre-increment it, so undo saves the
/// would-be redo state into the slot just ahead of the rollback target.
pub struct SnapshotRing<C> {
    slots: Vec<HistorySlot>,
    head: usize,
    undo_depth: usize,
    redo_depth: usize,
    scratch: Vec<u8>,
    compressor: C,
}

impl<C: BlockCompressor> SnapshotRing<C> {
    pub fn new(capacity: usize, compressor: C) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![HistorySlot::default(); capacity],
            head: capacity - 1,
            undo_depth: 0,
            redo_depth: 0,
            scratch: vec![0; INITIAL_SCRATCH_LEN],
            compressor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_depth
    }

    pub fn can_undo(&self) -> bool {
        self.undo_depth > 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo_depth > 0
    }

    /// Push the canvas state into the ring. Past capacity the oldest
    /// snapshot is silently overwritten; any push invalidates redo.
    pub fn snapshot(&mut self, canvas: &impl CanvasSurface) -> Result<(), HistoryError> {
        self.head = (self.head + 1) % self.slots.len();
        self.store_at_head(canvas)?;
        self.undo_depth = (self.undo_depth + 1).min(self.slots.len());
        self.redo_depth = 0;
        debug!(
            head = self.head,
            undo_depth = self.undo_depth,
            "canvas snapshot stored"
        );
        Ok(())
    }

    /// Roll the canvas back one snapshot. No-op when nothing is undoable.
    /// Returns whether the canvas changed.
    pub fn undo(
        &mut self,
        canvas: &mut (impl CanvasSurface + ?Sized),
    ) -> Result<bool, HistoryError> {
        if self.undo_depth == 0 {
            return Ok(false);
        }
        // Current canvas becomes the redo state, stored just ahead of the
        // rollback target.
        self.store_at_head(canvas)?;
        self.head = (self.head + self.slots.len() - 1) % self.slots.len();
        self.restore_slot(self.head, canvas)?;
        self.undo_depth -= 1;
        self.redo_depth = (self.redo_depth + 1).min(self.slots.len());
        debug!(
            head = self.head,
            undo_depth = self.undo_depth,
            redo_depth = self.redo_depth,
            "undo applied"
        );
        Ok(true)
    }

    /// Replay one undone snapshot. No-op when nothing is redoable.
    /// Returns whether the canvas changed.
    pub fn redo(
        &mut self,
        canvas: &mut (impl CanvasSurface + ?Sized),
    ) -> Result<bool, HistoryError> {
        if self.redo_depth == 0 {
            return Ok(false);
        }
        self.store_at_head(canvas)?;
        let next = (self.head + 1) % self.slots.len();
        self.restore_slot(next, canvas)?;
        self.head = next;
        self.redo_depth -= 1;
        self.undo_depth = (self.undo_depth + 1).min(self.slots.len());
        debug!(
            head = self.head,
            undo_depth = self.undo_depth,
            redo_depth = self.redo_depth,
            "redo applied"
        );
        Ok(true)
    }

    /// Compress the canvas into the slot at `head`, doubling the scratch
    /// buffer until the compressor accepts it. Incompressible frames cost
    /// memory, never failure.
    fn store_at_head(
        &mut self,
        canvas: &(impl CanvasSurface + ?Sized),
    ) -> Result<(), HistoryError> {
        let src = canvas.raw_bytes();
        loop {
            match self.compressor.compress(src, &mut self.scratch) {
                Ok(used) => {
                    let slot = &mut self.slots[self.head];
                    if slot.data.len() < used {
                        slot.data.resize(used, 0);
                    }
                    slot.data[..used].copy_from_slice(&self.scratch[..used]);
                    slot.used = used;
                    return Ok(());
                }
                Err(CompressError::OutputTooSmall) => {
                    let grown = (self.scratch.len() * 2).max(INITIAL_SCRATCH_LEN);
                    self.scratch.resize(grown, 0);
                }
                Err(CompressError::Corrupt(msg)) => {
                    return Err(HistoryError::Corrupt(msg));
                }
            }
        }
    }

    fn restore_slot(
        &mut self,
        index: usize,
        canvas: &mut (impl CanvasSurface + ?Sized),
    ) -> Result<(), HistoryError> {
        let slot = &self.slots[index];
        let dst = canvas.raw_bytes_mut();
        match self.compressor.decompress(&slot.data[..slot.used], dst) {
            Ok(written) if written == dst.len() => Ok(()),
            Ok(written) => Err(HistoryError::Corrupt(format!(
                "snapshot restored {written} bytes into a {} byte canvas",
                dst.len()
            ))),
            Err(err) => Err(HistoryError::Corrupt(err.to_string())),
        }
    }
}
