//! Annotation overlay core: the pointer-up stroke geometry pipeline and a
//! fixed-capacity ring of compressed whole-canvas undo snapshots.
//!
//! Platform glue (input capture, window management, presentation) lives in
//! the host application; this crate only transforms finished gestures and
//! manages canvas history.

pub mod canvas;
pub mod compress;
pub mod geometry;
pub mod history;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod settings_store;

pub use canvas::{CanvasSurface, PixelCanvas};
pub use compress::{BlockCompressor, CompressError, DeflateCompressor};
pub use history::{HistoryError, SnapshotRing, DEFAULT_CAPACITY};
pub use model::{Color, PathStyle, StrokeList, StrokePoint, ToolConfig};
pub use pipeline::{OverlaySession, StrokeOutcome};
pub use render::{CanvasRenderer, StrokeRenderer};
pub use settings::OverlaySettings;
