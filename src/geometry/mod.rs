//! Pointer-up geometry pipeline: every stage is a pure, single-threaded
//! transform over one gesture's stroke list.

pub mod arrow;
pub mod ortho;
pub mod simplify;
pub mod smooth;
pub mod snap;

pub use arrow::{find_arrow_anchor, ArrowAnchor, StrokeEnd};
pub use ortho::{build_sections, orthogonalize, round_corners, Section, SectionDirection};
pub use simplify::simplify;
pub use smooth::{add_points, catmull_rom};
pub use snap::snap_ends;
