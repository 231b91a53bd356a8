//! Time-domain preparation: segmentation and tapering windows

pub mod segmentation;
pub mod windows;

pub use segmentation::{PartialSegmentPolicy, Segmentation};
pub use windows::{HammingWindow, Symmetry};
