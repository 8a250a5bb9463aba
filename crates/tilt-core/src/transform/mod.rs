//! Image transformation operations.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise as displayed
//! - Origin is the top-left corner; rows grow downward
//! - Rotation is about the image centre and never modifies its input

mod rotation;

pub use rotation::{
    compute_rotated_bounds, rotate, rotate_with, try_rotate_with, CanvasBounds, RotateOptions,
};
