//! Pointer input driving the model's rotation.

/// Cursor-to-angle mapping and the eased rotation tween.
pub mod pointer_rotation;
