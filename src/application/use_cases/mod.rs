pub mod access;
pub mod circle;
