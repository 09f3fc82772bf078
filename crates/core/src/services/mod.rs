pub mod auto_fill;
pub mod average_down;
pub mod format;
pub mod normalizer;
pub mod render;
pub mod trade;
