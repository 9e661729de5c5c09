//! End-to-end conversion tests
//!
//! HTML in, Delta out, through the public `convert` entry points.

mod blocks;
mod paragraphs;
mod top_level;
