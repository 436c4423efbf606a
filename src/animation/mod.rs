//! Animation sequencing: parameters, frame timeline, caller hooks and the run driver.

pub mod params;
pub mod progress;
pub mod run;
pub mod sequence;
pub mod timeline;
