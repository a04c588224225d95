mod crs;
mod faults;

pub use crs::Crs;
pub use faults::{FaultLines, GEM_ACTIVE_FAULTS_URL};

#[cfg(feature = "download")]
pub use faults::{fetch_fault_lines, fetch_fault_lines_from};
