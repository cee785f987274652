#![deny(unsafe_code)]

mod logging;
mod shapes;
mod text;

pub use logging::init_tracing;
pub use shapes::{disk_labels, ellipsoid_labels};
pub use text::{print_records, render_overlay_2d};
