// Review document generation: tolerant request parsing, text normalization,
// template section location and rebuild, and the POST /generate handler.
// Document work is file I/O plus CPU and runs inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod locator;
pub mod normalize;
pub mod payload;
pub mod rebuilder;
pub mod renderer;
pub mod sections;

pub use locator::HeadingStyles;
