mod port_cache;
mod render;

pub use port_cache::*;
pub use render::*;
