pub mod municipality;
pub mod table;

pub use municipality::*;
pub use table::*;
