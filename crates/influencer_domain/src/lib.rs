mod capability;
mod generation;
mod model;
mod preset;
mod summary;

pub use capability::*;
pub use generation::*;
pub use model::*;
pub use preset::*;
pub use summary::*;
