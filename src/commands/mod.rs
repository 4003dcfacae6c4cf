pub mod info;
pub mod list;
pub mod resume;

pub use info::*;
pub use list::*;
pub use resume::*;
