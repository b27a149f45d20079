pub mod user;
pub mod contribution;
pub mod stats;
pub mod render;

pub use user::*;
pub use contribution::*;
pub use stats::*;
pub use render::*;
