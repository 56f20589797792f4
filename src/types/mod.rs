pub mod ids;
pub mod operation;
pub mod response;

pub use ids::*;
pub use operation::*;
pub use response::*;
