pub mod relationship;
pub mod session;

pub use relationship::{NodeLabel, RelationshipType};
pub use session::{GraphSession, ParamValue, QueryParams};
