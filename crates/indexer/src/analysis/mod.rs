pub mod display;
pub mod extractor;
pub mod naming;
pub mod statements;
pub mod types;

pub use extractor::extract;
pub use naming::{QualifiedName, qualify};
pub use types::{CallIndex, ClassModel, Extraction, FieldModel, MethodModel, ParameterModel};
