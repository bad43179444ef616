pub mod io;
pub mod source;

pub use io::{SourceUnit, read_source_unit};
pub use source::{DirectoryFileSource, FileSource};
