pub mod header;
pub mod reader;
pub mod writer;

pub use header::{MatrixHeader, ELEMENT_BYTES, HEADER_BYTES};
pub use reader::{read_matrix, MatrixFile};
pub use writer::{write_matrix, write_to};
