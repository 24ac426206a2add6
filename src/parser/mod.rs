pub mod error;
pub mod explodes;
pub mod node_manip;
pub mod subparser;

pub use error::{ConvertError, DecodeError};
pub use explodes::explode;
pub use node_manip::{collect_nodes, Conversion, ConversionStats};
pub use subparser::extract_links;
