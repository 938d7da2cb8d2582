pub mod classifier;
pub mod parser;
pub mod rules;
pub mod state;

pub use classifier::{LineClassifier, LineType};
pub use parser::{PlaylistParser, parse};
pub use state::ParserState;
