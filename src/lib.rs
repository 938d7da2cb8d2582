pub mod check;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod hls;
pub mod logging;
pub mod monitor;
pub mod parse;

pub use error::{Error, LineError, ParseError};
pub type Result<T> = std::result::Result<T, Error>;

pub use fetch::fetch_and_parse;
pub use parse::parse;
