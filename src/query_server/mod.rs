//! Line-oriented query server
//!
//! Lets a host database engine drive the view over stdin/stdout, one
//! document per `map_doc` request.

mod protocol;
mod session;

pub use protocol::{error_reply, input_lines, log_reply, InputLines, OnMapError, ProtocolError, Request};
pub use session::ViewServer;
