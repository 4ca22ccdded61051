//! Wire protocol subset used by the probe.
//!
//! Only what a status check needs is implemented: an inline `AUTH`, an
//! inline `INFO`, reply header parsing and bulk string bodies.
//!
//! ```text
//! client                                server
//!   │ AUTH "<password>"\r\n  ───────────▶ │   (only with a password)
//!   │ ◀─────────── +OK\r\n | -ERR ...\r\n  │
//!   │ INFO\r\n               ───────────▶ │
//!   │ ◀──────── $<len>\r\n<len bytes>\r\n  │
//! ```

mod bulk;
mod client;
mod error;
mod reply;

pub use bulk::{read_bulk, read_bulk_with_step, INITIAL_BUFFER_SIZE, MAX_GROWTH_STEP};
pub use client::{
    auth_command, fetch_info, info_command, Client, CRLF, MAX_BULK_LEN, MAX_REPLY_LINE,
};
pub use error::{ProbeError, ProbeResult};
pub use reply::Reply;
