//! Header-only image inspection. No pixel data is decoded.
//!
//! | Piece | Module |
//! |---|---|
//! | **Byte window** (bounded prefix read) | [`window`] |
//! | **Bounds-checked reads** | `bytes` |
//! | **Signature detection** | [`signature`] |
//! | **Per-format parsers** + registry | [`parsers`] |
//! | **Resolution policy** (extension first, then sweep) | [`resolve`] |
//!
//! Everything after the window read is synchronous work over a byte slice,
//! so the parsers can be exercised without touching the filesystem.

mod bytes;
pub mod parsers;
pub mod resolve;
pub mod signature;
pub mod window;

pub use parsers::{FormatParser, PARSERS};
pub use resolve::{resolve, resolve_file};
pub use signature::detect;
pub use window::{DEFAULT_WINDOW_SIZE, FsReader, WindowReader, read_window};
