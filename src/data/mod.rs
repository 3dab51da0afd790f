// Snapshot loading for the host binary. The engine itself never touches disk.
mod entries_io;

pub use entries_io::{load_entries, parse_entries};
