//! Archive packages: one zip of the whole backup root plus a metadata record.
pub mod metadata;
mod packager;
mod restorer;

pub use metadata::Metadata;
pub use packager::package;
pub use restorer::{Extracted, Replay, extract, replay_extensions, restore};
