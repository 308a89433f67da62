pub mod patch;

pub use patch::{apply_text_patch, deserialize_patch, text_patch, Patch};
