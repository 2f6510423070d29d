//! Input acquisition and cleaning.
//!
//! Resolves which CSV to read, parses it into a raw table and
//! cleans it into the typed table every later step works on.

pub mod clean;
pub mod source;
pub mod table;

pub use clean::clean;
pub use source::{load, resolve_source};
pub use table::{CampaignRow, CampaignTable, RawTable, TablePreview};
