pub mod index_card;
pub mod metadata;
pub mod page;
pub mod request;
pub mod slug;
pub mod variant;

pub use index_card::{CardSummaries, IndexCard};
pub use metadata::{ArxivEntry, PaperMetadata};
pub use page::GeneratedPage;
pub use request::{IssueRecord, PaperRequest};
pub use slug::{slugify, Slug};
pub use variant::{Audience, Language, Variant};
