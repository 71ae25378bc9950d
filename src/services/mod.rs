pub mod asset_provisioner;
pub mod field_extractor;
pub mod identifier;
pub mod index_merger;
pub mod metadata_service;
pub mod page_writer;
pub mod prompt_handoff;
pub mod synthesizer;

pub use asset_provisioner::{AssetProvisioner, ProvisionReport};
pub use field_extractor::{parse_issue, parse_issue_body};
pub use identifier::find_arxiv_id;
pub use index_merger::{IndexDocument, IndexMerger, MergeOutcome};
pub use metadata_service::{MetadataService, PaperSource};
pub use page_writer::PageWriter;
pub use prompt_handoff::{render_handoff, write_handoff, HandoffInput};
pub use synthesizer::{ContentSynthesizer, PageInput};
