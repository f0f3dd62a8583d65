//! Paged documentation viewer.
//!
//! Chapters listed in a JSON manifest are rendered from Markdown into
//! top-level blocks, packed into page containers and indexed by anchor.
//! The [`nav`] module keeps the current chapter in sync across scrolling,
//! the chapter menu and the URL fragment.

pub mod config;
pub mod content;
pub mod document;
pub mod export;
pub mod frame;
pub mod frontmatter;
pub mod layout;
pub mod manifest;
pub mod measure;
pub mod menu;
pub mod nav;
pub mod pagination;
pub mod registry;
pub mod script;
