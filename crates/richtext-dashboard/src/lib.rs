//! richtext-dashboard - role-scoped record collections for the dashboard
//!
//! Holds the client-side state around rich-text records: one [`Collection`]
//! per entity type backed by a [`Repository`], and the role rules that decide
//! which records a signed-in account may see.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Block, Document, Inline};
//! use richtext_dashboard::{can_view, Actor, Reading, Role};
//!
//! let reading = Reading {
//!     id: 1,
//!     title: "Aman di Sekolah".to_string(),
//!     content: Document::from(vec![Block::paragraph(vec![Inline::text("Halo")])]),
//!     writer: "Admin".to_string(),
//!     school: Some(3),
//!     image: None,
//!     created_at: None,
//!     updated_at: None,
//! };
//!
//! let teacher = Actor::new(7, Role::Teacher).with_school(3);
//! assert!(can_view(&teacher, &reading));
//! assert!(!can_view(&Actor::new(8, Role::User), &reading));
//! ```

mod access;
mod records;
mod store;

pub use access::{can_view, visible, Actor, Role, SchoolId, SchoolScoped};
pub use records::{Reading, ReadingDraft, School, SchoolStatus};
pub use store::{Collection, Entity, Repository, Result, StoreError};
