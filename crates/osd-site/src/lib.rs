//! Sidebar navigation and article records for the OneStep docs site.
//!
//! This crate provides:
//! - [`Navigation`]: the sidebar as an ordered list of groups
//! - [`flatten`]: projection of the sidebar into flat [`ContentRecord`]s
//! - [`ArticleIndex`]: tag and group queries used by listing widgets
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use osd_site::{flatten, ArticleIndex, Sidebar};
//!
//! let sidebar: Sidebar = serde_json::from_str(r#"{
//!     "/": [{
//!         "text": "Broker",
//!         "items": [
//!             { "text": "Redis", "link": "/broker/redis", "tags": ["redis"] },
//!             { "text": "Custom" }
//!         ]
//!     }]
//! }"#)?;
//!
//! let records = flatten(&sidebar.into_navigation())?;
//! assert_eq!(records[0].parent_text, "Broker");
//! assert!(records[1].is_heading());
//!
//! let index = ArticleIndex::new(records);
//! assert_eq!(index.with_tag("redis").count(), 1);
//! # Ok(())
//! # }
//! ```

mod article;
mod navigation;
mod tags;

pub use article::{ContentRecord, Destination, FlattenError, flatten, flatten_nested};
pub use navigation::{
    Navigation, NavigationEntry, NavigationGroup, Sidebar, SidebarGroup, SidebarGroups,
};
pub use tags::{ArticleIndex, TagCount};
