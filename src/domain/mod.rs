//! Domain data shapes shared across layers.

pub mod catalog;
pub mod category;
pub mod menu_item;
pub mod seed;
pub mod session;

pub use catalog::Catalog;
pub use category::Category;
pub use menu_item::{ItemRef, MenuItem, MenuItemDraft, StagingField};
pub use seed::{seed_catalog, seed_item_id};
pub use session::{Role, Session, User};
