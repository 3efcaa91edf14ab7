//! Resource models and their wire shapes.
//!
//! Every resource embeds a [`CmaSystem`] (`sys`) whose `type` is the single
//! discriminant used to decode it and to build [`CmaLink`]s pointing at it.

mod api_key;
mod array;
mod cma_type;
mod entry;
mod link;
mod locale;
mod metadata;
mod personal_access_token;
mod resource;
mod space;
mod system;
mod tag;

pub use api_key::CmaApiKey;
pub use array::CmaArray;
pub use cma_type::CmaType;
pub use entry::{CmaEntry, Fields};
pub use link::{CmaLink, LinkSys};
pub use locale::CmaLocale;
pub use metadata::CmaMetadata;
pub use personal_access_token::{CmaPersonalAccessToken, Scope};
pub use resource::CmaResource;
pub use space::CmaSpace;
pub use system::{CmaSystem, Resource};
pub use tag::CmaTag;
