use super::{require, require_version, ModuleContext, HEADER_VERSION};
use crate::callback::{CallHandle, Callback};
use crate::error::Result;
use crate::model::{CmaArray, CmaTag, Resource};
use crate::query::{DefaultQueryParameter, Query};
use std::sync::Arc;

mod service {
    use super::*;
    use crate::endpoint::Endpoint;

    fn path<'a>(space_id: &'a str, environment_id: &'a str) -> Vec<&'a str> {
        vec!["spaces", space_id, "environments", environment_id, "tags"]
    }

    pub fn fetch_all(space_id: &str, environment_id: &str, query: Query) -> Endpoint<CmaArray<CmaTag>> {
        Endpoint::get(path(space_id, environment_id)).query(query)
    }

    pub fn fetch_one(space_id: &str, environment_id: &str, tag_id: &str) -> Endpoint<CmaTag> {
        let mut segments = path(space_id, environment_id);
        segments.push(tag_id);
        Endpoint::get(segments)
    }

    pub fn create(space_id: &str, environment_id: &str, tag_id: &str, tag: &CmaTag) -> Result<Endpoint<CmaTag>> {
        let mut segments = path(space_id, environment_id);
        segments.push(tag_id);
        Endpoint::put(segments).json(tag)
    }

    pub fn update(
        version: i64,
        space_id: &str,
        environment_id: &str,
        tag_id: &str,
        tag: &CmaTag,
    ) -> Result<Endpoint<CmaTag>> {
        let mut segments = path(space_id, environment_id);
        segments.push(tag_id);
        Endpoint::put(segments).header(HEADER_VERSION, version).json(tag)
    }

    pub fn delete(version: i64, space_id: &str, environment_id: &str, tag_id: &str) -> Endpoint<()> {
        let mut segments = path(space_id, environment_id);
        segments.push(tag_id);
        Endpoint::delete(segments).header(HEADER_VERSION, version)
    }
}

/// Tag operations of an environment
#[derive(Debug, Clone)]
pub struct ModuleTags {
    ctx: Arc<ModuleContext>,
}

impl ModuleTags {
    pub(crate) fn new(ctx: Arc<ModuleContext>) -> Self {
        ModuleTags { ctx }
    }

    /// Use all operations of this module asynchronously
    pub fn async_api(&self) -> AsyncTags {
        AsyncTags {
            module: self.clone(),
        }
    }

    /// Fetch all tags of the configured space and environment
    ///
    /// # Errors
    /// `Validation` if the client has no space or environment configured
    pub fn fetch_all_configured(&self) -> Result<CmaArray<CmaTag>> {
        self.fetch_all_configured_with(Query::new())
    }

    /// Fetch tags of the configured space and environment matching a query
    pub fn fetch_all_configured_with(&self, query: Query) -> Result<CmaArray<CmaTag>> {
        let space_id = self.ctx.configured_space_id()?;
        let environment_id = self.ctx.configured_environment_id()?;
        self.fetch_all_with(space_id, environment_id, query)
    }

    /// Fetch all tags of the given space and environment
    pub fn fetch_all(&self, space_id: &str, environment_id: &str) -> Result<CmaArray<CmaTag>> {
        self.fetch_all_with(space_id, environment_id, Query::new())
    }

    /// Fetch tags matching a query.
    ///
    /// Missing default parameters, see [`DefaultQueryParameter::FETCH`], are added.
    pub fn fetch_all_with(&self, space_id: &str, environment_id: &str, mut query: Query) -> Result<CmaArray<CmaTag>> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        query.put_if_not_set(DefaultQueryParameter::FETCH);

        self.ctx
            .rest
            .execute(service::fetch_all(space_id, environment_id, query))
    }

    pub fn fetch_one(&self, space_id: &str, environment_id: &str, tag_id: &str) -> Result<CmaTag> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        let tag_id = require(tag_id, "tagId")?;

        self.ctx
            .rest
            .execute(service::fetch_one(space_id, environment_id, tag_id))
    }

    /// Create a tag under the id set on it
    pub fn create(&self, space_id: &str, environment_id: &str, tag: &CmaTag) -> Result<CmaTag> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        let tag_id = require(tag.id(), "tagId")?;

        self.ctx
            .rest
            .execute(service::create(space_id, environment_id, tag_id, tag)?)
    }

    /// Update a fetched tag; space, environment, id and version come from its `sys`
    pub fn update(&self, tag: &CmaTag) -> Result<CmaTag> {
        let space_id = require(tag.space_id(), "spaceId")?;
        let environment_id = require(tag.environment_id(), "environmentId")?;
        let tag_id = require(tag.id(), "tagId")?;
        let version = require_version(tag.version())?;

        self.ctx
            .rest
            .execute(service::update(version, space_id, environment_id, tag_id, tag)?)
    }

    /// Delete a fetched tag; returns the response status code
    pub fn delete(&self, tag: &CmaTag) -> Result<u16> {
        let space_id = require(tag.space_id(), "spaceId")?;
        let environment_id = require(tag.environment_id(), "environmentId")?;
        let tag_id = require(tag.id(), "tagId")?;
        let version = require_version(tag.version())?;

        self.ctx
            .rest
            .execute_status(service::delete(version, space_id, environment_id, tag_id))
    }
}

/// Async counterpart of [`ModuleTags`]
#[derive(Debug, Clone)]
pub struct AsyncTags {
    module: ModuleTags,
}

impl AsyncTags {
    pub fn fetch_all_configured<C>(&self, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaTag>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_configured(), callback)
    }

    pub fn fetch_all_configured_with<C>(&self, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaTag>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_configured_with(query), callback)
    }

    pub fn fetch_all<C>(&self, space_id: &str, environment_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaTag>>,
    {
        let module = self.module.clone();
        let (space_id, environment_id) = (space_id.to_string(), environment_id.to_string());
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all(&space_id, &environment_id), callback)
    }

    pub fn fetch_all_with<C>(&self, space_id: &str, environment_id: &str, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaTag>>,
    {
        let module = self.module.clone();
        let (space_id, environment_id) = (space_id.to_string(), environment_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.fetch_all_with(&space_id, &environment_id, query),
            callback,
        )
    }

    pub fn fetch_one<C>(&self, space_id: &str, environment_id: &str, tag_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaTag>,
    {
        let module = self.module.clone();
        let (space_id, environment_id, tag_id) =
            (space_id.to_string(), environment_id.to_string(), tag_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.fetch_one(&space_id, &environment_id, &tag_id),
            callback,
        )
    }

    pub fn create<C>(&self, space_id: &str, environment_id: &str, tag: CmaTag, callback: C) -> CallHandle
    where
        C: Callback<CmaTag>,
    {
        let module = self.module.clone();
        let (space_id, environment_id) = (space_id.to_string(), environment_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.create(&space_id, &environment_id, &tag),
            callback,
        )
    }

    pub fn update<C>(&self, tag: CmaTag, callback: C) -> CallHandle
    where
        C: Callback<CmaTag>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.update(&tag), callback)
    }

    pub fn delete<C>(&self, tag: CmaTag, callback: C) -> CallHandle
    where
        C: Callback<u16>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.delete(&tag), callback)
    }
}
