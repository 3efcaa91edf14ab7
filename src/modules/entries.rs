use super::{require, require_version, ModuleContext, HEADER_CONTENT_TYPE, HEADER_VERSION};
use crate::callback::{CallHandle, Callback};
use crate::error::Result;
use crate::model::{CmaArray, CmaEntry, Resource};
use crate::query::{DefaultQueryParameter, Query};
use std::sync::Arc;

mod service {
    use super::*;
    use crate::endpoint::Endpoint;

    fn path<'a>(space_id: &'a str, environment_id: &'a str) -> Vec<&'a str> {
        vec!["spaces", space_id, "environments", environment_id, "entries"]
    }

    pub fn fetch_all(space_id: &str, environment_id: &str, query: Query) -> Endpoint<CmaArray<CmaEntry>> {
        Endpoint::get(path(space_id, environment_id)).query(query)
    }

    pub fn fetch_one(space_id: &str, environment_id: &str, entry_id: &str) -> Endpoint<CmaEntry> {
        let mut segments = path(space_id, environment_id);
        segments.push(entry_id);
        Endpoint::get(segments)
    }

    pub fn create(
        space_id: &str,
        environment_id: &str,
        content_type_id: &str,
        entry: &CmaEntry,
    ) -> Result<Endpoint<CmaEntry>> {
        Endpoint::post(path(space_id, environment_id))
            .header(HEADER_CONTENT_TYPE, content_type_id)
            .json_without_sys(entry)
    }

    pub fn create_with_id(
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
        content_type_id: &str,
        entry: &CmaEntry,
    ) -> Result<Endpoint<CmaEntry>> {
        let mut segments = path(space_id, environment_id);
        segments.push(entry_id);
        Endpoint::put(segments)
            .header(HEADER_CONTENT_TYPE, content_type_id)
            .json_without_sys(entry)
    }

    pub fn update(
        version: i64,
        space_id: &str,
        environment_id: &str,
        entry_id: &str,
        entry: &CmaEntry,
    ) -> Result<Endpoint<CmaEntry>> {
        let mut segments = path(space_id, environment_id);
        segments.push(entry_id);
        Endpoint::put(segments)
            .header(HEADER_VERSION, version)
            .json_without_sys(entry)
    }

    pub fn delete(space_id: &str, environment_id: &str, entry_id: &str) -> Endpoint<()> {
        let mut segments = path(space_id, environment_id);
        segments.push(entry_id);
        Endpoint::delete(segments)
    }

    pub fn publish(version: i64, space_id: &str, environment_id: &str, entry_id: &str) -> Endpoint<CmaEntry> {
        let mut segments = path(space_id, environment_id);
        segments.extend([entry_id, "published"]);
        Endpoint::put(segments).header(HEADER_VERSION, version)
    }

    pub fn unpublish(space_id: &str, environment_id: &str, entry_id: &str) -> Endpoint<CmaEntry> {
        let mut segments = path(space_id, environment_id);
        segments.extend([entry_id, "published"]);
        Endpoint::delete(segments)
    }
}

/// Entry operations of an environment
#[derive(Debug, Clone)]
pub struct ModuleEntries {
    ctx: Arc<ModuleContext>,
}

/// Space, environment and id of a fetched entry
fn locate(entry: &CmaEntry) -> Result<(&str, &str, &str)> {
    Ok((
        require(entry.space_id(), "spaceId")?,
        require(entry.environment_id(), "environmentId")?,
        require(entry.id(), "entryId")?,
    ))
}

impl ModuleEntries {
    pub(crate) fn new(ctx: Arc<ModuleContext>) -> Self {
        ModuleEntries { ctx }
    }

    /// Use all operations of this module asynchronously
    pub fn async_api(&self) -> AsyncEntries {
        AsyncEntries {
            module: self.clone(),
        }
    }

    pub fn fetch_all_configured(&self) -> Result<CmaArray<CmaEntry>> {
        self.fetch_all_configured_with(Query::new())
    }

    pub fn fetch_all_configured_with(&self, query: Query) -> Result<CmaArray<CmaEntry>> {
        let space_id = self.ctx.configured_space_id()?;
        let environment_id = self.ctx.configured_environment_id()?;
        self.fetch_all_with(space_id, environment_id, query)
    }

    pub fn fetch_all(&self, space_id: &str, environment_id: &str) -> Result<CmaArray<CmaEntry>> {
        self.fetch_all_with(space_id, environment_id, Query::new())
    }

    pub fn fetch_all_with(&self, space_id: &str, environment_id: &str, mut query: Query) -> Result<CmaArray<CmaEntry>> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        query.put_if_not_set(DefaultQueryParameter::FETCH);

        self.ctx
            .rest
            .execute(service::fetch_all(space_id, environment_id, query))
    }

    pub fn fetch_one(&self, space_id: &str, environment_id: &str, entry_id: &str) -> Result<CmaEntry> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        let entry_id = require(entry_id, "entryId")?;

        self.ctx
            .rest
            .execute(service::fetch_one(space_id, environment_id, entry_id))
    }

    /// Create an entry of the given content type.
    ///
    /// An entry that already has an id is created under that id.
    pub fn create(
        &self,
        space_id: &str,
        environment_id: &str,
        content_type_id: &str,
        entry: &CmaEntry,
    ) -> Result<CmaEntry> {
        let space_id = require(space_id, "spaceId")?;
        let environment_id = require(environment_id, "environmentId")?;
        let content_type_id = require(content_type_id, "contentTypeId")?;

        let endpoint = match entry.id() {
            Some(entry_id) if !entry_id.is_empty() => {
                service::create_with_id(space_id, environment_id, entry_id, content_type_id, entry)?
            }
            _ => service::create(space_id, environment_id, content_type_id, entry)?,
        };
        self.ctx.rest.execute(endpoint)
    }

    pub fn update(&self, entry: &CmaEntry) -> Result<CmaEntry> {
        let (space_id, environment_id, entry_id) = locate(entry)?;
        let version = require_version(entry.version())?;

        self.ctx
            .rest
            .execute(service::update(version, space_id, environment_id, entry_id, entry)?)
    }

    /// Delete an entry; returns the response status code
    pub fn delete(&self, entry: &CmaEntry) -> Result<u16> {
        let (space_id, environment_id, entry_id) = locate(entry)?;

        self.ctx
            .rest
            .execute_status(service::delete(space_id, environment_id, entry_id))
    }

    /// Publish the current version of an entry
    pub fn publish(&self, entry: &CmaEntry) -> Result<CmaEntry> {
        let (space_id, environment_id, entry_id) = locate(entry)?;
        let version = require_version(entry.version())?;

        self.ctx
            .rest
            .execute(service::publish(version, space_id, environment_id, entry_id))
    }

    pub fn unpublish(&self, entry: &CmaEntry) -> Result<CmaEntry> {
        let (space_id, environment_id, entry_id) = locate(entry)?;

        self.ctx
            .rest
            .execute(service::unpublish(space_id, environment_id, entry_id))
    }
}

/// Async counterpart of [`ModuleEntries`]
#[derive(Debug, Clone)]
pub struct AsyncEntries {
    module: ModuleEntries,
}

impl AsyncEntries {
    pub fn fetch_all_configured<C>(&self, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaEntry>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_configured(), callback)
    }

    pub fn fetch_all_configured_with<C>(&self, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaEntry>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_configured_with(query), callback)
    }

    pub fn fetch_all<C>(&self, space_id: &str, environment_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaEntry>>,
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
        C: Callback<CmaArray<CmaEntry>>,
    {
        let module = self.module.clone();
        let (space_id, environment_id) = (space_id.to_string(), environment_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.fetch_all_with(&space_id, &environment_id, query),
            callback,
        )
    }

    pub fn fetch_one<C>(&self, space_id: &str, environment_id: &str, entry_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaEntry>,
    {
        let module = self.module.clone();
        let (space_id, environment_id, entry_id) =
            (space_id.to_string(), environment_id.to_string(), entry_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.fetch_one(&space_id, &environment_id, &entry_id),
            callback,
        )
    }

    pub fn create<C>(
        &self,
        space_id: &str,
        environment_id: &str,
        content_type_id: &str,
        entry: CmaEntry,
        callback: C,
    ) -> CallHandle
    where
        C: Callback<CmaEntry>,
    {
        let module = self.module.clone();
        let (space_id, environment_id, content_type_id) =
            (space_id.to_string(), environment_id.to_string(), content_type_id.to_string());
        self.module.ctx.bridge.defer(
            move || module.create(&space_id, &environment_id, &content_type_id, &entry),
            callback,
        )
    }

    pub fn update<C>(&self, entry: CmaEntry, callback: C) -> CallHandle
    where
        C: Callback<CmaEntry>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.update(&entry), callback)
    }

    pub fn delete<C>(&self, entry: CmaEntry, callback: C) -> CallHandle
    where
        C: Callback<u16>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.delete(&entry), callback)
    }

    pub fn publish<C>(&self, entry: CmaEntry, callback: C) -> CallHandle
    where
        C: Callback<CmaEntry>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.publish(&entry), callback)
    }

    pub fn unpublish<C>(&self, entry: CmaEntry, callback: C) -> CallHandle
    where
        C: Callback<CmaEntry>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.unpublish(&entry), callback)
    }
}
