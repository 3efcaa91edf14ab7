use super::{require, require_version, ModuleContext, HEADER_VERSION};
use crate::callback::{CallHandle, Callback};
use crate::error::Result;
use crate::model::{CmaApiKey, CmaArray, Resource};
use crate::query::{DefaultQueryParameter, Query};
use std::sync::Arc;

mod service {
    use super::*;
    use crate::endpoint::Endpoint;

    pub fn fetch_all(space_id: &str, query: Query) -> Endpoint<CmaArray<CmaApiKey>> {
        Endpoint::get(["spaces", space_id, "api_keys"]).query(query)
    }

    pub fn fetch_one(space_id: &str, key_id: &str) -> Endpoint<CmaApiKey> {
        Endpoint::get(["spaces", space_id, "api_keys", key_id])
    }

    pub fn create(space_id: &str, key: &CmaApiKey) -> Result<Endpoint<CmaApiKey>> {
        Endpoint::post(["spaces", space_id, "api_keys"]).json_without_sys(key)
    }

    pub fn update(version: i64, space_id: &str, key_id: &str, key: &CmaApiKey) -> Result<Endpoint<CmaApiKey>> {
        Endpoint::put(["spaces", space_id, "api_keys", key_id])
            .header(HEADER_VERSION, version)
            .json_without_sys(key)
    }

    pub fn delete(space_id: &str, key_id: &str) -> Endpoint<()> {
        Endpoint::delete(["spaces", space_id, "api_keys", key_id])
    }
}

/// Delivery API key operations of a space
#[derive(Debug, Clone)]
pub struct ModuleApiKeys {
    ctx: Arc<ModuleContext>,
}

impl ModuleApiKeys {
    pub(crate) fn new(ctx: Arc<ModuleContext>) -> Self {
        ModuleApiKeys { ctx }
    }

    /// Use all operations of this module asynchronously
    pub fn async_api(&self) -> AsyncApiKeys {
        AsyncApiKeys {
            module: self.clone(),
        }
    }

    pub fn fetch_all(&self, space_id: &str) -> Result<CmaArray<CmaApiKey>> {
        self.fetch_all_with(space_id, Query::new())
    }

    pub fn fetch_all_with(&self, space_id: &str, mut query: Query) -> Result<CmaArray<CmaApiKey>> {
        let space_id = require(space_id, "spaceId")?;
        query.put_if_not_set(DefaultQueryParameter::FETCH);
        self.ctx.rest.execute(service::fetch_all(space_id, query))
    }

    pub fn fetch_one(&self, space_id: &str, key_id: &str) -> Result<CmaApiKey> {
        let space_id = require(space_id, "spaceId")?;
        let key_id = require(key_id, "keyId")?;
        self.ctx.rest.execute(service::fetch_one(space_id, key_id))
    }

    pub fn create(&self, space_id: &str, key: &CmaApiKey) -> Result<CmaApiKey> {
        let space_id = require(space_id, "spaceId")?;
        self.ctx.rest.execute(service::create(space_id, key)?)
    }

    /// Update a fetched key; space, id and version come from its `sys`
    pub fn update(&self, key: &CmaApiKey) -> Result<CmaApiKey> {
        let space_id = require(key.space_id(), "spaceId")?;
        let key_id = require(key.id(), "keyId")?;
        let version = require_version(key.version())?;
        self.ctx.rest.execute(service::update(version, space_id, key_id, key)?)
    }

    /// Delete a fetched key; returns the response status code
    pub fn delete(&self, key: &CmaApiKey) -> Result<u16> {
        let space_id = require(key.space_id(), "spaceId")?;
        let key_id = require(key.id(), "keyId")?;
        self.ctx.rest.execute_status(service::delete(space_id, key_id))
    }
}

/// Async counterpart of [`ModuleApiKeys`]
#[derive(Debug, Clone)]
pub struct AsyncApiKeys {
    module: ModuleApiKeys,
}

impl AsyncApiKeys {
    pub fn fetch_all<C>(&self, space_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaApiKey>>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all(&space_id), callback)
    }

    pub fn fetch_all_with<C>(&self, space_id: &str, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaApiKey>>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_with(&space_id, query), callback)
    }

    pub fn fetch_one<C>(&self, space_id: &str, key_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaApiKey>,
    {
        let module = self.module.clone();
        let (space_id, key_id) = (space_id.to_string(), key_id.to_string());
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_one(&space_id, &key_id), callback)
    }

    pub fn create<C>(&self, space_id: &str, key: CmaApiKey, callback: C) -> CallHandle
    where
        C: Callback<CmaApiKey>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.create(&space_id, &key), callback)
    }

    pub fn update<C>(&self, key: CmaApiKey, callback: C) -> CallHandle
    where
        C: Callback<CmaApiKey>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.update(&key), callback)
    }

    pub fn delete<C>(&self, key: CmaApiKey, callback: C) -> CallHandle
    where
        C: Callback<u16>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.delete(&key), callback)
    }
}
