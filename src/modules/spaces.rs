use super::{require, require_version, ModuleContext, HEADER_ORGANIZATION, HEADER_VERSION};
use crate::callback::{CallHandle, Callback};
use crate::error::Result;
use crate::model::{CmaArray, CmaLocale, CmaSpace, Resource};
use crate::query::{DefaultQueryParameter, Query};
use std::sync::Arc;

mod service {
    use super::*;
    use crate::endpoint::Endpoint;

    pub fn create(space: &CmaSpace) -> Result<Endpoint<CmaSpace>> {
        Endpoint::post(["spaces"]).json_without_sys(space)
    }

    pub fn create_in_organization(organization: &str, space: &CmaSpace) -> Result<Endpoint<CmaSpace>> {
        Endpoint::post(["spaces"])
            .header(HEADER_ORGANIZATION, organization)
            .json_without_sys(space)
    }

    pub fn delete(space_id: &str) -> Endpoint<()> {
        Endpoint::delete(["spaces", space_id])
    }

    pub fn fetch_all(query: Query) -> Endpoint<CmaArray<CmaSpace>> {
        Endpoint::get(["spaces"]).query(query)
    }

    pub fn fetch_one(space_id: &str) -> Endpoint<CmaSpace> {
        Endpoint::get(["spaces", space_id])
    }

    pub fn fetch_locales(space_id: &str) -> Endpoint<CmaArray<CmaLocale>> {
        Endpoint::get(["spaces", space_id, "locales"])
    }

    pub fn update(version: i64, space_id: &str, space: &CmaSpace) -> Result<Endpoint<CmaSpace>> {
        Endpoint::put(["spaces", space_id])
            .header(HEADER_VERSION, version)
            .json_without_sys(space)
    }
}

/// Space operations
#[derive(Debug, Clone)]
pub struct ModuleSpaces {
    ctx: Arc<ModuleContext>,
}

impl ModuleSpaces {
    pub(crate) fn new(ctx: Arc<ModuleContext>) -> Self {
        ModuleSpaces { ctx }
    }

    /// Use all operations of this module asynchronously
    pub fn async_api(&self) -> AsyncSpaces {
        AsyncSpaces {
            module: self.clone(),
        }
    }

    /// Create a space in the default organization of the token's user
    pub fn create(&self, space: &CmaSpace) -> Result<CmaSpace> {
        self.ctx.rest.execute(service::create(space)?)
    }

    /// Create a space inside the given organization
    ///
    /// # Errors
    /// `Validation` if `organization_id` is empty
    pub fn create_in_organization(&self, organization_id: &str, space: &CmaSpace) -> Result<CmaSpace> {
        let organization_id = require(organization_id, "organizationId")?;
        self.ctx
            .rest
            .execute(service::create_in_organization(organization_id, space)?)
    }

    /// Delete a space; returns the response status code
    pub fn delete(&self, space_id: &str) -> Result<u16> {
        let space_id = require(space_id, "spaceId")?;
        self.ctx.rest.execute_status(service::delete(space_id))
    }

    /// Fetch all spaces accessible to the token
    pub fn fetch_all(&self) -> Result<CmaArray<CmaSpace>> {
        self.fetch_all_with(Query::new())
    }

    /// Fetch spaces matching a query.
    ///
    /// Missing default parameters, see [`DefaultQueryParameter::FETCH`], are added.
    pub fn fetch_all_with(&self, mut query: Query) -> Result<CmaArray<CmaSpace>> {
        query.put_if_not_set(DefaultQueryParameter::FETCH);
        self.ctx.rest.execute(service::fetch_all(query))
    }

    pub fn fetch_one(&self, space_id: &str) -> Result<CmaSpace> {
        let space_id = require(space_id, "spaceId")?;
        self.ctx.rest.execute(service::fetch_one(space_id))
    }

    /// Fetch the locales configured for a space
    pub fn fetch_locales(&self, space_id: &str) -> Result<CmaArray<CmaLocale>> {
        let space_id = require(space_id, "spaceId")?;
        self.ctx.rest.execute(service::fetch_locales(space_id))
    }

    /// Update a space's name.
    ///
    /// # Errors
    /// `Validation` if the space has no id or no version
    pub fn update(&self, space: &CmaSpace) -> Result<CmaSpace> {
        let space_id = require(space.id(), "spaceId")?;
        let version = require_version(space.version())?;
        self.ctx.rest.execute(service::update(version, space_id, space)?)
    }
}

/// Async counterpart of [`ModuleSpaces`]
#[derive(Debug, Clone)]
pub struct AsyncSpaces {
    module: ModuleSpaces,
}

impl AsyncSpaces {
    /// See [`ModuleSpaces::create`]
    pub fn create<C>(&self, space: CmaSpace, callback: C) -> CallHandle
    where
        C: Callback<CmaSpace>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.create(&space), callback)
    }

    /// See [`ModuleSpaces::create_in_organization`]
    pub fn create_in_organization<C>(&self, organization_id: &str, space: CmaSpace, callback: C) -> CallHandle
    where
        C: Callback<CmaSpace>,
    {
        let module = self.module.clone();
        let organization_id = organization_id.to_string();
        self.module.ctx.bridge.defer(
            move || module.create_in_organization(&organization_id, &space),
            callback,
        )
    }

    pub fn delete<C>(&self, space_id: &str, callback: C) -> CallHandle
    where
        C: Callback<u16>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.delete(&space_id), callback)
    }

    pub fn fetch_all<C>(&self, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaSpace>>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.fetch_all(), callback)
    }

    pub fn fetch_all_with<C>(&self, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaSpace>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_with(query), callback)
    }

    pub fn fetch_one<C>(&self, space_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaSpace>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_one(&space_id), callback)
    }

    pub fn fetch_locales<C>(&self, space_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaLocale>>,
    {
        let module = self.module.clone();
        let space_id = space_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_locales(&space_id), callback)
    }

    pub fn update<C>(&self, space: CmaSpace, callback: C) -> CallHandle
    where
        C: Callback<CmaSpace>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.update(&space), callback)
    }
}
