use super::{require, ModuleContext};
use crate::callback::{CallHandle, Callback};
use crate::error::Result;
use crate::model::{CmaArray, CmaPersonalAccessToken};
use crate::query::{DefaultQueryParameter, Query};
use std::sync::Arc;

mod service {
    use super::*;
    use crate::endpoint::Endpoint;

    const BASE: [&str; 3] = ["users", "me", "access_tokens"];

    pub fn fetch_all(query: Query) -> Endpoint<CmaArray<CmaPersonalAccessToken>> {
        Endpoint::get(BASE).query(query)
    }

    pub fn fetch_one(token_id: &str) -> Endpoint<CmaPersonalAccessToken> {
        Endpoint::get(["users", "me", "access_tokens", token_id])
    }

    pub fn create(token: &CmaPersonalAccessToken) -> Result<Endpoint<CmaPersonalAccessToken>> {
        Endpoint::post(BASE).json_without_sys(token)
    }

    pub fn revoke(token_id: &str) -> Endpoint<CmaPersonalAccessToken> {
        Endpoint::put(["users", "me", "access_tokens", token_id, "revoked"])
    }
}

/// Personal access tokens of the user owning the client's token
#[derive(Debug, Clone)]
pub struct ModulePersonalAccessTokens {
    ctx: Arc<ModuleContext>,
}

impl ModulePersonalAccessTokens {
    pub(crate) fn new(ctx: Arc<ModuleContext>) -> Self {
        ModulePersonalAccessTokens { ctx }
    }

    /// Use all operations of this module asynchronously
    pub fn async_api(&self) -> AsyncPersonalAccessTokens {
        AsyncPersonalAccessTokens {
            module: self.clone(),
        }
    }

    pub fn fetch_all(&self) -> Result<CmaArray<CmaPersonalAccessToken>> {
        self.fetch_all_with(Query::new())
    }

    pub fn fetch_all_with(&self, mut query: Query) -> Result<CmaArray<CmaPersonalAccessToken>> {
        query.put_if_not_set(DefaultQueryParameter::FETCH);
        self.ctx.rest.execute(service::fetch_all(query))
    }

    pub fn fetch_one(&self, token_id: &str) -> Result<CmaPersonalAccessToken> {
        let token_id = require(token_id, "tokenId")?;
        self.ctx.rest.execute(service::fetch_one(token_id))
    }

    /// Create a token. The returned token is the only one carrying the secret value.
    pub fn create(&self, token: &CmaPersonalAccessToken) -> Result<CmaPersonalAccessToken> {
        self.ctx.rest.execute(service::create(token)?)
    }

    /// Revoke a token; it can not be used afterwards
    pub fn revoke(&self, token_id: &str) -> Result<CmaPersonalAccessToken> {
        let token_id = require(token_id, "tokenId")?;
        self.ctx.rest.execute(service::revoke(token_id))
    }
}

/// Async counterpart of [`ModulePersonalAccessTokens`]
#[derive(Debug, Clone)]
pub struct AsyncPersonalAccessTokens {
    module: ModulePersonalAccessTokens,
}

impl AsyncPersonalAccessTokens {
    pub fn fetch_all<C>(&self, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaPersonalAccessToken>>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.fetch_all(), callback)
    }

    pub fn fetch_all_with<C>(&self, query: Query, callback: C) -> CallHandle
    where
        C: Callback<CmaArray<CmaPersonalAccessToken>>,
    {
        let module = self.module.clone();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_all_with(query), callback)
    }

    pub fn fetch_one<C>(&self, token_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaPersonalAccessToken>,
    {
        let module = self.module.clone();
        let token_id = token_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.fetch_one(&token_id), callback)
    }

    pub fn create<C>(&self, token: CmaPersonalAccessToken, callback: C) -> CallHandle
    where
        C: Callback<CmaPersonalAccessToken>,
    {
        let module = self.module.clone();
        self.module.ctx.bridge.defer(move || module.create(&token), callback)
    }

    pub fn revoke<C>(&self, token_id: &str, callback: C) -> CallHandle
    where
        C: Callback<CmaPersonalAccessToken>,
    {
        let module = self.module.clone();
        let token_id = token_id.to_string();
        self.module
            .ctx
            .bridge
            .defer(move || module.revoke(&token_id), callback)
    }
}
