//! Typed HTTP agent over the storefront REST API.
//!
//! Wraps a cookie-aware [`reqwest::Client`] so the `buyerId` cookie issued by
//! the server rides along automatically; the bearer token is attached
//! explicitly after login. Error responses are decoded into [`AgentError`]
//! by status class before any success body is touched.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use driftwood_core::{MetaData, PAGINATION_HEADER, ProductId, ProductParams};

use crate::error::AgentError;
use crate::models::{Basket, PaginatedResponse, ProblemBody, Product, ProductFilters, User};

/// Typed client for the storefront API.
///
/// `base_url` must end with a trailing slash (e.g. `http://localhost:5000/api/`)
/// so relative joins resolve under it.
#[derive(Debug)]
pub struct Agent {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl Agent {
    /// Build an agent against the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::BaseUrl`] when the URL does not parse, or
    /// [`AgentError::Transport`] when the underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AgentError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to subsequent requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the bearer token (logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a bearer token is currently attached.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url, AgentError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fetch a catalog page. Pagination metadata comes back in the
    /// `Pagination` response header, not the body.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, API problem responses, or a missing
    /// pagination header.
    pub async fn products(
        &self,
        params: &ProductParams,
    ) -> Result<PaginatedResponse<Product>, AgentError> {
        let req = self
            .http
            .get(self.url("products")?)
            .query(&params.to_query());
        let response = check(self.authorize(req).send().await?).await?;

        let meta_data = pagination_header(&response)?;
        let items = response.json().await?;
        Ok(PaginatedResponse { items, meta_data })
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotFound`] for unknown ids.
    pub async fn product(&self, id: ProductId) -> Result<Product, AgentError> {
        self.get_json(&format!("products/{id}")).await
    }

    /// Fetch the distinct brand and type facets.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or API problem responses.
    pub async fn filters(&self) -> Result<ProductFilters, AgentError> {
        self.get_json("products/filters").await
    }

    /// Fetch the caller's basket, identified by bearer token or the
    /// `buyerId` cookie in the jar.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotFound`] when no basket exists yet.
    pub async fn basket(&self) -> Result<Basket, AgentError> {
        self.get_json("basket").await
    }

    /// Add `quantity` units of a product to the basket, creating the basket
    /// (and receiving a `buyerId` cookie) when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Problem`] for unknown products or non-positive
    /// quantities.
    pub async fn add_basket_item(
        &self,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Basket, AgentError> {
        let req = self.http.post(self.url("basket")?).query(&[
            ("productId", product_id.to_string()),
            ("quantity", quantity.to_string()),
        ]);
        let response = check(self.authorize(req).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Remove `quantity` units of a product from the basket. Lines that
    /// reach zero are pruned server-side.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Problem`] when the basket or line is missing.
    pub async fn remove_basket_item(
        &self,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), AgentError> {
        let req = self.http.delete(self.url("basket")?).query(&[
            ("productId", product_id.to_string()),
            ("quantity", quantity.to_string()),
        ]);
        check(self.authorize(req).send().await?).await?;
        Ok(())
    }

    /// Log in. On success the returned token is attached to this agent and
    /// the reconciled basket (if any) is included in the response.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Unauthorized`] for bad credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, AgentError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = check(
            self.http
                .post(self.url("account/login")?)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        let user: User = response.json().await?;
        self.token = Some(user.token.clone());
        Ok(user)
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Validation`] with field messages on invalid
    /// input or taken username/email.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AgentError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        check(
            self.http
                .post(self.url("account/register")?)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// Fetch the current user for the attached token, with a fresh token
    /// and their basket.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Unauthorized`] when the token is missing,
    /// expired, or revoked.
    pub async fn current_user(&mut self) -> Result<User, AgentError> {
        let req = self.http.get(self.url("account/currentUser")?);
        let response = check(self.authorize(req).send().await?).await?;
        let user: User = response.json().await?;
        self.token = Some(user.token.clone());
        Ok(user)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AgentError> {
        let req = self.http.get(self.url(path)?);
        let response = check(self.authorize(req).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Decode the `Pagination` response header into [`MetaData`].
fn pagination_header(response: &Response) -> Result<MetaData, AgentError> {
    let raw = response
        .headers()
        .get(PAGINATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AgentError::Pagination)?;
    serde_json::from_str(raw).map_err(|_| AgentError::Pagination)
}

/// Map non-success responses to [`AgentError`] by status class.
async fn check(response: Response) -> Result<Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ProblemBody = response.json().await.unwrap_or(ProblemBody {
        title: status.to_string(),
        errors: None,
    });

    Err(match status {
        StatusCode::BAD_REQUEST => body.errors.map_or(
            AgentError::Problem {
                title: body.title,
                status: status.as_u16(),
            },
            |errors| AgentError::Validation(errors.into_values().flatten().collect()),
        ),
        StatusCode::UNAUTHORIZED => AgentError::Unauthorized(body.title),
        StatusCode::NOT_FOUND => AgentError::NotFound(body.title),
        s if s.is_server_error() => AgentError::ServerFault(body.title),
        _ => AgentError::Problem {
            title: body.title,
            status: status.as_u16(),
        },
    })
}
