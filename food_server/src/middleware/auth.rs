//! Bearer token middleware for the food ordering server.
//! This middleware can be placed on any route or service.
//!
//! It reads the access token from the `Authorization: Bearer <token>` header, checks its signature and expiry, and then
//! re-reads the user named in the token from the store. If all of that succeeds, the user is stored in the request
//! extensions as an [`AuthenticatedUser`] and the request continues. Otherwise a 401 JSON error is returned and the
//! wrapped service is never called.
//!
//! The middleware needs a [`TokenIssuer`] and an [`AuthApi`] for the backend `B` in the application data.

use std::{marker::PhantomData, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use food_engine::{db_types::User, traits::AuthManagement, AuthApi};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::*;

use crate::{
    auth::{bearer_token, AuthenticatedUser, TokenIssuer},
    errors::ServerError,
};

pub struct BearerAuthFactory<B> {
    _backend: PhantomData<fn() -> B>,
}

impl<B> BearerAuthFactory<B> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _backend: PhantomData }
    }
}

impl<S, Body, B> Transform<S, ServiceRequest> for BearerAuthFactory<B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    Body: 'static,
    B: AuthManagement + 'static,
{
    type Response = ServiceResponse<EitherBody<Body>>;
    type Error = Error;
    type Transform = BearerAuthService<S, B>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BearerAuthService { service: Rc::new(service), _backend: PhantomData })
    }
}

pub struct BearerAuthService<S, B> {
    service: Rc<S>,
    _backend: PhantomData<fn() -> B>,
}

impl<S, Body, B> Service<ServiceRequest> for BearerAuthService<S, B>
where
    S: Service<ServiceRequest, Response = ServiceResponse<Body>, Error = Error> + 'static,
    S::Future: 'static,
    Body: 'static,
    B: AuthManagement + 'static,
{
    type Response = ServiceResponse<EitherBody<Body>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match authenticate::<B>(&req).await {
                Ok(user) => {
                    trace!("🔑️ Request to {} authenticated as user #{}", req.path(), user.id);
                    req.extensions_mut().insert(AuthenticatedUser(user));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                },
                Err(e) => {
                    debug!("🔑️ Rejecting request to {}. {e}", req.path());
                    Ok(req.error_response(e).map_into_right_body())
                },
            }
        })
    }
}

async fn authenticate<B: AuthManagement + 'static>(req: &ServiceRequest) -> Result<User, ServerError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .cloned()
        .ok_or_else(|| ServerError::InitializeError("No token issuer has been configured".into()))?;
    let api = req
        .app_data::<web::Data<AuthApi<B>>>()
        .cloned()
        .ok_or_else(|| ServerError::InitializeError("No auth API has been configured".into()))?;
    let token = bearer_token(req.headers())?;
    let claims = issuer.validate_token(token)?;
    let user = api.fetch_user(claims.user_id).await?;
    Ok(user)
}
