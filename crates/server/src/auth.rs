use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Identity attached to every request while JWT authentication is disabled
#[derive(Debug, Clone)]
pub struct DevIdentity(pub String);

/// The subject of the authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<DefaultClaims>() {
            return claims
                .sub
                .clone()
                .map(CurrentUser)
                .ok_or_else(ApiError::unauthorized);
        }

        parts
            .extensions
            .get::<DevIdentity>()
            .map(|identity| CurrentUser(identity.0.clone()))
            .ok_or_else(ApiError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(request: Request<()>) -> Result<CurrentUser, ApiError> {
        let (mut parts, _) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_dev_identity() {
        let request = Request::builder()
            .extension(DevIdentity("dev-user".to_string()))
            .body(())
            .unwrap();

        assert_eq!(
            extract(request).await.unwrap(),
            CurrentUser("dev-user".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_identity() {
        let request = Request::builder().body(()).unwrap();

        assert_eq!(
            extract(request).await.unwrap_err().status,
            StatusCode::UNAUTHORIZED
        );
    }
}
