use crate::configuration::Settings;
use crate::middleware::authentication::{get_header, jwt};
use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage};
use std::sync::Arc;

/// `Ok(false)` lets the next method try when no bearer token was sent.
/// A bearer token that fails verification is an error.
#[tracing::instrument(name = "Authenticate with JWT", skip(req))]
pub fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let Some(authorization) = get_header::<String>(req, "authorization")? else {
        return Ok(false);
    };

    let token = match jwt::extract_bearer_token(&authorization) {
        Ok(token) => token,
        Err(err) => {
            tracing::debug!("Authorization header ignored: {}", err);
            return Ok(false);
        }
    };

    let secret = req
        .app_data::<web::Data<Settings>>()
        .map(|settings| settings.auth.jwt_secret.clone())
        .ok_or_else(|| {
            tracing::error!("Settings are not registered as app data");
            "Authentication is not configured".to_string()
        })?;

    let claims = jwt::verify(token, &secret).map_err(|err| {
        tracing::warn!("JWT rejected: {}", err);
        err
    })?;
    let user = jwt::user_from_claims(claims);

    tracing::debug!("ACL check for JWT role: {}", user.role);
    let acl_vals = actix_casbin_auth::CasbinVals {
        subject: user.role.clone(),
        domain: None,
    };

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    if req.extensions_mut().insert(acl_vals).is_some() {
        return Err("Something wrong with access control".to_string());
    }

    Ok(true)
}
