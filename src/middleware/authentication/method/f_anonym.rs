use crate::models::user::ROLE_ANONYMOUS;
use actix_web::dev::ServiceRequest;
use actix_web::HttpMessage;

#[tracing::instrument(name = "Authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    let acl_vals = actix_casbin_auth::CasbinVals {
        subject: ROLE_ANONYMOUS.to_string(),
        domain: None,
    };
    if req.extensions_mut().insert(acl_vals).is_some() {
        return Err("Something wrong with access control".to_string());
    }

    Ok(true)
}
