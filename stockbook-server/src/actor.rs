//! Request actor context
//!
//! Authentication mechanics live outside this service; the gateway in front
//! of it forwards the authenticated identity in `x-actor-id` / `x-actor-role`
//! headers. This extractor is the seam a real auth middleware would replace.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::Role;

use crate::utils::AppError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The identity a request runs on behalf of; attributed as `created_by` on
/// anything it creates.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    /// Gate for procurement mutations (manual reorders, status transitions)
    pub fn require_procurement(&self) -> Result<(), AppError> {
        if self.role.can_manage_procurement() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "procurement changes require manager role".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Check if already extracted
        if let Some(actor) = parts.extensions.get::<Actor>() {
            return Ok(actor.clone());
        }

        let id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::validation(format!("missing {ACTOR_ID_HEADER} header")))?
            .to_string();

        let role = match parts
            .headers
            .get(ACTOR_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
            None => Role::Staff,
        };

        let actor = Actor { id, role };
        parts.extensions.insert(actor.clone());
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_cannot_manage_procurement() {
        let actor = Actor {
            id: "u1".into(),
            role: Role::Staff,
        };
        assert!(actor.require_procurement().is_err());

        let manager = Actor {
            id: "u2".into(),
            role: Role::Manager,
        };
        assert!(manager.require_procurement().is_ok());
    }
}
