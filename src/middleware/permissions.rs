/// Ownership checks for vidstream resources
///
/// Users can only modify content they own. The predicate compares stored
/// owner references against the authenticated caller, independent of any
/// identifier string representation.
use crate::error::{AppError, Result};
use uuid::Uuid;

/// Allow the operation only when the caller owns the resource.
pub fn ensure_owner(owner_id: Uuid, caller_id: Uuid, resource: &str) -> Result<()> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You don't have permission to modify this {resource}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        let id = Uuid::new_v4();
        assert!(ensure_owner(id, id, "video").is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = ensure_owner(Uuid::new_v4(), Uuid::new_v4(), "video").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
