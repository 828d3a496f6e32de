use thiserror::Error;

/// Requester is not the owner of the resource.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Requester does not own this resource")]
pub struct Forbidden;

/// A resource that belongs to exactly one owner identity.
pub trait Owned {
    type OwnerId: PartialEq;

    fn owner_id(&self) -> &Self::OwnerId;
}

/// Allow access only when the requester owns the resource.
///
/// Call after the resource has been found; a missing resource is a
/// different failure and must be reported before reaching this check.
pub fn check_owner<R: Owned>(resource: &R, requester: &R::OwnerId) -> Result<(), Forbidden> {
    if resource.owner_id() == requester {
        Ok(())
    } else {
        Err(Forbidden)
    }
}
