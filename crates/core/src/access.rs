//! Per-article access policy.
//!
//! Reads depend on the article status and on who is asking; writes (update,
//! delete) are reserved for the author. The checks only compare identities,
//! so the caller is responsible for loading the article first.

use crate::article::ArticleStatus;
use crate::error::CoreError;
use crate::types::DbId;

/// Who is asking to read an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No `Authorization` header was sent.
    Anonymous,
    /// A token was sent but it was malformed, forged, or expired.
    Rejected,
    /// A verified session for the given user id.
    User(DbId),
}

/// Decide whether `caller` may read an article with the given status and author.
///
/// Published articles are public. Drafts are visible to their author only:
/// anonymous callers get `Unauthorized`, everyone else gets `Forbidden`.
pub fn check_read(status: ArticleStatus, author_id: DbId, caller: Caller) -> Result<(), CoreError> {
    if status.is_published() {
        return Ok(());
    }

    match caller {
        Caller::User(user_id) if user_id == author_id => Ok(()),
        Caller::Anonymous => Err(CoreError::Unauthorized(
            "Authentication required to view this draft".into(),
        )),
        Caller::User(_) | Caller::Rejected => Err(CoreError::Forbidden(
            "You do not have access to this draft".into(),
        )),
    }
}

/// Decide whether `user_id` may update or delete an article written by `author_id`.
pub fn check_modify(author_id: DbId, user_id: DbId) -> Result<(), CoreError> {
    if author_id != user_id {
        return Err(CoreError::Forbidden(
            "You can only modify your own articles".into(),
        ));
    }
    Ok(())
}
