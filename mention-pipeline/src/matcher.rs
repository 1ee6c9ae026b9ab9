//! Mention Matcher: builds the case-insensitive predicate for an identity and queries the store.

use guard_core::{GuardError, Identity, MatchInputError, Post};
use storage::{MentionQuery, PostStore};
use tracing::{info, instrument};

/// Terms: `@handle`, the full display name, and each whitespace-separated name token.
///
/// A one-word display name simply contributes fewer terms.
pub fn build_query(identity: &Identity) -> Result<MentionQuery, MatchInputError> {
    let handle = identity.normalized_handle();
    if handle.is_empty() {
        return Err(MatchInputError::EmptyHandle);
    }
    let display_name = identity.display_name.trim();
    if display_name.is_empty() {
        return Err(MatchInputError::EmptyDisplayName);
    }

    let mut terms = vec![format!("@{}", handle), display_name.to_string()];
    terms.extend(display_name.split_whitespace().map(str::to_string));
    Ok(MentionQuery::new(terms))
}

/// Posts mentioning `identity`, in the store's order. Read-only.
#[instrument(skip(identity, store), fields(handle = %identity.normalized_handle()))]
pub async fn find_mentions<S>(identity: &Identity, store: &S) -> Result<Vec<Post>, GuardError>
where
    S: PostStore + ?Sized,
{
    let query = build_query(identity)?;
    let posts = store.find(&query).await?;
    info!(terms = ?query.terms(), matched = posts.len(), "Mentions found");
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_has_handle_full_name_and_tokens() {
        let q = build_query(&Identity::new("alice", "Alice Smith")).unwrap();
        assert_eq!(q.terms(), &["@alice", "alice smith", "alice", "smith"]);
    }

    #[test]
    fn single_token_name_does_not_fail() {
        let q = build_query(&Identity::new("@Cher", "Cher")).unwrap();
        assert_eq!(q.terms(), &["@cher", "cher"]);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            build_query(&Identity::new(" @ ", "Alice")),
            Err(MatchInputError::EmptyHandle)
        );
        assert_eq!(
            build_query(&Identity::new("alice", "   ")),
            Err(MatchInputError::EmptyDisplayName)
        );
    }
}
