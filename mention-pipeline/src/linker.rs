//! Identity linking: resolves a user-typed handle to a social profile.

use guard_core::{GuardError, Identity, MatchInputError};
use storage::ProfileStore;
use tracing::{info, instrument};

/// Strips surrounding whitespace and every `@` from a user-typed handle.
pub fn normalize_profile_input(input: &str) -> String {
    input.trim().replace('@', "").trim().to_string()
}

/// Looks up the profile for `input` and returns the identity to match mentions against.
/// The display name falls back to the user name when the profile has none.
#[instrument(skip(profiles))]
pub async fn link_identity<P>(input: &str, profiles: &P) -> Result<Identity, GuardError>
where
    P: ProfileStore + ?Sized,
{
    let user_name = normalize_profile_input(input);
    if user_name.is_empty() {
        return Err(MatchInputError::EmptyHandle.into());
    }

    let profile = profiles
        .find_profile(&user_name)
        .await?
        .ok_or_else(|| GuardError::ProfileNotFound(user_name.clone()))?;

    let display_name = profile
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| profile.user_name.clone());
    info!(user_name = %profile.user_name, "Social profile linked");
    Ok(Identity::new(profile.user_name, display_name))
}
