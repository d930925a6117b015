/// Validates the provided API key against the key configured at startup.
///
/// Returns `Ok(())` if the key matches, or `Status::unauthenticated` otherwise.
#[allow(clippy::result_large_err)]
pub fn validate_api_key(provided_key: &str, expected_key: &str) -> Result<(), tonic::Status> {
    if !expected_key.is_empty() && provided_key == expected_key {
        Ok(())
    } else {
        Err(tonic::Status::unauthenticated("Invalid API key"))
    }
}
