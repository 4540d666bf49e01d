use bcrypt::DEFAULT_COST;

/// Salted one-way hash of a plaintext credential.
pub fn hash(plaintext: &str) -> anyhow::Result<String> {
    Ok(bcrypt::hash(plaintext, DEFAULT_COST)?)
}

/// Whether `plaintext` matches a previously produced digest. A malformed
/// digest verifies as `false` rather than erroring.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
