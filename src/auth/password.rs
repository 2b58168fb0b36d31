use bcrypt::BcryptError;

/// Salted bcrypt hash at a fixed cost
pub fn hash_password(plain: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(plain, cost)
}

/// Check `plain` against a stored hash; the cost is read from the hash itself
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hash)
}
