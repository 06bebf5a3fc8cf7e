use crate::error::AppResult;

pub fn hash_password(password: impl AsRef<[u8]>) -> AppResult<String> {
    let salt = password_hash::SaltString::generate(&mut rand::thread_rng());

    let hash =
        password_hash::PasswordHash::generate(argon2::Argon2::default(), password.as_ref(), &salt)
            .map_err(|err| anyhow::anyhow!(err))?
            .to_string();
    Ok(hash)
}

pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = password_hash::PasswordHash::new(hash).map_err(|err| anyhow::anyhow!(err))?;

    Ok(parsed
        .verify_password(&[&argon2::Argon2::default()], password)
        .is_ok())
}
