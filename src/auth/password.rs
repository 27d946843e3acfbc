//! argon2id 비밀번호 해시

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;

// 없는 사용자 로그인에도 같은 검증 비용을 쓰기 위한 해시
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// 임의 salt 로 해시
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// 저장된 PHC 문자열과 비교
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn dummy_hash() -> Result<&'static str, argon2::password_hash::Error> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password("dummy password for unknown users")?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}

/// 로그인 자격 검증
/// 사용자가 없으면 더미 해시로 검증만 수행하고 항상 false.
pub fn verify_credentials(
    password: &str,
    stored_hash: Option<&str>,
) -> Result<bool, argon2::password_hash::Error> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            verify_password(password, dummy_hash()?)?;
            Ok(false)
        }
    }
}
