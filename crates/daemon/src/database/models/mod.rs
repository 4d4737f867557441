mod key_share;
mod password_share;

pub use key_share::KeyShareRow;
pub use password_share::PasswordShareRow;

/// Wrap a conversion failure as a column decode error
fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}
