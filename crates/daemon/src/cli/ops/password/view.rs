use clap::Args;
use uuid::Uuid;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct View {
    /// Share id, or a full share link ending in `/p/<id>#<salt>`
    pub share: String,

    /// Salt from the share link, when only the id is given
    pub salt: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("expected a share id and salt, or a share link")]
    InvalidTarget,
    #[error("share is not available: it may have expired, been revoked, or the link is wrong")]
    NotAvailable,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for View {
    type Error = ViewError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (id, salt) = parse_target(&self.share, self.salt.as_deref())?;

        let (_, services) = ctx.services().await?;
        services
            .password_shares()
            .get_share(id, &salt)
            .await?
            .ok_or(ViewError::NotAvailable)
    }
}

/// Resolve `(id, salt)` from either an id plus salt or a share link
fn parse_target(share: &str, salt: Option<&str>) -> Result<(Uuid, String), ViewError> {
    if let Some(salt) = salt {
        let id = Uuid::parse_str(share.trim()).map_err(|_| ViewError::InvalidTarget)?;
        return Ok((id, salt.to_string()));
    }

    let (path, salt) = share
        .trim()
        .rsplit_once('#')
        .ok_or(ViewError::InvalidTarget)?;
    let id = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .ok_or(ViewError::InvalidTarget)?;
    if salt.is_empty() {
        return Err(ViewError::InvalidTarget);
    }

    let id = Uuid::parse_str(id).map_err(|_| ViewError::InvalidTarget)?;
    Ok((id, salt.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "6f1c8e2a-3b4d-4c5e-9f60-718293a4b5c6";

    #[test]
    fn test_parse_id_and_salt() {
        let (id, salt) = parse_target(ID, Some("the-salt")).unwrap();
        assert_eq!(id.to_string(), ID);
        assert_eq!(salt, "the-salt");
    }

    #[test]
    fn test_parse_link() {
        let link = format!("https://share.example.com/p/{}#the-salt", ID);
        let (id, salt) = parse_target(&link, None).unwrap();
        assert_eq!(id.to_string(), ID);
        assert_eq!(salt, "the-salt");
    }

    #[test]
    fn test_parse_rejects_incomplete_targets() {
        assert!(parse_target(ID, None).is_err());
        assert!(parse_target(&format!("https://x/p/{}#", ID), None).is_err());
        assert!(parse_target("https://x/p/not-a-uuid#salt", None).is_err());
        assert!(parse_target("not-a-uuid", Some("salt")).is_err());
    }
}
