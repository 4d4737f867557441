use clap::Args;
use uuid::Uuid;

use common::share::KeyShare;

use crate::cli::op::ContextError;

#[derive(Args, Debug, Clone)]
pub struct Show {
    /// Id of the key share
    pub id: Uuid,

    /// Print the share as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("no key share {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to encode share: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Show {
    type Error = ShowError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (_, services) = ctx.services().await?;
        let share = services
            .key_shares()
            .get_share(self.id)
            .await?
            .ok_or(ShowError::NotFound(self.id))?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&share)?);
        }
        Ok(render(&share))
    }
}

fn render(share: &KeyShare) -> String {
    let mut lines = vec![
        format!("id:        {}", share.id),
        format!("state:     {}", share.state()),
        format!("algorithm: {}", share.algorithm),
        format!("purpose:   {}", share.purpose),
        format!("format:    {}", share.format),
    ];
    if let Some(label) = &share.label {
        lines.push(format!("label:     {}", label));
    }
    if let Some(completed_at) = share.completed_at {
        lines.push(format!("completed: {}", completed_at));
    }
    if let Some(key) = &share.public_key {
        lines.push(String::new());
        lines.push(key.clone());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::share::{Algorithm, KeyFormat, Purpose};
    use time::OffsetDateTime;

    #[test]
    fn test_render_pending_and_completed() {
        let mut share = KeyShare {
            id: Uuid::nil(),
            created: OffsetDateTime::UNIX_EPOCH,
            algorithm: Algorithm::Rsa4096,
            purpose: Purpose::Git,
            format: KeyFormat::Openssh,
            label: Some("ci".to_string()),
            public_key: None,
            completed_at: None,
        };
        let pending = render(&share);
        assert!(pending.contains("state:     pending"));
        assert!(pending.contains("algorithm: rsa-4096"));
        assert!(pending.contains("label:     ci"));

        share.public_key = Some("ssh-rsa AAAA".to_string());
        share.completed_at = Some(OffsetDateTime::UNIX_EPOCH);
        let completed = render(&share);
        assert!(completed.contains("state:     completed"));
        assert!(completed.ends_with("ssh-rsa AAAA"));
    }
}
