use chrono::{DateTime, Utc};
use import_logging::{import_info, import_warn};
use source_import_core::{parse_catalog, ImportResult, Subscription};

use crate::{Fetcher, ImportError};

/// Fetches the catalog at `url` and parses it.
pub async fn import_from_url(fetcher: &dyn Fetcher, url: &str) -> Result<ImportResult, ImportError> {
    let text = fetcher.fetch_text(url).await?;
    let result = parse_catalog(&text)?;
    import_info!("Imported {} sources from {}", result.total_count(), url);
    Ok(result)
}

/// Re-imports a subscription. The timestamp only moves on success.
pub async fn refresh_subscription(
    fetcher: &dyn Fetcher,
    subscription: &mut Subscription,
    now: DateTime<Utc>,
) -> Result<ImportResult, ImportError> {
    match import_from_url(fetcher, &subscription.url).await {
        Ok(result) => {
            subscription.mark_refreshed(now);
            Ok(result)
        }
        Err(err) => {
            import_warn!("Refresh of subscription {} failed: {}", subscription.id, err);
            Err(err)
        }
    }
}
