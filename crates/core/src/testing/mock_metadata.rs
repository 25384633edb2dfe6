//! Mock metadata resolver for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::candidate::ContentType;
use crate::metadata::{MetadataError, MetadataResolver, ResolvedTitle};

enum Behavior {
    Resolve(ResolvedTitle),
    Unknown,
    Fail,
}

/// Mock implementation of the [`MetadataResolver`] trait.
///
/// Resolves every identifier to the configured title, or simulates an
/// unknown id / upstream failure.
pub struct MockMetadataResolver {
    behavior: Behavior,
    /// Recorded (media_id, content_type) lookups.
    lookups: RwLock<Vec<(String, ContentType)>>,
}

impl MockMetadataResolver {
    /// Resolve every id to the given title.
    pub fn with_title(title: &str, year: Option<u32>) -> Self {
        Self {
            behavior: Behavior::Resolve(ResolvedTitle {
                title: title.to_string(),
                year,
            }),
            lookups: RwLock::new(Vec::new()),
        }
    }

    /// Treat every id as unknown.
    pub fn unknown() -> Self {
        Self {
            behavior: Behavior::Unknown,
            lookups: RwLock::new(Vec::new()),
        }
    }

    /// Fail every lookup.
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            lookups: RwLock::new(Vec::new()),
        }
    }

    /// Get recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<(String, ContentType)> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl MetadataResolver for MockMetadataResolver {
    async fn resolve(
        &self,
        media_id: &str,
        content_type: ContentType,
    ) -> Result<Option<ResolvedTitle>, MetadataError> {
        self.lookups
            .write()
            .await
            .push((media_id.to_string(), content_type));

        match &self.behavior {
            Behavior::Resolve(resolved) => Ok(Some(resolved.clone())),
            Behavior::Unknown => Ok(None),
            Behavior::Fail => Err(MetadataError::ApiError {
                status: 500,
                message: "mock failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_configured_title() {
        let resolver = MockMetadataResolver::with_title("The Matrix", Some(1999));

        let resolved = resolver
            .resolve("tt0133093", ContentType::Movie)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.title, "The Matrix");
        assert_eq!(resolved.year, Some(1999));

        let lookups = resolver.recorded_lookups().await;
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].0, "tt0133093");
    }

    #[tokio::test]
    async fn test_unknown_and_failing() {
        let unknown = MockMetadataResolver::unknown();
        assert!(unknown
            .resolve("tt1", ContentType::Movie)
            .await
            .unwrap()
            .is_none());

        let failing = MockMetadataResolver::failing();
        assert!(failing.resolve("tt1", ContentType::Movie).await.is_err());
    }
}
