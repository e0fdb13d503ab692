//! Link creation, resolution and listing service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::UserId;
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::error::AppError;
use crate::utils::short_code::derive_short;
use crate::utils::url_normalizer::normalize_url;

/// Result of shortening one URL.
///
/// `duplicate` is set when the URL (or its derived short code) was already
/// stored. The short code is still the one callers should hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub short: String,
    pub duplicate: bool,
}

/// One entry of a user's URL listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUrl {
    pub short: String,
    pub long_url: String,
}

/// Service for creating, resolving and listing short links.
///
/// Handles URL normalization and short code derivation before delegating to
/// the configured [`MappingRepository`].
pub struct LinkService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: MappingRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `base_url` prefixes every short URL handed out, e.g. `http://localhost:8080`.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validates a submitted URL and returns its normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    pub fn normalize(&self, long_url: &str) -> Result<String, AppError> {
        normalize_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })
    }

    /// Shortens one URL on behalf of `owner`.
    ///
    /// # Deduplication
    ///
    /// Short codes are derived deterministically from the normalized URL, so a
    /// resubmitted URL maps to the same code. The store reports that as a
    /// duplicate, which is returned as `Ok` with `duplicate = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid URL.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn shorten(&self, long_url: &str, owner: UserId) -> Result<ShortenOutcome, AppError> {
        let long_url = self.normalize(long_url)?;
        let short = derive_short(&long_url);

        match self.repository.put(&short, &long_url, owner).await {
            Ok(()) => Ok(ShortenOutcome {
                short,
                duplicate: false,
            }),
            Err(StoreError::Duplicate) => Ok(ShortenOutcome {
                short,
                duplicate: true,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves a short code to its long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never stored.
    /// Returns [`AppError::Gone`] if the mapping was deleted.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn resolve(&self, short: &str) -> Result<String, AppError> {
        let stored = self
            .repository
            .get(short)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "short": short })))?;

        if stored.is_deleted() {
            return Err(AppError::gone(
                "Short URL was deleted",
                json!({ "short": short }),
            ));
        }

        Ok(stored.long_url)
    }

    /// Lists every URL created by `owner`, oldest first, deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn list_user_urls(&self, owner: UserId) -> Result<Vec<UserUrl>, AppError> {
        let shorts = self.repository.list_by_owner(owner).await?;

        let mut urls = Vec::with_capacity(shorts.len());
        for short in shorts {
            if let Some(stored) = self.repository.get(&short).await? {
                urls.push(UserUrl {
                    short,
                    long_url: stored.long_url,
                });
            }
        }

        Ok(urls)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short: &str) -> String {
        format!("{}/{}", self.base_url, short)
    }
}
