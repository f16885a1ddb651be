/// Redis caching for rendered catalog responses.
///
/// All reads return `Option<T>` and all writes are fire-and-forget, so the
/// server behaves identically without Redis.
///
/// Key schema (`{fp}` is the catalog fingerprint, so a new dataset never reads
/// stale entries):
/// - `pura:v1:{fp}:detail:{id}` — JSON InternshipDetailResponse
/// - `pura:v1:{fp}:search:{sha256(query|domain|limit)}` — JSON SearchInternshipsResponse
use sha2::{Digest, Sha256};

use catalog_common::catalog_api::{InternshipDetailResponse, SearchInternshipsResponse};
use catalog_common::redis::RedisCache;

const KEY_PREFIX: &str = "pura:v1:";
const DETAIL_TTL_SECS: u64 = 86_400;
const SEARCH_TTL_SECS: u64 = 3_600;

pub struct CatalogCache {
    redis: RedisCache,
    namespace: String,
}

impl CatalogCache {
    pub fn new(redis: RedisCache, fingerprint: &str) -> Self {
        Self {
            redis,
            namespace: format!("{KEY_PREFIX}{fingerprint}:"),
        }
    }

    pub async fn get_detail(&self, id: &str) -> Option<InternshipDetailResponse> {
        self.redis.get_json(&self.detail_key(id)).await
    }

    pub async fn set_detail(&self, detail: &InternshipDetailResponse) {
        self.redis
            .set_json(&self.detail_key(&detail.id), detail, DETAIL_TTL_SECS)
            .await;
    }

    pub async fn get_search(
        &self,
        query: &str,
        domain: &str,
        limit: Option<usize>,
    ) -> Option<SearchInternshipsResponse> {
        self.redis.get_json(&self.search_key(query, domain, limit)).await
    }

    pub async fn set_search(
        &self,
        query: &str,
        domain: &str,
        limit: Option<usize>,
        response: &SearchInternshipsResponse,
    ) {
        self.redis
            .set_json(&self.search_key(query, domain, limit), response, SEARCH_TTL_SECS)
            .await;
    }

    fn detail_key(&self, id: &str) -> String {
        format!("{}detail:{}", self.namespace, id.to_ascii_uppercase())
    }

    fn search_key(&self, query: &str, domain: &str, limit: Option<usize>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        hasher.update(b"|");
        hasher.update(domain.as_bytes());
        hasher.update(b"|");
        if let Some(limit) = limit {
            hasher.update(limit.to_string().as_bytes());
        }
        format!("{}search:{:x}", self.namespace, hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_fingerprint() {
        let a = CatalogCache::new(RedisCache::disabled(), "aaa");
        let b = CatalogCache::new(RedisCache::disabled(), "bbb");
        assert_eq!(a.detail_key("pfe-26-dev1"), "pura:v1:aaa:detail:PFE-26-DEV1");
        assert_ne!(
            a.search_key("seo", "All", None),
            b.search_key("seo", "All", None)
        );
    }

    #[test]
    fn search_key_covers_every_input() {
        let cache = CatalogCache::new(RedisCache::disabled(), "fp");
        let base = cache.search_key("seo", "All", Some(10));
        assert_ne!(base, cache.search_key("seo", "Business Management", Some(10)));
        assert_ne!(base, cache.search_key("seo", "All", Some(5)));
        assert_ne!(base, cache.search_key("seo", "All", None));
        assert_ne!(base, cache.search_key("crm", "All", Some(10)));
        assert!(base.starts_with("pura:v1:fp:search:"));
    }

    #[tokio::test]
    async fn disabled_cache_misses() {
        let cache = CatalogCache::new(RedisCache::disabled(), "fp");
        assert!(cache.get_detail("PFE-26-DEV1").await.is_none());
        assert!(cache.get_search("", "All", None).await.is_none());
    }
}
