//! The context assembler — generates components from the enabled sources,
//! packs them under the budget, and memoizes the result.
//!
//! `build` never fails: an infeasible budget yields an essentially empty
//! context with `truncated = true`, and callers are expected to tolerate a
//! context with few or zero components.

use crate::builders;
use crate::cache::{CacheKey, CacheStats, ContextCache};
use crate::packer;
use querygate_core::context::{
    BuiltContext, ContextBuildConfig, MemorySnippet, PageContext, Turn,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The context assembler. Create one and share it; the embedded cache is
/// thread-safe.
pub struct ContextAssembler {
    cache: ContextCache,
}

impl ContextAssembler {
    /// Create an assembler whose cache uses the given TTL.
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            cache: ContextCache::new(cache_ttl),
        }
    }

    /// Create an assembler with the default 5-minute cache TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(300))
    }

    /// Build (or fetch from cache) a budget-respecting context.
    pub fn build(
        &self,
        config: &ContextBuildConfig,
        query: &str,
        user_id: Option<&str>,
        history: &[Turn],
        page_context: Option<&PageContext>,
        memory: &[MemorySnippet],
    ) -> Arc<BuiltContext> {
        let key = CacheKey::new(config.size_tier, config.max_tokens, user_id, query);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let tier = config.size_tier;
        let mut components = Vec::new();

        components.extend(builders::build_system_prompt(tier));
        if config.include_history {
            components.extend(builders::build_history(history, tier));
        }
        if config.include_memory {
            components.extend(builders::build_memory(memory, tier));
        }
        if config.include_page_context {
            components.extend(builders::build_page_context(page_context, tier));
        }
        if config.include_user_profile {
            components.extend(builders::build_user_profile(user_id, tier));
        }

        let packed = packer::pack(components, config.max_tokens);

        let system_prompt = packed
            .components
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        debug!(
            tier = %tier,
            total_tokens = packed.total_tokens,
            component_count = packed.components.len(),
            truncated = packed.truncated,
            "Assembled context"
        );

        let built = Arc::new(BuiltContext {
            system_prompt,
            components: packed.components,
            total_tokens: packed.total_tokens,
            truncated: packed.truncated,
            config: config.clone(),
        });

        self.cache.put(key, built.clone());
        built
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop expired cache entries.
    pub fn purge_cache(&self) {
        self.cache.purge_expired();
    }
}
