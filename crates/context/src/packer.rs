//! The budget packer — turns an unordered set of components plus a token
//! ceiling into the final ordered, budget-respecting set.
//!
//! Greedy by priority. A component that does not fit is dropped, except
//! that a priority >= 8 component (the system prompt) is force-included in
//! truncated form when the remaining budget clears a minimum floor —
//! essential instructions survive tight budgets in shortened form rather
//! than disappearing.

use crate::token::truncate_to_tokens;
use querygate_core::context::ContextComponent;
use tracing::debug;

/// Priority at or above which a non-fitting component is truncated into
/// the remaining budget instead of dropped.
pub const FORCE_INCLUDE_PRIORITY: u8 = 8;

/// Minimum remaining budget (tokens) for a forced include to be worth it.
pub const FORCE_INCLUDE_FLOOR: u32 = 50;

/// The packed, priority-ordered component set.
#[derive(Debug, Clone, PartialEq)]
pub struct PackResult {
    /// Included components, sorted descending by priority.
    pub components: Vec<ContextComponent>,
    /// Sum of included component token counts.
    pub total_tokens: u32,
    /// True iff anything was dropped or shortened.
    pub truncated: bool,
}

/// Pack components into `max_tokens`.
///
/// 1. Stable-sort descending by priority (ties keep input order).
/// 2. Greedily accumulate components that fit.
/// 3. The first non-fitting component with priority >= 8 is force-included
///    truncated to exactly the remaining budget — if that budget exceeds
///    the floor — and packing stops there.
/// 4. Every other non-fitting component is dropped.
/// 5. The included set is re-sorted descending by priority.
pub fn pack(mut components: Vec<ContextComponent>, max_tokens: u32) -> PackResult {
    components.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut included: Vec<ContextComponent> = Vec::new();
    let mut total_tokens = 0u32;
    let mut truncated = false;

    for comp in components {
        if total_tokens + comp.tokens <= max_tokens {
            total_tokens += comp.tokens;
            included.push(comp);
            continue;
        }

        let remaining = max_tokens - total_tokens;
        if comp.priority >= FORCE_INCLUDE_PRIORITY && remaining > FORCE_INCLUDE_FLOOR {
            debug!(
                component = %comp.name,
                original_tokens = comp.tokens,
                remaining,
                "Force-including truncated component"
            );
            let content = truncate_to_tokens(&comp.content, remaining);
            included.push(ContextComponent {
                content,
                tokens: remaining,
                ..comp
            });
            total_tokens = max_tokens;
            truncated = true;
            break;
        }

        debug!(component = %comp.name, tokens = comp.tokens, remaining, "Dropping component");
        truncated = true;
    }

    included.sort_by(|a, b| b.priority.cmp(&a.priority));

    PackResult {
        components: included,
        total_tokens,
        truncated,
    }
}
