//! # Querygate Context
//!
//! Context assembly pipeline — builds a final prompt from several
//! independently sized content sources under a hard token ceiling:
//!
//! 1. **System instructions** (per-tier template) — priority 10, eligible
//!    for forced truncation instead of dropping
//! 2. **Conversation history** (recent turns) — priority 7
//! 3. **Long-term memory** (ranked snippets) — priority 6
//! 4. **Page context** (current page + data) — priority 5
//! 5. **User profile** (identifier line) — priority 4
//!
//! Components are packed greedily in priority order; whatever does not fit
//! is dropped (or, for the system prompt, truncated to the remaining
//! budget). Assembly is deterministic: identical inputs always produce
//! identical outputs, which is what makes the memoizing cache sound.

pub mod assembler;
pub mod builders;
pub mod cache;
pub mod packer;
pub mod token;

pub use assembler::ContextAssembler;
pub use cache::{CacheKey, CacheStats, ContextCache};
pub use packer::{pack, PackResult};
