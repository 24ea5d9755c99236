// crates/remediation-core/src/runtime/ids.rs
// ============================================================================
// Module: Invocation Identifiers
// Description: Process-scoped generator for per-invocation identifiers.
// Purpose: Give every audit record a key no other invocation can reuse.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Identifiers combine a random boot id drawn once per process with a
//! monotonic sequence, so two invocations never share an id within a
//! process and concurrent processes collide only if their boot ids do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::core::InvocationId;

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Boot-scoped invocation id generator.
///
/// # Invariants
/// - Issued identifiers are unique within the process lifetime.
#[derive(Debug)]
pub struct InvocationIdGenerator {
    /// Boot-scoped random component.
    boot_id: u64,
    /// Monotonic counter for ids issued by this generator.
    counter: AtomicU64,
}

impl InvocationIdGenerator {
    /// Creates a generator with a random boot id.
    #[must_use]
    pub fn new() -> Self {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        Self::with_boot_id(u64::from_be_bytes(bytes))
    }

    /// Creates a generator with a fixed boot id.
    #[must_use]
    pub const fn with_boot_id(boot_id: u64) -> Self {
        Self {
            boot_id,
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next identifier.
    #[must_use]
    pub fn issue(&self) -> InvocationId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        InvocationId::new(format!("{:016x}{seq:08x}", self.boot_id))
    }
}

impl Default for InvocationIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
