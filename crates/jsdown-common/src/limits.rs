//! Centralized limits and thresholds.
//!
//! The lowering passes themselves walk trees with explicit work lists and
//! have no depth limit. The limits below guard the recursive test tooling
//! (source reader and reference interpreter) against runaway input.

/// Maximum nesting depth of expressions accepted by the test source reader.
///
/// ```javascript
/// ((((((((((a))))))))));   // each paren adds one level
/// f(g(h(i(j(k())))));      // each call argument adds one level
/// ```
pub const MAX_PARSE_DEPTH: u32 = 256;

/// Maximum call depth of the reference interpreter.
///
/// Exceeding it is reported as a `RangeError`, mirroring how engines report
/// stack exhaustion.
pub const MAX_CALL_DEPTH: u32 = 128;
