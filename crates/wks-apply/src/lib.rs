//! wks-apply
//!
//! Mutating side of a run: writing assignments into matched rows, clearing
//! untouched rows, triggering host recalculation, and growing the grid when
//! the plan overflows. Everything here is best-effort against the host; the
//! structural go/no-go decisions live in `wks-runtime`.

pub mod expand;
pub mod writer;

pub use expand::expand_capacity;
pub use writer::{
    apply_assignments, clear_untouched, format_hour_value, trigger_recalculation,
};
