//! The at-rule substitution passes, in the order [`Processor`](crate::Processor)
//! runs them:
//!
//! 1. [`tailwind`]: `@tailwind base|components|utilities` → plugin output
//! 2. [`functions`]: `theme('path')` → theme values
//! 3. [`variants`]: `@variants <list>` → one copy per variant
//! 4. [`responsive`]: `@responsive` → one media query per screen
//! 5. [`unwrap`]: `[.anchor]` markers → plain classes
//! 6. [`screen`]: `@screen <name>` → `@media <query>`
//!
//! Each pass mutates the tree in place and fully completes before the next starts.

pub mod functions;
pub mod responsive;
pub mod screen;
pub mod tailwind;
pub mod unwrap;
pub mod variants;

pub use functions::evaluate_theme_functions;
pub use responsive::substitute_responsive_at_rules;
pub use screen::substitute_screen_at_rules;
pub use tailwind::substitute_tailwind_at_rules;
pub use unwrap::unwrap_variant_targets;
pub use variants::substitute_variants_at_rules;
