//! Behaviour of the canonical formatters and of optional sections.

mod canonical;
