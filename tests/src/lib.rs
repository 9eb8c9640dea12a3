//! End-to-end checks across the common and core crates.

#[cfg(test)]
mod validation;
