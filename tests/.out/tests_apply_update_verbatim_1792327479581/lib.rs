use std::fmt;

/// Totals.
fn total(items: &[u32]) -> u32 {
    items.iter().copied().sum()
}

fn  spaced ( ) {}   
