//! Helper the walkthrough tests pull in as documented source.

pub fn double(value: usize) -> usize {
    value * 2
}
