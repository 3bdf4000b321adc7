#![deny(missing_docs)]

//! Set algebra over strictly increasing slices.
//!
//! Inputs must be sorted with no repeated elements; every operation walks both
//! slices once and returns a new strictly increasing vector. Any `Ord + Clone`
//! element type works, vertex ids included.

use std::cmp::Ordering;

/// Returns `true` when every element is strictly smaller than the next one.
pub fn is_strictly_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}

/// Elements present in `a`, in `b`, or in both.
pub fn union<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    debug_assert!(is_strictly_sorted(a) && is_strictly_sorted(b));
    let mut out = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Elements present in both `a` and `b`.
pub fn intersect<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    debug_assert!(is_strictly_sorted(a) && is_strictly_sorted(b));
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Elements of `a` that are not in `b`.
pub fn subtract<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    debug_assert!(is_strictly_sorted(a) && is_strictly_sorted(b));
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out
}
