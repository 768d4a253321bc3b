//! Generic function helpers.

use std::ops::Mul;

use num_traits::Zero;

use crate::domain::error::{DomainError, DomainResult};

/// A predicate that holds when every one of `predicates` holds.
///
/// An empty list yields a predicate that is always true.
pub fn combine_predicates<T, P>(predicates: Vec<P>) -> impl Fn(&T) -> bool
where
    P: Fn(&T) -> bool,
{
    move |item: &T| predicates.iter().all(|predicate| predicate(item))
}

/// Scalar product `a1*b1 + a2*b2 + ... + aN*bN` for any numeric type.
///
/// # Errors
/// `InvalidArgument` when the vectors differ in length.
///
/// # Example
/// ```
/// use seqtree::domain::scalar_product;
///
/// assert_eq!(scalar_product(&[1, 2, 3], &[4, 5, 6]).unwrap(), 32);
/// assert_eq!(scalar_product(&[0.5_f64], &[4.0]).unwrap(), 2.0);
/// ```
pub fn scalar_product<T>(first: &[T], second: &[T]) -> DomainResult<T>
where
    T: Zero + Mul<Output = T> + Copy,
{
    if first.len() != second.len() {
        return Err(DomainError::invalid_argument(format!(
            "vector lengths differ: {} vs {}",
            first.len(),
            second.len()
        )));
    }
    Ok(first
        .iter()
        .zip(second)
        .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
}
