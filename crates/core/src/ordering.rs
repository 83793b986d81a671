//! Sibling order planning.
//!
//! Documents, pages and tasks are ordered by an integer key. The database
//! layer reads the current keys, asks this module what to write, and applies
//! the answer inside one transaction.

use serde::Serialize;

use crate::types::OrderValue;

/// Which neighbour to exchange places with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards smaller order values (earlier in the list).
    Up,
    /// Towards larger order values (later in the list).
    Down,
}

/// A sibling identified by its key (location, page name or task id) and its
/// current order value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling<K> {
    pub key: K,
    pub order: OrderValue,
}

/// New order values for the two sides of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlan {
    pub first: OrderValue,
    pub second: OrderValue,
}

/// Next free order value given the current maximum of the scope.
/// An empty scope starts at `0`.
pub fn next_order(current_max: Option<OrderValue>) -> OrderValue {
    current_max.map_or(0, |max| max + 1)
}

/// Plan the exchange of two order values.
///
/// Distinct values are swapped. Equal values cannot be ordered by swapping,
/// so both sides receive fresh values from `next`: the first side ends up
/// before the second.
pub fn plan_swap(first: OrderValue, second: OrderValue, next: OrderValue) -> SwapPlan {
    if first == second {
        SwapPlan {
            first: next,
            second: next + 1,
        }
    } else {
        SwapPlan {
            first: second,
            second: first,
        }
    }
}

/// Find the sibling directly above (`Up`) or below (`Down`) `key`.
///
/// Only strictly smaller / strictly larger order values qualify, so a tie
/// never counts as a neighbour. Returns `None` when `key` is not among the
/// siblings or is already at that end.
pub fn find_neighbor<'a, K, Q>(
    siblings: &'a [Sibling<K>],
    key: &Q,
    direction: Direction,
) -> Option<&'a Sibling<K>>
where
    K: PartialEq<Q>,
    Q: ?Sized,
{
    let current = siblings.iter().find(|s| s.key == *key)?.order;
    let candidates = siblings.iter().filter(|s| s.key != *key);
    match direction {
        Direction::Up => candidates
            .filter(|s| s.order < current)
            .max_by_key(|s| s.order),
        Direction::Down => candidates
            .filter(|s| s.order > current)
            .min_by_key(|s| s.order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn siblings(entries: &[(&str, OrderValue)]) -> Vec<Sibling<String>> {
        entries
            .iter()
            .map(|(key, order)| Sibling {
                key: key.to_string(),
                order: *order,
            })
            .collect()
    }

    #[test]
    fn next_order_of_empty_scope_is_zero() {
        assert_eq!(next_order(None), 0);
        assert_eq!(next_order(Some(0)), 1);
        assert_eq!(next_order(Some(41)), 42);
    }

    #[test]
    fn swap_distinct_values_exchanges() {
        assert_eq!(
            plan_swap(3, 7, 100),
            SwapPlan {
                first: 7,
                second: 3
            }
        );
    }

    #[test]
    fn swap_plan_is_an_involution() {
        let once = plan_swap(3, 7, 100);
        let twice = plan_swap(once.first, once.second, 100);
        assert_eq!((twice.first, twice.second), (3, 7));
    }

    #[test]
    fn swap_equal_values_reassigns_fresh() {
        assert_eq!(
            plan_swap(5, 5, 9),
            SwapPlan {
                first: 9,
                second: 10
            }
        );
    }

    #[test]
    fn neighbor_up_and_down() {
        let list = siblings(&[("a", 0), ("b", 4), ("c", 2), ("d", 9)]);
        assert_eq!(find_neighbor(&list, "c", Direction::Up).unwrap().key, "a");
        assert_eq!(find_neighbor(&list, "c", Direction::Down).unwrap().key, "b");
        assert_eq!(find_neighbor(&list, "b", Direction::Down).unwrap().key, "d");
    }

    #[test]
    fn neighbor_at_the_ends_is_none() {
        let list = siblings(&[("a", 0), ("b", 1)]);
        assert!(find_neighbor(&list, "a", Direction::Up).is_none());
        assert!(find_neighbor(&list, "b", Direction::Down).is_none());
    }

    #[test]
    fn neighbor_ignores_ties_and_unknown_keys() {
        let list = siblings(&[("a", 1), ("b", 1)]);
        assert!(find_neighbor(&list, "a", Direction::Down).is_none());
        assert!(find_neighbor(&list, "b", Direction::Up).is_none());
        assert!(find_neighbor(&list, "zzz", Direction::Up).is_none());
    }
}
