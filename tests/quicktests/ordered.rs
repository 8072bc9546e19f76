use ordered_tree::{OrderedTree, TreeError};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

fn sorted(xs: &[i8]) -> Vec<i8> {
    let mut xs = xs.to_vec();
    xs.sort_unstable();
    xs
}

#[quickcheck]
fn inorder_is_sorted_and_complete(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let walked: Vec<_> = tree.inorder().copied().collect();

    walked == sorted(&xs) && walked.len() == tree.len()
}

#[quickcheck]
fn preorder_visits_every_item(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut visited: Vec<_> = tree.iter().copied().collect();
    visited.sort_unstable();

    visited == sorted(&xs)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.add(*x);
        if !tree.contains(x) {
            return false;
        }
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn remove_unique_item(xs: Vec<i8>, at: usize) -> TestResult {
    let unique: HashSet<_> = xs.into_iter().collect();
    let unique: Vec<_> = unique.into_iter().collect();
    if unique.is_empty() {
        return TestResult::discard();
    }
    let target = unique[at % unique.len()];

    let mut tree: OrderedTree<_> = unique.iter().copied().collect();
    let removed = tree.remove(&target);

    TestResult::from_bool(
        removed == Ok(target) && !tree.contains(&target) && tree.len() == unique.len() - 1,
    )
}

#[quickcheck]
fn remove_missing_leaves_tree_unchanged(xs: Vec<i8>, missing: i8) -> TestResult {
    if xs.contains(&missing) {
        return TestResult::discard();
    }
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.iter().copied().collect();

    let result = tree.remove(&missing);
    let after: Vec<_> = tree.iter().copied().collect();

    TestResult::from_bool(
        result == Err(TreeError::NotFound) && before == after && tree.len() == xs.len(),
    )
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut still_present = xs;
    for remove in &removes {
        let expected = still_present
            .iter()
            .position(|x| x == remove)
            .map(|pos| still_present.swap_remove(pos))
            .ok_or(TreeError::NotFound);
        if tree.remove(remove) != expected {
            return false;
        }
    }

    tree.inorder().copied().eq(sorted(&still_present)) && tree.is_ordered()
}

#[quickcheck]
fn rebalance_keeps_items_and_bounds_height(xs: Vec<i8>) -> bool {
    let unique: HashSet<_> = xs.into_iter().collect();
    let mut tree: OrderedTree<_> = unique.iter().copied().collect();
    let before: Vec<_> = tree.inorder().copied().collect();

    tree.rebalance();

    let after: Vec<_> = tree.inorder().copied().collect();
    // ceil(log2(len + 1)) - 1
    let bound = (usize::BITS - tree.len().leading_zeros()) as usize;
    before == after && tree.height().map_or(true, |height| height < bound) && tree.is_balanced()
}

#[quickcheck]
fn neighbors_agree_with_inorder(xs: Vec<i8>, probe: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let walked: Vec<_> = tree.inorder().copied().collect();

    let successor = walked.iter().find(|x| **x > probe);
    let predecessor = walked.iter().rev().find(|x| **x < probe);

    tree.successor(&probe) == successor && tree.predecessor(&probe) == predecessor
}

#[quickcheck]
fn range_find_is_inorder_slice(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let expected: Vec<_> = sorted(&xs)
        .into_iter()
        .filter(|x| low <= *x && *x <= high)
        .collect();
    let found: Vec<_> = tree.range_find(&low, &high).into_iter().copied().collect();

    found == expected
}

#[quickcheck]
fn inorder_is_idempotent(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();

    tree.inorder().eq(tree.inorder())
}

#[quickcheck]
fn clone_matches_shape(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().collect();
    for remove in &removes {
        let _ = tree.remove(remove);
    }
    let cloned = tree.clone();

    tree.iter().eq(cloned.iter()) && tree.height() == cloned.height()
}

#[test]
fn removing_with_duplicate_predecessor_stays_ordered() {
    let mut tree: OrderedTree<i8> = [0, 0, -104, -104].into_iter().collect();

    assert_eq!(tree.remove(&0), Ok(0));
    assert!(tree.is_ordered());
    assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [-104, -104, 0]);
    assert_eq!(tree.find(&-104), Some(&-104));
    assert_eq!(tree.find(&0), Some(&0));
}

#[test]
fn ascending_chain_rebalances() {
    let mut tree: OrderedTree<_> = (1..=7).collect();
    assert_eq!(tree.height(), Some(6));

    tree.rebalance();

    assert!(tree.height() <= Some(2));
    assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
}
