use bst_engine::Tree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone()).unwrap();
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                bst.delete(k);
                set.remove(k);
            }
        }
    }
}

#[quickcheck]
fn inorder_matches_reference_set(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.inorder().eq(set.iter())
}

#[quickcheck]
fn inorder_strictly_ascending(ops: Vec<Op<i16>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    let keys: Vec<_> = tree.inorder().collect();
    keys.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::from_keys(xs.iter().copied()).unwrap();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn duplicate_insert_is_idempotent(xs: Vec<i8>, dup: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let before = tree.clone();
    let stats = tree.stats();

    let inserted = tree.insert(xs[dup % xs.len()]).unwrap();

    !inserted && tree == before && tree.stats() == stats
}

#[quickcheck]
fn iterative_and_recursive_insert_agree(xs: Vec<i16>) -> bool {
    let mut iterative = Tree::new();
    let mut recursive = Tree::new();
    for x in &xs {
        iterative.insert(*x).unwrap();
        recursive.insert_recursive(*x).unwrap();
    }

    iterative == recursive
}

#[quickcheck]
fn deleting_everything_empties(xs: Vec<i8>) -> bool {
    let mut tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let distinct: BTreeSet<_> = xs.iter().copied().collect();
    for x in &distinct {
        if tree.delete(x) != Some(*x) {
            return false;
        }
    }

    tree.count() == 0 && tree.to_token_string() == "#"
}

#[quickcheck]
fn preorder_rebuilds_same_shape(xs: Vec<i16>) -> bool {
    let tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let rebuilt = Tree::from_keys(tree.preorder().copied()).unwrap();

    rebuilt == tree
}

#[quickcheck]
fn traversals_agree_on_key_set(xs: Vec<i16>) -> bool {
    let tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let sorted = |it: Vec<i16>| {
        let mut it = it;
        it.sort_unstable();
        it
    };
    let inorder: Vec<_> = tree.inorder().copied().collect();

    sorted(tree.preorder().copied().collect()) == inorder
        && sorted(tree.postorder().copied().collect()) == inorder
        && sorted(tree.level_order().copied().collect()) == inorder
        && inorder.len() == tree.count()
}

#[quickcheck]
fn neighbors_are_adjacent_in_sorted_order(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.iter().copied()).unwrap();
    let sorted: Vec<i8> = tree.inorder().copied().collect();

    probes.iter().chain(&xs).all(|probe| {
        let below = sorted.iter().rev().find(|k| *k < probe);
        let above = sorted.iter().find(|k| *k > probe);
        tree.predecessor(probe) == below && tree.successor(probe) == above
    })
}
