use bst_engine::{Tree, TreeError, TreeStats};

fn seven() -> Tree<i32> {
    Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap()
}

fn keys<'a>(it: impl Iterator<Item = &'a i32>) -> Vec<i32> {
    it.copied().collect()
}

#[test]
fn seven_node_tree() {
    let mut tree = seven();

    assert_eq!(keys(tree.inorder()), [20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.count(), 7);
    assert_eq!(tree.leaf_count(), 4);
    assert_eq!(tree.predecessor(&60), Some(&50));
    assert_eq!(tree.successor(&60), Some(&70));

    // 50 has two children so it takes its successor's key.
    assert_eq!(tree.delete(&50), Some(50));
    assert_eq!(tree.root().map(|n| *n.key()), Some(60));
    assert_eq!(keys(tree.inorder()), [20, 30, 40, 60, 70, 80]);
    assert_eq!(tree.count(), 6);
    assert_eq!(tree.to_token_string(), "60 30 20 # # 40 # # 70 # 80 # #");
}

#[test]
fn seven_node_round_trip() {
    let tree = seven();
    let loaded: Tree<i32> = tree.to_token_string().parse().unwrap();

    assert_eq!(loaded.count(), tree.count());
    assert_eq!(loaded.height(), tree.height());
    assert_eq!(keys(loaded.inorder()), keys(tree.inorder()));
    assert_eq!(keys(loaded.preorder()), keys(tree.preorder()));
    assert_eq!(keys(loaded.postorder()), keys(tree.postorder()));
    assert_eq!(keys(loaded.level_order()), keys(tree.level_order()));
}

#[test]
fn load_replaces_only_on_success() {
    let mut tree = seven();

    let err = tree.load(&mut "10 5 # # 15".split_whitespace()).unwrap_err();
    assert!(matches!(err, TreeError::UnexpectedEndOfStream));
    assert_eq!(tree, seven());

    tree.load(&mut "10 5 # # 15 # #".split_whitespace()).unwrap();
    assert_eq!(
        tree.stats(),
        TreeStats {
            height: 2,
            count: 3,
            leaves: 2
        }
    );
}

#[test]
fn clear_then_reuse() {
    let mut tree = seven();
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.to_token_string(), "#");

    tree.insert(1).unwrap();
    assert_eq!(tree.to_token_string(), "1 # #");
}

#[test]
fn delete_absent_is_noop() {
    let mut tree = seven();

    assert_eq!(tree.delete(&55), None);
    assert_eq!(tree.to_token_string(), seven().to_token_string());
}

/// Sorted insertion builds a list. Everything but the recursive insert must cope with that
/// without blowing the call stack.
#[test]
fn degenerate_tree_is_usable() {
    let n = 100_000;
    let mut tokens = Vec::with_capacity(2 * n + 1);
    for key in 0..n {
        tokens.push(key.to_string());
        tokens.push("#".to_string());
    }
    tokens.push("#".to_string());
    let text = tokens.join(" ");

    let tree: Tree<usize> = text.parse().unwrap();
    assert_eq!(tree.height(), n);
    assert_eq!(tree.count(), n);
    assert_eq!(tree.leaf_count(), 1);
    assert!(tree.inorder().copied().eq(0..n));
    assert_eq!(tree.postorder().next(), Some(&(n - 1)));
    assert_eq!(tree.level_order().last(), Some(&(n - 1)));
    assert_eq!(tree.predecessor(&(n - 1)), Some(&(n - 2)));

    let mut copy = tree.clone();
    assert_eq!(copy, tree);
    assert_eq!(copy.delete(&0), Some(0));
    assert_eq!(copy.min(), Some(&1));
    assert_eq!(copy.insert(n).unwrap(), true);
    assert_eq!(copy.max(), Some(&n));
    assert_eq!(tree.to_token_string(), text);
}
