use bst_engine::{Tree, TokenReader, TokenWriter};
use quickcheck_macros::quickcheck;

use crate::Op;

fn build(ops: &[Op<i16>]) -> Tree<i16> {
    let mut tree = Tree::new();
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(*k).unwrap();
            }
            Op::Delete(k) => {
                tree.delete(k);
            }
        }
    }
    tree
}

#[quickcheck]
fn round_trip_keeps_every_slot(ops: Vec<Op<i16>>) -> bool {
    let tree = build(&ops);
    let back: Tree<i16> = tree.to_token_string().parse().unwrap();

    back.preorder_with_sentinels()
        .eq(tree.preorder_with_sentinels())
}

#[quickcheck]
fn round_trip_through_io(ops: Vec<Op<i16>>) -> bool {
    let tree = build(&ops);

    let mut writer = TokenWriter::new(Vec::new());
    tree.serialize(&mut writer).unwrap();
    let bytes = writer.into_inner();
    let back: Tree<i16> = Tree::deserialize(&mut TokenReader::new(&bytes[..])).unwrap();

    back == tree && back.height() == tree.height() && back.leaf_count() == tree.leaf_count()
}

#[quickcheck]
fn sentinel_count_is_one_more_than_nodes(xs: Vec<i16>) -> bool {
    let tree = Tree::from_keys(xs).unwrap();
    let mut tokens = Vec::new();
    tree.serialize(&mut tokens).unwrap();

    let sentinels = tokens.iter().filter(|t| *t == "#").count();
    sentinels == tree.count() + 1 && tokens.len() == 2 * tree.count() + 1
}

#[quickcheck]
fn truncated_streams_never_load(xs: Vec<i16>, cut: usize) -> bool {
    let mut target = Tree::from_keys([1, 2, 3]).unwrap();
    let before = target.clone();

    let source = Tree::from_keys(xs).unwrap();
    let mut tokens = Vec::new();
    source.serialize(&mut tokens).unwrap();
    let cut = cut % tokens.len();
    let truncated = tokens[..cut].join(" ");

    target.load(&mut truncated.split_whitespace()).is_err() && target == before
}
