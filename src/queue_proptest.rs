#![cfg(test)]

// Property tests for Queue kept inside the crate so the free-list accessors
// are reachable without the `pool-stats` feature.

use crate::queue::Queue;
use proptest::prelude::*;
use std::collections::VecDeque;

// Small value domain so search/remove hit as often as they miss, and
// duplicates exercise first-match-wins.
#[derive(Clone, Debug)]
enum Op {
    Put(u8),
    Get,
    Search(u8),
    Remove(u8),
    SearchMutBump(u8),
    Apply,
    // Concat a fresh queue holding these values, after churning `churn`
    // elements through it so it brings spare links along.
    Concat(Vec<u8>, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let v = 0u8..8;
    prop_oneof![
        4 => v.clone().prop_map(Op::Put),
        2 => Just(Op::Get),
        2 => v.clone().prop_map(Op::Search),
        2 => v.clone().prop_map(Op::Remove),
        1 => v.clone().prop_map(Op::SearchMutBump),
        1 => Just(Op::Apply),
        1 => (proptest::collection::vec(v, 0..6), 0usize..8).prop_map(|(xs, c)| Op::Concat(xs, c)),
    ]
}

fn eq(e: &u8, k: &u8) -> bool {
    e == k
}

fn snapshot(q: &Queue<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(q.len());
    q.apply(|&e| out.push(e));
    out
}

// Property: state-machine equivalence against VecDeque.
// Invariants exercised across random operation sequences:
// - FIFO: `get` returns the model's front.
// - `search` returns the first match and never changes the contents.
// - `remove` takes the first match and keeps the survivors' order.
// - `concat` appends the absorbed queue's elements in order.
// - Pool accounting: spare links + remaining spaces == configured bound,
//   so the pool never exceeds its bound.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_queue_state_machine(cap in 0usize..6, ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: Queue<u8> = Queue::with_free_capacity(cap);
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                Op::Put(v) => {
                    sut.put(v).unwrap();
                    model.push_back(v);
                }
                Op::Get => {
                    prop_assert_eq!(sut.get(), model.pop_front());
                }
                Op::Search(k) => {
                    let before = snapshot(&sut);
                    let expect = model.iter().find(|&&e| e == k);
                    prop_assert_eq!(sut.search(eq, &k), expect);
                    prop_assert_eq!(snapshot(&sut), before);
                }
                Op::Remove(k) => {
                    let got = sut.remove(eq, &k);
                    let expect = model.iter().position(|&e| e == k).and_then(|i| model.remove(i));
                    prop_assert_eq!(got, expect);
                }
                Op::SearchMutBump(k) => {
                    if let Some(e) = sut.search_mut(eq, &k) {
                        *e = e.wrapping_add(100);
                    }
                    if let Some(m) = model.iter_mut().find(|e| **e == k) {
                        *m = m.wrapping_add(100);
                    }
                }
                Op::Apply => {
                    let mut n = 0usize;
                    sut.apply(|_| n += 1);
                    prop_assert_eq!(n, model.len());
                }
                Op::Concat(xs, churn) => {
                    let mut other = Queue::with_free_capacity(4);
                    for i in 0..churn {
                        other.put(i as u8).unwrap();
                    }
                    while other.get().is_some() {}
                    for &x in &xs {
                        other.put(x).unwrap();
                    }
                    sut.concat(other);
                    model.extend(xs);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(snapshot(&sut), model.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.spare_links() + sut.free_spaces(), cap);
        }
    }
}
