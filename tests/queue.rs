// Queue regression suite.
//
// Single-queue scenarios cover open, get-on-empty, FIFO order, bulk fill and
// drain, and apply counting. Multi-queue scenarios start from
// q1 = {steve, bill, john}, q2 = {fred, george, nigel} and two empty queues,
// and cover search/remove at every position, misses, and all four concat
// shapes, each followed by a put to show the result is still a working queue.
mod common;

use common::*;
use hashq::Queue;

const NUM_ELEMENTS: i32 = 100;

struct Fixture {
    q1: Queue<Person>,
    q2: Queue<Person>,
    q3: Queue<Person>,
    q4: Queue<Person>,
    cory: Person,
}

fn fixture() -> Fixture {
    init_logging();
    let mut q1 = Queue::new();
    let mut q2 = Queue::new();
    for (name, age) in [("steve", STEVE_AGE), ("bill", BILL_AGE), ("john", JOHN_AGE)] {
        q1.put(make_person(name, age)).unwrap();
    }
    for (name, age) in [("fred", FRED_AGE), ("george", GEORGE_AGE), ("nigel", NIGEL_AGE)] {
        q2.put(make_person(name, age)).unwrap();
    }
    Fixture {
        q1,
        q2,
        q3: Queue::new(),
        q4: Queue::new(),
        cory: make_person("cory", CORY_AGE),
    }
}

#[test]
fn open_and_close_empty() {
    let q: Queue<Person> = Queue::new();
    assert!(q.is_empty());
    drop(q);
}

#[test]
fn get_from_empty() {
    let mut q: Queue<Person> = Queue::new();
    assert!(q.get().is_none());
}

#[test]
fn put_then_get_in_order() {
    let mut q = Queue::new();
    q.put(make_person("steve", STEVE_AGE)).unwrap();
    q.put(make_person("bill", BILL_AGE)).unwrap();
    q.put(make_person("john", JOHN_AGE)).unwrap();
    get_n_check(&mut q, "steve", STEVE_AGE);
    get_n_check(&mut q, "bill", BILL_AGE);
    get_n_check(&mut q, "john", JOHN_AGE);
    check_empty(&mut q);
}

#[test]
fn fill_and_drain() {
    let mut q = Queue::new();
    for i in 0..NUM_ELEMENTS {
        q.put(make_person("steve", i)).unwrap();
    }
    for i in 0..NUM_ELEMENTS {
        get_n_check(&mut q, "steve", i);
    }
    check_empty(&mut q);
}

#[test]
fn apply_on_empty() {
    let q: Queue<Person> = Queue::new();
    let mut cnt = 0;
    q.apply(|_| cnt += 1);
    assert_eq!(cnt, 0);
}

#[test]
fn apply_counts_everything() {
    let mut q = Queue::new();
    for _ in 0..NUM_ELEMENTS {
        q.put(make_person("steve", STEVE_AGE)).unwrap();
    }
    let mut cnt = 0;
    q.apply(|_| cnt += 1);
    assert_eq!(cnt, NUM_ELEMENTS);
}

#[test]
fn search_empty() {
    let f = fixture();
    assert!(f.q3.search(is_age, &STEVE_AGE).is_none());
}

#[test]
fn remove_from_empty() {
    let mut f = fixture();
    assert!(f.q3.remove(is_age, &STEVE_AGE).is_none());
}

#[test]
fn concat_empty_empty() {
    let mut f = fixture();
    f.q3.concat(f.q4);
    check_empty(&mut f.q3);
    f.q3.put(f.cory).unwrap();
    get_n_check(&mut f.q3, "cory", CORY_AGE);
    check_empty(&mut f.q3);
}

#[test]
fn concat_nonempty_empty() {
    let mut f = fixture();
    f.q1.concat(f.q3);
    f.q1.put(f.cory).unwrap();
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "bill", BILL_AGE);
    get_n_check(&mut f.q1, "john", JOHN_AGE);
    get_n_check(&mut f.q1, "cory", CORY_AGE);
    check_empty(&mut f.q1);
}

#[test]
fn concat_empty_nonempty() {
    let mut f = fixture();
    f.q3.concat(f.q1);
    f.q3.put(f.cory).unwrap();
    get_n_check(&mut f.q3, "steve", STEVE_AGE);
    get_n_check(&mut f.q3, "bill", BILL_AGE);
    get_n_check(&mut f.q3, "john", JOHN_AGE);
    get_n_check(&mut f.q3, "cory", CORY_AGE);
    check_empty(&mut f.q3);
}

#[test]
fn concat_nonempty_nonempty() {
    let mut f = fixture();
    f.q1.concat(f.q2);
    f.q1.put(f.cory).unwrap();
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "bill", BILL_AGE);
    get_n_check(&mut f.q1, "john", JOHN_AGE);
    get_n_check(&mut f.q1, "fred", FRED_AGE);
    get_n_check(&mut f.q1, "george", GEORGE_AGE);
    get_n_check(&mut f.q1, "nigel", NIGEL_AGE);
    get_n_check(&mut f.q1, "cory", CORY_AGE);
    check_empty(&mut f.q1);
}

#[test]
fn search_front() {
    let f = fixture();
    check_person(f.q1.search(is_age, &STEVE_AGE), "steve", STEVE_AGE);
}

#[test]
fn search_back() {
    let f = fixture();
    check_person(f.q1.search(is_age, &JOHN_AGE), "john", JOHN_AGE);
}

#[test]
fn search_middle() {
    let f = fixture();
    check_person(f.q1.search(is_age, &BILL_AGE), "bill", BILL_AGE);
}

#[test]
fn search_absent() {
    let f = fixture();
    assert!(f.q1.search(is_age, &99).is_none());
}

#[test]
fn remove_front() {
    let mut f = fixture();
    let p = f.q1.remove(is_age, &STEVE_AGE);
    check_person(p.as_ref(), "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "bill", BILL_AGE);
    get_n_check(&mut f.q1, "john", JOHN_AGE);
    check_empty(&mut f.q1);
}

#[test]
fn remove_back() {
    let mut f = fixture();
    let p = f.q1.remove(is_age, &JOHN_AGE);
    check_person(p.as_ref(), "john", JOHN_AGE);
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "bill", BILL_AGE);
    check_empty(&mut f.q1);
}

#[test]
fn remove_middle() {
    let mut f = fixture();
    let p = f.q1.remove(is_age, &BILL_AGE);
    check_person(p.as_ref(), "bill", BILL_AGE);
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "john", JOHN_AGE);
    check_empty(&mut f.q1);
}

#[test]
fn remove_absent() {
    let mut f = fixture();
    assert!(f.q1.remove(is_age, &99).is_none());
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
    get_n_check(&mut f.q1, "bill", BILL_AGE);
    get_n_check(&mut f.q1, "john", JOHN_AGE);
    check_empty(&mut f.q1);
}

// Search leaves order and contents alone.
#[test]
fn search_is_non_destructive() {
    let mut f = fixture();
    for age in [JOHN_AGE, STEVE_AGE, 99, BILL_AGE] {
        let _ = f.q1.search(is_age, &age);
    }
    let mut names = Vec::new();
    f.q1.apply(|p| names.push(p.name.clone()));
    assert_eq!(names, ["steve", "bill", "john"]);
    get_n_check(&mut f.q1, "steve", STEVE_AGE);
}

// Queues move across threads when their elements can.
#[test]
fn queue_is_send() {
    let mut f = fixture();
    let handle = std::thread::spawn(move || {
        f.q1.concat(f.q2);
        f.q1
    });
    let q = handle.join().expect("worker panicked");
    assert_eq!(q.len(), 6);
}
