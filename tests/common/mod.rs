// Shared fixtures: a small record type and the checks the drivers use.
#![allow(dead_code)]

use hashq::Queue;

pub const SALARY: f64 = 50.0;
pub const STEVE_AGE: i32 = 10;
pub const BILL_AGE: i32 = 11;
pub const JOHN_AGE: i32 = 12;
pub const FRED_AGE: i32 = 13;
pub const GEORGE_AGE: i32 = 14;
pub const NIGEL_AGE: i32 = 15;
pub const CORY_AGE: i32 = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub salary: f64,
}

pub fn make_person(name: &str, age: i32) -> Person {
    Person {
        name: name.to_string(),
        age,
        salary: SALARY,
    }
}

pub fn check_person(p: Option<&Person>, name: &str, age: i32) {
    let p = p.unwrap_or_else(|| panic!("expected {name} (age {age}), found nothing"));
    assert_eq!(p.name, name);
    assert_eq!(p.age, age);
    assert!(p.salary >= 0.0);
}

pub fn get_n_check(q: &mut Queue<Person>, name: &str, age: i32) {
    let p = q.get();
    check_person(p.as_ref(), name, age);
}

pub fn check_empty<T: std::fmt::Debug>(q: &mut Queue<T>) {
    if let Some(e) = q.get() {
        panic!("queue should be empty, got {e:?}");
    }
}

/// Matches a person by age against a native-endian `i32` key.
pub fn is_age(p: &Person, key: &i32) -> bool {
    p.age == *key
}

/// Table variant of `is_age`: the key is the age's little-endian bytes.
pub fn is_age_bytes(p: &Person, key: &[u8; 4]) -> bool {
    p.age == i32::from_le_bytes(*key)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
