//! Tests for CourseIndex

use rstest::rstest;

use coursetree::domain::{Course, CourseIndex};
use coursetree::util::testing;

fn course(id: &str, name: &str) -> Course {
    Course::new(id, name, Vec::<String>::new())
}

fn ids(index: &CourseIndex) -> Vec<String> {
    index.iter().map(|c| c.id().to_string()).collect()
}

/// Deterministic permutation of `0..n` (linear congruential shuffle).
fn shuffled(n: usize, seed: u64) -> Vec<usize> {
    let mut values: Vec<usize> = (0..n).collect();
    let mut state = seed;
    for i in (1..n).rev() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        values.swap(i, j);
    }
    values
}

#[test]
fn given_fresh_index_when_counting_then_zero() {
    testing::init_test_setup();
    let index = CourseIndex::new();

    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
}

#[rstest]
#[case(vec!["CSCI300", "CSCI100", "MATH201", "CSCI200", "CSCI101"])]
#[case(vec!["A", "B", "C", "D", "E", "F"])]
#[case(vec!["F", "E", "D", "C", "B", "A"])]
#[case(vec!["M", "A", "Z", "B", "Y", "C", "X"])]
fn given_any_insert_order_when_iterating_then_ids_strictly_ascend(#[case] order: Vec<&str>) {
    // Arrange
    let mut index = CourseIndex::new();
    for id in &order {
        index.insert(course(id, "name"));
    }

    // Act
    let result = ids(&index);

    // Assert
    let mut expected: Vec<String> = order.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(result, expected);
    assert!(result.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(index.len(), order.len());
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
fn given_shuffled_inserts_when_iterating_then_sorted_and_complete(#[case] seed: u64) {
    // Arrange
    let mut index = CourseIndex::new();
    for n in shuffled(500, seed) {
        index.insert(course(&format!("CS{:04}", n), "name"));
    }

    // Act
    let result = ids(&index);

    // Assert
    assert_eq!(result.len(), 500);
    assert!(result.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(result[0], "CS0000");
    assert_eq!(result[499], "CS0499");
}

#[test]
fn given_existing_id_when_inserting_again_then_overwrites_without_growing() {
    // Arrange
    let mut index = CourseIndex::new();
    index.insert(Course::new("CS200", "Old Name", ["CS100"]));
    index.insert(course("CS100", "Intro"));
    let before = index.len();

    // Act
    index.insert(Course::new("cs200", "New Name", ["CS300"]));

    // Assert
    assert_eq!(index.len(), before);
    let stored = index.search("CS200").unwrap();
    assert_eq!(stored.name(), "New Name");
    assert_eq!(stored.prerequisites(), ["CS300"]);
}

#[rstest]
#[case("cs101")]
#[case("CS101")]
#[case("Cs101")]
fn given_any_case_when_searching_then_finds_same_course(#[case] query: &str) {
    let mut index = CourseIndex::new();
    index.insert(course("CS100", "Zero"));
    index.insert(course("CS101", "Intro"));
    index.insert(course("CS102", "Two"));

    let found = index.search(query).expect("course should be found");

    assert_eq!(found.id(), "CS101");
    assert_eq!(found.name(), "Intro");
}

#[test]
fn given_missing_id_when_searching_then_none() {
    let mut index = CourseIndex::new();
    index.insert(course("CS101", "Intro"));

    assert!(index.search("CS1").is_none());
    assert!(index.search("CS1010").is_none());
    assert!(index.search("").is_none());
}

#[test]
fn given_index_when_iterating_twice_then_each_walk_is_complete() {
    let mut index = CourseIndex::new();
    for id in ["B", "A", "C"] {
        index.insert(course(id, "name"));
    }

    let first: Vec<_> = index.iter().map(|c| c.id()).collect();
    let second: Vec<_> = (&index).into_iter().map(|c| c.id()).collect();

    assert_eq!(first, ["A", "B", "C"]);
    assert_eq!(first, second);
}

#[test]
fn given_ascending_inserts_when_walking_then_no_stack_overflow() {
    // Arrange: fully right-skewed tree, depth == n
    let n = 10_000;
    let mut index = CourseIndex::new();
    for i in 0..n {
        index.insert(course(&format!("C{:06}", i), "name"));
    }

    // Act / Assert
    assert_eq!(index.depth(), n);
    assert_eq!(index.len(), n);
    assert_eq!(index.iter().count(), n);
    assert_eq!(index.search("C009999").map(|c| c.id()), Some("C009999"));
    drop(index);
}

#[test]
fn given_balanced_inserts_when_measuring_depth_then_logarithmic() {
    let mut index = CourseIndex::new();
    for id in ["D", "B", "F", "A", "C", "E", "G"] {
        index.insert(course(id, "name"));
    }

    assert_eq!(index.depth(), 3);
    let rendered = index.to_tree_string().to_string();
    assert!(rendered.contains("L: B"));
    assert!(rendered.contains("R: G"));
}
