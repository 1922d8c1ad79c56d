mod common;
use common::{INPUT1_SECRET, INPUT2_SECRET, fixtures_dir};
use num_bigint::BigInt;
use secret_recovery::testcase::{TestCase, process, source::FileSystemInputSource};

#[test]
fn test_process_fixtures() {
    let source = FileSystemInputSource::new(fixtures_dir());
    assert_eq!(
        process(&source, "input1.json").unwrap().to_string(),
        INPUT1_SECRET
    );
    assert_eq!(
        process(&source, "input2.json").unwrap().to_string(),
        INPUT2_SECRET
    );
}

#[test]
fn test_secret_does_not_depend_on_chosen_points() {
    let raw = std::fs::read_to_string(fixtures_dir().join("input2.json")).unwrap();
    let test_case = TestCase::parse(&raw).unwrap();
    assert_eq!(test_case.n, test_case.points.len());

    let expected = INPUT2_SECRET.parse::<BigInt>().unwrap();
    let mut points = test_case.points.clone();
    // Any k of the points lie on the same polynomial
    for _ in 0..test_case.points.len() {
        points.rotate_left(1);
        let rotated = TestCase {
            points: points.clone(),
            ..test_case.clone()
        };
        assert_eq!(rotated.secret().unwrap(), expected);
    }
}
