use std::{convert::TryFrom, fs::File, io::Write};

use apriori::{Dataset, Error};

#[test]
fn read_file() {
    let ds = Dataset::read_file("tests/data/weather.txt").expect("failed to read file");
    assert_eq!(ds.attribute_names(), ["outlook", "temperature", "humidity", "windy", "play"]);
    assert_eq!(ds.num_instances(), 14);
    assert_eq!(ds.records()[0], ["sunny", "85", "85", "false", "no"]);
    let play = ds.attribute(4).unwrap();
    assert_eq!(play.values(), ["no", "yes"]);
    assert_eq!(play.weights(), [5, 9]);
    // the truncated last line is not counted
    assert_eq!(ds.attribute(0).unwrap().weight_of("sunny"), Some(5));
}

#[test]
fn try_from_file() {
    let f = File::open("tests/data/weather.txt").expect("failed to open file");
    let ds = Dataset::try_from(f).expect("failed to read file");
    assert_eq!(ds.num_instances(), 14);
    assert_eq!(ds.name(), None);
}

#[test]
fn missing_file() {
    assert!(matches!(Dataset::read_file("tests/data/does-not-exist.txt"), Err(Error::Io(_))));
}

#[test]
fn numeric_tokens_are_normalized() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "x y\n\n1.0 2.5\n1 'quoted 2.5'").unwrap();
    let ds = Dataset::read_file(f.path()).unwrap();
    assert_eq!(ds.records(), [vec!["1", "2"], vec!["1", "quoted 2.5"]]);
    assert_eq!(ds.attribute(0).unwrap().weights(), [2]);
}
