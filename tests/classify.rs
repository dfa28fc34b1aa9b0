extern crate texgraph;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

use std::fs::File;
use std::io::BufReader;

use rand::Rng;
use texgraph::parser::{classify, Construct};
use texgraph::process;


#[derive(Debug, Deserialize)]
struct Case {
    input    : String,
    expected : Construct,
}

#[test]
fn constructs() {
    let file = File::open("tests/data/constructs.yaml").expect("failed to open constructs yaml");
    let reader = BufReader::new(file);
    let cases : Vec<Case> = serde_yaml::from_reader(reader).expect("failed to parse constructs.yaml");
    let mut fail = 0;

    for case in cases.iter() {
        let construct = process(&case.input);
        if construct != case.expected {
            println!("Input: {}", case.input);
            println!("Expected: {:?}", case.expected);
            println!("Got:      {:?}", construct);
            fail += 1;
        }
    }

    if fail > 0 {
        panic!("{} of {} construct tests failed.", fail, cases.len());
    }
}

/// Random soup of markup fragments, many of them unbalanced
#[test]
fn classification_is_total() {
    const FRAGMENTS : &[&str] = &[
        r"\int", r"\sum", r"\frac", r"\left", r"\right", r"\left.", r"\right|", r"\Big|", r"\lvert",
        "{", "}", "(", ")", "|", "_", "^", "=", "d", "x", "t", "2", " ", r"\,", r"\theta", r"\",
        r"\mathrm{d}", r"\operatorname{abs}", "abs", "sin", r"\dfrac", r"\limits", "é",
    ];

    let mut rng = rand::thread_rng();
    for _ in 0 .. 2_000 {
        let length = rng.gen_range(0 .. 16);
        let input : String = (0 .. length).map(|_| FRAGMENTS[rng.gen_range(0 .. FRAGMENTS.len())]).collect();

        let construct = process(&input);
        let canonical = texgraph::canonicalize(&input);
        let recognizable = [r"\sum", r"\int", r"\frac"].iter().any(|command| canonical.trim_start().starts_with(command));
        if !recognizable {
            assert!(matches!(construct, Construct::Plain(_)), "{:?} classified as {:?}", input, construct);
        }

        // classifying is pure
        assert_eq!(classify(&canonical), construct);
    }
}
