use std::fs;
use std::io::Write;
use tempfile::TempDir;

use entrench_core::config::{Config, PipelineConfig};
use entrench_core::corpus::{discover, CorpusAssembler, DecodePolicy};
use entrench_core::error::Error;

#[test]
fn assemble_parses_names_and_keeps_input_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("South_Africa_1996.txt"), "We, the people of South Africa").unwrap();
    fs::write(dir.join("Brazil_1988.txt"), "Nós, representantes do povo brasileiro").unwrap();
    fs::write(dir.join("Nowhereland.txt"), "").unwrap();

    // Deliberately not alphabetical.
    let files = vec![
        dir.join("South_Africa_1996.txt"),
        dir.join("Brazil_1988.txt"),
        dir.join("Nowhereland.txt"),
    ];
    let corpus = CorpusAssembler::default().assemble(&files).expect("assemble");

    assert_eq!(corpus.len(), files.len(), "one row per input file");
    let rows: Vec<(&str, &str)> = corpus.countries().zip(corpus.years()).collect();
    assert_eq!(rows, vec![("South Africa", "1996"), ("Brazil", "1988"), ("", "Nowhereland")]);
    assert_eq!(corpus.records()[1].text, "Nós, representantes do povo brasileiro");
    assert_eq!(corpus.records()[2].text, "", "empty file still yields a row");
}

#[test]
fn assemble_keeps_duplicate_rows() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Chile_1980.txt");
    fs::write(&path, "Artículo 1").unwrap();

    let corpus = CorpusAssembler::default().assemble([&path, &path]).expect("assemble");
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.records()[0], corpus.records()[1]);
}

#[test]
fn missing_file_fails_whole_assembly() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("Brazil_1988.txt"), "text").unwrap();

    let files = vec![dir.join("Brazil_1988.txt"), dir.join("Atlantis_1000.txt")];
    let err = CorpusAssembler::default().assemble(&files).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn text_is_read_verbatim() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Japan_1946.txt");
    let mut f = fs::File::create(&path).unwrap();
    write!(f, "  Article 9\r\n\r\nAspiring sincerely...\n").unwrap();

    let corpus = CorpusAssembler::default().assemble([&path]).expect("assemble");
    assert_eq!(corpus.records()[0].text, "  Article 9\r\n\r\nAspiring sincerely...\n");
}

#[test]
fn decode_policy_controls_invalid_utf8() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Kenya_2010.txt");
    fs::write(&path, b"We, the people\xc3 of Kenya").unwrap();

    let lossy = CorpusAssembler::new(DecodePolicy::Lossy).assemble([&path]).expect("lossy read");
    assert_eq!(lossy.records()[0].text, "We, the people of Kenya");

    let err = CorpusAssembler::new(DecodePolicy::Strict).assemble([&path]).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
}

#[test]
fn assembler_takes_policy_from_config() {
    let mut cfg = PipelineConfig::default();
    cfg.corpus.decode = DecodePolicy::Strict;
    assert_eq!(CorpusAssembler::from_config(&cfg).decode_policy(), DecodePolicy::Strict);

    let cfg = Config::from_figment(Config::defaults()).pipeline().expect("defaults");
    assert_eq!(CorpusAssembler::from_config(&cfg).decode_policy(), DecodePolicy::Lossy);
}

#[test]
fn discover_lists_txt_files_sorted() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("americas")).unwrap();
    fs::write(dir.join("americas/Brazil_1988.txt"), "a").unwrap();
    fs::write(dir.join("Albania_1998.txt"), "b").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let files = discover(dir).expect("discover");
    assert_eq!(files, vec![dir.join("Albania_1998.txt"), dir.join("americas/Brazil_1988.txt")]);
}

#[test]
fn discover_missing_dir_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = discover(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}
