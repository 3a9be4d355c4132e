use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Duration, NaiveDate};
use seqpipe::collectors::{joining, to_list};
use seqpipe::connectors::with_lines;
use seqpipe::pipeline::Pipeline;
use seqpipe::PipelineError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_with_lines_streams_file_contents() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "gently").unwrap();
    writeln!(file, "down").unwrap();
    writeln!(file, "the stream").unwrap();
    file.flush().unwrap();

    let lines = with_lines(file.path(), |mut pipeline| pipeline.collect(to_list())).unwrap();
    assert_eq!(lines, vec!["gently", "down", "the stream"]);
}

#[test]
fn test_with_lines_finds_first_match_lazily() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "user=alice").unwrap();
    writeln!(file, "password=hunter2").unwrap();
    writeln!(file, "theme=dark").unwrap();
    file.flush().unwrap();

    let hit = with_lines(file.path(), |pipeline| {
        pipeline.filter(|line| line.contains("password")).find_first()
    })
    .unwrap();
    assert_eq!(hit.as_deref(), Some("password=hunter2"));
}

#[test]
fn test_with_lines_missing_file_is_io_error() {
    let err = with_lines("/definitely/not/a/real/path", |mut pipeline| pipeline.collect(to_list()))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

#[test]
fn test_base64_codec_inside_map_stages() {
    let encoded = Pipeline::from_iter(["stream", "study"])
        .map(|word| STANDARD.encode(word))
        .collect(to_list())
        .unwrap();
    assert_eq!(encoded, vec!["c3RyZWFt", "c3R1ZHk="]);

    let decoded = Pipeline::from_iter(encoded)
        .map(|enc| String::from_utf8(STANDARD.decode(enc).unwrap()).unwrap())
        .collect(joining(" "))
        .unwrap();
    assert_eq!(decoded, "stream study");
}

#[test]
fn test_date_arithmetic_inside_map_stages() {
    let start = NaiveDate::from_ymd_opt(2014, 3, 18).unwrap();
    let labels = Pipeline::range(0, 3)
        .map(move |offset| (start + Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect(to_list())
        .unwrap();
    assert_eq!(labels, vec!["2014-03-18", "2014-03-19", "2014-03-20"]);
}
