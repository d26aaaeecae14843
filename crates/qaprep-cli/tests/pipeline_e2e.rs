//! End-to-end tests driving the `qaprep` binary through the pipeline:
//! preprocess → export → convert → format-prompts, plus failure exits.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

fn qaprep_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_qaprep"))
}

#[test]
fn convert_emits_line_delimited_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("formatted_training_data.txt");
    let out = dir.path().join("dataset.jsonl");
    fs::write(&input, "Question: Where?\nContext: Here.\nAnswer: Home.\n\n").unwrap();

    let status = Command::new(qaprep_bin())
        .args(["convert"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("run qaprep convert");
    assert!(status.success());

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "{\"question\":\"Where?\",\"answer\":\"Home.\",\"context\":\"Here.\"}\n"
    );
}

#[test]
fn preprocess_resolves_against_both_documents() {
    let dir = tempdir().unwrap();
    let pages = dir.path().join("handbook_pages.json");
    let handbook = dir.path().join("handbook.json");
    let questions = dir.path().join("questions.json");
    let out = dir.path().join("training_data.json");

    fs::write(&pages, r#"{"Page_2": "Room 12, Block A"}"#).unwrap();
    fs::write(
        &handbook,
        r#"{"handbook": {"institution_info": {"name": {"former_names": ["Old College", "Older College"]}}}}"#,
    )
    .unwrap();
    fs::write(
        &questions,
        r#"[
            {"question": "Where is the centre?", "key": "Page_2"},
            {"question": "Former names?", "key": "handbook.institution_info.name.former_names"},
            {"question": "Unanswerable?", "key": "Page_99"}
        ]"#,
    )
    .unwrap();

    let status = Command::new(qaprep_bin())
        .arg("preprocess")
        .arg("--pages")
        .arg(&pages)
        .arg("--handbook")
        .arg(&handbook)
        .arg("--questions")
        .arg(&questions)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("run qaprep preprocess");
    assert!(status.success());

    let entries: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["context"], "Room 12, Block A");
    assert_eq!(entries[0]["answers"]["answer_start"][0], 0);
    assert_eq!(entries[1]["context"], "Old College; Older College");
}

#[test]
fn export_then_convert_round_trips() {
    let dir = tempdir().unwrap();
    let batch = dir.path().join("training_data.json");
    let flat = dir.path().join("formatted_training_data.txt");
    let jsonl = dir.path().join("dataset.jsonl");

    fs::write(
        &batch,
        r#"[
            {"question": "Where?", "context": "Here.",
             "answers": {"text": ["Here."], "answer_start": [0]}},
            {"question": "Broken?", "context": "Dropped.",
             "answers": {"text": [], "answer_start": []}}
        ]"#,
    )
    .unwrap();

    let status = Command::new(qaprep_bin())
        .arg("export")
        .arg(&batch)
        .arg("--out")
        .arg(&flat)
        .status()
        .expect("run qaprep export");
    assert!(status.success());

    // The incomplete entry is dropped; the survivor is a well-formed block.
    assert_eq!(
        fs::read_to_string(&flat).unwrap(),
        "Question: Where?\nContext: Here.\nAnswer: Here.\n\n"
    );

    let status = Command::new(qaprep_bin())
        .args(["convert"])
        .arg(&flat)
        .arg("--out")
        .arg(&jsonl)
        .arg("--mode")
        .arg("fixed-stride")
        .status()
        .expect("run qaprep convert");
    assert!(status.success());

    assert_eq!(
        fs::read_to_string(&jsonl).unwrap(),
        "{\"question\":\"Where?\",\"answer\":\"Here.\",\"context\":\"Here.\"}\n"
    );
}

#[test]
fn format_prompts_emits_pairs() {
    let dir = tempdir().unwrap();
    let jsonl = dir.path().join("dataset.jsonl");
    let prompts = dir.path().join("prompts.jsonl");
    fs::write(
        &jsonl,
        "{\"question\":\"Where?\",\"answer\":\"Home.\",\"context\":\"Here.\"}\n",
    )
    .unwrap();

    let status = Command::new(qaprep_bin())
        .arg("format-prompts")
        .arg(&jsonl)
        .arg("--out")
        .arg(&prompts)
        .arg("--style")
        .arg("instruction")
        .status()
        .expect("run qaprep format-prompts");
    assert!(status.success());

    assert_eq!(
        fs::read_to_string(&prompts).unwrap(),
        "{\"input_text\":\"question: Where? context: Here.\",\"output_text\":\"Home.\"}\n"
    );
}

#[test]
fn missing_input_exits_nonzero() {
    let dir = tempdir().unwrap();
    let output = Command::new(qaprep_bin())
        .arg("convert")
        .arg(dir.path().join("no_such_file.txt"))
        .output()
        .expect("run qaprep convert");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no_such_file.txt"));
}

#[test]
fn unknown_parse_mode_exits_nonzero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "").unwrap();

    let output = Command::new(qaprep_bin())
        .arg("convert")
        .arg(&input)
        .arg("--mode")
        .arg("strict")
        .output()
        .expect("run qaprep convert");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown parse mode"));
}

#[cfg(not(feature = "pdf"))]
#[test]
fn extract_pdf_requires_the_feature() {
    let output = Command::new(qaprep_bin())
        .arg("extract-pdf")
        .arg("handbook.pdf")
        .output()
        .expect("run qaprep extract-pdf");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--features pdf"));
}
