//! Attaching files and delivering rendered documents.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use crate::redirect::redirect_output;
use crate::session::{Recording, RenderedDoc};
use crate::writer::write_to_directory;
use crate::{here, recording};

#[test]
fn test_attached_report() {
    let mut recording = Recording::of("attachments.md")
        .render_to("docs-attachments.md")
        .build(file!())
        .unwrap();

    recording.begin(here!());
    let rows = vec!["id,value", "1,42"];
    recording.end(here!());

    recording
        .attach_file(
            here!(),
            "report",
            "reports/values.csv",
            rows.join("\n").into_bytes(),
        )
        .unwrap();

    let delivered = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&delivered);
    let guard = redirect_output(move |rendered: &RenderedDoc| {
        *sink.borrow_mut() = Some(rendered.clone());
    });
    recording.finish_and_write().unwrap();
    drop(guard);

    let rendered = delivered.borrow_mut().take().unwrap();
    assert_eq!(rendered.name(), "docs-attachments.md");
    assert_eq!(
        rendered.files().get("reports/values.csv").map(Vec::as_slice),
        Some(&b"id,value\n1,42"[..])
    );
    insta::assert_snapshot!(rendered.document(), @r###"
    # Attachments

    ```rust
    let rows = vec!["id,value", "1,42"];
    ```

    The rows end up in [reports/values.csv](reports/values.csv),
    written next to this document.
    "###);
}

#[test]
fn test_write_into_destination_directory() {
    let mut recording = recording!("not-written-yet.md").unwrap();
    recording
        .attach_file(here!(), "data", "blobs/data.bin", &[0u8, 1, 2][..])
        .unwrap();
    let rendered = recording.finish().unwrap();

    let destination = tempfile::tempdir().unwrap();
    write_to_directory(destination.path(), &rendered).unwrap();

    assert!(destination.path().join("not-written-yet.md").is_file());
    assert_eq!(
        fs::read(destination.path().join("blobs/data.bin")).unwrap(),
        [0u8, 1, 2]
    );
}
