//! Recording whole method bodies from a single call.

use crate::session::Recording;
use crate::{here, recording};

#[test]
fn test_method_capture() {
    let mut recording = recording!("method-source.md").unwrap();

    recording.begin(here!());
    run_sample(&mut recording);
    recording.end(here!());

    let rendered = recording.finish().unwrap();
    insta::assert_snapshot!(rendered.document(), @r###"
    # Method sources

    ```rust
    run_sample(&mut recording);
    ```

    runs this helper:

    ```rust
    fn run_sample(recording: &mut Recording) {
        // the lines of this helper end up in the document

        // the call that recorded them does not
    }
    ```
    "###);
}

fn run_sample(recording: &mut Recording) {
    recording.include_method(here!(), "source");
    // the lines of this helper end up in the document

    // the call that recorded them does not
}

#[test]
fn test_markers_must_come_in_pairs() {
    let mut recording = recording!("method-source.md").unwrap();
    recording.begin(here!());
    let error = recording.finish().unwrap_err();
    assert!(error.to_string().starts_with("odd number of markers"));
}
