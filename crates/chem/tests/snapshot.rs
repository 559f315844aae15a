//! Snapshot tests
//!
//! Loads each *.json case in /tests/ individually and records the patched
//! document (`set`/`unset`) or the lookup result (`get`).
//!
//! A case looks like
//! ```json
//! { "document": {...}, "attribute": "a.b:c", "action": "set" }
//! ```
//! where `patch` (a json object) may be given instead of `attribute`.
use chem::patch::{apply_patch, view_patch, Action};
use chem::value::{Object, Value};

#[derive(serde::Deserialize)]
struct Case {
    document: Object,
    attribute: Option<String>,
    patch: Option<Object>,
    #[serde(default)]
    action: Action,
}

#[test]
fn snapshots() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CHEM_LOG"))
        .with_writer(std::io::stderr)
        .init();

    insta::glob!("*.json", |path| {
        let reader = std::fs::read_to_string(path).unwrap();
        let case: Case = serde_json::from_str(&reader).expect("must be a valid case");

        let patch = match (case.attribute, case.patch) {
            (Some(attribute), None) => chem::path::parse_path(&attribute).unwrap().patch,
            (None, Some(patch)) => patch,
            _ => panic!("a case needs either `attribute` or `patch`"),
        };

        let rendered = match case.action.mutation() {
            Some(mutation) => Value::Object(apply_patch(case.document, &patch, mutation)),
            None => match view_patch(&case.document, &patch) {
                Some(lookup) => {
                    let mut found = Object::new();
                    found.insert("path".into(), lookup.path.into());
                    found.insert("value".into(), lookup.value);
                    Value::Object(found)
                }
                None => "not found".into(),
            },
        };

        insta::assert_json_snapshot!(rendered);
    });
}
