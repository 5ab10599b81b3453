//! JSON documents transformed end to end.

use serde_json::{Value, json};

use partials_cli::document::{Document, JsonData, lazy_tree};
use partials_http::RequestDirectives;
use partials_transform::{
    AllowedDirectives, Allowlist, DirectiveKind, Partial, PartialsConfig, TransformError,
    TransformOptions, TypeConfig,
};

fn album() -> Value {
    json!({
        "title": "Whenever You Need Somebody",
        "artist": { "name": "Rick Astley", "born": 1966 },
        "songs": [
            { "name": "Never gonna give you up", "length": 213, "lyrics": "We're no strangers" },
            { "name": "Whenever you need somebody", "length": 234, "lyrics": "Whenever you need" }
        ],
        "tags": ["pop", "dance"]
    })
}

fn load(value: Value, lazy: &[&str]) -> Document {
    Document::from_value(value, &lazy_tree(lazy).unwrap()).unwrap()
}

fn object(document: &Document) -> &JsonData {
    match document {
        Document::Object(data) => data,
        Document::Collection(_) => panic!("expected an object"),
    }
}

#[test]
fn lazy_properties_are_hidden_until_included() {
    let document = load(album(), &["songs.lyrics", "artist.born"]);
    let data = object(&document);

    let plain = Partial::new(data).only("songs").unwrap().to_json().unwrap();
    assert_eq!(
        plain,
        json!({ "songs": [
            { "name": "Never gonna give you up", "length": 213 },
            { "name": "Whenever you need somebody", "length": 234 }
        ] })
    );

    let included = Partial::new(data)
        .include(["songs.lyrics", "artist.born"])
        .unwrap()
        .except(["tags", "songs.length"])
        .unwrap()
        .to_json()
        .unwrap();
    insta::assert_json_snapshot!(included, @r#"
    {
      "title": "Whenever You Need Somebody",
      "artist": {
        "name": "Rick Astley",
        "born": 1966
      },
      "songs": [
        {
          "name": "Never gonna give you up",
          "lyrics": "We're no strangers"
        },
        {
          "name": "Whenever you need somebody",
          "lyrics": "Whenever you need"
        }
      ]
    }
    "#);
}

#[test]
fn groups_and_wildcards_select_across_levels() {
    let document = load(album(), &["songs.*"]);
    let data = object(&document);

    let json = Partial::new(data)
        .include("songs.{name,length}")
        .unwrap()
        .only(["songs", "title"])
        .unwrap()
        .to_json()
        .unwrap();

    assert_eq!(
        json,
        json!({
            "title": "Whenever You Need Somebody",
            "songs": [
                { "name": "Never gonna give you up", "length": 213 },
                { "name": "Whenever you need somebody", "length": 234 }
            ]
        })
    );
}

#[test]
fn plain_arrays_are_never_scoped_into() {
    let document = load(album(), &[]);
    let data = object(&document);

    let json = Partial::new(data)
        .only("tags.0")
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(json, json!({ "tags": ["pop", "dance"] }));
}

#[test]
fn root_arrays_transform_as_collections() {
    let document = load(
        json!([{ "name": "Ruben", "secret": 1 }, { "name": "Freek", "secret": 2 }]),
        &[],
    );
    let Document::Collection(collection) = &document else {
        panic!("expected a collection");
    };

    let json = Partial::collection(collection)
        .except("secret")
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(json, json!([{ "name": "Ruben" }, { "name": "Freek" }]));
}

#[test]
fn query_directives_respect_toml_allowlists() {
    let allowed: AllowedDirectives = toml::from_str(
        r#"
        include = ["songs"]
        exclude = true
        "#,
    )
    .unwrap();
    assert_eq!(allowed.only, Allowlist::none());

    let config =
        PartialsConfig::new().register::<JsonData>(TypeConfig::new().with_allowed(allowed));
    let document = load(album(), &["songs", "songs.lyrics"]);
    let data = object(&document);

    let mut partial = Partial::new(data).with_config(&config);
    RequestDirectives::from_query("include=songs,songs.lyrics&exclude=title,tags&only=title")
        .unwrap()
        .apply_to(&mut partial)
        .unwrap();

    let json = partial.to_json().unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["artist", "songs"]);

    // Songs are filtered by the same allowlist, which names `songs` only.
    assert!(json["songs"][0].get("lyrics").is_none());
}

#[test]
fn depth_guard_reports_the_path() {
    let document = load(json!({ "a": { "b": { "c": { "d": 1 } } } }), &[]);
    let data = object(&document);

    let error = Partial::new(data)
        .with_options(TransformOptions::for_json().with_max_depth(1))
        .to_json()
        .unwrap_err();

    assert!(matches!(error, TransformError::DepthExceeded { max_depth: 1, .. }));
    assert_eq!(
        error.to_string(),
        "maximum transformation depth of 1 exceeded at 'a.b'"
    );
}

#[test]
fn unknown_directive_kinds_are_rejected_by_name() {
    let error = "select".parse::<DirectiveKind>().unwrap_err();
    assert_eq!(
        error.to_string(),
        "unknown directive 'select', expected include, exclude, only or except"
    );
}
