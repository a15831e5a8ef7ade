use std::collections::HashMap;

use bsonette::{bson, Deserialize, Serialize};
use chrono::{DateTime, TimeZone, Utc};

#[derive(PartialEq, Debug, Serialize, Deserialize)]
enum Tag {
    A,
    #[bsonette(rename = "renamedB")]
    B,
}

impl Default for Tag {
    fn default() -> Self {
        Tag::A
    }
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct Example {
    x: String,
    t1: Tag,
    t2: Tag,
    n: Nested,
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct Nested {
    y: Option<Vec<String>>,
    z: Option<String>,
}

fn example() -> Example {
    Example {
        x: "X".to_owned(),
        t1: Tag::A,
        t2: Tag::B,
        n: Nested {
            y: Some(vec!["Y".to_owned(), "Y".to_owned()]),
            z: None,
        },
    }
}

#[test]
fn test_ser_none_fails() {
    let err = bson::to_bin(&example()).unwrap_err();
    assert_eq!(err.kind(), &bsonette::ErrorKind::NullValue);
    assert_eq!(err.path(), &["n".to_owned(), "z".to_owned()][..]);
}

#[test]
fn test_round_trip() {
    let mut expected = example();
    expected.n.z = Some("Z".to_owned());

    let bin = bson::to_bin(&expected).unwrap();
    let actual: Example = bson::from_bin(&bin).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_enum_as_string() {
    let mut map = HashMap::new();
    map.insert("t", Tag::B);
    let bin = bson::to_bin(&map).unwrap();

    let strings: HashMap<String, String> = bson::from_bin(&bin).unwrap();
    assert_eq!(strings["t"], "renamedB");

    let tags: HashMap<String, Tag> = bson::from_bin(&bin).unwrap();
    assert_eq!(tags["t"], Tag::B);
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct Renamed {
    #[bsonette(rename = "Name")]
    name: String,
    #[bsonette(skip)]
    cache: i64,
    count: i32,
}

#[test]
fn test_rename_and_skip() {
    let r = Renamed {
        name: "bsonette".to_owned(),
        cache: 99,
        count: 3,
    };
    let bin = bson::to_bin(&r).unwrap();

    let doc: bsonette::Document = bson::from_bin(&bin).unwrap();
    let keys = doc.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["Name", "count"]);

    let out: Renamed = bson::from_bin(&bin).unwrap();
    assert_eq!(out.name, "bsonette");
    assert_eq!(out.count, 3);
    assert_eq!(out.cache, 0);
}

#[test]
fn test_skipped_name_on_the_wire() {
    let mut map = HashMap::new();
    map.insert("count", 1i32);
    map.insert("cache", 2i32);
    let bin = bson::to_bin(&map).unwrap();

    let out: Renamed = bson::from_bin(&bin).unwrap();
    assert_eq!(out.count, 1);
    assert_eq!(out.cache, 0);
}

#[test]
fn test_decode_into_keeps_absent_fields() {
    let mut map = HashMap::new();
    map.insert("count", 10i32);
    let bin = bson::to_bin(&map).unwrap();

    let mut target = Renamed {
        name: "kept".to_owned(),
        cache: 5,
        count: 0,
    };
    bson::from_bin_into(&bin, &mut target).unwrap();
    assert_eq!(
        target,
        Renamed {
            name: "kept".to_owned(),
            cache: 5,
            count: 10,
        }
    );
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct Indirect {
    boxed: Box<i64>,
    optional: Option<Box<Nested>>,
    #[bsonette(rename = "ref")]
    by_ref: Option<i32>,
}

#[test]
fn test_indirections() {
    let i = Indirect {
        boxed: Box::new(-1),
        optional: Some(Box::new(Nested {
            y: Some(vec![]),
            z: Some("deep".to_owned()),
        })),
        by_ref: Some(1),
    };
    let bin = bson::to_bin(&i).unwrap();
    let out: Indirect = bson::from_bin(&bin).unwrap();
    assert_eq!(out, i);
}

#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct Generic<T> {
    inner: T,
    list: Vec<T>,
}

#[test]
fn test_generic_struct() {
    let g = Generic {
        inner: 1i64,
        list: vec![2, 3],
    };
    let bin = bson::to_bin(&g).unwrap();
    let out: Generic<i64> = bson::from_bin(&bin).unwrap();
    assert_eq!(out, g);
}

// Mirrors a fixture produced by another BSON implementation.
#[derive(PartialEq, Debug, Default, Serialize, Deserialize)]
struct VariousTypes {
    #[bsonette(rename = "Float")]
    float: f64,
    #[bsonette(rename = "String")]
    string: String,
    #[bsonette(rename = "Bytes")]
    bytes: bsonette::Bytes,
    #[bsonette(rename = "Bool")]
    boolean: bool,
    #[bsonette(rename = "Time")]
    time: DateTime<Utc>,
    #[bsonette(rename = "Int32")]
    int32: i32,
    #[bsonette(rename = "Int64")]
    int64: i64,
    #[bsonette(rename = "Map")]
    map: HashMap<String, String>,
    #[bsonette(rename = "Slice")]
    slice: Vec<String>,
}

#[test]
fn test_various_types() {
    let mut map = HashMap::new();
    map.insert("key".to_owned(), "value".to_owned());

    let v = VariousTypes {
        float: 3.25,
        string: "string".to_owned(),
        bytes: bsonette::Bytes::from(&b"bytes"[..]),
        boolean: true,
        time: Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
        int32: 32,
        int64: 64,
        map,
        slice: vec!["a".to_owned(), "b".to_owned()],
    };

    let bin = bson::to_bin(&v).unwrap();
    let out: VariousTypes = bson::from_bin(&bin).unwrap();
    assert_eq!(out, v);
    assert_eq!(out.time.timestamp_millis(), 1_136_214_245_000);
}
