use std::collections::{BTreeMap, HashMap};

use bsonette::{bson as codec, Bytes, Deserialize, Document, Serialize, Value};
use chrono::{DateTime, TimeZone, Utc};

const CANONICAL: &str = "31000000\
                         0442534f4e00\
                         26000000\
                         02300008000000617765736f6d6500\
                         0131003333333333331440\
                         103200c2070000\
                         00\
                         00";

fn unhex(h: &str) -> Vec<u8> {
    (0..h.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&h[i..i + 2], 16).unwrap())
        .collect()
}

fn canonical() -> Vec<u8> {
    let mut ground = vec![];
    bson::doc! { "BSON": ["awesome", 5.05, 1986] }
        .to_writer(&mut ground)
        .unwrap();
    ground
}

fn ground_truth(doc: &bson::Document) -> String {
    let mut ground = vec![];
    doc.to_writer(&mut ground).unwrap();
    bintext::hex::encode(&ground)
}

fn millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Canonical {
    #[bsonette(rename = "BSON")]
    bson: Vec<Value>,
}

#[test]
fn test_canonical_example() {
    let c = Canonical {
        bson: vec![
            Value::from("awesome"),
            Value::from(5.05),
            Value::from(1986),
        ],
    };
    let bin = codec::to_bin(&c).unwrap();
    assert_eq!(bintext::hex::encode(&bin), bintext::hex::encode(&canonical()));
    assert_eq!(bin, unhex(CANONICAL));
    assert_eq!(bin[..4], [0x31, 0, 0, 0]);

    let out: Canonical = codec::from_bin(&bin).unwrap();
    assert_eq!(out, c);
}

#[test]
fn test_canonical_dynamic() {
    let ground = unhex(CANONICAL);
    assert_eq!(ground, canonical());

    let doc: Document = codec::from_bin(&ground).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(
        doc["BSON"],
        Value::from(vec![
            Value::String("awesome".to_owned()),
            Value::Double(5.05),
            Value::Int32(1986),
        ])
    );

    let map: HashMap<String, Vec<Value>> = codec::from_bin(&ground).unwrap();
    assert_eq!(map["BSON"].len(), 3);

    assert_eq!(
        bintext::hex::encode(&codec::to_bin(&doc).unwrap()),
        bintext::hex::encode(&ground)
    );
    assert_eq!(
        bintext::hex::encode(&codec::to_bin(&map).unwrap()),
        bintext::hex::encode(&ground)
    );
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Inner {
    name: String,
    weight: f64,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Various {
    string: String,
    double: f64,
    binary: Bytes,
    boolean: bool,
    datetime: DateTime<Utc>,
    int32: i32,
    int64: i64,
    nested: Inner,
    list: Vec<i64>,
    map: BTreeMap<String, String>,
}

fn various() -> Various {
    let mut map = BTreeMap::new();
    map.insert("b".to_owned(), "y".to_owned());
    map.insert("a".to_owned(), "x".to_owned());

    Various {
        string: "Hi!".to_owned(),
        double: -0.25,
        binary: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
        boolean: true,
        datetime: millis(1_136_214_245_000),
        int32: -7,
        int64: 1 << 40,
        nested: Inner {
            name: "inner".to_owned(),
            weight: 1.5,
        },
        list: vec![1, 2, 3],
        map,
    }
}

#[test]
fn test_bson_struct() {
    let v = various();
    let bin = codec::to_bin(&v).unwrap();

    // Keys in ascending byte order
    let ground = bson::doc! {
        "binary": bson::Bson::Binary(bson::Binary {
            subtype: bson::spec::BinarySubtype::Generic,
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
        }),
        "boolean": true,
        "datetime": bson::Bson::from(millis(1_136_214_245_000)),
        "double": -0.25,
        "int32": -7,
        "int64": 1i64 << 40,
        "list": [1i64, 2i64, 3i64],
        "map": { "a": "x", "b": "y" },
        "nested": { "name": "inner", "weight": 1.5 },
        "string": "Hi!",
    };
    assert_eq!(bintext::hex::encode(&bin), ground_truth(&ground));

    let v1: Various = codec::from_bin(&bin).unwrap();
    assert_eq!(v, v1);

    let read = bson::Document::from_reader(&mut &bin[..]).unwrap();
    assert_eq!(read.get_str("string").unwrap(), "Hi!");
    assert_eq!(read.get_i64("int64").unwrap(), 1 << 40);
}

macro_rules! test_primitive {
    ($p:expr, $t:ty) => {{
        let mut map = BTreeMap::new();
        map.insert("val", $p);
        let bin = codec::to_bin(&map).unwrap();

        let mut doc = bson::Document::new();
        doc.insert("val", bson::Bson::from($p));
        assert_eq!(bintext::hex::encode(&bin), ground_truth(&doc));

        let out: BTreeMap<String, $t> = codec::from_bin(&bin).unwrap();
        assert_eq!(out["val"], $p);
    }};
}

#[test]
fn test_bson_primitive() {
    test_primitive!(true, bool);
    test_primitive!(0i32, i32);
    test_primitive!(i32::MIN, i32);
    test_primitive!(i64::MAX, i64);
    test_primitive!(5.05f64, f64);
    test_primitive!("Hello World!".to_string(), String);
    test_primitive!(millis(-1_000), DateTime<Utc>);
}

#[test]
fn test_deterministic_order() {
    let keys = ["zeta", "alpha", "Beta", "_", "alp", "10", "9"];

    let mut forward = HashMap::new();
    for (i, k) in keys.iter().enumerate() {
        forward.insert(k.to_string(), i as i32);
    }
    let mut backward = HashMap::new();
    for (i, k) in keys.iter().enumerate().rev() {
        backward.insert(k.to_string(), i as i32);
    }

    let a = codec::to_bin(&forward).unwrap();
    let b = codec::to_bin(&backward).unwrap();
    assert_eq!(a, b);

    let mut sorted = keys.iter().enumerate().collect::<Vec<_>>();
    sorted.sort_by(|x, y| x.1.as_bytes().cmp(y.1.as_bytes()));
    let mut doc = bson::Document::new();
    for (i, k) in sorted {
        doc.insert(k.to_string(), i as i32);
    }
    assert_eq!(bintext::hex::encode(&a), ground_truth(&doc));
}

#[test]
fn test_length_prefix() {
    let bin = codec::to_bin(&various()).unwrap();
    let declared = i32::from_le_bytes([bin[0], bin[1], bin[2], bin[3]]);
    assert_eq!(declared as usize, bin.len());
    assert_eq!(bin.last(), Some(&0));
}

#[test]
fn test_empty_document() {
    let empty: HashMap<String, i32> = HashMap::new();
    let bin = codec::to_bin(&empty).unwrap();
    assert_eq!(bin, vec![5, 0, 0, 0, 0]);

    let out: Document = codec::from_bin(&bin).unwrap();
    assert!(out.is_empty());
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Long {
    values: Vec<i32>,
}

#[test]
fn test_long_array_keeps_order() {
    let long = Long {
        values: (0..12).map(|i| i * 100).collect(),
    };
    let bin = codec::to_bin(&long).unwrap();

    let values = (0..12)
        .map(|i| bson::Bson::Int32(i * 100))
        .collect::<Vec<_>>();
    let ground = bson::doc! { "values": values };
    assert_eq!(bintext::hex::encode(&bin), ground_truth(&ground));

    let out: Long = codec::from_bin(&bin).unwrap();
    assert_eq!(out, long);
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Borrowed<'a> {
    name: &'a str,
    tags: Vec<&'a str>,
}

#[test]
fn test_zero_copy() {
    let b0 = Borrowed {
        name: "zero",
        tags: vec!["copy", "strings"],
    };
    let bin = codec::to_bin(&b0).unwrap();
    let b1: Borrowed = codec::from_bin(&bin).unwrap();
    assert_eq!(b0, b1);

    let range = bin.as_ptr_range();
    assert!(range.contains(&b1.name.as_ptr()));
}
