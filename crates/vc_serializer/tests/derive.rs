use core::cell::Cell;

use vc_serializer::{
    Converter, DeserializationContext, DeserializationNavigator, Error, Format,
    SerializationNavigator, Serializable, Value, deserialize, serialize,
};

// -----------------------------------------------------------------------------
// Round trips

#[derive(Debug, Clone, PartialEq, Serializable)]
struct Address {
    street: String,
    city: String,
    zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serializable)]
struct Person {
    id: u32,
    name: String,
    tags: Vec<String>,
    address: Address,
    score: f64,
    active: bool,
    nickname: Option<String>,
}

fn person() -> Person {
    Person {
        id: 1,
        name: "Ada".into(),
        tags: vec!["a".into(), "b".into()],
        address: Address {
            street: "Main".into(),
            city: "Oslo".into(),
            zip: None,
        },
        score: 1.5,
        active: true,
        nickname: Some("countess".into()),
    }
}

#[test]
fn json_round_trip() {
    let text = serialize(&person(), Format::Json).unwrap();
    assert_eq!(
        text,
        r#"{"id":1,"name":"Ada","tags":["a","b"],"address":{"street":"Main","city":"Oslo","zip":null},"score":1.5,"active":true,"nickname":"countess"}"#
    );
    let back: Person = deserialize(&text, Format::Json).unwrap();
    assert_eq!(back, person());
}

#[test]
fn yaml_round_trip() {
    let text = serialize(&person(), Format::Yaml).unwrap();
    assert!(text.starts_with("id: 1\nname: Ada\n"));
    let back: Person = deserialize(&text, Format::Yaml).unwrap();
    assert_eq!(back, person());
}

#[test]
fn json_text_matches_serde_json() {
    let text = serialize(&person(), Format::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["address"]["city"], "Oslo");
    assert_eq!(parsed["tags"][1], "b");
    assert!(parsed["address"]["zip"].is_null());
}

#[derive(Debug, PartialEq, Serializable)]
struct Page<T> {
    items: Vec<T>,
    total: usize,
}

#[test]
fn generic_types() {
    let page = Page {
        items: vec![3u8, 4],
        total: 2,
    };
    let text = serialize(&page, Format::Json).unwrap();
    assert_eq!(text, r#"{"items":[3,4],"total":2}"#);
    assert_eq!(deserialize::<Page<u8>>(&text, Format::Json).unwrap(), page);
}

// -----------------------------------------------------------------------------
// Naming and order

#[derive(Debug, PartialEq, Serializable)]
#[serial(rename_all = "SCREAMING_SNAKE_CASE", order = "alphabetical")]
struct Limits {
    zeta_value: u8,
    alpha_value: u8,
    #[serial(rename = "middle")]
    mid_value: u8,
}

#[test]
fn naming_and_alphabetical_order() {
    let limits = Limits {
        zeta_value: 1,
        alpha_value: 2,
        mid_value: 3,
    };
    let text = serialize(&limits, Format::Json).unwrap();
    assert_eq!(text, r#"{"ALPHA_VALUE":2,"ZETA_VALUE":1,"middle":3}"#);
    assert_eq!(deserialize::<Limits>(&text, Format::Json).unwrap(), limits);
}

#[derive(Debug, PartialEq, Serializable)]
#[serial(order = ["b", "a"])]
struct Ordered {
    a: i32,
    b: i32,
}

#[test]
fn custom_order() {
    let text = serialize(&Ordered { a: 1, b: 2 }, Format::Json).unwrap();
    assert_eq!(text, r#"{"b":2,"a":1}"#);
}

// -----------------------------------------------------------------------------
// Lookup

#[derive(Debug, PartialEq, Serializable)]
struct Renamed {
    #[serial(alias = "old_name")]
    a_prop: String,
}

#[test]
fn aliases() {
    let found: Renamed = deserialize(r#"{"a_prop":"x"}"#, Format::Json).unwrap();
    assert_eq!(found.a_prop, "x");

    let found: Renamed = deserialize(r#"{"old_name":"y"}"#, Format::Json).unwrap();
    assert_eq!(found.a_prop, "y");

    // aliases are tried before the wire name
    let found: Renamed = deserialize(r#"{"a_prop":"x","old_name":"y"}"#, Format::Json).unwrap();
    assert_eq!(found.a_prop, "y");

    // serialization always uses the wire name
    let text = serialize(&found, Format::Json).unwrap();
    assert_eq!(text, r#"{"a_prop":"y"}"#);
}

#[derive(Debug, PartialEq, Serializable)]
struct Flat {
    #[serial(path = "address.city")]
    city: String,
    #[serial(path = "codes[1]", default)]
    second_code: u16,
}

#[test]
fn structured_paths() {
    let flat: Flat = deserialize(
        r#"{"address":{"city":"Oslo"},"codes":[10,20]}"#,
        Format::Json,
    )
    .unwrap();
    assert_eq!(flat.city, "Oslo");
    assert_eq!(flat.second_code, 20);

    let flat: Flat = deserialize(r#"{"city":"Bergen"}"#, Format::Json).unwrap();
    assert_eq!(flat.city, "Bergen");
    assert_eq!(flat.second_code, 0);

    let text = serialize(&flat, Format::Json).unwrap();
    assert_eq!(text, r#"{"city":"Bergen","second_code":0}"#);
}

// -----------------------------------------------------------------------------
// Emptiness and defaults

#[derive(Debug, Default, PartialEq, Serializable)]
struct Note {
    #[serial(skip_when_empty, default)]
    text: String,
    #[serial(skip_when_empty, default)]
    count: u32,
    #[serial(skip_when_empty, default)]
    items: Vec<u8>,
    #[serial(skip_when_empty, default)]
    parent: Option<Box<Note>>,
}

#[test]
fn skip_when_empty() {
    assert_eq!(serialize(&Note::default(), Format::Json).unwrap(), "{}");

    let note = Note {
        text: "x".into(),
        ..Note::default()
    };
    assert_eq!(serialize(&note, Format::Json).unwrap(), r#"{"text":"x"}"#);

    let note = Note {
        count: 2,
        parent: Some(Box::default()),
        ..Note::default()
    };
    let text = serialize(&note, Format::Json).unwrap();
    assert_eq!(text, r#"{"count":2,"parent":{}}"#);
    assert_eq!(deserialize::<Note>(&text, Format::Json).unwrap(), note);
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, PartialEq, Serializable)]
struct Server {
    host: String,
    #[serial(default = "default_port")]
    port: u16,
    #[serial(default)]
    retries: u8,
    backup: Option<String>,
}

#[test]
fn defaults_and_nilable_fields() {
    let server: Server = deserialize(r#"{"host":"h"}"#, Format::Json).unwrap();
    assert_eq!(
        server,
        Server {
            host: "h".into(),
            port: 8080,
            retries: 0,
            backup: None,
        }
    );

    let server: Server =
        deserialize(r#"{"host":"h","port":null,"retries":3,"backup":null}"#, Format::Json).unwrap();
    assert_eq!(server.port, 8080);
    assert_eq!(server.retries, 3);
    assert_eq!(server.backup, None);
}

// -----------------------------------------------------------------------------
// Exposure

#[derive(Debug, PartialEq, Serializable)]
#[serial(policy = "none")]
struct Exposed {
    #[serial(expose)]
    shown: u8,
    hidden: u8,
}

#[derive(Debug, PartialEq, Serializable)]
struct Partial {
    id: u8,
    #[serial(skip)]
    cache: Vec<u8>,
    #[serial(skip_serializing, default)]
    secret: String,
    #[serial(skip_deserializing)]
    computed: u8,
}

#[test]
fn exposure_and_skips() {
    let exposed = Exposed { shown: 1, hidden: 2 };
    let text = serialize(&exposed, Format::Json).unwrap();
    assert_eq!(text, r#"{"shown":1}"#);
    let back: Exposed = deserialize(r#"{"shown":1,"hidden":2}"#, Format::Json).unwrap();
    assert_eq!(back, Exposed { shown: 1, hidden: 0 });

    let partial = Partial {
        id: 1,
        cache: vec![1],
        secret: "s".into(),
        computed: 9,
    };
    let text = serialize(&partial, Format::Json).unwrap();
    assert_eq!(text, r#"{"id":1,"computed":9}"#);

    let back: Partial =
        deserialize(r#"{"id":1,"cache":[1],"secret":"s","computed":9}"#, Format::Json).unwrap();
    assert_eq!(
        back,
        Partial {
            id: 1,
            cache: vec![],
            secret: "s".into(),
            computed: 0,
        }
    );
}

// -----------------------------------------------------------------------------
// Accessors and virtual properties

#[derive(Debug, PartialEq, Serializable)]
#[serial(virtual_property = "full_name")]
struct Name {
    first: String,
    last: String,
    #[serial(accessor = "upper_title")]
    title: String,
}

impl Name {
    fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    fn upper_title(&self) -> String {
        self.title.to_uppercase()
    }
}

#[test]
fn accessors_and_virtual_properties() {
    let name = Name {
        first: "Grace".into(),
        last: "Hopper".into(),
        title: "rear admiral".into(),
    };
    let text = serialize(&name, Format::Json).unwrap();
    assert_eq!(
        text,
        r#"{"first":"Grace","last":"Hopper","title":"REAR ADMIRAL","full_name":"Grace Hopper"}"#
    );

    // the virtual property is ignored on the way back
    let back: Name = deserialize(&text, Format::Json).unwrap();
    assert_eq!(back.title, "REAR ADMIRAL");
    assert_eq!(back.first, "Grace");
}

// -----------------------------------------------------------------------------
// Converters

struct YesNo;

impl Converter<bool> for YesNo {
    fn serialize(value: &bool, nav: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(nav.visit_string(if *value { "yes" } else { "no" }))
    }

    fn deserialize(data: &Value, nav: &mut DeserializationNavigator<'_>) -> Result<bool, Error> {
        match &*nav.read_string(data)? {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(nav.invalid_value("`yes` or `no`", other)),
        }
    }

    fn is_empty(value: &bool) -> bool {
        !*value
    }
}

#[derive(Debug, PartialEq, Serializable)]
struct Flags {
    #[serial(converter = "YesNo")]
    enabled: bool,
    #[serial(converter = "YesNo", skip_when_empty, default)]
    beta: bool,
}

#[test]
fn converters() {
    let flags = Flags {
        enabled: true,
        beta: false,
    };
    let text = serialize(&flags, Format::Json).unwrap();
    assert_eq!(text, r#"{"enabled":"yes"}"#);
    assert_eq!(deserialize::<Flags>(&text, Format::Json).unwrap(), flags);

    let err = deserialize::<Flags>(r#"{"enabled":"maybe"}"#, Format::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref path, ref found, .. } if path == "enabled" && found == "maybe"
    ));
}

// -----------------------------------------------------------------------------
// Hooks

#[derive(Debug, Default, Serializable)]
#[serial(pre_serialize = "before", post_serialize = "after", post_deserialize = "normalize")]
struct Hooked {
    label: String,
    #[serial(skip)]
    calls: Cell<u32>,
}

impl Hooked {
    fn before(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn after(&self) {
        self.calls.set(self.calls.get() + 10);
    }

    fn normalize(&mut self) {
        self.label = self.label.trim().to_string();
    }
}

#[test]
fn hooks_run_around_the_walk() {
    let hooked = Hooked {
        label: "x".into(),
        ..Hooked::default()
    };
    serialize(&hooked, Format::Json).unwrap();
    assert_eq!(hooked.calls.get(), 11);

    let back: Hooked = deserialize(r#"{"label":"  padded  "}"#, Format::Json).unwrap();
    assert_eq!(back.label, "padded");
    assert_eq!(back.calls.get(), 0);
}

// -----------------------------------------------------------------------------
// Enums

#[derive(Debug, Clone, Copy, PartialEq, Serializable)]
#[serial(rename_all = "kebab-case")]
enum Status {
    Active,
    OnHold,
    #[serial(rename = "gone", alias = "deleted")]
    Removed,
}

#[derive(Debug, PartialEq, Serializable)]
enum Plain {
    First,
    Second,
}

#[test]
fn unit_enums() {
    let text = serialize(&[Status::Active, Status::OnHold, Status::Removed], Format::Json).unwrap();
    assert_eq!(text, r#"["active","on-hold","gone"]"#);

    let back: Vec<Status> = deserialize(r#"["on-hold","deleted","gone"]"#, Format::Json).unwrap();
    assert_eq!(back, [Status::OnHold, Status::Removed, Status::Removed]);

    assert_eq!(serialize(&Plain::Second, Format::Json).unwrap(), r#""Second""#);
    let err = deserialize::<Plain>(r#""Third""#, Format::Json).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue { ref expected, .. } if expected == "one of `First`, `Second`"
    ));
}

// -----------------------------------------------------------------------------
// YAML scalars

#[derive(Debug, PartialEq, Serializable)]
struct Package {
    name: String,
    version: String,
}

#[test]
fn yaml_scalars_read_as_strings() {
    let pkg: Package = deserialize("name: tool\nversion: 2\n", Format::Yaml).unwrap();
    assert_eq!(pkg.version, "2");

    let ctx = DeserializationContext::new()
        .with_hint(vc_serializer::visitor::YAML_COERCE_SCALARS, false);
    let err = vc_serializer::deserialize_with::<Package>("name: tool\nversion: 2\n", Format::Yaml, &ctx)
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "version"));

    // JSON never coerces
    assert!(deserialize::<Package>(r#"{"name":"tool","version":2}"#, Format::Json).is_err());
}

// -----------------------------------------------------------------------------
// Large integers

#[derive(Debug, PartialEq, Serializable)]
struct Counter {
    n: u64,
}

#[test]
fn u64_beyond_i64_round_trips() {
    for n in [u64::MAX, i64::MAX as u64 + 1, 0, i64::MAX as u64] {
        for format in [Format::Json, Format::Yaml] {
            let text = serialize(&Counter { n }, format).unwrap();
            let back: Counter = deserialize(&text, format).unwrap();
            assert_eq!(back.n, n, "{format}: {text}");
        }
    }
}

// -----------------------------------------------------------------------------
// Opting out

#[deny(dead_code)]
mod opted_out {
    use vc_serializer::Serializable;

    #[derive(Serializable)]
    #[serial(serialize = false, deserialize = false)]
    pub struct Marker {
        pub id: u8,
    }
}

#[test]
fn opting_out_of_both_traits_emits_no_helpers() {
    let marker = opted_out::Marker { id: 3 };
    assert_eq!(marker.id, 3);
}
