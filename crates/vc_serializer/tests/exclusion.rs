use vc_serializer::exclusion::{Disjunct, GroupExclusion, from_fn};
use vc_serializer::{
    DeserializationContext, Format, SerializationContext, Serializable, Version, deserialize_with,
    serialize_with,
};

#[derive(Debug, Default, PartialEq, Serializable)]
struct Profile {
    id: u32,
    #[serial(groups = ["details"], default)]
    name: String,
    #[serial(since = "2.0.0", default)]
    email: Option<String>,
    #[serial(until = "1.9.9", default)]
    legacy_code: Option<u32>,
    #[serial(groups = ["details", "admin"], default)]
    secret_note: String,
}

fn profile() -> Profile {
    Profile {
        id: 1,
        name: "Ada".into(),
        email: Some("ada@example.com".into()),
        legacy_code: Some(7),
        secret_note: "n".into(),
    }
}

fn json(ctx: &SerializationContext) -> String {
    serialize_with(&profile(), Format::Json, ctx).unwrap()
}

#[test]
fn no_filters_by_default() {
    assert_eq!(
        json(&SerializationContext::new()),
        r#"{"id":1,"name":"Ada","email":"ada@example.com","legacy_code":7,"secret_note":"n"}"#
    );
}

#[test]
fn group_filtering() {
    let ctx = SerializationContext::new().with_groups(["default"]);
    assert_eq!(
        json(&ctx),
        r#"{"id":1,"email":"ada@example.com","legacy_code":7}"#
    );

    let ctx = SerializationContext::new().with_groups(["default", "details"]);
    assert_eq!(
        json(&ctx),
        r#"{"id":1,"name":"Ada","email":"ada@example.com","legacy_code":7,"secret_note":"n"}"#
    );

    let ctx = SerializationContext::new().with_group("admin");
    assert_eq!(json(&ctx), r#"{"secret_note":"n"}"#);
}

#[test]
fn version_window() {
    let ctx = SerializationContext::new().with_version(Version::new(1, 5, 0));
    let text = json(&ctx);
    assert!(!text.contains("email"));
    assert!(text.contains("legacy_code"));

    let ctx = SerializationContext::new().with_version(Version::new(2, 1, 0));
    let text = json(&ctx);
    assert!(text.contains("email"));
    assert!(!text.contains("legacy_code"));

    // both ends are inclusive
    let ctx = SerializationContext::new().with_version(Version::new(2, 0, 0));
    assert!(json(&ctx).contains("email"));
    let ctx = SerializationContext::new().with_version(Version::new(1, 9, 9));
    assert!(json(&ctx).contains("legacy_code"));

    // pre-releases precede their release
    let ctx = SerializationContext::new().with_version("2.0.0-rc.1".parse().unwrap());
    assert!(!json(&ctx).contains("email"));
}

#[test]
fn custom_strategies() {
    let ctx = SerializationContext::new()
        .with_strategy(from_fn(|_, property, _| property.name().starts_with("secret")));
    assert!(!json(&ctx).contains("secret_note"));

    let any = Disjunct::new()
        .with(from_fn(|_, property, _| property.name() == "id"))
        .with(GroupExclusion::from_iter(["details"]));
    let ctx = SerializationContext::new().with_strategy(any);
    assert_eq!(json(&ctx), r#"{"name":"Ada","secret_note":"n"}"#);
}

#[test]
fn emit_null() {
    let profile = Profile {
        email: None,
        ..profile()
    };
    let ctx = SerializationContext::new().with_groups(["default"]);
    let text = serialize_with(&profile, Format::Json, &ctx).unwrap();
    assert_eq!(text, r#"{"id":1,"email":null,"legacy_code":7}"#);

    let ctx = ctx.with_emit_null(false);
    let text = serialize_with(&profile, Format::Json, &ctx).unwrap();
    assert_eq!(text, r#"{"id":1,"legacy_code":7}"#);
}

#[test]
fn excluded_properties_are_missing_on_read() {
    let text = r#"{"id":1,"name":"Ada","email":"e","legacy_code":7,"secret_note":"n"}"#;

    let ctx = DeserializationContext::new().with_groups(["default"]);
    let read: Profile = deserialize_with(text, Format::Json, &ctx).unwrap();
    assert_eq!(read.name, "");
    assert_eq!(read.secret_note, "");
    assert_eq!(read.email.as_deref(), Some("e"));

    let ctx = DeserializationContext::new().with_version(Version::new(3, 0, 0));
    let read: Profile = deserialize_with(text, Format::Json, &ctx).unwrap();
    assert_eq!(read.legacy_code, None);
    assert_eq!(read.name, "Ada");
}

// -----------------------------------------------------------------------------
// Group scenario

#[derive(Serializable)]
struct Author {
    id: u32,
    #[serial(groups = ["details"], accessor = "upper_name")]
    name: String,
    #[serial(groups = ["details"], accessor = "upper_title")]
    title: String,
}

impl Author {
    fn upper_name(&self) -> String {
        self.name.to_uppercase()
    }

    fn upper_title(&self) -> String {
        self.title.to_uppercase()
    }
}

#[test]
fn details_group_only() {
    let author = Author {
        id: 3,
        name: "first last".into(),
        title: "title".into(),
    };
    let ctx = SerializationContext::new().with_groups(["details"]);
    let text = serialize_with(&author, Format::Json, &ctx).unwrap();
    assert_eq!(text, r#"{"name":"FIRST LAST","title":"TITLE"}"#);

    let text = serialize_with(&author, Format::Yaml, &ctx).unwrap();
    assert_eq!(text, "name: FIRST LAST\ntitle: TITLE\n");
}
