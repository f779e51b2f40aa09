use mantle::{Engine, ErrorKind, FileLoader, MemoryLoader, Sections, Store};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

#[test]
fn test_plain_text_is_trimmed() {
    let template = "\n\n  <p>no tags at all, just {braces} and @signs</p>\t\n";

    assert_eq!(mantle::compile(template, &Store::new()).unwrap(), template.trim());
}

#[test]
fn test_section_then_place() {
    let output = mantle::compile(
        "@section:greeting\nHello!\n@endsection@place:greeting",
        &Store::new(),
    );

    assert_eq!(output.unwrap(), "Hello!");
}

#[test]
fn test_optional_place_missing() {
    let output = mantle::compile("<aside>?@place:missing</aside>", &Store::new());

    assert_eq!(output.unwrap(), "<aside></aside>");
}

#[test]
fn test_escaped_and_raw_variables() {
    let store = Store::new().with_must("user", json!({ "name": "Ada & <Co>" }));

    assert_eq!(
        mantle::compile("{{user.name}}", &store).unwrap(),
        mantle::escape("Ada & <Co>")
    );
    assert_eq!(
        mantle::compile("{{!user.name}}", &store).unwrap(),
        "Ada & <Co>"
    );
}

#[test]
fn test_defaults() {
    let without = Store::new().with_must("user", json!({ "name": "Ada" }));
    let with = Store::new().with_must("user", json!({ "age": 30 }));

    assert_eq!(mantle::compile("{{user.age||18}}", &without).unwrap(), "18");
    assert_eq!(mantle::compile("{{user.age||18}}", &with).unwrap(), "30");
}

#[test]
fn test_css_priority_order() {
    let engine = Engine::default()
        .with_injectable("css", "a.css", 10)
        .with_injectable("css", "b.css", 1);
    let output = engine.compile("@inject:css", &Store::new()).unwrap();

    let a = output.find("a.css").unwrap();
    let b = output.find("b.css").unwrap();
    assert!(a < b);
}

#[test]
fn test_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("partials")).unwrap();
    fs::write(
        dir.path().join("index.tmpl"),
        "@use:layout\n@section:main\n{{-- hero --}}@use:partials/hero\n@endsection",
    )
    .unwrap();
    fs::write(
        dir.path().join("layout.tmpl"),
        "<html><head>@inject:css</head><body>@place:main</body></html>",
    )
    .unwrap();
    fs::write(dir.path().join("partials/hero.tmpl"), "<h1>{{title}}</h1>").unwrap();

    let mut engine = Engine::default().with_injectable("css", "site.css", 5);
    engine.set_base_path(dir.path());
    let output = engine
        .compile_file("index", &Store::new().with_must("title", "Welcome"))
        .unwrap();

    assert_eq!(
        output,
        "<html><head><link rel=\"stylesheet\" href=\"site.css\" type=\"text/css\" media=\"all\" />\n\
         </head><body><h1>Welcome</h1></body></html>"
    );
}

#[test]
fn test_self_inclusion_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("loop.tmpl"), "x @use:loop").unwrap();

    let engine = Engine::default().with_loader(FileLoader::new(dir.path(), ".tmpl"));
    let error = engine.compile("@use:loop", &Store::new()).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::TooManyInclusions);
}

#[test]
fn test_missing_resource() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = Engine::default();
    engine.set_base_path(dir.path());

    let error = engine.compile("@use:nowhere", &Store::new()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResourceNotFound);

    let error = engine.compile("@markdown:nowhere", &Store::new()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResourceNotFound);
}

#[test]
fn test_markdown_inclusion() {
    let engine = Engine::default().with_loader(
        MemoryLoader::new().with("post", "## {{heading}}\n\nSome ~~old~~ *new* text."),
    );
    let output = engine
        .compile("<article>@markdown:post</article>", &Store::new().with_must("heading", "News"))
        .unwrap();

    assert_eq!(
        output,
        "<article><h2>News</h2>\n<p>Some <del>old</del> <em>new</em> text.</p>\n</article>"
    );
}

#[test]
fn test_comments_removed() {
    let output = mantle::compile(
        "a{{-- {{secret}}\n@place:never --}}b",
        &Store::new().with_must("secret", "s"),
    );

    assert_eq!(output.unwrap(), "ab");
}

#[test]
fn test_comment_with_unclosed_variable_removed() {
    let output = mantle::compile("a{{-- TODO {{name --}}b", &Store::new());

    assert_eq!(output.unwrap(), "ab");
}

#[test]
fn test_unreachable_names_are_literal() {
    let output = mantle::compile(
        "@section:hero:top\nHi\n@endsection[@place:hero:top]",
        &Store::new(),
    );
    assert_eq!(
        output.unwrap(),
        "@section:hero:top\nHi\n@endsection[@place:hero:top]"
    );

    let engine = Engine::default().with_injectable("hero:top", "<b>", 1);
    assert_eq!(
        engine.compile("[@inject:hero:top]", &Store::new()).unwrap(),
        "[@inject:hero:top]"
    );
}

#[test]
fn test_default_for_null() {
    let store = Store::new().with_must("user", json!({ "age": null }));

    assert_eq!(mantle::compile("{{user.age||18}}", &store).unwrap(), "18");
}

#[test]
fn test_malformed_tags_are_literal() {
    let output = mantle::compile("@use: @inject: @section:no-break@endsection {{}}", &Store::new());

    assert_eq!(
        output.unwrap(),
        "@use: @inject: @section:no-break@endsection {{}}"
    );
}

#[test]
fn test_sections_persist_with_shared_registry() {
    let engine = Engine::default();
    let mut sections = Sections::new();

    engine
        .compile_with("@section:nav\n<nav></nav>\n@endsection", &Store::new(), &mut sections)
        .unwrap();
    let output = engine
        .compile_with("@place:nav", &Store::new(), &mut sections)
        .unwrap();

    assert_eq!(output, "<nav></nav>");
    assert_eq!(
        engine.compile("@place:nav", &Store::new()).unwrap(),
        "@place:nav"
    );
}
