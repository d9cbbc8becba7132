use confkey_core::{Error, Key};

#[test]
fn test_add_base_name_escapes_reserved_tokens() {
    let mut key = Key::with_name("user/tests").unwrap();

    key.add_base_name(".").unwrap();
    assert_eq!(key.name(), "user/tests/\\.");
    assert_eq!(key.base_name(), "\\.");

    key.set_base_name(Some("..")).unwrap();
    assert_eq!(key.name(), "user/tests/\\..");
    assert_eq!(key.base_name(), "\\..");

    key.set_base_name(Some("")).unwrap();
    assert_eq!(key.name(), "user/tests/%");
    assert_eq!(key.base_name(), "%");
    assert_eq!(key.unescaped_name(), b"user\0tests\0\0");
}

#[test]
fn test_add_base_name_escapes_separators() {
    let mut key = Key::with_name("user").unwrap();
    key.add_base_name("a/b").unwrap();
    assert_eq!(key.name(), "user/a\\/b");
    assert_eq!(key.base_name(), "a\\/b");
    assert_eq!(key.unescaped_name(), b"user\0a/b\0");
}

#[test]
fn test_add_base_name_keeps_backslash_before_dot() {
    // a part ending in backslash-dot must survive the escape/unescape
    // round trip instead of collapsing to a plain dot
    let mut key = Key::with_name("user/tests").unwrap();
    key.add_base_name("a\\.").unwrap();
    assert_eq!(key.name(), "user/tests/a\\\\.");
    assert_eq!(key.base_name(), "a\\\\.");
    assert_eq!(key.unescaped_name(), b"user\0tests\0a\\.\0");

    let mut plain = Key::with_name("user/tests").unwrap();
    plain.add_base_name("a.").unwrap();
    assert_eq!(plain.unescaped_name(), b"user\0tests\0a.\0");
    assert_ne!(key, plain);
}

#[test]
fn test_add_base_name_escapes_leading_percent() {
    let mut key = Key::with_name("user/tests").unwrap();
    key.add_base_name("%profile%").unwrap();
    assert_eq!(key.name(), "user/tests/\\%profile%");
    assert_eq!(key.base_name(), "\\%profile%");
    assert_eq!(key.unescaped_name(), b"user\0tests\0%profile%\0");
}

#[test]
fn test_set_base_name_truncates_and_replaces() {
    let mut key = Key::with_name("system/a/b/c").unwrap();

    key.set_base_name(None).unwrap();
    assert_eq!(key.name(), "system/a/b");

    key.set_base_name(Some("d")).unwrap();
    assert_eq!(key.name(), "system/a/d");
}

#[test]
fn test_base_name_of_root_only_names() {
    assert_eq!(Key::with_name("system").unwrap().base_name(), "");
    assert_eq!(Key::with_name("/").unwrap().base_name(), "");
    assert_eq!(Key::new().base_name(), "");
    assert_eq!(Key::new().base_name_size(), 1);
}

#[test]
fn test_base_name_size_counts_terminator() {
    let key = Key::with_name("system/some/keyname").unwrap();
    assert_eq!(key.base_name(), "keyname");
    assert_eq!(key.base_name_size(), 8);
}

#[test]
fn test_base_name_operations_need_a_name() {
    let mut key = Key::new();
    assert_eq!(key.add_base_name("x"), Err(Error::MissingName));
    assert_eq!(key.set_base_name(None), Err(Error::MissingName));
}

#[test]
fn test_chained_base_name_growth() {
    let mut key = Key::with_name("user/tests").unwrap();
    for part in ["storage", "simple", "key with spaces"] {
        key.add_base_name(part).unwrap();
    }
    assert_eq!(key.name(), "user/tests/storage/simple/key with spaces");
    assert_eq!(key.base_name(), "key with spaces");
}
