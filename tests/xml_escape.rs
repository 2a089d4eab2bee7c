use problem_xml::{decode_local_name, encode_local_name};

#[test]
fn test_xml_name_escape() {
    // Characters that are not legal in element names are escaped
    assert_eq!(encode_local_name("[key2]"), "_x005B_key2_x005D_");
    assert_eq!(decode_local_name("_x005B_key2_x005D_"), "[key2]");

    // A legal name is returned unchanged
    assert_eq!(encode_local_name("key1"), "key1");
    assert_eq!(decode_local_name("key1"), "key1");
}

#[test]
fn test_xml_name_escape_round_trip() {
    let keys = [
        "[Key2]",
        "order.items[0].quantity",
        "_x005B_",
        "_X005B_",
        "_x005b_x",
        "a_x0020_b c",
        "9lives",
        "\u{0}\u{7}\t\n",
        "caf\u{e9} \u{2603} \u{1F980}",
        "trailing_",
        "___",
    ];
    for key in keys {
        let name = encode_local_name(key);
        assert_eq!(decode_local_name(&name), key, "{:?} encoded as {:?}", key, name);
    }
}

#[test]
fn test_encoded_names_are_valid_xml_names() {
    let keys = ["[a]", "1", "-", ".x", "a b", "a:b", "\u{F0000}"];
    for key in keys {
        let name = encode_local_name(key);
        let mut chars = name.chars();
        let first = chars.next().unwrap();
        assert!(problem_xml::xml::is_name_start_char(first), "{:?}", name);
        assert!(chars.all(problem_xml::xml::is_name_char), "{:?}", name);
    }
}
