use assert_cmd::Command;
use predicates::prelude::*;

fn json_codec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_json-codec"))
}

#[test]
fn encodes_one_user() {
    json_codec()
        .args(["encode", "--name", "zhangsan", "--age", "18"])
        .assert()
        .success()
        .stdout("{\"userName\":\"zhangsan\",\"age\":18}\n");
}

#[test]
fn encodes_repeated_users() {
    json_codec()
        .args(["encode", "--name", "zhansan", "--age", "16", "--repeat", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[{\"userName\":\"zhansan\",\"age\":16},{\"userName\":\"zhansan\",\"age\":16}]",
        ));
}

#[test]
fn zero_repeats_encode_an_empty_sequence() {
    json_codec()
        .args(["encode", "--name", "zhansan", "--age", "16", "--repeat", "0"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn decodes_a_sequence_from_stdin() {
    json_codec()
        .args(["decode", "--as", "sequence"])
        .write_stdin(r#"[{"userName":"zhansan","age":16},{"userName":"lisi"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User { user_name: \"zhansan\", age: 16 }",
        ))
        .stdout(predicate::str::contains(
            "json = [{\"userName\":\"zhansan\",\"age\":16},{\"userName\":\"lisi\",\"age\":0}]",
        ));
}

#[test]
fn nested_and_map_targets_re_encode_in_their_own_shape() {
    json_codec()
        .args(["decode", "--as", "nested"])
        .write_stdin(r#"[[{"userName":"a","age":1}],[],[{"userName":"b"}]]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("User { user_name: \"b\", age: 0 }"))
        .stdout(predicate::str::contains(
            "json = [[{\"userName\":\"a\",\"age\":1}],[],[{\"userName\":\"b\",\"age\":0}]]\n",
        ));

    json_codec()
        .args(["decode", "--as", "map"])
        .write_stdin(r#"{"b":{"userName":"b","age":2},"a":{"userName":"a"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "json = {\"a\":{\"userName\":\"a\",\"age\":0},\"b\":{\"userName\":\"b\",\"age\":2}}\n",
        ));

    json_codec()
        .args(["decode", "--as", "one"])
        .write_stdin(r#"{"age":18,"userName":"zhangsan"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "json = {\"userName\":\"zhangsan\",\"age\":18}\n",
        ));
}

#[test]
fn max_depth_flag_limits_decoding() {
    json_codec()
        .args(["decode", "--as", "nested", "--max-depth", "2"])
        .write_stdin(r#"[[{"userName":"a","age":1}]]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting deeper than 2 levels at '/0/0/userName'"));
}

#[test]
fn rejects_an_object_where_a_sequence_is_expected() {
    json_codec()
        .args(["decode", "--as", "sequence"])
        .write_stdin(r#"{"userName":"zhangsan","age":18}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected array"));
}

#[test]
fn describes_targets() {
    json_codec()
        .args(["describe", "--as", "map"])
        .assert()
        .success()
        .stdout("{str: User}\n");
}
