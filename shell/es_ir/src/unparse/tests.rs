use super::*;
use crate::build::*;
use pretty_assertions::assert_eq;

#[test]
fn quoting_rules() {
    assert_eq!(quote_word("plain"), "plain");
    assert_eq!(quote_word(""), "''");
    assert_eq!(quote_word("it's"), "'it''s'");
    assert_eq!(quote_word("a b"), "'a b'");
    assert!(!needs_quotes("/usr/bin/ls"));
    assert!(needs_quotes("$x"));
}

#[test]
fn quoted_words_keep_glob_characters_literal() {
    assert_eq!(qword("*.c").to_string(), "'*.c'");
    assert_eq!(word("*.c").to_string(), "*.c");
    assert_eq!(qword("ok").to_string(), "ok");
}

#[test]
fn closures_and_calls() {
    assert_eq!(thunk(None).to_string(), "{}");
    assert_eq!(prim("echo").to_string(), "$&echo");
    assert_eq!(call(thunk(words(&["a", "b"]))).to_string(), "<={a b}");
    assert_eq!(
        lambda(words(&["x", "y"]), list([word("echo"), var_named("x")])).to_string(),
        "@ x y {echo $x}"
    );
    assert_eq!(lambda(None, None).to_string(), "@ {}");
}

#[test]
fn variables_and_concatenation() {
    let sub = words(&["1", "...", "3"]).map_or_else(|| word("1"), |t| t);
    assert_eq!(varsub(word("x"), sub).to_string(), "$x(1 ... 3)");
    assert_eq!(concat(word("a"), var_named("b")).to_string(), "a^$b");
    assert_eq!(var(var_named("p")).to_string(), "$$p");
}

#[test]
fn nested_lists_are_parenthesized() {
    let inner = words(&["b", "c"]).map_or_else(|| word("b"), |t| t);
    assert_eq!(list([word("a"), inner]).map(|t| t.to_string()), Some("a (b c)".to_string()));
}

#[test]
fn binding_forms() {
    let defs = Some(treecons(assign(word("x"), words(&["1", "2"])), None));
    assert_eq!(
        let_block(defs.clone(), Some(thunk(words(&["echo"])))).to_string(),
        "let(x=1 2){echo}"
    );
    assert_eq!(
        closure_literal(defs.clone(), Some(thunk(None))).to_string(),
        "%closure(x=1 2){}"
    );
    let two = treeconsend(defs, assign(word("y"), None));
    assert_eq!(for_loop(two, None).to_string(), "for(x=1 2;y=)");
}

#[test]
fn pattern_tests() {
    assert_eq!(
        match_test(Some(var_named("x")), words(&["a*", "b"])).to_string(),
        "~ $x a* b"
    );
    assert_eq!(
        extract_test(Some(var_named("x")), words(&["a*"])).to_string(),
        "~~ $x a*"
    );
}
