//! Property-based tests for tag rewriting
//!
//! Covers the compiler's output invariants: catalog-free resolution falls
//! back to the dot-to-slash tag name, self-closing tags always emit one
//! terminated invocation, and compilation is idempotent on its own output.

use proptest::prelude::*;
use tagmill_compiler::{resolver, ComponentCatalog, TagCompiler};

/// Strategy for namespace-free, dot-hierarchical tag names
fn tag_name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{0,7}(\\.[a-z][a-z0-9]{0,7}){0,2}")
        .expect("valid strategy regex")
}

/// Strategy for simple attribute names and values
fn attribute_strategy() -> impl Strategy<Value = (String, String)> {
    (
        proptest::string::string_regex("[a-z][a-z0-9]{0,5}").expect("valid strategy regex"),
        proptest::string::string_regex("[a-z0-9 ]{0,8}").expect("valid strategy regex"),
    )
}

/// With no matching catalog entry, the resolved path is the tag name with
/// dots converted to path separators.
proptest! {
    #[test]
    fn prop_resolution_falls_back_to_dot_conversion(name in tag_name_strategy()) {
        let catalog = ComponentCatalog::default();
        let resolved = resolver::resolve(&name, &catalog).expect("resolvable name");
        prop_assert_eq!(resolved, name.replace('.', "/"));
    }
}

/// Every self-closing tag compiles to exactly one component invocation
/// immediately followed by exactly one block terminator.
proptest! {
    #[test]
    fn prop_self_closing_emits_one_terminated_invocation(
        name in tag_name_strategy(),
        (key, value) in attribute_strategy(),
    ) {
        let catalog = ComponentCatalog::default();
        let source = format!("<x-{name} {key}=\"{value}\" />");
        let compiled = TagCompiler::new(&catalog).compile(&source).expect("compiles");

        let expected = format!(
            "\n@component(\"{}\", {{ \"{}\": \"{}\" }})\n@end\n",
            name.replace('.', "/"),
            key,
            value,
        );
        prop_assert_eq!(&compiled, &expected);
        prop_assert_eq!(compiled.matches("@component").count(), 1);
        prop_assert_eq!(compiled.matches("@end").count(), 1);
    }
}

/// Strategy for template fragments whose compiled output contains no
/// further custom tags
fn template_strategy() -> impl Strategy<Value = String> {
    let text = proptest::string::string_regex("[a-zA-Z0-9 .,!?]{0,12}").expect("valid regex");
    let piece = prop_oneof![
        text,
        tag_name_strategy().prop_map(|name| format!("<x-{name} />")),
        (tag_name_strategy(), "[a-z ]{0,8}")
            .prop_map(|(name, body)| format!("<x-{name}>{body}</x-{name}>")),
        "[a-z]{1,6}".prop_map(|name| format!("<x-slot name=\"{name}\">slot body</x-slot>")),
    ];
    proptest::collection::vec(piece, 0..6).prop_map(|pieces| pieces.concat())
}

/// Compiling a second time changes nothing once all custom tags are gone.
proptest! {
    #[test]
    fn prop_compile_is_idempotent(source in template_strategy()) {
        let catalog = ComponentCatalog::default();
        let compiler = TagCompiler::new(&catalog);

        let once = compiler.compile(&source).expect("first compile");
        let twice = compiler.compile(&once).expect("second compile");
        prop_assert_eq!(twice, once);
    }
}

/// Regression for match ordering: a self-closing tag next to a sibling
/// plain opening tag must never be consumed as an unterminated opening tag.
proptest! {
    #[test]
    fn prop_self_closing_never_dangles_next_to_openers(
        first in tag_name_strategy(),
        second in tag_name_strategy(),
    ) {
        let catalog = ComponentCatalog::default();
        let source = format!("<x-{first} /><x-{second}>text</x-{second}>");
        let compiled = TagCompiler::new(&catalog).compile(&source).expect("compiles");

        let expected = format!(
            "\n@component(\"{}\", {{  }})\n@end\n\n@component(\"{}\", {{  }})\ntext\n@end\n",
            first.replace('.', "/"),
            second.replace('.', "/"),
        );
        prop_assert_eq!(compiled, expected);
    }
}
