//! Lexer and scope-tracking tag extractor for Verilog and SystemVerilog source.
//!
//! [`extract_tags`] is the crate's single entry point: given a file's
//! content, its [`Language`], a set of [`ExtractOptions`], and a
//! [`TagSink`], it drives a single-pass recursive-descent recogniser over
//! the text and emits one [`TagEntry`] per recognised declaration. There is
//! no intermediate AST; the parser makes locally consistent decisions from a
//! scope stack and a handful of character-level skip strategies, and is
//! deliberately permissive: malformed or macro-obscured input yields
//! whatever tags it can, never an error.

pub mod char_source;
pub mod keyword;
pub mod kind;
pub mod language;
pub mod options;
mod recognizer;
pub mod scope;
pub mod skip;
pub mod tag;
pub mod token;

use aion_source::FileId;

pub use kind::Kind;
pub use language::Language;
pub use options::ExtractOptions;
pub use tag::{TagEntry, TagSink};

use recognizer::Parser;

/// Parses `content` as source in the given [`Language`] and emits a
/// [`TagEntry`] per recognised declaration to `sink`, in source order.
///
/// `file` is stamped onto every emitted tag's [`aion_source::Span`] as-is;
/// callers own file identity and content loading (see [`aion_source`]).
pub fn extract_tags(
    content: &str,
    file: FileId,
    language: Language,
    options: &ExtractOptions,
    sink: &mut dyn TagSink,
) {
    Parser::new(content, file, language, options, sink).run();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(content: &str, language: Language) -> Vec<TagEntry> {
        tags_with(content, language, &ExtractOptions::new())
    }

    fn tags_with(content: &str, language: Language, options: &ExtractOptions) -> Vec<TagEntry> {
        let file = FileId::from_raw(0);
        let mut sink = Vec::new();
        extract_tags(content, file, language, options, &mut sink);
        sink
    }

    fn names(tags: &[TagEntry]) -> Vec<String> {
        tags.iter().map(|t| t.qualified_name()).collect()
    }

    #[test]
    fn scenario_module_with_registers() {
        let t = tags("module m; reg a, b; endmodule", Language::Verilog);
        assert_eq!(names(&t), vec!["m", "m.a", "m.b"]);
        assert_eq!(t[0].kind, Kind::Module);
        assert_eq!(t[1].kind, Kind::Register);
        assert_eq!(t[2].kind, Kind::Register);
    }

    #[test]
    fn scenario_module_param_port_list_and_input_port() {
        let t = tags(
            "module m #(parameter W = 8, localparam X = 1) (input clk); endmodule",
            Language::Verilog,
        );
        assert_eq!(names(&t), vec!["m", "m.W", "m.X", "m.clk"]);
        assert_eq!(t[1].kind, Kind::Constant);
        assert_eq!(t[1].parameter, Some(true));
        assert_eq!(t[2].parameter, Some(false));
        assert_eq!(t[3].kind, Kind::Port);
    }

    #[test]
    fn scenario_module_body_parameter_is_overridable() {
        let t = tags("module m; parameter P = 1; endmodule", Language::Verilog);
        assert_eq!(names(&t), vec!["m", "m.P"]);
        assert_eq!(t[1].parameter, Some(true));
    }

    #[test]
    fn scenario_class_with_inheritance_and_method_port() {
        let t = tags(
            "class C extends B #(T); function void f(int x); endfunction endclass",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t), vec!["C", "C.f", "C.f.x"]);
        assert_eq!(t[0].kind, Kind::Class);
        assert_eq!(t[0].inheritance.as_deref(), Some("B"));
        assert_eq!(t[1].kind, Kind::Function);
        assert_eq!(t[2].kind, Kind::Port);
    }

    #[test]
    fn scenario_typedef_enum_buffers_members_under_typedef_name() {
        let t = tags(
            "typedef enum { RED=0, GREEN, BLUE } color_t;",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t), vec!["color_t", "color_t.RED", "color_t.GREEN", "color_t.BLUE"]);
        assert_eq!(t[0].kind, Kind::Typedef);
        assert!(t[1..].iter().all(|e| e.kind == Kind::Constant));
    }

    #[test]
    fn scenario_define_constant() {
        let t = tags("`define MAX 42", Language::Verilog);
        assert_eq!(names(&t), vec!["MAX"]);
        assert_eq!(t[0].kind, Kind::Constant);
    }

    #[test]
    fn out_of_class_method_definition_opens_implicit_class_scope() {
        let t = tags(
            "function void C::f(); endfunction",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t), vec!["C.f"]);
        assert_eq!(t[0].kind, Kind::Function);
        // The implicit class frame must not leak into the scope stack: a
        // second, sibling out-of-class method on a *different* class proves
        // it was popped, not just left open with no tags emitted.
        let t2 = tags(
            "function void C::f(); endfunction function void D::g(); endfunction",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t2), vec!["C.f", "D.g"]);
    }

    #[test]
    fn typedef_class_forward_declaration_is_dropped_by_default() {
        let t = tags("typedef class Foo;", Language::SystemVerilog);
        assert!(t.is_empty(), "Prototype kind is disabled by default: {t:?}");
    }

    #[test]
    fn typedef_class_forward_declaration_surfaces_when_enabled() {
        let mut opts = ExtractOptions::new();
        opts.kind_overrides.insert(Kind::Prototype, true);
        let t = tags_with("typedef class Foo;", Language::SystemVerilog, &opts);
        assert_eq!(names(&t), vec!["Foo"]);
        assert_eq!(t[0].kind, Kind::Prototype);
        assert!(t[0].is_prototype);
    }

    #[test]
    fn labelled_block_inside_a_function_closes_on_bare_end() {
        let t = tags(
            "function f; begin : blk x = 1; end endfunction",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t), vec!["f", "f.blk"]);
        assert_eq!(t[1].kind, Kind::Block);
    }

    #[test]
    fn unlabelled_assertion_emits_nothing() {
        let t = tags("assert (a == b);", Language::SystemVerilog);
        assert!(t.is_empty());
    }

    #[test]
    fn labelled_assertion_is_tagged() {
        let t = tags("check_ab: assert (a == b);", Language::SystemVerilog);
        assert_eq!(names(&t), vec!["check_ab"]);
        assert_eq!(t[0].kind, Kind::Assertion);
    }

    #[test]
    fn define_at_eof_with_no_trailing_newline() {
        let t = tags("`define MAX 42", Language::Verilog);
        assert_eq!(names(&t), vec!["MAX"]);
    }

    #[test]
    fn user_defined_type_declaration_falls_back_to_register() {
        let t = tags("MyType a, b;", Language::SystemVerilog);
        assert_eq!(names(&t), vec!["a", "b"]);
        assert!(t.iter().all(|e| e.kind == Kind::Register));
    }

    #[test]
    fn net_with_dimension_and_port_direction() {
        let t = tags(
            "module m; wire [7:0] data; input clk; endmodule",
            Language::Verilog,
        );
        assert_eq!(names(&t), vec!["m", "m.data", "m.clk"]);
        assert_eq!(t[1].kind, Kind::Net);
        assert_eq!(t[2].kind, Kind::Port);
    }

    #[test]
    fn extern_method_prototype_is_suppressed_by_default() {
        let t = tags(
            "class C; extern function void f(int x); endclass",
            Language::SystemVerilog,
        );
        // The enclosing frame's `prototype` flag is live for everything
        // emitted before the next `;`, so the port `x` is overridden to
        // `Prototype` right along with `f` itself, and both are dropped.
        assert_eq!(names(&t), vec!["C"]);
    }

    #[test]
    fn extern_method_prototype_surfaces_when_enabled() {
        let mut opts = ExtractOptions::new();
        opts.kind_overrides.insert(Kind::Prototype, true);
        let t = tags_with(
            "class C; extern function void f(int x); endclass",
            Language::SystemVerilog,
            &opts,
        );
        assert_eq!(names(&t), vec!["C", "C.f", "C.f.x"]);
        assert_eq!(t[1].kind, Kind::Prototype);
        assert_eq!(t[2].kind, Kind::Prototype);
        assert!(t[1].is_prototype && t[2].is_prototype);
    }

    #[test]
    fn qualified_tags_option_emits_both_forms() {
        let mut opts = ExtractOptions::new();
        opts.qualified_tags = true;
        let t = tags_with("module m; reg a; endmodule", Language::Verilog, &opts);
        // module m (unqualified, scope is already empty so no duplicate),
        // then register "a" and its qualified duplicate "m.a".
        assert_eq!(t.len(), 3);
        assert_eq!(t[0].name, "m");
        assert_eq!(t[1].name, "a");
        assert_eq!(t[1].scope, "m");
        assert_eq!(t[2].name, "m.a");
        assert_eq!(t[2].scope, "");
    }

    #[test]
    fn file_concatenation_is_idempotent() {
        let a = "module m; reg a; endmodule";
        let b = "module n; reg b; endmodule";
        let separate: Vec<String> = names(&tags(a, Language::Verilog))
            .into_iter()
            .chain(names(&tags(b, Language::Verilog)))
            .collect();
        let combined = names(&tags(&format!("{a} {b}"), Language::Verilog));
        assert_eq!(separate, combined);
    }

    #[test]
    fn scope_stack_is_always_empty_after_a_parse() {
        // Exercised indirectly: if any frame leaked, a later declaration in
        // the same buffer would be nested under it. A top-level module
        // following a fully-closed one must come back to file scope.
        let t = tags(
            "module m; reg a; endmodule module n; reg b; endmodule",
            Language::Verilog,
        );
        assert_eq!(names(&t), vec!["m", "m.a", "n", "n.b"]);
    }

    #[test]
    fn disabled_kind_still_opens_scope_for_nested_declarations() {
        let mut opts = ExtractOptions::new();
        opts.kind_overrides.insert(Kind::Module, false);
        let t = tags_with("module m; reg a; endmodule", Language::Verilog, &opts);
        // `m` itself is suppressed, but `a` is still scoped under it.
        assert_eq!(names(&t), vec!["m.a"]);
    }

    #[test]
    fn struct_variable_is_tagged_with_struct_kind() {
        let t = tags(
            "module m; struct packed { int a; } s; endmodule",
            Language::SystemVerilog,
        );
        assert_eq!(names(&t), vec!["m", "m.s"]);
        assert_eq!(t[1].kind, Kind::Struct);
    }

    #[test]
    fn covergroup_closes_on_endgroup() {
        let t = tags(
            "covergroup cg; coverpoint x; endgroup",
            Language::SystemVerilog,
        );
        assert_eq!(t[0].name, "cg");
        assert_eq!(t[0].kind, Kind::Covergroup);
    }
}
