//! Keyword table mapping lowercase keywords to [`Kind`], per language.
//!
//! Three layers are consulted in order: the explicit table (keywords that
//! carry a tag-relevant classification), the compiler-directive lists (IEEE
//! 1364 §19 / IEEE 1800 §22), and the bulk reserved-word lists (IEEE 1364
//! Annex B / IEEE 1800 Annex B) which classify anything not already
//! explicitly mapped as [`Kind::Ignore`]. A word absent from all three is
//! either a plain identifier or unclassifiable.

use crate::kind::Kind;
use crate::language::Language;

/// One entry in the explicit keyword table: the keyword text, the kind it
/// maps to, and which language(s) recognize it.
struct KeywordEntry {
    word: &'static str,
    kind: Kind,
    valid_in_verilog: bool,
    valid_in_systemverilog: bool,
}

macro_rules! kw {
    ($word:expr, $kind:expr, v) => {
        KeywordEntry { word: $word, kind: $kind, valid_in_verilog: true, valid_in_systemverilog: true }
    };
    ($word:expr, $kind:expr, sv) => {
        KeywordEntry { word: $word, kind: $kind, valid_in_verilog: false, valid_in_systemverilog: true }
    };
}

/// Explicit keyword -> kind mappings, shared between both languages except
/// where marked `sv`-only. Ported from IEEE 1364/1800, as in the original
/// reference parser this crate's behavior is grounded on.
const KEYWORD_TABLE: &[KeywordEntry] = &[
    kw!("`define", Kind::Define, v),
    kw!("begin", Kind::Begin, v),
    kw!("end", Kind::End, v),
    kw!("endfunction", Kind::EndDe, v),
    kw!("endmodule", Kind::EndDe, v),
    kw!("endtask", Kind::EndDe, v),
    kw!("event", Kind::Event, v),
    kw!("fork", Kind::Begin, v),
    kw!("function", Kind::Function, v),
    kw!("genvar", Kind::Register, v),
    kw!("inout", Kind::Port, v),
    kw!("input", Kind::Port, v),
    kw!("integer", Kind::Register, v),
    kw!("join", Kind::End, v),
    kw!("localparam", Kind::LocalParam, v),
    kw!("module", Kind::Module, v),
    kw!("output", Kind::Port, v),
    kw!("parameter", Kind::Parameter, v),
    kw!("real", Kind::Register, v),
    kw!("realtime", Kind::Register, v),
    kw!("reg", Kind::Register, v),
    kw!("signed", Kind::Ignore, v),
    kw!("specparam", Kind::Constant, v),
    kw!("supply0", Kind::Net, v),
    kw!("supply1", Kind::Net, v),
    kw!("task", Kind::Task, v),
    kw!("time", Kind::Register, v),
    kw!("tri", Kind::Net, v),
    kw!("triand", Kind::Net, v),
    kw!("trior", Kind::Net, v),
    kw!("trireg", Kind::Net, v),
    kw!("tri0", Kind::Net, v),
    kw!("tri1", Kind::Net, v),
    kw!("uwire", Kind::Net, v),
    kw!("wand", Kind::Net, v),
    kw!("wire", Kind::Net, v),
    kw!("wor", Kind::Net, v),
    kw!("assert", Kind::Assertion, sv),
    kw!("assume", Kind::Assertion, sv),
    kw!("bit", Kind::Register, sv),
    kw!("byte", Kind::Register, sv),
    kw!("chandle", Kind::Register, sv),
    kw!("class", Kind::Class, sv),
    kw!("cover", Kind::Assertion, sv),
    kw!("covergroup", Kind::Covergroup, sv),
    kw!("endclass", Kind::EndDe, sv),
    kw!("endgroup", Kind::EndDe, sv),
    kw!("endinterface", Kind::EndDe, sv),
    kw!("endpackage", Kind::EndDe, sv),
    kw!("endprogram", Kind::EndDe, sv),
    kw!("endproperty", Kind::EndDe, sv),
    kw!("enum", Kind::Enum, sv),
    kw!("extern", Kind::Prototype, sv),
    kw!("int", Kind::Register, sv),
    kw!("interconnect", Kind::Net, sv),
    kw!("interface", Kind::Interface, sv),
    kw!("join_any", Kind::End, sv),
    kw!("join_none", Kind::End, sv),
    kw!("logic", Kind::Register, sv),
    kw!("longint", Kind::Register, sv),
    kw!("modport", Kind::Modport, sv),
    kw!("package", Kind::Package, sv),
    kw!("program", Kind::Program, sv),
    kw!("property", Kind::Property, sv),
    kw!("pure", Kind::Prototype, sv),
    kw!("ref", Kind::Port, sv),
    kw!("sequence", Kind::Property, sv),
    kw!("shortint", Kind::Register, sv),
    kw!("shortreal", Kind::Register, sv),
    kw!("string", Kind::Register, sv),
    kw!("struct", Kind::Struct, sv),
    kw!("type", Kind::Register, sv),
    kw!("typedef", Kind::Typedef, sv),
    kw!("union", Kind::Struct, sv),
    kw!("var", Kind::Register, sv),
    kw!("void", Kind::Register, sv),
];

/// IEEE Std 1364-2005 LRM, Appendix B "List of Keywords" — words reserved by
/// Verilog that carry no tag of their own.
const VERILOG_RESERVED: &[&str] = &[
    "always", "and", "assign", "automatic", "begin", "buf", "bufif0",
    "bufif1", "case", "casex", "casez", "cell", "cmos", "config",
    "deassign", "default", "defparam", "design", "disable", "edge",
    "else", "end", "endcase", "endconfig", "endfunction", "endgenerate",
    "endmodule", "endprimitive", "endspecify", "endtable", "endtask",
    "event", "for", "force", "forever", "fork", "function", "generate",
    "genvar", "highz0", "highz1", "if", "ifnone", "incdir", "include",
    "initial", "inout", "input", "instance", "integer", "join", "large",
    "liblist", "library", "localparam", "macromodule", "medium", "module",
    "nand", "negedge", "nmos", "nor", "noshowcancelled", "not", "notif0",
    "notif1", "or", "output", "parameter", "pmos", "posedge", "primitive",
    "pull0", "pull1", "pulldown", "pullup", "pulsestyle_onevent",
    "pulsestyle_ondetect", "rcmos", "real", "realtime", "reg", "release",
    "repeat", "rnmos", "rpmos", "rtran", "rtranif0", "rtranif1",
    "scalared", "showcancelled", "signed", "small", "specify",
    "specparam", "strong0", "strong1", "supply0", "supply1", "table",
    "task", "time", "tran", "tranif0", "tranif1", "tri", "tri0", "tri1",
    "triand", "trior", "trireg", "unsigned1", "use", "uwire", "vectored",
    "wait", "wand", "weak0", "weak1", "while", "wire", "wor", "xnor", "xor",
];

/// IEEE Std 1800-2017 LRM, Annex B "Keywords" — words reserved by
/// SystemVerilog that carry no tag of their own.
const SYSTEMVERILOG_RESERVED: &[&str] = &[
    "accept_on", "alias", "always", "always_comb", "always_ff",
    "always_latch", "and", "assign", "automatic",
    "before", "begin", "bind", "bins", "binsof", "break", "buf",
    "bufif0", "bufif1", "case", "casex", "casez", "cell",
    "checker", "clocking", "cmos", "config", "const",
    "constraint", "context", "continue", "cover", "coverpoint", "cross",
    "deassign", "default", "defparam", "design",
    "disable", "dist", "do", "edge", "else", "end", "endcase",
    "endchecker", "endconfig", "endfunction",
    "endgenerate", "endmodule",
    "endprimitive", "endspecify",
    "endsequence", "endtable", "endtask", "eventually",
    "expect", "export", "extends", "final", "first_match",
    "for", "force", "foreach", "forever", "fork", "forkjoin", "function",
    "generate", "global", "highz0", "highz1", "if", "iff",
    "ifnone", "ignore_bins", "illegal_bins", "implements", "implies",
    "import", "incdir", "include", "initial", "inout", "input", "inside",
    "instance", "integer", "intersect", "join", "join_any", "join_none", "large", "let",
    "liblist", "library", "local", "macromodule",
    "matches", "medium", "module", "nand",
    "negedge", "nettype", "new", "nexttime", "nmos", "nor",
    "noshowcancelled", "not", "notif0", "notif1", "null", "or", "output",
    "packed", "pmos", "posedge", "primitive",
    "priority", "protected", "pull0", "pull1",
    "pulldown", "pullup", "pulsestyle_ondetect", "pulsestyle_onevent",
    "rand", "randc", "randcase", "randsequence", "rcmos", "real",
    "realtime", "reg", "reject_on", "release", "repeat",
    "restrict", "return", "rnmos", "rpmos", "rtran", "rtranif0",
    "rtranif1", "s_always", "s_eventually", "s_nexttime", "s_until",
    "s_until_with", "scalared", "showcancelled", "signed", "small", "soft",
    "solve", "specify", "specparam", "static", "strong", "strong0",
    "strong1", "super", "supply0", "supply1", "sync_accept_on",
    "sync_reject_on", "table", "tagged", "task", "this", "throughout",
    "time", "timeprecision", "timeunit", "tran", "tranif0", "tranif1",
    "tri", "tri0", "tri1", "triand", "trior", "trireg",
    "unique", "unique0", "unsigned", "until", "until_with",
    "untyped", "use", "uwire", "vectored", "virtual", "wait",
    "wait_order", "wand", "weak", "weak0", "weak1", "while",
    "wildcard", "wire", "with", "within", "wor", "xnor", "xor",
];

/// IEEE Std 1364-2005 LRM, "19. Compiler directives".
const VERILOG_DIRECTIVES: &[&str] = &[
    "`begin_keywords", "`celldefine", "`default_nettype", "`define",
    "`else", "`elsif", "`end_keywords", "`endcelldefine", "`endif",
    "`ifdef", "`ifndef", "`include", "`line", "`nounconnected_drive",
    "`pragma", "`resetall", "`timescale", "`unconnected_drive", "`undef",
];

/// IEEE Std 1800-2017 LRM, "22. Compiler directives".
const SYSTEMVERILOG_DIRECTIVES: &[&str] = &[
    "`__LINE__", "`begin_keywords", "`celldefine", "`default_nettype",
    "`define", "`else", "`elsif", "`end_keywords", "`endcelldefine",
    "`endif", "`ifdef", "`ifndef", "`include", "`line",
    "`nounconnected_drive", "`pragma", "`resetall", "`timescale",
    "`unconnected_drive", "`undef", "`undefineall",
];

/// Looks up `word` under `language`'s keyword table.
///
/// Returns `None` if the word is not a keyword at all under this language
/// (it may still be a valid plain identifier; that decision is the lexer's).
pub fn lookup(word: &str, language: Language) -> Option<Kind> {
    for entry in KEYWORD_TABLE {
        if entry.word == word {
            let valid = match language {
                Language::Verilog => entry.valid_in_verilog,
                Language::SystemVerilog => entry.valid_in_systemverilog,
            };
            if valid {
                return Some(entry.kind);
            }
        }
    }

    let directives = match language {
        Language::Verilog => VERILOG_DIRECTIVES,
        Language::SystemVerilog => SYSTEMVERILOG_DIRECTIVES,
    };
    if directives.contains(&word) {
        return Some(Kind::Directive);
    }

    let reserved = match language {
        Language::Verilog => VERILOG_RESERVED,
        Language::SystemVerilog => SYSTEMVERILOG_RESERVED,
    };
    if reserved.contains(&word) {
        return Some(Kind::Ignore);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_keyword_both_languages() {
        assert_eq!(lookup("module", Language::Verilog), Some(Kind::Module));
        assert_eq!(lookup("module", Language::SystemVerilog), Some(Kind::Module));
    }

    #[test]
    fn class_keyword_systemverilog_only() {
        assert_eq!(lookup("class", Language::Verilog), None);
        assert_eq!(lookup("class", Language::SystemVerilog), Some(Kind::Class));
    }

    #[test]
    fn parameter_vs_localparam() {
        assert_eq!(lookup("parameter", Language::Verilog), Some(Kind::Parameter));
        assert_eq!(lookup("localparam", Language::Verilog), Some(Kind::LocalParam));
    }

    #[test]
    fn define_directive_is_explicit_define_kind() {
        assert_eq!(lookup("`define", Language::Verilog), Some(Kind::Define));
        assert_eq!(lookup("`define", Language::SystemVerilog), Some(Kind::Define));
    }

    #[test]
    fn other_directive_is_generic_directive_kind() {
        assert_eq!(lookup("`ifdef", Language::Verilog), Some(Kind::Directive));
        assert_eq!(lookup("`timescale", Language::SystemVerilog), Some(Kind::Directive));
    }

    #[test]
    fn reserved_word_not_in_explicit_table_is_ignore() {
        assert_eq!(lookup("always", Language::Verilog), Some(Kind::Ignore));
        assert_eq!(lookup("virtual", Language::SystemVerilog), Some(Kind::Ignore));
    }

    #[test]
    fn unknown_word_is_none() {
        assert_eq!(lookup("my_signal", Language::Verilog), None);
        assert_eq!(lookup("my_signal", Language::SystemVerilog), None);
    }

    #[test]
    fn signed_is_explicit_ignore_not_reserved_list() {
        assert_eq!(lookup("signed", Language::Verilog), Some(Kind::Ignore));
    }
}
