//! The closed set of tag and token kinds, and their per-language descriptors.

use std::fmt;

use crate::language::Language;

/// The classification of a lexed word or an emitted tag.
///
/// User-visible kinds (`Constant` through `Typedef`) become tag entries.
/// The remainder are parser-internal: they classify a token during
/// recognition but are never themselves written out as a tag kind, except
/// where noted (`LocalParam`/`Parameter` are always normalized to
/// `Constant` before a tag is created).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    // --- user-visible, both languages ---
    /// `` `define ``, `parameter`, `localparam`, `specparam`.
    Constant,
    /// `event`.
    Event,
    /// `function`.
    Function,
    /// `module`.
    Module,
    /// Net data types (`wire`, `tri`, ...).
    Net,
    /// Port direction keywords (`input`, `output`, `inout`, `ref`).
    Port,
    /// Register/variable data types (`reg`, `logic`, `int`, ...).
    Register,
    /// `task`.
    Task,
    /// A labelled `begin`/`fork` block.
    Block,

    // --- user-visible, SystemVerilog only ---
    /// `assert`, `assume`, `cover`.
    Assertion,
    /// `class`.
    Class,
    /// `covergroup`.
    Covergroup,
    /// `enum`.
    Enum,
    /// `interface`.
    Interface,
    /// `modport`.
    Modport,
    /// `package`.
    Package,
    /// `program`.
    Program,
    /// A forward declaration (`extern`/`pure` method, empty struct/enum body, `typedef class`).
    Prototype,
    /// `property`, `sequence`.
    Property,
    /// `struct`, `union`.
    Struct,
    /// `typedef`.
    Typedef,

    // --- parser-internal ---
    /// Not yet classified.
    Undefined,
    /// Syntactically valid identifier with no keyword match.
    Identifier,
    /// Keyword recognized but carries no tag (e.g. `signed`).
    Ignore,
    /// A compiler directive other than `` `define ``.
    Directive,
    /// `` `define ``.
    Define,
    /// `begin`, `fork`.
    Begin,
    /// `end`, `join`, `join_any`, `join_none`.
    End,
    /// `endmodule`, `endfunction`, `endtask`, `endclass`, ... (end of a design element).
    EndDe,
    /// `localparam`, before normalization to `Constant`.
    LocalParam,
    /// `parameter`, before normalization to `Constant`.
    Parameter,
}

impl Kind {
    /// `true` if a tag of this kind opens a scope frame that subsequent
    /// declarations nest inside.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Kind::Module
                | Kind::Task
                | Kind::Function
                | Kind::Block
                | Kind::Class
                | Kind::Covergroup
                | Kind::Interface
                | Kind::Package
                | Kind::Program
                | Kind::Property
                | Kind::Typedef
                | Kind::Enum
        )
    }

    /// `true` if a scope frame of this kind is temporary: popped immediately
    /// after it has absorbed any pending buffered contents.
    pub fn is_temporary_context(self) -> bool {
        matches!(self, Kind::Typedef | Kind::Enum)
    }

    /// `true` if a design element of this kind is followed by a simple
    /// parenthesized port list (as opposed to modport's ports, which are
    /// skipped wholesale, or no port list at all).
    pub fn has_simple_port_list(self) -> bool {
        matches!(
            self,
            Kind::Task | Kind::Function | Kind::Class | Kind::Interface | Kind::Program | Kind::Property
        )
    }

    /// The name used to build the matching `end...` keyword for this
    /// container kind (e.g. `Module` -> `"module"`, so the closer is
    /// `"endmodule"`).
    pub fn end_marker_name(self) -> &'static str {
        match self {
            Kind::Module => "module",
            Kind::Function => "function",
            Kind::Task => "task",
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Package => "package",
            Kind::Program => "program",
            Kind::Property => "property",
            Kind::Covergroup => "group",
            _ => "",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A single entry in a language's kind table: whether tags of this kind are
/// emitted by default, the one-letter tag-file abbreviation, the long name,
/// and a human-readable description.
#[derive(Clone, Copy, Debug)]
pub struct KindDescriptor {
    /// Whether tags of this kind are emitted unless explicitly disabled.
    pub enabled_by_default: bool,
    /// Single-character abbreviation used in tag-kind selection flags.
    pub letter: char,
    /// Long name, used in `--list-kinds` style output.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// The kind this descriptor describes.
    pub kind: Kind,
}

/// Kind descriptors enabled for the Verilog (IEEE 1364) language mode.
pub const VERILOG_KINDS: &[KindDescriptor] = &[
    KindDescriptor { enabled_by_default: true, letter: 'c', name: "constant", description: "constants (define, parameter, specparam)", kind: Kind::Constant },
    KindDescriptor { enabled_by_default: true, letter: 'e', name: "event", description: "events", kind: Kind::Event },
    KindDescriptor { enabled_by_default: true, letter: 'f', name: "function", description: "functions", kind: Kind::Function },
    KindDescriptor { enabled_by_default: true, letter: 'm', name: "module", description: "modules", kind: Kind::Module },
    KindDescriptor { enabled_by_default: true, letter: 'n', name: "net", description: "net data types", kind: Kind::Net },
    KindDescriptor { enabled_by_default: true, letter: 'p', name: "port", description: "ports", kind: Kind::Port },
    KindDescriptor { enabled_by_default: true, letter: 'r', name: "register", description: "register data types", kind: Kind::Register },
    KindDescriptor { enabled_by_default: true, letter: 't', name: "task", description: "tasks", kind: Kind::Task },
    KindDescriptor { enabled_by_default: true, letter: 'b', name: "block", description: "blocks", kind: Kind::Block },
];

/// Kind descriptors enabled for the SystemVerilog (IEEE 1800) language mode.
pub const SYSTEMVERILOG_KINDS: &[KindDescriptor] = &[
    KindDescriptor { enabled_by_default: true, letter: 'c', name: "constant", description: "constants (define, parameter, specparam, enum values)", kind: Kind::Constant },
    KindDescriptor { enabled_by_default: true, letter: 'e', name: "event", description: "events", kind: Kind::Event },
    KindDescriptor { enabled_by_default: true, letter: 'f', name: "function", description: "functions", kind: Kind::Function },
    KindDescriptor { enabled_by_default: true, letter: 'm', name: "module", description: "modules", kind: Kind::Module },
    KindDescriptor { enabled_by_default: true, letter: 'n', name: "net", description: "net data types", kind: Kind::Net },
    KindDescriptor { enabled_by_default: true, letter: 'p', name: "port", description: "ports", kind: Kind::Port },
    KindDescriptor { enabled_by_default: true, letter: 'r', name: "register", description: "register data types", kind: Kind::Register },
    KindDescriptor { enabled_by_default: true, letter: 't', name: "task", description: "tasks", kind: Kind::Task },
    KindDescriptor { enabled_by_default: true, letter: 'b', name: "block", description: "blocks", kind: Kind::Block },
    KindDescriptor { enabled_by_default: true, letter: 'A', name: "assert", description: "assertions", kind: Kind::Assertion },
    KindDescriptor { enabled_by_default: true, letter: 'C', name: "class", description: "classes", kind: Kind::Class },
    KindDescriptor { enabled_by_default: true, letter: 'V', name: "covergroup", description: "covergroups", kind: Kind::Covergroup },
    KindDescriptor { enabled_by_default: true, letter: 'E', name: "enum", description: "enumerators", kind: Kind::Enum },
    KindDescriptor { enabled_by_default: true, letter: 'I', name: "interface", description: "interfaces", kind: Kind::Interface },
    KindDescriptor { enabled_by_default: true, letter: 'M', name: "modport", description: "modports", kind: Kind::Modport },
    KindDescriptor { enabled_by_default: true, letter: 'K', name: "package", description: "packages", kind: Kind::Package },
    KindDescriptor { enabled_by_default: true, letter: 'P', name: "program", description: "programs", kind: Kind::Program },
    KindDescriptor { enabled_by_default: false, letter: 'Q', name: "prototype", description: "prototypes", kind: Kind::Prototype },
    KindDescriptor { enabled_by_default: true, letter: 'R', name: "property", description: "properties", kind: Kind::Property },
    KindDescriptor { enabled_by_default: true, letter: 'S', name: "struct", description: "structs and unions", kind: Kind::Struct },
    KindDescriptor { enabled_by_default: true, letter: 'T', name: "typedef", description: "type declarations", kind: Kind::Typedef },
];

/// Returns the kind descriptor table for the given language.
pub fn kind_table(language: Language) -> &'static [KindDescriptor] {
    match language {
        Language::Verilog => VERILOG_KINDS,
        Language::SystemVerilog => SYSTEMVERILOG_KINDS,
    }
}

/// Returns `true` if tags of `kind` are emitted by default under `language`.
///
/// A kind absent from the language's table (e.g. `Class` under plain
/// Verilog) is never produced by the lexer under that language in the
/// first place, so this only matters for kinds the table actually lists.
pub fn kind_enabled(kind: Kind, language: Language) -> bool {
    kind_table(language)
        .iter()
        .find(|d| d.kind == kind)
        .map(|d| d.enabled_by_default)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prototype_disabled_by_default() {
        assert!(!kind_enabled(Kind::Prototype, Language::SystemVerilog));
    }

    #[test]
    fn module_enabled_both_languages() {
        assert!(kind_enabled(Kind::Module, Language::Verilog));
        assert!(kind_enabled(Kind::Module, Language::SystemVerilog));
    }

    #[test]
    fn class_only_enabled_for_systemverilog() {
        assert!(!kind_enabled(Kind::Class, Language::Verilog));
        assert!(kind_enabled(Kind::Class, Language::SystemVerilog));
    }

    #[test]
    fn container_kinds() {
        assert!(Kind::Module.is_container());
        assert!(Kind::Typedef.is_container());
        assert!(!Kind::Port.is_container());
    }

    #[test]
    fn temporary_contexts() {
        assert!(Kind::Enum.is_temporary_context());
        assert!(Kind::Typedef.is_temporary_context());
        assert!(!Kind::Class.is_temporary_context());
    }
}
