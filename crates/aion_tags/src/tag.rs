//! Tag entries and the sink they're emitted to.

use aion_source::{FileId, Span};

use crate::kind::Kind;

/// One emitted tag: a name, its kind, where it was found, and the
/// (possibly empty) chain of enclosing scopes it's nested inside.
#[derive(Clone, Debug, PartialEq)]
pub struct TagEntry {
    /// The tag's name, as written in the source (not qualified).
    pub name: String,
    /// The tag's kind. Always one of the user-visible kinds: parser-internal
    /// kinds never reach a `TagEntry`.
    pub kind: Kind,
    /// The file the tag was found in.
    pub file: FileId,
    /// The tag's location within that file.
    pub span: Span,
    /// Dotted path of enclosing named scopes (module, class, ...), without
    /// the tag's own name, e.g. `"outer_mod.inner_class"`. Empty at file scope.
    pub scope: String,
    /// `true` if this declaration is a forward declaration / prototype
    /// rather than the defining occurrence.
    pub is_prototype: bool,
    /// Base class name, for a `class` tag opened with `extends`/
    /// `implements`. `None` for every other kind and for classes with no
    /// base.
    pub inheritance: Option<String>,
    /// Tri-state: `Some(true)`/`Some(false)` for a `Constant` tag that came
    /// from an overridable `parameter` (as opposed to `localparam` or a
    /// module `parameter` fixed by a port list), `None` for every other
    /// kind.
    pub parameter: Option<bool>,
}

impl TagEntry {
    /// The tag's fully qualified dotted name, including its own name.
    pub fn qualified_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.scope, self.name)
        }
    }
}

/// Receives tags as they're produced during a scan.
///
/// A trait rather than a bare `Vec` push so that callers can stream tags
/// directly to a writer instead of buffering an entire file's worth.
pub trait TagSink {
    /// Records one tag.
    fn emit(&mut self, tag: TagEntry);
}

impl TagSink for Vec<TagEntry> {
    fn emit(&mut self, tag: TagEntry) {
        self.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_source::{FileId, Span};

    fn sample(name: &str, scope: &str) -> TagEntry {
        let file = FileId::from_raw(0);
        TagEntry {
            name: name.to_string(),
            kind: Kind::Module,
            file,
            span: Span::new(file, 0, 1),
            scope: scope.to_string(),
            is_prototype: false,
            inheritance: None,
            parameter: None,
        }
    }

    #[test]
    fn qualified_name_with_scope() {
        let t = sample("leaf", "outer.inner");
        assert_eq!(t.qualified_name(), "outer.inner.leaf");
    }

    #[test]
    fn qualified_name_at_file_scope() {
        let t = sample("leaf", "");
        assert_eq!(t.qualified_name(), "leaf");
    }

    #[test]
    fn vec_sink_collects_emitted_tags() {
        let mut sink: Vec<TagEntry> = Vec::new();
        sink.emit(sample("a", ""));
        sink.emit(sample("b", ""));
        assert_eq!(sink.len(), 2);
    }
}
