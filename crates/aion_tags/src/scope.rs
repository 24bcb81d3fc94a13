//! The scope stack: an explicit, owning record of nested design elements.
//!
//! Unlike the reference parser's `tokenInfo`, which doubles as both "the
//! word currently being lexed" and "a scope's saved context" via manual
//! save/restore of a single mutable struct, this stack is a plain
//! `Vec<ScopeFrame>`. Entering a scope pushes a frame; leaving it pops one.
//! Nothing here is shared or aliased between frames.

use crate::kind::Kind;

/// One nested design element: a module, task, function, block, class, ...
#[derive(Clone, Debug)]
pub struct ScopeFrame {
    /// The kind of the element that opened this scope.
    pub kind: Kind,
    /// The element's name, if it had one (anonymous blocks have none).
    pub name: Option<String>,
    /// Depth of `begin`/`fork` nesting seen directly inside this frame,
    /// used to tell an inner `end` from the frame's own closing `end`.
    /// Signed because mismatched labels can drive it transiently negative.
    pub nest_level: i32,
    /// The most recently classified token's kind, used by callers that
    /// need one token of lookahead context (e.g. distinguishing a repeated
    /// `end` from the first one).
    pub last_kind: Kind,
    /// Name of the base class, for a frame opened by `extends`/`implements`
    /// (a class inheriting from a base, or an interface class). `None` for
    /// frames with no inheritance.
    pub inheritance: Option<String>,
    /// Last label seen (text before `:` in e.g. a named `begin`, or a
    /// `cover`/`assert` property name), used to name otherwise-anonymous
    /// blocks and assertions.
    pub block_name: Option<String>,
    /// `true` if this frame is a forward declaration (`extern`/`pure`
    /// method, or a typedef class) rather than a full definition.
    pub prototype: bool,
    /// `true` if this frame or an ancestor is a `class`, used to qualify
    /// member names with their enclosing class.
    pub class_scope: bool,
    /// `true` for a `class` frame synthesized for an out-of-class method
    /// definition (`ClassName::method`) rather than a real `class ... endclass`
    /// body. Popped automatically once its inner frame closes, since no
    /// `endclass` is coming for it.
    pub implicit: bool,
    /// `true` if this frame was opened while parsing a `parameter`/
    /// `localparam` declaration (affects how a following `=` is handled).
    pub parameter: bool,
    /// `true` once this frame's parenthesized parameter list has been seen.
    pub has_param_list: bool,
}

impl ScopeFrame {
    /// A fresh, empty frame for the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            name: None,
            nest_level: 0,
            last_kind: Kind::Undefined,
            inheritance: None,
            block_name: None,
            prototype: false,
            class_scope: false,
            implicit: false,
            parameter: false,
            has_param_list: false,
        }
    }

    /// A fresh frame carrying a name.
    pub fn named(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(kind)
        }
    }
}

/// An explicit stack of nested [`ScopeFrame`]s.
///
/// The file-level (top) scope always exists as the bottom frame with
/// [`Kind::Undefined`] and no name, so `top`/`top_mut` never panic.
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    /// Creates a new stack containing only the implicit file-level frame.
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::new(Kind::Undefined)],
        }
    }

    /// The current (innermost) frame.
    pub fn top(&self) -> &ScopeFrame {
        self.frames.last().expect("file-level frame is never popped")
    }

    /// The current (innermost) frame, mutable.
    pub fn top_mut(&mut self) -> &mut ScopeFrame {
        self.frames.last_mut().expect("file-level frame is never popped")
    }

    /// Number of frames above the implicit file-level frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Pushes a new frame, entering a nested scope.
    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    /// Pops the current frame, returning it. Never pops the file-level frame.
    pub fn pop(&mut self) -> Option<ScopeFrame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Builds the dotted qualified name of the current frame by walking
    /// outward through enclosing class/module frames that have names.
    pub fn qualified_name(&self, leaf: &str) -> String {
        let mut parts: Vec<&str> = self
            .frames
            .iter()
            .filter_map(|f| f.name.as_deref())
            .collect();
        parts.push(leaf);
        parts.join(".")
    }

    /// The dotted path of enclosing named frames, not including any leaf
    /// name of its own. Empty at file scope.
    pub fn scope_path(&self) -> String {
        self.frames
            .iter()
            .filter_map(|f| f.name.as_deref())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `true` if any frame on the stack (excluding file level) is a class.
    pub fn in_class_scope(&self) -> bool {
        self.frames.iter().skip(1).any(|f| f.class_scope)
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_file_level_frame_only() {
        let s = ScopeStack::new();
        assert_eq!(s.depth(), 0);
        assert_eq!(s.top().kind, Kind::Undefined);
    }

    #[test]
    fn push_and_pop() {
        let mut s = ScopeStack::new();
        s.push(ScopeFrame::named(Kind::Module, "foo"));
        assert_eq!(s.depth(), 1);
        assert_eq!(s.top().name.as_deref(), Some("foo"));
        let popped = s.pop().unwrap();
        assert_eq!(popped.name.as_deref(), Some("foo"));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn cannot_pop_file_level_frame() {
        let mut s = ScopeStack::new();
        assert!(s.pop().is_none());
    }

    #[test]
    fn qualified_name_joins_enclosing_names() {
        let mut s = ScopeStack::new();
        s.push(ScopeFrame::named(Kind::Class, "outer"));
        s.push(ScopeFrame::named(Kind::Function, "inner"));
        assert_eq!(s.qualified_name("leaf"), "outer.inner.leaf");
    }

    #[test]
    fn in_class_scope_detects_ancestor() {
        let mut s = ScopeStack::new();
        let mut frame = ScopeFrame::named(Kind::Class, "c");
        frame.class_scope = true;
        s.push(frame);
        s.push(ScopeFrame::named(Kind::Function, "m"));
        assert!(s.in_class_scope());
    }
}
