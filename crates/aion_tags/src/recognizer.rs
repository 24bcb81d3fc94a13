//! The declaration recogniser: dispatches on lexed word kind, drives the
//! per-construct sub-parsers, and emits tags through a single `create_tag`
//! path.
//!
//! The driving loop follows the same "character already consumed in, next
//! unread character out" convention as [`crate::skip`]: every handler
//! receives the stream positioned just after whatever it was invoked on and
//! returns the next character the caller hasn't looked at yet.

use log::{debug, trace};

use aion_source::{FileId, Span};

use crate::char_source::{CharSource, EOF};
use crate::kind::Kind;
use crate::language::Language;
use crate::options::ExtractOptions;
use crate::scope::{ScopeFrame, ScopeStack};
use crate::skip;
use crate::tag::{TagEntry, TagSink};
use crate::token::{self, classify_at, LexToken};

/// A buffered enum literal member, held until the typedef or variable name
/// that follows its `{ ... }` body opens the container it belongs under.
struct PendingConstant {
    name: String,
    line: u32,
    pos: u32,
}

/// A parameter collected from a `#(...)` list, held until its enclosing
/// design element's own tag has been emitted (so it can be scoped under it).
struct ParamItem {
    text: String,
    line: u32,
    pos: u32,
    overridable: bool,
}

/// Optional, rarely-needed attributes for [`Parser::create_tag`], bundled so
/// the common call sites don't thread four extra arguments through.
#[derive(Clone, Default)]
struct TagOpts {
    inheritance: Option<String>,
    parameter_override: Option<bool>,
    /// Forces the emitted kind to [`Kind::Prototype`] regardless of the
    /// enclosing frame's own `prototype` flag. Used for forward declarations
    /// that carry no enclosing frame to inherit the flag from (`typedef
    /// class Foo;`, a bodyless `enum`/`struct`).
    force_prototype: bool,
}

/// Drives one parse of a single source file, scope stack and pending-enum
/// buffer included. Call [`Parser::run`] once; it consumes the source to EOF.
pub struct Parser<'a, 's> {
    src: CharSource<'a>,
    language: Language,
    options: &'s ExtractOptions,
    scope: ScopeStack,
    pending_enum: Vec<PendingConstant>,
    file: FileId,
    sink: &'s mut dyn TagSink,
}

impl<'a, 's> Parser<'a, 's> {
    pub fn new(
        content: &'a str,
        file: FileId,
        language: Language,
        options: &'s ExtractOptions,
        sink: &'s mut dyn TagSink,
    ) -> Self {
        Self {
            src: CharSource::new(content),
            language,
            options,
            scope: ScopeStack::new(),
            pending_enum: Vec::new(),
            file,
            sink,
        }
    }

    /// Parses the whole source, emitting tags as they're recognised.
    pub fn run(mut self) {
        let mut c = self.src.get();
        loop {
            c = self.src.skip_white(c);
            if c == EOF {
                break;
            }
            match c as u8 {
                b';' => {
                    self.on_semicolon();
                    c = self.src.get();
                    continue;
                }
                b'#' => {
                    c = skip::skip_delay(&mut self.src, c);
                    continue;
                }
                b':' => {
                    // A stray top-level colon: the labels this would matter
                    // for (blocks, assertions) are consumed by the handler
                    // that reads the identifier in front of them.
                    c = self.src.get();
                    continue;
                }
                _ => {}
            }
            let tok = classify_at(&mut self.src, c, self.language);
            c = self.dispatch(tok);
        }
        // End of file: close whatever the input left open.
        while self.scope.pop().is_some() {}
    }

    fn dispatch(&mut self, tok: LexToken) -> i32 {
        use Kind::*;
        match tok.kind {
            Constant | Event | Net | Port | Register | LocalParam | Parameter => {
                let mut c = self.src.get();
                c = self.src.skip_white(c);
                self.tag_name_list(tok.kind, c, None)
            }
            Identifier => self.dispatch_identifier(tok),
            Class => self.process_class(),
            Typedef => self.process_typedef(),
            Enum => self.process_enum(Kind::Enum),
            Struct => self.process_struct(Kind::Struct),
            Prototype => {
                self.scope.top_mut().prototype = true;
                self.src.get()
            }
            Covergroup | Interface | Modport | Module | Package | Program | Property => {
                self.process_design_element(tok.kind)
            }
            Begin => self.process_begin(),
            End | EndDe => self.process_end(&tok),
            Function | Task => self.process_function_task(tok.kind),
            Assertion => self.process_assertion(),
            Define => self.process_define(),
            Directive => {
                let c = self.src.get();
                skip::skip_to_new_line(&mut self.src, c)
            }
            Ignore => self.src.get(),
            Undefined => {
                trace!("unexpected token kind {:?}", tok.kind);
                self.src.get()
            }
            // Remaining kinds (Begin/End/EndDe/LocalParam/Parameter handled
            // above) never reach dispatch as a bare top-level classification.
            _ => self.src.get(),
        }
    }

    fn dispatch_identifier(&mut self, tok: LexToken) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        match c as u8 {
            b':' => {
                self.scope.top_mut().block_name = Some(tok.text);
                let n = self.src.get();
                self.src.skip_white(n)
            }
            b'=' => {
                let e = self.src.get();
                skip::skip_expression(&mut self.src, e)
            }
            _ => self.tag_name_list(Kind::Identifier, c, None),
        }
    }

    /// Identifier list with optional dimensions, initialisers, and a leading
    /// user-defined-type name. Shared by every data-type declaration kind
    /// (`Net`, `Register`, `Port`, `Constant`/`LocalParam`/`Parameter`) and by
    /// a plain `Identifier` acting as a user type.
    fn tag_name_list(&mut self, declared_kind: Kind, mut c: i32, opts: Option<TagOpts>) -> i32 {
        let mut actual_kind = declared_kind;

        if c as u8 == b'(' {
            c = skip::skip_past_match(&mut self.src, b'(', b')');
            c = self.src.skip_white(c);
        }
        c = skip::skip_dimensions(&mut self.src, c);
        if c != EOF && c as u8 == b'#' {
            c = skip::skip_delay(&mut self.src, c);
        }

        loop {
            if c == EOF {
                return EOF;
            }
            if c as u8 == b'`' {
                let n = self.src.get();
                c = skip::skip_macro(&mut self.src, n);
                continue;
            }
            if !token::starts_identifier(c) {
                match c as u8 {
                    b';' | b',' | b')' => return c,
                    _ => {
                        c = self.src.get();
                        continue;
                    }
                }
            }

            let tok = classify_at(&mut self.src, c, self.language);
            let mut next = self.src.get();
            next = self.src.skip_white(next);

            match tok.kind {
                Kind::Identifier => {
                    next = skip::skip_dimensions(&mut self.src, next);
                    let resolved = resolve_kind(declared_kind, actual_kind);
                    match next as u8 {
                        b',' => {
                            self.create_tag(&tok, resolved, opts.clone());
                            c = self.src.get();
                            c = self.src.skip_white(c);
                        }
                        b';' => {
                            self.create_tag(&tok, resolved, opts.clone());
                            return next;
                        }
                        b')' => {
                            self.create_tag(&tok, resolved, opts.clone());
                            return self.src.get();
                        }
                        b'=' => {
                            self.create_tag(&tok, resolved, opts.clone());
                            let e = self.src.get();
                            c = skip::skip_expression(&mut self.src, e);
                            if c != EOF && c as u8 == b',' {
                                c = self.src.get();
                                c = self.src.skip_white(c);
                            } else {
                                return c;
                            }
                        }
                        b'(' => {
                            // Module instance with a connection list, not a tag.
                            return skip::skip_past_match(&mut self.src, b'(', b')');
                        }
                        _ => {
                            c = next;
                        }
                    }
                }
                Kind::Net | Kind::Register => {
                    if declared_kind == Kind::Identifier {
                        actual_kind = tok.kind;
                    }
                    c = next;
                }
                _ => {
                    c = next;
                }
            }
        }
    }

    fn process_function_task(&mut self, kind: Kind) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        let mut last_name: Option<LexToken> = None;
        let mut pushed_implicit_class = false;

        loop {
            if c == EOF {
                if pushed_implicit_class {
                    self.scope.pop();
                }
                return EOF;
            }
            match c as u8 {
                b'(' | b';' => break,
                b'#' => {
                    c = skip::skip_parameter_assignment(&mut self.src, c);
                    continue;
                }
                b':' => {
                    let next = self.src.get();
                    if next != EOF && next as u8 == b':' {
                        if let Some(name_tok) = last_name.take() {
                            let mut frame = ScopeFrame::named(Kind::Class, name_tok.text);
                            frame.class_scope = true;
                            frame.implicit = true;
                            self.scope.push(frame);
                            pushed_implicit_class = true;
                        }
                        c = self.src.get();
                        c = self.src.skip_white(c);
                    } else {
                        c = next;
                    }
                    continue;
                }
                _ => {
                    if token::starts_identifier(c) {
                        let tok = classify_at(&mut self.src, c, self.language);
                        if tok.kind == Kind::Identifier {
                            last_name = Some(tok);
                        }
                        c = self.src.get();
                        c = self.src.skip_white(c);
                    } else {
                        c = self.src.get();
                    }
                }
            }
        }

        let name_tok = match last_name {
            Some(t) => t,
            None => {
                if pushed_implicit_class {
                    self.scope.pop();
                }
                return skip::skip_to_semicolon(&mut self.src, c);
            }
        };

        self.create_tag(&name_tok, kind, None);

        if c as u8 == b'(' {
            c = self.process_port_list();
        }
        c
    }

    /// Called with the current character positioned at `(`.
    fn process_port_list(&mut self) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        loop {
            if c == EOF {
                return EOF;
            }
            match c as u8 {
                b')' => return self.src.get(),
                b';' => return c,
                b',' => {
                    c = self.src.get();
                    c = self.src.skip_white(c);
                    continue;
                }
                b'(' => {
                    c = skip::skip_past_match(&mut self.src, b'(', b')');
                    continue;
                }
                b'{' => {
                    c = skip::skip_past_match(&mut self.src, b'{', b'}');
                    continue;
                }
                b'[' => {
                    c = skip::skip_dimensions(&mut self.src, c);
                    continue;
                }
                b'`' => {
                    let n = self.src.get();
                    c = skip::skip_macro(&mut self.src, n);
                    continue;
                }
                b'=' => {
                    let e = self.src.get();
                    c = skip::skip_expression(&mut self.src, e);
                    continue;
                }
                _ => {}
            }
            if !token::starts_identifier(c) {
                c = self.src.get();
                continue;
            }
            let tok = classify_at(&mut self.src, c, self.language);
            let mut next = self.src.get();
            next = self.src.skip_white(next);
            if tok.kind == Kind::Identifier {
                if token::starts_identifier(next) {
                    // Another identifier follows directly: this one was a
                    // type or direction modifier, not the port's own name.
                    c = next;
                } else {
                    self.create_tag(&tok, Kind::Port, None);
                    c = next;
                }
            } else {
                c = next;
            }
        }
    }

    fn process_design_element(&mut self, kind: Kind) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        let mut name_tok = None;
        loop {
            if c == EOF {
                return EOF;
            }
            if !token::starts_identifier(c) {
                return skip::skip_to_semicolon(&mut self.src, c);
            }
            let tok = classify_at(&mut self.src, c, self.language);
            c = self.src.get();
            c = self.src.skip_white(c);
            if tok.kind == Kind::Ignore {
                continue;
            }
            name_tok = Some(tok);
            break;
        }
        let name_tok = name_tok.expect("loop only exits with a name or an early return");
        self.create_tag(&name_tok, kind, None);

        if c != EOF && c as u8 == b'#' {
            let (params, next_c) = self.process_parameter_list(c);
            self.scope.top_mut().has_param_list = true;
            c = next_c;
            c = self.src.skip_white(c);
            for p in params {
                self.emit_param(&p);
            }
        }

        if c != EOF && c as u8 == b'(' {
            if kind == Kind::Modport {
                c = skip::skip_past_match(&mut self.src, b'(', b')');
            } else if kind == Kind::Module || kind.has_simple_port_list() {
                c = self.process_port_list();
            }
        }
        c
    }

    /// Called at `#`. Returns the parameters found (FIFO order) and the next
    /// unread character.
    fn process_parameter_list(&mut self, c: i32) -> (Vec<ParamItem>, i32) {
        debug_assert_eq!(c as u8, b'#');
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        let mut items = Vec::new();
        if c == EOF || c as u8 != b'(' {
            return (items, c);
        }
        c = self.src.get();
        c = self.src.skip_white(c);

        let mut overridable = true;
        let mut pending_name: Option<LexToken> = None;

        while c != EOF && c as u8 != b')' {
            if !token::starts_identifier(c) {
                match c as u8 {
                    b',' => {
                        if let Some(name) = pending_name.take() {
                            items.push(ParamItem {
                                text: name.text,
                                line: name.line,
                                pos: name.pos,
                                overridable,
                            });
                        }
                        c = self.src.get();
                        c = self.src.skip_white(c);
                    }
                    b'=' => {
                        let e = self.src.get();
                        c = skip::skip_expression(&mut self.src, e);
                    }
                    b'[' => {
                        c = skip::skip_dimensions(&mut self.src, c);
                    }
                    _ => {
                        c = self.src.get();
                    }
                }
                continue;
            }

            let tok = classify_at(&mut self.src, c, self.language);
            c = self.src.get();
            c = self.src.skip_white(c);
            match tok.kind {
                Kind::Parameter => overridable = true,
                Kind::LocalParam => overridable = false,
                Kind::Identifier => pending_name = Some(tok),
                _ => {}
            }
        }
        if let Some(name) = pending_name.take() {
            items.push(ParamItem {
                text: name.text,
                line: name.line,
                pos: name.pos,
                overridable,
            });
        }
        if c != EOF && c as u8 == b')' {
            c = self.src.get();
        }
        (items, c)
    }

    fn emit_param(&mut self, item: &ParamItem) {
        let tok = LexToken {
            text: item.text.clone(),
            kind: Kind::Constant,
            line: item.line,
            pos: item.pos,
        };
        let opts = TagOpts {
            parameter_override: Some(item.overridable),
            ..Default::default()
        };
        self.create_tag(&tok, Kind::Constant, Some(opts));
    }

    fn process_class(&mut self) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        loop {
            if c == EOF {
                return EOF;
            }
            if !token::starts_identifier(c) {
                return skip::skip_to_semicolon(&mut self.src, c);
            }
            let tok = classify_at(&mut self.src, c, self.language);
            if tok.kind == Kind::Ignore {
                c = self.src.get();
                c = self.src.skip_white(c);
                continue;
            }
            return self.process_class_named(tok);
        }
    }

    fn process_class_named(&mut self, name_tok: LexToken) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);

        let mut params = Vec::new();
        if c != EOF && c as u8 == b'#' {
            let (p, next_c) = self.process_parameter_list(c);
            params = p;
            c = next_c;
            c = self.src.skip_white(c);
        }

        let mut inheritance = None;
        if c != EOF && token::starts_identifier(c) {
            let tok = classify_at(&mut self.src, c, self.language);
            if tok.text == "extends" {
                let mut ec = self.src.get();
                ec = self.src.skip_white(ec);
                if ec != EOF && token::starts_identifier(ec) {
                    let base_tok = classify_at(&mut self.src, ec, self.language);
                    ec = self.src.get();
                    ec = self.src.skip_white(ec);
                    ec = skip::skip_parameter_assignment(&mut self.src, ec);
                    inheritance = Some(base_tok.text);
                }
                c = ec;
            } else {
                c = self.src.get();
                c = self.src.skip_white(c);
            }
        }

        let opts = TagOpts {
            inheritance,
            ..Default::default()
        };
        self.create_tag(&name_tok, Kind::Class, Some(opts));
        self.scope.top_mut().class_scope = true;
        for p in params {
            self.emit_param(&p);
        }
        c
    }

    fn process_enum(&mut self, final_kind: Kind) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);

        loop {
            if c == EOF {
                return EOF;
            }
            if c as u8 == b'{' {
                break;
            }
            if !token::starts_identifier(c) {
                c = self.src.get();
                continue;
            }
            let tok = classify_at(&mut self.src, c, self.language);
            c = self.src.get();
            c = self.src.skip_white(c);
            c = skip::skip_dimensions(&mut self.src, c);
            if c == EOF {
                return EOF;
            }
            if c as u8 == b'{' {
                break;
            }
            if matches!(c as u8, b';' | b',' | b')') {
                // No `{ ... }` ever appeared: a forward declaration.
                let opts = TagOpts {
                    force_prototype: true,
                    ..Default::default()
                };
                self.create_tag(&tok, Kind::Enum, Some(opts));
                return c;
            }
        }

        // c == '{'
        c = self.src.get();
        c = self.src.skip_white(c);
        loop {
            if c == EOF {
                break;
            }
            if c as u8 == b'}' {
                c = self.src.get();
                break;
            }
            if !token::starts_identifier(c) {
                c = self.src.get();
                c = self.src.skip_white(c);
                continue;
            }
            let member_tok = classify_at(&mut self.src, c, self.language);
            c = self.src.get();
            c = self.src.skip_white(c);
            c = skip::skip_dimensions(&mut self.src, c);
            if c != EOF && c as u8 == b'=' {
                let e = self.src.get();
                c = skip::skip_expression(&mut self.src, e);
            }
            self.pending_enum.push(PendingConstant {
                name: member_tok.text,
                line: member_tok.line,
                pos: member_tok.pos,
            });
            c = self.src.skip_white(c);
            if c != EOF && c as u8 == b',' {
                c = self.src.get();
                c = self.src.skip_white(c);
            }
        }

        c = self.src.skip_white(c);
        self.tag_name_list(final_kind, c, None)
    }

    fn process_struct(&mut self, final_kind: Kind) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        loop {
            if c == EOF || c as u8 == b'{' {
                break;
            }
            if token::starts_identifier(c) {
                let _modifier = classify_at(&mut self.src, c, self.language);
                c = self.src.get();
                c = self.src.skip_white(c);
                continue;
            }
            c = self.src.get();
        }

        let had_body = c != EOF && c as u8 == b'{';
        if had_body {
            c = skip::skip_past_match(&mut self.src, b'{', b'}');
            c = self.src.skip_white(c);
        }
        c = skip::skip_dimensions(&mut self.src, c);

        if had_body {
            self.tag_name_list(final_kind, c, None)
        } else {
            let opts = TagOpts {
                force_prototype: true,
                ..Default::default()
            };
            self.tag_name_list(final_kind, c, Some(opts))
        }
    }

    fn process_typedef(&mut self) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        if c == EOF || !token::starts_identifier(c) {
            return skip::skip_to_semicolon(&mut self.src, c);
        }
        let tok = classify_at(&mut self.src, c, self.language);
        match tok.text.as_str() {
            "interface" => {
                let mut nc = self.src.get();
                nc = self.src.skip_white(nc);
                if nc != EOF && token::starts_identifier(nc) {
                    let _class_kw = classify_at(&mut self.src, nc, self.language);
                }
                self.typedef_forward_name()
            }
            "class" => self.typedef_forward_name(),
            "enum" => self.process_enum(Kind::Typedef),
            "struct" | "union" => self.process_struct(Kind::Typedef),
            _ => self.typedef_general(tok),
        }
    }

    fn typedef_forward_name(&mut self) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        if c == EOF || !token::starts_identifier(c) {
            return skip::skip_to_semicolon(&mut self.src, c);
        }
        let name_tok = classify_at(&mut self.src, c, self.language);
        let opts = TagOpts {
            force_prototype: true,
            ..Default::default()
        };
        self.create_tag(&name_tok, Kind::Typedef, Some(opts));
        let next = self.src.get();
        skip::skip_to_semicolon(&mut self.src, next)
    }

    fn typedef_general(&mut self, first_tok: LexToken) -> i32 {
        let mut last_ident = if first_tok.kind == Kind::Identifier {
            Some(first_tok.clone())
        } else {
            None
        };
        let mut last_tok = first_tok;
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        loop {
            c = skip::skip_dimensions(&mut self.src, c);
            if c != EOF {
                c = skip::skip_parameter_assignment(&mut self.src, c);
            }
            c = self.src.skip_white(c);
            if c == EOF || c as u8 == b';' {
                break;
            }
            if !token::starts_identifier(c) {
                c = self.src.get();
                c = self.src.skip_white(c);
                continue;
            }
            last_tok = classify_at(&mut self.src, c, self.language);
            if last_tok.kind == Kind::Identifier {
                last_ident = Some(last_tok.clone());
            }
            c = self.src.get();
            c = self.src.skip_white(c);
        }

        match last_ident {
            Some(name_tok) => self.create_tag(&name_tok, Kind::Typedef, None),
            None => {
                let opts = TagOpts {
                    force_prototype: true,
                    ..Default::default()
                };
                self.create_tag(&last_tok, Kind::Typedef, Some(opts));
            }
        }

        if c != EOF && c as u8 == b';' {
            self.src.get()
        } else {
            c
        }
    }

    fn process_define(&mut self) -> i32 {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        if c == EOF || !token::starts_identifier(c) {
            return skip::skip_to_new_line(&mut self.src, c);
        }
        let tok = classify_at(&mut self.src, c, self.language);
        self.create_tag(&tok, Kind::Constant, None);
        let next = self.src.get();
        skip::skip_to_new_line(&mut self.src, next)
    }

    fn process_assertion(&mut self) -> i32 {
        if let Some(name) = self.scope.top_mut().block_name.take() {
            if !name.is_empty() {
                let tok = LexToken {
                    text: name,
                    kind: Kind::Assertion,
                    line: self.src.current_line(),
                    pos: self.src.current_pos(),
                };
                self.create_tag(&tok, Kind::Assertion, None);
            }
        }
        let c = self.src.get();
        skip::skip_to_semicolon(&mut self.src, c)
    }

    fn process_begin(&mut self) -> i32 {
        self.scope.top_mut().nest_level += 1;
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        if c != EOF && c as u8 == b':' {
            let mut nc = self.src.get();
            nc = self.src.skip_white(nc);
            if nc != EOF && token::starts_identifier(nc) {
                let tok = classify_at(&mut self.src, nc, self.language);
                self.create_tag(&tok, Kind::Block, None);
                return self.src.get();
            }
            return nc;
        }
        c
    }

    /// Looks for a `: name` label right after an end marker, consuming it
    /// if present. Returns whether a label was found and the next
    /// already-read character the caller hasn't looked at yet.
    fn consume_end_label(&mut self) -> (bool, i32) {
        let mut c = self.src.get();
        c = self.src.skip_white(c);
        if c != EOF && c as u8 == b':' {
            let mut nc = self.src.get();
            nc = self.src.skip_white(nc);
            if nc != EOF && token::starts_identifier(nc) {
                let label_tok = classify_at(&mut self.src, nc, self.language);
                self.scope.top_mut().block_name = Some(label_tok.text);
                return (true, self.src.get());
            }
            return (false, nc);
        }
        (false, c)
    }

    fn process_end(&mut self, tok: &LexToken) -> i32 {
        let top_kind = self.scope.top().kind;

        let covergroup_matches = tok.kind == Kind::EndDe && top_kind == Kind::Covergroup && tok.text == "endgroup";
        let marker = top_kind.end_marker_name();
        let marker_matches = tok.kind == Kind::EndDe && !marker.is_empty() && tok.text == format!("end{marker}");
        let bare_block_matches = tok.kind == Kind::End && top_kind == Kind::Block && self.scope.top().nest_level == 0;
        let dropped_now = covergroup_matches || marker_matches || bare_block_matches;

        if dropped_now {
            trace!("dropping context {:?} (kind {top_kind:?})", self.scope.top().name);
            self.scope.pop();
        }

        if tok.kind == Kind::End {
            self.scope.top_mut().nest_level -= 1;
        }

        // Neither stage has a trailing `: label` to look for.
        if !dropped_now && tok.kind != Kind::End {
            return self.src.get();
        }

        let (found_label, c) = self.consume_end_label();

        if marker_matches && self.scope.top().implicit {
            trace!("dropping implicit class scope {:?}", self.scope.top().name);
            self.scope.pop();
        }

        if tok.kind == Kind::End && found_label && self.scope.top().kind == Kind::Block && self.scope.top().nest_level <= 1 {
            trace!("dropping labelled block {:?}", self.scope.top().name);
            self.scope.pop();
        }

        c
    }

    /// The single path every emitted tag passes through: normalises
    /// transient kinds, applies the enclosing frame's prototype override,
    /// drops disabled kinds (while still opening/closing any scope frame the
    /// declaration implies), and emits the qualified-name duplicate.
    fn create_tag(&mut self, tok: &LexToken, mut kind: Kind, opts: Option<TagOpts>) {
        let opts = opts.unwrap_or_default();

        if kind == Kind::LocalParam {
            kind = Kind::Constant;
        }
        let mut parameter_field = opts.parameter_override;
        if kind == Kind::Parameter {
            kind = Kind::Constant;
            if parameter_field.is_none() {
                let top = self.scope.top();
                let overridable =
                    top.kind != Kind::Class && top.kind != Kind::Package && !top.has_param_list;
                parameter_field = Some(overridable);
            }
        }

        // The kind that decides whether a scope frame opens: computed before
        // the prototype override below, since `Prototype` is never itself a
        // container but the declaration it stands in for usually is.
        let container_kind = kind;
        let is_prototype = opts.force_prototype || self.scope.top().prototype;
        let emit_kind = if is_prototype { Kind::Prototype } else { kind };

        if tok.text.is_empty() {
            trace!("unexpected empty token, kind {kind:?}");
        } else if !self.options.kind_enabled(emit_kind, self.language) {
            trace!("kind {emit_kind:?} disabled, dropping tag {:?}", tok.text);
        }
        if !tok.text.is_empty() && self.options.kind_enabled(emit_kind, self.language) {
            let scope_path = self.scope.scope_path();
            let span = Span::new(self.file, tok.pos, tok.pos + tok.text.len() as u32);
            let entry = TagEntry {
                name: tok.text.clone(),
                kind: emit_kind,
                file: self.file,
                span,
                scope: scope_path.clone(),
                is_prototype,
                inheritance: opts.inheritance.clone(),
                parameter: parameter_field,
            };
            debug!("adding tag {} (kind {emit_kind:?}) to scope {scope_path:?}", entry.name);
            self.sink.emit(entry.clone());
            if self.options.qualified_tags && !scope_path.is_empty() {
                self.sink.emit(TagEntry {
                    name: entry.qualified_name(),
                    scope: String::new(),
                    ..entry
                });
            }
        }

        if container_kind.is_container() {
            if let Some(base) = &opts.inheritance {
                trace!("{} extends {base}", tok.text);
            }
            let mut frame = ScopeFrame::named(container_kind, tok.text.clone());
            frame.inheritance = opts.inheritance;
            frame.prototype = is_prototype;
            trace!("created new scope {:?} (kind {container_kind:?})", frame.name);
            self.scope.push(frame);
            self.flush_pending_enum();
            if container_kind.is_temporary_context() {
                trace!("dropping temporary scope {:?}", tok.text);
                self.scope.pop();
            }
        }
    }

    fn flush_pending_enum(&mut self) {
        if self.pending_enum.is_empty() {
            return;
        }
        let members = std::mem::take(&mut self.pending_enum);
        for m in members {
            let tok = LexToken {
                text: m.name,
                kind: Kind::Constant,
                line: m.line,
                pos: m.pos,
            };
            self.create_tag(&tok, Kind::Constant, None);
        }
    }

    fn on_semicolon(&mut self) {
        if self.scope.top().prototype {
            self.scope.pop();
            if self.scope.top().implicit {
                self.scope.pop();
            }
        }
        self.scope.top_mut().prototype = false;
        self.flush_pending_enum();
    }
}

/// Resolves `tagNameList`'s declared/actual kind pair to the kind a tag is
/// finally emitted with: a user-defined-type declaration (`declared ==
/// Identifier`) takes the net/register kind observed along the way, falling
/// back to `Register` when none was seen (see spec open question on this).
fn resolve_kind(declared: Kind, actual: Kind) -> Kind {
    if declared == Kind::Identifier {
        if actual != Kind::Identifier {
            actual
        } else {
            Kind::Register
        }
    } else {
        declared
    }
}
