//! Character-level skip utilities used between declarations.
//!
//! These mirror the reference parser's family of `skip*` helpers: small,
//! single-purpose scanners that consume input the recognizer doesn't need
//! to look inside (expressions, dimensions, macro bodies, delay values) and
//! return the next character of interest.

use crate::char_source::{CharSource, EOF};

/// Skips from an already-consumed opening bracket to its matching closer,
/// honoring nesting. `open`/`close` are e.g. `(`/`)`, `[`/`]`, `{`/`}`.
///
/// Returns the character immediately after the matching closer, or [`EOF`].
pub fn skip_past_match(src: &mut CharSource, open: u8, close: u8) -> i32 {
    let mut depth = 1u32;
    loop {
        let c = src.get();
        if c == EOF {
            return EOF;
        }
        let b = c as u8;
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return src.get();
            }
        }
    }
}

/// Skips a `[...]` dimension/range/bit-select starting at `c`.
///
/// If `c` is not `[`, returns `c` unchanged (there was no dimension).
pub fn skip_dimension(src: &mut CharSource, c: i32) -> i32 {
    if c == b'[' as i32 {
        skip_past_match(src, b'[', b']')
    } else {
        c
    }
}

/// Skips repeated `[...]` dimensions (e.g. `[3:0][7:0]`), returning the
/// first non-`[` character found afterward.
pub fn skip_dimensions(src: &mut CharSource, mut c: i32) -> i32 {
    while c == b'[' as i32 {
        c = skip_past_match(src, b'[', b']');
        c = src.skip_white(c);
    }
    c
}

/// Skips forward to (and past) the next unnested `;`, honoring `()`/`[]`/`{}`
/// nesting so a semicolon inside an expression or port list isn't mistaken
/// for the statement terminator.
///
/// Returns the character after the semicolon, or [`EOF`] if none is found.
pub fn skip_to_semicolon(src: &mut CharSource, mut c: i32) -> i32 {
    loop {
        if c == EOF {
            return EOF;
        }
        match c as u8 {
            b';' => return src.get(),
            b'(' => c = skip_past_match(src, b'(', b')'),
            b'[' => c = skip_past_match(src, b'[', b']'),
            b'{' => c = skip_past_match(src, b'{', b'}'),
            _ => c = src.get(),
        }
    }
}

/// Skips an expression: everything up to (but not past) the first unnested
/// `,`, `;`, or `)`. Used after a `=` default-value assignment.
pub fn skip_expression(src: &mut CharSource, mut c: i32) -> i32 {
    loop {
        if c == EOF {
            return EOF;
        }
        match c as u8 {
            b',' | b';' | b')' => return c,
            b'(' => c = skip_past_match(src, b'(', b')'),
            b'[' => c = skip_past_match(src, b'[', b']'),
            b'{' => c = skip_past_match(src, b'{', b'}'),
            _ => c = src.get(),
        }
    }
}

/// Skips a class-parameter specialization after a type name, e.g. the
/// `#(IF)` in `uvm_port_base#(IF) get_if(...)`. A no-op unless `c` is `#`.
pub fn skip_parameter_assignment(src: &mut CharSource, c: i32) -> i32 {
    if c != b'#' as i32 {
        return c;
    }
    let next = src.get();
    let c = src.skip_white(next);
    if c == b'(' as i32 {
        src.skip_white(skip_past_match(src, b'(', b')'))
    } else {
        c
    }
}

/// Skips to (and past) the next physical newline, honoring backslash
/// line-continuation: a `\` immediately before a newline does not end the
/// skip. Used for single-line compiler directives and `` `define `` bodies.
pub fn skip_to_new_line(src: &mut CharSource, mut c: i32) -> i32 {
    loop {
        if c == EOF {
            return EOF;
        }
        if c == b'\\' as i32 {
            let next = src.get();
            if next == b'\n' as i32 {
                c = src.get();
                continue;
            }
            c = next;
            continue;
        }
        if c == b'\n' as i32 {
            return src.get();
        }
        c = src.get();
    }
}

/// Skips a `` `macro(...) `` or bare `` `macro `` invocation: an optional
/// parenthesized argument list, consumed at the character level since macro
/// arguments are not design elements.
pub fn skip_macro(src: &mut CharSource, c: i32) -> i32 {
    let c = src.skip_white(c);
    if c == b'(' as i32 {
        skip_past_match(src, b'(', b')')
    } else {
        c
    }
}

/// Skips a delay or event-control expression: `#<number>`, `#(...)`, or
/// `##<number>`/`##(...)` (cycle delay). The reference parser treats `##` as
/// unparseable in general and skips straight to the terminating semicolon;
/// this mirrors that rather than attempting to parse the cycle-delay syntax.
pub fn skip_delay(src: &mut CharSource, mut c: i32) -> i32 {
    debug_assert_eq!(c as u8, b'#');
    c = src.get();
    if c == b'#' as i32 {
        let next = src.get();
        return skip_to_semicolon(src, next);
    }
    c = src.skip_white(c);
    if c == b'(' as i32 {
        return src.skip_white(skip_past_match(src, b'(', b')'));
    }
    while c != EOF && (c as u8 as char).is_ascii_digit() {
        c = src.get();
    }
    src.skip_white(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_past_match_handles_nesting() {
        let mut cs = CharSource::new("(a (b) c) rest");
        let c = cs.get();
        assert_eq!(c, b'(' as i32);
        let after = skip_past_match(&mut cs, b'(', b')');
        assert_eq!(after, b' ' as i32);
    }

    #[test]
    fn skip_dimension_no_bracket_passthrough() {
        let mut cs = CharSource::new("x");
        let c = cs.get();
        assert_eq!(skip_dimension(&mut cs, c), c);
    }

    #[test]
    fn skip_dimensions_multiple() {
        let mut cs = CharSource::new("[3:0][7:0] foo");
        let c = cs.get();
        let after = skip_dimensions(&mut cs, c);
        assert_eq!(after, b'f' as i32);
    }

    #[test]
    fn skip_to_semicolon_honors_nesting() {
        let mut cs = CharSource::new("(a; b); rest");
        let c = cs.get();
        let after = skip_to_semicolon(&mut cs, c);
        assert_eq!(after, b' ' as i32);
    }

    #[test]
    fn skip_expression_stops_before_comma() {
        let mut cs = CharSource::new("1 + 2, next");
        let c = cs.get();
        let after = skip_expression(&mut cs, c);
        assert_eq!(after, b',' as i32);
    }

    #[test]
    fn skip_to_new_line_respects_continuation() {
        let mut cs = CharSource::new("a\\\nb\nc");
        let c = cs.get();
        let after = skip_to_new_line(&mut cs, c);
        assert_eq!(after, b'c' as i32);
    }

    #[test]
    fn skip_macro_with_args() {
        let mut cs = CharSource::new("(a, b) rest");
        let c = cs.get();
        let after = skip_macro(&mut cs, c);
        assert_eq!(after, b' ' as i32);
    }

    #[test]
    fn skip_macro_bare() {
        let mut cs = CharSource::new(" rest");
        let c = cs.get();
        let after = skip_macro(&mut cs, c);
        assert_eq!(after, b'r' as i32);
    }

    #[test]
    fn skip_delay_numeric() {
        let mut cs = CharSource::new("#5 rest");
        let c = cs.get();
        let after = skip_delay(&mut cs, c);
        assert_eq!(after, b'r' as i32);
    }

    #[test]
    fn skip_delay_parenthesized() {
        let mut cs = CharSource::new("#(1, 0) rest");
        let c = cs.get();
        let after = skip_delay(&mut cs, c);
        assert_eq!(after, b'r' as i32);
    }

    #[test]
    fn skip_delay_double_hash_goes_to_semicolon() {
        let mut cs = CharSource::new("##2 foo = bar; rest");
        let c = cs.get();
        let after = skip_delay(&mut cs, c);
        assert_eq!(after, b' ' as i32);
    }
}
