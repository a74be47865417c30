use std::fmt::Write;

use crate::op::Op;

/// Capacity of the cell buffer in generated C programs.
///
/// The interpreter's tape is unbounded; the C backend deliberately is not.
/// Programs that wander past this many cells run correctly under the
/// engine but overrun the buffer when compiled.
pub const C_CELL_COUNT: usize = 3000;

/// Lower an instruction sequence to a complete, self-contained C program.
///
/// One operator maps to one fixed statement or brace, concatenated in
/// sequence order. Comment entries are skipped exactly as the engine skips
/// them. Bracket balance is not validated: unbalanced input yields
/// unbalanced braces, which the downstream C compiler will reject. The
/// output is deterministic, byte for byte.
pub fn lower_to_c(program: &[Op]) -> String {
    let mut source = String::new();
    let _ = write!(
        source,
        "#include <stdio.h>\nint main() {{\nint pos = 0;\nchar cells[{C_CELL_COUNT}];\n"
    );
    for op in program {
        let stmt = match op {
            Op::Inc => "++cells[pos];",
            Op::Dec => "--cells[pos];",
            Op::Right => "pos++;",
            Op::Left => "pos--;",
            Op::Output => "putchar(cells[pos]);",
            Op::Input => "cells[pos] = getchar();",
            Op::LoopBegin => "while(cells[pos] != 0) {",
            Op::LoopEnd => "}",
            Op::Comment => continue,
        };
        source.push_str(stmt);
        source.push('\n');
    }
    source.push_str("return 0; }");
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op;

    #[test]
    fn test_fixed_statement_per_operator() {
        let text = lower_to_c(&op::parse("+-><.,[]"));
        let expected = "#include <stdio.h>\n\
                        int main() {\n\
                        int pos = 0;\n\
                        char cells[3000];\n\
                        ++cells[pos];\n\
                        --cells[pos];\n\
                        pos++;\n\
                        pos--;\n\
                        putchar(cells[pos]);\n\
                        cells[pos] = getchar();\n\
                        while(cells[pos] != 0) {\n\
                        }\n\
                        return 0; }";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_comments_lower_to_nothing() {
        assert_eq!(lower_to_c(&op::parse("a + b")), lower_to_c(&op::parse("+")));
    }

    #[test]
    fn test_empty_program_is_boilerplate_only() {
        let text = lower_to_c(&[]);
        assert!(text.starts_with("#include <stdio.h>\n"));
        assert!(text.ends_with("return 0; }"));
        assert!(text.contains("char cells[3000];"));
    }

    #[test]
    fn test_unbalanced_brackets_yield_unbalanced_braces() {
        // Not validated here: the downstream C compiler rejects this.
        let text = lower_to_c(&op::parse("[[]"));
        let opens = text.matches("while(cells[pos] != 0) {").count();
        let closes = text.matches("\n}\n").count();
        assert_eq!(opens, 2);
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_buffer_is_fixed_size() {
        // The engine's tape is unbounded; the C backend bounds it at
        // C_CELL_COUNT cells. Intentional divergence, not a bug.
        let text = lower_to_c(&op::parse(">"));
        assert!(text.contains(&format!("char cells[{C_CELL_COUNT}];")));
    }
}
