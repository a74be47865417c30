use std::io::{self, Write};

use crate::input::{InputSource, TerminalInput};
use crate::op::{self, Op};
use crate::tape::Tape;

/// The Brainfuck execution engine.
///
/// Owns a [`Tape`], an instruction sequence, and a cursor into it. Loops
/// are resolved lazily: each `[` or `]` that needs to jump rescans the
/// sequence for its partner instead of consulting a precomputed table.
/// The rescan is O(n) per loop boundary; slow, but it is what defines the
/// language's exact behavior here, including two quirks programs may rely
/// on:
///
/// - After a forward jump lands the cursor on a matched `]`, the
///   unconditional post-dispatch increment pushes it one further, so the
///   instruction immediately after that `]` is skipped.
/// - The backward scan for `[` never inspects index 0. A `]` whose match
///   sits at the very start of the sequence is treated as unmatched and
///   falls through.
///
/// The engine raises no language-level errors. Unrecognized characters are
/// comments, unmatched brackets degrade to fallthrough or to running off
/// the end, and exhausted input reads as 0. Only resource failures on the
/// I/O endpoints surface, as `io::Error` from [`Engine::step`] and
/// [`Engine::run`].
pub struct Engine {
    program: Vec<Op>,
    cursor: usize,
    tape: Tape,
    pointer: i64,
    input: Box<dyn InputSource>,
    output: Box<dyn Write>,
}

impl Engine {
    /// Create an engine for `source` with the default endpoints: an
    /// interactive terminal reader for input and standard output for
    /// output.
    pub fn new(source: &str) -> Self {
        Self {
            program: op::parse(source),
            cursor: 0,
            tape: Tape::new(),
            pointer: 0,
            input: Box::new(TerminalInput::new()),
            output: Box::new(io::stdout()),
        }
    }

    /// Create an engine with explicit I/O endpoints instead of the
    /// defaults.
    pub fn with_io(source: &str, input: Box<dyn InputSource>, output: Box<dyn Write>) -> Self {
        Self {
            program: op::parse(source),
            cursor: 0,
            tape: Tape::new(),
            pointer: 0,
            input,
            output,
        }
    }

    /// True once the cursor has moved past the last instruction.
    pub fn is_end(&self) -> bool {
        self.cursor >= self.program.len()
    }

    /// Execute one instruction and advance the cursor.
    ///
    /// A no-op at or past the end of the sequence. Comment entries just
    /// advance the cursor. The cursor increment is unconditional, even
    /// after a loop jump has already repositioned it.
    pub fn step(&mut self) -> io::Result<()> {
        if self.is_end() {
            return Ok(());
        }
        match self.program[self.cursor] {
            Op::Right => self.pointer += 1,
            Op::Left => self.pointer -= 1,
            Op::Inc => {
                let v = self.tape.get(self.pointer);
                self.tape.set(self.pointer, v.wrapping_add(1));
            }
            Op::Dec => {
                let v = self.tape.get(self.pointer);
                self.tape.set(self.pointer, v.wrapping_sub(1));
            }
            Op::Output => {
                // Cells wrap modulo a byte range for output only; the
                // stored value stays untouched.
                let v = self.tape.get(self.pointer);
                self.output.write_all(&[v.rem_euclid(256) as u8])?;
            }
            Op::Input => {
                let unit = self.input.read_unit()?;
                let v = match unit {
                    Some(c) => c as i64,
                    None => 0,
                };
                self.tape.set(self.pointer, v);
            }
            Op::LoopBegin => self.loop_begin(),
            Op::LoopEnd => self.loop_end(),
            Op::Comment => {}
        }
        self.cursor += 1;
        Ok(())
    }

    /// Step until the cursor leaves the sequence.
    ///
    /// Iteration is unbounded: a program with no terminating condition
    /// runs forever and must be stopped externally.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.is_end() {
            self.step()?;
        }
        Ok(())
    }

    /// Replace the instruction sequence, fully resetting the tape, the
    /// tape pointer, and the cursor. The I/O endpoints are kept.
    pub fn set_program(&mut self, source: &str) {
        self.program = op::parse(source);
        self.cursor = 0;
        self.tape = Tape::new();
        self.pointer = 0;
    }

    /// Swap the input endpoint. Allowed at any time, mid-run included.
    pub fn set_input(&mut self, input: Box<dyn InputSource>) {
        self.input = input;
    }

    /// Swap the output endpoint. Allowed at any time, mid-run included.
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// The tape, for diagnostics.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Current cursor position, for diagnostics.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current tape pointer position, for diagnostics.
    pub fn pointer(&self) -> i64 {
        self.pointer
    }

    /// `[` with a non-zero cell falls through into the loop body. With a
    /// zero cell, scan forward for the matching `]`: a `]` seen at depth 0
    /// is the match, further `]`s raise the depth counter, nested `[`s
    /// lower it. The cursor is set one past the match; the post-dispatch
    /// increment in `step` then pushes it one further still.
    fn loop_begin(&mut self) {
        if self.tape.get(self.pointer) != 0 {
            return;
        }
        let mut found = 0i32;
        for i in self.cursor + 1..self.program.len() {
            match self.program[i] {
                Op::LoopEnd if found == 0 => {
                    self.cursor = i + 1;
                    return;
                }
                Op::LoopEnd => found += 1,
                Op::LoopBegin => found -= 1,
                _ => {}
            }
        }
        // No match: leave the cursor alone. Execution continues past the
        // bracket and eventually walks off the end.
    }

    /// `]` with a zero cell falls through, exiting the loop. With a
    /// non-zero cell, scan backward for the matching `[` with the
    /// symmetric depth rule and set the cursor on it (the increment in
    /// `step` then lands on the first body instruction). The scan stops at
    /// index 1: index 0 is never a candidate match.
    fn loop_end(&mut self) {
        if self.tape.get(self.pointer) == 0 {
            return;
        }
        let mut found = 0i32;
        for i in (1..self.cursor).rev() {
            match self.program[i] {
                Op::LoopBegin if found == 0 => {
                    self.cursor = i;
                    return;
                }
                Op::LoopBegin => found += 1,
                Op::LoopEnd => found -= 1,
                _ => {}
            }
        }
        // Unmatched: the cursor is untouched and the increment in `step`
        // moves execution past the bracket.
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::input::StreamInput;
    use proptest::prelude::*;
    use std::io::Cursor;

    const ALPHABET: [char; 10] = ['>', '<', '+', '-', '.', ',', '[', ']', 'a', ' '];

    fn arb_program() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 0..64)
            .prop_map(|chars| chars.into_iter().collect())
    }

    /// Step an engine at most `cap` times. Programs may loop forever by
    /// design, so properties are checked under an external step cap.
    fn step_capped(engine: &mut Engine, cap: usize) {
        for _ in 0..cap {
            if engine.is_end() {
                break;
            }
            engine.step().unwrap();
        }
    }

    proptest! {
        #[test]
        fn random_programs_never_panic(
            source in arb_program(),
            input in prop::collection::vec(any::<u8>(), 0..16)
        ) {
            let mut engine = Engine::new(&source);
            engine.set_input(Box::new(StreamInput::new(Cursor::new(input))));
            engine.set_output(Box::new(std::io::sink()));
            step_capped(&mut engine, 4096);
        }

        #[test]
        fn cursor_stays_in_bounds(source in arb_program()) {
            let len = source.chars().count();
            let mut engine = Engine::new(&source);
            engine.set_input(Box::new(StreamInput::new(std::io::empty())));
            engine.set_output(Box::new(std::io::sink()));
            for _ in 0..4096 {
                if engine.is_end() {
                    break;
                }
                engine.step().unwrap();
                // A forward jump can set the cursor to the match's
                // successor at the very end of the sequence; the
                // post-dispatch increment then lands one past that. The
                // cursor never gets further out than len + 1.
                prop_assert!(engine.cursor() <= len + 1);
            }
        }

        #[test]
        fn bracket_free_programs_terminate(
            source in prop::collection::vec(
                prop::sample::select(vec!['>', '<', '+', '-', '.', ',', 'a']),
                0..64
            ).prop_map(|chars| chars.into_iter().collect::<String>())
        ) {
            // Without brackets the cursor only ever moves forward, so the
            // program halts in exactly len steps.
            let len = source.chars().count();
            let mut engine = Engine::new(&source);
            engine.set_input(Box::new(StreamInput::new(std::io::empty())));
            engine.set_output(Box::new(std::io::sink()));
            step_capped(&mut engine, len + 1);
            prop_assert!(engine.is_end());
        }
    }
}
