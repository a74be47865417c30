/// The eight Brainfuck operators, plus a catch-all for everything else.
///
/// Any character outside `><+-.,[]` is a comment. Comments are kept in the
/// parsed sequence (as `Comment` entries) rather than stripped, so that
/// instruction indices line up 1:1 with source characters; loop jumps are
/// index-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `>`: move the tape pointer right.
    Right,
    /// `<`: move the tape pointer left.
    Left,
    /// `+`: increment the current cell.
    Inc,
    /// `-`: decrement the current cell.
    Dec,
    /// `.`: write the current cell to the output sink.
    Output,
    /// `,`: read one unit from the input source into the current cell.
    Input,
    /// `[`: zero-test loop begin.
    LoopBegin,
    /// `]`: zero-test loop end.
    LoopEnd,
    /// Any other character. A no-op during dispatch.
    Comment,
}

impl Op {
    pub fn from_char(c: char) -> Self {
        match c {
            '>' => Op::Right,
            '<' => Op::Left,
            '+' => Op::Inc,
            '-' => Op::Dec,
            '.' => Op::Output,
            ',' => Op::Input,
            '[' => Op::LoopBegin,
            ']' => Op::LoopEnd,
            _ => Op::Comment,
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Op::Comment)
    }
}

/// Parse source text into an instruction sequence, one entry per character.
pub fn parse(source: &str) -> Vec<Op> {
    source.chars().map(Op::from_char).collect()
}
