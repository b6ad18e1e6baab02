mod source;
mod token;

pub use source::{ScriptLines, ScriptSource};
pub use token::{tokenize, CommandKind, ScriptLine, DELIMITER};
