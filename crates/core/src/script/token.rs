//! Line tokenizer and command discriminators.

use serde::{Deserialize, Serialize};

/// Separator between tokens of a script line.
pub const DELIMITER: char = ',';

/// One script line split into trimmed tokens. The raw text is kept for
/// commands whose last field is free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    tokens: Vec<String>,
    #[serde(default)]
    raw: String,
}

impl ScriptLine {
    pub fn new(tokens: Vec<String>) -> Self {
        let raw = tokens.join(&DELIMITER.to_string());
        Self { tokens, raw }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// First character of the first token.
    pub fn discriminator(&self) -> Option<char> {
        self.token(0).and_then(|head| head.chars().next())
    }

    pub fn kind(&self) -> Option<CommandKind> {
        self.discriminator().and_then(CommandKind::from_discriminator)
    }

    /// The line after its `start`-th delimiter, trimmed at both ends only,
    /// so free text keeps its commas exactly as written.
    pub fn rest_from(&self, start: usize) -> String {
        if start == 0 {
            return self.raw.trim().to_string();
        }
        self.raw
            .match_indices(DELIMITER)
            .nth(start - 1)
            .map(|(at, sep)| self.raw[at + sep.len()..].trim().to_string())
            .unwrap_or_default()
    }
}

/// Splits `line` on [`DELIMITER`] and trims every token.
pub fn tokenize(line: &str) -> ScriptLine {
    if line.trim().is_empty() {
        return ScriptLine::default();
    }
    ScriptLine {
        tokens: line
            .split(DELIMITER)
            .map(|token| token.trim().to_string())
            .collect(),
        raw: line.to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Label,
    Image,
    Message,
    Wait,
    Jump,
    Choice,
    Draw,
    ClickSync,
    End,
}

impl CommandKind {
    pub fn from_discriminator(ch: char) -> Option<Self> {
        let kind = match ch {
            'l' => Self::Label,
            'i' => Self::Image,
            'm' => Self::Message,
            'w' => Self::Wait,
            'j' => Self::Jump,
            'c' => Self::Choice,
            'd' => Self::Draw,
            '@' => Self::ClickSync,
            'e' => Self::End,
            _ => return None,
        };
        Some(kind)
    }

    pub fn discriminator(self) -> char {
        match self {
            Self::Label => 'l',
            Self::Image => 'i',
            Self::Message => 'm',
            Self::Wait => 'w',
            Self::Jump => 'j',
            Self::Choice => 'c',
            Self::Draw => 'd',
            Self::ClickSync => '@',
            Self::End => 'e',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Image => "image",
            Self::Message => "message",
            Self::Wait => "wait",
            Self::Jump => "jump",
            Self::Choice => "choice",
            Self::Draw => "draw",
            Self::ClickSync => "click",
            Self::End => "end",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_split_and_trimmed() {
        let line = tokenize("m,  Hello there ,world ");
        assert_eq!(line.tokens(), ["m", "Hello there", "world"]);
        assert_eq!(line.kind(), Some(CommandKind::Message));
        assert_eq!(line.rest_from(1), "Hello there ,world");
        assert_eq!(line.rest_from(2), "world");
        assert_eq!(line.rest_from(3), "");
    }

    #[test]
    fn free_text_keeps_commas_as_written() {
        let line = tokenize("m, It costs 1,000 yen");
        assert_eq!(line.tokens(), ["m", "It costs 1", "000 yen"]);
        assert_eq!(line.rest_from(1), "It costs 1,000 yen");

        let joined = ScriptLine::new(vec!["c".into(), "t".into(), "Yes".into(), "please".into()]);
        assert_eq!(joined.rest_from(2), "Yes,please");
    }

    #[test]
    fn discriminator_is_first_character_of_first_token() {
        assert_eq!(tokenize("label_ignored, x").kind(), Some(CommandKind::Label));
        assert_eq!(tokenize("@").kind(), Some(CommandKind::ClickSync));
        assert_eq!(tokenize("x, y").kind(), None);
        assert_eq!(tokenize("x, y").discriminator(), Some('x'));
    }

    #[test]
    fn blank_lines_have_no_tokens() {
        let line = tokenize("   ");
        assert!(line.is_empty());
        assert_eq!(line.kind(), None);
        assert_eq!(line.rest_from(1), "");
    }

    #[test]
    fn every_kind_roundtrips_through_its_discriminator() {
        for kind in [
            CommandKind::Label,
            CommandKind::Image,
            CommandKind::Message,
            CommandKind::Wait,
            CommandKind::Jump,
            CommandKind::Choice,
            CommandKind::Draw,
            CommandKind::ClickSync,
            CommandKind::End,
        ] {
            assert_eq!(CommandKind::from_discriminator(kind.discriminator()), Some(kind));
        }
    }
}
